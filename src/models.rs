//! Data structures and types for randmovie
//!
//! Contains the shared models used across the application organized by domain:
//! - **Criteria**: the search form (year range, rating range, genre set)
//! - **Records**: movie entries decoded from the advanced search API
//! - **Display**: the fully-defaulted shape handed to the front end

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::validate::{current_year, FormField};

// =============================================================================
// Domain Bounds
// =============================================================================

/// Earliest year the search form accepts
pub const MIN_YEAR: u16 = 1970;

/// Upper year bound used by both presets
pub const PRESET_TO_YEAR: u16 = 2020;

/// Lowest accepted IMDB rating
pub const MIN_RATING: u8 = 0;

/// Highest accepted IMDB rating
pub const MAX_RATING: u8 = 10;

/// Description shown when a record carries no synopsis
pub const NO_DESCRIPTION: &str = "No description";

/// Image shown when a record carries no image URL
pub const PLACEHOLDER_IMAGE_URL: &str = "https://st.depositphotos.com/1987177/3470/v/600/depositphotos_34700099-stock-illustration-no-photo-available-or-missing.jpg";

// =============================================================================
// Genre Catalog
// =============================================================================

/// Fixed genre catalog. A genre's index in this list is its stable id.
pub const GENRE_CATALOG: [&str; 24] = [
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "Film Noir",
    "History",
    "Horror",
    "Music",
    "Musical",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Short",
    "Sport",
    "Superhero",
    "Thriller",
    "War",
    "Western",
];

/// Look up a genre name by catalog index
pub fn genre_name(index: usize) -> Option<&'static str> {
    GENRE_CATALOG.get(index).copied()
}

/// Find the catalog index of a genre name (case-insensitive)
pub fn genre_index(name: &str) -> Option<usize> {
    let name = name.trim();
    GENRE_CATALOG
        .iter()
        .position(|g| g.eq_ignore_ascii_case(name))
}

/// Criteria mutation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("Unknown genre index {0} (catalog has {} entries)", GENRE_CATALOG.len())]
    UnknownGenre(usize),

    #[error("Unknown genre name: {0}")]
    UnknownGenreName(String),
}

// =============================================================================
// Search Criteria
// =============================================================================

/// The user's current filter selection
///
/// Years stay within `[1970, current year]` and ratings within `[0, 10]`,
/// with each range ordered low to high.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub from_year: u16,
    pub to_year: u16,
    pub from_rating: u8,
    pub to_rating: u8,
    /// Catalog index -> genre name
    pub genres: BTreeMap<usize, String>,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            from_year: MIN_YEAR,
            to_year: PRESET_TO_YEAR,
            from_rating: 5,
            to_rating: MAX_RATING,
            genres: BTreeMap::new(),
        }
    }
}

impl SearchCriteria {
    /// Preset used before the user has touched the form: every rating allowed
    pub fn random() -> Self {
        Self {
            from_rating: MIN_RATING,
            ..Self::default()
        }
    }

    /// Set the year range, clamped into `[1970, current year]` with `from <= to`
    pub fn set_year_range(&mut self, from: u16, to: u16) {
        let upper = current_year().max(MIN_YEAR);
        self.from_year = from.max(MIN_YEAR).min(upper);
        self.to_year = to.max(self.from_year).min(upper);
    }

    /// Set the rating range, clamped into `[0, 10]` with `from <= to`
    pub fn set_rating_range(&mut self, from: u8, to: u8) {
        self.from_rating = from.min(MAX_RATING);
        self.to_rating = to.max(self.from_rating).min(MAX_RATING);
    }

    /// Toggle a genre by catalog index. Returns true if it is now selected.
    pub fn toggle_genre(&mut self, index: usize) -> Result<bool, CriteriaError> {
        let name = genre_name(index).ok_or(CriteriaError::UnknownGenre(index))?;
        if self.genres.remove(&index).is_some() {
            Ok(false)
        } else {
            self.genres.insert(index, name.to_string());
            Ok(true)
        }
    }

    /// Toggle a genre given either its catalog index or its name
    pub fn toggle_genre_by_key(&mut self, key: &str) -> Result<bool, CriteriaError> {
        let index = match key.trim().parse::<usize>() {
            Ok(index) => index,
            Err(_) => genre_index(key)
                .ok_or_else(|| CriteriaError::UnknownGenreName(key.to_string()))?,
        };
        self.toggle_genre(index)
    }

    /// Deselect every genre
    pub fn clear_genres(&mut self) {
        self.genres.clear();
    }

    /// Comma-joined names of the selected genres
    pub fn genres_query_string(&self) -> String {
        self.genres
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Validate raw form text for one field and store it
    pub fn apply_field(&mut self, field: FormField, raw: &str) {
        self.apply_field_at(field, raw, current_year());
    }

    /// Same as [`apply_field`](Self::apply_field) with an explicit current year
    pub fn apply_field_at(&mut self, field: FormField, raw: &str, current_year: u16) {
        // Lower bounds clamp against the domain minimum, upper bounds against
        // the lower bound of the same range.
        let lower = match field {
            FormField::FromYear => MIN_YEAR.to_string(),
            FormField::ToYear => self.from_year.to_string(),
            FormField::FromRating => MIN_RATING.to_string(),
            FormField::ToRating => self.from_rating.to_string(),
        };

        let text = field.validate_at(raw, &lower, current_year);
        let value = text
            .parse::<i64>()
            .ok()
            .and_then(|n| u16::try_from(n).ok())
            .unwrap_or_else(|| field.default_number(current_year));

        // The domain floor takes precedence over the paired bound in the clamp,
        // so an upper bound can come back below its pair. Stored ranges keep
        // from <= to.
        match field {
            FormField::FromYear => {
                self.from_year = value;
                self.to_year = self.to_year.max(value);
            }
            FormField::ToYear => self.to_year = value.max(self.from_year),
            FormField::FromRating => {
                self.from_rating = u8::try_from(value).unwrap_or(MIN_RATING);
                self.to_rating = self.to_rating.max(self.from_rating);
            }
            FormField::ToRating => {
                self.to_rating = u8::try_from(value)
                    .unwrap_or(MAX_RATING)
                    .max(self.from_rating);
            }
        }
    }
}

impl fmt::Display for SearchCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} ★ {}-{}",
            self.from_year, self.to_year, self.from_rating, self.to_rating
        )?;
        if !self.genres.is_empty() {
            write!(f, " [{}]", self.genres_query_string())?;
        }
        Ok(())
    }
}

// =============================================================================
// Movie Records (API)
// =============================================================================

/// One movie entry from the advanced search API
///
/// Every field is optional. A field that is present but has the wrong shape
/// decodes as `None` instead of failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "imdbrating", default, deserialize_with = "lenient")]
    pub imdb_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub released: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub synopsis: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(rename = "genre", default, deserialize_with = "lenient")]
    pub genres: Option<Vec<String>>,
    #[serde(rename = "imageurl", default, deserialize_with = "lenient")]
    pub image_urls: Option<Vec<String>>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

// =============================================================================
// Display Movie
// =============================================================================

/// Presentation-ready movie with every field defaulted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMovie {
    pub title: String,
    pub year: String,
    pub genre: String,
    pub description: String,
    pub rank: String,
    pub image_url: String,
}

impl From<&MovieRecord> for DisplayMovie {
    fn from(record: &MovieRecord) -> Self {
        Self {
            title: record.title.clone().unwrap_or_default(),
            year: record.released.unwrap_or(0).to_string(),
            genre: record
                .genres
                .as_ref()
                .map(|g| g.join(","))
                .unwrap_or_default(),
            description: record
                .synopsis
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            rank: record
                .imdb_rating
                .map(|r| r.to_string())
                .unwrap_or_else(|| "0".to_string()),
            image_url: record
                .image_urls
                .as_ref()
                .and_then(|urls| urls.first().cloned())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
        }
    }
}

impl fmt::Display for DisplayMovie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.title, self.year)?;
        writeln!(f, "IMDB Rating: {} / 10", self.rank)?;
        if !self.genre.is_empty() {
            writeln!(f, "{}", self.genre)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        write!(f, "{}", self.image_url)
    }
}
