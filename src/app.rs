//! App state and core application logic
//!
//! Owns the current search criteria and the one-shot result cache, and
//! coordinates the "find a movie" action between the API client and the
//! selector.

use serde::Serialize;
use tracing::{debug, info};

use crate::api::{OttClient, QueryError};
use crate::models::{CriteriaError, DisplayMovie, MovieRecord, SearchCriteria};
use crate::selector;
use crate::validate::FormField;

// =============================================================================
// Find Outcome
// =============================================================================

/// Result of a successful find
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "movie", rename_all = "snake_case")]
pub enum FindOutcome {
    /// A movie was selected
    Movie(DisplayMovie),
    /// The page had too few results to pick from
    NoSelection,
}

impl FindOutcome {
    pub fn movie(&self) -> Option<&DisplayMovie> {
        match self {
            FindOutcome::Movie(movie) => Some(movie),
            FindOutcome::NoSelection => None,
        }
    }

    pub fn is_selection(&self) -> bool {
        matches!(self, FindOutcome::Movie(_))
    }
}

// =============================================================================
// App
// =============================================================================

/// Search session
///
/// The last fetched page is kept until the criteria change, so repeated finds
/// with the same form reuse it instead of calling the API again. `find_movie`
/// takes `&mut self`, which allows only one find in flight per session.
pub struct App {
    client: OttClient,
    criteria: SearchCriteria,
    cache: Option<Vec<MovieRecord>>,
}

impl App {
    /// Create a session starting from the random preset
    pub fn new(client: OttClient) -> Self {
        Self::with_criteria(client, SearchCriteria::random())
    }

    pub fn with_criteria(client: OttClient, criteria: SearchCriteria) -> Self {
        Self {
            client,
            criteria,
            cache: None,
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn client(&self) -> &OttClient {
        &self.client
    }

    /// Number of cached records, if a page is cached
    pub fn cached_len(&self) -> Option<usize> {
        self.cache.as_ref().map(Vec::len)
    }

    /// Replace the criteria
    pub fn set_criteria(&mut self, criteria: SearchCriteria) {
        self.criteria = criteria;
        self.invalidate();
    }

    /// Validate raw text for one form field and store it
    pub fn update_field(&mut self, field: FormField, raw: &str) {
        self.criteria.apply_field(field, raw);
        debug!(%field, raw, criteria = %self.criteria, "form field updated");
        self.invalidate();
    }

    /// Toggle a genre by catalog index
    pub fn toggle_genre(&mut self, index: usize) -> Result<bool, CriteriaError> {
        let selected = self.criteria.toggle_genre(index)?;
        self.invalidate();
        Ok(selected)
    }

    /// Toggle a genre by catalog index or name
    pub fn toggle_genre_by_key(&mut self, key: &str) -> Result<bool, CriteriaError> {
        let selected = self.criteria.toggle_genre_by_key(key)?;
        self.invalidate();
        Ok(selected)
    }

    pub fn clear_genres(&mut self) {
        self.criteria.clear_genres();
        self.invalidate();
    }

    /// Pick a random movie, fetching a page only if none is cached
    pub async fn find_movie(&mut self) -> Result<FindOutcome, QueryError> {
        match self.cache {
            Some(ref records) => debug!(count = records.len(), "using cached results"),
            None => {
                let fetched = self.client.fetch_movies(&self.criteria).await?;
                self.cache = Some(fetched);
            }
        }
        let records = self.cache.as_deref().unwrap_or_default();

        let outcome = match selector::pick_random(records) {
            Some(movie) => FindOutcome::Movie(movie),
            None => {
                info!(count = records.len(), "too few results to pick from");
                FindOutcome::NoSelection
            }
        };
        Ok(outcome)
    }

    fn invalidate(&mut self) {
        if self.cache.take().is_some() {
            debug!("criteria changed, cached results dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(OttClient::with_base_url("k", "h", "http://127.0.0.1:1"))
    }

    #[test]
    fn test_new_uses_random_preset() {
        let app = app();
        assert_eq!(app.criteria(), &SearchCriteria::random());
        assert_eq!(app.cached_len(), None);
    }

    #[test]
    fn test_writes_clear_cache() {
        let mut app = app();

        app.cache = Some(vec![MovieRecord::default(); 3]);
        app.update_field(FormField::FromYear, "1999");
        assert_eq!(app.cached_len(), None);
        assert_eq!(app.criteria().from_year, 1999);

        app.cache = Some(vec![]);
        app.toggle_genre(4).unwrap();
        assert_eq!(app.cached_len(), None);

        app.cache = Some(vec![]);
        app.clear_genres();
        assert_eq!(app.cached_len(), None);

        app.cache = Some(vec![]);
        app.set_criteria(SearchCriteria::default());
        assert_eq!(app.cached_len(), None);
    }

    #[test]
    fn test_rejected_toggle_keeps_cache() {
        let mut app = app();
        app.cache = Some(vec![]);
        assert!(app.toggle_genre(99).is_err());
        assert_eq!(app.cached_len(), Some(0));
    }

    #[tokio::test]
    async fn test_find_uses_cache_without_network() {
        let mut app = app();
        app.cache = Some(vec![
            MovieRecord {
                title: Some("Alien".to_string()),
                ..MovieRecord::default()
            },
            MovieRecord {
                title: Some("Aliens".to_string()),
                ..MovieRecord::default()
            },
        ]);

        let outcome = app.find_movie().await.unwrap();
        let title = &outcome.movie().unwrap().title;
        assert!(title == "Alien" || title == "Aliens");
    }

    #[tokio::test]
    async fn test_find_single_cached_record_is_no_selection() {
        let mut app = app();
        app.cache = Some(vec![MovieRecord::default()]);
        assert_eq!(app.find_movie().await.unwrap(), FindOutcome::NoSelection);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_cache_empty() {
        let mut app = app();
        let err = app.find_movie().await.unwrap_err();
        assert!(matches!(err, QueryError::ServerError(_)));
        assert_eq!(app.cached_len(), None);
    }
}
