//! Search form validation
//!
//! Clamps raw year and rating text against the domain bounds and against the
//! paired lower bound of the same range. Nothing here fails: text that does not
//! parse is handed back unchanged and the field rules replace it with a
//! default.

use chrono::{Datelike, Local};

use crate::models::{MAX_RATING, MIN_RATING, MIN_YEAR, PRESET_TO_YEAR};

/// Current calendar year (local time)
pub fn current_year() -> u16 {
    u16::try_from(Local::now().year()).unwrap_or(PRESET_TO_YEAR)
}

/// Clamp year text against 1970, the paired lower bound and the current year
pub fn clamp_year(input: &str, lower_bound: &str) -> String {
    clamp_year_at(input, lower_bound, current_year())
}

/// Same as [`clamp_year`] with an explicit current year
pub fn clamp_year_at(input: &str, lower_bound: &str, current_year: u16) -> String {
    let Ok(value) = input.parse::<i64>() else {
        return input.to_string();
    };

    if value < i64::from(MIN_YEAR) {
        MIN_YEAR.to_string()
    } else if below_bound(value, lower_bound) {
        lower_bound.to_string()
    } else if value > i64::from(current_year) {
        current_year.to_string()
    } else {
        input.to_string()
    }
}

/// Clamp rating text against 0, the paired lower bound and 10
pub fn clamp_rating(input: &str, lower_bound: &str) -> String {
    let Ok(value) = input.parse::<i64>() else {
        return input.to_string();
    };

    if value < i64::from(MIN_RATING) {
        MIN_RATING.to_string()
    } else if below_bound(value, lower_bound) {
        lower_bound.to_string()
    } else if value > i64::from(MAX_RATING) {
        MAX_RATING.to_string()
    } else {
        input.to_string()
    }
}

/// An unparseable bound never clamps
fn below_bound(value: i64, lower_bound: &str) -> bool {
    lower_bound
        .parse::<i64>()
        .map(|lower| value < lower)
        .unwrap_or(false)
}

// =============================================================================
// Form Fields
// =============================================================================

/// One editable field of the search form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FromYear,
    ToYear,
    FromRating,
    ToRating,
}

impl FormField {
    /// Value used when the field's text is rejected
    pub fn default_value(&self) -> String {
        self.default_value_at(current_year())
    }

    pub fn default_value_at(&self, current_year: u16) -> String {
        self.default_number(current_year).to_string()
    }

    pub(crate) fn default_number(&self, current_year: u16) -> u16 {
        match self {
            FormField::FromYear => MIN_YEAR,
            FormField::ToYear => current_year,
            FormField::FromRating => u16::from(MIN_RATING),
            FormField::ToRating => u16::from(MAX_RATING),
        }
    }

    pub fn is_year(&self) -> bool {
        matches!(self, FormField::FromYear | FormField::ToYear)
    }

    /// Validate raw field text against the paired lower bound
    pub fn validate(&self, raw: &str, lower_bound: &str) -> String {
        self.validate_at(raw, lower_bound, current_year())
    }

    /// Same as [`validate`](Self::validate) with an explicit current year
    ///
    /// Years must be exactly four characters and ratings at most two,
    /// otherwise the field default is used. Empty results also fall back to
    /// the default.
    pub fn validate_at(&self, raw: &str, lower_bound: &str, current_year: u16) -> String {
        let raw = raw.trim();
        let default = self.default_value_at(current_year);
        let len = raw.chars().count();

        let checked = if self.is_year() {
            if len == 4 {
                clamp_year_at(raw, lower_bound, current_year)
            } else {
                default.clone()
            }
        } else if len <= 2 {
            clamp_rating(raw, lower_bound)
        } else {
            default.clone()
        };

        if checked.is_empty() {
            default
        } else {
            checked
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormField::FromYear => write!(f, "from year"),
            FormField::ToYear => write!(f, "to year"),
            FormField::FromRating => write!(f, "from rating"),
            FormField::ToRating => write!(f, "to rating"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_year_in_range_unchanged() {
        for year in 1970..=2026u16 {
            let y = year.to_string();
            assert_eq!(clamp_year_at(&y, "1970", 2026), y);
            assert_eq!(clamp_year_at(&y, &y, 2026), y);
        }
    }

    #[test]
    fn test_clamp_year_bounds() {
        assert_eq!(clamp_year("1800", "1970"), "1970");
        assert_eq!(clamp_year("2999", "1970"), current_year().to_string());
        assert_eq!(clamp_year_at("1990", "2000", 2026), "2000");
        assert_eq!(clamp_year_at("2030", "2000", 2026), "2026");
    }

    #[test]
    fn test_clamp_year_non_numeric_unchanged() {
        assert_eq!(clamp_year("20x0", "1970"), "20x0");
        assert_eq!(clamp_year("", "1970"), "");
    }

    #[test]
    fn test_clamp_year_ignores_bad_bound() {
        assert_eq!(clamp_year_at("1990", "", 2026), "1990");
    }

    #[test]
    fn test_clamp_rating() {
        assert_eq!(clamp_rating("-1", "0"), "0");
        assert_eq!(clamp_rating("15", "0"), "10");
        assert_eq!(clamp_rating("3", "5"), "5");
        assert_eq!(clamp_rating("7", "5"), "7");
        assert_eq!(clamp_rating("ab", "5"), "ab");
    }

    #[test]
    fn test_year_field_length_rule() {
        let field = FormField::FromYear;
        assert_eq!(field.validate_at("199", "1970", 2026), "1970");
        assert_eq!(field.validate_at("19999", "1970", 2026), "1970");
        assert_eq!(field.validate_at("", "1970", 2026), "1970");
        assert_eq!(field.validate_at("1999", "1970", 2026), "1999");

        let field = FormField::ToYear;
        assert_eq!(field.validate_at("99", "1970", 2026), "2026");
        assert_eq!(field.validate_at("", "1970", 2026), "2026");
    }

    #[test]
    fn test_rating_field_length_rule() {
        assert_eq!(FormField::FromRating.validate_at("100", "0", 2026), "0");
        assert_eq!(FormField::ToRating.validate_at("100", "0", 2026), "10");
        assert_eq!(FormField::ToRating.validate_at("", "0", 2026), "10");
        assert_eq!(FormField::FromRating.validate_at("", "0", 2026), "0");
        assert_eq!(FormField::ToRating.validate_at("9", "4", 2026), "9");
    }

    #[test]
    fn test_field_trims_whitespace() {
        assert_eq!(FormField::FromYear.validate_at(" 1999 ", "1970", 2026), "1999");
    }

    #[test]
    fn test_default_values() {
        assert_eq!(FormField::FromYear.default_value_at(2026), "1970");
        assert_eq!(FormField::ToYear.default_value_at(2026), "2026");
        assert_eq!(FormField::FromRating.default_value(), "0");
        assert_eq!(FormField::ToRating.default_value(), "10");
    }
}
