//! randmovie - pick a random movie from the OTT details advanced search
//!
//! Validates a search form (year range, rating range, genres), fetches one
//! page of matching movies and picks one at random.
//!
//! # Modules
//!
//! - `models` - Search criteria, API records, display shapes
//! - `validate` - Year and rating clamping for raw form text
//! - `api` - Advanced search API client
//! - `selector` - Random pick and display shaping
//! - `app` - Search session with the one-shot result cache
//! - `config`, `cli`, `commands` - Command line front end

pub mod models;
pub mod validate;
pub mod api;
pub mod selector;
pub mod app;
pub mod config;
pub mod cli;
pub mod commands;

// Re-export commonly used types
pub use models::{
    CriteriaError, DisplayMovie, MovieRecord, SearchCriteria,
    GENRE_CATALOG,
};
pub use validate::{clamp_rating, clamp_year, FormField};
pub use selector::pick_random;

pub use api::{OttClient, QueryError};
pub use app::{App, FindOutcome};
