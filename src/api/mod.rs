//! API clients for external services
//!
//! - OTT details: advanced movie search (RapidAPI)

pub mod ott;

pub use ott::{OttClient, QueryError};
