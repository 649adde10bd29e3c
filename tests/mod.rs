//! Integration tests for randmovie
//!
//! Tests are organized by component:
//! - ott_test: advanced search client tests (mocked HTTP)
//! - app_test: search session and result cache tests
//! - cli_test: argument parsing and JSON output tests

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
