//! CLI Command Handlers
//!
//! Implements all CLI commands by calling the session and API client.
//! Each handler takes CLI args and Output, returns ExitCode.

use tracing::debug;

use crate::api::OttClient;
use crate::app::{App, FindOutcome};
use crate::cli::{
    Cli, ExitCode, FindCmd, FindResponse, GenreEntry, GenresCmd, JsonOutput, Output, QueryCmd,
    QueryResponse,
};
use crate::config::{Config, API_KEY_ENV};
use crate::models::GENRE_CATALOG;

/// Load config from `--config` or the default location
pub fn load_config(cli: &Cli) -> Config {
    match cli.config {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    }
}

// =============================================================================
// Find Command
// =============================================================================

pub async fn find_cmd(cmd: FindCmd, config: &Config, output: &Output) -> ExitCode {
    let Some(api_key) = config.get_api_key() else {
        let location = Config::path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "the config file".to_string());
        return output.error(
            format!("No API key configured. Set {} or api_key in {}", API_KEY_ENV, location),
            ExitCode::ConfigError,
        );
    };

    let client = OttClient::from_config(config, api_key);
    let mut app = App::with_criteria(client, cmd.form.base_criteria());
    if let Err(e) = cmd.form.apply_to(&mut app) {
        return output.error(e.to_string(), ExitCode::InvalidArgs);
    }

    output.info(format!("Looking for a movie: {}", app.criteria()));

    let mut movies = Vec::with_capacity(usize::from(cmd.count));
    for _ in 0..cmd.count {
        match app.find_movie().await {
            Ok(FindOutcome::Movie(movie)) => movies.push(movie),
            Ok(FindOutcome::NoSelection) => {
                return output.error(
                    "Not enough results for a random pick. Try widening the search.",
                    ExitCode::NoSelection,
                );
            }
            Err(e) => return output.error(format!("Search failed: {}", e), ExitCode::from(&e)),
        }
    }
    debug!(picks = movies.len(), cached = ?app.cached_len(), "find finished");

    let response = FindResponse {
        criteria: app.criteria().clone(),
        movies,
    };
    if let Err(e) = output.print(&response) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Query Command
// =============================================================================

pub fn query_cmd(cmd: QueryCmd, config: &Config, output: &Output) -> ExitCode {
    let criteria = match cmd.form.build_criteria() {
        Ok(criteria) => criteria,
        Err(e) => return output.error(e.to_string(), ExitCode::InvalidArgs),
    };

    let client = OttClient::from_config(config, config.get_api_key().unwrap_or_default());
    let url = match cmd.page {
        Some(page) => client.build_url_with_page(&criteria, page),
        None => client.build_url(&criteria),
    };

    match url {
        Ok(url) => {
            let response = QueryResponse {
                genre: criteria.genres_query_string(),
                criteria,
                url: url.to_string(),
            };
            if let Err(e) = output.print(&response) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(e.to_string(), ExitCode::from(&e)),
    }
}

// =============================================================================
// Genres Command
// =============================================================================

pub fn genres_cmd(_cmd: GenresCmd, output: &Output) -> ExitCode {
    let genres: Vec<GenreEntry> = GENRE_CATALOG
        .iter()
        .enumerate()
        .map(|(index, name)| GenreEntry {
            index,
            name: name.to_string(),
        })
        .collect();

    let result = if output.json {
        output.print_json(&JsonOutput::success(&genres))
    } else {
        for genre in &genres {
            println!("{:>2}  {}", genre.index, genre.name);
        }
        Ok(())
    };

    if let Err(e) = result {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}
