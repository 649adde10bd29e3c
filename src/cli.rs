//! CLI - Command Line Interface for randmovie
//!
//! The search form as flags. Every action is scriptable and all output is
//! JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Any movie at all
//! randmovie
//!
//! # A well rated 90s thriller
//! randmovie find --from-year 1990 --to-year 1999 --from-rating 7 -g Thriller
//!
//! # Show the request that would be sent
//! randmovie query -g 3 -g Family --json
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::api::QueryError;
use crate::app::App;
use crate::models::{CriteriaError, DisplayMovie, SearchCriteria};
use crate::validate::FormField;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Response could not be decoded
    DecodeError = 4,
    /// Too few results for a random pick
    NoSelection = 5,
    /// Missing or unusable configuration
    ConfigError = 6,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

impl From<&QueryError> for ExitCode {
    fn from(err: &QueryError) -> ExitCode {
        match err {
            QueryError::InvalidUrl(_) => ExitCode::ConfigError,
            QueryError::ServerError(_) => ExitCode::NetworkError,
            QueryError::DecodeError(_) => ExitCode::DecodeError,
        }
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// randmovie - pick a random movie
///
/// Run without arguments to pick from every rating and genre.
#[derive(Parser, Debug)]
#[command(
    name = "randmovie",
    version,
    author = "Gorka & Hermes",
    about = "Pick a random movie matching a year, rating and genre filter",
    long_about = "Fetches a page of movies from the OTT details advanced search \
                  and picks one at random.\n\n\
                  Run without arguments to search with the random preset.\n\
                  Requires a RapidAPI key in RAPIDAPI_KEY or the config file.",
    after_help = "EXAMPLES:\n\
                  randmovie                                 Any movie\n\
                  randmovie find --from-rating 7 -g Drama   Well rated drama\n\
                  randmovie find -n 3                       Three picks from one page\n\
                  randmovie query -g Horror --json          Show the request URL\n\
                  randmovie genres                          List genre indices"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (defaults to `find`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if a subcommand was given explicitly
    pub fn has_command(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }

    /// The subcommand to run, `find` with no filters when omitted
    pub fn command_or_default(&mut self) -> Command {
        self.command
            .take()
            .unwrap_or_else(|| Command::Find(FindCmd::default()))
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pick a random movie
    #[command(visible_alias = "f")]
    Find(FindCmd),

    /// Show validated criteria and the request URL without sending it
    #[command(visible_alias = "q")]
    Query(QueryCmd),

    /// List the genre catalog
    #[command(visible_alias = "g")]
    Genres(GenresCmd),
}

// =============================================================================
// Search Form
// =============================================================================

/// Named starting point for the search form
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Ratings 5-10
    Default,
    /// Ratings 0-10
    Random,
}

impl Preset {
    pub fn criteria(&self) -> SearchCriteria {
        match self {
            Preset::Default => SearchCriteria::default(),
            Preset::Random => SearchCriteria::random(),
        }
    }
}

/// Search form fields, taken as raw text and validated like form input
#[derive(Args, Debug, Clone, Default)]
pub struct FormArgs {
    /// Starting preset (default: `random` with no filters, `default` otherwise)
    #[arg(long, short = 'p', value_enum)]
    pub preset: Option<Preset>,

    /// Earliest release year (4 digits, from 1970)
    #[arg(long, allow_hyphen_values = true)]
    pub from_year: Option<String>,

    /// Latest release year (4 digits, up to the current year)
    #[arg(long, allow_hyphen_values = true)]
    pub to_year: Option<String>,

    /// Minimum IMDB rating (0-10)
    #[arg(long, allow_hyphen_values = true)]
    pub from_rating: Option<String>,

    /// Maximum IMDB rating (0-10)
    #[arg(long, allow_hyphen_values = true)]
    pub to_rating: Option<String>,

    /// Genre name or catalog index, repeatable (toggled in order)
    #[arg(long = "genre", short = 'g')]
    pub genres: Vec<String>,
}

impl FormArgs {
    /// True when no filter was given
    pub fn is_empty(&self) -> bool {
        self.from_year.is_none()
            && self.to_year.is_none()
            && self.from_rating.is_none()
            && self.to_rating.is_none()
            && self.genres.is_empty()
    }

    /// Criteria to start editing from
    pub fn base_criteria(&self) -> SearchCriteria {
        match self.preset {
            Some(preset) => preset.criteria(),
            None if self.is_empty() => SearchCriteria::random(),
            None => SearchCriteria::default(),
        }
    }

    /// Field edits in form order
    pub fn field_edits(&self) -> Vec<(FormField, &str)> {
        [
            (FormField::FromYear, &self.from_year),
            (FormField::ToYear, &self.to_year),
            (FormField::FromRating, &self.from_rating),
            (FormField::ToRating, &self.to_rating),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }

    /// Apply every edit to a session
    pub fn apply_to(&self, app: &mut App) -> Result<(), CriteriaError> {
        for (field, raw) in self.field_edits() {
            app.update_field(field, raw);
        }
        for genre in &self.genres {
            app.toggle_genre_by_key(genre)?;
        }
        Ok(())
    }

    /// Build criteria without a session
    pub fn build_criteria(&self) -> Result<SearchCriteria, CriteriaError> {
        let mut criteria = self.base_criteria();
        for (field, raw) in self.field_edits() {
            criteria.apply_field(field, raw);
        }
        for genre in &self.genres {
            criteria.toggle_genre_by_key(genre)?;
        }
        Ok(criteria)
    }
}

// =============================================================================
// Find / Query / Genres Commands
// =============================================================================

/// Pick a random movie matching the form
#[derive(Args, Debug, Clone)]
pub struct FindCmd {
    #[command(flatten)]
    pub form: FormArgs,

    /// Number of picks, all drawn from a single fetched page
    #[arg(long, short = 'n', default_value = "1", value_parser = clap::value_parser!(u16).range(1..=100))]
    pub count: u16,
}

impl Default for FindCmd {
    fn default() -> Self {
        Self {
            form: FormArgs::default(),
            count: 1,
        }
    }
}

/// Print validated criteria and the request URL
#[derive(Args, Debug, Clone)]
pub struct QueryCmd {
    #[command(flatten)]
    pub form: FormArgs,

    /// Page number to show (random in 1-20 when omitted)
    #[arg(long)]
    pub page: Option<u32>,
}

/// List the genre catalog with indices
#[derive(Args, Debug, Clone)]
pub struct GenresCmd {}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// `find` response
#[derive(Debug, Serialize, Deserialize)]
pub struct FindResponse {
    pub criteria: SearchCriteria,
    pub movies: Vec<DisplayMovie>,
}

impl std::fmt::Display for FindResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, movie) in self.movies.iter().enumerate() {
            if i > 0 {
                writeln!(f, "\n---\n")?;
            }
            write!(f, "{}", movie)?;
        }
        Ok(())
    }
}

/// `query` response
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub criteria: SearchCriteria,
    pub genre: String,
    pub url: String,
}

impl std::fmt::Display for QueryResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Criteria: {}", self.criteria)?;
        write!(f, "URL:      {}", self.url)
    }
}

/// One catalog entry for `genres`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreEntry {
    pub index: usize,
    pub name: String,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON, or as text in human mode
    pub fn print<T: Serialize + std::fmt::Display>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", data);
        }
        Ok(())
    }

    /// Print raw JSON (already formatted)
    pub fn print_json<T: Serialize>(&self, data: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(data)?);
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verify CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_defaults_to_find() {
        let mut cli = Cli::parse_from(["randmovie"]);
        assert!(!cli.has_command());
        match cli.command_or_default() {
            Command::Find(cmd) => {
                assert!(cmd.form.is_empty());
                assert_eq!(cmd.count, 1);
            }
            _ => panic!("Expected Find command"),
        }
    }

    #[test]
    fn test_find_with_form() {
        let cli = Cli::parse_from([
            "randmovie",
            "find",
            "--from-year",
            "1990",
            "--to-rating",
            "-3",
            "-g",
            "Drama",
            "-g",
            "9",
            "-n",
            "3",
        ]);
        match cli.command {
            Some(Command::Find(cmd)) => {
                assert_eq!(cmd.form.from_year.as_deref(), Some("1990"));
                assert_eq!(cmd.form.to_rating.as_deref(), Some("-3"));
                assert_eq!(cmd.form.genres, vec!["Drama", "9"]);
                assert_eq!(cmd.count, 3);
            }
            _ => panic!("Expected Find command"),
        }
    }

    #[test]
    fn test_base_criteria_choice() {
        let form = FormArgs::default();
        assert_eq!(form.base_criteria(), SearchCriteria::random());

        let form = FormArgs {
            genres: vec!["Drama".to_string()],
            ..FormArgs::default()
        };
        assert_eq!(form.base_criteria(), SearchCriteria::default());

        let form = FormArgs {
            preset: Some(Preset::Random),
            from_year: Some("2000".to_string()),
            ..FormArgs::default()
        };
        assert_eq!(form.base_criteria().from_rating, 0);
    }

    #[test]
    fn test_build_criteria() {
        let form = FormArgs {
            from_year: Some("1800".to_string()),
            to_year: Some("1999".to_string()),
            from_rating: Some("7".to_string()),
            to_rating: Some("3".to_string()),
            genres: vec!["horror".to_string(), "0".to_string()],
            ..FormArgs::default()
        };
        let criteria = form.build_criteria().unwrap();
        assert_eq!(criteria.from_year, 1970);
        assert_eq!(criteria.to_year, 1999);
        assert_eq!(criteria.from_rating, 7);
        assert_eq!(criteria.to_rating, 7);
        assert_eq!(criteria.genres_query_string(), "Action,Horror");
    }

    #[test]
    fn test_build_criteria_negative_upper_bound_keeps_order() {
        let form = FormArgs {
            from_rating: Some("7".to_string()),
            to_rating: Some("-3".to_string()),
            ..FormArgs::default()
        };
        let criteria = form.build_criteria().unwrap();
        assert_eq!((criteria.from_rating, criteria.to_rating), (7, 7));
    }

    #[test]
    fn test_build_criteria_unknown_genre() {
        let form = FormArgs {
            genres: vec!["Polka".to_string()],
            ..FormArgs::default()
        };
        assert!(form.build_criteria().is_err());
    }

    #[test]
    fn test_query_command() {
        let cli = Cli::parse_from(["randmovie", "--json", "q", "--page", "7"]);
        assert!(cli.json);
        match cli.command {
            Some(Command::Query(cmd)) => assert_eq!(cmd.page, Some(7)),
            _ => panic!("Expected Query command"),
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Error), 1);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NetworkError), 3);
        assert_eq!(i32::from(ExitCode::DecodeError), 4);
        assert_eq!(i32::from(ExitCode::NoSelection), 5);
        assert_eq!(i32::from(ExitCode::ConfigError), 6);
    }
}
