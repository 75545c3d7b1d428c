/*!
 * # serename - TV series episode renamer
 *
 * A Rust library for renaming TV series video files against TheTVDB's
 * canonical episode list.
 *
 * ## Features
 *
 * - Fuzzy-match loosely-delimited episode titles embedded in filenames
 * - Detect multi-episode files ("Title One + Title Two", "One_Two") and tag
 *   them as S01E01E02
 * - Segmentation strategies from explicit delimiters down to exhaustive
 *   token-range enumeration, with greedy non-overlapping selection
 * - Coverage validation so a rename only happens when the whole title is
 *   accounted for (or a configurable multi-episode leniency applies)
 * - Configurable naming template with typed placeholders
 * - Dry-run and non-interactive modes
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `matching`: The title segmentation and fuzzy-matching engine:
 *   - `matching::normalize`: Filename and title normalization
 *   - `matching::extract`: Title extraction from tagged filenames
 *   - `matching::fuzzy`: Levenshtein-based similarity scoring
 *   - `matching::segment`: Separator, iterative and per-token strategies
 *   - `matching::select`: Greedy non-overlapping interval selection
 *   - `matching::coverage`: Title coverage validation
 * - `naming`: Naming templates and multi-episode name assembly
 * - `providers`: Episode database clients:
 *   - `providers::tvdb`: TheTVDB v4 API client
 *   - `providers::cache`: Per-run episode cache
 *   - `providers::mock`: Mock provider for tests
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod matching;
pub mod naming;
pub mod providers;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, FileOutcome, RunOptions, RunSummary};
pub use errors::{AppError, ProviderError, TemplateError};
pub use matching::MatchEngine;
pub use matching::model::SegmentationResult;
pub use naming::NamingTemplate;
pub use providers::{EpisodeProvider, EpisodeRecord, SeriesRecord};
