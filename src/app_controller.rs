use anyhow::{Context, Result, anyhow};
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::Path;

use crate::app_config::Config;
use crate::file_utils::{FileManager, RenameOutcome};
use crate::matching::MatchEngine;
use crate::matching::extract::{extract_title, fallback_title};
use crate::matching::normalize::normalize_stem;
use crate::naming::{NamingTemplate, proposed_file_name};
use crate::providers::cache::EpisodeCache;
use crate::providers::tvdb::Tvdb;
use crate::providers::{EpisodeProvider, EpisodeRecord, SeriesRecord};

// @module: Application controller for the rename pipeline

/// Options controlling one run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Walk the whole pipeline but never touch the filesystem
    pub dry_run: bool,
    /// Accept every prompt with its best guess
    pub non_interactive: bool,
    /// Series name override; defaults to the directory name
    pub series_name: Option<String>,
    /// Skip the search entirely and use this series id
    pub series_id: Option<u64>,
}

/// What happened to one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// File now carries its canonical name
    Renamed,
    /// File already carried its canonical name
    AlreadyCanonical,
    /// Pipeline produced a name but dry-run mode left the file alone
    DryRun,
    /// Nothing matched, or not well enough
    SkippedNoMatch,
    /// A partial match without enough episodes to proceed
    SkippedPartial,
    /// The user answered no at the confirmation prompt
    DeclinedByUser,
}

/// Per-run counters, reported at the end
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub renamed: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for the rename workflow
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Run options
    options: RunOptions,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config, options: RunOptions) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config, options })
    }

    /// Run the workflow against the live TVDB API
    pub async fn run(&self, start_dir: &Path) -> Result<RunSummary> {
        let provider = Tvdb::connect(
            &self.config.api.api_key,
            &self.config.api.endpoint,
            self.config.api.timeout_secs,
        )
        .await
        .context("Failed to authenticate against TheTVDB")?;

        self.run_with_provider(&provider, start_dir).await
    }

    /// Run the workflow with an injected provider.
    ///
    /// One series governs the entire directory tree. Episodes are fetched
    /// once through the per-run cache; each file then goes through the full
    /// pipeline independently, and a failure on one file never aborts the
    /// rest.
    pub async fn run_with_provider(
        &self,
        provider: &dyn EpisodeProvider,
        start_dir: &Path,
    ) -> Result<RunSummary> {
        if !FileManager::dir_exists(start_dir) {
            return Err(anyhow!("Directory does not exist: {:?}", start_dir));
        }

        if self.options.dry_run {
            info!("Dry run mode is enabled, no files will be changed");
        }

        let series = self
            .determine_series(provider, start_dir)
            .await
            .with_context(|| format!("Could not validate a series for {:?}", start_dir))?;
        info!(
            "Series confirmed: {} ({})",
            series.name,
            series.year.as_deref().unwrap_or("year unknown")
        );

        let mut cache = EpisodeCache::new();
        let episodes = cache
            .get_or_fetch(provider, series.id)
            .await
            .context("Failed to fetch episode data")?
            .to_vec();
        if episodes.is_empty() {
            return Err(anyhow!("No episodes found for series '{}'", series.name));
        }

        let files = FileManager::find_video_files(start_dir, &self.config)?;
        if files.is_empty() {
            info!("No video files found to process");
            return Ok(RunSummary::default());
        }
        info!("Found {} file(s) to process", files.len());

        let template = self.config.naming_template()?;
        let engine = MatchEngine::new(
            self.config.matching.match_threshold,
            &self.config.matching.quality_tags,
        );

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .context("Invalid progress bar template")?
                .progress_chars("##-"),
        );

        let mut summary = RunSummary::default();
        for file in &files {
            progress.set_message(
                file.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            );
            match self.process_file(file, &series, &episodes, &engine, &template) {
                Ok(FileOutcome::Renamed) | Ok(FileOutcome::DryRun) => summary.renamed += 1,
                Ok(FileOutcome::AlreadyCanonical) => summary.unchanged += 1,
                Ok(_) => summary.skipped += 1,
                Err(e) => {
                    warn!("Error processing {:?}: {:#}", file, e);
                    summary.failed += 1;
                }
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        info!(
            "Processing complete: {} renamed, {} unchanged, {} skipped, {} failed",
            summary.renamed, summary.unchanged, summary.skipped, summary.failed
        );
        Ok(summary)
    }

    /// Determine and validate the single series for this run
    async fn determine_series(
        &self,
        provider: &dyn EpisodeProvider,
        start_dir: &Path,
    ) -> Result<SeriesRecord> {
        if let Some(series_id) = self.options.series_id {
            return Ok(provider.series_details(series_id).await?);
        }

        let suggested = self.options.series_name.clone().unwrap_or_else(|| {
            start_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        let query = if self.options.non_interactive {
            suggested
        } else {
            Input::new()
                .with_prompt("Series name")
                .default(suggested)
                .interact_text()
                .context("Failed to read series name")?
        };

        let hits = provider.search_series(&query).await?;
        if hits.is_empty() {
            return Err(anyhow!("No series found for '{}'", query));
        }

        let selected = if self.options.non_interactive || hits.len() == 1 {
            debug!("Auto-selecting first search result: {}", hits[0].name);
            &hits[0]
        } else {
            let shortlist: Vec<String> = hits
                .iter()
                .take(3)
                .map(|h| {
                    format!(
                        "{} ({}) - ID: {}",
                        h.name,
                        h.year.as_deref().unwrap_or("N/A"),
                        h.tvdb_id
                    )
                })
                .collect();
            let choice = Select::new()
                .with_prompt("Select the correct series")
                .items(&shortlist)
                .default(0)
                .interact()
                .context("Failed to read series selection")?;
            &hits[choice]
        };

        let series_id: u64 = selected
            .tvdb_id
            .parse()
            .with_context(|| format!("Unparseable series id '{}'", selected.tvdb_id))?;
        Ok(provider.series_details(series_id).await?)
    }

    /// Take one file through normalize, extract, match, decide and rename
    fn process_file(
        &self,
        path: &Path,
        series: &SeriesRecord,
        episodes: &[EpisodeRecord],
        engine: &MatchEngine,
        template: &NamingTemplate,
    ) -> Result<FileOutcome> {
        let stem = path
            .file_stem()
            .ok_or_else(|| anyhow!("File has no stem: {:?}", path))?
            .to_string_lossy();
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        let normalized = normalize_stem(&stem);
        let title = extract_title(&normalized)
            .unwrap_or_else(|| fallback_title(&normalized, &series.name));
        debug!("Matching title '{}' for {:?}", title, path.file_name());

        if title.is_empty() {
            warn!("Skipping {:?}: nothing left to match after cleanup", path.file_name());
            return Ok(FileOutcome::SkippedNoMatch);
        }

        let result = engine.match_title(&title, episodes);
        if result.is_empty() {
            warn!(
                "No match found for '{}'; best score {} below threshold {}",
                title,
                result.best_score,
                engine.scorer().threshold()
            );
            return Ok(FileOutcome::SkippedNoMatch);
        }

        // Proceed on full coverage, or on a partial match that still
        // identified a multi-episode run (when the config allows it)
        let partial_multi =
            self.config.matching.allow_partial_multi && result.episode_count() >= 2;
        if !result.complete && !partial_multi {
            warn!(
                "Skipping '{}' due to incomplete title match (best score {})",
                title, result.best_score
            );
            return Ok(FileOutcome::SkippedPartial);
        }
        if !result.complete {
            info!(
                "Partial match, but {} episodes identified; attempting rename",
                result.episode_count()
            );
        }

        let new_name = proposed_file_name(template, series, &result.episodes, &extension);
        let new_path = path.with_file_name(&new_name);
        if new_path == path {
            info!("File already meets formatting standards: {}", new_name);
            return Ok(FileOutcome::AlreadyCanonical);
        }

        info!(
            "{} -> {}",
            path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default(),
            new_name
        );

        if self.options.dry_run {
            info!("[dry run] Would rename to '{}'", new_name);
            return Ok(FileOutcome::DryRun);
        }

        if !self.options.non_interactive {
            let confirmed = Confirm::new()
                .with_prompt("Continue?")
                .default(true)
                .interact()
                .context("Failed to read confirmation")?;
            if !confirmed {
                warn!("User skipped rename for {:?}", path.file_name());
                return Ok(FileOutcome::DeclinedByUser);
            }
        }

        match FileManager::rename_with_fallback(path, &new_path)? {
            RenameOutcome::Renamed => {}
            RenameOutcome::CopiedAndRemoved => {
                info!("File was in use; copied to the new name instead");
            }
            RenameOutcome::CopiedOriginalRetained => {
                warn!("File was in use; copy created but the original remains");
            }
        }
        Ok(FileOutcome::Renamed)
    }
}
