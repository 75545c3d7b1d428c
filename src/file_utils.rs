use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::app_config::Config;

// @module: File and directory utilities

/// Outcome of a rename attempt
#[derive(Debug, PartialEq, Eq)]
pub enum RenameOutcome {
    /// Plain rename succeeded
    Renamed,
    /// Rename failed (file locked); copied to the new name, original removed
    CopiedAndRemoved,
    /// Rename failed; copied to the new name, original could not be removed
    CopiedOriginalRetained,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Recursively find video files under a directory, sorted by path.
    ///
    /// A file counts as video when its extension appears in the configured
    /// `valid_extensions` list (case-insensitive).
    pub fn find_video_files<P: AsRef<Path>>(dir: P, config: &Config) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Err(anyhow::anyhow!("Directory does not exist: {:?}", dir));
        }

        let mut result = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }
            if let Some(ext) = path.extension() {
                if config.is_valid_extension(&ext.to_string_lossy()) {
                    result.push(path.to_path_buf());
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Rename a file, falling back to copy-then-delete when the rename fails
    /// (typically a file held open by another process).
    ///
    /// Either the file ends up under the new name, or an error is returned
    /// and the original is untouched. When only the cleanup of the original
    /// fails, both names exist and the outcome says so.
    pub fn rename_with_fallback<P1: AsRef<Path>, P2: AsRef<Path>>(
        from: P1,
        to: P2,
    ) -> Result<RenameOutcome> {
        let from = from.as_ref();
        let to = to.as_ref();

        if !from.exists() {
            return Err(anyhow::anyhow!("Source file does not exist: {:?}", from));
        }

        match fs::rename(from, to) {
            Ok(()) => Ok(RenameOutcome::Renamed),
            Err(rename_err) => {
                fs::copy(from, to).with_context(|| {
                    format!(
                        "Rename failed ({}) and copy fallback also failed: {:?} -> {:?}",
                        rename_err, from, to
                    )
                })?;
                match fs::remove_file(from) {
                    Ok(()) => Ok(RenameOutcome::CopiedAndRemoved),
                    Err(remove_err) => {
                        warn!(
                            "Copied {:?} to {:?} but could not remove the original: {}",
                            from, to, remove_err
                        );
                        Ok(RenameOutcome::CopiedOriginalRetained)
                    }
                }
            }
        }
    }
}
