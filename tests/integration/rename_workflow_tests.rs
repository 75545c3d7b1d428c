/*!
 * End-to-end rename workflow tests driving the controller with a mock
 * provider against a temporary directory.
 */

use anyhow::Result;
use serename::app_controller::{Controller, RunOptions};
use serename::providers::mock::MockProvider;

use crate::common;

fn non_interactive_options() -> RunOptions {
    RunOptions {
        non_interactive: true,
        ..RunOptions::default()
    }
}

/// A loosely-delimited double feature ends up under its canonical name
#[tokio::test]
async fn test_run_underscoreDelimitedFile_shouldRenameToCanonical() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "Abuela_s Birthday_Cat Mail.mp4", "video")?;

    let provider = MockProvider::with_series(common::rosies_rules(), common::rosies_episodes());
    let controller = Controller::with_config(common::test_config(), non_interactive_options())?;

    let summary = controller.run_with_provider(&provider, temp_dir.path()).await?;

    assert_eq!(summary.renamed, 1);
    assert!(dir
        .join("Rosie's Rules - S01E01E02 - Abuela's Birthday + Cat Mail.mp4")
        .exists());
    assert!(!dir.join("Abuela_s Birthday_Cat Mail.mp4").exists());
    Ok(())
}

/// A single-episode file goes through the naming template
#[tokio::test]
async fn test_run_singleEpisodeFile_shouldUseTemplate() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "cat mail.mkv", "video")?;

    let provider = MockProvider::with_series(common::rosies_rules(), common::rosies_episodes());
    let controller = Controller::with_config(common::test_config(), non_interactive_options())?;

    let summary = controller.run_with_provider(&provider, temp_dir.path()).await?;

    assert_eq!(summary.renamed, 1);
    assert!(dir.join("Rosie's Rules - S01E02 - Cat Mail.mkv").exists());
    Ok(())
}

/// Dry-run walks the pipeline but leaves the filesystem alone
#[tokio::test]
async fn test_run_dryRun_shouldNotTouchFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "cat mail.mkv", "video")?;

    let provider = MockProvider::with_series(common::rosies_rules(), common::rosies_episodes());
    let options = RunOptions {
        dry_run: true,
        ..non_interactive_options()
    };
    let controller = Controller::with_config(common::test_config(), options)?;

    let summary = controller.run_with_provider(&provider, temp_dir.path()).await?;

    assert_eq!(summary.renamed, 1);
    assert!(dir.join("cat mail.mkv").exists());
    assert!(!dir.join("Rosie's Rules - S01E02 - Cat Mail.mkv").exists());
    Ok(())
}

/// A second run over an already-canonical tree is a no-op
#[tokio::test]
async fn test_run_twice_secondRunShouldBeIdempotent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "Abuela_s Birthday_Cat Mail.mp4", "video")?;

    let provider = MockProvider::with_series(common::rosies_rules(), common::rosies_episodes());
    let controller = Controller::with_config(common::test_config(), non_interactive_options())?;

    let first = controller.run_with_provider(&provider, temp_dir.path()).await?;
    assert_eq!(first.renamed, 1);

    let second = controller.run_with_provider(&provider, temp_dir.path()).await?;
    assert_eq!(second.renamed, 0);
    assert_eq!(second.unchanged, 1);
    assert!(dir
        .join("Rosie's Rules - S01E01E02 - Abuela's Birthday + Cat Mail.mp4")
        .exists());
    Ok(())
}

/// Unmatchable files are skipped and the rest of the run continues
#[tokio::test]
async fn test_run_unmatchableFile_shouldSkipAndContinue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "completely unrelated gibberish.mp4", "video")?;
    common::create_test_file(&dir, "cat mail.mkv", "video")?;

    let provider = MockProvider::with_series(common::rosies_rules(), common::rosies_episodes());
    let controller = Controller::with_config(common::test_config(), non_interactive_options())?;

    let summary = controller.run_with_provider(&provider, temp_dir.path()).await?;

    assert_eq!(summary.renamed, 1);
    assert_eq!(summary.skipped, 1);
    assert!(dir.join("completely unrelated gibberish.mp4").exists());
    Ok(())
}

/// A provider failure aborts the run before any file is touched
#[tokio::test]
async fn test_run_failingProvider_shouldAbortRun() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "cat mail.mkv", "video")?;

    let provider = MockProvider::failing();
    let controller = Controller::with_config(common::test_config(), non_interactive_options())?;

    let result = controller.run_with_provider(&provider, temp_dir.path()).await;

    assert!(result.is_err());
    assert!(dir.join("cat mail.mkv").exists());
    Ok(())
}

/// A known series id skips the search step entirely
#[tokio::test]
async fn test_run_withSeriesId_shouldSkipSearch() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "cat mail.mkv", "video")?;

    let provider = MockProvider::with_series(common::rosies_rules(), common::rosies_episodes());
    let options = RunOptions {
        series_id: Some(5),
        ..non_interactive_options()
    };
    let controller = Controller::with_config(common::test_config(), options)?;

    let summary = controller.run_with_provider(&provider, temp_dir.path()).await?;
    assert_eq!(summary.renamed, 1);
    Ok(())
}
