//! Background sweeper for abandoned compile directories.
//!
//! Job directories are normally removed when a compile finishes; this catches
//! the ones orphaned by a crash or kill. Failures are logged and skipped.

use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing::{info, warn};

/// Runs forever, sweeping the temp root on the given period.
pub async fn run_sweeper(temp_dir: std::path::PathBuf, max_age: Duration, period: Duration) {
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        match sweep(&temp_dir, max_age).await {
            Ok(0) => {}
            Ok(removed) => info!("swept {removed} stale compile director(ies)"),
            Err(e) => warn!("temp sweep failed: {e}"),
        }
    }
}

/// Removes directories under `temp_dir` older than `max_age`. Returns the
/// number removed. A missing temp root is not an error.
pub async fn sweep(temp_dir: &Path, max_age: Duration) -> std::io::Result<usize> {
    let mut entries = match tokio::fs::read_dir(temp_dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let now = SystemTime::now();
    let mut removed = 0;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let age = entry
            .metadata()
            .await
            .and_then(|m| m.modified())
            .map(|modified| now.duration_since(modified).unwrap_or_default());
        match age {
            Ok(age) if age > max_age && path.is_dir() => {
                match tokio::fs::remove_dir_all(&path).await {
                    Ok(()) => removed += 1,
                    Err(e) => warn!("could not remove {}: {e}", path.display()),
                }
            }
            Ok(_) => {}
            Err(e) => warn!("could not stat {}: {e}", path.display()),
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_root_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert_eq!(sweep(&missing, Duration::ZERO).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_fresh_directories_survive() {
        let dir = tempfile::tempdir().unwrap();
        let job = dir.path().join("job");
        tokio::fs::create_dir(&job).await.unwrap();
        assert_eq!(sweep(dir.path(), Duration::from_secs(3600)).await.unwrap(), 0);
        assert!(job.exists());
    }

    #[tokio::test]
    async fn test_stale_directories_are_removed() {
        let dir = tempfile::tempdir().unwrap();
        let job = dir.path().join("job");
        tokio::fs::create_dir(&job).await.unwrap();
        tokio::fs::write(job.join("resume.tex"), b"x").await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(sweep(dir.path(), Duration::ZERO).await.unwrap(), 1);
        assert!(!job.exists());
    }

    #[tokio::test]
    async fn test_plain_files_are_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("stray.log");
        tokio::fs::write(&file, b"x").await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(sweep(dir.path(), Duration::ZERO).await.unwrap(), 0);
        assert!(file.exists());
    }
}
