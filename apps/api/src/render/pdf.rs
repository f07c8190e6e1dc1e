//! The pdflatex compile pipeline.
//!
//! Each job gets a unique temp directory under the configured root; the
//! directory is removed when the job finishes, success or not. The compiler
//! runs under a timeout and is killed if the deadline passes. Callers bound
//! concurrency through the semaphore on `AppState`.

use std::process::Stdio;
use std::time::Duration;

use anyhow::Context;
use tokio::process::Command;
use tracing::debug;

use crate::config::Config;
use crate::errors::AppError;

const MAX_LOG_CHARS: usize = 500;

/// Compiles the given LaTeX source to PDF bytes.
pub async fn compile(latex: &str, config: &Config) -> Result<Vec<u8>, AppError> {
    tokio::fs::create_dir_all(&config.temp_dir)
        .await
        .context("creating pdf temp root")?;
    let job_dir = tempfile::TempDir::new_in(&config.temp_dir)
        .context("creating pdf job directory")?;

    let tex_path = job_dir.path().join("resume.tex");
    tokio::fs::write(&tex_path, latex)
        .await
        .context("writing resume.tex")?;
    debug!("compiling {} bytes of LaTeX in {}", latex.len(), job_dir.path().display());

    let output = Command::new(&config.pdflatex_bin)
        .arg("-interaction=nonstopmode")
        .arg("-output-directory")
        .arg(job_dir.path())
        .arg(&tex_path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(Duration::from_secs(config.compile_timeout_secs), output)
        .await
        .map_err(|_| AppError::CompileTimeout(config.compile_timeout_secs))?
        .map_err(|e| AppError::LatexCompile(truncate_log(&format!(
            "could not run {}: {e}",
            config.pdflatex_bin
        ))))?;

    let pdf_path = job_dir.path().join("resume.pdf");
    if !output.status.success() || !pdf_path.exists() {
        let log = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };
        return Err(AppError::LatexCompile(truncate_log(&log)));
    }

    let bytes = tokio::fs::read(&pdf_path)
        .await
        .context("reading compiled pdf")?;
    debug!("compiled pdf: {} bytes", bytes.len());
    Ok(bytes)
}

fn truncate_log(log: &str) -> String {
    if log.chars().count() > MAX_LOG_CHARS {
        let head: String = log.chars().take(MAX_LOG_CHARS).collect();
        format!("{head}...")
    } else {
        log.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(temp_dir: &std::path::Path, pdflatex_bin: &str) -> Config {
        Config {
            port: 0,
            store_path: temp_dir.join("resume.json"),
            pdflatex_bin: pdflatex_bin.to_string(),
            temp_dir: temp_dir.to_path_buf(),
            compile_timeout_secs: 5,
            compile_concurrency: 1,
            temp_max_age_minutes: 30,
            cors_allowed_origins: None,
            rust_log: "info".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_compiler_reports_a_compile_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = make_config(dir.path(), "definitely-not-a-tex-compiler");
        let err = compile("\\documentclass{article}", &config)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::LatexCompile(_)));
    }

    #[tokio::test]
    async fn test_job_directories_are_removed_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = make_config(dir.path(), "definitely-not-a-tex-compiler");
        let _ = compile("x", &config).await;
        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[test]
    fn test_truncate_log_caps_at_500_chars() {
        let long = "e".repeat(800);
        let truncated = truncate_log(&long);
        assert_eq!(truncated.chars().count(), MAX_LOG_CHARS + 3);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_log("short"), "short");
    }
}
