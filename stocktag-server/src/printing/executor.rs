//! Print job executor
//!
//! Builds the spool command line and runs the external print command,
//! capturing exit code and both output streams verbatim.

use std::path::Path;

use thiserror::Error;
use tokio::process::Command;
use tracing::instrument;

#[derive(Debug, Error)]
pub enum PrintExecutorError {
    #[error("Failed to spawn print command: {0}")]
    Spawn(String),
}

/// Captured result of one spooler invocation
#[derive(Debug, Clone)]
pub struct SpoolOutput {
    /// The full command line, for diagnostics
    pub command: String,
    pub exit_code: Option<i64>,
    pub stdout: String,
    pub stderr: String,
}

impl SpoolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Print job executor
///
/// Sends rendered label documents to the system spooler (`lp` by default).
pub struct PrintExecutor {
    program: String,
    printer: String,
}

impl PrintExecutor {
    pub fn new(program: impl Into<String>, printer: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            printer: printer.into(),
        }
    }

    /// Spool command arguments: destination, copy count, physical media size
    /// and fit-to-page, then the document path
    pub fn build_args(&self, size_mm: (u32, u32), copies: u32, document: &Path) -> Vec<String> {
        vec![
            "-d".to_string(),
            self.printer.clone(),
            "-n".to_string(),
            copies.to_string(),
            "-o".to_string(),
            format!("media=Custom.{}x{}mm", size_mm.0, size_mm.1),
            "-o".to_string(),
            "fit-to-page".to_string(),
            document.display().to_string(),
        ]
    }

    /// Run the spool command and capture its outcome
    #[instrument(skip(self, document), fields(printer = %self.printer))]
    pub async fn spool(
        &self,
        size_mm: (u32, u32),
        copies: u32,
        document: &Path,
    ) -> Result<SpoolOutput, PrintExecutorError> {
        let args = self.build_args(size_mm, copies, document);
        let command = format!("{} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|e| PrintExecutorError::Spawn(format!("{}: {}", self.program, e)))?;

        let result = SpoolOutput {
            command,
            exit_code: output.status.code().map(i64::from),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if result.success() {
            tracing::info!(command = %result.command, "Spool command succeeded");
        } else {
            tracing::warn!(
                command = %result.command,
                exit_code = ?result.exit_code,
                "Spool command failed"
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn build_args_carries_copies_media_and_fit() {
        let executor = PrintExecutor::new("lp", "LABEL_PRINTER_1");
        let document = PathBuf::from("/tmp/label_x_50x30.pdf");
        let args = executor.build_args((50, 30), 3, &document);

        let n_pos = args.iter().position(|a| a == "-n").unwrap();
        assert_eq!(args[n_pos + 1], "3");
        assert!(args.iter().any(|a| a == "media=Custom.50x30mm"));
        assert!(args.iter().any(|a| a == "fit-to-page"));
        assert_eq!(args.last().unwrap(), "/tmp/label_x_50x30.pdf");
    }

    #[test]
    fn build_args_targets_the_configured_printer() {
        let executor = PrintExecutor::new("lp", "LABEL_PRINTER_1");
        let args = executor.build_args((62, 30), 1, Path::new("doc.pdf"));

        let d_pos = args.iter().position(|a| a == "-d").unwrap();
        assert_eq!(args[d_pos + 1], "LABEL_PRINTER_1");
        assert!(args.iter().any(|a| a == "media=Custom.62x30mm"));
    }

    #[tokio::test]
    async fn spool_captures_exit_code() {
        // `false` ignores its arguments and exits 1 on any unix
        let executor = PrintExecutor::new("false", "ANY");
        let out = executor
            .spool((50, 30), 1, Path::new("/nonexistent.pdf"))
            .await
            .unwrap();
        assert!(!out.success());
        assert_eq!(out.exit_code, Some(1));
    }

    #[tokio::test]
    async fn spool_reports_missing_program() {
        let executor = PrintExecutor::new("/no/such/spooler", "ANY");
        let err = executor
            .spool((50, 30), 1, Path::new("/nonexistent.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, PrintExecutorError::Spawn(_)));
    }
}
