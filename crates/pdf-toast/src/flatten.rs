//! Flattening annotations into page content
//!
//! Some e-reader viewers ignore annotation layers entirely, so the labels
//! and overlap marker are burnt into the page content before splitting.

use crate::constants::GHOSTSCRIPT_BINARY;
use crate::types::*;
use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Something that can rewrite a PDF with its annotations baked in
pub trait Flattener {
    /// Name used in progress and error messages
    fn name(&self) -> &str;

    /// Fail with [`ToastError::MissingDependency`] if flattening cannot run.
    /// Called before any work starts.
    fn ensure_available(&self) -> Result<()>;

    /// Flatten `input` into `output`, waiting for completion
    fn flatten(&self, input: &Path, output: &Path) -> impl Future<Output = Result<()>> + Send;
}

/// Flattening through the Ghostscript `pdfwrite` device
#[derive(Debug, Clone)]
pub struct Ghostscript {
    binary: PathBuf,
    show_diagnostics: bool,
}

impl Default for Ghostscript {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(GHOSTSCRIPT_BINARY),
            show_diagnostics: false,
        }
    }
}

impl Ghostscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific executable instead of `gs` from the search path
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Let Ghostscript's own warnings and errors through
    pub fn show_diagnostics(mut self, show: bool) -> Self {
        self.show_diagnostics = show;
        self
    }

    /// Command-line arguments for one run
    pub fn arguments(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        if !self.show_diagnostics {
            args.push("-dQUIET".into());
        }
        args.extend(
            [
                "-sDEVICE=pdfwrite",
                "-dSAFER",
                "-dPDFSETTINGS=/printer",
                "-dNOPAUSE",
                "-dBATCH",
                "-dPreserveAnnots=false",
            ]
            .map(OsString::from),
        );

        let mut output_arg = OsString::from("-sOutputFile=");
        output_arg.push(output);
        args.push(output_arg);
        args.push(input.into());
        args
    }

    fn output_stdio(&self) -> Stdio {
        if self.show_diagnostics {
            Stdio::inherit()
        } else {
            Stdio::null()
        }
    }
}

impl Flattener for Ghostscript {
    fn name(&self) -> &str {
        "Ghostscript"
    }

    fn ensure_available(&self) -> Result<()> {
        which::which(&self.binary)
            .map(|path| log::debug!("Using {} at {}", self.name(), path.display()))
            .map_err(|_| ToastError::MissingDependency {
                tool: self.name().to_string(),
            })
    }

    async fn flatten(&self, input: &Path, output: &Path) -> Result<()> {
        let args = self.arguments(input, output);
        log::debug!("Running {} {:?}", self.binary.display(), args);

        let status = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(self.output_stdio())
            .stderr(self.output_stdio())
            .status()
            .await?;

        if !status.success() {
            return Err(ToastError::Flatten(format!(
                "{} exited with {}",
                self.name(),
                status
            )));
        }

        Ok(())
    }
}
