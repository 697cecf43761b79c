//! Temporary files between pipeline stages

use crate::types::*;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// A temporary PDF path, deleted on drop unless kept for inspection
pub(crate) struct ScratchFile {
    path: PathBuf,
    _guard: Option<TempPath>,
}

impl ScratchFile {
    /// Create an empty temporary file in `dir`, or the system temp dir.
    ///
    /// With `keep` set the file survives the run and its path is logged.
    pub(crate) fn create(label: &str, keep: bool, dir: Option<&Path>) -> Result<Self> {
        let prefix = format!("pdftoast-{}-", label);
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix).suffix(".pdf");
        let file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        let temp = file.into_temp_path();

        if keep {
            let path = temp.keep().map_err(|e| e.error)?;
            log::info!(
                "(the {} temporary file will be written at {})",
                label,
                path.display()
            );
            return Ok(Self { path, _guard: None });
        }

        Ok(Self {
            path: temp.to_path_buf(),
            _guard: Some(temp),
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}
