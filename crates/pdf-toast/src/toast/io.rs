//! Document I/O operations for toasting

use crate::constants::OUTPUT_SUFFIX;
use crate::types::*;
use lopdf::Document;
use std::path::{Path, PathBuf};

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Save a document
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, ToastError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}

/// Output path beside the input: `paper.pdf` becomes `paper-toasted.pdf`.
///
/// The input name must end in `.pdf` (any case).
pub fn output_path(input: &Path) -> Result<PathBuf> {
    let not_pdf = || ToastError::NotPdfPath(input.display().to_string());

    let name = input
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(not_pdf)?;

    let cut = name.len().checked_sub(4).ok_or_else(not_pdf)?;
    let (stem, extension) = match (name.get(..cut), name.get(cut..)) {
        (Some(stem), Some(extension)) => (stem, extension),
        _ => return Err(not_pdf()),
    };
    if stem.is_empty() || !extension.eq_ignore_ascii_case(".pdf") {
        return Err(not_pdf());
    }

    Ok(input.with_file_name(format!("{}{}", stem, OUTPUT_SUFFIX)))
}
