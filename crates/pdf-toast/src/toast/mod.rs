//! Splitting portrait pages into overlapping landscape halves
//!
//! This module orchestrates the toasting process:
//! 1. Check the flattener and resolve the page range
//! 2. Annotate the selected pages with page numbers and an overlap marker
//! 3. Flatten the annotations into page content
//! 4. Split every flattened page into a top and a bottom half

mod annotate;
mod io;
mod scratch;
mod split;

pub use io::{load_pdf, output_path, save_pdf};

use crate::flatten::Flattener;
use crate::layout::{DerivedGeometry, HalfKind, derive_geometry};
use crate::options::ToastOptions;
use crate::render::{page_box, page_ids};
use crate::types::*;
use annotate::annotate_pages;
use lopdf::Document;
use scratch::ScratchFile;
use split::split_pages;
use std::path::{Path, PathBuf};

/// Main toasting function.
///
/// Writes `<stem>-toasted.pdf` next to `input` and returns its path. The
/// input file is never modified.
pub async fn toast<F: Flattener>(
    input: impl AsRef<Path>,
    options: &ToastOptions,
    flattener: &F,
) -> Result<PathBuf> {
    let input = input.as_ref();

    // Everything that can be checked without touching files comes first.
    options.validate()?;
    let output = output_path(input)?;
    flattener.ensure_available()?;

    let source = load_pdf(input).await?;
    let total_pages = source.get_pages().len();
    let range = options.page_spec.resolve(total_pages)?;
    let geometry = shared_geometry(&source, options, total_pages)?;

    log::info!("Adding marginal page-number annotations, top and bottom...");
    let annotated =
        tokio::task::spawn_blocking(move || annotate_pages(source, range, geometry)).await??;
    let annotated_file = ScratchFile::create(
        "annotated",
        options.keep_temp_files,
        options.temp_dir.as_deref(),
    )?;
    save_pdf(annotated, annotated_file.path()).await?;
    log::info!("...DONE");

    log::info!("Flattening the annotated PDF...");
    let flattened_file = ScratchFile::create(
        "flattened",
        options.keep_temp_files,
        options.temp_dir.as_deref(),
    )?;
    flattener
        .flatten(annotated_file.path(), flattened_file.path())
        .await?;
    log::info!("...DONE");

    log::info!("Splitting the pages...");
    let flattened = load_pdf(flattened_file.path()).await?;
    let expected_pages = range.len();
    let split =
        tokio::task::spawn_blocking(move || split_pages(flattened, expected_pages, geometry))
            .await??;
    log::info!("...DONE");

    log::info!("Writing the half-pages to the output file...");
    save_pdf(split, &output).await?;
    log::info!("...DONE");
    log::info!("Your new PDF file is at {}.", output.display());

    Ok(output)
}

/// Geometry from the first page of the document, assumed to fit them all
fn shared_geometry(
    doc: &Document,
    options: &ToastOptions,
    total_pages: usize,
) -> Result<DerivedGeometry> {
    let first_page = *page_ids(doc).first().ok_or(ToastError::NoPages)?;
    let page_box = page_box(doc, first_page)?;
    let geometry = derive_geometry(page_box, &options.geometry, total_pages);

    log::debug!(
        "Page box {:?}: vertical crop offset {:.2}, half overlap {:.2}",
        page_box,
        geometry.vertical_crop_offset,
        geometry.half_overlap
    );
    if geometry.is_degenerate() {
        log::warn!(
            "Crop boxes are empty for this page size (top {:?}, bottom {:?}); \
             check --cl, --mo and --ar",
            geometry.crop_box(HalfKind::Top),
            geometry.crop_box(HalfKind::Bottom)
        );
    }

    Ok(geometry)
}
