use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use pdf_toast::{Ghostscript, PageColor, PageSpec, ToastOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pdftoast",
    about = "Split portrait PDF pages into overlapping landscape halves for e-readers",
    version
)]
struct Cli {
    /// Input PDF file; output is written next to it as <name>-toasted.pdf
    inputfile: PathBuf,

    /// Page range to convert, e.g. 3-7, 3- or -7 [default: 1-]
    #[arg(short, long, allow_hyphen_values = true)]
    pagespec: Option<String>,

    /// Aspect ratio (width / height) of each output half [default: 1.34]
    #[arg(long)]
    ar: Option<f32>,

    /// Points cropped from the left margin [default: 35]
    #[arg(long)]
    cl: Option<f32>,

    /// Minimum overlap in points between top and bottom halves [default: 40]
    #[arg(long)]
    mo: Option<f32>,

    /// Page-number colour as six hex digits [default: 006600]
    #[arg(long)]
    pncol: Option<String>,

    /// Load options from a JSON file; flags given here take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report progress of each stage
    #[arg(short, long)]
    verbose: bool,

    /// Keep temporary files and show Ghostscript output (implies --verbose)
    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::Debug
        } else if self.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        }
    }

    /// Apply explicit flags on top of `options`
    fn apply_to(&self, options: &mut ToastOptions) -> Result<()> {
        if let Some(spec) = &self.pagespec {
            options.page_spec = spec.parse::<PageSpec>()?;
        }
        if let Some(ar) = self.ar {
            options.geometry.aspect_ratio = ar;
        }
        if let Some(cl) = self.cl {
            options.geometry.left_crop = cl;
        }
        if let Some(mo) = self.mo {
            options.geometry.min_overlap = mo;
        }
        if let Some(color) = &self.pncol {
            options.geometry.page_number_color = color.parse::<PageColor>()?;
        }
        if self.debug {
            options.keep_temp_files = true;
        }
        Ok(())
    }
}

fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// One line for the user; the error's own message already names its cause
fn failure_message(err: &anyhow::Error) -> String {
    err.to_string()
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    log::info!("--- This is pdftoast version {} ---", env!("CARGO_PKG_VERSION"));

    if let Err(err) = run(&cli).await {
        eprintln!("{}", failure_message(&err));
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let mut options = match &cli.config {
        Some(path) => ToastOptions::load(path).await?,
        None => ToastOptions::default(),
    };
    cli.apply_to(&mut options)?;

    let flattener = Ghostscript::new().show_diagnostics(cli.debug);
    pdf_toast::toast(&cli.inputfile, &options, &flattener).await?;

    Ok(())
}
