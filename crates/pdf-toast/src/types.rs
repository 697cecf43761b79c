use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToastError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to process")]
    NoPages,
    #[error("Invalid page range specified: did you mean -p {page}-{page} (or equivalently --pagespec {page}-{page})?")]
    AmbiguousPageSpec { page: u32 },
    #[error("Invalid page range specification '{0}': aborting now.")]
    InvalidPageSpec(String),
    #[error("Page range {first}-{last} is outside the document's {page_count} pages")]
    PageRangeOutOfBounds {
        first: u32,
        last: u32,
        page_count: usize,
    },
    #[error("Invalid page-number colour '{0}': expected six hex digits such as 006600")]
    InvalidColor(String),
    #[error("Input file name must end in .pdf: {0}")]
    NotPdfPath(String),
    #[error("Aborting, because {tool} is not available in your path.  No output file written.")]
    MissingDependency { tool: String },
    #[error("Flattening failed: {0}")]
    Flatten(String),
    #[error("Flattened document has {actual} pages, expected {expected}")]
    PageCountMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, ToastError>;

/// RGB colour given as six hex digits, e.g. `006600`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct PageColor {
    rgb: [u8; 3],
}

impl PageColor {
    pub const WHITE: PageColor = PageColor {
        rgb: [0xff, 0xff, 0xff],
    };

    pub const BLACK: PageColor = PageColor { rgb: [0, 0, 0] };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { rgb: [r, g, b] }
    }

    /// Components scaled to the 0..=1 range PDF colour operators expect
    pub fn components(self) -> [f32; 3] {
        self.rgb.map(|c| c as f32 / 255.0)
    }
}

impl Default for PageColor {
    fn default() -> Self {
        Self::new(0x00, 0x66, 0x00)
    }
}

impl FromStr for PageColor {
    type Err = ToastError;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim();
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ToastError::InvalidColor(s.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ToastError::InvalidColor(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for PageColor {
    type Error = ToastError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PageColor> for String {
    fn from(color: PageColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for PageColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.rgb;
        write!(f, "{:02x}{:02x}{:02x}", r, g, b)
    }
}
