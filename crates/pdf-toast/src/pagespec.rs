//! Page range selection
//!
//! A page spec is the user's 1-based, inclusive `first-last` text. It is
//! parsed up front and resolved to a 0-based half-open range once the page
//! count of the input is known.

use crate::types::*;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Parsed page range text such as `2-5`, `2-`, `-5` or `-`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct PageSpec {
    /// First page, 1-based. `None` means the first page of the document.
    pub first: Option<u32>,
    /// Last page, 1-based and inclusive. `None` means the last page.
    pub last: Option<u32>,
}

/// Zero-based half-open interval of page indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: usize,
    pub end: usize,
}

impl PageSpec {
    /// Every page of the document
    pub fn all() -> Self {
        Self::default()
    }

    /// Resolve against a document of `page_count` pages
    pub fn resolve(&self, page_count: usize) -> Result<PageRange> {
        if page_count == 0 {
            return Err(ToastError::NoPages);
        }

        let first = self.first.unwrap_or(1);
        let last = self.last.unwrap_or(page_count as u32);

        if first == 0 || first > last || last as usize > page_count {
            return Err(ToastError::PageRangeOutOfBounds {
                first,
                last,
                page_count,
            });
        }

        Ok(PageRange {
            start: first as usize - 1,
            end: last as usize,
        })
    }
}

impl FromStr for PageSpec {
    type Err = ToastError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let parts: Vec<&str> = text.split('-').collect();

        // "4" most likely means "4-4", but guessing would hide the mistake.
        if let [single] = parts.as_slice() {
            if !single.is_empty() && single.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(page) = single.parse() {
                    return Err(ToastError::AmbiguousPageSpec { page });
                }
            }
        }

        let [first, last] = parts.as_slice() else {
            return Err(ToastError::InvalidPageSpec(s.to_string()));
        };

        Ok(Self {
            first: parse_page_number(first, s)?,
            last: parse_page_number(last, s)?,
        })
    }
}

fn parse_page_number(part: &str, spec: &str) -> Result<Option<u32>> {
    if part.is_empty() {
        return Ok(None);
    }

    match part.parse::<u32>() {
        Ok(page) if page > 0 && part.chars().all(|c| c.is_ascii_digit()) => Ok(Some(page)),
        _ => Err(ToastError::InvalidPageSpec(spec.to_string())),
    }
}

impl fmt::Display for PageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.first {
            write!(f, "{}", first)?;
        }
        f.write_str("-")?;
        if let Some(last) = self.last {
            write!(f, "{}", last)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for PageSpec {
    type Error = ToastError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PageSpec> for String {
    fn from(spec: PageSpec) -> Self {
        spec.to_string()
    }
}

impl PageRange {
    /// Number of pages selected
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Page indices in order
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }
}
