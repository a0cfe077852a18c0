//! Annotation location value type
//!
//! A location keeps chapter and page both as the raw text found in the
//! heading and as a parsed integer. The raw form preserves the original
//! numeral styling ("IX", "xiii") for display; the integers are what
//! ordering and proximity comparisons use.

use crate::error::{CoreError, Result};
use crate::numeral;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Who authored the annotated text. Highlights order before notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AnnotationKind {
    /// Author text marked by the reader
    Highlight,
    /// Reader-authored commentary
    Note,
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationKind::Highlight => write!(f, "Highlight"),
            AnnotationKind::Note => write!(f, "Note"),
        }
    }
}

/// A chapter or page field: the raw heading text paired with the value
/// parsed from it. The value is always derived from the raw text, never
/// set independently; an absent or unparsable field is 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Numeral {
    /// Original field text, empty when absent from the heading
    pub raw: String,
    /// Parsed value, 0 when absent
    pub value: u32,
}

impl Numeral {
    /// Parse a raw chapter/page field. Empty input, unparsable input and
    /// negative parses all give value 0.
    pub fn parse(raw: &str) -> Self {
        let value = if raw.is_empty() {
            0
        } else {
            match numeral::parse_flexible(raw) {
                Ok(v) => v.clamp(0, i64::from(u32::MAX)) as u32,
                Err(_) => 0,
            }
        };
        Self {
            raw: raw.to_string(),
            value,
        }
    }

    /// A numeral whose raw form is the decimal rendering of the value.
    pub fn from_value(value: u32) -> Self {
        Self {
            raw: value.to_string(),
            value,
        }
    }

    /// True when the field was absent from the source heading.
    pub fn is_absent(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Parsed position of one annotation inside a book.
///
/// Equality and ordering derive solely from `(kind, chapter, page,
/// location)` as integers; the raw strings are display-only.
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    kind: AnnotationKind,
    chapter: Numeral,
    page: Numeral,
    location: u32,
}

impl Location {
    /// Build a location from raw heading fields. Chapter and page parse
    /// through [`Numeral::parse`]; a negative location value is rejected.
    pub fn from_parts(
        kind: AnnotationKind,
        chapter_raw: &str,
        page_raw: &str,
        location: i64,
    ) -> Result<Self> {
        if location < 0 {
            return Err(CoreError::InvalidLocation {
                reason: format!("location must be non-negative, value={location}"),
            });
        }
        Ok(Self {
            kind,
            chapter: Numeral::parse(chapter_raw),
            page: Numeral::parse(page_raw),
            location: location.clamp(0, i64::from(u32::MAX)) as u32,
        })
    }

    /// Build a location from already-known integers; the raw fields
    /// become their decimal renderings.
    pub fn from_values(kind: AnnotationKind, chapter: u32, page: u32, location: u32) -> Self {
        Self {
            kind,
            chapter: Numeral::from_value(chapter),
            page: Numeral::from_value(page),
            location,
        }
    }

    /// The annotation kind.
    pub fn kind(&self) -> AnnotationKind {
        self.kind
    }

    /// The chapter field.
    pub fn chapter(&self) -> &Numeral {
        &self.chapter
    }

    /// The page field.
    pub fn page(&self) -> &Numeral {
        &self.page
    }

    /// The location number.
    pub fn location(&self) -> u32 {
        self.location
    }

    /// The same position moved back one chapter, floored at 0. Seeds the
    /// aggregation pass so the very first annotation registers as a
    /// chapter change.
    pub(crate) fn prior_chapter(&self) -> Location {
        Location::from_values(
            self.kind,
            self.chapter.value.saturating_sub(1),
            self.page.value,
            self.location,
        )
    }

    /// Ordering with absent locations: `None` sorts before any present
    /// location, two `None`s are equal.
    pub fn compare(a: Option<&Location>, b: Option<&Location>) -> Ordering {
        a.cmp(&b)
    }

    /// Render only the requested fields, in the requested order,
    /// comma-joined. Codes: `t` kind, `c` chapter, `p` page, `l`
    /// location. `"lp"` gives `"l141,p15"`.
    pub fn fields(&self, codes: &str) -> String {
        codes
            .chars()
            .map(|code| match code {
                't' => self.kind.to_string(),
                'c' => format!("c{}", self.chapter.raw),
                'p' => format!("p{}", self.page.raw),
                'l' => format!("l{}", self.location),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Compact interval between two locations, e.g.
    /// `"cI-II,p1-3,l2-40"`. The chapter segment appears only when both
    /// ends carry one; each segment collapses to a single value when the
    /// two ends agree.
    pub fn range(start: &Location, end: &Location) -> String {
        let mut out = String::new();
        if !start.chapter.is_absent() && !end.chapter.is_absent() {
            out.push('c');
            out.push_str(&start.chapter.raw);
            if start.chapter.raw != end.chapter.raw {
                out.push('-');
                out.push_str(&end.chapter.raw);
            }
            out.push(',');
        }
        out.push('p');
        out.push_str(&start.page.raw);
        if start.page.raw != end.page.raw {
            out.push('-');
            out.push_str(&end.page.raw);
        }
        out.push_str(",l");
        out.push_str(&start.location.to_string());
        if start.location != end.location {
            out.push('-');
            out.push_str(&end.location.to_string());
        }
        out
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.chapter.is_absent() {
            write!(f, "c{},", self.chapter.raw)?;
        }
        write!(f, "p{},l{}", self.page.raw, self.location)
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Location {}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.chapter.value.cmp(&other.chapter.value))
            .then_with(|| self.page.value.cmp(&other.page.value))
            .then_with(|| self.location.cmp(&other.location))
    }
}
