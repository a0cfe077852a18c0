//! Proximity-based annotation aggregation
//!
//! A single pass over the annotation stream, in input order and without
//! look-ahead. A run stays open while each annotation lands within the
//! configured chapter/page/location tolerance of the previous one; any
//! axis exceeding its tolerance flushes the run as one output block
//! tagged with the covered range.

use crate::error::{CoreError, Result};
use crate::location::{AnnotationKind, Location};
use serde::{Deserialize, Serialize};

/// Per-axis merge tolerances. 0 means any change on that axis starts a
/// new run; larger values tolerate drift within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Proximity {
    /// Chapter drift tolerated within one run
    pub chapter: u32,
    /// Page drift tolerated within one run
    pub page: u32,
    /// Location drift tolerated within one run
    pub location: u32,
}

impl Default for Proximity {
    fn default() -> Self {
        // Any chapter or page change splits; locations may drift by up
        // to 5 units within one run.
        Self {
            chapter: 0,
            page: 0,
            location: 5,
        }
    }
}

/// One annotation from the export: its parsed location and the companion
/// text, `None` when the export had no usable text element for it.
#[derive(Debug, Clone)]
pub struct Annotation {
    /// Parsed heading location
    pub location: Location,
    /// Companion text, already cleaned up by the caller
    pub text: Option<String>,
}

impl Annotation {
    /// An annotation with companion text.
    pub fn new(location: Location, text: impl Into<String>) -> Self {
        Self {
            location,
            text: Some(text.into()),
        }
    }

    /// An annotation whose companion text was missing from the export.
    pub fn without_text(location: Location) -> Self {
        Self {
            location,
            text: None,
        }
    }
}

/// A flushed run of merged annotations.
#[derive(Debug, Clone, Serialize)]
pub struct OutputBlock {
    /// Synthesized chapter heading, present when this run opened a new
    /// chapter
    pub chapter_label: Option<String>,
    /// Merged annotation text
    pub text: String,
    /// Covered location range, e.g. `"cI-II,p1-3,l2-40"`
    pub range: String,
    /// Element index of the first merged annotation
    pub first_element: usize,
    /// Element index of the last annotation consumed before the flush
    pub last_element: usize,
}

impl OutputBlock {
    /// Element range rendering, `"e4"` or `"e0-3"`.
    pub fn element_label(&self) -> String {
        if self.first_element == self.last_element {
            format!("e{}", self.first_element)
        } else {
            format!("e{}-{}", self.first_element, self.last_element)
        }
    }

    /// The suffix the notebook renderer appends to a block,
    /// `"(e0-4,cI,p1,l1-25)"`.
    pub fn suffix_label(&self) -> String {
        format!("({},{})", self.element_label(), self.range)
    }
}

/// An annotation that could not join a run because its companion text
/// was missing.
#[derive(Debug, Clone, Serialize)]
pub struct Skipped {
    /// Element index in the input sequence
    pub element: usize,
    /// The annotation's location
    pub location: Location,
}

/// Everything produced by one aggregation pass.
#[derive(Debug, Serialize)]
pub struct AggregateOutcome {
    /// Flushed blocks, in the order their runs were opened
    pub blocks: Vec<OutputBlock>,
    /// Annotations skipped for missing companion text
    pub skipped: Vec<Skipped>,
    /// Total annotations consumed
    pub elements: usize,
}

// Open run state: buffered text plus where the run started.
#[derive(Debug)]
struct Accumulator {
    text: String,
    start: Location,
    start_element: usize,
    chapter_label: Option<String>,
}

/// The aggregation state machine.
///
/// Feed annotations with [`push`](Self::push) in input order, then call
/// [`finish`](Self::finish) for the trailing flush and the collected
/// outcome.
#[derive(Debug)]
pub struct Aggregator {
    proximity: Proximity,
    acc: Option<Accumulator>,
    prev: Option<Location>,
    next_element: usize,
    blocks: Vec<OutputBlock>,
    skipped: Vec<Skipped>,
}

impl Aggregator {
    /// A fresh aggregator with the given tolerances.
    pub fn new(proximity: Proximity) -> Self {
        Self {
            proximity,
            acc: None,
            prev: None,
            next_element: 0,
            blocks: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Consume the next annotation.
    ///
    /// Text-less annotations are recorded as skipped; they advance the
    /// previous-location tracking and the element counter but never open
    /// or join a run.
    pub fn push(&mut self, annotation: Annotation) {
        let element = self.next_element;
        self.next_element += 1;

        let Annotation { location: curr, text } = annotation;
        let Some(text) = text else {
            self.skipped.push(Skipped {
                element,
                location: curr.clone(),
            });
            self.prev = Some(curr);
            return;
        };

        // Notes are marked once per source annotation, before merging.
        let text = match curr.kind() {
            AnnotationKind::Note => format!("(Note: {text})"),
            AnnotationKind::Highlight => text,
        };

        match self.acc.take() {
            None => {
                // Opening the first run. The synthetic prior location sits
                // one chapter back so the opening run registers as a
                // chapter change and is considered for a heading label.
                let prior = match self.prev.clone() {
                    Some(prev) => prev,
                    None => curr.prior_chapter(),
                };
                let chapter_split = exceeded(
                    prior.chapter().value,
                    self.proximity.chapter,
                    curr.chapter().value,
                );
                self.acc = Some(Accumulator {
                    text,
                    start: curr.clone(),
                    start_element: element,
                    chapter_label: if chapter_split {
                        chapter_label(&curr)
                    } else {
                        None
                    },
                });
            }
            Some(mut acc) => {
                // A run is open, so some annotation preceded this one.
                let prev = self.prev.clone().unwrap_or_else(|| acc.start.clone());
                let chapter_split = exceeded(
                    prev.chapter().value,
                    self.proximity.chapter,
                    curr.chapter().value,
                );
                let page_split =
                    exceeded(prev.page().value, self.proximity.page, curr.page().value);
                let location_split =
                    exceeded(prev.location(), self.proximity.location, curr.location());

                if chapter_split || page_split || location_split {
                    self.blocks.push(seal(acc, &prev, element - 1));
                    self.acc = Some(Accumulator {
                        text,
                        start: curr.clone(),
                        start_element: element,
                        chapter_label: if chapter_split {
                            chapter_label(&curr)
                        } else {
                            None
                        },
                    });
                } else {
                    if !acc.text.is_empty() {
                        acc.text.push(' ');
                    }
                    acc.text.push_str(&text);
                    self.acc = Some(acc);
                }
            }
        }

        self.prev = Some(curr);
    }

    /// Flush the trailing run and return the collected outcome.
    ///
    /// Calling this without ever having opened a run is a contract
    /// violation ([`CoreError::NoOpenRun`]): the caller must feed at
    /// least one text-bearing annotation first.
    pub fn finish(mut self) -> Result<AggregateOutcome> {
        let acc = self.acc.take().ok_or(CoreError::NoOpenRun)?;
        let prev = self.prev.clone().unwrap_or_else(|| acc.start.clone());
        let last = self.next_element.saturating_sub(1);
        self.blocks.push(seal(acc, &prev, last));
        Ok(AggregateOutcome {
            blocks: self.blocks,
            skipped: self.skipped,
            elements: self.next_element,
        })
    }
}

/// Run a whole annotation sequence through a fresh [`Aggregator`].
pub fn aggregate(
    proximity: Proximity,
    annotations: impl IntoIterator<Item = Annotation>,
) -> Result<AggregateOutcome> {
    let mut aggregator = Aggregator::new(proximity);
    for annotation in annotations {
        aggregator.push(annotation);
    }
    aggregator.finish()
}

fn exceeded(prev: u32, proximity: u32, curr: u32) -> bool {
    u64::from(prev) + u64::from(proximity) < u64::from(curr)
}

fn seal(acc: Accumulator, prev: &Location, last_element: usize) -> OutputBlock {
    OutputBlock {
        chapter_label: acc.chapter_label,
        range: Location::range(&acc.start, prev),
        text: acc.text,
        first_element: acc.start_element,
        last_element,
    }
}

// Some books have no chapter field at all; those runs get no label.
fn chapter_label(curr: &Location) -> Option<String> {
    let raw = &curr.chapter().raw;
    if raw.is_empty() {
        None
    } else if raw.starts_with("Chapter") {
        Some(raw.clone())
    } else {
        Some(format!("Chapter {raw}"))
    }
}
