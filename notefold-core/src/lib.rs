//! Location parsing and proximity aggregation for e-reader annotation
//! exports.
//!
//! An exported notebook is a stream of annotation markers: a heading
//! describing the note/highlight kind and its chapter/page/location,
//! paired with the annotated text. This crate parses those headings,
//! including Arabic and Roman numerals embedded in free text, into
//! totally ordered [`Location`] values, and merges runs of closely
//! spaced annotations into denser blocks tagged with the location range
//! they span.
//!
//! ```
//! use notefold_core::{aggregate, parse_heading, Annotation, Proximity};
//!
//! let heading = parse_heading("Note - I > Page 11 · Location 116")?;
//! let outcome = aggregate(
//!     Proximity::default(),
//!     [Annotation::new(heading, "An observation about chapter one.")],
//! )?;
//! assert_eq!(outcome.blocks.len(), 1);
//! # Ok::<(), notefold_core::CoreError>(())
//! ```

#![warn(missing_docs)]

pub mod aggregate;
pub mod error;
pub mod heading;
pub mod location;
pub mod numeral;

pub use aggregate::{
    aggregate, AggregateOutcome, Aggregator, Annotation, OutputBlock, Proximity, Skipped,
};
pub use error::{CoreError, Result};
pub use heading::parse_heading;
pub use location::{AnnotationKind, Location, Numeral};
