//! Heading codec for e-reader notebook exports
//!
//! Note headings follow the loose pattern
//! `<Kind> [- <chapter> >] Page <page> · Location <loc>` with variable
//! punctuation, for example:
//!
//! - `Note - I > Page 11 · Location 116`
//! - `Highlight (yellow) - The Days of Empire, 1870–1918 > Page 2 · Location 238`
//! - `Page 7` (minimal-field books with neither chapter nor location)

use crate::error::{CoreError, Result};
use crate::location::{AnnotationKind, Location};

/// Parse one noteHeading string into a [`Location`].
///
/// The chapter segment lies between the first `"- "` and the first `">"`;
/// either delimiter missing leaves it empty. The page segment follows the
/// `Page` token up to the `·` separator or the end of the string. The
/// location segment follows the `Location` token and must be a plain
/// Arabic integer; an absent token defaults to 0, a present but
/// non-numeric value is a [`CoreError::MalformedHeading`].
pub fn parse_heading(text: &str) -> Result<Location> {
    let kind = if text.starts_with("Note") {
        AnnotationKind::Note
    } else {
        AnnotationKind::Highlight
    };

    let mut chapter = "";
    if let Some(dash) = text.find("- ") {
        // Chapter titles may themselves contain dashes; only the first
        // "- " opens the segment.
        if let Some(gt) = text.find('>') {
            if gt > dash {
                chapter = text[dash + 1..gt].trim();
            }
        }
    }

    let mut page = "";
    if let Some(pos) = text.find("Page") {
        let rest = &text[pos + 4..];
        page = match rest.find('·') {
            Some(dot) => rest[..dot].trim(),
            None => rest.trim(),
        };
    }

    let mut location: i64 = 0;
    if let Some(pos) = text.find("Location") {
        let loc_str = text[pos + 8..].trim();
        if !loc_str.is_empty() {
            location = loc_str.parse().map_err(|_| CoreError::MalformedHeading {
                heading: text.to_string(),
                reason: format!("location \"{loc_str}\" is not an integer"),
            })?;
        }
    }

    Location::from_parts(kind, chapter, page, location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::AnnotationKind::{Highlight, Note};

    #[test]
    fn full_heading_with_roman_chapter() {
        // Tolstoy, "Hadji Murad"
        let location = parse_heading("Note - I > Page 11 · Location 116").unwrap();
        assert_eq!(location.kind(), Note);
        assert_eq!(location.chapter().raw, "I");
        assert_eq!(location.chapter().value, 1);
        assert_eq!(location.page().value, 11);
        assert_eq!(location.location(), 116);
    }

    #[test]
    fn arabic_chapter_roman_page() {
        // Jones, "Power and Thrones"
        let location = parse_heading("Note - 23 > Page xiii · Location 144").unwrap();
        assert_eq!(location.chapter().value, 23);
        assert_eq!(location.page().raw, "xiii");
        assert_eq!(location.page().value, 13);
        assert_eq!(location.location(), 144);

        let location = parse_heading("Highlight - XIX > Page xiii · Location 144").unwrap();
        assert_eq!(location.kind(), Highlight);
        assert_eq!(location.chapter().value, 19);
    }

    #[test]
    fn missing_chapter_delimiters_leave_chapter_empty() {
        let location = parse_heading("Highlight - Page xiii · Location 144").unwrap();
        assert_eq!(location.chapter().raw, "");
        assert_eq!(location.chapter().value, 0);
        assert_eq!(location.page().value, 13);
    }

    #[test]
    fn chapter_titles_with_free_text() {
        let location = parse_heading("Highlight - 1. Romans > Page 3 · Location 210").unwrap();
        assert_eq!(location.chapter().raw, "1. Romans");
        assert_eq!(location.chapter().value, 1);

        let location = parse_heading("Note - IX. Romans > Page 3 · Location 210").unwrap();
        assert_eq!(location.chapter().raw, "IX. Romans");
        assert_eq!(location.chapter().value, 9);

        let location =
            parse_heading("Highlight (yellow) - The Days of Empire, 1870–1918 > Page 2 · Location 238")
                .unwrap();
        assert_eq!(location.chapter().raw, "The Days of Empire, 1870–1918");
        assert_eq!(location.chapter().value, 1870);
        assert_eq!(location.page().value, 2);
    }

    #[test]
    fn minimal_field_heading_defaults_to_zero() {
        // ND Publishing, "The Warring States Period 475-221BCE"
        let location = parse_heading("Page 7").unwrap();
        assert_eq!(location.kind(), Highlight);
        assert_eq!(location.chapter().raw, "");
        assert_eq!(location.page().raw, "7");
        assert_eq!(location.page().value, 7);
        assert_eq!(location.location(), 0);
    }

    #[test]
    fn non_numeric_location_is_malformed() {
        let error = parse_heading("Highlight - Page 3 · Location many").unwrap_err();
        assert!(matches!(error, CoreError::MalformedHeading { .. }));
        assert!(error.to_string().contains("many"));
    }

    #[test]
    fn unknown_prefix_defaults_to_highlight() {
        let location = parse_heading("Bookmark - Page 3 · Location 210").unwrap();
        assert_eq!(location.kind(), Highlight);
    }
}
