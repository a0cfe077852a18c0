//! Cosmetic cleanup of extracted note text
//!
//! Exports insert a space before closing punctuation and after opening
//! quotes; merged blocks read better without them.

const SPACE_BEFORE: &[&str] = &[",", ";", ":", "!", "’", "”", ".", "?", ")"];
const SPACE_AFTER: &[&str] = &["“", "("];

/// Remove the stray spaces the export leaves around punctuation.
pub fn tidy_text(text: &str) -> String {
    let mut text = text.to_string();
    for punctuation in SPACE_BEFORE {
        text = text.replace(&format!(" {punctuation}"), punctuation);
    }
    for punctuation in SPACE_AFTER {
        text = text.replace(&format!("{punctuation} "), punctuation);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_before_punctuation_are_removed() {
        assert_eq!(tidy_text("So it goes ."), "So it goes.");
        assert_eq!(tidy_text("wait , what ?"), "wait, what?");
        assert_eq!(tidy_text("a list ; an aside : done !"), "a list; an aside: done!");
        assert_eq!(tidy_text("(aside )"), "(aside)");
    }

    #[test]
    fn spaces_after_opening_quotes_are_removed() {
        assert_eq!(tidy_text("“ Who is he ?”"), "“Who is he?”");
        assert_eq!(tidy_text("( so it goes )"), "(so it goes)");
    }

    #[test]
    fn clean_text_is_untouched() {
        assert_eq!(tidy_text("Nothing to fix here."), "Nothing to fix here.");
    }
}
