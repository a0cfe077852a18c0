//! In-place notebook rendering
//!
//! A second streaming pass over the line-edited document: the first
//! noteText of each run receives the merged text plus a styled
//! location-range suffix, the remaining noteText elements and all
//! noteHeading markers are dropped, synthesized chapter headings go in
//! where a run opened a new chapter, and the stylesheet picks up rules
//! for the new elements.

use crate::extract::Extraction;
use anyhow::{anyhow, Result};
use lol_html::html_content::ContentType;
use lol_html::{element, rewrite_str, text, RewriteStrSettings};
use notefold_core::AggregateOutcome;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Render the aggregated notebook document.
///
/// `html` must be the same line-edited text the annotations were
/// extracted from, so element occurrences line up with `extraction`.
pub fn render_notebook(
    html: &str,
    outcome: &AggregateOutcome,
    extraction: &Extraction,
) -> Result<String> {
    // Inner HTML for each run-start noteText, keyed by annotation index.
    let mut replacements: HashMap<usize, String> = HashMap::new();
    let mut labels: HashMap<usize, String> = HashMap::new();
    for block in &outcome.blocks {
        replacements.insert(
            block.first_element,
            format!(
                "{} <span class=\"locationStyle\">{}</span>",
                html_escape::encode_text(&block.text),
                html_escape::encode_text(&block.suffix_label()),
            ),
        );
        if let Some(label) = &block.chapter_label {
            labels.insert(block.first_element, label.clone());
        }
    }

    let heading_index = Rc::new(RefCell::new(0usize));
    let note_text_index = Rc::new(RefCell::new(0usize));
    let owners = extraction.note_text_owners.clone();
    let css = edit_css(extraction.style.as_deref().unwrap_or_default());

    let handlers = vec![
        element!("h3.noteHeading", {
            let heading_index = Rc::clone(&heading_index);
            let labels = labels.clone();
            move |el| {
                let index = *heading_index.borrow();
                *heading_index.borrow_mut() += 1;
                if let Some(label) = labels.get(&index) {
                    el.before(
                        &format!(
                            "<h3 class='chapterHeading'>{}</h3>",
                            html_escape::encode_text(label)
                        ),
                        ContentType::Html,
                    );
                }
                // The heading's information now lives in the block suffix.
                el.remove();
                Ok(())
            }
        }),
        element!("div.noteText", {
            let note_text_index = Rc::clone(&note_text_index);
            let replacements = replacements.clone();
            move |el| {
                let occurrence = *note_text_index.borrow();
                *note_text_index.borrow_mut() += 1;
                match owners.get(occurrence).copied().flatten() {
                    Some(owner) => match replacements.get(&owner) {
                        Some(inner) => el.set_inner_content(inner, ContentType::Html),
                        None => el.remove(),
                    },
                    // Orphan noteText elements stay as they are.
                    None => {}
                }
                Ok(())
            }
        }),
        text!("style", {
            move |chunk| {
                if chunk.last_in_text_node() {
                    chunk.replace(&css, ContentType::Html);
                } else {
                    chunk.remove();
                }
                Ok(())
            }
        }),
    ];

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: handlers,
            ..RewriteStrSettings::default()
        },
    )
    .map_err(|e| anyhow!("failed to render notebook document: {e}"))
}

/// Rework the export stylesheet for the aggregated document: the
/// centered bodyContainer layout goes away, and the synthesized chapter
/// headings and location tags get rules.
pub fn edit_css(css: &str) -> String {
    let mut out = css
        .replace(
            "    font-family: Arial, Helvetica, sans-serif;\r\n    text-align: center;\r\n    padding-left: 32px;\r\n    padding-right: 32px;",
            "",
        )
        .replace(
            "    font-family: Arial, Helvetica, sans-serif;\n    text-align: center;\n    padding-left: 32px;\n    padding-right: 32px;",
            "",
        );
    out.push_str("\n.chapterHeading {\n    padding: 0px;\n}\n");
    out.push_str("\n.locationStyle {\n    color: #999999;\n    font-size: 18px;\n}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract;
    use notefold_core::{aggregate, parse_heading, Annotation, Proximity};

    const NOTEBOOK: &str = r#"<html lang="en">
<head><style>
.bookTitle { font-size: 18pt; }
.bodyContainer {
    font-family: Arial, Helvetica, sans-serif;
    text-align: center;
    padding-left: 32px;
    padding-right: 32px;
}
</style></head>
<body>
<div class="bodyContainer">
<h3 class="noteHeading">Highlight - I &gt; Page 11 · Location 116</h3>
<div class="noteText">first part</div>
<h3 class="noteHeading">Highlight - I &gt; Page 11 · Location 118</h3>
<div class="noteText">second part</div>
<h3 class="noteHeading">Highlight - II &gt; Page 20 · Location 300</h3>
<div class="noteText">next chapter</div>
</div>
</body>
</html>
"#;

    fn render(html: &str) -> String {
        let extraction = extract::extract(html).unwrap();
        let annotations: Vec<Annotation> = extraction
            .annotations
            .iter()
            .map(|raw| {
                let location = parse_heading(&raw.heading).unwrap();
                match &raw.companion {
                    extract::Companion::Text(text) => Annotation::new(location, text.clone()),
                    _ => Annotation::without_text(location),
                }
            })
            .collect();
        let outcome = aggregate(Proximity::default(), annotations).unwrap();
        render_notebook(html, &outcome, &extraction).unwrap()
    }

    #[test]
    fn merged_runs_collapse_into_the_first_note_text() {
        let rendered = render(NOTEBOOK);
        assert!(rendered.contains("first part second part"));
        assert!(rendered.contains("(e0-1,cI,p11,l116-118)"));
        assert!(rendered.contains("next chapter"));
        // Two noteText divs survive out of three.
        assert_eq!(rendered.matches("class=\"noteText\"").count(), 2);
    }

    #[test]
    fn headings_are_removed_and_chapter_headings_inserted() {
        let rendered = render(NOTEBOOK);
        assert!(!rendered.contains("noteHeading"));
        assert!(rendered.contains("<h3 class='chapterHeading'>Chapter I</h3>"));
        assert!(rendered.contains("<h3 class='chapterHeading'>Chapter II</h3>"));
        // The label precedes the run that triggered it.
        let label_at = rendered.find("Chapter II</h3>").unwrap();
        let run_at = rendered.find("next chapter").unwrap();
        assert!(label_at < run_at);
    }

    #[test]
    fn stylesheet_is_reworked() {
        let rendered = render(NOTEBOOK);
        assert!(rendered.contains(".chapterHeading"));
        assert!(rendered.contains(".locationStyle"));
        assert!(!rendered.contains("text-align: center"));
    }

    #[test]
    fn css_edit_appends_new_rules() {
        let edited = edit_css(".bookTitle { font-size: 18pt; }");
        assert!(edited.starts_with(".bookTitle"));
        assert!(edited.contains(".chapterHeading"));
        assert!(edited.contains("#999999"));
    }
}
