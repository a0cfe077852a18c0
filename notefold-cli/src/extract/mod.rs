//! Annotation extraction from notebook HTML
//!
//! The export interleaves `h3.noteHeading` markers with `div.noteText`
//! companions inside one `div.bodyContainer`. A single streaming pass
//! records every heading, section and div in document order; pairing
//! then walks that sequence, so "the companion is the next element"
//! reflects what the source document actually says.

use anyhow::{anyhow, Result};
use lol_html::{element, rewrite_str, text, RewriteStrSettings};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// The companion found (or not) after a heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Companion {
    /// The expected noteText element
    Text(String),
    /// A div with an unexpected class
    WrongClass(String),
    /// Nothing usable followed the heading
    Missing,
}

/// One heading and whatever followed it, in document order.
#[derive(Debug, Clone)]
pub struct RawAnnotation {
    /// Decoded, whitespace-normalized heading text
    pub heading: String,
    /// The companion element, if any
    pub companion: Companion,
}

/// Everything one extraction pass collects from a document.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Heading/companion pairs in document order
    pub annotations: Vec<RawAnnotation>,
    /// Owning annotation index for each `div.noteText` occurrence, in
    /// document order; `None` for orphan noteText elements
    pub note_text_owners: Vec<Option<usize>>,
    /// Text of the document's first style element
    pub style: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Heading,
    NoteText,
    Block,
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    tag: &'static str,
    class: String,
    text: String,
}

impl Node {
    fn new(tag: &'static str, class: String) -> Self {
        let kind = match (tag, class.as_str()) {
            ("h3", "noteHeading") => NodeKind::Heading,
            ("div", "noteText") => NodeKind::NoteText,
            _ => NodeKind::Block,
        };
        Self {
            kind,
            tag,
            class,
            text: String::new(),
        }
    }
}

/// Extract the annotation sequence and stylesheet from a notebook
/// document.
pub fn extract(html: &str) -> Result<Extraction> {
    let nodes: Rc<RefCell<Vec<Node>>> = Rc::new(RefCell::new(Vec::new()));
    let style = Rc::new(RefCell::new(String::new()));
    let styles_seen = Rc::new(RefCell::new(0usize));

    let handlers = vec![
        element!("h3", {
            let nodes = Rc::clone(&nodes);
            move |el| {
                let class = el.get_attribute("class").unwrap_or_default();
                nodes.borrow_mut().push(Node::new("h3", class));
                Ok(())
            }
        }),
        text!("h3.noteHeading", {
            let nodes = Rc::clone(&nodes);
            move |chunk| {
                if let Some(node) = nodes.borrow_mut().last_mut() {
                    node.text.push_str(chunk.as_str());
                }
                Ok(())
            }
        }),
        element!("div", {
            let nodes = Rc::clone(&nodes);
            move |el| {
                let class = el.get_attribute("class").unwrap_or_default();
                nodes.borrow_mut().push(Node::new("div", class));
                Ok(())
            }
        }),
        text!("div.noteText", {
            let nodes = Rc::clone(&nodes);
            move |chunk| {
                if let Some(node) = nodes.borrow_mut().last_mut() {
                    node.text.push_str(chunk.as_str());
                }
                Ok(())
            }
        }),
        element!("h2", {
            let nodes = Rc::clone(&nodes);
            move |el| {
                let class = el.get_attribute("class").unwrap_or_default();
                nodes.borrow_mut().push(Node::new("h2", class));
                Ok(())
            }
        }),
        element!("style", {
            let styles_seen = Rc::clone(&styles_seen);
            move |_el| {
                *styles_seen.borrow_mut() += 1;
                Ok(())
            }
        }),
        text!("style", {
            let style = Rc::clone(&style);
            let styles_seen = Rc::clone(&styles_seen);
            move |chunk| {
                // Only the document's first stylesheet matters.
                if *styles_seen.borrow() == 1 {
                    style.borrow_mut().push_str(chunk.as_str());
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
    .map_err(|e| anyhow!("failed to scan notebook document: {e}"))?;

    let nodes = nodes.borrow();
    let mut occurrence_of: HashMap<usize, usize> = HashMap::new();
    let mut note_text_count = 0usize;
    for (index, node) in nodes.iter().enumerate() {
        if node.kind == NodeKind::NoteText {
            occurrence_of.insert(index, note_text_count);
            note_text_count += 1;
        }
    }

    let mut annotations = Vec::new();
    let mut note_text_owners = vec![None; note_text_count];
    for (index, node) in nodes.iter().enumerate() {
        if node.kind != NodeKind::Heading {
            continue;
        }
        let companion = match nodes.get(index + 1) {
            Some(next) if next.kind == NodeKind::NoteText => {
                note_text_owners[occurrence_of[&(index + 1)]] = Some(annotations.len());
                Companion::Text(clean_text(&next.text))
            }
            Some(next) if next.tag == "div" => Companion::WrongClass(next.class.clone()),
            _ => Companion::Missing,
        };
        annotations.push(RawAnnotation {
            heading: clean_text(&node.text),
            companion,
        });
    }

    let style = style.borrow();
    Ok(Extraction {
        annotations,
        note_text_owners,
        style: if style.is_empty() {
            None
        } else {
            Some(style.clone())
        },
    })
}

/// True when the document looks like a Kindle notebook export: its
/// stylesheet mentions both the bookTitle and bodyContainer classes.
pub fn is_notebook(html: &str) -> Result<bool> {
    Ok(extract(html)?
        .style
        .map(|css| css.contains("bookTitle") && css.contains("bodyContainer"))
        .unwrap_or(false))
}

// Element text as a reader sees it: entity-decoded and
// whitespace-collapsed.
fn clean_text(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTEBOOK: &str = r#"
<html lang="en">
<head>
<style>
.bookTitle { font-size: 18pt; }
.bodyContainer { padding-left: 32px; }
</style>
</head>
<body>
<div class="bodyContainer">
<h2 class="sectionHeading">Section Heading 1</h2>
<h3 class="noteHeading">Highlight (<span class="highlight_yellow">yellow</span>) - I &gt; Page 11 · Location 116</h3>
<div class="noteText">“Who is he?”</div>
<h3 class="noteHeading">Note - I &gt; Page 11 · Location 119</h3>
<div class="noteText">First impression.</div>
<h3 class="noteHeading">Highlight (yellow) - II &gt; Page 15 · Location 160</h3>
</div>
</body>
</html>
"#;

    #[test]
    fn headings_pair_with_following_note_text() {
        let extraction = extract(NOTEBOOK).unwrap();
        assert_eq!(extraction.annotations.len(), 3);

        let first = &extraction.annotations[0];
        assert_eq!(first.heading, "Highlight (yellow) - I > Page 11 · Location 116");
        assert_eq!(first.companion, Companion::Text("“Who is he?”".to_string()));

        let second = &extraction.annotations[1];
        assert_eq!(second.heading, "Note - I > Page 11 · Location 119");
        assert_eq!(
            second.companion,
            Companion::Text("First impression.".to_string())
        );

        // The trailing heading has no companion element.
        let third = &extraction.annotations[2];
        assert_eq!(third.companion, Companion::Missing);
    }

    #[test]
    fn note_text_owners_follow_document_order() {
        let extraction = extract(NOTEBOOK).unwrap();
        assert_eq!(extraction.note_text_owners, vec![Some(0), Some(1)]);
    }

    #[test]
    fn first_stylesheet_is_captured() {
        let extraction = extract(NOTEBOOK).unwrap();
        let style = extraction.style.unwrap();
        assert!(style.contains(".bookTitle"));
        assert!(style.contains(".bodyContainer"));
    }

    #[test]
    fn notebook_detection_checks_the_stylesheet() {
        assert!(is_notebook(NOTEBOOK).unwrap());
        assert!(!is_notebook("<html><style>.plain {}</style></html>").unwrap());
        assert!(!is_notebook("<html><body>no style at all</body></html>").unwrap());
    }

    #[test]
    fn wrong_class_companions_are_reported() {
        let html = r#"
<div class="bodyContainer">
<h3 class="noteHeading">Highlight - Page 3 · Location 12</h3>
<div class="imageBlock">not a note</div>
</div>
"#;
        let extraction = extract(html).unwrap();
        assert_eq!(extraction.annotations.len(), 1);
        assert_eq!(
            extraction.annotations[0].companion,
            Companion::WrongClass("imageBlock".to_string())
        );
    }

    #[test]
    fn heading_followed_by_section_is_missing_text() {
        let html = r#"
<h3 class="noteHeading">Highlight - Page 3 · Location 12</h3>
<h2 class="sectionHeading">Next Section</h2>
<div class="noteText">orphaned</div>
"#;
        let extraction = extract(html).unwrap();
        assert_eq!(extraction.annotations[0].companion, Companion::Missing);
        // The noteText after the section belongs to nobody.
        assert_eq!(extraction.note_text_owners, vec![None]);
    }
}
