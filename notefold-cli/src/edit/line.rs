//! Line-level edits applied before the document is parsed
//!
//! Notebook exports carry a few structural quirks: an XML prolog, a
//! legacy doctype, and note lines whose `</h3>` and `</div>` end tags
//! come out swapped. Each quirk is handled by an ordered table so new
//! entries slot in without touching the loop.

/// Lines containing any of these substrings are dropped.
const DELETE_CONTAINS: &[&str] = &["<?xml version="];

/// A line starting with the key is replaced wholesale.
const UPDATE_STARTS_WITH: &[(&str, &str)] = &[
    ("<!DOCTYPE html PUBLIC ", "<!DOCTYPE html>"),
    ("<html xmlns=", "<html lang=\"en\">"),
    (
        "<meta http-equiv=",
        "<meta http-equiv=\"Content-Type\" content=\"text/html; charset=UTF-8\">",
    ),
];

/// Substring replacements applied to every line. `&middot;` sits outside
/// the basic named-entity set, so the heading separator is normalized
/// here, before text extraction.
const REPLACE: &[(&str, &str)] = &[("&middot;", "·")];

const SWAP_PLACEHOLDER: &str = "</temp>";

/// Apply the edit tables to a whole document, line by line.
pub fn edit_lines(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for line in input.lines() {
        if should_delete(line) {
            continue;
        }
        let line = update_line(line);
        let line = replace_in_line(&line);
        let line = swap(&line, "</h3>", "</div>");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn should_delete(line: &str) -> bool {
    DELETE_CONTAINS.iter().any(|probe| line.contains(probe))
}

fn update_line(line: &str) -> String {
    for (key, replacement) in UPDATE_STARTS_WITH {
        if line.starts_with(key) {
            return (*replacement).to_string();
        }
    }
    line.to_string()
}

fn replace_in_line(line: &str) -> String {
    let mut line = line.to_string();
    for (from, to) in REPLACE {
        line = line.replace(from, to);
    }
    line
}

/// Swap two substrings when both occur in a line. Fixes the mismatched
/// heading end tags:
/// `<h3 class='noteHeading'>…</div><div class='noteText'>…</h3>`.
pub fn swap(line: &str, first: &str, second: &str) -> String {
    if line.contains(first) && line.contains(second) {
        line.replace(first, SWAP_PLACEHOLDER)
            .replace(second, first)
            .replace(SWAP_PLACEHOLDER, second)
    } else {
        line.to_string()
    }
}
