//! Doc comment segmentation
//!
//! Comment text is split into paragraphs, preformatted runs and headings in
//! a single forward pass over its lines:
//! - blank lines end a paragraph
//! - lines indented past the comment's baseline form a preformatted block
//! - a lone line between blank lines may be a heading (see [`heading`])

use serde::{Deserialize, Serialize};

/// A segment of a doc comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { title: String },
    Paragraph { lines: Vec<String> },
    Preformat { lines: Vec<String> },
}

/// A link collected from a "Links" section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub href: String,
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn indent_len(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let n = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..n]
}

/// Strip the whitespace prefix shared by every non-blank line
///
/// Blank lines become empty.
fn unindent(lines: &mut [String]) {
    let mut prefix: Option<String> = None;
    for line in lines.iter().filter(|l| !is_blank(l)) {
        let indent = &line[..indent_len(line)];
        prefix = Some(match prefix {
            None => indent.to_string(),
            Some(p) => common_prefix(&p, indent).to_string(),
        });
    }
    let n = prefix.map_or(0, |p| p.len());
    for line in lines.iter_mut() {
        if is_blank(line) {
            line.clear();
        } else {
            line.drain(..n);
        }
    }
}

/// Split comment text into blocks
#[must_use]
pub fn doc_to_blocks(text: &str) -> Vec<Block> {
    let mut lines: Vec<String> = text
        .trim_matches('\n')
        .split('\n')
        .map(str::to_string)
        .collect();
    unindent(&mut lines);

    let mut out = Vec::new();
    let mut para: Vec<String> = Vec::new();
    let mut last_was_blank = false;
    let mut last_was_heading = false;

    let close = |para: &mut Vec<String>, out: &mut Vec<Block>| {
        if !para.is_empty() {
            out.push(Block::Paragraph {
                lines: std::mem::take(para),
            });
        }
    };

    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        if is_blank(line) {
            close(&mut para, &mut out);
            last_was_blank = true;
            i += 1;
            continue;
        }

        if indent_len(line) > 0 {
            close(&mut para, &mut out);
            let mut j = i + 1;
            while j < lines.len() && (is_blank(&lines[j]) || indent_len(&lines[j]) > 0) {
                j += 1;
            }
            while j > i && is_blank(&lines[j - 1]) {
                j -= 1;
            }
            let mut pre = lines[i..j].to_vec();
            unindent(&mut pre);
            out.push(Block::Preformat { lines: pre });
            last_was_heading = false;
            i = j;
            continue;
        }

        // A lone line between blank lines, followed by ordinary text
        let may_be_heading = last_was_blank
            && !last_was_heading
            && !out.is_empty()
            && i + 2 < lines.len()
            && is_blank(&lines[i + 1])
            && !is_blank(&lines[i + 2])
            && indent_len(&lines[i + 2]) == 0;
        if may_be_heading {
            if let Some(title) = heading(line) {
                out.push(Block::Heading {
                    title: title.to_string(),
                });
                last_was_heading = true;
                i += 2;
                continue;
            }
        }

        last_was_blank = false;
        last_was_heading = false;
        para.push(line.clone());
        i += 1;
    }
    close(&mut para, &mut out);
    out
}

/// The heading text of `line`, if it reads like a heading
///
/// A heading starts with an uppercase letter, ends with a letter or digit,
/// and avoids punctuation that is common in sentences and code.
#[must_use]
pub fn heading(line: &str) -> Option<&str> {
    let line = line.trim();
    let first = line.chars().next()?;
    if !first.is_alphabetic() || !first.is_uppercase() {
        return None;
    }
    let last = line.chars().next_back()?;
    if !last.is_alphabetic() && !last.is_numeric() {
        return None;
    }
    if line.contains(|c: char| ";:!?+*/=[]{}_^°&§~%#@<\">\\".contains(c)) {
        return None;
    }

    // "'" only for possessive "'s"
    let mut rest = line;
    while let Some(i) = rest.find('\'') {
        let after = &rest.as_bytes()[i + 1..];
        if after.first() != Some(&b's') || after.get(1).is_some_and(|&b| b != b' ') {
            return None;
        }
        rest = &rest[i + 2..];
    }

    // "." only when followed by a non-space
    let mut rest = line;
    while let Some(i) = rest.find('.') {
        match rest.as_bytes().get(i + 1) {
            None | Some(b' ') => return None,
            Some(_) => rest = &rest[i + 1..],
        }
    }

    Some(line)
}

/// The element ID of a heading: `hdr-` followed by the title with every
/// character outside `[A-Za-z0-9]` replaced by `_`
#[must_use]
pub fn heading_id(title: &str) -> String {
    let body: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("hdr-{body}")
}

/// Parse a `- text, href` bullet line
///
/// The line is expected to have its leading whitespace removed already.
#[must_use]
pub fn parse_link(line: &str) -> Option<Link> {
    let rest = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("-\t"))?;
    let (text, href) = rest.split_once(',')?;
    Some(Link {
        text: text.trim().to_string(),
        href: href.trim().to_string(),
    })
}

/// Collect the links among `lines`, skipping lines that are not links
#[must_use]
pub fn parse_links(lines: &[String]) -> Vec<Link> {
    lines.iter().filter_map(|l| parse_link(l)).collect()
}
