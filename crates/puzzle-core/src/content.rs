//! Puzzle page and help fragments shipped next to the binary.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::catalog::PuzzleKind;
use crate::error::{Error, Result};

/// Fragments of one puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleContent {
    /// `puzzle.html`: the page layout and controls
    pub page: String,
    /// `help.html`: how to solve
    pub help: String,
}

/// Directory of `<name>/puzzle.html` and `<name>/help.html` fragments
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load both fragments of a puzzle
    pub fn load(&self, kind: PuzzleKind) -> Result<PuzzleContent> {
        let dir = self.root.join(kind.name());
        Ok(PuzzleContent {
            page: read_fragment(&dir.join("puzzle.html"))?,
            help: read_fragment(&dir.join("help.html"))?,
        })
    }

    /// Plain-text help for a puzzle
    pub fn help_text(&self, kind: PuzzleKind) -> Result<String> {
        let dir = self.root.join(kind.name());
        read_fragment(&dir.join("help.html")).map(|html| help_text(&html))
    }
}

fn read_fragment(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| {
        warn!("content unavailable at {}: {}", path.display(), source);
        Error::ContentUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Strip markup from an HTML fragment for terminal display. Block-level tags
/// become line breaks and list items become dashes.
pub fn help_text(html: &str) -> String {
    let mut text = String::new();
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('>') else {
            rest = "";
            break;
        };
        let tag = rest[open + 1..open + close].trim().to_ascii_lowercase();
        let name: String = tag
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect();
        match name.as_str() {
            "br" | "p" | "div" | "ul" | "ol" | "h1" | "h2" | "h3" | "h4" => text.push('\n'),
            "li" if !tag.starts_with('/') => text.push_str("\n- "),
            _ => {}
        }
        rest = &rest[open + close + 1..];
    }
    text.push_str(rest);

    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    let mut lines: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
