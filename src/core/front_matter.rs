//! Front-matter parsing for post files.
//!
//! A post file may start with `Title:`, `Slug:` and `Status:` lines (keys
//! match case-insensitively, in any order). Only the first
//! [`METADATA_WINDOW`] lines are examined; anything after that is body text,
//! even when it looks like metadata.
//!
//! Within the window the first line for each key wins and a repeated key is
//! body text. When line 0 is not metadata it becomes the provisional title.
//! An explicit `Title:` line later in the window replaces it, and the
//! provisional line goes back to the top of the body.

use crate::domain::model::{PostRecord, PostStatus};
use crate::utils::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKey {
    Title,
    Slug,
    Status,
}

impl MetaKey {
    pub const ALL: [MetaKey; 3] = [MetaKey::Title, MetaKey::Slug, MetaKey::Status];

    fn prefix(self) -> &'static str {
        match self {
            MetaKey::Title => "title:",
            MetaKey::Slug => "slug:",
            MetaKey::Status => "status:",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Returns the trimmed value when `line` starts with this key.
    fn value_of(self, line: &str) -> Option<&str> {
        let prefix = self.prefix();
        let head = line.get(..prefix.len())?;
        head.eq_ignore_ascii_case(prefix)
            .then(|| line[prefix.len()..].trim())
    }
}

/// Number of leading lines examined for metadata.
pub const METADATA_WINDOW: usize = MetaKey::ALL.len();

#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    Metadata(MetaKey, &'a str),
    ProvisionalTitle,
    Body,
}

#[derive(Debug, Default)]
pub struct FrontMatterParser {
    values: [Option<String>; METADATA_WINDOW],
    provisional_title: Option<String>,
    content: String,
    lines_seen: usize,
}

impl FrontMatterParser {
    pub fn new() -> Self {
        Self::default()
    }

    fn classify<'a>(&self, index: usize, line: &'a str) -> LineKind<'a> {
        if index >= METADATA_WINDOW {
            return LineKind::Body;
        }

        let matched = MetaKey::ALL
            .iter()
            .find_map(|key| key.value_of(line).map(|value| (*key, value)));

        match matched {
            Some((key, value)) if self.values[key.index()].is_none() => {
                LineKind::Metadata(key, value)
            }
            Some(_) => LineKind::Body,
            None if index == 0 => LineKind::ProvisionalTitle,
            None => LineKind::Body,
        }
    }

    /// Feeds the next line, including its line terminator if it has one.
    pub fn feed(&mut self, line: &str) {
        let index = self.lines_seen;
        self.lines_seen += 1;

        match self.classify(index, line) {
            LineKind::Metadata(key, value) => {
                tracing::debug!("Front matter line {}: {:?}", index, key);
                self.values[key.index()] = Some(value.to_string());
            }
            LineKind::ProvisionalTitle => {
                self.provisional_title = Some(line.to_string());
            }
            LineKind::Body => self.content.push_str(line),
        }
    }

    /// Validates the collected metadata and builds the post.
    pub fn finish(self) -> Result<PostRecord> {
        let [title, slug, status] = self.values;

        let status = match status {
            Some(value) => value.parse::<PostStatus>()?,
            None => PostStatus::default(),
        };

        let (title, content) = match (title, self.provisional_title) {
            (Some(explicit), Some(first_line)) => (Some(explicit), first_line + &self.content),
            (Some(explicit), None) => (Some(explicit), self.content),
            (None, Some(first_line)) => (Some(first_line.trim().to_string()), self.content),
            (None, None) => (None, self.content),
        };

        Ok(PostRecord {
            title,
            slug,
            status,
            content,
        })
    }
}

/// Parses raw file content into a post, failing on an invalid status.
pub fn parse_post(raw: &str) -> Result<PostRecord> {
    let mut parser = FrontMatterParser::new();
    for line in raw.split_inclusive('\n') {
        parser.feed(line);
    }
    parser.finish()
}
