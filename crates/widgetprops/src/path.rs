//! Dot-delimited property paths.
//!
//! A property path addresses a possibly nested property of a widget:
//! `Text`, `Slot.Padding`, `Font.OutlineSettings.OutlineSize`. A segment may
//! also select one element of an array-like property with a bracketed index,
//! as in `Children[2].Visibility`.
//!
//! ## Rules
//!
//! - The path is not empty and contains no empty segments (`A..B`, `.A`, `A.`)
//! - Segments contain no whitespace and no stray brackets
//! - An index, if present, is a non-negative decimal integer closing the segment
//! - The number of segments is bounded by [`PropsConfig::max_path_depth`]
//!
//! Parsing is lossless: `Display` renders the exact text that was accepted.

use crate::config::PropsConfig;
use crate::error::{PropsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One step of a property path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    pub name: String,
    pub index: Option<usize>,
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.name, index),
            None => write!(f, "{}", self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertyPath {
    segments: Vec<PathSegment>,
}

impl PropertyPath {
    /// Parse with the default limits.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, &PropsConfig::default())
    }

    pub fn parse_with(text: &str, config: &PropsConfig) -> Result<Self> {
        if text.is_empty() {
            return Err(PropsError::invalid_path(text, "path is empty"));
        }

        let segments = text
            .split('.')
            .map(|raw| parse_segment(text, raw, config))
            .collect::<Result<Vec<_>>>()?;

        if segments.len() > config.max_path_depth {
            return Err(PropsError::invalid_path(
                text,
                format!(
                    "{} segments exceeds the maximum depth of {}",
                    segments.len(),
                    config.max_path_depth
                ),
            ));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    /// First segment. Paths are never empty.
    pub fn root(&self) -> &PathSegment {
        &self.segments[0]
    }

    /// Last segment. Paths are never empty.
    pub fn leaf(&self) -> &PathSegment {
        &self.segments[self.segments.len() - 1]
    }

    /// The path without its last segment, or `None` for a single-segment path.
    pub fn parent(&self) -> Option<PropertyPath> {
        if self.is_nested() {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        } else {
            None
        }
    }

    /// The same path with the last segment's index removed.
    ///
    /// `Children[2]` addresses one element of the `Children` property; the
    /// property that owns it is `Children`.
    pub fn without_leaf_index(&self) -> PropertyPath {
        let mut segments = self.segments.clone();
        if let Some(last) = segments.last_mut() {
            last.index = None;
        }
        Self { segments }
    }

    pub fn starts_with(&self, prefix: &PropertyPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

fn parse_segment(path: &str, raw: &str, config: &PropsConfig) -> Result<PathSegment> {
    if raw.is_empty() {
        return Err(PropsError::invalid_path(path, "empty segment"));
    }
    if let Some(ch) = raw.chars().find(|c| c.is_whitespace()) {
        return Err(PropsError::invalid_path(
            path,
            format!("segment '{}' contains whitespace ({:?})", raw, ch),
        ));
    }

    let Some(open) = raw.find('[') else {
        if raw.contains(']') {
            return Err(PropsError::invalid_path(
                path,
                format!("unmatched ']' in segment '{}'", raw),
            ));
        }
        return Ok(PathSegment {
            name: raw.to_string(),
            index: None,
        });
    };

    let name = &raw[..open];
    let Some(inner) = raw[open + 1..].strip_suffix(']') else {
        return Err(PropsError::invalid_path(
            path,
            format!("index in segment '{}' must close the segment", raw),
        ));
    };

    if name.is_empty() {
        return Err(PropsError::invalid_path(
            path,
            format!("segment '{}' has an index but no name", raw),
        ));
    }
    if !config.allow_indexed_segments {
        return Err(PropsError::invalid_path(
            path,
            "indexed segments are disabled",
        ));
    }
    if inner.is_empty() || !inner.chars().all(|c| c.is_ascii_digit()) {
        return Err(PropsError::invalid_path(
            path,
            format!("'{}' is not a valid index", inner),
        ));
    }

    let index = inner
        .parse::<usize>()
        .map_err(|e| PropsError::invalid_path(path, format!("'{}': {}", inner, e)))?;

    Ok(PathSegment {
        name: name.to_string(),
        index: Some(index),
    })
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for PropertyPath {
    type Err = PropsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PropertyPath {
    type Error = PropsError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<PropertyPath> for String {
    fn from(path: PropertyPath) -> Self {
        path.to_string()
    }
}
