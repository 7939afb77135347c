//! YAML frontmatter: locating the `---` block and reading or rewriting the
//! handful of keys the journal cares about. Unknown keys are kept in place.

use crate::error::JournalError;
use serde_yaml::{Mapping, Value};

pub const DELIMITER: &str = "---";

/// Borrowed pieces of a file that starts with a frontmatter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontmatterParts<'a> {
    /// Opening delimiter through closing delimiter, without the newline.
    pub block: &'a str,
    /// Lines between the delimiters.
    pub yaml: &'a str,
    /// Everything after the closing delimiter.
    pub rest: &'a str,
}

/// Find the frontmatter block. The first line must be `---` and the block
/// ends at the next line that is exactly `---`.
pub fn split_frontmatter(raw: &str) -> Option<FrontmatterParts<'_>> {
    let first_end = raw.find('\n')?;
    if raw[..first_end].trim_end() != DELIMITER {
        return None;
    }
    let yaml_start = first_end + 1;
    let mut offset = yaml_start;
    for line in raw[yaml_start..].split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Some(FrontmatterParts {
                block: &raw[..offset + DELIMITER.len()],
                yaml: &raw[yaml_start..offset],
                rest: &raw[offset + DELIMITER.len()..],
            });
        }
        offset += line.len();
    }
    None
}

/// Parsed frontmatter keys in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    map: Mapping,
}

impl Metadata {
    /// Lenient parse: anything malformed reads as empty metadata.
    pub fn parse(yaml: &str) -> Self {
        Self::parse_strict(yaml).unwrap_or_else(|err| {
            tracing::debug!(%err, "ignoring unparsable frontmatter");
            Self::default()
        })
    }

    /// Parse for commands that rewrite the block and must not lose keys.
    pub fn parse_strict(yaml: &str) -> Result<Self, JournalError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        match serde_yaml::from_str::<Value>(yaml) {
            Ok(Value::Mapping(map)) => Ok(Self { map }),
            Ok(Value::Null) => Ok(Self::default()),
            Ok(_) => Err(JournalError::BadFrontmatter(
                "expected a key/value block".to_string(),
            )),
            Err(e) => Err(JournalError::BadFrontmatter(e.to_string())),
        }
    }

    /// Metadata of a whole file, empty when there is no block.
    pub fn from_file_text(raw: &str) -> Self {
        split_frontmatter(raw).map(|p| Self::parse(p.yaml)).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn date(&self) -> Option<String> {
        self.map.get("date").and_then(scalar_string)
    }

    pub fn synthesised(&self) -> bool {
        match self.map.get("synthesised") {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    pub fn set_synthesised(&mut self, value: bool) {
        self.map.insert(Value::from("synthesised"), Value::Bool(value));
    }

    /// Tags as strings. A bare string value counts as a single tag.
    pub fn tags(&self) -> Vec<String> {
        match self.map.get("tags") {
            Some(Value::Sequence(items)) => {
                items.iter().filter_map(scalar_string).collect()
            }
            Some(value) => scalar_string(value)
                .filter(|s| !s.is_empty())
                .into_iter()
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn set_tags(&mut self, tags: &[String]) {
        let seq = tags.iter().map(|t| Value::from(t.as_str())).collect();
        self.map.insert(Value::from("tags"), Value::Sequence(seq));
    }

    /// Render as a full `---` block without a trailing newline.
    pub fn render(&self) -> Result<String, JournalError> {
        if self.map.is_empty() {
            return Ok(format!("{DELIMITER}\n{DELIMITER}"));
        }
        let yaml = serde_yaml::to_string(&self.map)
            .map_err(|e| JournalError::BadFrontmatter(e.to_string()))?;
        Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}"))
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Frontmatter written for a brand new entry.
pub fn new_entry_block(date: &str, tags: &[String]) -> String {
    if tags.is_empty() {
        format!("{DELIMITER}\ndate: {date}\nsynthesised: false\n{DELIMITER}\n")
    } else {
        format!(
            "{DELIMITER}\ndate: {date}\nsynthesised: false\ntags: [{}]\n{DELIMITER}\n",
            tags.join(", ")
        )
    }
}

/// Replace the metadata of a file, keeping the body byte for byte.
pub fn rewrite(raw: &str, meta: &Metadata) -> Result<String, JournalError> {
    let parts = split_frontmatter(raw).ok_or(JournalError::NoFrontmatter)?;
    Ok(format!("{}{}", meta.render()?, parts.rest))
}

/// Strictly parse the metadata of a file that must have a block.
pub fn read_strict(raw: &str) -> Result<Metadata, JournalError> {
    let parts = split_frontmatter(raw).ok_or(JournalError::NoFrontmatter)?;
    Metadata::parse_strict(parts.yaml)
}
