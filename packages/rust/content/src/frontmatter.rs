//! YAML frontmatter extraction.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use qgroups_shared::{Document, QGroupsError, Result};

/// Leading `---` block, optional content, closing `---` on its own line.
static FRONTMATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)").expect("valid regex")
});

/// Split a document into its frontmatter YAML and the remaining body.
///
/// Returns `None` when the input does not open with a `---` block.
pub fn split_frontmatter(input: &str) -> Option<(&str, &str)> {
    let caps = FRONTMATTER_RE.captures(input)?;
    let yaml = caps.get(1).map_or("", |m| m.as_str());
    let end = caps.get(0)?.end();
    Some((yaml, &input[end..]))
}

/// Parse a markdown document with a typed frontmatter block.
///
/// `file` is only used for error messages and is stored on the result.
pub fn parse_document<F: DeserializeOwned>(file: &str, input: &str) -> Result<Document<F>> {
    let (yaml, body) = split_frontmatter(input)
        .ok_or_else(|| QGroupsError::parse(format!("{file}: missing frontmatter block")))?;

    let frontmatter = serde_yaml::from_str(yaml)
        .map_err(|e| QGroupsError::parse(format!("{file}: invalid frontmatter: {e}")))?;

    Ok(Document {
        file: file.to_string(),
        frontmatter,
        body: body.to_string(),
    })
}
