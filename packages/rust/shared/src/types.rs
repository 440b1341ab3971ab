//! Core domain types for question groups and their collaborators.
//!
//! Frontmatter structs mirror the camelCase keys authors write in the YAML
//! block of each document; resolved types are what the assembler produces.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A parsed content document: frontmatter plus the raw markdown body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<F> {
    /// Source path, in the same `/`-separated form used as the map key.
    pub file: String,
    /// Typed frontmatter block.
    pub frontmatter: F,
    /// Markdown body after the closing `---`.
    pub body: String,
}

/// A question-group source document.
pub type QuestionGroupDocument = Document<QuestionGroupFrontmatter>;

// ---------------------------------------------------------------------------
// QuestionGroupFrontmatter
// ---------------------------------------------------------------------------

/// Metadata declared at the top of a question-group document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionGroupFrontmatter {
    /// Display order; the collection is sorted ascending by this value.
    pub order: i64,
    pub brief_title: String,
    pub brief_description: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    /// Publish date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub seo: SeoFrontmatter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_title: Option<String>,
    /// Guide id whose matches populate [`QuestionGroup::related_guides`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_guides_id: Option<String>,
    pub sitemap: SitemapFrontmatter,
    #[serde(default)]
    pub questions: Vec<RawQuestionEntry>,
    /// Filename of the closing content, relative to the group's `content/` dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending: Option<String>,
}

/// `seo:` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoFrontmatter {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image_url: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// `sitemap:` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapFrontmatter {
    pub priority: f32,
    pub changefreq: String,
}

/// One entry of the `questions:` list, as written by the author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawQuestionEntry {
    pub question: String,
    /// Inline answer text, or a filename under `content/` when it carries the
    /// long-form suffix.
    pub answer: String,
    /// Topic tags. A missing or null list reads as empty; null items read as
    /// empty strings so positions are kept.
    #[serde(default, deserialize_with = "deserialize_topics")]
    pub topics: Vec<String>,
}

fn deserialize_topics<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

// ---------------------------------------------------------------------------
// Authors & guides
// ---------------------------------------------------------------------------

/// An author record from the author registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub frontmatter: AuthorFrontmatter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorFrontmatter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A guide record from the guide registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub id: String,
    pub frontmatter: GuideFrontmatter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideFrontmatter {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved model
// ---------------------------------------------------------------------------

/// A question after answer resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedQuestion {
    /// Lowercase slug of the question text.
    pub id: String,
    pub question: String,
    pub answer: String,
    /// `true` when the answer text came from a file under `content/`.
    pub is_long_answer: bool,
    pub topics: Vec<String>,
}

/// A fully resolved question group, one per source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionGroup {
    /// Source filename without its extension.
    pub id: String,
    pub file: String,
    pub frontmatter: QuestionGroupFrontmatter,
    pub questions: Vec<ResolvedQuestion>,
    /// Unique topics across all questions, in first-seen order.
    pub all_topics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    /// Guide title → `/guides/<id>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_guides: Option<BTreeMap<String, String>>,
    /// Closing text; empty when the group declares no ending.
    pub ending: String,
}

/// Lightweight projection returned by bulk lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub id: String,
    pub title: String,
    /// `"<N> Questions"`.
    pub description: String,
}
