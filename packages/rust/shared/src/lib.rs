//! Shared types, error model, and configuration for the question-group pipeline.
//!
//! This crate is the foundation depended on by all other qgroups crates.
//! It provides:
//! - [`QGroupsError`] — the unified error type
//! - Domain types ([`QuestionGroup`], [`QuestionGroupFrontmatter`], [`Author`], [`Guide`])
//! - Configuration ([`AppConfig`], [`AssembleOptions`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, AssembleOptions, ContentConfig, ReferencesConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{QGroupsError, Result};
pub use types::{
    Author, AuthorFrontmatter, Document, GroupSummary, Guide, GuideFrontmatter, QuestionGroup,
    QuestionGroupDocument, QuestionGroupFrontmatter, RawQuestionEntry, ResolvedQuestion,
    SeoFrontmatter, SitemapFrontmatter,
};
