//! Content loading for question groups.
//!
//! Provides the collaborators the assembler reads from:
//! - [`ContentSource`] — eager snapshot of group documents and content files
//! - [`AuthorRegistry`] / [`GuideRegistry`] — whole-collection record lookups
//! - [`frontmatter`] — YAML frontmatter splitting and typed parsing
//!
//! Filesystem and in-memory implementations are provided for each contract.

pub mod frontmatter;
pub mod registry;
pub mod source;

pub use frontmatter::{parse_document, split_frontmatter};
pub use registry::{
    AuthorRegistry, FsAuthorRegistry, FsGuideRegistry, GuideRegistry, MemoryAuthorRegistry,
    MemoryGuideRegistry,
};
pub use source::{
    CONTENT_DIR, ContentSource, FsContentSource, MemoryContentSource, content_path, group_path,
};
