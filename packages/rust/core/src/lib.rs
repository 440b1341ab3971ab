//! Question-group resolution pipeline.
//!
//! Ties the content source and registries together: answers are resolved
//! against content files, topics are aggregated, related guides and authors
//! are attached, and the groups are sorted by display order.

pub mod answer;
pub mod assembler;
pub mod lookup;
pub mod related;
pub mod topics;

#[cfg(test)]
mod testing;

pub use answer::{AnswerResolver, MISSING_FILE_PREFIX, ResolvedAnswer};
pub use assembler::assemble_all;
pub use lookup::QuestionGroups;
pub use related::{guide_url, resolve_related_guides};
pub use topics::aggregate_topics;
