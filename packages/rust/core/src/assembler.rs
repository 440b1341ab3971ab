//! Question-group assembler.
//!
//! Takes the loaded group documents, content files, authors, and guides,
//! then produces one resolved [`QuestionGroup`] per document, sorted by
//! `frontmatter.order`.

use std::collections::BTreeMap;

use tracing::{debug, info, instrument};

use qgroups_content::{AuthorRegistry, ContentSource, GuideRegistry};
use qgroups_shared::{
    AssembleOptions, Author, Guide, QGroupsError, QuestionGroup, QuestionGroupDocument,
    ResolvedQuestion, Result,
};

use crate::answer::AnswerResolver;
use crate::related::resolve_related_guides;
use crate::topics::aggregate_topics;

/// Everything a single group needs to resolve, loaded once per pass.
struct AssembleContext<'a> {
    answers: AnswerResolver<'a>,
    authors: &'a [Author],
    guides: &'a [Guide],
    strict: bool,
}

/// Run one full assembly pass.
///
/// Loads documents and content files from `source`, awaits the author and
/// guide registries once each, resolves every group, then sorts ascending by
/// `order`. The sort is stable: equal orders keep source-path order.
#[instrument(skip_all, fields(base = %source.base_dir()))]
pub async fn assemble_all(
    source: &dyn ContentSource,
    authors: &dyn AuthorRegistry,
    guides: &dyn GuideRegistry,
    options: &AssembleOptions,
) -> Result<Vec<QuestionGroup>> {
    let documents = source.question_groups()?;
    let files = source.content_files()?;

    let all_authors = authors.get_all().await?;
    let all_guides = guides.get_all().await?;

    let ctx = AssembleContext {
        answers: AnswerResolver::new(source.base_dir(), &options.long_answer_suffix, &files),
        authors: &all_authors,
        guides: &all_guides,
        strict: options.strict_references,
    };

    let mut groups = documents
        .iter()
        .map(|(path, doc)| assemble_group(path, doc, &ctx))
        .collect::<Result<Vec<_>>>()?;

    groups.sort_by_key(|g| g.frontmatter.order);

    info!(
        groups = groups.len(),
        content_files = files.len(),
        "question groups assembled"
    );

    Ok(groups)
}

/// Resolve one group document.
fn assemble_group(
    path: &str,
    doc: &QuestionGroupDocument,
    ctx: &AssembleContext<'_>,
) -> Result<QuestionGroup> {
    let (group_dir, file_name) = split_source_path(path)?;
    let id = strip_extension(file_name).to_string();
    let fm = &doc.frontmatter;

    let questions: Vec<ResolvedQuestion> = fm
        .questions
        .iter()
        .map(|entry| {
            let answer = ctx.answers.resolve(group_dir, &entry.answer);
            ResolvedQuestion {
                id: question_id(&entry.question),
                question: entry.question.clone(),
                answer: answer.text,
                is_long_answer: answer.is_long_answer,
                topics: entry.topics.clone(),
            }
        })
        .collect();

    let all_topics = aggregate_topics(&questions);

    let related_guides = resolve_related_guides(fm.related_guides_id.as_deref(), ctx.guides);
    if let (Some(guide_id), Some(related)) = (&fm.related_guides_id, &related_guides) {
        if related.is_empty() {
            if ctx.strict {
                return Err(QGroupsError::reference(format!(
                    "{path}: related guide `{guide_id}` not found"
                )));
            }
            debug!(%id, %guide_id, "related guide not found");
        }
    }

    let ending = ctx.answers.resolve_ending(group_dir, fm.ending.as_deref());

    let author = match fm.author_id.as_deref() {
        Some(author_id) => {
            let found = ctx.authors.iter().find(|a| a.id == author_id).cloned();
            if found.is_none() {
                if ctx.strict {
                    return Err(QGroupsError::reference(format!(
                        "{path}: author `{author_id}` not found"
                    )));
                }
                debug!(%id, %author_id, "author not found");
            }
            found
        }
        None => None,
    };

    debug!(
        %id,
        questions = questions.len(),
        topics = all_topics.len(),
        "resolved question group"
    );

    Ok(QuestionGroup {
        id,
        file: doc.file.clone(),
        frontmatter: fm.clone(),
        questions,
        all_topics,
        author,
        related_guides,
        ending,
    })
}

/// Stable identifier of a question: its lowercase slug.
pub fn question_id(question: &str) -> String {
    slug::slugify(question)
}

/// Group identifier for a source path: the filename without its extension.
pub fn group_id(path: &str) -> Result<String> {
    let (_, file_name) = split_source_path(path)?;
    Ok(strip_extension(file_name).to_string())
}

/// `<...>/<groupDir>/<file>` → `(groupDir, file)`.
fn split_source_path(path: &str) -> Result<(&str, &str)> {
    let mut parts = path.rsplit('/');
    let file_name = parts.next().filter(|s| !s.is_empty());
    let group_dir = parts.next().filter(|s| !s.is_empty());

    match (group_dir, file_name) {
        (Some(dir), Some(file)) => Ok((dir, file)),
        _ => Err(QGroupsError::validation(format!(
            "unexpected question-group path `{path}`, expected <root>/<group>/<file>"
        ))),
    }
}

fn strip_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
