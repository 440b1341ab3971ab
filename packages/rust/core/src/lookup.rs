//! Read-only query surface over the assembled question groups.
//!
//! Every call re-runs the pipeline against the content source; nothing is
//! cached between calls, so edits to the content tree show up immediately.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, instrument};

use qgroups_content::{AuthorRegistry, ContentSource, GuideRegistry};
use qgroups_shared::{AssembleOptions, GroupSummary, QuestionGroup, Result};

use crate::assembler::{assemble_all, group_id};

/// Entry point for reading question groups.
#[derive(Clone)]
pub struct QuestionGroups {
    source: Arc<dyn ContentSource>,
    authors: Arc<dyn AuthorRegistry>,
    guides: Arc<dyn GuideRegistry>,
    options: AssembleOptions,
}

impl QuestionGroups {
    pub fn new(
        source: Arc<dyn ContentSource>,
        authors: Arc<dyn AuthorRegistry>,
        guides: Arc<dyn GuideRegistry>,
    ) -> Self {
        Self {
            source,
            authors,
            guides,
            options: AssembleOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AssembleOptions) -> Self {
        self.options = options;
        self
    }

    /// All groups, fully resolved and sorted by `order`.
    pub async fn get_all_question_groups(&self) -> Result<Vec<QuestionGroup>> {
        assemble_all(
            self.source.as_ref(),
            self.authors.as_ref(),
            self.guides.as_ref(),
            &self.options,
        )
        .await
    }

    /// The group with exactly this id, or `None`.
    #[instrument(skip(self))]
    pub async fn get_question_group_by_id(&self, id: &str) -> Result<Option<QuestionGroup>> {
        let group = self
            .get_all_question_groups()
            .await?
            .into_iter()
            .find(|g| g.id == id);

        if group.is_none() {
            debug!("question group not found");
        }
        Ok(group)
    }

    /// Summaries of the groups whose id is in `ids`.
    ///
    /// Reads only group frontmatter: content files, authors, and guides are
    /// never loaded. Results follow source-path order.
    #[instrument(skip_all, fields(requested = ids.len()))]
    pub async fn get_question_groups_by_ids<S: AsRef<str>>(
        &self,
        ids: &[S],
    ) -> Result<Vec<GroupSummary>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let wanted: HashSet<&str> = ids.iter().map(AsRef::as_ref).collect();
        let mut summaries = Vec::new();

        for (path, doc) in self.source.question_groups()? {
            let id = group_id(&path)?;
            if !wanted.contains(id.as_str()) {
                continue;
            }
            summaries.push(GroupSummary {
                title: doc.frontmatter.brief_title,
                description: format!("{} Questions", doc.frontmatter.questions.len()),
                id,
            });
        }

        debug!(found = summaries.len(), "resolved group summaries");
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::testing::{author, frontmatter, guide, question};
    use qgroups_content::{MemoryAuthorRegistry, MemoryContentSource, MemoryGuideRegistry};
    use qgroups_shared::QuestionGroupDocument;

    /// Delegates to a memory source and counts loads.
    struct CountingSource {
        inner: MemoryContentSource,
        group_loads: AtomicUsize,
        file_loads: AtomicUsize,
    }

    impl ContentSource for CountingSource {
        fn base_dir(&self) -> &str {
            self.inner.base_dir()
        }

        fn question_groups(&self) -> Result<BTreeMap<String, QuestionGroupDocument>> {
            self.group_loads.fetch_add(1, Ordering::SeqCst);
            self.inner.question_groups()
        }

        fn content_files(&self) -> Result<BTreeMap<String, String>> {
            self.file_loads.fetch_add(1, Ordering::SeqCst);
            self.inner.content_files()
        }
    }

    fn fixture() -> (Arc<CountingSource>, QuestionGroups) {
        let mut backend = frontmatter(2);
        backend.brief_title = "Backend".into();
        backend.author_id = Some("jdoe".into());
        backend.questions = vec![
            question("Is HTTP stateless?", "Yes", &["basics"]),
            question("What is a race condition?", "race.md", &["concurrency"]),
        ];

        let mut frontend = frontmatter(1);
        frontend.brief_title = "Frontend".into();
        frontend.questions = vec![question("What is the DOM?", "A tree.", &[])];

        let mut devops = frontmatter(3);
        devops.brief_title = "DevOps".into();

        let inner = MemoryContentSource::new("/data")
            .with_group("backend", "backend.md", backend)
            .with_group("frontend", "frontend.md", frontend)
            .with_group("devops", "devops.md", devops)
            .with_content_file("backend", "race.md", "Unsynchronized access.");

        let source = Arc::new(CountingSource {
            inner,
            group_loads: AtomicUsize::new(0),
            file_loads: AtomicUsize::new(0),
        });

        let facade = QuestionGroups::new(
            source.clone(),
            Arc::new(MemoryAuthorRegistry(vec![author("jdoe", "Jane Doe")])),
            Arc::new(MemoryGuideRegistry(vec![guide("http", "HTTP Basics")])),
        );

        (source, facade)
    }

    #[tokio::test]
    async fn get_all_returns_sorted_groups() {
        let (_, facade) = fixture();
        let groups = facade.get_all_question_groups().await.unwrap();

        let ids: Vec<_> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["frontend", "backend", "devops"]);
    }

    #[tokio::test]
    async fn get_by_id_finds_resolved_group() {
        let (_, facade) = fixture();
        let group = facade
            .get_question_group_by_id("backend")
            .await
            .unwrap()
            .expect("backend group");

        assert_eq!(group.questions[1].answer, "Unsynchronized access.");
        assert_eq!(group.author.map(|a| a.id), Some("jdoe".to_string()));
    }

    #[tokio::test]
    async fn get_by_id_missing_is_none() {
        let (_, facade) = fixture();
        let group = facade.get_question_group_by_id("missing-id").await.unwrap();
        assert!(group.is_none());
    }

    #[tokio::test]
    async fn every_call_reloads_content() {
        let (source, facade) = fixture();
        facade.get_all_question_groups().await.unwrap();
        facade.get_question_group_by_id("backend").await.unwrap();

        assert_eq!(source.group_loads.load(Ordering::SeqCst), 2);
        assert_eq!(source.file_loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn get_by_ids_empty_touches_nothing() {
        let (source, facade) = fixture();
        let empty: [&str; 0] = [];
        let summaries = facade.get_question_groups_by_ids(&empty).await.unwrap();

        assert!(summaries.is_empty());
        assert_eq!(source.group_loads.load(Ordering::SeqCst), 0);
        assert_eq!(source.file_loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn get_by_ids_projects_summaries_without_content_files() {
        let (source, facade) = fixture();
        let summaries = facade
            .get_question_groups_by_ids(&["backend", "devops", "unknown"])
            .await
            .unwrap();

        assert_eq!(
            summaries,
            vec![
                GroupSummary {
                    id: "backend".into(),
                    title: "Backend".into(),
                    description: "2 Questions".into(),
                },
                GroupSummary {
                    id: "devops".into(),
                    title: "DevOps".into(),
                    description: "0 Questions".into(),
                },
            ]
        );
        assert_eq!(source.group_loads.load(Ordering::SeqCst), 1);
        assert_eq!(source.file_loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn get_by_ids_accepts_owned_strings() {
        let (_, facade) = fixture();
        let ids = vec!["frontend".to_string()];
        let summaries = facade.get_question_groups_by_ids(&ids).await.unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].description, "1 Questions");
    }
}
