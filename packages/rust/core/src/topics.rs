//! Topic aggregation across a group's questions.

use std::collections::HashSet;

use qgroups_shared::ResolvedQuestion;

/// Unique, non-empty topics of all `questions`, in first-seen order.
pub fn aggregate_topics(questions: &[ResolvedQuestion]) -> Vec<String> {
    dedup_topics(questions.iter().map(|q| q.topics.as_slice()))
}

/// Flatten topic lists, dropping empty entries and repeats.
///
/// Order is that of first occurrence across all lists, not per list.
pub fn dedup_topics<'a, I>(lists: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut seen = HashSet::new();
    let mut topics = Vec::new();

    for topic in lists.into_iter().flatten() {
        if topic.is_empty() {
            continue;
        }
        if seen.insert(topic.as_str()) {
            topics.push(topic.clone());
        }
    }

    topics
}
