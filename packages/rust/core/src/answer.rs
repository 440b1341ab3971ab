//! Answer resolution: inline answers vs. long-form content files.

use std::collections::BTreeMap;

use tracing::warn;

use qgroups_content::content_path;

/// Prefix of the placeholder returned for unresolvable content references.
pub const MISSING_FILE_PREFIX: &str = "File missing: ";

/// Final text of an answer and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAnswer {
    pub text: String,
    /// `true` when `text` was read from a content file.
    pub is_long_answer: bool,
}

/// Resolves answer fields against a pre-loaded index of content files.
#[derive(Debug, Clone, Copy)]
pub struct AnswerResolver<'a> {
    base_dir: &'a str,
    long_answer_suffix: &'a str,
    files: &'a BTreeMap<String, String>,
}

impl<'a> AnswerResolver<'a> {
    pub fn new(
        base_dir: &'a str,
        long_answer_suffix: &'a str,
        files: &'a BTreeMap<String, String>,
    ) -> Self {
        Self {
            base_dir,
            long_answer_suffix,
            files,
        }
    }

    /// Resolve one question's answer field.
    ///
    /// Fields that do not end with the long-form suffix are returned as-is.
    /// Otherwise the text of `<base>/<group_dir>/content/<answer>` is returned,
    /// or `"File missing: <path>"` when that file is not in the index.
    pub fn resolve(&self, group_dir: &str, answer: &str) -> ResolvedAnswer {
        if !answer.ends_with(self.long_answer_suffix) {
            return ResolvedAnswer {
                text: answer.to_string(),
                is_long_answer: false,
            };
        }

        ResolvedAnswer {
            text: self.read_content(group_dir, answer),
            is_long_answer: true,
        }
    }

    /// Resolve a group's closing text. No declared ending yields `""`.
    pub fn resolve_ending(&self, group_dir: &str, ending: Option<&str>) -> String {
        match ending {
            Some(name) => self.read_content(group_dir, name),
            None => String::new(),
        }
    }

    fn read_content(&self, group_dir: &str, name: &str) -> String {
        let path = content_path(self.base_dir, group_dir, name);
        match self.files.get(&path) {
            Some(text) => text.clone(),
            None => {
                warn!(%path, "referenced content file not found");
                format!("{MISSING_FILE_PREFIX}{path}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> BTreeMap<String, String> {
        let mut files = BTreeMap::new();
        files.insert(
            "/data/backend/content/race-condition.md".to_string(),
            "Two threads touch shared state.".to_string(),
        );
        files.insert(
            "/data/backend/content/ending.md".to_string(),
            "Good luck!".to_string(),
        );
        files
    }

    #[test]
    fn inline_answer_passes_through() {
        let files = index();
        let resolver = AnswerResolver::new("/data", ".md", &files);

        let answer = resolver.resolve("backend", "Yes");
        assert_eq!(answer.text, "Yes");
        assert!(!answer.is_long_answer);
    }

    #[test]
    fn long_answer_reads_content_file() {
        let files = index();
        let resolver = AnswerResolver::new("/data", ".md", &files);

        let answer = resolver.resolve("backend", "race-condition.md");
        assert_eq!(answer.text, "Two threads touch shared state.");
        assert!(answer.is_long_answer);
    }

    #[test]
    fn missing_long_answer_yields_placeholder() {
        let files = index();
        let resolver = AnswerResolver::new("/data", ".md", &files);

        let answer = resolver.resolve("backend", "deadlock.md");
        assert_eq!(answer.text, "File missing: /data/backend/content/deadlock.md");
        assert!(answer.is_long_answer);
    }

    #[test]
    fn files_are_scoped_to_their_group() {
        let files = index();
        let resolver = AnswerResolver::new("/data", ".md", &files);

        let answer = resolver.resolve("frontend", "race-condition.md");
        assert!(answer.text.starts_with(MISSING_FILE_PREFIX));
    }

    #[test]
    fn suffix_is_configurable() {
        let files = index();
        let resolver = AnswerResolver::new("/data", ".mdx", &files);

        let answer = resolver.resolve("backend", "race-condition.md");
        assert!(!answer.is_long_answer);
        assert_eq!(answer.text, "race-condition.md");
    }

    #[test]
    fn root_base_dir_is_not_doubled() {
        let mut files = BTreeMap::new();
        files.insert("/g/content/x.md".to_string(), "TEXT".to_string());
        let resolver = AnswerResolver::new("/", ".md", &files);

        let answer = resolver.resolve("g", "x.md");
        assert_eq!(answer.text, "TEXT");
        assert!(answer.is_long_answer);
    }

    #[test]
    fn ending_resolution() {
        let files = index();
        let resolver = AnswerResolver::new("/data", ".md", &files);

        assert_eq!(resolver.resolve_ending("backend", Some("ending.md")), "Good luck!");
        assert_eq!(resolver.resolve_ending("backend", None), "");
        assert_eq!(
            resolver.resolve_ending("backend", Some("outro.md")),
            "File missing: /data/backend/content/outro.md"
        );
    }
}
