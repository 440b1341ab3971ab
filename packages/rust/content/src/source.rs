//! Content source providers.
//!
//! A [`ContentSource`] hands the pipeline an eagerly loaded snapshot of the
//! question-group tree:
//!
//! ```text
//! <root>/
//! ├── backend/
//! │   ├── backend.md          group document (frontmatter + body)
//! │   └── content/
//! │       ├── race-condition.md
//! │       └── ending.md       long-form answers / ending text
//! └── frontend/
//!     └── frontend.md
//! ```
//!
//! Every key is `<base_dir>/<groupDir>/<file>` (or `.../content/<file>`) with
//! `/` separators, regardless of platform.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use qgroups_shared::{QGroupsError, QuestionGroupDocument, QuestionGroupFrontmatter, Result};

use crate::frontmatter::parse_document;

/// Name of the per-group directory holding long-form content.
pub const CONTENT_DIR: &str = "content";

/// Extension of group documents.
const GROUP_EXTENSION: &str = "md";

/// `<base>/<group_dir>/<file>`, the key of a group document.
pub fn group_path(base_dir: &str, group_dir: &str, file: &str) -> String {
    join_path(base_dir, &[group_dir, file])
}

/// `<base>/<group_dir>/content/<name>`, the key of a content file.
pub fn content_path(base_dir: &str, group_dir: &str, name: &str) -> String {
    join_path(base_dir, &[group_dir, CONTENT_DIR, name])
}

/// Join with `/`, never doubling the separator after `base_dir`.
fn join_path(base_dir: &str, parts: &[&str]) -> String {
    let mut path = base_dir.to_string();
    for part in parts {
        if !path.ends_with('/') {
            path.push('/');
        }
        path.push_str(part);
    }
    path
}

/// Eager provider of group documents and standalone content files.
pub trait ContentSource: Send + Sync {
    /// Prefix shared by every key this source returns.
    fn base_dir(&self) -> &str;

    /// Group documents at `<base>/<groupDir>/<file>.md`, keyed by path.
    fn question_groups(&self) -> Result<BTreeMap<String, QuestionGroupDocument>>;

    /// Raw text of every file at `<base>/<groupDir>/content/<name>`, keyed by path.
    ///
    /// Every UTF-8 file is included whatever its extension; the answer
    /// resolver decides which answers are file references.
    fn content_files(&self) -> Result<BTreeMap<String, String>>;
}

// ---------------------------------------------------------------------------
// Filesystem source
// ---------------------------------------------------------------------------

/// Reads the question-group tree from disk on every call.
#[derive(Debug, Clone)]
pub struct FsContentSource {
    root: PathBuf,
    base: String,
}

impl FsContentSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let base = root.to_string_lossy().replace('\\', "/");
        let base = match base.trim_end_matches('/') {
            "" => "/".to_string(),
            trimmed => trimmed.to_string(),
        };
        Self { root, base }
    }
}

impl ContentSource for FsContentSource {
    fn base_dir(&self) -> &str {
        &self.base
    }

    #[instrument(skip_all, fields(root = %self.root.display()))]
    fn question_groups(&self) -> Result<BTreeMap<String, QuestionGroupDocument>> {
        let mut docs = BTreeMap::new();

        for group_dir in list_dir(&self.root, EntryKind::Dir)? {
            let dir_path = self.root.join(&group_dir);
            for file in list_dir(&dir_path, EntryKind::File)? {
                let is_group_doc = Path::new(&file)
                    .extension()
                    .is_some_and(|ext| ext == GROUP_EXTENSION);
                if !is_group_doc {
                    continue;
                }

                let path = dir_path.join(&file);
                let raw = read_text(&path)?;
                let key = group_path(&self.base, &group_dir, &file);
                let doc = parse_document::<QuestionGroupFrontmatter>(&key, &raw)?;
                docs.insert(key, doc);
            }
        }

        debug!(count = docs.len(), "loaded question-group documents");
        Ok(docs)
    }

    #[instrument(skip_all, fields(root = %self.root.display()))]
    fn content_files(&self) -> Result<BTreeMap<String, String>> {
        let mut files = BTreeMap::new();

        for group_dir in list_dir(&self.root, EntryKind::Dir)? {
            let content_dir = self.root.join(&group_dir).join(CONTENT_DIR);
            if !content_dir.is_dir() {
                continue;
            }
            for file in list_dir(&content_dir, EntryKind::File)? {
                let path = content_dir.join(&file);
                let bytes = std::fs::read(&path).map_err(|e| QGroupsError::io(&path, e))?;
                match String::from_utf8(bytes) {
                    Ok(text) => {
                        files.insert(content_path(&self.base, &group_dir, &file), text);
                    }
                    Err(_) => debug!(path = %path.display(), "skipping non UTF-8 content file"),
                }
            }
        }

        debug!(count = files.len(), "loaded content files");
        Ok(files)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
}

/// Sorted names of the directory's entries of one kind.
fn list_dir(dir: &Path, kind: EntryKind) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| QGroupsError::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| QGroupsError::io(dir, e))?;
        let path = entry.path();
        let matches = match kind {
            EntryKind::Dir => path.is_dir(),
            EntryKind::File => path.is_file(),
        };
        if !matches {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => debug!(?name, "skipping non UTF-8 entry"),
        }
    }

    names.sort();
    Ok(names)
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| QGroupsError::io(path, e))
}

// ---------------------------------------------------------------------------
// In-memory source
// ---------------------------------------------------------------------------

/// A fixed snapshot held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentSource {
    base: String,
    groups: BTreeMap<String, QuestionGroupDocument>,
    files: BTreeMap<String, String>,
}

impl MemoryContentSource {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ..Self::default()
        }
    }

    /// Add a group document at `<base>/<group_dir>/<file>`.
    pub fn with_group(
        mut self,
        group_dir: &str,
        file: &str,
        frontmatter: QuestionGroupFrontmatter,
    ) -> Self {
        let key = group_path(&self.base, group_dir, file);
        self.groups.insert(
            key.clone(),
            QuestionGroupDocument {
                file: key,
                frontmatter,
                body: String::new(),
            },
        );
        self
    }

    /// Parse `raw` (frontmatter + body) and add it at `<base>/<group_dir>/<file>`.
    pub fn with_group_markdown(mut self, group_dir: &str, file: &str, raw: &str) -> Result<Self> {
        let key = group_path(&self.base, group_dir, file);
        let doc = parse_document::<QuestionGroupFrontmatter>(&key, raw)?;
        self.groups.insert(key, doc);
        Ok(self)
    }

    /// Add a content file at `<base>/<group_dir>/content/<name>`.
    pub fn with_content_file(mut self, group_dir: &str, name: &str, text: &str) -> Self {
        let key = content_path(&self.base, group_dir, name);
        self.files.insert(key, text.to_string());
        self
    }
}

impl ContentSource for MemoryContentSource {
    fn base_dir(&self) -> &str {
        &self.base
    }

    fn question_groups(&self) -> Result<BTreeMap<String, QuestionGroupDocument>> {
        Ok(self.groups.clone())
    }

    fn content_files(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.files.clone())
    }
}
