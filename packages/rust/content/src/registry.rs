//! Author and guide registries.
//!
//! Both registries are whole-collection loads: the pipeline calls
//! [`AuthorRegistry::get_all`] / [`GuideRegistry::get_all`] once per pass and
//! matches ids in memory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use qgroups_shared::{Author, AuthorFrontmatter, Guide, GuideFrontmatter, QGroupsError, Result};

use crate::frontmatter::parse_document;

/// Lookup contract for author records.
#[async_trait]
pub trait AuthorRegistry: Send + Sync {
    /// Every known author.
    async fn get_all(&self) -> Result<Vec<Author>>;

    /// The author with exactly this id, if any.
    async fn get_by_id(&self, id: &str) -> Result<Option<Author>> {
        Ok(self.get_all().await?.into_iter().find(|a| a.id == id))
    }
}

/// Lookup contract for guide records.
#[async_trait]
pub trait GuideRegistry: Send + Sync {
    /// Every known guide.
    async fn get_all(&self) -> Result<Vec<Guide>>;

    /// The guide with exactly this id, if any.
    async fn get_by_id(&self, id: &str) -> Result<Option<Guide>> {
        Ok(self.get_all().await?.into_iter().find(|g| g.id == id))
    }
}

// ---------------------------------------------------------------------------
// Filesystem registries
// ---------------------------------------------------------------------------

/// Authors stored as `<dir>/<id>.md` with an [`AuthorFrontmatter`] block.
#[derive(Debug, Clone)]
pub struct FsAuthorRegistry {
    dir: PathBuf,
}

impl FsAuthorRegistry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl AuthorRegistry for FsAuthorRegistry {
    #[instrument(skip_all, fields(dir = %self.dir.display()))]
    async fn get_all(&self) -> Result<Vec<Author>> {
        let records = load_records::<AuthorFrontmatter>(&self.dir).await?;
        Ok(records
            .into_iter()
            .map(|(id, frontmatter)| Author { id, frontmatter })
            .collect())
    }
}

/// Guides stored as `<dir>/<id>.md` with a [`GuideFrontmatter`] block.
#[derive(Debug, Clone)]
pub struct FsGuideRegistry {
    dir: PathBuf,
}

impl FsGuideRegistry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl GuideRegistry for FsGuideRegistry {
    #[instrument(skip_all, fields(dir = %self.dir.display()))]
    async fn get_all(&self) -> Result<Vec<Guide>> {
        let records = load_records::<GuideFrontmatter>(&self.dir).await?;
        Ok(records
            .into_iter()
            .map(|(id, frontmatter)| Guide { id, frontmatter })
            .collect())
    }
}

/// Load `(file stem, frontmatter)` pairs for every `.md` file in `dir`,
/// sorted by id. A missing directory is an empty registry.
async fn load_records<F: DeserializeOwned>(dir: &Path) -> Result<Vec<(String, F)>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "registry directory not found, treating as empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(QGroupsError::io(dir, e)),
    };

    let mut records = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| QGroupsError::io(dir, e))?
    {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }
        let Some(id) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };

        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| QGroupsError::io(&path, e))?;
        let doc = parse_document::<F>(&path.to_string_lossy(), &raw)?;
        records.push((id, doc.frontmatter));
    }

    records.sort_by(|a, b| a.0.cmp(&b.0));
    debug!(dir = %dir.display(), count = records.len(), "loaded registry records");
    Ok(records)
}

// ---------------------------------------------------------------------------
// In-memory registries
// ---------------------------------------------------------------------------

/// Fixed list of authors.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuthorRegistry(pub Vec<Author>);

#[async_trait]
impl AuthorRegistry for MemoryAuthorRegistry {
    async fn get_all(&self) -> Result<Vec<Author>> {
        Ok(self.0.clone())
    }
}

/// Fixed list of guides.
#[derive(Debug, Clone, Default)]
pub struct MemoryGuideRegistry(pub Vec<Guide>);

#[async_trait]
impl GuideRegistry for MemoryGuideRegistry {
    async fn get_all(&self) -> Result<Vec<Guide>> {
        Ok(self.0.clone())
    }
}
