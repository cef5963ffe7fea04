//! Catalog lookup collaborator and the file-backed catalog service

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use shared::{CatalogEntry, CatalogIndex, CatalogKey, CatalogMetadata};
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};

/// Resolves external item codes to catalog keys; read-only
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn resolve(&self, code: &str) -> AppResult<Option<CatalogKey>>;

    async fn lookup_metadata(&self, key: &CatalogKey) -> AppResult<Option<CatalogMetadata>>;
}

/// Catalog service holding the current index with an explicit load/refresh lifecycle
#[derive(Clone)]
pub struct CatalogService {
    index: Arc<RwLock<Arc<CatalogIndex>>>,
    source: Option<PathBuf>,
}

/// One row of a catalog CSV export
#[derive(Debug, Deserialize)]
struct CsvCatalogRow {
    manufacturer: String,
    code: String,
    name: String,
    #[serde(default)]
    manufacturer_description: Option<String>,
    #[serde(default)]
    synonyms: Option<String>,
    #[serde(default)]
    tags: Option<String>,
}

impl CatalogService {
    /// A service with an empty catalog and no backing file
    pub fn empty() -> Self {
        Self::from_index(CatalogIndex::default())
    }

    pub fn from_index(index: CatalogIndex) -> Self {
        Self {
            index: Arc::new(RwLock::new(Arc::new(index))),
            source: None,
        }
    }

    /// Load the catalog from a `.json` or `.csv` file
    pub async fn load(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let index = Self::read_catalog_file(&path).await?;
        tracing::info!("Loaded {} catalog entries from {}", index.len(), path.display());

        Ok(Self {
            index: Arc::new(RwLock::new(Arc::new(index))),
            source: Some(path),
        })
    }

    /// Re-read the backing file and swap in the new index.
    ///
    /// Readers holding an older snapshot keep it until they drop it.
    pub async fn refresh(&self) -> AppResult<usize> {
        let Some(path) = &self.source else {
            return Err(AppError::Catalog(
                "catalog has no backing file to refresh from".to_string(),
            ));
        };

        let index = Self::read_catalog_file(path).await?;
        let count = index.len();
        *self.index.write().await = Arc::new(index);

        tracing::info!("Refreshed catalog: {} entries", count);
        Ok(count)
    }

    /// Current index, cheap to clone and safe to hold across awaits
    pub async fn snapshot(&self) -> Arc<CatalogIndex> {
        self.index.read().await.clone()
    }

    async fn read_catalog_file(path: &Path) -> AppResult<CatalogIndex> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Catalog(format!("cannot read {}: {}", path.display(), e)))?;

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            Self::parse_csv(&text)
        } else {
            CatalogIndex::from_json(&text)
                .map_err(|e| AppError::Catalog(format!("invalid catalog JSON: {}", e)))
        }
    }

    /// Parse a catalog CSV with a `manufacturer,code,name,...` header.
    ///
    /// Keys are derived as "{manufacturer}-{code}".
    pub fn parse_csv(text: &str) -> AppResult<CatalogIndex> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let mut entries = Vec::new();
        for (line, row) in reader.deserialize::<CsvCatalogRow>().enumerate() {
            let row = row.map_err(|e| {
                AppError::Catalog(format!("invalid catalog CSV row {}: {}", line + 2, e))
            })?;

            if row.manufacturer.is_empty() || row.code.is_empty() {
                tracing::warn!("Skipping catalog CSV row {} without manufacturer/code", line + 2);
                continue;
            }

            let tags = row
                .tags
                .as_deref()
                .map(|t| {
                    t.split(',')
                        .map(|tag| tag.trim().trim_matches('"').to_string())
                        .filter(|tag| !tag.is_empty())
                        .collect()
                })
                .unwrap_or_default();

            entries.push(CatalogEntry {
                id: CatalogKey::from_parts(&row.manufacturer, &row.code),
                code: row.code,
                manufacturer: row.manufacturer,
                name: row.name,
                description: row.manufacturer_description,
                synonyms: row.synonyms,
                tags,
            });
        }

        Ok(CatalogIndex::from_entries(entries))
    }
}

#[async_trait]
impl CatalogLookup for CatalogService {
    async fn resolve(&self, code: &str) -> AppResult<Option<CatalogKey>> {
        Ok(self.index.read().await.resolve(code))
    }

    async fn lookup_metadata(&self, key: &CatalogKey) -> AppResult<Option<CatalogMetadata>> {
        Ok(self.index.read().await.metadata(key.as_str()))
    }
}
