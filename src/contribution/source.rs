use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RegistryError;

// ============================================================================
// Source documents
// ============================================================================

/// Encoding of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// `output.<namespace> = { ... }` elements script
    Maestro,
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "js" => Some(DocumentFormat::Maestro),
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Raw text of one authored document plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub locator: String,
    pub format: DocumentFormat,
    pub text: String,
}

impl SourceDocument {
    pub fn new(locator: impl Into<String>, format: DocumentFormat, text: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            format,
            text: text.into(),
        }
    }
}

// ============================================================================
// Source trait
// ============================================================================

/// Anything that can hand the loader an ordered list of documents.
///
/// Document order is discovery order and decides merge precedence, so
/// implementations must return the same order for the same input.
pub trait ContributionSource {
    /// Short human-readable description, used in logs and reports.
    fn describe(&self) -> String;

    fn read_documents(&self) -> Result<Vec<SourceDocument>, RegistryError>;
}

// ============================================================================
// Directory / file source
// ============================================================================

/// Reads a single file, or every supported file under a directory.
///
/// Directories are walked recursively and files are visited in byte-wise
/// sorted path order. Symlinked directories are followed, but each physical
/// directory is walked once. Files with an unsupported extension inside a
/// directory are skipped.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContributionSource for DirectorySource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn read_documents(&self) -> Result<Vec<SourceDocument>, RegistryError> {
        let metadata = std::fs::metadata(&self.root).map_err(|e| RegistryError::io(&self.root, e))?;

        if !metadata.is_dir() {
            let format = DocumentFormat::from_path(&self.root).ok_or_else(|| {
                RegistryError::malformed(self.describe(), "unsupported file extension (expected .js, .json, .yaml or .yml)")
            })?;
            return Ok(vec![read_file(&self.root, format)?]);
        }

        let mut files = Vec::new();
        let mut visited = BTreeSet::new();
        collect_files(&self.root, &mut visited, &mut files)?;
        files.sort_by(|a, b| a.as_os_str().as_encoded_bytes().cmp(b.as_os_str().as_encoded_bytes()));

        let mut documents = Vec::with_capacity(files.len());
        for path in files {
            match DocumentFormat::from_path(&path) {
                Some(format) => documents.push(read_file(&path, format)?),
                None => debug!(path = %path.display(), "skipping file with unsupported extension"),
            }
        }
        Ok(documents)
    }
}

fn collect_files(
    dir: &Path,
    visited: &mut BTreeSet<PathBuf>,
    out: &mut Vec<PathBuf>,
) -> Result<(), RegistryError> {
    let canonical = std::fs::canonicalize(dir).map_err(|e| RegistryError::io(dir, e))?;
    if !visited.insert(canonical) {
        debug!(path = %dir.display(), "skipping directory already walked");
        return Ok(());
    }

    let entries = std::fs::read_dir(dir).map_err(|e| RegistryError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| RegistryError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| RegistryError::io(&path, e))?;

        let is_dir = if file_type.is_symlink() {
            // dangling links surface as read errors on the file itself
            std::fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false)
        } else {
            file_type.is_dir()
        };

        if is_dir {
            collect_files(&path, visited, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

fn read_file(path: &Path, format: DocumentFormat) -> Result<SourceDocument, RegistryError> {
    let text = std::fs::read_to_string(path).map_err(|e| RegistryError::io(path, e))?;
    Ok(SourceDocument::new(path.display().to_string(), format, text))
}

// ============================================================================
// Embedded source
// ============================================================================

/// In-memory documents, e.g. tables bundled with `include_str!`.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedSource {
    documents: Vec<SourceDocument>,
}

impl EmbeddedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(
        mut self,
        locator: impl Into<String>,
        format: DocumentFormat,
        text: impl Into<String>,
    ) -> Self {
        self.documents.push(SourceDocument::new(locator, format, text));
        self
    }
}

impl ContributionSource for EmbeddedSource {
    fn describe(&self) -> String {
        format!("embedded ({} documents)", self.documents.len())
    }

    fn read_documents(&self) -> Result<Vec<SourceDocument>, RegistryError> {
        Ok(self.documents.clone())
    }
}

// ============================================================================
// HTTP source
// ============================================================================

/// Fetches documents from URLs, in the order given.
///
/// The format comes from the URL path's extension and defaults to JSON.
pub struct HttpSource {
    urls: Vec<String>,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            urls,
            client: reqwest::blocking::Client::new(),
        }
    }

    fn fetch(&self, url: &str) -> Result<SourceDocument, RegistryError> {
        let fetch_error = |reason: String| RegistryError::Fetch {
            url: url.to_string(),
            reason,
        };

        let response = self.client.get(url).send().map_err(|e| fetch_error(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {}", status)));
        }
        let text = response.text().map_err(|e| fetch_error(e.to_string()))?;

        Ok(SourceDocument::new(url, format_for_url(url), text))
    }
}

impl ContributionSource for HttpSource {
    fn describe(&self) -> String {
        self.urls.join(", ")
    }

    fn read_documents(&self) -> Result<Vec<SourceDocument>, RegistryError> {
        self.urls.iter().map(|url| self.fetch(url)).collect()
    }
}

/// Pick a document format from a URL's path extension.
pub fn format_for_url(url: &str) -> DocumentFormat {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let last_segment = path.rsplit('/').next().unwrap_or(path);
    last_segment
        .rsplit_once('.')
        .and_then(|(_, ext)| DocumentFormat::from_extension(ext))
        .unwrap_or(DocumentFormat::Json)
}

// ============================================================================
// Composite source
// ============================================================================

/// Several sources read back to back; earlier sources are discovered first.
#[derive(Default)]
pub struct MultiSource {
    sources: Vec<Box<dyn ContributionSource>>,
}

impl MultiSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: Box<dyn ContributionSource>) {
        self.sources.push(source);
    }

    /// Build from config/CLI locators: `http(s)://` URLs become an
    /// [`HttpSource`], anything else a [`DirectorySource`].
    pub fn from_locators(locators: &[String]) -> Self {
        let mut multi = Self::new();
        for locator in locators {
            if is_url(locator) {
                multi.push(Box::new(HttpSource::new(vec![locator.clone()])));
            } else {
                multi.push(Box::new(DirectorySource::new(locator)));
            }
        }
        multi
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl ContributionSource for MultiSource {
    fn describe(&self) -> String {
        self.sources
            .iter()
            .map(|s| s.describe())
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn read_documents(&self) -> Result<Vec<SourceDocument>, RegistryError> {
        let mut documents = Vec::new();
        for source in &self.sources {
            documents.extend(source.read_documents()?);
        }
        Ok(documents)
    }
}

pub fn is_url(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}
