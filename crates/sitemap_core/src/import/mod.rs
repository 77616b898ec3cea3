//! URL import collaborator contract and lifecycle tickets.
//!
//! # Responsibility
//! - Define the injectable `ImportSource` capability.
//! - Parse and validate import URLs before any state changes.
//! - Carry one in-flight import from the store to its completion.
//!
//! # Invariants
//! - Pending fetch futures own their inputs and never borrow the store.
//! - A malformed URL never reaches an import source.
//! - Dropping an unsettled `PendingImport` or `FetchedImport` frees the
//!   store's in-flight slot.

pub mod demo;
pub(crate) mod slot;

use crate::model::note::{Connection, Note};
use slot::ImportClaim;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use url::Url;

pub use demo::DemoImportSource;

/// One batch of pages produced by an import source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteBatch {
    pub notes: Vec<Note>,
    pub connections: Vec<Connection>,
}

/// How an imported batch lands in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Imported notes replace the current map.
    #[default]
    Replace,
    /// Imported notes are added next to the current map.
    Append,
}

impl ImportMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Append => "append",
        }
    }
}

/// Import failures. All are recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// URL could not be parsed or has no host.
    InvalidUrl { url: String, reason: String },
    /// Another import is still in flight.
    AlreadyImporting,
    /// Completion does not belong to the import currently in flight.
    StaleImport,
    /// The import source rejected the request.
    Fetch(String),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUrl { url, reason } => write!(f, "invalid import url `{url}`: {reason}"),
            Self::AlreadyImporting => write!(f, "an import is already in progress"),
            Self::StaleImport => write!(f, "import completion does not match the active import"),
            Self::Fetch(message) => write!(f, "import failed: {message}"),
        }
    }
}

impl Error for ImportError {}

/// Capability that turns a site URL into a page batch.
pub trait ImportSource: Send + Sync {
    fn fetch_site_structure(&self, url: Url) -> BoxFuture<'static, Result<SiteBatch, ImportError>>;
}

/// Parses an import URL and requires a host.
pub fn parse_import_url(raw: &str) -> Result<Url, ImportError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|err| ImportError::InvalidUrl {
        url: trimmed.to_string(),
        reason: err.to_string(),
    })?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ImportError::InvalidUrl {
            url: trimmed.to_string(),
            reason: "url has no host".to_string(),
        });
    }
    Ok(url)
}

/// Import started by the store and not yet fetched.
pub struct PendingImport {
    pub(crate) claim: ImportClaim,
    url: Url,
    fetch: BoxFuture<'static, Result<SiteBatch, ImportError>>,
}

impl PendingImport {
    pub(crate) fn new(
        claim: ImportClaim,
        url: Url,
        fetch: BoxFuture<'static, Result<SiteBatch, ImportError>>,
    ) -> Self {
        Self { claim, url, fetch }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Drives the source to completion. The store stays usable meanwhile.
    pub async fn fetch(self) -> FetchedImport {
        let result = self.fetch.await;
        FetchedImport {
            claim: self.claim,
            url: self.url,
            result,
        }
    }
}

impl std::fmt::Debug for PendingImport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingImport")
            .field("ticket", &self.claim.ticket())
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}

/// Settled fetch waiting to be applied by the store.
#[derive(Debug)]
pub struct FetchedImport {
    pub(crate) claim: ImportClaim,
    url: Url,
    pub(crate) result: Result<SiteBatch, ImportError>,
}

impl FetchedImport {
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// What a successful import changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub mode: ImportMode,
    pub notes_added: usize,
    pub connections_added: usize,
    /// Imported notes whose id collided with the map and received a fresh one.
    pub rekeyed: usize,
    /// Later batch notes that repeated an earlier batch id.
    pub duplicates_dropped: usize,
}

#[cfg(test)]
mod tests {
    use super::{parse_import_url, ImportError};

    #[test]
    fn parse_accepts_http_urls() {
        let url = parse_import_url("  https://example.com/about ").expect("url should parse");
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn parse_rejects_malformed_and_hostless_urls() {
        assert!(matches!(
            parse_import_url("not a url"),
            Err(ImportError::InvalidUrl { .. })
        ));
        let err = parse_import_url("mailto:someone").expect_err("hostless url must fail");
        assert!(err.to_string().contains("no host"));
    }
}
