//! Simulated import source with a canned, host-derived page set.

use crate::geometry::Point;
use crate::import::{ImportError, ImportSource, SiteBatch};
use crate::model::note::{Connection, Note};
use futures::future::{BoxFuture, FutureExt};
use std::time::Duration;
use url::Url;

/// Latency used by the interactive demo.
pub const DEFAULT_DEMO_LATENCY: Duration = Duration::from_millis(2000);

/// Import source that waits `latency`, then returns three fixed pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoImportSource {
    latency: Duration,
}

impl Default for DemoImportSource {
    fn default() -> Self {
        Self::new(DEFAULT_DEMO_LATENCY)
    }
}

impl DemoImportSource {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Source that resolves without touching a timer.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl ImportSource for DemoImportSource {
    fn fetch_site_structure(&self, url: Url) -> BoxFuture<'static, Result<SiteBatch, ImportError>> {
        let latency = self.latency;
        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            demo_batch(&url)
        }
        .boxed()
    }
}

/// Builds the demo page set for `url`. Ids are prefixed by the host.
pub fn demo_batch(url: &Url) -> Result<SiteBatch, ImportError> {
    let host = url.host_str().ok_or_else(|| ImportError::InvalidUrl {
        url: url.to_string(),
        reason: "url has no host".to_string(),
    })?;

    let home_id = format!("{host}/home");
    let home = Note::with_id(home_id.as_str(), "#ffcc80", Point::new(400.0, 100.0))
        .titled("Imported Home")
        .described(format!("Imported from {url}"));
    let about = Note::with_id(format!("{host}/about"), "#80deea", Point::new(200.0, 300.0))
        .titled("Imported About")
        .described("About page from import")
        .under(home_id.as_str());
    let contact = Note::with_id(format!("{host}/contact"), "#a5d6a7", Point::new(600.0, 300.0))
        .titled("Imported Contact")
        .described("Contact page from import")
        .under(home_id.as_str());

    let connections = vec![
        Connection::new(home.id.as_str(), about.id.as_str()),
        Connection::new(home.id.as_str(), contact.id.as_str()),
    ];
    Ok(SiteBatch {
        notes: vec![home, about, contact],
        connections,
    })
}
