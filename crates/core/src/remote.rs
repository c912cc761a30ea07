//! Client for the remote document export API.
//!
//! Exports are asynchronous on the server side: a page export is started,
//! its status is polled at a fixed interval until it completes, and the
//! resulting download link is fetched. Credentials live in a [`RemoteConfig`]
//! owned by the [`ExportClient`].
//!
//! # Example
//!
//! ```rust,no_run
//! use quire_core::remote::{ExportClient, RemoteConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> quire_core::Result<()> {
//! let client = ExportClient::new(RemoteConfig::with_token("secret"))?;
//! let summary = client.export_to_dir("doc-id", "Blog", "html_pages".as_ref()).await?;
//! println!("{} pages written", summary.written.len());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};
use url::Url;

use crate::assemble::PageFailure;
use crate::{QuireError, Result};

/// Connection and polling settings for the export API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// API root, e.g. `https://coda.io/apis/v1`.
    pub base_url: String,
    /// Bearer token sent with every API call (not with download links).
    pub api_token: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Delay between two status polls, and between two export requests.
    pub poll_interval: Duration,
    /// Status polls per page before giving up.
    pub max_poll_attempts: u32,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://coda.io/apis/v1".to_string(),
            api_token: String::new(),
            timeout: 30,
            poll_interval: Duration::from_secs(1),
            max_poll_attempts: 60,
            user_agent: concat!("quire/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl RemoteConfig {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { api_token: token.into(), ..Default::default() }
    }
}

/// A page of a remote document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemotePage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent: Option<PageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageList {
    #[serde(default)]
    items: Vec<RemotePage>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportStarted {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    request_id: Option<String>,
}

impl ExportStarted {
    fn into_request_id(self) -> Option<String> {
        self.id.or(self.request_id).filter(|id| !id.is_empty())
    }
}

/// Server-side state of one export request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStatus {
    pub status: String,
    #[serde(default)]
    pub download_link: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ExportStatus {
    pub fn is_complete(&self) -> bool {
        self.status == "complete"
    }

    pub fn is_failed(&self) -> bool {
        self.status == "failed"
    }

    fn poll(self) -> Poll {
        if self.is_complete() {
            match self.download_link {
                Some(link) => Poll::Ready(link),
                None => Poll::Failed("complete without download link".to_string()),
            }
        } else if self.is_failed() {
            Poll::Failed(self.error.unwrap_or(self.status))
        } else {
            Poll::Pending
        }
    }
}

/// What one status poll means for the waiting loop.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Poll {
    Ready(String),
    Pending,
    Failed(String),
}

/// Result of exporting the pages under one parent.
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    pub written: Vec<PathBuf>,
    pub links: Vec<String>,
    pub failures: Vec<PageFailure>,
}

/// HTTP client for the export API.
#[derive(Debug, Clone)]
pub struct ExportClient {
    client: Client,
    base: Url,
    config: RemoteConfig,
}

impl ExportClient {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// [`QuireError::InvalidUrl`] when `base_url` does not parse.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base).map_err(|e| QuireError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, base, config })
    }

    /// Resolves an API path against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| QuireError::InvalidUrl(format!("{}: {}", path, e)))
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.config.api_token)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() { QuireError::Timeout { timeout: self.config.timeout } } else { QuireError::Http(e) }
        })?;
        Ok(response.error_for_status()?)
    }

    /// Lists every page of a document, following pagination.
    pub async fn list_pages(&self, doc_id: &str) -> Result<Vec<RemotePage>> {
        let url = self.endpoint(&format!("docs/{}/pages", doc_id))?;
        let mut pages = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let mut request = self.authed(self.client.get(url.clone()));
            if let Some(token) = &token {
                request = request.query(&[("pageToken", token)]);
            }

            let list: PageList = self.send(request).await?.json().await?;
            pages.extend(list.items);

            match list.next_page_token {
                Some(next) if !next.is_empty() => token = Some(next),
                _ => break,
            }
        }

        debug!(doc = doc_id, count = pages.len(), "listed pages");
        Ok(pages)
    }

    /// Lists the pages whose parent page has the given name.
    pub async fn pages_under_parent(&self, doc_id: &str, parent_name: &str) -> Result<Vec<RemotePage>> {
        let pages = self.list_pages(doc_id).await?;
        Ok(filter_by_parent(pages, parent_name))
    }

    /// Starts an HTML export of a page and returns its request id.
    pub async fn begin_export(&self, doc_id: &str, page_id: &str) -> Result<String> {
        let url = self.endpoint(&format!("docs/{}/pages/{}/export", doc_id, page_id))?;
        let request = self.authed(self.client.post(url)).json(&json!({ "outputFormat": "html" }));

        let started: ExportStarted = self.send(request).await?.json().await?;
        let request_id = started.into_request_id().ok_or_else(|| QuireError::ExportFailed {
            page: page_id.to_string(),
            status: "no request id in response".to_string(),
        })?;
        debug!(page = page_id, request = %request_id, "export started");
        Ok(request_id)
    }

    /// Fetches the current status of an export request.
    pub async fn export_status(&self, doc_id: &str, page_id: &str, request_id: &str) -> Result<ExportStatus> {
        let url = self.endpoint(&format!("docs/{}/pages/{}/export/{}", doc_id, page_id, request_id))?;
        let request = self.authed(self.client.get(url));
        Ok(self.send(request).await?.json().await?)
    }

    /// Polls an export until it completes and returns its download link.
    ///
    /// # Errors
    ///
    /// [`QuireError::ExportFailed`] when the server reports failure,
    /// [`QuireError::ExportPending`] when `max_poll_attempts` is exhausted.
    pub async fn wait_for_export(&self, doc_id: &str, page_id: &str, request_id: &str) -> Result<String> {
        for attempt in 1..=self.config.max_poll_attempts {
            let status = self.export_status(doc_id, page_id, request_id).await?;

            match status.poll() {
                Poll::Ready(link) => return Ok(link),
                Poll::Failed(status) => return Err(QuireError::ExportFailed { page: page_id.to_string(), status }),
                Poll::Pending => debug!(page = page_id, attempt, "export not ready"),
            }

            if attempt < self.config.max_poll_attempts {
                tokio::time::sleep(self.config.poll_interval).await;
            }
        }

        Err(QuireError::ExportPending { page: page_id.to_string(), attempts: self.config.max_poll_attempts })
    }

    /// Downloads exported content. Download links are pre-signed, so no
    /// credentials are sent.
    pub async fn download(&self, link: &str) -> Result<String> {
        let url = Url::parse(link).map_err(|e| QuireError::InvalidUrl(format!("{}: {}", link, e)))?;
        Ok(self.send(self.client.get(url)).await?.text().await?)
    }

    /// Exports every page under `parent_name` into `dir` as `<page name>.html`.
    ///
    /// Per-page failures are logged and collected; the remaining pages are
    /// still exported.
    pub async fn export_to_dir(&self, doc_id: &str, parent_name: &str, dir: &Path) -> Result<ExportSummary> {
        tokio::fs::create_dir_all(dir).await?;

        let pages = self.pages_under_parent(doc_id, parent_name).await?;
        info!(doc = doc_id, parent = parent_name, count = pages.len(), "exporting pages");

        let mut started = Vec::with_capacity(pages.len());
        let mut summary = ExportSummary::default();

        for page in pages {
            match self.begin_export(doc_id, &page.id).await {
                Ok(request_id) => started.push((page, request_id)),
                Err(err) => {
                    warn!(page = %page.id, error = %err, "could not start export");
                    summary.failures.push(PageFailure { title: page.name, reason: err.to_string() });
                }
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }

        for (page, request_id) in started {
            match self.fetch_export(doc_id, &page, &request_id, dir).await {
                Ok((path, link)) => {
                    info!(page = %page.name, path = %path.display(), "exported page");
                    summary.written.push(path);
                    summary.links.push(link);
                }
                Err(err) => {
                    warn!(page = %page.id, error = %err, "export failed");
                    summary.failures.push(PageFailure { title: page.name, reason: err.to_string() });
                }
            }
        }

        Ok(summary)
    }

    async fn fetch_export(
        &self,
        doc_id: &str,
        page: &RemotePage,
        request_id: &str,
        dir: &Path,
    ) -> Result<(PathBuf, String)> {
        let link = self.wait_for_export(doc_id, &page.id, request_id).await?;
        let html = self.download(&link).await?;

        let path = dir.join(format!("{}.html", file_stem_for(&page.name)));
        tokio::fs::write(&path, html).await?;
        Ok((path, link))
    }
}

/// Keeps the pages whose parent is named `parent_name`.
pub fn filter_by_parent(pages: Vec<RemotePage>, parent_name: &str) -> Vec<RemotePage> {
    pages
        .into_iter()
        .filter(|page| {
            page.parent
                .as_ref()
                .and_then(|parent| parent.name.as_deref())
                .is_some_and(|name| name == parent_name)
        })
        .collect()
}

/// Turns a page name into a file stem, so the stem reads back as the title.
///
/// Path separators and NUL are replaced; everything else is kept.
pub fn file_stem_for(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '-' } else { c })
        .collect();
    let stem = stem.trim();
    if stem.is_empty() || stem == "." || stem == ".." { "untitled".to_string() } else { stem.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_remote_config_default() {
        let config = RemoteConfig::default();
        assert_eq!(config.timeout, 30);
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert!(config.max_poll_attempts > 0);
        assert!(config.user_agent.starts_with("quire/"));
    }

    #[test]
    fn test_endpoint_join() {
        let client = ExportClient::new(RemoteConfig::with_token("t")).unwrap();
        let url = client.endpoint("docs/abc/pages/p1/export").unwrap();
        assert_eq!(url.as_str(), "https://coda.io/apis/v1/docs/abc/pages/p1/export");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = RemoteConfig { base_url: "not a url".to_string(), ..Default::default() };
        assert!(matches!(ExportClient::new(config), Err(QuireError::InvalidUrl(_))));
    }

    #[test]
    fn test_status_parsing() {
        let status: ExportStatus = serde_json::from_str(
            r#"{"id": "r1", "status": "complete", "href": "x", "downloadLink": "https://dl/x.html"}"#,
        )
        .unwrap();
        assert!(status.is_complete());
        assert_eq!(status.download_link.as_deref(), Some("https://dl/x.html"));

        let pending: ExportStatus = serde_json::from_str(r#"{"status": "inProgress"}"#).unwrap();
        assert!(!pending.is_complete());
        assert!(!pending.is_failed());
    }

    #[test]
    fn test_export_started_request_id() {
        let started: ExportStarted = serde_json::from_str(r#"{"requestId": "abc"}"#).unwrap();
        assert_eq!(started.into_request_id().as_deref(), Some("abc"));

        let both: ExportStarted = serde_json::from_str(r#"{"id": "first", "requestId": "second"}"#).unwrap();
        assert_eq!(both.into_request_id().as_deref(), Some("first"));

        let neither: ExportStarted = serde_json::from_str(r#"{"id": "", "href": "x"}"#).unwrap();
        assert_eq!(neither.into_request_id(), None);
    }

    fn status(json: &str) -> ExportStatus {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_poll_outcomes() {
        assert_eq!(
            status(r#"{"status": "complete", "downloadLink": "https://dl/a.html"}"#).poll(),
            Poll::Ready("https://dl/a.html".to_string())
        );
        assert_eq!(
            status(r#"{"status": "complete"}"#).poll(),
            Poll::Failed("complete without download link".to_string())
        );
        assert_eq!(status(r#"{"status": "failed", "error": "quota"}"#).poll(), Poll::Failed("quota".to_string()));
        assert_eq!(status(r#"{"status": "failed"}"#).poll(), Poll::Failed("failed".to_string()));
        assert_eq!(status(r#"{"status": "inProgress"}"#).poll(), Poll::Pending);
    }

    /// Serves `body` as JSON to every connection and counts the requests.
    async fn serve_json(body: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    concat!(
                        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n",
                        "content-length: {}\r\nconnection: close\r\n\r\n{}"
                    ),
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}", addr), hits)
    }

    fn stub_client(base_url: String, max_poll_attempts: u32) -> ExportClient {
        let config = RemoteConfig {
            base_url,
            api_token: "t".to_string(),
            poll_interval: Duration::from_millis(1),
            max_poll_attempts,
            ..Default::default()
        };
        ExportClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_wait_gives_up_after_max_attempts() {
        let (base, hits) = serve_json(r#"{"status": "inProgress"}"#).await;
        let client = stub_client(base, 3);

        let err = client.wait_for_export("d", "p1", "r1").await.unwrap_err();

        assert!(matches!(err, QuireError::ExportPending { ref page, attempts: 3 } if page == "p1"));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_wait_with_zero_attempts_does_not_poll() {
        let (base, hits) = serve_json(r#"{"status": "complete", "downloadLink": "https://dl/a.html"}"#).await;
        let client = stub_client(base, 0);

        let err = client.wait_for_export("d", "p1", "r1").await.unwrap_err();

        assert!(matches!(err, QuireError::ExportPending { attempts: 0, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_wait_returns_link_when_complete() {
        let (base, hits) = serve_json(r#"{"status": "complete", "downloadLink": "https://dl/a.html"}"#).await;
        let client = stub_client(base, 5);

        let link = client.wait_for_export("d", "p1", "r1").await.unwrap();

        assert_eq!(link, "https://dl/a.html");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_wait_reports_server_failure() {
        let (base, _) = serve_json(r#"{"status": "failed", "error": "page too large"}"#).await;
        let client = stub_client(base, 5);

        let err = client.wait_for_export("d", "p1", "r1").await.unwrap_err();

        assert!(matches!(err, QuireError::ExportFailed { ref status, .. } if status == "page too large"));
    }

    #[test]
    fn test_filter_by_parent() {
        let list: PageList = serde_json::from_str(
            r#"{"items": [
                {"id": "1", "name": "Post A", "parent": {"id": "p", "name": "Blog"}},
                {"id": "2", "name": "Home"},
                {"id": "3", "name": "Post B", "parent": {"id": "p", "name": "Blog"}},
                {"id": "4", "name": "Other", "parent": {"id": "q", "name": "Docs"}}
            ]}"#,
        )
        .unwrap();

        let names: Vec<String> = filter_by_parent(list.items, "Blog").into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Post A", "Post B"]);
    }

    #[test]
    fn test_file_stem_for() {
        assert_eq!(file_stem_for("FAQ?"), "FAQ?");
        assert_eq!(file_stem_for("Q1/Q2 Plans"), "Q1-Q2 Plans");
        assert_eq!(file_stem_for("  "), "untitled");
        assert_eq!(file_stem_for(".."), "untitled");
    }
}
