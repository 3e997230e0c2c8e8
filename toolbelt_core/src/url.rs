//! Working out a download's file name from its URL
//!
//! The name is taken from the URL path when it looks like a file name.
//! Otherwise the URL is requested, redirects are followed, and the final URL
//! and its `Content-Disposition` header are tried in turn.

use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, LOCATION};
use reqwest::{Client, Url, redirect::Policy};
use std::path::Path;
use std::time::Duration;

use crate::Result;
use crate::error::NetworkError;

/// Redirects followed before giving up
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Time allowed for each request of a probe
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

const FILENAME_FIELD: &str = "filename=";

/// Take the file name from the last segment of a URL or path
///
/// The segment is trimmed of whitespace and quotes, and only accepted when it
/// is non-empty, holds no characters that are invalid in file names, and has
/// an extension.
///
/// ```
/// use toolbelt_core::url::filename_from_path;
///
/// assert_eq!(filename_from_path("https://example.com/a/report.pdf"), Some("report.pdf".into()));
/// assert_eq!(filename_from_path("https://example.com/download"), None);
/// ```
pub fn filename_from_path(url: &str) -> Option<String> {
    let index = url.rfind('/')?;
    let name = trim_filename(&url[index + 1..]);

    let valid = !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_control() || INVALID_FILENAME_CHARS.contains(&c))
        && Path::new(name)
            .extension()
            .is_some_and(|ext| !ext.is_empty());

    valid.then(|| name.to_string())
}

/// Take the file name from a URL without touching the network
///
/// Tries the URL text as given, then the path of the parsed URL so that a
/// query string or fragment does not hide the name.
pub fn filename_from_url(url: &str) -> Option<String> {
    filename_from_path(url).or_else(|| {
        Url::parse(url)
            .ok()
            .and_then(|parsed| filename_from_path(parsed.path()))
    })
}

/// Take the file name from a `Content-Disposition` header value
///
/// The `filename=` field is found ignoring case; its value runs to the next
/// `;` and is trimmed of whitespace and quotes.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let index = header.to_ascii_lowercase().find(FILENAME_FIELD)?;
    let value = &header[index + FILENAME_FIELD.len()..];
    let value = value.split(';').next().unwrap_or_default();
    let name = trim_filename(value);

    (!name.is_empty()).then(|| name.to_string())
}

fn trim_filename(name: &str) -> &str {
    name.trim().trim_matches(['\'', '"'])
}

/// What a probe learned about a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    /// URL reached after following redirects
    pub final_url: String,
    /// Raw `Content-Disposition` header of the final response
    pub content_disposition: Option<String>,
}

/// Requests a URL and reports where it ended up
#[async_trait]
pub trait FilenameProbe: Send + Sync {
    /// Request `url`, following at most `max_redirects` redirects
    async fn probe(&self, url: &str, max_redirects: usize) -> Result<ProbeResponse>;
}

/// HTTP probe built on reqwest
///
/// Redirects are followed by hand so the limit can vary per call and an
/// exceeded limit is reported as such.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    /// Create a probe whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("toolbelt/", env!("CARGO_PKG_VERSION")))
            .redirect(Policy::none())
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an existing client, which must not follow redirects itself
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FilenameProbe for HttpProbe {
    async fn probe(&self, url: &str, max_redirects: usize) -> Result<ProbeResponse> {
        let mut current =
            Url::parse(url).map_err(|e| NetworkError::invalid_url(url, &e.to_string()))?;
        let mut redirects = 0;

        loop {
            log::debug!("Requesting {current}");
            let response = self.client.get(current.clone()).send().await?;

            if response.status().is_redirection()
                && let Some(location) = response.headers().get(LOCATION)
            {
                if redirects >= max_redirects {
                    return Err(NetworkError::too_many_redirects(url, max_redirects).into());
                }
                let location = location
                    .to_str()
                    .map_err(|_| NetworkError::request("redirect location is not valid text"))?;
                current = current
                    .join(location)
                    .map_err(|e| NetworkError::invalid_url(location, &e.to_string()))?;
                redirects += 1;
                continue;
            }

            let response = response.error_for_status()?;
            let content_disposition = response
                .headers()
                .get(CONTENT_DISPOSITION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);

            log::debug!("Resolved {url} to {} after {redirects} redirect(s)", response.url());

            return Ok(ProbeResponse {
                final_url: response.url().to_string(),
                content_disposition,
            });
        }
    }
}

/// Resolves download file names, probing the network only when needed
#[derive(Debug, Clone)]
pub struct UrlService<P = HttpProbe> {
    max_redirects: usize,
    probe: P,
}

impl UrlService<HttpProbe> {
    /// Create a service that probes over HTTP
    pub fn new(max_redirects: usize, timeout: Duration) -> Result<Self> {
        Ok(Self::with_probe(HttpProbe::new(timeout)?, max_redirects))
    }
}

impl<P: FilenameProbe> UrlService<P> {
    /// Create a service around any probe
    pub fn with_probe(probe: P, max_redirects: usize) -> Self {
        Self {
            max_redirects,
            probe,
        }
    }

    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    /// Work out the file name a URL would download as
    ///
    /// `Ok(None)` means the URL was reachable but nothing named the file.
    pub async fn resolve_filename(&self, url: &str) -> Result<Option<String>> {
        if let Some(name) = filename_from_url(url) {
            return Ok(Some(name));
        }

        let response = self.probe.probe(url, self.max_redirects).await?;

        let name = filename_from_url(&response.final_url).or_else(|| {
            response
                .content_disposition
                .as_deref()
                .and_then(filename_from_content_disposition)
        });

        if name.is_none() {
            log::warn!("No file name found for {url}");
        }

        Ok(name)
    }
}
