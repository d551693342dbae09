//! Descriptive text for a band, fetched from the Wikipedia REST API.

use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::info;
use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_WIKI_URL: &str = "https://en.wikipedia.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("bandscope/", env!("CARGO_PKG_VERSION"));

/// Returns a summary text for a page title, or fails when no page matches.
pub trait DescriptionLookup {
    fn summary(&self, title: &str) -> Result<String>;
}

/// Page title used to disambiguate a band from homonyms.
pub fn band_page_title(band_name: &str) -> String {
    format!("{} (band)", band_name)
}

pub struct WikipediaClient {
    client: Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct SummaryResponse {
    extract: Option<String>,
}

impl WikipediaClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Lookup(format!("invalid base url '{}': {}", base_url, e)))?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Lookup(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// `<base>/api/rest_v1/page/summary/<title>` with the title as one encoded segment.
    pub fn summary_url(&self, title: &str) -> Result<Url> {
        let segment = title.replace(' ', "_");
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Lookup(format!("cannot build a path on '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "rest_v1", "page", "summary", segment.as_str()]);
        Ok(url)
    }
}

impl DescriptionLookup for WikipediaClient {
    fn summary(&self, title: &str) -> Result<String> {
        let start_time = Instant::now();
        let url = self.summary_url(title)?;
        info!(action = "request", component = "wikipedia", url = %url, "Fetching page summary");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::Lookup(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Lookup(format!(
                "no page for '{}' (status {})",
                title,
                response.status()
            )));
        }

        let body: SummaryResponse = response.json().map_err(|e| Error::Lookup(e.to_string()))?;
        let extract = body
            .extract
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| Error::Lookup(format!("page '{}' has no summary", title)))?;

        info!(
            action = "complete",
            component = "wikipedia",
            title = title,
            length = extract.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Page summary fetched"
        );
        Ok(extract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_title_gets_qualifier() {
        assert_eq!(band_page_title("Queen"), "Queen (band)");
    }

    #[test]
    fn summary_url_encodes_title_as_one_segment() {
        let client = WikipediaClient::new("https://en.wikipedia.org/").expect("client");
        let url = client.summary_url("AC/DC (band)").expect("url");
        assert_eq!(
            url.as_str(),
            "https://en.wikipedia.org/api/rest_v1/page/summary/AC%2FDC_(band)"
        );
    }

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MUSE_PATH: &str = "/api/rest_v1/page/summary/Muse_(band)";

    async fn mock_summary(status: u16, body: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(MUSE_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    // The blocking client must not run on an async worker thread.
    async fn fetch(server: &MockServer, title: &'static str) -> Result<String> {
        let base_url = server.uri();
        tokio::task::spawn_blocking(move || WikipediaClient::new(&base_url)?.summary(title))
            .await
            .expect("blocking task")
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn summary_returns_extract() {
        let server = mock_summary(200, serde_json::json!({"extract": "English rock band"})).await;
        let text = fetch(&server, "Muse (band)").await.expect("summary");
        assert_eq!(text, "English rock band");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_page_is_a_lookup_error() {
        let server = mock_summary(404, serde_json::json!({"title": "Not found."})).await;
        let result = fetch(&server, "Muse (band)").await;
        assert!(matches!(result, Err(Error::Lookup(message)) if message.contains("404")));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn empty_extract_is_a_lookup_error() {
        let server = mock_summary(200, serde_json::json!({"extract": ""})).await;
        let result = fetch(&server, "Muse (band)").await;
        assert!(matches!(result, Err(Error::Lookup(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_extract_is_a_lookup_error() {
        let server = mock_summary(200, serde_json::json!({"type": "standard"})).await;
        let result = fetch(&server, "Muse (band)").await;
        assert!(matches!(result, Err(Error::Lookup(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unmatched_title_is_a_lookup_error() {
        // wiremock answers 404 for unmounted paths
        let server = mock_summary(200, serde_json::json!({"extract": "unused"})).await;
        let result = fetch(&server, "Blur (band)").await;
        assert!(matches!(result, Err(Error::Lookup(_))));
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            WikipediaClient::new("not a url"),
            Err(Error::Lookup(_))
        ));
    }
}
