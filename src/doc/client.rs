// src/doc/client.rs
use crate::utils::error::DocError;
use reqwest::header;
use std::time::Duration;

// Published Google Docs pages refuse requests without a browser-style UA.
const DOC_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const DOC_TIMEOUT_SECS: u64 = 10;

/// Creates a reqwest client configured for document fetching.
fn build_doc_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(DOC_USER_AGENT)
        .timeout(Duration::from_secs(DOC_TIMEOUT_SECS))
        .build()
}

/// Downloads the source document from its URL and returns the body text.
pub async fn fetch_document(url: &str) -> Result<String, DocError> {
    let client = build_doc_client()?; // Propagate client build error if any

    tracing::info!("Fetching document from: {}", url);
    tracing::debug!("Using User-Agent: {}", DOC_USER_AGENT);

    let response = client
        .get(url)
        .header(header::ACCEPT, "text/html,text/plain,*/*")
        .send()
        .await?; // Propagates reqwest::Error as DocError::Network

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::warn!("Received 404 Not Found for URL: {}", url);
            return Err(DocError::NotFound(url.to_string()));
        }
        return Err(DocError::Http(status));
    }

    let body = response.text().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

    Ok(body)
}
