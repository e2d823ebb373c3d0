use crate::config::DownloadConfig;
use crate::error::{LogPuzzleError, Result};
use reqwest::blocking::Client;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub status: u16,
    pub bytes: Vec<u8>,
}

impl FetchedImage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of image bytes for the gallery downloader.
pub trait ImageFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedImage>;
}

/// Blocking HTTP fetcher. The response body is returned whatever the status.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &DownloadConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());

        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| LogPuzzleError::Config {
            message: format!("Failed to create HTTP client: {}", e),
        })?;

        Ok(Self { client })
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedImage> {
        let network_error = |e: reqwest::Error| LogPuzzleError::Network {
            url: url.to_string(),
            source: e,
        };

        let response = self.client.get(url).send().map_err(network_error)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().map_err(network_error)?;

        Ok(FetchedImage {
            status,
            bytes: bytes.to_vec(),
        })
    }
}
