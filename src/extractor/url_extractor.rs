use crate::config::ExtractConfig;
use crate::error::{LogPuzzleError, Result};
use crate::extractor::PuzzleOrder;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

const REQUEST_PATTERN: &str = r"GET (\S*puzzle\S*) HTTP";

/// Pulls puzzle image URLs out of Apache access log text.
pub struct UrlExtractor {
    host: String,
    request: Regex,
    order: PuzzleOrder,
}

impl UrlExtractor {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        Ok(Self {
            host: config.host.clone(),
            request: Regex::new(REQUEST_PATTERN)?,
            order: PuzzleOrder::new()?,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Distinct request paths mentioning `puzzle`, in their natural order.
    pub fn puzzle_paths<'a>(&self, log_text: &'a str) -> BTreeSet<&'a str> {
        self.request
            .captures_iter(log_text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }

    /// Returns the unique puzzle URLs of `log_text` in reveal order.
    pub fn extract(&self, log_text: &str) -> Vec<String> {
        let urls: Vec<String> = self
            .puzzle_paths(log_text)
            .into_iter()
            .map(|path| format!("{}{}", self.host, path))
            .collect();

        let mut entries: Vec<_> = urls.iter().map(|url| (self.order.key(url), url)).collect();
        self.order.sort(&mut entries);

        entries.into_iter().map(|(_, url)| url.clone()).collect()
    }

    pub fn read_urls<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<String>> {
        let log_path = log_path.as_ref();
        let raw = fs::read(log_path).map_err(|e| LogPuzzleError::LogRead {
            path: log_path.display().to_string(),
            source: e,
        })?;

        Ok(self.extract(&String::from_utf8_lossy(&raw)))
    }
}
