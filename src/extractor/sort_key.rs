use crate::error::Result;
use regex::Regex;
use std::borrow::Cow;

/// Filenames shaped like `puzzle/<c>-<first>-<second>.jpg` carry a shuffled
/// word in two parts; the second part gives the reveal order.
const SPLIT_NAME_PATTERN: &str = r"puzzle/\w-(\w+)-(\w+)\.jpg";

pub struct PuzzleOrder {
    split_name: Regex,
}

impl PuzzleOrder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            split_name: Regex::new(SPLIT_NAME_PATTERN)?,
        })
    }

    /// Ordering key for a puzzle URL. URLs without a split name sort by
    /// their full text, host included.
    pub fn key<'a>(&self, url: &'a str) -> Cow<'a, str> {
        match self.split_name.captures(url) {
            Some(caps) => Cow::Owned(format!("{}.jpg", &caps[2])),
            None => Cow::Borrowed(url),
        }
    }

    /// Stable ascending sort of `(key, value)` pairs; equal keys keep the
    /// incoming order.
    pub fn sort<T>(&self, entries: &mut [(Cow<'_, str>, T)]) {
        entries.sort_by(|a, b| a.0.cmp(&b.0));
    }
}
