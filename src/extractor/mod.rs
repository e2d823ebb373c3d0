pub mod sort_key;
pub mod url_extractor;

pub use sort_key::PuzzleOrder;
pub use url_extractor::UrlExtractor;
