pub mod downloader;
pub mod fetcher;
pub mod index_page;

pub use downloader::{DownloadEvent, GalleryDownloader, GalleryImage, GalleryReport};
pub use fetcher::{FetchedImage, HttpFetcher, ImageFetcher};
pub use index_page::{IndexTemplate, INDEX_FILE_NAME};
