use crate::error::{LogPuzzleError, Result};
use crate::gallery::fetcher::ImageFetcher;
use crate::gallery::index_page::{image_name, img_tag, IndexTemplate, INDEX_FILE_NAME};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Notifications emitted while a gallery is being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadEvent<'a> {
    Fetching {
        index: usize,
        total: usize,
        name: &'a str,
        url: &'a str,
    },
    Saved {
        index: usize,
        total: usize,
        name: &'a str,
        bytes: u64,
    },
    WritingIndex {
        path: &'a Path,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    pub name: String,
    pub url: String,
    pub status: u16,
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryReport {
    pub dest_dir: PathBuf,
    pub index_path: PathBuf,
    pub images: Vec<GalleryImage>,
    pub total_bytes: u64,
    pub elapsed_ms: u64,
    pub generated_at: DateTime<Utc>,
}

impl GalleryReport {
    pub fn non_success_count(&self) -> usize {
        self.images
            .iter()
            .filter(|img| !(200..300).contains(&img.status))
            .count()
    }
}

pub struct GalleryDownloader<F: ImageFetcher> {
    fetcher: F,
    template: IndexTemplate,
    require_success: bool,
}

impl<F: ImageFetcher> GalleryDownloader<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            template: IndexTemplate::default(),
            require_success: false,
        }
    }

    pub fn with_template(mut self, template: IndexTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_require_success(mut self, require_success: bool) -> Self {
        self.require_success = require_success;
        self
    }

    /// Fetches every URL in order into `dest_dir/img<idx>` and then writes
    /// `dest_dir/index.html` referencing them. Stops at the first failure;
    /// files already written stay on disk and no index is produced.
    pub fn download_and_render(
        &self,
        urls: &[String],
        dest_dir: &Path,
        observer: Option<&dyn Fn(&DownloadEvent<'_>)>,
    ) -> Result<GalleryReport> {
        let start = Instant::now();
        ensure_dest_dir(dest_dir)?;

        let total = urls.len();
        let mut img_tags = Vec::with_capacity(total);
        let mut images = Vec::with_capacity(total);

        for (index, url) in urls.iter().enumerate() {
            let name = image_name(index);
            notify(
                observer,
                DownloadEvent::Fetching {
                    index,
                    total,
                    name: &name,
                    url,
                },
            );

            let image = self.fetcher.fetch(url)?;
            if self.require_success && !image.is_success() {
                return Err(LogPuzzleError::HttpStatus {
                    url: url.clone(),
                    status: image.status,
                });
            }

            let img_path = dest_dir.join(&name);
            write_file(&img_path, &image.bytes)?;

            let bytes = image.bytes.len() as u64;
            notify(
                observer,
                DownloadEvent::Saved {
                    index,
                    total,
                    name: &name,
                    bytes,
                },
            );

            img_tags.push(img_tag(&name));
            images.push(GalleryImage {
                name,
                url: url.clone(),
                status: image.status,
                bytes,
            });
        }

        let index_path = dest_dir.join(INDEX_FILE_NAME);
        notify(observer, DownloadEvent::WritingIndex { path: &index_path });
        write_file(&index_path, self.template.render(&img_tags).as_bytes())?;

        Ok(GalleryReport {
            dest_dir: dest_dir.to_path_buf(),
            index_path,
            total_bytes: images.iter().map(|img| img.bytes).sum(),
            images,
            elapsed_ms: start.elapsed().as_millis() as u64,
            generated_at: Utc::now(),
        })
    }
}

fn notify(observer: Option<&dyn Fn(&DownloadEvent<'_>)>, event: DownloadEvent<'_>) {
    if let Some(callback) = observer {
        callback(&event);
    }
}

/// Creates only the last path component; missing parents are an error.
fn ensure_dest_dir(dest_dir: &Path) -> Result<()> {
    if dest_dir.is_dir() {
        return Ok(());
    }

    fs::create_dir(dest_dir).map_err(|e| LogPuzzleError::DirectoryCreate {
        path: dest_dir.display().to_string(),
        source: e,
    })
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).map_err(|e| LogPuzzleError::Write {
        path: path.display().to_string(),
        source: e,
    })
}
