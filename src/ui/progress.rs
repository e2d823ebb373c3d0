use crate::gallery::DownloadEvent;
use crate::ui::output::format_duration;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    multi_progress: MultiProgress,
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            enabled,
        }
    }

    pub fn create_download_progress(&self, total_images: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi_progress.add(ProgressBar::new(total_images));
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>4}/{len:4} images {msg}"
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        );
        pb.set_message("Starting download...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn suspend<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if self.enabled {
            self.multi_progress.suspend(f)
        } else {
            f()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new(true)
    }
}

pub fn update_download_progress(pb: &ProgressBar, event: &DownloadEvent<'_>) {
    match event {
        DownloadEvent::Fetching { name, .. } => {
            pb.set_message(format!("Fetching {}", name));
        }
        DownloadEvent::Saved { index, .. } => {
            pb.set_position(*index as u64 + 1);
        }
        DownloadEvent::WritingIndex { .. } => {
            pb.set_message("Writing index...");
        }
    }
}

pub fn finish_progress_with_summary(pb: &ProgressBar, message: &str, duration: Duration) {
    let final_message = format!("{} (completed in {})", message, format_duration(duration));
    pb.finish_with_message(final_message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_progress_manager_creation() {
        let manager = ProgressManager::new(true);
        assert!(manager.is_enabled());

        let disabled_manager = ProgressManager::new(false);
        assert!(!disabled_manager.is_enabled());
    }

    #[test]
    fn test_disabled_progress_bar_is_hidden() {
        let manager = ProgressManager::new(false);
        let pb = manager.create_download_progress(10);
        assert!(pb.is_hidden());
    }

    #[test]
    fn test_events_move_the_bar() {
        let pb = ProgressBar::hidden();
        pb.set_length(2);

        update_download_progress(
            &pb,
            &DownloadEvent::Fetching {
                index: 0,
                total: 2,
                name: "img0",
                url: "http://h/puzzle/a.jpg",
            },
        );
        assert_eq!(pb.message(), "Fetching img0");
        assert_eq!(pb.position(), 0);

        update_download_progress(
            &pb,
            &DownloadEvent::Saved {
                index: 0,
                total: 2,
                name: "img0",
                bytes: 10,
            },
        );
        assert_eq!(pb.position(), 1);

        update_download_progress(
            &pb,
            &DownloadEvent::WritingIndex {
                path: Path::new("gallery/index.html"),
            },
        );
        assert_eq!(pb.message(), "Writing index...");
    }

    #[test]
    fn test_suspend_runs_closure() {
        let manager = ProgressManager::new(false);
        assert_eq!(manager.suspend(|| 42), 42);
    }
}
