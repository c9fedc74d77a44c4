use std::sync::Arc;

use felloe_fetch::{FetchPhase, Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;

const PB_STYLE: &str =
    "{spinner:.blue} {msg} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

static PB_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(PB_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK).progress_chars(PB_CHARS))
});

/// Renders download [`Progress`] on stderr. Hidden when stderr is not a
/// terminal.
pub struct DownloadTracker {
    pb: ProgressBar,
}

impl DownloadTracker {
    pub fn new(label: impl Into<String>) -> Self {
        let pb = ProgressBar::no_length();
        pb.set_style(PB_TEMPLATE.clone().unwrap_or_else(ProgressStyle::default_bar));
        pb.set_message(label.into());
        Self { pb }
    }

    pub fn callback(&self) -> ProgressCallback {
        let pb = self.pb.clone();
        Arc::new(move |progress: &Progress| update(&pb, progress))
    }

    pub fn finish(&self, msg: Option<String>) {
        match msg {
            Some(msg) => self.pb.finish_with_message(msg),
            None => self.pb.finish_and_clear(),
        }
    }
}

fn update(pb: &ProgressBar, progress: &Progress) {
    match progress.phase {
        FetchPhase::Connecting => {
            pb.set_position(0);
            if progress.retry_count > 0 {
                pb.println(format!("retrying download (attempt {})", progress.retry_count + 1));
            }
        }
        FetchPhase::Downloading => {
            if let Some(total) = progress.total_bytes {
                pb.set_length(total);
            }
            pb.set_position(progress.bytes_downloaded);
        }
        FetchPhase::Verifying => pb.set_message("verifying"),
        FetchPhase::Completed => pb.set_position(progress.bytes_downloaded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_moves_the_bar() {
        let tracker = DownloadTracker::new("helm 3.14.0");
        tracker.pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
        let callback = tracker.callback();

        callback(&Progress {
            phase:            FetchPhase::Downloading,
            bytes_downloaded: 512,
            total_bytes:      Some(2048),
            retry_count:      0,
        });
        assert_eq!(tracker.pb.length(), Some(2048));
        assert_eq!(tracker.pb.position(), 512);

        callback(&Progress {
            phase:            FetchPhase::Connecting,
            bytes_downloaded: 0,
            total_bytes:      None,
            retry_count:      1,
        });
        assert_eq!(tracker.pb.position(), 0);
        tracker.finish(None);
    }

    #[test]
    fn template_is_valid() { assert!(PB_TEMPLATE.is_some()); }
}
