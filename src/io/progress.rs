//! Progress display while decoding and folding frame-pair sequences

use crate::io::configuration::{MIN_PAIRS_FOR_PROGRESS, PROGRESS_BAR_WIDTH};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static PAIR_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] Frames: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks how many frame pairs of a comparison have been folded in
///
/// Short sequences finish too quickly for a bar to be useful, so no bar is
/// drawn below `MIN_PAIRS_FOR_PROGRESS` pairs.
#[derive(Default)]
pub struct ProgressManager {
    bar: Option<ProgressBar>,
}

impl ProgressManager {
    /// Create a progress manager with no active bar
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare the bar for a sequence of `pair_count` pairs
    pub fn initialize(&mut self, pair_count: usize) {
        self.bar = (pair_count >= MIN_PAIRS_FOR_PROGRESS).then(|| {
            let bar = ProgressBar::new(pair_count as u64);
            bar.set_style(PAIR_STYLE.clone());
            bar
        });
    }

    /// Whether a bar is currently drawn
    pub const fn is_active(&self) -> bool {
        self.bar.is_some()
    }

    /// Show which gaze frame is being decoded
    pub fn start_pair(&self, gaze_path: &Path) {
        if let Some(ref bar) = self.bar {
            let name = gaze_path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            bar.set_message(name);
        }
    }

    /// Advance past a folded pair
    pub fn complete_pair(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Remove the bar from the terminal
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
