//! Per-file block counters for batch synthesis
//!
//! Small batches get one bar per file. Once a batch is larger than
//! `MAX_INDIVIDUAL_PROGRESS_BARS`, an overall file counter is added and the
//! per-file bars show the most recently started files.

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static BLOCK_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.green/white}] {prefix} {elapsed}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
});

static FILE_COUNTER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Images: [{bar:40.green/white}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Block progress of one input file
#[derive(Debug, Clone, Default)]
struct FileBlocks {
    label: String,
    placed: usize,
    total: usize,
    finished: bool,
}

impl FileBlocks {
    fn message(&self) -> String {
        let width = self.total.to_string().len();
        let marker = if self.finished { "done" } else { "    " };
        format!("{marker} {:>width$}/{} blocks", self.placed, self.total)
    }
}

/// Terminal progress display for a run over one or more images
pub struct ProgressManager {
    display: MultiProgress,
    file_counter: Option<ProgressBar>,
    slots: Vec<ProgressBar>,
    files: Vec<FileBlocks>,
    file_count: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager with no bars
    pub fn new() -> Self {
        Self {
            display: MultiProgress::new(),
            file_counter: None,
            slots: Vec::new(),
            files: Vec::new(),
            file_count: 0,
        }
    }

    /// Create the bars for a batch of `file_count` images
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;

        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let counter = ProgressBar::new(file_count as u64);
            counter.set_style(FILE_COUNTER_STYLE.clone());
            self.file_counter = Some(self.display.add(counter));
        }

        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let slot = ProgressBar::new(0);
            slot.set_style(BLOCK_STYLE.clone());
            self.slots.push(self.display.add(slot));
        }
    }

    /// Number of images announced to `initialize`
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Begin tracking `path`, which needs `total_blocks` placements
    pub fn start_file(&mut self, index: usize, path: &Path, total_blocks: usize) {
        if self.files.len() <= index {
            self.files.resize_with(index + 1, FileBlocks::default);
        }
        if let Some(file) = self.files.get_mut(index) {
            *file = FileBlocks {
                label: path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                placed: 0,
                total: total_blocks,
                finished: false,
            };
        }
        self.redraw();
    }

    /// Record how many blocks of file `index` have been placed
    pub fn update_blocks(&mut self, index: usize, blocks_placed: usize, elapsed: Duration) {
        let Some(file) = self.files.get_mut(index) else {
            return;
        };
        file.placed = blocks_placed.min(file.total);
        self.redraw();
        if let Some(slot) = self.slot_for(index) {
            slot.set_prefix(format!(
                "{} ({:.1}s)",
                self.label(index),
                elapsed.as_secs_f64()
            ));
        }
    }

    /// Mark file `index` as written
    pub fn complete_file(&mut self, index: usize, elapsed: Duration) {
        if let Some(counter) = &self.file_counter {
            counter.inc(1);
        }
        let Some(file) = self.files.get_mut(index) else {
            return;
        };
        file.placed = file.total;
        file.finished = true;
        self.redraw();
        if let Some(slot) = self.slot_for(index) {
            slot.set_prefix(format!(
                "{} ({:.1}s)",
                self.label(index),
                elapsed.as_secs_f64()
            ));
        }
    }

    /// Remove every bar from the terminal
    pub fn finish(&self) {
        if let Some(counter) = &self.file_counter {
            counter.finish_with_message("All images quilted");
        }
        let _ = self.display.clear();
    }

    fn label(&self, index: usize) -> &str {
        self.files.get(index).map_or("", |file| file.label.as_str())
    }

    // Indices of started files, newest last, limited to the available slots
    fn visible(&self) -> Vec<usize> {
        let started: Vec<usize> = self
            .files
            .iter()
            .enumerate()
            .filter(|(_, file)| !file.label.is_empty())
            .map(|(index, _)| index)
            .collect();
        let skip = started.len().saturating_sub(self.slots.len());
        started.into_iter().skip(skip).collect()
    }

    fn slot_for(&self, index: usize) -> Option<&ProgressBar> {
        let position = self.visible().iter().position(|&visible| visible == index)?;
        self.slots.get(position)
    }

    fn redraw(&self) {
        let visible = self.visible();
        for (slot_index, slot) in self.slots.iter().enumerate() {
            let file = visible
                .get(slot_index)
                .and_then(|&index| self.files.get(index));
            if let Some(file) = file {
                slot.set_length(file.total as u64);
                slot.set_position(file.placed as u64);
                slot.set_message(file.message());
                slot.set_prefix(file.label.clone());
            } else {
                slot.set_length(0);
                slot.set_position(0);
                slot.set_message(String::new());
                slot.set_prefix(String::new());
            }
        }
    }
}
