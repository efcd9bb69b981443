use std::io;

use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::errors::ScreenError;
use crate::screening::BatchObserver;

pub fn create_progress_bar(total: u64) -> Result<ProgressBar, io::Error> {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Drives the progress bar and prints per-file notices above it.
pub struct ProgressObserver {
    bar: ProgressBar,
    colour: bool,
}

impl ProgressObserver {
    pub fn new(bar: ProgressBar, colour: bool) -> Self {
        Self { bar, colour }
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

impl BatchObserver for ProgressObserver {
    fn file_started(&mut self, index: usize, total: usize, file_name: &str) {
        info!("Analyzing {} ({}/{})", file_name, index + 1, total);
        self.bar.set_message(format!("Analyzing: {file_name}"));
    }

    fn file_failed(&mut self, file_name: &str, error: &ScreenError) {
        let line = format!("Error analyzing {file_name}: {error}");
        if self.colour {
            self.bar.println(line.red().to_string());
        } else {
            self.bar.println(line);
        }
    }

    fn file_finished(&mut self, done: usize, _total: usize) {
        self.bar.set_position(done as u64);
    }
}
