//! Progress reporting functionality
//!
//! This module provides progress reporting for long-running operations
//! with support for quiet and verbose modes.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

/// Progress reporter for long-running operations
pub struct ProgressReporter {
    quiet: bool,
    verbose: bool,
    multi_progress: Arc<MultiProgress>,
    main_progress_bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let multi_progress = Arc::new(MultiProgress::new());

        // Don't create progress bars in quiet mode
        let main_progress_bar = if quiet {
            None
        } else {
            let bar = multi_progress.add(ProgressBar::new(0));
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(bar)
        };

        Self {
            quiet,
            verbose,
            multi_progress,
            main_progress_bar,
        }
    }

    /// Start a new progress operation
    pub fn start(&self, total: usize, operation: &str) {
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.main_progress_bar {
            bar.reset();
            bar.set_length(total as u64);
            bar.set_position(0);
            bar.set_message(operation.to_string());
        }

        if self.verbose {
            println!("Starting: {}", operation);
        }
    }

    /// Update progress
    pub fn update(&self, current: usize, message: &str) {
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.main_progress_bar {
            bar.set_position(current as u64);
            bar.set_message(message.to_string());
        }

        if self.verbose {
            println!("[{}] {}", current, message);
        }
    }

    /// Finish the progress operation
    pub fn finish(&self, message: &str) {
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.main_progress_bar {
            bar.finish_with_message(message.to_string());
        }

        if self.verbose {
            println!("Finished: {}", message);
        }
    }

    /// Create a spinner for an operation without a known length
    pub fn create_spinner(&self, message: &str) -> Option<ProgressBar> {
        if self.quiet {
            return None;
        }

        let spinner = self.multi_progress.add(ProgressBar::new_spinner());
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        Some(spinner)
    }

    /// Print a message (respects quiet mode)
    pub fn print(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    /// Print a verbose message (only in verbose mode)
    pub fn print_verbose(&self, message: &str) {
        if self.verbose {
            println!("{}", message);
        }
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}
