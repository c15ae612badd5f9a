use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// How much status narration the chunk writer/loader emit.
///
/// Narration never changes the data result; it exists for a human watching
/// a long batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// No narration.
    Silent,
    /// Start and end messages only.
    Summary,
    /// One message per chunk artifact.
    PerFile,
}

impl Verbosity {
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Verbosity::Silent,
            1 => Verbosity::Summary,
            _ => Verbosity::PerFile,
        }
    }
}

/// Timestamped status line in the style of the original batch scripts:
/// a "Current time = HH:MM:SS" header, a separator, and the message.
pub struct StatusReporter {
    verbosity: Verbosity,
}

impl StatusReporter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Emitted at verbosity >= Summary.
    pub fn update(&self, message: &str) {
        if self.verbosity >= Verbosity::Summary {
            Self::print_status(message);
        }
    }

    /// Emitted only at PerFile verbosity.
    pub fn update_per_file(&self, message: &str) {
        if self.verbosity >= Verbosity::PerFile {
            Self::print_status(message);
        }
    }

    fn print_status(message: &str) {
        let now = chrono::Local::now();
        println!("Current time = {}", now.format("%H:%M:%S"));
        println!("-------------------------------");
        println!("{}", message);
        println!();
    }
}

pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new(total: u64, message: &str, silent: bool) -> Self {
        if silent {
            Self { progress_bar: None }
        } else {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            pb.set_message(message.to_string());
            pb.enable_steady_tick(Duration::from_millis(100));

            Self {
                progress_bar: Some(pb),
            }
        }
    }

    pub fn new_spinner(message: &str, silent: bool) -> Self {
        if silent {
            Self { progress_bar: None }
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap(),
            );
            pb.set_message(message.to_string());
            pb.enable_steady_tick(Duration::from_millis(100));

            Self {
                progress_bar: Some(pb),
            }
        }
    }

    pub fn increment(&self, delta: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(delta);
        }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(message.to_string());
        }
    }

    pub fn finish_with_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish();
        }
    }
}
