//! Spinner-based progress output

use crate::cli::style::{Stylize, check, spinner_style};
use async_trait::async_trait;
use autodeps::progress::ProgressCallback;
use autodeps::retry::Phase;
use indicatif::ProgressBar;
use std::sync::Mutex;
use std::time::Duration;

/// Progress reporter that shows one spinner per pipeline step
pub struct CliProgress {
    current: Mutex<Option<(ProgressBar, String)>>,
}

impl CliProgress {
    /// Create a reporter with no active step
    pub const fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    /// Mark the active step as done
    pub fn finish(&self) {
        if let Ok(mut guard) = self.current.lock()
            && let Some((bar, step)) = guard.take()
        {
            bar.finish_with_message(format!("{} {step}", check()));
        }
    }

    /// Drop the active spinner without marking it done
    pub fn abandon(&self) {
        if let Ok(mut guard) = self.current.lock()
            && let Some((bar, _)) = guard.take()
        {
            bar.finish_and_clear();
        }
    }

    fn println(&self, line: &str) {
        match self.current.lock() {
            Ok(guard) => match guard.as_ref() {
                Some((bar, _)) => bar.println(line),
                None => anstream::println!("{line}"),
            },
            Err(_) => anstream::println!("{line}"),
        }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_step(&self, step: &str) {
        self.finish();
        let bar = ProgressBar::new_spinner();
        bar.set_style(spinner_style());
        bar.set_message(format!("{step}..."));
        bar.enable_steady_tick(Duration::from_millis(80));
        if let Ok(mut guard) = self.current.lock() {
            *guard = Some((bar, step.to_string()));
        }
    }

    async fn on_message(&self, message: &str) {
        self.println(&format!("  {}", message.muted()));
    }

    async fn on_retry(&self, phase: Phase, attempt: usize, max_attempts: usize, delay: Duration) {
        self.println(&format!(
            "  {} {phase} not ready, attempt {attempt}/{max_attempts} after {}s",
            "↻".warn(),
            delay.as_secs()
        ));
    }
}
