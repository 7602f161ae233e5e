//! Runs one operation on a worker thread while the main thread renders
//! progress.

use crossbeam_channel::{bounded, Sender};
use indicatif::{ProgressBar, ProgressStyle};
use sorta_core::{CancelToken, Error, Outcome, Progress, ProgressSink, Result};
use std::thread;

/// Forwards progress events over a bounded channel without ever blocking
/// the operation: a slow or absent observer drops events instead of
/// stalling the worker.
struct ChannelSink {
    tx: Sender<Progress>,
}

impl ProgressSink for ChannelSink {
    fn report(&self, progress: Progress) {
        let _ = self.tx.try_send(progress);
    }
}

/// Run `task` on a worker thread, draining its progress events into an
/// indicatif bar on the calling thread. The caller owns `cancel` and may
/// signal it from anywhere (the binary wires it to Ctrl-C).
pub fn run<F>(show_progress: bool, cancel: CancelToken, task: F) -> Result<Outcome>
where
    F: FnOnce(&dyn ProgressSink, &CancelToken) -> Result<Outcome> + Send + 'static,
{
    let (tx, rx) = bounded(100);

    let handle = thread::spawn(move || {
        let sink = ChannelSink { tx };
        task(&sink, &cancel)
    });

    let bar = progress_bar(show_progress);
    // The loop ends when the worker finishes and drops its sender.
    for event in rx.iter() {
        if let Some(bar) = &bar {
            bar.set_position(u64::from(event.percent));
            bar.set_message(event.message);
        }
    }
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    handle
        .join()
        .map_err(|_| Error::Other("worker thread panicked".to_string()))?
}

fn progress_bar(show: bool) -> Option<ProgressBar> {
    if !show {
        return None;
    }

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}% ")
            .unwrap()
            .progress_chars("#>-"),
    );
    Some(bar)
}
