//! Progress reporting for long-running operations

/// An immutable progress snapshot handed to an observer.
///
/// Events carry no identity beyond the moment they are reported; the core
/// never stores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Overall completion, 0-100
    pub percent: u8,
    /// Human-readable description of the current unit of work
    pub message: String,
}

impl Progress {
    /// Snapshot for `completed` out of `total` units of work.
    pub fn of(completed: usize, total: usize, message: impl Into<String>) -> Self {
        let percent = if total == 0 {
            100
        } else {
            ((completed as f64 / total as f64) * 100.0).floor() as u8
        };
        Self {
            percent,
            message: message.into(),
        }
    }
}

/// Observer for [`Progress`] events.
///
/// Reporting is fire-and-forget: an implementation must never block the
/// producing operation, and the core never assumes an observer is present.
pub trait ProgressSink: Send + Sync {
    /// Called once per progress event
    fn report(&self, progress: Progress);
}

/// No-op progress sink
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _progress: Progress) {}
}

impl<F> ProgressSink for F
where
    F: Fn(Progress) + Send + Sync,
{
    fn report(&self, progress: Progress) {
        self(progress)
    }
}
