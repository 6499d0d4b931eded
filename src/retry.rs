//! Retry bookkeeping for a single logical request.
//!
//! A request is either still [`Step::Attempting`] or [`Step::Terminated`];
//! [`RetryState::advance`] is the only transition.

use crate::Result;

/// Attempts made so far for one logical request.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct RetryState {
    pub(crate) attempts_made: u32,
}

#[derive(Debug)]
pub(crate) enum Step<T> {
    Attempting(RetryState),
    Terminated(Result<T>),
}

impl RetryState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether another attempt fits in the budget.
    pub(crate) fn can_attempt(self, max_retries: u32) -> bool {
        self.attempts_made <= max_retries
    }

    /// Feeds the outcome of the current attempt.
    ///
    /// Success terminates. A failure is counted, and terminates with that
    /// failure once more than `max_retries` attempts have failed.
    pub(crate) fn advance<T>(self, outcome: Result<T>, max_retries: u32) -> Step<T> {
        match outcome {
            Ok(value) => Step::Terminated(Ok(value)),
            Err(err) => {
                let next = Self {
                    attempts_made: self.attempts_made.saturating_add(1),
                };
                if next.attempts_made > max_retries {
                    Step::Terminated(Err(err))
                } else {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        "attempt {} failed, retrying: {}",
                        next.attempts_made,
                        err
                    );
                    Step::Attempting(next)
                }
            }
        }
    }
}
