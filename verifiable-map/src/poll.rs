//! Waiting for a map to absorb its mutations.
//!
//! Mutations are applied asynchronously, so a caller that needs to read its
//! own writes polls the map's tree head until the mutation log it summarizes
//! is large enough. Polling backs off exponentially while the size stands
//! still and starts over from the initial delay whenever it grows.
//!
//! The delay has no upper bound and the wait has no timeout. This is meant
//! for tests and tooling; callers that need a deadline can enforce one in the
//! sleep function passed to [`VerifiableMap::block_until_size_with`]. An
//! error returned from that function ends the wait without another poll.

use std::{thread, time::Duration};

use tracing::{debug, info};

use crate::{MapTreeHead, Result, Transport, TreeSize, VerifiableMap};

/// Delay before the second poll, and after any poll that saw growth.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(1);

/// How an observed tree size compares with earlier observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// First size seen.
    Baseline,
    /// Larger than anything seen before; the delay was reset.
    Progress,
    /// No growth; the delay was doubled.
    Stalled,
}

/// Backoff state for one polling session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    initial_delay: Duration,
    current_delay: Duration,
    last_observed: Option<u64>,
}

impl Backoff {
    /// Fresh state that waits `initial_delay` after the first poll.
    pub fn new(initial_delay: Duration) -> Self {
        Self {
            initial_delay,
            current_delay: initial_delay,
            last_observed: None,
        }
    }

    /// Delay to wait before the next poll.
    pub fn current_delay(&self) -> Duration {
        self.current_delay
    }

    /// Largest size recorded so far.
    pub fn last_observed(&self) -> Option<u64> {
        self.last_observed
    }

    /// Record a size that has not reached the target yet and adjust the
    /// delay accordingly.
    pub fn record(&mut self, observed: u64) -> Step {
        match self.last_observed {
            None => {
                self.last_observed = Some(observed);
                self.current_delay = self.initial_delay;
                Step::Baseline
            }
            Some(last) if observed > last => {
                self.last_observed = Some(observed);
                self.current_delay = self.initial_delay;
                Step::Progress
            }
            Some(_) => {
                self.current_delay = self.current_delay.saturating_mul(2);
                Step::Stalled
            }
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_DELAY)
    }
}

impl<T: Transport> VerifiableMap<T> {
    /// Block until the map reflects at least `tree_size` mutations and
    /// return the first tree head that does.
    ///
    /// Errors while fetching the tree head abort the wait immediately.
    pub fn block_until_size(&self, tree_size: u64) -> Result<MapTreeHead> {
        self.block_until_size_with(tree_size, Backoff::default(), |delay| {
            thread::sleep(delay);
            Ok(())
        })
    }

    /// [`block_until_size`](Self::block_until_size) with a caller supplied
    /// backoff policy and sleep function.
    ///
    /// `sleep` is called with each delay before the next poll. Returning an
    /// error from it abandons the wait and hands that error back.
    pub fn block_until_size_with<S>(
        &self,
        tree_size: u64,
        mut backoff: Backoff,
        mut sleep: S,
    ) -> Result<MapTreeHead>
    where
        S: FnMut(Duration) -> Result<()>,
    {
        loop {
            let head = self.tree_head(TreeSize::Head)?;
            let observed = head.tree_size();
            if observed >= tree_size {
                info!(path = self.path(), observed, target = tree_size, "map converged");
                return Ok(head);
            }

            let step = backoff.record(observed);
            let delay = backoff.current_delay();
            debug!(
                path = self.path(),
                observed,
                target = tree_size,
                ?step,
                ?delay,
                "waiting for map to converge"
            );
            sleep(delay)?;
        }
    }
}
