use std::hint;
use std::thread;

// upper bound on log2 of the spin count
const MAX_SPIN_SHIFT: u32 = 16;

/// How a losing writer waits before retrying its update.
///
/// The first `spin_limit` retries busy-wait for an exponentially growing
/// number of iterations. After that the thread yields to the scheduler,
/// again growing the spin before each yield up to `yield_limit` steps.
/// Retries never give up; the policy only shapes how they wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    spin_limit: u32,
    yield_limit: u32,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            spin_limit: 6,
            yield_limit: 10,
        }
    }
}

impl BackoffPolicy {
    /// Number of retries that only spin before the thread starts yielding.
    pub fn spin_limit(mut self, spin_limit: u32) -> Self {
        self.spin_limit = spin_limit;
        self
    }

    /// Step after which the spin count stops growing.
    ///
    /// A value below the spin limit acts as the spin limit. The spin count
    /// also stops growing at 2^16 iterations whatever this is set to.
    pub fn yield_limit(mut self, yield_limit: u32) -> Self {
        self.yield_limit = yield_limit;
        self
    }

    pub(crate) fn backoff(&self) -> Backoff {
        Backoff {
            policy: *self,
            step: 0,
        }
    }
}

/// Per-call retry state.
pub(crate) struct Backoff {
    policy: BackoffPolicy,
    step: u32,
}

impl Backoff {
    pub(crate) fn attempt(&self) -> u32 {
        self.step
    }

    // log2 of the number of spins for the current step
    fn spin_shift(&self) -> u32 {
        let ceiling = self
            .policy
            .yield_limit
            .max(self.policy.spin_limit)
            .min(MAX_SPIN_SHIFT);
        self.step.min(ceiling)
    }

    /// Wait before the next retry.
    pub(crate) fn snooze(&mut self) {
        let spins = 1u32 << self.spin_shift();
        for _ in 0..spins {
            hint::spin_loop();
        }
        if self.step >= self.policy.spin_limit {
            thread::yield_now();
        }
        self.step = self.step.saturating_add(1);
    }
}
