//! One-at-a-time guards per action kind

use crate::error::EvaluationError;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// User-triggered action kinds, each with its own loading flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Single submission
    Submit,
    /// Canned scenario submission
    Scenario,
    /// Batch submission
    Batch,
    /// Resubmission of a history entry
    Reevaluate,
}

impl Action {
    fn slot(self) -> usize {
        match self {
            Action::Submit => 0,
            Action::Scenario => 1,
            Action::Batch => 2,
            Action::Reevaluate => 3,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Submit => "submit",
            Action::Scenario => "scenario",
            Action::Batch => "batch",
            Action::Reevaluate => "re-evaluate",
        })
    }
}

#[derive(Debug, Default)]
pub(crate) struct InFlight {
    flags: [AtomicBool; 4],
}

impl InFlight {
    /// Claim the flag for `action`, failing if it is already held
    pub fn acquire(&self, action: Action) -> Result<InFlightGuard<'_>, EvaluationError> {
        let flag = &self.flags[action.slot()];
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| EvaluationError::InFlight(action))?;
        Ok(InFlightGuard { flag })
    }

    pub fn is_set(&self, action: Action) -> bool {
        self.flags[action.slot()].load(Ordering::Acquire)
    }
}

/// Releases its flag when dropped, whether the call succeeded or not
pub(crate) struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
