//! Export state machine and the busy flag

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Where an export currently is
///
/// `Idle -> Preparing -> Capturing -> Finalizing -> Idle`. Any active phase
/// can end in `Failed` (a failed download ends `Finalizing` too), which
/// behaves like `Idle` for the next trigger. A vanished render target drops
/// straight back to `Idle`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ExportPhase {
    #[default]
    Idle,
    Preparing,
    Capturing,
    Finalizing,
    Failed,
}

impl ExportPhase {
    /// True while an export owns the pipeline
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            ExportPhase::Preparing | ExportPhase::Capturing | ExportPhase::Finalizing
        )
    }

    /// Allowed transitions
    pub fn can_advance_to(&self, next: ExportPhase) -> bool {
        use ExportPhase::*;
        matches!(
            (self, next),
            (Idle | Failed, Preparing)
                | (Preparing, Capturing)
                | (Capturing, Finalizing)
                | (Finalizing, Idle)
                | (Preparing | Capturing, Idle)
                | (Preparing | Capturing | Finalizing, Failed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportPhase::Idle => "idle",
            ExportPhase::Preparing => "preparing",
            ExportPhase::Capturing => "capturing",
            ExportPhase::Finalizing => "finalizing",
            ExportPhase::Failed => "failed",
        }
    }
}

impl fmt::Display for ExportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holds the busy flag for the lifetime of one export
///
/// Acquiring fails while another guard is alive; dropping the guard
/// releases the flag on every exit path. The guard owns a handle to the
/// flag, so it can be taken synchronously and moved into a spawned future.
#[derive(Debug)]
pub struct BusyGuard {
    flag: Rc<Cell<bool>>,
}

impl BusyGuard {
    pub fn acquire(flag: &Rc<Cell<bool>>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self { flag: Rc::clone(flag) })
        }
    }

    /// Whether this guard holds `flag`
    pub fn guards(&self, flag: &Rc<Cell<bool>>) -> bool {
        Rc::ptr_eq(&self.flag, flag)
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
