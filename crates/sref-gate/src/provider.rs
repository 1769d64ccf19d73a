//! The [`LockStatusProvider`] trait and status records.

use serde::{Deserialize, Serialize};

use crate::error::GateResult;

/// Version-control state flags a status record can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetState {
    /// Up to date with the depot.
    Synced,
    /// A newer revision exists in the depot.
    OutOfSync,
    /// Checked out in this session.
    CheckedOutLocal,
    /// Checked out by someone else.
    CheckedOutRemote,
    /// Exclusively locked in this session.
    LockedLocal,
    /// Exclusively locked by someone else.
    LockedRemote,
    /// Marked for add in this session.
    AddedLocal,
    /// Marked for delete in this session.
    DeletedLocal,
}

/// Status of one file as reported by the provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Path the record describes.
    pub path: String,
    /// Every state flag that applies.
    pub states: Vec<AssetState>,
}

impl StatusRecord {
    pub fn new(path: impl Into<String>, states: Vec<AssetState>) -> Self {
        Self {
            path: path.into(),
            states,
        }
    }

    /// Returns `true` if the record carries `state`.
    pub fn is_state(&self, state: AssetState) -> bool {
        self.states.contains(&state)
    }

    /// Returns `true` if the file is checked out in this session.
    pub fn is_checked_out_locally(&self) -> bool {
        self.is_state(AssetState::CheckedOutLocal)
    }
}

/// A version-control system that can report file lock status.
///
/// `status_of` may block for as long as the backend needs; callers that care
/// about responsiveness go through [`ReadOnlyGate`](crate::ReadOnlyGate).
pub trait LockStatusProvider: Send + Sync {
    /// Whether version control is active for the project.
    fn is_enabled(&self) -> bool;

    /// Whether files must be checked out before they can be edited.
    fn supports_checkout(&self) -> bool;

    /// Status records for `path`. Well-behaved providers return exactly one.
    fn status_of(&self, path: &str) -> GateResult<Vec<StatusRecord>>;
}
