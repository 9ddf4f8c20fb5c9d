//! Network Session
//!
//! Scoped acquisition of platform networking resources. Both binaries hold a
//! session for their whole lifetime, on every platform.
//!
//! The standard library already performs any per-process socket subsystem
//! start-up lazily (Winsock on Windows) and tears it down at exit, so the
//! guard itself only marks the scope.

use crate::error::Result;

/// Guard for the networking lifetime of a process
#[derive(Debug)]
pub struct NetworkSession {
    _private: (),
}

impl NetworkSession {
    /// Acquire networking resources for this process
    pub fn acquire() -> Result<Self> {
        tracing::trace!("Network session acquired");
        Ok(Self { _private: () })
    }
}

impl Drop for NetworkSession {
    fn drop(&mut self) {
        tracing::trace!("Network session released");
    }
}
