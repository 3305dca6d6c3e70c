//! Program registry port

use crate::domain::result::Result;
use crate::domain::ProgramHandle;

/// Registry of named programs belonging to a workspace
pub trait ProgramRegistry: Send + Sync {
    /// Resolve a program by name
    ///
    /// Returns `Error::NotFound` when the workspace has no such program.
    fn resolve(&self, name: &str) -> Result<ProgramHandle>;

    /// Names of all programs the workspace knows about, sorted
    fn list(&self) -> Result<Vec<String>>;
}
