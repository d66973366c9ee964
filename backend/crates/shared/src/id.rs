//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities. All persisted entities use
//! database-assigned `BIGSERIAL` keys, so the wrapper carries an `i64`
//! and ids are only ever constructed from store rows.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type ProjectId = Id<markers::Project>;
/// let id = ProjectId::from_i64(1);
/// assert_eq!(id.as_i64(), 1);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<T>,
}

// Manual impls: derives would put bounds on the marker type, which is
// never instantiated and carries no impls of its own.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Id<T> {
    /// Create from a database key
    pub fn from_i64(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying key
    pub fn as_i64(&self) -> i64 {
        self.value
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for User IDs
    pub struct User;

    /// Marker for Project IDs
    pub struct Project;

    /// Marker for Prompt IDs
    pub struct Prompt;

    /// Marker for FileRecord IDs
    pub struct FileRecord;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type ProjectId = Id<markers::Project>;
pub type PromptId = Id<markers::Prompt>;
pub type FileRecordId = Id<markers::FileRecord>;
