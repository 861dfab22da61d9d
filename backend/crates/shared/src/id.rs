//! Typed Entity Identifiers
//!
//! UUID-backed identifiers distinguished at the type level, so a user id
//! can never be passed where a record id is expected.

use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// UUID newtype parameterized by an entity marker.
///
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
/// ```
pub struct Id<T>(Uuid, PhantomData<T>);

impl<T> Id<T> {
    /// Random v4 identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4(), PhantomData)
    }

    /// Wrap a UUID loaded from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, PhantomData)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

// Manual impls: derives would bound T, but the marker is phantom.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.0)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T> From<Id<T>> for Uuid {
    fn from(id: Id<T>) -> Self {
        id.0
    }
}

/// Entity markers.
pub mod markers {
    /// Registered account.
    pub struct User;

    /// Per-module score submission.
    pub struct EventRecord;
}

pub type UserId = Id<markers::User>;
pub type RecordId = Id<markers::EventRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct_types() {
        let user_id: UserId = Id::new();
        let record_id: RecordId = Id::new();

        let _u: Uuid = user_id.into_uuid();
        let _r: Uuid = record_id.into_uuid();
    }

    #[test]
    fn test_wraps_and_exposes_uuid() {
        let uuid = Uuid::new_v4();
        let id: UserId = Id::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
        assert_eq!(UserId::from(uuid), id);
    }

    #[test]
    fn test_display_matches_uuid() {
        let uuid = Uuid::new_v4();
        let id: RecordId = uuid.into();
        assert_eq!(id.to_string(), uuid.to_string());
    }
}
