//! Platform abstraction for the live editable region.
//!
//! The region is the one node the user types into. Browser, test and any
//! future native implementations provide the same small surface so the
//! seeding and change-emission rules can stay platform-independent.

use thiserror::Error;

/// Failure reported by a platform while touching the region.
///
/// These never escape the sync operations: callers log and carry on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegionError {
    /// The platform refused to move focus into the region.
    #[error("failed to focus region: {0}")]
    Focus(String),

    /// Setting or removing an attribute failed (invalid name, etc).
    #[error("failed to update attribute `{name}`: {message}")]
    Attribute { name: String, message: String },
}

/// The single editable node owned by a `ContentEditable` instance.
///
/// Implementations are cheap handles (a DOM element reference, an `Rc`),
/// so every method takes `&self` even when it mutates the underlying node.
pub trait EditableRegion {
    /// Serialized markup of the region's current children.
    fn serialized_content(&self) -> String;

    /// Overwrite the region's children with `markup`, verbatim.
    fn replace_content(&self, markup: &str);

    /// Move input focus into the region.
    fn focus(&self) -> Result<(), RegionError>;

    /// Set an attribute on the region node.
    fn set_attribute(&self, name: &str, value: &str) -> Result<(), RegionError>;

    /// Remove an attribute from the region node. Removing an absent
    /// attribute is not an error.
    fn remove_attribute(&self, name: &str) -> Result<(), RegionError>;

    /// Whether the node is still part of a live document.
    ///
    /// A node removed from its document still holds its markup and keeps
    /// being read and seeded; only focus is skipped while it is out.
    fn is_connected(&self) -> bool {
        true
    }
}

/// Identity-stable slot for the instance's region.
///
/// Written only by the attach/detach path. A region counts as absent only
/// while the slot is empty.
#[derive(Debug)]
pub struct RegionHandle<R> {
    region: Option<R>,
}

impl<R> Default for RegionHandle<R> {
    fn default() -> Self {
        Self { region: None }
    }
}

impl<R> RegionHandle<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a region, returning the one it displaced (if any).
    pub fn attach(&mut self, region: R) -> Option<R> {
        self.region.replace(region)
    }

    /// Clear the slot, returning the region that was held.
    pub fn detach(&mut self) -> Option<R> {
        self.region.take()
    }

    /// The stored region, connected to a document or not.
    pub fn get(&self) -> Option<&R> {
        self.region.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.region.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Stub {
        id: u32,
        connected: Cell<bool>,
    }

    impl Stub {
        fn new(id: u32) -> Self {
            Self {
                id,
                connected: Cell::new(true),
            }
        }
    }

    impl EditableRegion for Stub {
        fn serialized_content(&self) -> String {
            String::new()
        }
        fn replace_content(&self, _markup: &str) {}
        fn focus(&self) -> Result<(), RegionError> {
            Ok(())
        }
        fn set_attribute(&self, _name: &str, _value: &str) -> Result<(), RegionError> {
            Ok(())
        }
        fn remove_attribute(&self, _name: &str) -> Result<(), RegionError> {
            Ok(())
        }
        fn is_connected(&self) -> bool {
            self.connected.get()
        }
    }

    #[test]
    fn attach_replaces_previous_region() {
        let mut handle = RegionHandle::new();
        assert!(handle.attach(Stub::new(1)).is_none());
        let displaced = handle.attach(Stub::new(2)).expect("first region displaced");
        assert_eq!(displaced.id, 1);
        assert_eq!(handle.get().map(|r| r.id), Some(2));
    }

    #[test]
    fn disconnected_region_stays_attached() {
        let mut handle = RegionHandle::new();
        handle.attach(Stub::new(1));

        handle.get().unwrap().connected.set(false);
        assert!(handle.is_attached());
        assert_eq!(handle.get().map(|r| r.id), Some(1));
        assert!(!handle.get().unwrap().is_connected());
    }

    #[test]
    fn detach_empties_slot() {
        let mut handle = RegionHandle::new();
        handle.attach(Stub::new(7));
        assert_eq!(handle.detach().map(|r| r.id), Some(7));
        assert!(!handle.is_attached());
        assert!(handle.detach().is_none());
    }

    #[test]
    fn error_messages() {
        let err = RegionError::Attribute {
            name: "data-x y".into(),
            message: "InvalidCharacterError".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to update attribute `data-x y`: InvalidCharacterError"
        );
        assert_eq!(
            RegionError::Focus("nope".into()).to_string(),
            "failed to focus region: nope"
        );
    }
}
