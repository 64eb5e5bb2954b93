//! cellpad-core: synchronization rules for a free-text editable region.
//!
//! The region is edited imperatively by the user (the platform's native
//! in-place editing) while its owner re-renders declaratively. This crate
//! keeps the two from fighting:
//!
//! - `region`: the `EditableRegion` platform trait and the `RegionHandle` slot
//! - `seed`: pushes initial markup into the region at fixed lifecycle points
//! - `emit`: deduplicated change notifications read back from the region
//! - `shell`: attribute pass-through and propagation rules
//! - `props`: owner-supplied configuration
//! - `editable`: `ContentEditable`, which ties the above together
//!
//! Nothing here touches a browser. Platform crates implement
//! `EditableRegion` and drive `ContentEditable` from their event loop.

pub mod editable;
pub mod emit;
pub mod props;
pub mod region;
pub mod seed;
pub mod shell;


pub use editable::{ContentEditable, EditableHandlers, Lifecycle};
pub use emit::{ChangeEmitter, Emission};
pub use props::EditableProps;
pub use region::{EditableRegion, RegionError, RegionHandle};
pub use seed::{SeedController, SeedOutcome};
pub use shell::{
    RESERVED_PROPS, SUPPRESSED_EVENTS, ShellAttributes, is_component_owned, is_reserved,
    resolve_allow_edit, suppresses_propagation,
};
pub use smol_str::SmolStr;
