//! Browser DOM layer for cellpad.
//!
//! Binds a `web_sys::HtmlElement` to the sync rules in `cellpad-core`.
//! Assumes a `wasm32-unknown-unknown` target.
//!
//! # Architecture
//!
//! - `region`: `EditableRegion` over an `HtmlElement`
//! - `shell`: propagation suppression listeners
//! - `mount`: imperative mounting with native `input`/`blur` listeners
//! - `thrown`: parking JS callback exceptions until the state is released
//! - `component`: Dioxus component (feature `dioxus`)
//!
//! # Re-exports
//!
//! This crate re-exports `cellpad-core` so consumers only need to depend on
//! `cellpad-browser`.

pub use cellpad_core;
pub use cellpad_core::*;

pub mod error;
pub mod mount;
pub mod region;
pub mod shell;
pub mod thrown;

#[cfg(feature = "dioxus")]
pub mod component;

pub use error::EditableError;
pub use mount::{BrowserHandlers, MountedEditable, mount, mount_in, mount_with};
pub use region::BrowserRegion;
pub use shell::suppress_propagation;
pub use thrown::ThrownSlot;

#[cfg(feature = "dioxus")]
pub use component::{EditableDiv, EditableDivProps};
