//! Error types for the browser layer.

use cellpad_core::RegionError;
use thiserror::Error;

/// Errors from mounting or driving an editable region in the browser.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EditableError {
    /// No global `window` (not running in a browser main thread).
    #[error("no window")]
    NoWindow,

    /// The window has no document.
    #[error("no document")]
    NoDocument,

    /// DOM call failed while creating or inserting the region.
    #[error("DOM error: {0}")]
    Dom(String),

    /// The region is in the middle of an event callback (called back into
    /// from an owner handler).
    #[error("editable region is busy handling an event")]
    Busy,

    #[error(transparent)]
    Region(#[from] RegionError),
}
