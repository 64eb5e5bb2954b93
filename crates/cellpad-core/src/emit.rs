//! Change emission: turns native edits into deduplicated owner notifications.

use crate::region::EditableRegion;

/// Result of one emitter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// The region's content differed from the last emitted value and the
    /// owner was notified (if it supplied a handler).
    Emitted,
    /// Same content as last time, nothing was sent.
    Unchanged,
}

/// Remembers the last markup handed to the owner.
///
/// Starts out as the empty string, so an empty region never emits until
/// something is typed into it.
#[derive(Debug, Default)]
pub struct ChangeEmitter {
    last_emitted: String,
}

impl ChangeEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_emitted(&self) -> &str {
        &self.last_emitted
    }

    /// Read the region and notify `on_change` if its markup changed.
    ///
    /// A missing or detached region reads as the empty string. The handler
    /// runs before `last_emitted` is updated; `last_emitted` is written after
    /// every pass, changed or not.
    pub fn emit<R: EditableRegion>(
        &mut self,
        region: Option<&R>,
        on_change: Option<&mut (dyn FnMut(&str) + '_)>,
    ) -> Emission {
        let markup = region.map(|r| r.serialized_content()).unwrap_or_default();

        let emission = if markup != self.last_emitted {
            tracing::trace!(len = markup.len(), "emitting change");
            if let Some(on_change) = on_change {
                on_change(&markup);
            }
            Emission::Emitted
        } else {
            Emission::Unchanged
        };

        self.last_emitted = markup;
        emission
    }
}
