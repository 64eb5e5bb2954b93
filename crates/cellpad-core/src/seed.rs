//! Seeding: pushing owner-supplied markup into the region.
//!
//! Seeding only happens at three points:
//!
//! 1. on mount, if initial markup is present
//! 2. once, on the first render pass after mount (markup that arrived a
//!    tick late)
//! 3. whenever the initial markup prop changes value
//!
//! Any other re-render leaves the region alone. Once the user has typed,
//! the region's content belongs to them until the owner supplies a new
//! value.

use crate::props::EditableProps;
use crate::region::EditableRegion;

/// What a seeding pass did to the region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    /// The region's content was overwritten.
    pub seeded: bool,
    /// Focus was moved into the region.
    pub focused: bool,
}

/// Tracks which seeding triggers have already fired for one instance.
#[derive(Debug)]
pub struct SeedController {
    first_render_pending: bool,
    observed_content: Option<String>,
    observed_focus: Option<bool>,
}

impl Default for SeedController {
    fn default() -> Self {
        Self {
            first_render_pending: true,
            observed_content: None,
            observed_focus: None,
        }
    }
}

impl SeedController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the one-shot post-mount seed is still armed.
    pub fn first_render_pending(&self) -> bool {
        self.first_render_pending
    }

    /// Mount-time seed and focus.
    ///
    /// No-op without an attached region.
    pub fn on_mount<R: EditableRegion>(
        &mut self,
        region: Option<&R>,
        props: &EditableProps,
    ) -> SeedOutcome {
        let Some(region) = region else {
            tracing::debug!("on_mount: no region attached, skipping seed");
            return SeedOutcome::default();
        };

        self.observed_content = props.initial_content.clone();
        self.observed_focus = props.auto_focus;

        let mut outcome = SeedOutcome::default();
        if props.wants_focus() {
            outcome.focused = focus(region);
        }
        if let Some(markup) = props.seed_markup() {
            tracing::debug!(len = markup.len(), "on_mount: seeding region");
            region.replace_content(markup);
            outcome.seeded = true;
        }
        outcome
    }

    /// Post-render check.
    ///
    /// Reseeds when the initial markup changed since it was last observed,
    /// refocuses when `auto_focus` changed to true, and consumes the
    /// first-render flag. No-op without an attached region.
    pub fn after_render<R: EditableRegion>(
        &mut self,
        region: Option<&R>,
        props: &EditableProps,
    ) -> SeedOutcome {
        let Some(region) = region else {
            return SeedOutcome::default();
        };

        let mut outcome = SeedOutcome::default();

        if props.auto_focus != self.observed_focus {
            self.observed_focus = props.auto_focus;
            if props.wants_focus() {
                outcome.focused = focus(region);
            }
        }

        if props.initial_content != self.observed_content {
            self.observed_content = props.initial_content.clone();
            if let Some(markup) = props.seed_markup() {
                tracing::debug!(len = markup.len(), "after_render: initial content changed, reseeding");
                region.replace_content(markup);
                outcome.seeded = true;
            }
        }

        if self.first_render_pending {
            self.first_render_pending = false;
            if let (false, Some(markup)) = (outcome.seeded, props.seed_markup()) {
                if region.serialized_content() != markup {
                    tracing::debug!(len = markup.len(), "after_render: first render seed");
                    region.replace_content(markup);
                    outcome.seeded = true;
                }
            }
        }

        outcome
    }
}

fn focus<R: EditableRegion>(region: &R) -> bool {
    if !region.is_connected() {
        tracing::debug!("region not in a document, skipping focus");
        return false;
    }
    match region.focus() {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "could not focus region");
            false
        }
    }
}
