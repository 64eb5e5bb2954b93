//! `ContentEditable`: one editable region bound to its owner.
//!
//! A platform layer drives this from its lifecycle and event hooks:
//!
//! ```text
//! attach(region) -> mount() -> [set_props() -> after_render()]*
//!                           \-> handle_input() / handle_blur()
//!                -> unmount()
//! ```

use crate::emit::{ChangeEmitter, Emission};
use crate::props::EditableProps;
use crate::region::{EditableRegion, RegionHandle};
use crate::seed::{SeedController, SeedOutcome};
use crate::shell::{ShellAttributes, resolve_allow_edit};

/// Where an instance is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Unmounted,
    /// Mounted; the post-render seed check hasn't run yet.
    SeedPending,
    /// Mounted; only an initial-content change can seed from here on.
    Seeded,
}

impl Lifecycle {
    pub fn is_mounted(self) -> bool {
        !matches!(self, Lifecycle::Unmounted)
    }
}

/// Owner callbacks. `E` is the platform's blur event type.
pub struct EditableHandlers<R, E> {
    pub on_change: Option<Box<dyn FnMut(&str)>>,
    pub on_blur: Option<Box<dyn FnMut(&E)>>,
    pub inner_ref: Option<Box<dyn FnMut(Option<&R>)>>,
}

impl<R, E> Default for EditableHandlers<R, E> {
    fn default() -> Self {
        Self {
            on_change: None,
            on_blur: None,
            inner_ref: None,
        }
    }
}

impl<R, E> EditableHandlers<R, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn on_blur(mut self, f: impl FnMut(&E) + 'static) -> Self {
        self.on_blur = Some(Box::new(f));
        self
    }

    pub fn inner_ref(mut self, f: impl FnMut(Option<&R>) + 'static) -> Self {
        self.inner_ref = Some(Box::new(f));
        self
    }
}

impl<R, E> std::fmt::Debug for EditableHandlers<R, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditableHandlers")
            .field("on_change", &self.on_change.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .field("inner_ref", &self.inner_ref.is_some())
            .finish()
    }
}

/// The sync state for one editable region.
pub struct ContentEditable<R, E = ()> {
    handle: RegionHandle<R>,
    seed: SeedController,
    emitter: ChangeEmitter,
    lifecycle: Lifecycle,
    props: EditableProps,
    handlers: EditableHandlers<R, E>,
}

impl<R: EditableRegion, E> ContentEditable<R, E> {
    pub fn new(props: EditableProps, handlers: EditableHandlers<R, E>) -> Self {
        Self {
            handle: RegionHandle::new(),
            seed: SeedController::new(),
            emitter: ChangeEmitter::new(),
            lifecycle: Lifecycle::Unmounted,
            props,
            handlers,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn props(&self) -> &EditableProps {
        &self.props
    }

    pub fn region(&self) -> Option<&R> {
        self.handle.get()
    }

    pub fn last_emitted(&self) -> &str {
        self.emitter.last_emitted()
    }

    /// Re-resolved from the current props on every call.
    pub fn is_editable(&self) -> bool {
        resolve_allow_edit(self.props.allow_edit)
    }

    pub fn shell_attributes(&self) -> ShellAttributes {
        ShellAttributes::resolve(&self.props)
    }

    /// Replace the owner callbacks (a re-render may hand over new closures).
    pub fn set_handlers(&mut self, handlers: EditableHandlers<R, E>) {
        self.handlers = handlers;
    }

    /// Store the region and tell the owner about it.
    ///
    /// Attaching over an existing region detaches the old one first.
    pub fn attach(&mut self, region: R) {
        if self.handle.is_attached() {
            self.detach();
        }
        self.handle.attach(region);
        if let Some(inner_ref) = self.handlers.inner_ref.as_mut() {
            inner_ref(self.handle.get());
        }
    }

    /// Drop the region and tell the owner it's gone.
    pub fn detach(&mut self) -> Option<R> {
        let region = self.handle.detach();
        if region.is_some() {
            if let Some(inner_ref) = self.handlers.inner_ref.as_mut() {
                inner_ref(None);
            }
        }
        region
    }

    /// Mount-time seed and focus. Ignored if already mounted.
    pub fn mount(&mut self) -> SeedOutcome {
        if self.lifecycle.is_mounted() {
            tracing::debug!("mount: already mounted");
            return SeedOutcome::default();
        }
        self.lifecycle = Lifecycle::SeedPending;
        self.seed.on_mount(self.handle.get(), &self.props)
    }

    /// Record the props for the render that is about to happen.
    ///
    /// Touches nothing in the region; the post-render pass does that.
    pub fn set_props(&mut self, props: EditableProps) {
        self.props = props;
    }

    /// Post-render pass: runs the seeding checks against the current props.
    pub fn after_render(&mut self) -> SeedOutcome {
        if !self.lifecycle.is_mounted() {
            return SeedOutcome::default();
        }
        let outcome = self.seed.after_render(self.handle.get(), &self.props);
        if !self.seed.first_render_pending() {
            self.lifecycle = Lifecycle::Seeded;
        }
        outcome
    }

    /// Native input event.
    pub fn handle_input(&mut self) -> Emission {
        self.flush()
    }

    /// Native blur: flush, then the owner's blur handler.
    pub fn handle_blur(&mut self, event: &E) -> Emission {
        let emission = self.flush();
        if let Some(on_blur) = self.handlers.on_blur.as_mut() {
            on_blur(event);
        }
        emission
    }

    /// Read the region and emit if it changed.
    pub fn flush(&mut self) -> Emission {
        let on_change = self
            .handlers
            .on_change
            .as_mut()
            .map(|f| &mut **f as &mut dyn FnMut(&str));
        self.emitter.emit(self.handle.get(), on_change)
    }

    /// Move focus into the region, if there is one in a document.
    pub fn focus(&self) -> bool {
        let region = self.handle.get().filter(|r| r.is_connected());
        match region.map(|r| r.focus()) {
            Some(Ok(())) => true,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "could not focus region");
                false
            }
            None => false,
        }
    }

    /// Detach and return to `Unmounted`. The first-render seed does not
    /// re-arm.
    pub fn unmount(&mut self) -> Option<R> {
        if self.lifecycle.is_mounted() {
            tracing::debug!("unmounting editable region");
        }
        self.lifecycle = Lifecycle::Unmounted;
        self.detach()
    }
}

impl<R, E> std::fmt::Debug for ContentEditable<R, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentEditable")
            .field("attached", &self.handle.get().is_some())
            .field("lifecycle", &self.lifecycle)
            .field("props", &self.props)
            .field("last_emitted", &self.emitter.last_emitted())
            .field("handlers", &self.handlers)
            .finish()
    }
}
