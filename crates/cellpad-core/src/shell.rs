//! Pass-through shell rules.
//!
//! The region behaves like a plain container: unknown attributes go straight
//! through. A handful of names are consumed by the component itself, the
//! component always owns `tabindex` and `contenteditable`, and the direct
//! manipulation events never bubble past the region.

use smol_str::SmolStr;

use crate::props::EditableProps;
use crate::region::EditableRegion;

/// Prop names consumed by the component and never forwarded.
pub const RESERVED_PROPS: &[&str] = &[
    "initialContent",
    "innerRef",
    "onChange",
    "html",
    "onBlur",
    "autoFocus",
    "allowEdit",
];

/// Events stopped at the region so a click-sensitive parent (a selectable
/// cell, say) does not react to text interaction.
pub const SUPPRESSED_EVENTS: &[&str] = &["mousedown", "dblclick", "click"];

const TAB_INDEX: &str = "tabindex";
const CONTENT_EDITABLE: &str = "contenteditable";

pub fn is_reserved(name: &str) -> bool {
    RESERVED_PROPS.contains(&name)
}

pub fn suppresses_propagation(event: &str) -> bool {
    SUPPRESSED_EVENTS.contains(&event)
}

/// Absent means editable.
pub fn resolve_allow_edit(allow_edit: Option<bool>) -> bool {
    allow_edit.unwrap_or(true)
}

/// `tabindex` and `contenteditable` are always set by the component; owner
/// values for them are dropped.
pub fn is_component_owned(name: &str) -> bool {
    name.eq_ignore_ascii_case(TAB_INDEX) || name.eq_ignore_ascii_case(CONTENT_EDITABLE)
}

/// Attributes the region should carry for a given set of props.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShellAttributes {
    forwarded: Vec<(SmolStr, String)>,
    editable: bool,
}

impl ShellAttributes {
    pub fn resolve(props: &EditableProps) -> Self {
        let forwarded = props
            .attributes
            .iter()
            .filter(|(name, _)| !is_reserved(name) && !is_component_owned(name))
            .map(|(name, value)| (SmolStr::new(name), value.clone()))
            .collect();

        Self {
            forwarded,
            editable: resolve_allow_edit(props.allow_edit),
        }
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Owner attributes that survived filtering.
    pub fn forwarded(&self) -> &[(SmolStr, String)] {
        &self.forwarded
    }

    /// Every attribute to write, forwarded ones first. The region is always
    /// keyboard focusable, editable or not.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.forwarded
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
            .chain([
                (TAB_INDEX, "0"),
                (
                    CONTENT_EDITABLE,
                    if self.editable { "true" } else { "false" },
                ),
            ])
    }

    /// Write these attributes to `region`, removing forwarded attributes
    /// that `previous` carried but this set no longer does.
    ///
    /// Failures are logged per attribute; the rest still get applied.
    pub fn apply<R: EditableRegion>(&self, region: &R, previous: Option<&ShellAttributes>) {
        if let Some(previous) = previous {
            for (name, _) in &previous.forwarded {
                if !self.forwarded.iter().any(|(n, _)| n == name) {
                    if let Err(e) = region.remove_attribute(name) {
                        tracing::warn!(error = %e, "could not remove stale attribute");
                    }
                }
            }
        }

        for (name, value) in self.iter() {
            if let Err(e) = region.set_attribute(name, value) {
                tracing::warn!(error = %e, "could not forward attribute");
            }
        }
    }

    /// Remove every attribute this set writes, handing the node back bare.
    pub fn clear<R: EditableRegion>(&self, region: &R) {
        for (name, _) in self.iter() {
            if let Err(e) = region.remove_attribute(name) {
                tracing::warn!(error = %e, "could not remove attribute");
            }
        }
    }
}
