//! Owner-supplied configuration for an editable region.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

/// Everything the owner hands to a `ContentEditable` on each render.
///
/// Callbacks are not part of this struct; they live in
/// [`EditableHandlers`](crate::EditableHandlers) since they are neither
/// comparable nor deserializable.
///
/// Deserializes from a camelCase options object. Keys that aren't one of the
/// named fields are collected into `attributes` and forwarded to the region
/// (minus the reserved names, see [`crate::shell`]). Numbers are written as
/// text. `true` makes a plain attribute present and `false` leaves it off,
/// while enumerated ones (`data-*`, `aria-*`, `spellcheck`, `draggable`)
/// keep the literal `"true"`/`"false"`. Null,
/// arrays and nested objects are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawProps")]
pub struct EditableProps {
    /// Markup to seed the region with.
    pub initial_content: Option<String>,
    /// Move focus into the region on mount and whenever this flips to true.
    pub auto_focus: Option<bool>,
    /// Native in-place editing. Absent means enabled.
    pub allow_edit: Option<bool>,
    /// Pass-through attributes (`class`, `id`, `aria-*`, ...).
    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,
}

impl EditableProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_content(mut self, markup: impl Into<String>) -> Self {
        self.initial_content = Some(markup.into());
        self
    }

    pub fn with_auto_focus(mut self, auto_focus: bool) -> Self {
        self.auto_focus = Some(auto_focus);
        self
    }

    pub fn with_allow_edit(mut self, allow_edit: bool) -> Self {
        self.allow_edit = Some(allow_edit);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Initial markup if it is present and non-empty. Empty markup never seeds.
    pub fn seed_markup(&self) -> Option<&str> {
        self.initial_content.as_deref().filter(|s| !s.is_empty())
    }

    pub fn wants_focus(&self) -> bool {
        self.auto_focus.unwrap_or(false)
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawProps {
    initial_content: Option<String>,
    auto_focus: Option<bool>,
    allow_edit: Option<bool>,
    #[serde(flatten)]
    attributes: BTreeMap<String, AttributeValue>,
}

impl From<RawProps> for EditableProps {
    fn from(raw: RawProps) -> Self {
        let attributes = raw
            .attributes
            .into_iter()
            .filter_map(|(name, value)| {
                let text = value.into_text(&name)?;
                Some((name, text))
            })
            .collect();
        Self {
            initial_content: raw.initial_content,
            auto_focus: raw.auto_focus,
            allow_edit: raw.allow_edit,
            attributes,
        }
    }
}

/// Attributes whose `"false"` value means something, unlike a plain
/// boolean attribute where presence alone switches it on.
fn keeps_literal_flag(name: &str) -> bool {
    name.starts_with("data-")
        || name.starts_with("aria-")
        || matches!(name, "spellcheck" | "draggable")
}

/// A pass-through value as a loosely typed options object carries it.
enum AttributeValue {
    Text(String),
    Flag(bool),
    Skipped,
}

impl AttributeValue {
    fn into_text(self, name: &str) -> Option<String> {
        match self {
            AttributeValue::Text(text) => Some(text),
            AttributeValue::Flag(flag) if keeps_literal_flag(name) => Some(flag.to_string()),
            AttributeValue::Flag(true) => Some(String::new()),
            AttributeValue::Flag(false) | AttributeValue::Skipped => None,
        }
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AttributeValueVisitor)
    }
}

struct AttributeValueVisitor;

impl<'de> Visitor<'de> for AttributeValueVisitor {
    type Value = AttributeValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an attribute value")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(AttributeValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(AttributeValue::Text(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(AttributeValue::Flag(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(AttributeValue::Text(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(AttributeValue::Text(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(AttributeValue::Text(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(AttributeValue::Skipped)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(AttributeValue::Skipped)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        AttributeValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(AttributeValue::Skipped)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(AttributeValue::Skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_options() {
        let props: EditableProps = serde_json::from_str(
            r#"{
                "initialContent": "<b>hi</b>",
                "autoFocus": true,
                "class": "cell-editor",
                "aria-label": "Cell A1"
            }"#,
        )
        .unwrap();

        assert_eq!(props.initial_content.as_deref(), Some("<b>hi</b>"));
        assert_eq!(props.auto_focus, Some(true));
        assert_eq!(props.allow_edit, None);
        assert_eq!(props.attributes.len(), 2);
        assert_eq!(props.attributes["class"], "cell-editor");
        assert_eq!(props.attributes["aria-label"], "Cell A1");
    }

    #[test]
    fn loose_attribute_values_are_stringified() {
        let props: EditableProps = serde_json::from_str(
            r#"{
                "initialContent": "x",
                "hidden": true,
                "spellcheck": false,
                "data-row": 3,
                "data-ratio": 0.5,
                "aria-busy": false,
                "title": null,
                "style": { "color": "red" },
                "data-tags": ["a", "b"]
            }"#,
        )
        .unwrap();

        assert_eq!(props.initial_content.as_deref(), Some("x"));
        insta::assert_debug_snapshot!(props.attributes, @r#"
        {
            "aria-busy": "false",
            "data-ratio": "0.5",
            "data-row": "3",
            "hidden": "",
            "spellcheck": "false",
        }
        "#);
    }

    #[test]
    fn named_fields_keep_their_types() {
        let err = serde_json::from_str::<EditableProps>(r#"{"autoFocus": "yes"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn empty_object_is_default() {
        let props: EditableProps = serde_json::from_str("{}").unwrap();
        assert_eq!(props, EditableProps::default());
    }

    #[test]
    fn empty_initial_content_does_not_seed() {
        let props = EditableProps::new().with_initial_content("");
        assert_eq!(props.seed_markup(), None);
        assert!(!props.wants_focus());
    }

    #[test]
    fn builder_sets_fields() {
        let props = EditableProps::new()
            .with_initial_content("x")
            .with_auto_focus(true)
            .with_allow_edit(false)
            .with_attribute("id", "a1");
        assert_eq!(props.seed_markup(), Some("x"));
        assert!(props.wants_focus());
        assert_eq!(props.allow_edit, Some(false));
        assert_eq!(props.attributes["id"], "a1");
    }
}
