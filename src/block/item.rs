use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Payload for picture blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PictureData {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Payload for action buttons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ButtonData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Payload for text blocks carrying plain or HTML content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RichText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

/// The `data` field of an item.
///
/// Variants are tried in declaration order. The structured variants reject unknown
/// keys, so any record that does not fit one of them exactly lands in `Other` and
/// round-trips untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemData {
    Bool(bool),
    Number(Number),
    Text(String),
    Picture(PictureData),
    Button(ButtonData),
    Rich(RichText),
    Other(Value),
}

impl ItemData {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ItemData::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for ItemData {
    fn from(s: &str) -> Self {
        ItemData::Text(s.to_string())
    }
}

impl From<String> for ItemData {
    fn from(s: String) -> Self {
        ItemData::Text(s)
    }
}

impl fmt::Display for ItemData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemData::Bool(b) => write!(f, "{}", b),
            ItemData::Number(n) => write!(f, "{}", n),
            ItemData::Text(s) => write!(f, "{}", s),
            ItemData::Picture(p) => write!(f, "[picture {}]", p.src),
            ItemData::Button(b) => write!(f, "[button {}]", b.text.as_deref().unwrap_or("")),
            ItemData::Rich(r) => write!(
                f,
                "{}",
                r.content.as_deref().or(r.html.as_deref()).unwrap_or("")
            ),
            ItemData::Other(v) => write!(f, "{}", v),
        }
    }
}

/// A leaf display/data record, usually supplied by the backend.
///
/// Items are opaque to conversion and merging. The known fields are typed when
/// they hold the expected JSON type. A field that does not is kept in `extra`
/// under its own key, so every item round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ItemData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    /// Edit policy such as `"editable"` or `"readonly"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fate: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for Item {
    fn from(mut fields: Map<String, Value>) -> Self {
        Self {
            title: take_string(&mut fields, "title"),
            data: take_data(&mut fields),
            hidden_data: fields.remove("hidden_data"),
            status: take_string(&mut fields, "status"),
            variable: take_string(&mut fields, "variable"),
            fate: take_string(&mut fields, "fate"),
            extra: fields,
        }
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !fields.get(key).is_some_and(Value::is_string) {
        return None;
    }
    match fields.remove(key) {
        Some(Value::String(text)) => Some(text),
        _ => None,
    }
}

// A `null` stays in `extra` so it is written back as `null`.
fn take_data(fields: &mut Map<String, Value>) -> Option<ItemData> {
    if fields.get("data").is_none_or(Value::is_null) {
        return None;
    }
    let raw = fields.remove("data")?;
    match ItemData::deserialize(&raw) {
        Ok(data) => Some(data),
        Err(_) => {
            fields.insert("data".to_string(), raw);
            None
        }
    }
}

impl Item {
    pub fn new(title: impl Into<String>, data: impl Into<ItemData>) -> Self {
        Self {
            title: Some(title.into()),
            data: Some(data.into()),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// The `meta` record some backend responses attach to an item.
    pub fn meta(&self) -> Option<&Value> {
        self.extra.get("meta")
    }
}
