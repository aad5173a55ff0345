use super::item::Item;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named parameter attached to a block, unique by `variable` within its list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionParam {
    pub variable: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_mode: Option<String>,
}

impl ActionParam {
    pub fn new(variable: impl Into<String>, data: impl Into<Value>) -> Self {
        Self {
            variable: variable.into(),
            data: data.into(),
            action_mode: None,
        }
    }

    pub fn with_mode(mut self, action_mode: impl Into<String>) -> Self {
        self.action_mode = Some(action_mode.into());
        self
    }
}

/// A node of the nested, caller-authored block configuration.
///
/// Identity for merging is positional: a block is addressed by its path from the
/// forest root, never by a field it carries. Unknown JSON keys are kept in `extra`
/// and written back unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TreeBlock {
    #[serde(default)]
    pub component_name: String,
    /// Optional caller-assigned alias, used as a secondary merge key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_block_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub action_params: Vec<ActionParam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,
    /// `None` marks a leaf.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeBlock>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TreeBlock {
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            ..Default::default()
        }
    }

    pub fn with_parent_block(mut self, parent_block_id: impl Into<String>) -> Self {
        self.parent_block_id = Some(parent_block_id.into());
        self
    }

    pub fn with_mode(mut self, action_mode: impl Into<String>) -> Self {
        self.action_mode = Some(action_mode.into());
        self
    }

    pub fn with_param(mut self, param: ActionParam) -> Self {
        self.action_params.push(param);
        self
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = Some(items);
        self
    }

    pub fn with_children(mut self, children: Vec<TreeBlock>) -> Self {
        self.children = Some(children);
        self
    }

    /// Tags the block with its own `component_id`. It is kept in `extra` and is
    /// replaced by the positional id when the tree is flattened.
    pub fn with_component_id(mut self, component_id: impl Into<String>) -> Self {
        self.extra
            .insert("component_id".to_string(), Value::String(component_id.into()));
        self
    }

    /// The `component_id` the block carries itself, if any.
    pub fn component_id(&self) -> Option<&str> {
        self.extra.get("component_id").and_then(Value::as_str)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.as_ref().is_none_or(|c| c.is_empty())
    }

    /// Looks up a parameter by its variable name.
    pub fn param(&self, variable: &str) -> Option<&ActionParam> {
        self.action_params.iter().find(|p| p.variable == variable)
    }
}

/// The backend-facing form of a block: no `children`, plus a synthesized
/// positional `component_id` such as `"1.0"`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlatBlock {
    pub component_id: String,
    #[serde(default)]
    pub component_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_block_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub action_params: Vec<ActionParam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FlatBlock {
    /// Copies every field of `block` except `children`.
    pub(crate) fn from_tree(block: &TreeBlock, component_id: String) -> Self {
        let mut extra = block.extra.clone();
        // The synthesized id always wins over a stale one carried by the tree.
        extra.remove("component_id");
        Self {
            component_id,
            component_name: block.component_name.clone(),
            components_id: block.components_id.clone(),
            parent_block_id: block.parent_block_id.clone(),
            action_mode: block.action_mode.clone(),
            action_params: block.action_params.clone(),
            items: block.items.clone(),
            extra,
        }
    }

    /// Drops the `component_id` and attaches the given children.
    pub(crate) fn into_tree(self, children: Option<Vec<TreeBlock>>) -> TreeBlock {
        TreeBlock {
            component_name: self.component_name,
            components_id: self.components_id,
            parent_block_id: self.parent_block_id,
            action_mode: self.action_mode,
            action_params: self.action_params,
            items: self.items,
            children,
            extra: self.extra,
        }
    }
}
