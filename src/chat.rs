//! Turns chat answers from the backend into renderable blocks.

use crate::block::{Item, ItemData, TreeBlock};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shown in place of an answer when the chat exchange fails.
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong. Please try again later.";

const CHAT_PARENT_BLOCK: &str = "chat-message";
const CHAT_ACTION_MODE: &str = "layout";

/// One component of a chat answer as sent by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageComponent {
    pub component_name: String,
    #[serde(default)]
    pub parent_block_id: Option<String>,
    #[serde(default)]
    pub items: Vec<ComponentItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub data: Option<ItemData>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub variable: Option<String>,
}

/// Maps a backend status onto the renderer's vocabulary. Unknown statuses pass through.
pub fn map_status(status: &str) -> &str {
    match status {
        "nice" | "normal" => "normal",
        "warning" => "missed",
        "alert" => "unprocessed",
        other => other,
    }
}

/// Converts answer components into layout blocks, one per component.
pub fn transform_message_components(components: &[MessageComponent]) -> Vec<TreeBlock> {
    components
        .iter()
        .enumerate()
        .map(|(index, component)| {
            let items: Vec<Item> = component
                .items
                .iter()
                .map(|item| transform_item(item, &component.component_name))
                .collect();
            debug!(component = %component.component_name, items = items.len(), "transformed chat component");

            let parent = component
                .parent_block_id
                .as_deref()
                .filter(|p| !p.is_empty())
                .unwrap_or(CHAT_PARENT_BLOCK);

            let component_id = format!("chat-{}-{}", component.component_name, index);
            let mut block = TreeBlock::new(component.component_name.as_str())
                .with_parent_block(parent)
                .with_mode(CHAT_ACTION_MODE)
                .with_items(items);
            block.components_id = Some(format!("chat-components-{}", component_id));
            block.with_component_id(component_id)
        })
        .collect()
}

/// A single plain-text message block.
pub fn text_message_block(content: &str, message_id: &str) -> TreeBlock {
    let mut block = TreeBlock::new("text_block")
        .with_component_id(message_id)
        .with_parent_block(CHAT_PARENT_BLOCK)
        .with_mode(CHAT_ACTION_MODE)
        .with_items(vec![Item {
            data: Some(ItemData::from(content)),
            status: Some("normal".to_string()),
            ..Default::default()
        }]);
    block.components_id = Some(format!("text-{}", message_id));
    block
}

/// The apology block shown when a chat exchange fails.
pub fn fallback_message_block(message_id: &str) -> TreeBlock {
    text_message_block(FALLBACK_REPLY, message_id)
}

fn transform_item(item: &ComponentItem, component_name: &str) -> Item {
    // Buttons render their title as the label.
    let data = match (component_name, &item.title) {
        ("action_button", Some(title)) => Some(ItemData::Text(title.clone())),
        _ => item.data.clone(),
    };
    Item {
        title: item.title.clone(),
        data,
        status: Some(map_status(&item.status).to_string()),
        variable: item.variable.clone().filter(|v| !v.is_empty()),
        ..Default::default()
    }
}
