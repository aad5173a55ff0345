//! Builders for the flat payloads posted to the backend.

use crate::block::{ActionParam, FlatBlock, TreeBlock};
use crate::changes::ChangeSet;
use crate::convert::{REFERENCE_ID_VARIABLE, tree_to_flat};
use crate::reference::{Clock, ReferenceId};
use serde_json::Value;

/// Optional user input sent along with a reference id request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceInput {
    pub input_title: Option<String>,
    pub input_text: Option<String>,
    pub input_audio: Option<String>,
    pub input_file: Option<String>,
}

/// A chat message in `dialog` mode.
pub fn chat_message_request(message: &str, reference_id: &ReferenceId) -> Vec<FlatBlock> {
    let block = TreeBlock::new("meta_data")
        .with_parent_block("block-0-1")
        .with_mode("dialog")
        .with_param(ActionParam::new("input_text", message))
        .with_param(ActionParam::new(
            REFERENCE_ID_VARIABLE,
            reference_id.to_string(),
        ));
    tree_to_flat(&[block])
}

/// Saves edited fields. Every changed field becomes a `processing` param after
/// the reference id.
pub fn field_update_request<I, K>(reference_id: &ReferenceId, changed: I) -> Vec<FlatBlock>
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    let block = changed.into_iter().fold(
        TreeBlock::new("meta_data")
            .with_mode("processing")
            .with_param(ActionParam::new(
                REFERENCE_ID_VARIABLE,
                reference_id.to_string(),
            )),
        |block, (field, value)| block.with_param(ActionParam::new(field, value).with_mode("processing")),
    );
    tree_to_flat(&[block])
}

/// Saves every pending edit in `changes`, one param per field name.
pub fn changes_request<C: Clock>(
    reference_id: &ReferenceId,
    changes: &ChangeSet<C>,
) -> Vec<FlatBlock> {
    field_update_request(reference_id, changes.changed_fields())
}

/// Asks the server to complete a partial `project.user` id with its timestamp.
///
/// Title and text are always sent, defaulting to empty strings. Audio and file
/// are sent only when present.
pub fn reference_request(partial_id: &str, input: &ReferenceInput) -> Vec<FlatBlock> {
    let mut block = TreeBlock::new("card_6_fields")
        .with_parent_block("-reference_id-")
        .with_mode("processing")
        .with_param(ActionParam::new(
            "input_title",
            input.input_title.clone().unwrap_or_default(),
        ))
        .with_param(ActionParam::new(
            "input_text",
            input.input_text.clone().unwrap_or_default(),
        ))
        .with_param(ActionParam::new(REFERENCE_ID_VARIABLE, partial_id));

    if let Some(audio) = &input.input_audio {
        block = block.with_param(ActionParam::new("input_audio", audio.as_str()));
    }
    if let Some(file) = &input.input_file {
        block = block.with_param(ActionParam::new("input_file", file.as_str()));
    }
    tree_to_flat(&[block])
}

/// Pulls the server-issued reference id out of a response to [`reference_request`].
///
/// The id lives in the first record's items as a `meta` entry with
/// `variable == "reference_id"`.
pub fn extract_reference_id(response: &[FlatBlock]) -> Option<String> {
    response
        .first()?
        .items
        .as_ref()?
        .iter()
        .filter_map(|item| item.meta())
        .find(|meta| meta.get("variable").and_then(Value::as_str) == Some(REFERENCE_ID_VARIABLE))
        .and_then(|meta| meta.get("data"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
