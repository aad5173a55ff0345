//! Unit tests for the block data model and error types.
use blocktree::prelude::*;
use serde_json::json;

#[test]
fn test_item_data_variants() {
    let parse = |v: serde_json::Value| serde_json::from_value::<ItemData>(v).unwrap();

    assert_eq!(parse(json!(true)), ItemData::Bool(true));
    assert!(matches!(parse(json!(42)), ItemData::Number(_)));
    assert_eq!(parse(json!("hi")), ItemData::from("hi"));
    assert!(matches!(
        parse(json!({ "src": "/a.png", "width": 10 })),
        ItemData::Picture(PictureData { width: Some(10), .. })
    ));
    assert!(matches!(
        parse(json!({ "text": "Go", "type": "primary" })),
        ItemData::Button(ButtonData { kind: Some(_), .. })
    ));
    assert!(matches!(
        parse(json!({ "html": "<b>x</b>" })),
        ItemData::Rich(RichText { html: Some(_), .. })
    ));
    // Extra keys keep the record opaque.
    assert!(matches!(
        parse(json!({ "src": "/a.png", "caption": "c" })),
        ItemData::Other(_)
    ));
}

#[test]
fn test_item_passes_unknown_fields_through() {
    let raw = json!({
        "title": "Logo",
        "data": { "src": "/logo.png", "alt": "logo" },
        "hidden_data": "",
        "status": "normal",
        "variable": "19003",
        "fate": "readonly",
        "meta": { "variable": "reference_id", "data": "1.2.3" }
    });
    let item: Item = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(item.meta(), Some(&json!({ "variable": "reference_id", "data": "1.2.3" })));
    assert_eq!(serde_json::to_value(&item).unwrap(), raw);
}

#[test]
fn test_item_keeps_untyped_fields_verbatim() {
    let raw = json!({ "title": 7, "data": null, "fate": ["readonly"], "hidden_data": [1] });
    let item: Item = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(item.title, None);
    assert_eq!(item.data, None);
    assert_eq!(item.hidden_data, Some(json!([1])));
    assert_eq!(item.extra.get("title"), Some(&json!(7)));
    assert_eq!(serde_json::to_value(&item).unwrap(), raw);
}

#[test]
fn test_item_data_display() {
    assert_eq!(ItemData::from("plain").to_string(), "plain");
    assert_eq!(ItemData::Bool(false).to_string(), "false");
    let picture = ItemData::Picture(PictureData {
        src: "/p.png".to_string(),
        alt: None,
        width: None,
        height: None,
    });
    assert_eq!(picture.to_string(), "[picture /p.png]");
}

#[test]
fn test_tree_block_helpers() {
    let block = TreeBlock::new("card")
        .with_mode("layout")
        .with_param(ActionParam::new("a", 1))
        .with_children(vec![]);
    assert!(block.is_leaf());
    assert_eq!(block.param("a").map(|p| &p.data), Some(&json!(1)));
    assert!(block.param("b").is_none());
}

#[test]
fn test_component_id_navigation() {
    let id: ComponentId = "2.0.1".parse().unwrap();
    assert_eq!(id.parent().map(|p| p.to_string()).as_deref(), Some("2.0"));
    assert_eq!(ComponentId::root(2).child(0).child(1), id);
}

#[test]
fn test_error_display() {
    let err = ShapeError::Orphan {
        component_id: "3.1".to_string(),
        parent_id: "3".to_string(),
    };
    assert!(err.to_string().contains("3.1"));

    let err = FormatError::SegmentCount {
        id: "bad.id".to_string(),
        found: 2,
    };
    assert!(err.to_string().contains("exactly 3"));
    assert!(err.to_string().contains("bad.id"));

    let err = MergeError::NotAnArray("null");
    assert!(err.to_string().contains("JSON array"));

    let err = BackendError::Unavailable("connection refused".to_string());
    assert!(err.to_string().contains("connection refused"));
}
