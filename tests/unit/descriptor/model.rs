use super::*;

use crate::atlas::pack::{Atlas, AtlasFrame};

#[test]
fn asset_record_omits_unset_optional_fields() {
    let record = AssetRecord {
        source: None,
        x: 3,
        y: -7,
        flip_h: false,
        flip_v: false,
        uses_palette: false,
    };
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json, serde_json::json!({"x": 3, "y": -7}));
}

#[test]
fn asset_record_uses_camel_case_flag_names() {
    let record = AssetRecord {
        source: Some("main_5".to_string()),
        x: 0,
        y: 0,
        flip_h: true,
        flip_v: true,
        uses_palette: true,
    };
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "source": "main_5",
            "x": 0,
            "y": 0,
            "flipH": true,
            "flipV": true,
            "usesPalette": true,
        })
    );
}

#[test]
fn asset_record_round_trips() {
    let record = AssetRecord {
        source: Some("s".to_string()),
        x: 1,
        y: 2,
        flip_h: true,
        flip_v: false,
        uses_palette: true,
    };
    let json = serde_json::to_string(&record).unwrap();
    let back: AssetRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

fn one_frame_atlas() -> Atlas {
    let mut frames = BTreeMap::new();
    frames.insert(
        "chair_a".to_string(),
        AtlasFrame {
            rect: FrameRect {
                x: 10,
                y: 20,
                w: 30,
                h: 40,
            },
            sprite_source_size: FrameRect {
                x: 0,
                y: 0,
                w: 30,
                h: 40,
            },
            source_size: FrameSize { w: 30, h: 40 },
            pivot: Pivot { x: 0.5, y: 0.5 },
        },
    );
    Atlas {
        image_png: Vec::new(),
        width: 100,
        height: 60,
        frames,
    }
}

#[test]
fn spritesheet_from_atlas_copies_frames_and_meta() {
    let sheet = Spritesheet::from_atlas(&one_frame_atlas(), "chair.png");

    let frame = &sheet.frames["chair_a"];
    assert_eq!(frame.frame.x, 10);
    assert!(!frame.rotated);
    assert!(!frame.trimmed);
    assert_eq!(frame.source_size, FrameSize { w: 30, h: 40 });

    assert_eq!(sheet.meta.image, "chair.png");
    assert_eq!(sheet.meta.format, "RGBA8888");
    assert_eq!(sheet.meta.size, FrameSize { w: 100, h: 60 });
    assert_eq!(sheet.meta.scale, "1");
}

#[test]
fn descriptor_serializes_client_facing_key_names() {
    let mut assets = BTreeMap::new();
    assets.insert(
        "chair_a".to_string(),
        AssetRecord {
            source: None,
            x: 0,
            y: 0,
            flip_h: false,
            flip_v: false,
            uses_palette: false,
        },
    );
    let descriptor = Descriptor {
        name: "chair".to_string(),
        logic_type: "furniture_basic".to_string(),
        visualization_type: "furniture_animated".to_string(),
        assets,
        logic: serde_json::json!({"dimensions": {"x": 1, "y": 1}}),
        visualizations: vec![serde_json::json!({"size": 64})],
        spritesheet: Spritesheet::from_atlas(&one_frame_atlas(), "chair.png"),
    };

    let json = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(json["logicType"], "furniture_basic");
    assert_eq!(json["visualizationType"], "furniture_animated");
    let frame = &json["spritesheet"]["frames"]["chair_a"];
    assert!(frame.get("spriteSourceSize").is_some());
    assert!(frame.get("sourceSize").is_some());
    assert_eq!(frame["frame"]["w"], 30);

    let back: Descriptor = serde_json::from_value(json).unwrap();
    assert_eq!(back, descriptor);
}
