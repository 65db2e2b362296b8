use super::*;

use image::Rgba;

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba(rgba))
}

fn inputs(count: usize, w: u32, h: u32) -> Vec<InputImage> {
    (0..count)
        .map(|i| InputImage {
            key: format!("img_{i}"),
            image: solid(w, h, [255, 0, 0, 255]),
        })
        .collect()
}

#[test]
fn ten_images_in_two_rows() {
    let opts = PackOptions {
        num_rows: 2,
        max_width: 1000,
        max_height: 1000,
    };
    let atlas = pack_atlas(&inputs(10, 100, 50), &opts).unwrap();

    assert_eq!((atlas.width, atlas.height), (500, 100));
    let f0 = &atlas.frames["img_0"];
    assert_eq!((f0.rect.x, f0.rect.y), (0, 0));
    let f5 = &atlas.frames["img_5"];
    assert_eq!((f5.rect.x, f5.rect.y), (0, 50));
    let f9 = &atlas.frames["img_9"];
    assert_eq!((f9.rect.x, f9.rect.y), (400, 50));
}

#[test]
fn frame_metadata_covers_the_full_sprite() {
    let atlas = pack_atlas(&inputs(1, 8, 4), &PackOptions::default()).unwrap();
    let f = &atlas.frames["img_0"];
    assert_eq!(f.rect, FrameRect { x: 0, y: 0, w: 8, h: 4 });
    assert_eq!(f.sprite_source_size, FrameRect { x: 0, y: 0, w: 8, h: 4 });
    assert_eq!(f.source_size, FrameSize { w: 8, h: 4 });
    assert_eq!(f.pivot, Pivot { x: 0.5, y: 0.5 });
}

#[test]
fn rows_take_the_tallest_member_height() {
    let imgs = vec![
        InputImage {
            key: "a".to_string(),
            image: solid(10, 30, [1, 2, 3, 255]),
        },
        InputImage {
            key: "b".to_string(),
            image: solid(10, 10, [1, 2, 3, 255]),
        },
        InputImage {
            key: "c".to_string(),
            image: solid(20, 5, [1, 2, 3, 255]),
        },
    ];
    let opts = PackOptions {
        num_rows: 2,
        max_width: 100,
        max_height: 100,
    };
    // images_per_row = ceil(3/2) = 2: row 0 = [a, b], row 1 = [c].
    let atlas = pack_atlas(&imgs, &opts).unwrap();
    assert_eq!((atlas.width, atlas.height), (20, 35));
    assert_eq!(atlas.frames["b"].rect.x, 10);
    assert_eq!(atlas.frames["c"].rect.y, 30);
}

#[test]
fn overflow_fails_before_drawing() {
    let opts = PackOptions {
        num_rows: 1,
        max_width: 150,
        max_height: 1000,
    };
    let err = pack_atlas(&inputs(2, 100, 10), &opts).unwrap_err();
    assert!(matches!(err, RelicError::PackingOverflow(_)));
}

#[test]
fn height_overflow_is_detected_too() {
    let opts = PackOptions {
        num_rows: 2,
        max_width: 1000,
        max_height: 15,
    };
    let err = pack_atlas(&inputs(2, 10, 10), &opts).unwrap_err();
    assert!(matches!(err, RelicError::PackingOverflow(_)));
}

#[test]
fn empty_input_and_zero_rows_are_validation_errors() {
    let err = pack_atlas(&[], &PackOptions::default()).unwrap_err();
    assert!(matches!(err, RelicError::Validation(_)));

    let opts = PackOptions {
        num_rows: 0,
        ..PackOptions::default()
    };
    let err = pack_atlas(&inputs(1, 1, 1), &opts).unwrap_err();
    assert!(matches!(err, RelicError::Validation(_)));
}

#[test]
fn canvas_pixels_land_at_their_placement() {
    let imgs = vec![
        InputImage {
            key: "red".to_string(),
            image: solid(2, 2, [255, 0, 0, 255]),
        },
        InputImage {
            key: "blue".to_string(),
            image: solid(2, 2, [0, 0, 255, 255]),
        },
    ];
    let opts = PackOptions {
        num_rows: 1,
        max_width: 10,
        max_height: 10,
    };
    let atlas = pack_atlas(&imgs, &opts).unwrap();

    let decoded = image::load_from_memory(&atlas.image_png).unwrap().to_rgba8();
    assert_eq!((decoded.width(), decoded.height()), (4, 2));
    // BTreeMap order of the frames map does not affect placement; the
    // caller-provided input order does.
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(decoded.get_pixel(2, 0).0, [0, 0, 255, 255]);
}
