use super::*;
use crate::foundation::error::{InputError, SpriteError};
use crate::raster::buffer::PixelBufferBuilder;

fn descriptors() -> Vec<AnimationDescriptor> {
    vec![
        AnimationDescriptor::new("Idle", 4, LoopMode::Loop),
        AnimationDescriptor::new("Jump", 3, LoopMode::Once).with_transition("Idle"),
        AnimationDescriptor::new("Sway", 5, LoopMode::PingPong),
    ]
}

fn cell(width: u32, height: u32) -> CellSize {
    CellSize { width, height }
}

#[test]
fn build_places_frames_by_row_and_index() {
    let out = build_metadata(&descriptors(), cell(16, 24)).unwrap();
    assert_eq!(out.len(), 3);
    for (r, anim) in out.iter().enumerate() {
        assert_eq!(anim.frame_width, 16);
        assert_eq!(anim.frame_height, 24);
        for (i, f) in anim.frames.iter().enumerate() {
            assert_eq!(f.x, i as u32 * 16);
            assert_eq!(f.y, r as u32 * 24);
            assert_eq!((f.width, f.height), (16, 24));
        }
    }
    assert_eq!(out[1].frames.len(), 3);
    assert_eq!(out[1].transition_to.as_deref(), Some("Idle"));
    assert_eq!(out[2].loop_mode, LoopMode::PingPong);
}

#[test]
fn build_is_deterministic() {
    let a = build_metadata(&descriptors(), cell(8, 8)).unwrap();
    let b = build_metadata(&descriptors(), cell(8, 8)).unwrap();
    assert_eq!(
        serde_json::to_vec(&a).unwrap(),
        serde_json::to_vec(&b).unwrap()
    );
}

#[test]
fn build_rejects_zero_frames_and_zero_cells() {
    let mut d = descriptors();
    d[2].frame_count = 0;
    assert!(matches!(
        build_metadata(&d, cell(8, 8)).unwrap_err(),
        SpriteError::Config(ConfigError::NonPositiveFrameCount { ref name }) if name == "Sway"
    ));
    assert!(matches!(
        build_metadata(&descriptors(), cell(8, 0)).unwrap_err(),
        SpriteError::Config(ConfigError::NonPositiveCellDimension { .. })
    ));
}

#[test]
fn build_reports_coordinate_overflow() {
    let d = vec![AnimationDescriptor::new("Wide", 3, LoopMode::Loop)];
    assert!(matches!(
        build_metadata(&d, cell(u32::MAX / 2 + 1, 1)).unwrap_err(),
        SpriteError::Config(ConfigError::LayoutOverflow { .. })
    ));
}

#[test]
fn rebuild_keeps_everything_but_geometry() {
    let original = build_metadata(&descriptors(), cell(8, 8)).unwrap();
    let rebuilt = rebuild_metadata(&original, 20, 10).unwrap();
    for (before, after) in original.iter().zip(&rebuilt) {
        assert_eq!(before.name, after.name);
        assert_eq!(before.loop_mode, after.loop_mode);
        assert_eq!(before.transition_to, after.transition_to);
        assert_eq!(before.frame_count(), after.frame_count());
        assert_eq!((after.frame_width, after.frame_height), (20, 10));
    }
    assert_eq!(rebuilt[2].frames[4], Frame {
        x: 80,
        y: 20,
        width: 20,
        height: 10
    });
}

#[test]
fn rebuild_is_idempotent() {
    let original = build_metadata(&descriptors(), cell(8, 8)).unwrap();
    let once = rebuild_metadata(&original, 12, 14).unwrap();
    let twice = rebuild_metadata(&once, 12, 14).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn rebuild_keeps_empty_animations_empty() {
    let mut original = build_metadata(&descriptors(), cell(8, 8)).unwrap();
    original[0].frames.clear();
    let rebuilt = rebuild_metadata(&original, 4, 4).unwrap();
    assert!(rebuilt[0].frames.is_empty());
    assert_eq!(rebuilt[1].frames[0].y, 4);
}

#[test]
fn rebuild_rejects_zero_dimensions() {
    let original = build_metadata(&descriptors(), cell(8, 8)).unwrap();
    assert!(matches!(
        rebuild_metadata(&original, 0, 8).unwrap_err(),
        SpriteError::Config(ConfigError::NonPositiveCellDimension { width: 0, height: 8 })
    ));
}

#[test]
fn strip_divides_sheet_width() {
    let strip = build_strip("Background", 4, 1920, 1080).unwrap();
    assert_eq!(strip.frame_width, 480);
    assert_eq!(strip.frame_height, 1080);
    assert_eq!(strip.loop_mode, LoopMode::Loop);
    assert_eq!(strip.frames[3].x, 1440);
    assert!(strip.frames.iter().all(|f| f.y == 0));

    assert!(build_strip("Background", 0, 10, 10).is_err());
    assert!(build_strip("Background", 11, 10, 10).is_err());
}

#[test]
fn crop_strip_returns_the_animation_row() {
    let sheet_px = PixelBufferBuilder::new(12, 8)
        .fill(
            PixelRect {
                x: 0,
                y: 4,
                width: 12,
                height: 4,
            },
            [1, 2, 3, 200],
        )
        .build();
    let meta = build_metadata(
        &[
            AnimationDescriptor::new("Top", 3, LoopMode::Loop),
            AnimationDescriptor::new("Bottom", 2, LoopMode::Loop),
        ],
        cell(4, 4),
    )
    .unwrap();

    let strip = crop_animation_strip(&sheet_px, &meta[1]).unwrap();
    assert_eq!((strip.width(), strip.height()), (8, 4));
    assert!(strip.as_rgba8().chunks_exact(4).all(|p| p == [1, 2, 3, 200]));

    let top = crop_animation_strip(&sheet_px, &meta[0]).unwrap();
    assert!(top.as_rgba8().chunks_exact(4).all(|p| p[3] == 0));
}

#[test]
fn crop_strip_rejects_empty_and_out_of_bounds() {
    let sheet_px = PixelBuffer::transparent(8, 8);
    let mut meta = build_metadata(
        &[AnimationDescriptor::new("Long", 3, LoopMode::Loop)],
        cell(4, 4),
    )
    .unwrap();
    assert!(matches!(
        crop_animation_strip(&sheet_px, &meta[0]).unwrap_err(),
        SpriteError::Input(InputError::CropOutOfBounds { .. })
    ));

    meta[0].frames.clear();
    assert!(matches!(
        crop_animation_strip(&sheet_px, &meta[0]).unwrap_err(),
        SpriteError::State(StateError::EmptyAnimation { .. })
    ));
}
