use super::*;
use crate::raster::buffer::PixelBufferBuilder;

const INK: [u8; 4] = [200, 10, 10, 255];
const GLASS: [u8; 4] = [0, 0, 255, 64];

fn rect(x: u32, y: u32, width: u32, height: u32) -> PixelRect {
    PixelRect {
        x,
        y,
        width,
        height,
    }
}

#[test]
fn two_squares_are_two_parts_in_discovery_order() {
    let buf = PixelBufferBuilder::new(8, 6)
        .fill(rect(5, 1, 2, 2), INK)
        .fill(rect(1, 3, 2, 2), GLASS)
        .build();
    let parts = segment_parts(&buf).unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].bounds, rect(5, 1, 2, 2));
    assert_eq!(parts[1].bounds, rect(1, 3, 2, 2));
    for p in &parts {
        assert_eq!(p.bounds.area(), 4);
    }
    assert_eq!(parts[1].pixels.pixel(1, 1), GLASS);
}

#[test]
fn all_transparent_yields_no_parts() {
    assert!(segment_parts(&PixelBuffer::transparent(5, 5)).unwrap().is_empty());
    assert!(label_components(&PixelBuffer::transparent(0, 0)).is_empty());
}

#[test]
fn diagonal_pixels_are_not_connected() {
    let buf = PixelBufferBuilder::new(3, 3)
        .put(0, 0, INK)
        .put(1, 1, INK)
        .put(2, 2, INK)
        .build();
    let comps = label_components(&buf);
    assert_eq!(comps.len(), 3);
    assert!(comps.iter().all(|c| c.pixel_count == 1));
}

#[test]
fn u_shape_is_one_component_with_full_bounds() {
    // X . X
    // X . X
    // X X X
    let buf = PixelBufferBuilder::new(3, 3)
        .fill(rect(0, 0, 1, 3), INK)
        .fill(rect(2, 0, 1, 3), INK)
        .put(1, 2, INK)
        .build();
    let comps = label_components(&buf);
    assert_eq!(comps.len(), 1);
    assert_eq!(comps[0].bounds, rect(0, 0, 3, 3));
    assert_eq!(comps[0].pixel_count, 7);

    let parts = segment_parts(&buf).unwrap();
    assert_eq!(parts[0].pixels.alpha(1, 0), 0);
    assert_eq!(parts[0].pixels.alpha(1, 2), 255);
}

#[test]
fn labeler_is_reusable_across_sizes() {
    let mut labeler = ComponentLabeler::new();
    let big = PixelBufferBuilder::new(6, 6).fill(rect(0, 0, 6, 6), INK).build();
    assert_eq!(labeler.label(&big).len(), 1);

    let small = PixelBufferBuilder::new(2, 1)
        .put(0, 0, INK)
        .build();
    let comps = labeler.label(&small);
    assert_eq!(comps.len(), 1);
    assert_eq!(comps[0].bounds, rect(0, 0, 1, 1));
}

#[test]
fn output_is_stable_for_fixed_input() {
    let buf = PixelBufferBuilder::new(10, 10)
        .fill(rect(7, 0, 2, 3), INK)
        .fill(rect(0, 2, 3, 1), INK)
        .fill(rect(4, 6, 5, 2), GLASS)
        .build();
    let a = label_components(&buf);
    let b = label_components(&buf);
    assert_eq!(a, b);
    let origins: Vec<(u32, u32)> = a.iter().map(|c| (c.bounds.x, c.bounds.y)).collect();
    assert_eq!(origins, vec![(7, 0), (0, 2), (4, 6)]);
}
