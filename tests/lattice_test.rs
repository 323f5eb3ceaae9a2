use std::collections::HashSet;

use lattice_backdrop::geometry::lattice::{bcc_offsets, CELL};

#[test]
fn offset_count_matches_closed_form() {
    for grid in 0..4 {
        let side = 2 * grid as usize + 1;
        assert_eq!(bcc_offsets(grid).len(), 2 * side * side * side);
    }
}

#[test]
fn stock_grid_yields_250_offsets() {
    assert_eq!(bcc_offsets(2).len(), 250);
}

#[test]
fn zero_extent_yields_origin_and_body_center() {
    let offsets = bcc_offsets(0);
    assert_eq!(offsets.len(), 2);
    assert_eq!(offsets[0], [0.0, 0.0, 0.0].into());
    assert_eq!(offsets[1], [2.0, 2.0, 2.0].into());
}

#[test]
fn offsets_lie_on_the_two_sublattices() {
    let grid = 2;
    let bound = CELL * grid as f32;
    for (i, offset) in bcc_offsets(grid).iter().enumerate() {
        let shift = if i % 2 == 0 { 0.0 } else { CELL / 2.0 };
        for component in [offset.x, offset.y, offset.z] {
            let cell = (component - shift) / CELL;
            assert_eq!(cell, cell.round(), "component {} off-lattice", component);
            assert!(component - shift >= -bound && component - shift <= bound);
        }
    }
}

#[test]
fn offsets_are_unique() {
    let offsets = bcc_offsets(2);
    let distinct: HashSet<[i64; 3]> = offsets
        .iter()
        .map(|o| [o.x as i64, o.y as i64, o.z as i64])
        .collect();
    assert_eq!(distinct.len(), offsets.len());
}

#[test]
fn sequence_is_deterministic() {
    assert_eq!(bcc_offsets(3), bcc_offsets(3));
}

#[test]
fn iteration_is_ascending_with_corner_before_body_center() {
    let offsets = bcc_offsets(1);
    // x outermost, z innermost: first cell is (-1,-1,-1), second (-1,-1,0).
    assert_eq!(offsets[0], [-4.0, -4.0, -4.0].into());
    assert_eq!(offsets[1], [-2.0, -2.0, -2.0].into());
    assert_eq!(offsets[2], [-4.0, -4.0, 0.0].into());
}
