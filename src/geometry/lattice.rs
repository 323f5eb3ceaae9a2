//! Body-centered-cubic offset generation.

use cgmath::Vector3;

/// Edge length of one cubic lattice cell.
pub const CELL: f32 = 4.0;

/// Translation offsets for a BCC lattice of half-extent `grid`.
///
/// For x, y, z each over the `2*grid+1` integers in `[-grid, grid]`
/// (x outermost, z innermost, ascending), two offsets are emitted per cell:
/// the corner at `(4x, 4y, 4z)` and the body center at `(4x+2, 4y+2, 4z+2)`.
/// The sequence is fully determined by `grid` and its length is
/// `2*(2*grid+1)^3`.
pub fn bcc_offsets(grid: u32) -> Vec<Vector3<f32>> {
    let g = grid as i32;
    let side = (2 * g + 1) as usize;
    let half = CELL / 2.0;

    let mut offsets = Vec::with_capacity(side * side * side * 2);
    for x in -g..=g {
        for y in -g..=g {
            for z in -g..=g {
                let corner =
                    Vector3::new(CELL * x as f32, CELL * y as f32, CELL * z as f32);
                offsets.push(corner);
                offsets.push(corner + Vector3::new(half, half, half));
            }
        }
    }
    offsets
}
