//! Kick search - rotation with positional fallback
//!
//! A rotation is first tried in place. When that collides, every offset delta
//! with `|dx|, |dy| <= KICK_RADIUS` is tried in row-major order: `dx` outer,
//! `dy` inner, both ascending from `-KICK_RADIUS`. The first legal candidate
//! wins, so the result is a pure function of the grid state.

use crate::geometry::Placement;
use crate::shapes::CellOffset;
use crate::types::KICK_RADIUS;

/// Number of candidate deltas in the kick table
pub const KICK_COUNT: usize = ((2 * KICK_RADIUS + 1) * (2 * KICK_RADIUS + 1)) as usize;

/// Candidate deltas in search order
pub static KICK_OFFSETS: [CellOffset; KICK_COUNT] = build_kick_offsets();

const fn build_kick_offsets() -> [CellOffset; KICK_COUNT] {
    let mut table = [(0, 0); KICK_COUNT];
    let mut i = 0;
    let mut dx = -KICK_RADIUS;
    while dx <= KICK_RADIUS {
        let mut dy = -KICK_RADIUS;
        while dy <= KICK_RADIUS {
            table[i] = (dx, dy);
            i += 1;
            dy += 1;
        }
        dx += 1;
    }
    table
}

/// Try to rotate a placement a quarter turn clockwise with kicks
///
/// `is_clear` decides legality of a candidate. Returns the rotated placement
/// and the delta that was applied, or `None` if no candidate is legal.
pub fn try_rotate(
    current: Placement,
    is_clear: impl Fn(&Placement) -> bool,
) -> Option<(Placement, CellOffset)> {
    let rotated = Placement {
        rotation: current.rotation.rotate_cw(),
        ..current
    };

    if is_clear(&rotated) {
        return Some((rotated, (0, 0)));
    }

    KICK_OFFSETS.iter().find_map(|&(dx, dy)| {
        let candidate = rotated.shifted(dx, dy)?;
        is_clear(&candidate).then_some((candidate, (dx, dy)))
    })
}
