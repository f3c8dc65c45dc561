use std::collections::BTreeMap;

use crate::layout::NODE_HEIGHT;

use super::chain::ChainEntry;

/// Negative so neighbors tuck in toward each other.
pub(in crate::app) const LEVEL_SPACING: f32 = -30.0;

/// Center offset of each level from the anchor: half its own height plus
/// half the inner neighbor's height, plus the spacing.
pub(in crate::app) fn compute_offsets(entries: &[ChainEntry]) -> BTreeMap<i32, f32> {
    let heights: BTreeMap<i32, f32> = entries
        .iter()
        .map(|entry| (entry.level, entry.layout.height))
        .collect();

    let mut offsets = BTreeMap::new();
    offsets.insert(0, 0.0);

    let (Some(&min_level), Some(&max_level)) =
        (heights.keys().min(), heights.keys().max())
    else {
        return offsets;
    };

    let mut offset = 0.0;
    for level in (min_level..0).rev() {
        match step_toward(&heights, level, level + 1) {
            Walk::Step(step) => offset -= step,
            Walk::Fallback => offset -= NODE_HEIGHT + LEVEL_SPACING,
            Walk::Stop => break,
        }
        offsets.insert(level, offset);
    }

    let mut offset = 0.0;
    for level in 1..=max_level {
        match step_toward(&heights, level, level - 1) {
            Walk::Step(step) => offset += step,
            Walk::Fallback => offset += NODE_HEIGHT + LEVEL_SPACING,
            Walk::Stop => break,
        }
        offsets.insert(level, offset);
    }

    offsets
}

enum Walk {
    Step(f32),
    Fallback,
    Stop,
}

// A gap at the cursor level falls back to the default step; a missing
// inner neighbor ends the walk.
fn step_toward(heights: &BTreeMap<i32, f32>, cursor: i32, neighbor: i32) -> Walk {
    let Some(cursor_height) = heights.get(&cursor) else {
        return Walk::Fallback;
    };
    let Some(neighbor_height) = heights.get(&neighbor) else {
        return Walk::Stop;
    };
    Walk::Step(neighbor_height / 2.0 + cursor_height / 2.0 + LEVEL_SPACING)
}
