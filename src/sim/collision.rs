//! Collision detection
//!
//! Every entity in the game is a circle, so contact is a plain
//! center-distance test against the sum of radii.

use glam::Vec2;

/// Strict overlap: circles that exactly touch do not collide
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

/// Indices of `items` whose circle overlaps the query circle, ascending
pub fn overlapping_indices<T>(
    items: &[T],
    query_pos: Vec2,
    query_radius: f32,
    circle: impl Fn(&T) -> (Vec2, f32),
) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| {
            let (pos, radius) = circle(item);
            circles_overlap(query_pos, query_radius, pos, radius)
        })
        .map(|(i, _)| i)
        .collect()
}

/// Drop the entries at `marked` (ascending indices) in a single pass
pub fn compact<T>(items: &mut Vec<T>, marked: &[usize]) {
    if marked.is_empty() {
        return;
    }
    let mut index = 0;
    items.retain(|_| {
        let keep = marked.binary_search(&index).is_err();
        index += 1;
        keep
    });
}
