use bevy::prelude::*;

/// Below this distance the direction away from the pointer is undefined.
const MIN_REPULSION_DISTANCE: f32 = 1e-4;

/// Opacity of a line between two points `distance` apart, fading linearly from
/// `peak` at 0 to nothing at `reach`. `None` when no line should be drawn.
#[inline]
pub fn link_opacity(distance: f32, reach: f32, peak: f32) -> Option<f32> {
    if reach <= 0.0 || distance >= reach {
        return None;
    }
    Some((1.0 - distance / reach) * peak)
}

/// Velocity impulse pushing a particle away from the pointer.
///
/// `offset` is `particle - pointer`. The magnitude is
/// `(radius - d) / radius * strength`; particles sitting exactly on the pointer
/// are pushed along +X.
pub fn repulsion_impulse(offset: Vec2, radius: f32, strength: f32) -> Option<Vec2> {
    let d = offset.length();
    if radius <= 0.0 || d >= radius {
        return None;
    }
    let dir = if d < MIN_REPULSION_DISTANCE {
        Vec2::X
    } else {
        offset / d
    };
    Some(dir * ((radius - d) / radius) * strength)
}

/// Visits every unordered pair closer than `reach`, passing the pair indices and
/// their distance.
///
/// Quadratic in the number of points: fine for the few dozen particles a
/// background carries, a grid would be needed well beyond that.
pub fn for_each_pair_within(points: &[Vec2], reach: f32, mut f: impl FnMut(usize, usize, f32)) {
    if reach <= 0.0 {
        return;
    }
    let reach_sq = reach * reach;
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let d_sq = points[i].distance_squared(points[j]);
            if d_sq < reach_sq {
                f(i, j, d_sq.sqrt());
            }
        }
    }
}
