//! Ray/segment and ray/box intersection
//!
//! The "ray" is the full line through `origin` along `dir`: fold lines extend
//! both ways from the point that anchors them.

use glam::Vec2;

use super::aabb::Aabb;

/// Cross product below which two unit directions count as parallel
const PARALLEL_EPS: f32 = 1e-6;
/// Slack on the segment span check, absorbs float noise at endpoints
const SPAN_EPS: f32 = 1e-4;

/// Intersect the line through `origin` along `dir` with segment `p1..p2`
///
/// Returns `None` for parallel lines (0° or 180° apart), degenerate inputs,
/// or a crossing outside the segment's span.
pub fn ray_line(dir: Vec2, origin: Vec2, p1: Vec2, p2: Vec2) -> Option<Vec2> {
    let ray_dir = dir.normalize_or_zero();
    let line_dir = (p1 - p2).normalize_or_zero();
    if ray_dir == Vec2::ZERO || line_dir == Vec2::ZERO {
        return None;
    }
    if ray_dir.perp_dot(line_dir).abs() <= PARALLEL_EPS {
        return None;
    }

    let hit = if dir.x == 0.0 {
        // Vertical ray: the segment cannot be vertical here
        Vec2::new(origin.x, segment_y_at(p1, p2, origin.x))
    } else if dir.y == 0.0 {
        // Horizontal ray
        Vec2::new(segment_x_at(p1, p2, origin.y), origin.y)
    } else {
        let ray_a = dir.y / dir.x;
        let ray_b = origin.y - ray_a * origin.x;

        if p1.x == p2.x {
            Vec2::new(p1.x, ray_a * p1.x + ray_b)
        } else if p1.y == p2.y {
            Vec2::new((p1.y - ray_b) / ray_a, p1.y)
        } else {
            let line_a = (p2.y - p1.y) / (p2.x - p1.x);
            let line_b = p1.y - line_a * p1.x;
            let x = (line_b - ray_b) / (ray_a - line_a);
            Vec2::new(x, ray_a * x + ray_b)
        }
    };

    within_span(hit, p1, p2).then_some(hit)
}

/// Intersect the line through `origin` along `dir` with a box, picking the
/// edge the direction points at
///
/// Exact axis directions select a single edge (+x right, +y up, -x left,
/// -y down). Off-axis directions consider the two edges facing the
/// direction and take the nearer hit, or whichever one exists.
pub fn ray_aabb(dir: Vec2, origin: Vec2, aabb: &Aabb) -> Option<Vec2> {
    if dir == Vec2::ZERO {
        return None;
    }

    let edge_hit = |(a, b): (Vec2, Vec2)| ray_line(dir, origin, a, b);
    let up = edge_hit(aabb.up_edge());
    let down = edge_hit(aabb.down_edge());
    let left = edge_hit(aabb.left_edge());
    let right = edge_hit(aabb.right_edge());

    if dir.y == 0.0 {
        return if dir.x > 0.0 { right } else { left };
    }
    if dir.x == 0.0 {
        return if dir.y > 0.0 { up } else { down };
    }

    let horizontal = if dir.x > 0.0 { right } else { left };
    let vertical = if dir.y > 0.0 { up } else { down };
    match (horizontal, vertical) {
        (Some(h), Some(v)) => {
            if h.distance_squared(origin) <= v.distance_squared(origin) {
                Some(h)
            } else {
                Some(v)
            }
        }
        (Some(h), None) => Some(h),
        (None, v) => v,
    }
}

/// y on the segment's supporting line at `x` (segment must not be vertical)
fn segment_y_at(p1: Vec2, p2: Vec2, x: f32) -> f32 {
    let t = (x - p1.x) / (p2.x - p1.x);
    p1.y + t * (p2.y - p1.y)
}

/// x on the segment's supporting line at `y` (segment must not be horizontal)
fn segment_x_at(p1: Vec2, p2: Vec2, y: f32) -> f32 {
    let t = (y - p1.y) / (p2.y - p1.y);
    p1.x + t * (p2.x - p1.x)
}

fn within_span(point: Vec2, p1: Vec2, p2: Vec2) -> bool {
    let min = p1.min(p2) - Vec2::splat(SPAN_EPS);
    let max = p1.max(p2) + Vec2::splat(SPAN_EPS);
    point.is_finite()
        && point.x >= min.x
        && point.x <= max.x
        && point.y >= min.y
        && point.y <= max.y
}
