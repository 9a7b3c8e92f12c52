use crate::config::{GAME_WORLD_HEIGHT, GAME_WORLD_WIDTH};
use crate::game::math::Point;
use crate::game::snake::Snake;

/// True when the radius-inflated head crosses any world boundary.
pub fn wall_hit(head: Point, head_radius: f32) -> bool {
    head.x - head_radius < 0.0
        || head.x + head_radius > GAME_WORLD_WIDTH
        || head.y - head_radius < 0.0
        || head.y + head_radius > GAME_WORLD_HEIGHT
}

/// Test a head against every segment of every other snake, in the order
/// given. Returns the first snake whose body the head intersects; only
/// the acting snake dies from this, never the body's owner.
pub fn find_body_hit<'a>(
    head: Point,
    others: impl Iterator<Item = &'a Snake>,
) -> Option<&'a Snake> {
    for other in others {
        let radius = other.collision_radius();
        for segment in &other.segments {
            if head.distance(*segment) < radius {
                return Some(other);
            }
        }
    }
    None
}
