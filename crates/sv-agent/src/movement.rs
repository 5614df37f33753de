//! Kinematics (turn/move integration) and wall collision resolution.

use sv_core::position::normalize_deg;
use sv_core::Position;
use sv_spatial::Map;

/// Step `heading` toward `turn_target` by at most `turn_speed * time_per_tick`
/// degrees, normalized into `(-180, 180]`. Returns the new heading.
pub fn step_turn(heading: f32, turn_target: f32, turn_speed: f32, time_per_tick: f32) -> f32 {
    let remaining = turn_remaining(heading, turn_target);
    if remaining == 0.0 {
        return heading;
    }
    let step = (time_per_tick * turn_speed).min(remaining.abs()) * remaining.signum();
    normalize_deg(heading + step)
}

/// Signed remaining turn, normalized into `(-180, 180]`; `0.0` once within
/// `1e-6` degrees of the target (matches `math.isclose` in the original).
pub fn turn_remaining(heading: f32, turn_target: f32) -> f32 {
    let a = normalize_deg(turn_target - heading);
    if a.abs() < 1e-6 {
        0.0
    } else {
        a
    }
}

/// `0.0` once within `1e-6` of zero (matches `math.isclose`).
pub fn move_remaining(move_target: f32) -> f32 {
    if move_target.abs() < 1e-6 {
        0.0
    } else {
        move_target
    }
}

/// Advance `location` by up to `move_speed * time_per_tick` along `heading`,
/// consuming that much of `move_target`. Returns `(new_location,
/// new_move_target, distance_travelled)`.
pub fn step_move(
    location: Position,
    heading: f32,
    move_target: f32,
    move_speed: f32,
    time_per_tick: f32,
) -> (Position, f32, f32) {
    if move_target == 0.0 {
        return (location, move_target, 0.0);
    }
    let distance = (time_per_tick * move_speed)
        .min(move_target.abs())
        .copysign(move_target);
    let mut next = location;
    next.translate(distance, heading);
    (next, move_target - distance, distance)
}

/// Result of a single collision-resolution pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionOutcome {
    pub location: Position,
    pub collided: bool,
}

/// Axis-aligned 4-point probe plus 4 diagonal circle checks against tile
/// centers.
///
/// 1. Clip to `[0, W) x [0, H)`.
/// 2. Axis-aligned probes at `(+-width/2, 0)` and `(0, +-width/2)`: push the
///    agent flush against any wall tile edge they land in.
/// 3. Corner probes at `(+-width/2, +-width/2)`: if the corner lands in a
///    wall tile, project out of a circle of radius `0.5 + width/2` centered
///    on that tile's center.
pub fn resolve_collision(map: &Map, location: Position, width: f32) -> CollisionOutcome {
    let half = width / 2.0;
    let mut loc = location;
    let mut collided = false;

    let max_x = map.width() as f32 - 1e-4;
    let max_y = map.height() as f32 - 1e-4;
    let clipped_x = loc.x.clamp(0.0, max_x.max(0.0));
    let clipped_y = loc.y.clamp(0.0, max_y.max(0.0));
    if clipped_x != loc.x || clipped_y != loc.y {
        collided = true;
    }
    loc = Position::new(clipped_x, clipped_y);

    // Axis-aligned probes.
    let axis_probes = [(half, 0.0), (-half, 0.0), (0.0, half), (0.0, -half)];
    let mut push = (0.0_f32, 0.0_f32);
    for (dx, dy) in axis_probes {
        let px = loc.x + dx;
        let py = loc.y + dy;
        let tile_x = px.floor() as i32;
        let tile_y = py.floor() as i32;
        if map.is_wall(tile_x, tile_y) {
            collided = true;
            if dx != 0.0 {
                let edge = if dx > 0.0 {
                    tile_x as f32
                } else {
                    tile_x as f32 + 1.0
                };
                let desired = edge - dx.signum() * half;
                push.0 += desired - loc.x;
            }
            if dy != 0.0 {
                let edge = if dy > 0.0 {
                    tile_y as f32
                } else {
                    tile_y as f32 + 1.0
                };
                let desired = edge - dy.signum() * half;
                push.1 += desired - loc.y;
            }
        }
    }
    loc = Position::new(loc.x + push.0, loc.y + push.1);

    // Corner probes: circle-vs-tile-center resolution.
    let combined_radius = 0.5 + half;
    let corner_probes = [(half, half), (half, -half), (-half, half), (-half, -half)];
    for (dx, dy) in corner_probes {
        let px = loc.x + dx;
        let py = loc.y + dy;
        let tile_x = px.floor() as i32;
        let tile_y = py.floor() as i32;
        if !map.is_wall(tile_x, tile_y) {
            continue;
        }
        let center = Position::new(tile_x as f32 + 0.5, tile_y as f32 + 0.5);
        let diff = Position::new(loc.x - center.x, loc.y - center.y);
        let dist = (diff.x * diff.x + diff.y * diff.y).sqrt();
        if dist < combined_radius && dist > 1e-6 {
            collided = true;
            let scale = combined_radius / dist;
            loc = Position::new(center.x + diff.x * scale, center.y + diff.y * scale);
        } else if dist <= 1e-6 {
            collided = true;
            loc = Position::new(center.x + combined_radius, center.y);
        }
    }

    CollisionOutcome {
        location: loc,
        collided,
    }
}
