/// Player movement: input handling, integration, and resolution against
/// platforms.
///
/// Like the rest of the simulation these are pure functions: each takes the
/// current `Player` by reference and returns the updated copy.

use crate::config::{GameConfig, PhysicsConfig};
use crate::entities::{Facing, Input, Platform, Player, Rect, WallSide};

/// Distance (px) within which a player resting on a platform top still
/// counts as standing on it.
const SUPPORT_EPSILON: f32 = 0.5;

/// How the player met a platform during one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Contact {
    /// Fell onto the top surface.
    Landed,
    /// Jumped into the underside.
    Ceiling,
    /// Moving left into the platform's right side.
    WallOnLeft,
    /// Moving right into the platform's left side.
    WallOnRight,
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Apply one tick of held keys.  Horizontal speed is set outright, there is
/// no acceleration.  Jump fires from the ground, or off a wall while airborne.
pub fn apply_input(player: &Player, input: &Input, physics: &PhysicsConfig) -> Player {
    let mut p = player.clone();

    p.vel_x = 0.0;
    if input.left {
        p.vel_x = -p.move_speed;
        p.facing = Facing::Left;
    }
    if input.right {
        p.vel_x = p.move_speed;
        p.facing = Facing::Right;
    }

    if input.jump {
        if p.on_ground {
            p.vel_y = p.jump_power;
            p.on_ground = false;
        } else if let Some(side) = p.wall {
            p.vel_y = p.jump_power;
            let push = p.move_speed * physics.wall_jump_multiplier;
            p.vel_x = match side {
                WallSide::Left => push,
                WallSide::Right => -push,
            };
            p.wall = None;
        }
    }

    p
}

/// True if `input` makes `player` leave the ground or a wall this tick.
pub fn will_jump(player: &Player, input: &Input) -> bool {
    input.jump && (player.on_ground || player.on_wall())
}

// ── Integration ──────────────────────────────────────────────────────────────

/// Gravity (unless grounded), then move by velocity and clamp to the level.
pub fn integrate(player: &Player, level_width: f32) -> Player {
    let mut p = player.clone();
    if !p.on_ground {
        p.vel_y = (p.vel_y + p.gravity).min(p.max_fall_speed);
    }
    p.x += p.vel_x;
    p.y += p.vel_y;
    clamp_to_level(&mut p, level_width);
    p
}

fn clamp_to_level(p: &mut Player, level_width: f32) {
    if p.x + p.width > level_width {
        p.x = level_width - p.width;
    }
    if p.x < 0.0 {
        p.x = 0.0;
    }
}

// ── Platform contact ─────────────────────────────────────────────────────────

/// Decide how an overlapping player met `platform`, judged from the
/// pre-move top-left `prev`.  Clauses are tried in order; the first match
/// wins, so a fast diagonal corner clip lands before it walls.
pub fn classify(
    rect: &Rect,
    prev: (f32, f32),
    vel: (f32, f32),
    platform: &Rect,
    tolerance: f32,
) -> Option<Contact> {
    let (old_x, old_y) = prev;
    let (vel_x, vel_y) = vel;

    if vel_y > 0.0 && old_y + rect.h <= platform.top() + tolerance {
        Some(Contact::Landed)
    } else if vel_y < 0.0 && old_y >= platform.bottom() - tolerance {
        Some(Contact::Ceiling)
    } else if vel_x < 0.0 && old_x >= platform.right() - tolerance {
        Some(Contact::WallOnLeft)
    } else if vel_x > 0.0 && old_x + rect.w <= platform.left() + tolerance {
        Some(Contact::WallOnRight)
    } else {
        None
    }
}

/// Standing exactly on top of `platform` without overlapping it.
fn is_supported(rect: &Rect, vel_y: f32, platform: &Rect) -> bool {
    vel_y >= 0.0
        && (rect.bottom() - platform.top()).abs() <= SUPPORT_EPSILON
        && rect.right() > platform.left()
        && rect.left() < platform.right()
}

/// Resolve the player against every platform.  `on_ground` and the wall
/// flag are recomputed from scratch; each platform is handled on its own,
/// so ground and wall contacts from different platforms may combine.
pub fn resolve_platforms(
    player: &Player,
    prev: (f32, f32),
    platforms: &[Platform],
    config: &GameConfig,
) -> Player {
    let physics = &config.physics;
    let mut p = player.clone();
    p.on_ground = false;
    p.wall = None;

    for platform in platforms {
        let bounds = platform.rect();
        let rect = p.rect();

        if !rect.intersects(&bounds) {
            if is_supported(&rect, p.vel_y, &bounds) {
                p.y = bounds.top() - p.height;
                p.vel_y = 0.0;
                p.on_ground = true;
            }
            continue;
        }

        match classify(&rect, prev, (p.vel_x, p.vel_y), &bounds, physics.collision_tolerance) {
            Some(Contact::Landed) => {
                p.y = bounds.top() - p.height;
                p.vel_y = 0.0;
                p.on_ground = true;
            }
            Some(Contact::Ceiling) => {
                p.y = bounds.bottom();
                p.vel_y = 0.0;
            }
            Some(Contact::WallOnLeft) => {
                p.x = bounds.right();
                p.wall = Some(WallSide::Left);
                p.vel_y *= physics.wall_slide_damping;
            }
            Some(Contact::WallOnRight) => {
                p.x = bounds.left() - p.width;
                p.wall = Some(WallSide::Right);
                p.vel_y *= physics.wall_slide_damping;
            }
            None => {}
        }
    }

    clamp_to_level(&mut p, config.screen.level_width);
    p
}

/// Put the player back at its checkpoint anchor with full health.
pub fn respawn(player: &Player) -> Player {
    let (x, y) = player.checkpoint;
    Player {
        x,
        y,
        vel_x: 0.0,
        vel_y: 0.0,
        on_ground: false,
        wall: None,
        health: player.max_health,
        alive: true,
        ..player.clone()
    }
}
