/// What to draw and where.
///
/// `scene` flattens every visible entity of a `Level` into one list of
/// camera-translated rectangles, each tagged with a `Visual` telling the
/// renderer how it should look.  Pixel drawing is left to the frontend.

use crate::config::{GameConfig, Rgb};
use crate::entities::{Facing, Level, PickupKind, Rect};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Visual {
    Platform(Rgb),
    Spike,
    Coin,
    Crystal,
    /// `attacking` while the enemy's attack cooldown is running.
    Enemy { attacking: bool },
    Checkpoint { activated: bool },
    Goal,
    Player { facing: Facing },
    Particle { color: Rgb, alpha: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    /// Screen-space rectangle (world x minus camera offset).
    pub rect: Rect,
    pub visual: Visual,
}

/// Numbers shown in the heads-up display.
#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub level: u32,
    pub theme: &'static str,
    pub health: i32,
    pub coins: u32,
    pub crystals: u32,
    pub score: u32,
    /// Player x as a whole percentage of the level width.
    pub progress: u32,
}

fn on_screen(rect: &Rect, config: &GameConfig) -> bool {
    let margin = config.camera.cull_margin;
    -margin < rect.x && rect.x < config.screen.width + margin
}

/// Draw list in back-to-front order.  The player is always included; other
/// sprites are culled horizontally and dead enemies are skipped.
pub fn scene(level: &Level) -> Vec<Sprite> {
    let config = &level.config;
    let dx = -level.camera_x;
    let mut sprites = Vec::new();

    let mut push = |rect: Rect, visual: Visual| {
        let rect = rect.shifted_x(dx);
        if on_screen(&rect, config) {
            sprites.push(Sprite { rect, visual });
        }
    };

    for platform in &level.platforms {
        push(platform.rect(), Visual::Platform(platform.color));
    }
    for spike in &level.spikes {
        push(spike.rect(), Visual::Spike);
    }
    for pickup in &level.pickups {
        let visual = match pickup.kind {
            PickupKind::Coin => Visual::Coin,
            PickupKind::Crystal => Visual::Crystal,
        };
        push(pickup.rect(), visual);
    }
    for enemy in level.enemies.iter().filter(|e| e.is_alive()) {
        push(
            enemy.rect(),
            Visual::Enemy {
                attacking: enemy.attack_cooldown > 0,
            },
        );
    }
    for checkpoint in &level.checkpoints {
        push(
            checkpoint.rect(),
            Visual::Checkpoint {
                activated: checkpoint.is_activated(),
            },
        );
    }
    push(level.goal.rect(), Visual::Goal);

    let player = &level.player;
    sprites.push(Sprite {
        rect: player.rect().shifted_x(dx),
        visual: Visual::Player {
            facing: player.facing,
        },
    });

    let size = config.particles.size;
    for particle in &level.particles {
        let rect = Rect::new(particle.x + dx, particle.y, size, size);
        if on_screen(&rect, config) {
            sprites.push(Sprite {
                rect,
                visual: Visual::Particle {
                    color: particle.color,
                    alpha: particle.alpha(),
                },
            });
        }
    }

    sprites
}

pub fn hud(level: &Level) -> Hud {
    let player = &level.player;
    let progress = (player.x / level.config.screen.level_width * 100.0).max(0.0) as u32;
    Hud {
        level: level.number,
        theme: level.theme.name,
        health: player.health.max(0),
        coins: player.coins,
        crystals: player.crystals,
        score: player.score(),
        progress,
    }
}
