/// Per-tick game logic.
///
/// `tick` takes an immutable reference to the current `Level` (plus the
/// input snapshot and an injected RNG) and returns a brand-new `Level`
/// together with the tick's `Outcome`.  Entities that disappear during a
/// tick are marked by index during the scan and compacted once afterwards.

use std::f32::consts::TAU;

use log::{debug, info};
use rand::Rng;

use crate::config::{GameConfig, Rgb, CYAN, PURPLE, RED, YELLOW};
use crate::entities::{
    Checkpoint, Cue, Enemy, Hit, Input, Level, Outcome, Particle, Pickup, PickupKind, Platform,
    Player, Spike,
};
use crate::physics;

// ── Particle bursts ──────────────────────────────────────────────────────────

/// Gameplay events that throw off a burst of particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Burst {
    Coin,
    Crystal,
    EnemyKill,
    Checkpoint,
    Respawn,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstStyle {
    pub count: usize,
    pub min_speed: f32,
    pub max_speed: f32,
    pub lifetime: u32,
    pub color: Rgb,
}

pub fn burst_style(burst: Burst) -> BurstStyle {
    let (count, min_speed, max_speed, lifetime, color) = match burst {
        Burst::Coin => (8, 2.0, 4.0, 20, YELLOW),
        Burst::Crystal => (12, 2.0, 5.0, 25, PURPLE),
        Burst::EnemyKill => (20, 2.0, 6.0, 30, RED),
        Burst::Checkpoint => (10, 1.0, 3.0, 30, CYAN),
        Burst::Respawn => (15, 2.0, 5.0, 40, CYAN),
    };
    BurstStyle {
        count,
        min_speed,
        max_speed,
        lifetime,
        color,
    }
}

/// Spawn a radial burst centred on (`cx`, `cy`).
pub fn spawn_burst(
    burst: Burst,
    cx: f32,
    cy: f32,
    size: f32,
    rng: &mut impl Rng,
) -> Vec<Particle> {
    let style = burst_style(burst);
    (0..style.count)
        .map(|_| {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(style.min_speed..=style.max_speed);
            Particle {
                x: cx - size / 2.0,
                y: cy - size / 2.0,
                vel_x: angle.cos() * speed,
                vel_y: angle.sin() * speed,
                color: style.color,
                lifetime: style.lifetime,
                max_lifetime: style.lifetime,
            }
        })
        .collect()
}

fn pickup_burst(kind: PickupKind) -> Burst {
    match kind {
        PickupKind::Coin => Burst::Coin,
        PickupKind::Crystal => Burst::Crystal,
    }
}

// ── Entity update rules ──────────────────────────────────────────────────────

/// Moving platforms slide regardless of what they hit and turn round once
/// their displacement from the origin exceeds the range.
pub fn step_platform(platform: &Platform) -> Platform {
    let mut p = platform.clone();
    if let Some(motion) = p.motion.as_mut() {
        p.x += motion.direction * motion.speed;
        if (p.x - motion.origin_x).abs() > motion.range {
            motion.direction = -motion.direction;
        }
    }
    p
}

/// Dead enemies stay where they fell.
pub fn step_enemy(enemy: &Enemy) -> Enemy {
    let mut e = enemy.clone();
    if e.is_alive() {
        e.x += e.vel_x;
        if (e.x - e.origin_x).abs() > e.patrol_range {
            e.vel_x = -e.vel_x;
        }
        e.attack_cooldown = e.attack_cooldown.saturating_sub(1);
    }
    e
}

pub fn step_pickup(pickup: &Pickup) -> Pickup {
    let phase = pickup.phase + pickup.kind.bob_step();
    Pickup {
        phase,
        y: pickup.origin_y + phase.sin() * Pickup::BOB_AMPLITUDE,
        ..pickup.clone()
    }
}

/// Age a particle by one tick.  `None` once its lifetime runs out.
pub fn step_particle(particle: &Particle, gravity: f32) -> Option<Particle> {
    let lifetime = particle.lifetime.checked_sub(1).filter(|&l| l > 0)?;
    Some(Particle {
        x: particle.x + particle.vel_x,
        y: particle.y + particle.vel_y,
        vel_y: particle.vel_y + gravity,
        lifetime,
        ..particle.clone()
    })
}

// ── Camera ───────────────────────────────────────────────────────────────────

/// Where the camera wants to be: the player a third of the way across the
/// screen, kept inside the level.
pub fn camera_target(player: &Player, config: &GameConfig) -> f32 {
    let screen = &config.screen;
    let ideal = player.rect().center_x() - screen.width * config.camera.lead;
    ideal.max(0.0).min(screen.level_width - screen.width)
}

/// Close a fixed fraction of the gap each tick.
pub fn ease_camera(current: f32, target: f32, smoothing: f32) -> f32 {
    current + (target - current) * smoothing
}

// ── Player vs world ──────────────────────────────────────────────────────────

/// Damage from every overlapping spike.
fn touch_spikes(player: &mut Player, spikes: &[Spike], damage: i32) {
    let rect = player.rect();
    for spike in spikes {
        if rect.intersects(&spike.rect()) {
            player.hurt(damage);
        }
    }
}

/// Collect overlapping pickups.  Returns the surviving pickups.
fn collect_pickups(
    player: &mut Player,
    pickups: Vec<Pickup>,
    particles: &mut Vec<Particle>,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Vec<Pickup> {
    let rect = player.rect();
    let taken: Vec<usize> = pickups
        .iter()
        .enumerate()
        .filter(|(_, p)| rect.intersects(&p.rect()))
        .map(|(i, _)| i)
        .collect();

    for &i in &taken {
        let pickup = &pickups[i];
        match pickup.kind {
            PickupKind::Coin => {
                player.coins += 1;
                player.award(config.scoring.coin);
            }
            PickupKind::Crystal => {
                player.crystals += 1;
                player.award(config.scoring.crystal);
            }
        }
        let r = pickup.rect();
        particles.extend(spawn_burst(
            pickup_burst(pickup.kind),
            r.center_x(),
            r.center_y(),
            config.particles.size,
            rng,
        ));
    }

    pickups
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !taken.contains(i))
        .map(|(_, p)| p)
        .collect()
}

fn kill_with_burst(
    enemy: &Enemy,
    player: &mut Player,
    particles: &mut Vec<Particle>,
    config: &GameConfig,
    rng: &mut impl Rng,
) {
    let r = enemy.rect();
    particles.extend(spawn_burst(
        Burst::EnemyKill,
        r.center_x(),
        r.center_y(),
        config.particles.size,
        rng,
    ));
    player.award(config.scoring.enemy_kill);
}

/// Attack every live enemy within range.  Returns the number killed.
fn attack_enemies(
    player: &mut Player,
    enemies: &mut [Enemy],
    particles: &mut Vec<Particle>,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> u32 {
    let combat = &config.combat;
    let me = player.rect();
    let mut killed = 0;

    for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
        let them = enemy.rect();
        let dx = them.center_x() - me.center_x();
        let dy = them.center_y() - me.center_y();
        if (dx * dx + dy * dy).sqrt() >= combat.attack_range {
            continue;
        }
        match enemy.take_damage(combat.attack_damage) {
            Hit::Killed => {
                kill_with_burst(enemy, player, particles, config, rng);
                killed += 1;
            }
            Hit::Hurt => enemy.attack_cooldown = combat.attack_cooldown,
            Hit::Ignored => {}
        }
    }
    killed
}

/// Body contact with live enemies: stomp from above, otherwise take damage.
/// `prev_y` is the player's top edge before this tick's move.
fn touch_enemies(
    player: &mut Player,
    prev_y: f32,
    enemies: &mut [Enemy],
    particles: &mut Vec<Particle>,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> u32 {
    let mut killed = 0;

    for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
        if !player.rect().intersects(&enemy.rect()) {
            continue;
        }
        let from_above = player.vel_y > 0.0 && prev_y + player.height <= enemy.rect().top();
        if from_above {
            if enemy.kill() {
                kill_with_burst(enemy, player, particles, config, rng);
                player.vel_y = player.jump_power;
                killed += 1;
            }
        } else {
            player.hurt(config.combat.enemy_contact_damage);
        }
    }
    killed
}

/// First touch activates a checkpoint and moves the respawn anchor there.
fn touch_checkpoints(
    player: &mut Player,
    checkpoints: &mut [Checkpoint],
    particles: &mut Vec<Particle>,
    config: &GameConfig,
    rng: &mut impl Rng,
) {
    let rect = player.rect();
    for checkpoint in checkpoints.iter_mut() {
        if rect.intersects(&checkpoint.rect()) && checkpoint.activate() {
            let (ax, ay) = checkpoint.anchor();
            player.checkpoint = (ax, ay);
            particles.extend(spawn_burst(Burst::Checkpoint, ax, ay, config.particles.size, rng));
            debug!("Checkpoint {} activated at ({ax}, {ay})", checkpoint.id);
        }
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the level by one frame.
///
/// Order: input → player integration → platforms/enemies/pickups →
/// player-vs-world → camera → particles.  A quit request returns at once
/// with the level untouched.
pub fn tick(level: &Level, input: &Input, rng: &mut impl Rng) -> (Level, Outcome) {
    if input.quit {
        return (level.clone(), Outcome::Quit);
    }

    let config = &level.config;
    let before = &level.player;
    let mut cues = Vec::new();

    // ── 1. Input & integration ───────────────────────────────────────────────
    if physics::will_jump(before, input) {
        cues.push(Cue::Jump);
    }
    let player = physics::apply_input(before, input, &config.physics);
    let prev = (player.x, player.y);
    let player = physics::integrate(&player, config.screen.level_width);

    // ── 2. Dynamic entities ──────────────────────────────────────────────────
    let platforms: Vec<Platform> = level.platforms.iter().map(step_platform).collect();
    let mut enemies: Vec<Enemy> = level.enemies.iter().map(step_enemy).collect();
    let pickups: Vec<Pickup> = level.pickups.iter().map(step_pickup).collect();
    let mut checkpoints = level.checkpoints.clone();
    let mut particles = level.particles.clone();

    // ── 3. Player vs world ───────────────────────────────────────────────────
    let mut player = physics::resolve_platforms(&player, prev, &platforms, config);

    touch_spikes(&mut player, &level.spikes, config.combat.spike_damage);
    let mut outcome = if player.health <= 0 {
        Outcome::Died
    } else {
        Outcome::Continue
    };

    let pickups = if outcome == Outcome::Continue {
        collect_pickups(&mut player, pickups, &mut particles, config, rng)
    } else {
        pickups
    };

    if outcome == Outcome::Continue && player.rect().intersects(&level.goal.rect()) {
        player.award(config.scoring.goal);
        outcome = Outcome::Goal;
        info!("Level {} complete, score {}", level.number, player.score());
    }

    if outcome == Outcome::Continue && player.y > config.death_line() {
        outcome = Outcome::Died;
    }

    let mut kills = level.kills;
    if outcome == Outcome::Continue {
        if input.attack {
            kills += attack_enemies(&mut player, &mut enemies, &mut particles, config, rng);
        }
        kills += touch_enemies(&mut player, prev.1, &mut enemies, &mut particles, config, rng);
        touch_checkpoints(&mut player, &mut checkpoints, &mut particles, config, rng);
    }

    // ── 4. Death & respawn ───────────────────────────────────────────────────
    let mut deaths = level.deaths;
    if outcome == Outcome::Died {
        player.alive = false;
        player = physics::respawn(&player);
        deaths += 1;
        let r = player.rect();
        particles.extend(spawn_burst(
            Burst::Respawn,
            r.center_x(),
            r.center_y(),
            config.particles.size,
            rng,
        ));
        debug!("Player died; respawned at {:?}", player.checkpoint);
    }

    // ── 5. Cues from counter changes ─────────────────────────────────────────
    if player.coins > before.coins {
        cues.push(Cue::Coin);
    }
    if player.crystals > before.crystals {
        cues.push(Cue::Crystal);
    }
    if kills > level.kills {
        cues.push(Cue::EnemyKill);
        debug!("{} enemy(ies) defeated", kills - level.kills);
    }

    // ── 6. Camera & particles ────────────────────────────────────────────────
    let camera_x = ease_camera(
        level.camera_x,
        camera_target(&player, config),
        config.camera.smoothing,
    );
    let particles: Vec<Particle> = particles
        .iter()
        .filter_map(|p| step_particle(p, config.particles.gravity))
        .collect();

    (
        Level {
            player,
            platforms,
            pickups,
            enemies,
            checkpoints,
            particles,
            camera_x,
            frame: level.frame + 1,
            cues,
            kills,
            deaths,
            ..level.clone()
        },
        outcome,
    )
}
