/// Level manifests (fixed entity placements for each stage) and the
/// constructor that turns a manifest into a playable `Level`.

use log::info;

use crate::config::{GameConfig, Rgb};
use crate::entities::{Checkpoint, Enemy, Goal, Level, Pickup, Platform, Spike, Theme};
use crate::error::GameError;

pub const LEVEL_COUNT: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shade {
    Base,
    Light,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlatformSpec {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub shade: Shade,
    /// Oscillation half-range; `None` for a fixed platform.
    pub range: Option<f32>,
}

const fn solid(x: f32, y: f32, w: f32, h: f32) -> PlatformSpec {
    PlatformSpec { x, y, w, h, shade: Shade::Base, range: None }
}

const fn pillar(x: f32, y: f32, w: f32, h: f32) -> PlatformSpec {
    PlatformSpec { x, y, w, h, shade: Shade::Light, range: None }
}

const fn mover(x: f32, y: f32, w: f32, h: f32, range: f32) -> PlatformSpec {
    PlatformSpec { x, y, w, h, shade: Shade::Light, range: Some(range) }
}

/// Static description of one level.  Pickup, checkpoint and goal
/// coordinates are centres; everything else is top-left.
#[derive(Debug)]
pub struct Manifest {
    pub theme: Theme,
    pub platforms: &'static [PlatformSpec],
    pub spikes: &'static [(f32, f32)],
    pub checkpoints: &'static [(f32, f32)],
    pub coin_xs: &'static [f32],
    pub coin_y: f32,
    pub crystal_xs: &'static [f32],
    pub crystal_y: f32,
    pub enemies: &'static [(f32, f32)],
    pub enemy_range: f32,
    pub goal: (f32, f32),
}

// ── Level 1: Grass Fields ────────────────────────────────────────────────────

const GRASS_FIELDS: Manifest = Manifest {
    theme: Theme {
        name: "Grass Fields",
        background: Rgb(34, 139, 34),
        platform: Rgb(60, 180, 60),
        platform_light: Rgb(120, 200, 100),
    },
    platforms: &[
        solid(0.0, 650.0, 250.0, 50.0),
        solid(350.0, 550.0, 150.0, 40.0),
        solid(600.0, 450.0, 150.0, 40.0),
        solid(850.0, 350.0, 150.0, 40.0),
        solid(1100.0, 450.0, 150.0, 40.0),
        solid(1350.0, 550.0, 150.0, 40.0),
        solid(1600.0, 400.0, 150.0, 40.0),
        solid(1850.0, 500.0, 150.0, 40.0),
        solid(2100.0, 350.0, 200.0, 40.0),
        solid(2400.0, 450.0, 150.0, 40.0),
        solid(2650.0, 550.0, 150.0, 40.0),
        solid(2900.0, 400.0, 300.0, 40.0),
        // wall-jump shaft
        pillar(500.0, 350.0, 40.0, 200.0),
        pillar(560.0, 350.0, 40.0, 200.0),
    ],
    spikes: &[],
    checkpoints: &[(425.0, 500.0), (1425.0, 500.0), (2475.0, 400.0)],
    coin_xs: &[
        425.0, 675.0, 925.0, 1175.0, 1425.0, 1675.0, 1925.0, 2175.0, 2475.0, 2725.0, 2975.0,
    ],
    coin_y: 380.0,
    crystal_xs: &[600.0, 1350.0, 2100.0, 2650.0],
    crystal_y: 320.0,
    enemies: &[(450.0, 600.0), (1200.0, 500.0), (2000.0, 600.0)],
    enemy_range: 80.0,
    goal: (2975.0, 300.0),
};

// ── Level 2: Desert Wastes ───────────────────────────────────────────────────

const DESERT_WASTES: Manifest = Manifest {
    theme: Theme {
        name: "Desert Wastes",
        background: Rgb(184, 134, 11),
        platform: Rgb(210, 180, 140),
        platform_light: Rgb(238, 203, 173),
    },
    platforms: &[
        solid(0.0, 650.0, 200.0, 50.0),
        mover(250.0, 550.0, 130.0, 40.0, 80.0),
        solid(500.0, 450.0, 130.0, 40.0),
        pillar(750.0, 300.0, 40.0, 250.0),
        pillar(880.0, 300.0, 40.0, 250.0),
        solid(1000.0, 400.0, 130.0, 40.0),
        mover(1250.0, 450.0, 130.0, 40.0, 80.0),
        solid(1500.0, 350.0, 130.0, 40.0),
        solid(1750.0, 500.0, 100.0, 40.0),
        solid(1900.0, 450.0, 100.0, 40.0),
        solid(2050.0, 400.0, 100.0, 40.0),
        solid(2200.0, 350.0, 100.0, 40.0),
        mover(2350.0, 450.0, 130.0, 40.0, 100.0),
        solid(2600.0, 550.0, 200.0, 40.0),
        solid(2900.0, 400.0, 300.0, 40.0),
    ],
    spikes: &[
        (700.0, 550.0),
        (920.0, 550.0),
        (700.0, 600.0),
        (920.0, 600.0),
        (1700.0, 600.0),
        (1850.0, 600.0),
        (2000.0, 600.0),
        (2150.0, 600.0),
        (2550.0, 600.0),
    ],
    checkpoints: &[(575.0, 400.0), (1200.0, 350.0), (1900.0, 300.0), (2700.0, 500.0)],
    coin_xs: &[
        325.0, 575.0, 825.0, 1075.0, 1325.0, 1575.0, 1825.0, 2075.0, 2325.0, 2575.0, 2825.0,
        3100.0,
    ],
    coin_y: 280.0,
    crystal_xs: &[750.0, 1500.0, 2200.0, 3000.0],
    crystal_y: 300.0,
    enemies: &[
        (300.0, 500.0),
        (900.0, 350.0),
        (1400.0, 350.0),
        (2000.0, 300.0),
        (2700.0, 500.0),
    ],
    enemy_range: 80.0,
    goal: (3000.0, 300.0),
};

// ── Level 3: Crystal Chamber ─────────────────────────────────────────────────

const CRYSTAL_CHAMBER: Manifest = Manifest {
    theme: Theme {
        name: "Crystal Chamber",
        background: Rgb(25, 25, 112),
        platform: Rgb(70, 70, 140),
        platform_light: Rgb(105, 105, 205),
    },
    platforms: &[
        solid(0.0, 650.0, 180.0, 50.0),
        mover(200.0, 550.0, 100.0, 40.0, 60.0),
        solid(400.0, 450.0, 100.0, 40.0),
        pillar(600.0, 250.0, 40.0, 300.0),
        pillar(740.0, 250.0, 40.0, 300.0),
        solid(850.0, 380.0, 100.0, 40.0),
        mover(1000.0, 480.0, 100.0, 40.0, 100.0),
        solid(1200.0, 380.0, 100.0, 40.0),
        // moving wall-jump shaft
        mover(1400.0, 300.0, 40.0, 250.0, 50.0),
        mover(1540.0, 300.0, 40.0, 250.0, 50.0),
        solid(1650.0, 380.0, 100.0, 40.0),
        mover(1800.0, 480.0, 100.0, 40.0, 80.0),
        solid(2000.0, 350.0, 100.0, 40.0),
        solid(2200.0, 500.0, 80.0, 40.0),
        solid(2320.0, 450.0, 80.0, 40.0),
        solid(2440.0, 400.0, 80.0, 40.0),
        solid(2560.0, 350.0, 80.0, 40.0),
        solid(2680.0, 300.0, 80.0, 40.0),
        mover(2800.0, 500.0, 100.0, 40.0, 100.0),
        solid(3050.0, 400.0, 350.0, 40.0),
    ],
    spikes: &[
        (550.0, 600.0),
        (790.0, 600.0),
        (1350.0, 600.0),
        (1580.0, 600.0),
        (2150.0, 600.0),
        (2270.0, 600.0),
        (2390.0, 600.0),
        (2510.0, 600.0),
        (2630.0, 600.0),
        (2750.0, 600.0),
    ],
    checkpoints: &[
        (300.0, 450.0),
        (850.0, 330.0),
        (1650.0, 330.0),
        (2450.0, 300.0),
        (2900.0, 450.0),
    ],
    coin_xs: &[
        250.0, 450.0, 750.0, 1000.0, 1200.0, 1650.0, 1800.0, 2200.0, 2350.0, 2500.0, 2650.0,
        2800.0, 3150.0,
    ],
    coin_y: 280.0,
    crystal_xs: &[600.0, 1400.0, 2000.0, 2700.0, 3200.0],
    crystal_y: 300.0,
    enemies: &[
        (250.0, 500.0),
        (700.0, 300.0),
        (1050.0, 400.0),
        (1450.0, 300.0),
        (1850.0, 420.0),
        (2300.0, 420.0),
        (2700.0, 480.0),
    ],
    enemy_range: 60.0,
    goal: (3200.0, 300.0),
};

pub fn manifest(number: u32) -> Option<&'static Manifest> {
    match number {
        1 => Some(&GRASS_FIELDS),
        2 => Some(&DESERT_WASTES),
        3 => Some(&CRYSTAL_CHAMBER),
        _ => None,
    }
}

/// Build level `number` with a fresh player at the spawn point.
pub fn init_level(number: u32, config: &GameConfig) -> Result<Level, GameError> {
    let m = manifest(number).ok_or(GameError::UnknownLevel(number))?;
    let (gx, gy) = m.goal;
    let mut level = Level::new(number, m.theme.clone(), config.clone(), Goal::new(gx, gy));

    level.platforms = m
        .platforms
        .iter()
        .map(|spec| {
            let color = match spec.shade {
                Shade::Base => m.theme.platform,
                Shade::Light => m.theme.platform_light,
            };
            match spec.range {
                Some(range) => Platform::moving(
                    spec.x,
                    spec.y,
                    spec.w,
                    spec.h,
                    color,
                    range,
                    config.physics.platform_speed,
                ),
                None => Platform::fixed(spec.x, spec.y, spec.w, spec.h, color),
            }
        })
        .collect();

    level.spikes = m.spikes.iter().map(|&(x, y)| Spike::new(x, y)).collect();

    level.checkpoints = m
        .checkpoints
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| Checkpoint::new(i as u32 + 1, x, y))
        .collect();

    level.pickups = m
        .coin_xs
        .iter()
        .map(|&x| Pickup::coin(x, m.coin_y))
        .chain(m.crystal_xs.iter().map(|&x| Pickup::crystal(x, m.crystal_y)))
        .collect();

    level.enemies = m
        .enemies
        .iter()
        .map(|&(x, y)| Enemy::new(x, y, m.enemy_range, config))
        .collect();

    info!(
        "Loaded level {} ({}): {} platforms, {} pickups, {} enemies",
        number,
        m.theme.name,
        level.platforms.len(),
        level.pickups.len(),
        level.enemies.len()
    );
    Ok(level)
}
