/// All game entity types: plain data plus the few helpers that guard
/// one-way lifecycle transitions.

use crate::config::{GameConfig, Rgb, DARK_BLUE};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle, top-left anchored, y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `w`×`h` whose centre sits at (`cx`, `cy`).
    pub fn centered(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Strict overlap: rectangles that merely share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn shifted_x(&self, dx: f32) -> Rect {
        Rect { x: self.x + dx, ..*self }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Facing {
    Left,
    Right,
}

/// Which side of the player the wall being touched is on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WallSide {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub gravity: f32,
    pub jump_power: f32,
    pub move_speed: f32,
    pub max_fall_speed: f32,
    pub on_ground: bool,
    /// `Some` while pressed against a platform side.
    pub wall: Option<WallSide>,
    pub health: i32,
    pub max_health: i32,
    pub coins: u32,
    pub crystals: u32,
    pub(crate) score: u32,
    pub alive: bool,
    pub facing: Facing,
    /// Respawn anchor (top-left). Starts at the spawn point.
    pub checkpoint: (f32, f32),
}

impl Player {
    pub fn new(x: f32, y: f32, config: &GameConfig) -> Self {
        let physics = &config.physics;
        Self {
            x,
            y,
            width: physics.player_width,
            height: physics.player_height,
            vel_x: 0.0,
            vel_y: 0.0,
            gravity: physics.gravity,
            jump_power: physics.jump_power,
            move_speed: physics.move_speed,
            max_fall_speed: physics.max_fall_speed,
            on_ground: false,
            wall: None,
            health: config.combat.max_health,
            max_health: config.combat.max_health,
            coins: 0,
            crystals: 0,
            score: 0,
            alive: true,
            facing: Facing::Right,
            checkpoint: (x, y),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn on_wall(&self) -> bool {
        self.wall.is_some()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Score only ever grows within a level attempt.
    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Subtract health, clamped at zero.
    pub fn hurt(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0).min(self.max_health);
    }
}

// ── World geometry ────────────────────────────────────────────────────────────

/// Horizontal back-and-forth motion of a moving platform.
#[derive(Clone, Debug, PartialEq)]
pub struct Oscillation {
    /// +1.0 or -1.0.
    pub direction: f32,
    pub range: f32,
    pub origin_x: f32,
    pub speed: f32,
}

#[derive(Clone, Debug)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: Rgb,
    pub motion: Option<Oscillation>,
}

impl Platform {
    pub fn fixed(x: f32, y: f32, w: f32, h: f32, color: Rgb) -> Self {
        Self { x, y, w, h, color, motion: None }
    }

    pub fn moving(x: f32, y: f32, w: f32, h: f32, color: Rgb, range: f32, speed: f32) -> Self {
        Self {
            motion: Some(Oscillation {
                direction: 1.0,
                range,
                origin_x: x,
                speed,
            }),
            ..Self::fixed(x, y, w, h, color)
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

#[derive(Clone, Debug)]
pub struct Spike {
    pub x: f32,
    pub y: f32,
}

impl Spike {
    pub const WIDTH: f32 = 20.0;
    pub const HEIGHT: f32 = 25.0;

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, Self::WIDTH, Self::HEIGHT)
    }
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PickupKind {
    Coin,
    Crystal,
}

impl PickupKind {
    pub fn size(self) -> f32 {
        match self {
            PickupKind::Coin => 15.0,
            PickupKind::Crystal => 20.0,
        }
    }

    /// Phase advance per tick of the bob animation.
    pub fn bob_step(self) -> f32 {
        match self {
            PickupKind::Coin => 0.1,
            PickupKind::Crystal => 0.3,
        }
    }
}

/// A coin or crystal.  `x`/`y` are the top-left; `origin_y` is the resting
/// top edge the bob oscillates around.
#[derive(Clone, Debug)]
pub struct Pickup {
    pub kind: PickupKind,
    pub x: f32,
    pub y: f32,
    pub origin_y: f32,
    pub phase: f32,
}

impl Pickup {
    pub const BOB_AMPLITUDE: f32 = 5.0;

    /// Place a pickup centred on (`cx`, `cy`).
    pub fn new(kind: PickupKind, cx: f32, cy: f32) -> Self {
        let r = Rect::centered(cx, cy, kind.size(), kind.size());
        Self {
            kind,
            x: r.x,
            y: r.y,
            origin_y: r.y,
            phase: 0.0,
        }
    }

    pub fn coin(cx: f32, cy: f32) -> Self {
        Self::new(PickupKind::Coin, cx, cy)
    }

    pub fn crystal(cx: f32, cy: f32) -> Self {
        Self::new(PickupKind::Crystal, cx, cy)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.kind.size(), self.kind.size())
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

/// Enemy life.  `Dead` is terminal: no method leads back to `Alive`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnemyState {
    Alive { health: i32 },
    Dead,
}

/// What a hit did to an enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Hit {
    Hurt,
    Killed,
    /// The enemy was already dead.
    Ignored,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub origin_x: f32,
    pub patrol_range: f32,
    pub attack_cooldown: u32,
    state: EnemyState,
}

impl Enemy {
    pub const SIZE: f32 = 25.0;

    pub fn new(x: f32, y: f32, patrol_range: f32, config: &GameConfig) -> Self {
        Self {
            x,
            y,
            vel_x: config.combat.enemy_speed,
            origin_x: x,
            patrol_range,
            attack_cooldown: 0,
            state: EnemyState::Alive {
                health: config.combat.enemy_health,
            },
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, Self::SIZE, Self::SIZE)
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        matches!(self.state, EnemyState::Alive { .. })
    }

    pub fn health(&self) -> i32 {
        match self.state {
            EnemyState::Alive { health } => health,
            EnemyState::Dead => 0,
        }
    }

    pub fn take_damage(&mut self, amount: i32) -> Hit {
        match self.state {
            EnemyState::Dead => Hit::Ignored,
            EnemyState::Alive { health } if health - amount <= 0 => {
                self.state = EnemyState::Dead;
                Hit::Killed
            }
            EnemyState::Alive { health } => {
                self.state = EnemyState::Alive {
                    health: health - amount,
                };
                Hit::Hurt
            }
        }
    }

    /// Kill outright.  Returns `false` if the enemy was already dead.
    pub fn kill(&mut self) -> bool {
        let was_alive = self.is_alive();
        self.state = EnemyState::Dead;
        was_alive
    }
}

// ── Checkpoint & goal ─────────────────────────────────────────────────────────

/// Checkpoint activation never reverts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CheckpointState {
    Inactive,
    Activated,
}

#[derive(Clone, Debug)]
pub struct Checkpoint {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    state: CheckpointState,
}

impl Checkpoint {
    pub const SIZE: f32 = 40.0;

    /// Checkpoint centred on (`cx`, `cy`).
    pub fn new(id: u32, cx: f32, cy: f32) -> Self {
        Self {
            id,
            x: cx - Self::SIZE / 2.0,
            y: cy - Self::SIZE / 2.0,
            state: CheckpointState::Inactive,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, Self::SIZE, Self::SIZE)
    }

    /// The coordinate the player respawns at once this checkpoint is active.
    pub fn anchor(&self) -> (f32, f32) {
        let r = self.rect();
        (r.center_x(), r.center_y())
    }

    pub fn state(&self) -> CheckpointState {
        self.state
    }

    pub fn is_activated(&self) -> bool {
        self.state == CheckpointState::Activated
    }

    /// Returns `true` only on the Inactive → Activated transition.
    pub fn activate(&mut self) -> bool {
        match self.state {
            CheckpointState::Inactive => {
                self.state = CheckpointState::Activated;
                true
            }
            CheckpointState::Activated => false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Goal {
    pub x: f32,
    pub y: f32,
}

impl Goal {
    pub const SIZE: f32 = 35.0;

    pub fn new(cx: f32, cy: f32) -> Self {
        Self {
            x: cx - Self::SIZE / 2.0,
            y: cy - Self::SIZE / 2.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, Self::SIZE, Self::SIZE)
    }
}

// ── Particles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub color: Rgb,
    /// Ticks left; the particle is pruned when this hits 0.
    pub lifetime: u32,
    pub max_lifetime: u32,
}

impl Particle {
    /// Opacity in 0.0..=1.0, linear in remaining lifetime.
    pub fn alpha(&self) -> f32 {
        if self.max_lifetime == 0 {
            return 0.0;
        }
        self.lifetime as f32 / self.max_lifetime as f32
    }
}

// ── Per-tick I/O ──────────────────────────────────────────────────────────────

/// Snapshot of held keys for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub attack: bool,
    pub quit: bool,
}

/// Sound events emitted by a tick.  Playing them is the frontend's job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Jump,
    Coin,
    Crystal,
    EnemyKill,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// The player died and was respawned; play goes on.
    Died,
    Goal,
    Quit,
}

// ── Level ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgb,
    pub platform: Rgb,
    pub platform_light: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Untitled",
            background: DARK_BLUE,
            platform: Rgb(50, 200, 50),
            platform_light: Rgb(120, 200, 100),
        }
    }
}

/// The entire state of one level attempt.  Cloneable so `compute::tick` can
/// return a fresh copy each frame.
#[derive(Clone, Debug)]
pub struct Level {
    pub number: u32,
    pub theme: Theme,
    pub config: GameConfig,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub spikes: Vec<Spike>,
    pub pickups: Vec<Pickup>,
    pub enemies: Vec<Enemy>,
    pub checkpoints: Vec<Checkpoint>,
    pub goal: Goal,
    pub particles: Vec<Particle>,
    pub camera_x: f32,
    pub frame: u64,
    /// Cues raised during the most recent tick.
    pub cues: Vec<Cue>,
    pub kills: u32,
    pub deaths: u32,
}

impl Level {
    /// A level with the player at the configured spawn point and no world.
    pub fn new(number: u32, theme: Theme, config: GameConfig, goal: Goal) -> Self {
        let player = Player::new(config.physics.spawn_x, config.physics.spawn_y, &config);
        Self {
            number,
            theme,
            config,
            player,
            platforms: Vec::new(),
            spikes: Vec::new(),
            pickups: Vec::new(),
            enemies: Vec::new(),
            checkpoints: Vec::new(),
            goal,
            particles: Vec::new(),
            camera_x: 0.0,
            frame: 0,
            cues: Vec::new(),
            kills: 0,
            deaths: 0,
        }
    }
}
