/// The fixed-rate level loop.
///
/// One frame: poll input → `compute::tick` → hand cues to the frontend →
/// present → sleep out the remainder of the frame budget.  The frontend is
/// the only thing that touches the outside world.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use log::info;
use rand::Rng;

use crate::compute;
use crate::entities::{Cue, Input, Level, Outcome};
use crate::error::GameError;

/// Input source, renderer and sound output for `run`.
pub trait Frontend {
    /// Snapshot of the keys held right now.
    fn poll_input(&mut self) -> io::Result<Input>;

    /// Draw one frame.
    fn present(&mut self, level: &Level) -> io::Result<()>;

    /// Play a sound cue.  Failing to play must not stop the game, so this
    /// cannot return an error.
    fn play(&mut self, cue: Cue);
}

/// Totals for one completed attempt at a level.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelStats {
    pub number: u32,
    pub coins: u32,
    pub crystals: u32,
    pub score: u32,
    pub kills: u32,
    pub deaths: u32,
}

impl LevelStats {
    pub fn from_level(level: &Level) -> Self {
        Self {
            number: level.number,
            coins: level.player.coins,
            crystals: level.player.crystals,
            score: level.player.score(),
            kills: level.kills,
            deaths: level.deaths,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LevelResult {
    Completed(LevelStats),
    Quit,
}

pub fn frame_budget(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / fps.max(1) as f64)
}

/// Play `level` until the goal is reached or the frontend asks to quit.
/// Deaths respawn the player and never end the loop.
pub fn run<F: Frontend>(
    mut level: Level,
    frontend: &mut F,
    rng: &mut impl Rng,
) -> Result<LevelResult, GameError> {
    let budget = frame_budget(level.config.screen.fps);
    info!("Starting level {} ({})", level.number, level.theme.name);

    loop {
        let frame_start = Instant::now();

        let input = frontend.poll_input()?;
        let (next, outcome) = compute::tick(&level, &input, rng);
        if outcome == Outcome::Quit {
            info!("Level {} abandoned", level.number);
            return Ok(LevelResult::Quit);
        }
        level = next;

        for &cue in &level.cues {
            frontend.play(cue);
        }
        frontend.present(&level)?;

        if outcome == Outcome::Goal {
            return Ok(LevelResult::Completed(LevelStats::from_level(&level)));
        }

        let elapsed = frame_start.elapsed();
        if elapsed < budget {
            thread::sleep(budget - elapsed);
        }
    }
}
