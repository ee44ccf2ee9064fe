use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use quest_madness::config::{GameConfig, GRAY};
use quest_madness::entities::*;
use quest_madness::runner::{self, Frontend, LevelResult, LevelStats};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Replays a fixed list of inputs and records what it was asked to do.
/// Once the script runs out it holds no keys.
#[derive(Default)]
struct ScriptedFrontend {
    inputs: VecDeque<Input>,
    presented: usize,
    cues: Vec<Cue>,
}

impl ScriptedFrontend {
    fn new(inputs: Vec<Input>) -> Self {
        Self {
            inputs: inputs.into(),
            ..Self::default()
        }
    }
}

impl Frontend for ScriptedFrontend {
    fn poll_input(&mut self) -> io::Result<Input> {
        Ok(self.inputs.pop_front().unwrap_or_default())
    }

    fn present(&mut self, _level: &Level) -> io::Result<()> {
        self.presented += 1;
        Ok(())
    }

    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Goal directly under a player who is already falling.
fn goal_below() -> Level {
    let mut level = Level::new(2, Theme::default(), GameConfig::default(), Goal::new(115.0, 560.0));
    level.player.y = 500.0;
    level.player.vel_y = 10.0;
    level
}

#[test]
fn frame_budget_matches_fps() {
    assert_eq!(runner::frame_budget(50), Duration::from_millis(20));
    assert_eq!(runner::frame_budget(0), Duration::from_secs(1));
}

#[test]
fn reaching_goal_completes_run() {
    let mut frontend = ScriptedFrontend::default();
    let result = runner::run(goal_below(), &mut frontend, &mut seeded_rng()).expect("run");
    assert_eq!(
        result,
        LevelResult::Completed(LevelStats {
            number: 2,
            coins: 0,
            crystals: 0,
            score: 100,
            kills: 0,
            deaths: 0,
        })
    );
    assert_eq!(frontend.presented, 1);
}

#[test]
fn quit_ends_run_without_presenting() {
    let quit = Input { quit: true, ..Input::default() };
    let mut frontend = ScriptedFrontend::new(vec![quit]);
    let result = runner::run(goal_below(), &mut frontend, &mut seeded_rng()).expect("run");
    assert_eq!(result, LevelResult::Quit);
    assert_eq!(frontend.presented, 0);
}

#[test]
fn death_respawns_and_play_continues() {
    let mut level = Level::new(1, Theme::default(), GameConfig::default(), Goal::new(115.0, 560.0));
    level.player.y = 905.0;
    level.player.checkpoint = (100.0, 500.0);

    let mut frontend = ScriptedFrontend::default();
    let result = runner::run(level, &mut frontend, &mut seeded_rng()).expect("run");
    match result {
        LevelResult::Completed(stats) => {
            assert_eq!(stats.deaths, 1);
            assert_eq!(stats.score, 100);
        }
        LevelResult::Quit => panic!("run should reach the goal"),
    }
    assert!(frontend.presented >= 2);
}

#[test]
fn cues_reach_the_frontend() {
    let mut level = Level::new(1, Theme::default(), GameConfig::default(), Goal::new(3900.0, 100.0));
    level
        .platforms
        .push(Platform::fixed(0.0, 640.0, 4000.0, 60.0, GRAY));
    level.pickups.push(Pickup::coin(115.0, 620.0));

    let jump = Input { jump: true, ..Input::default() };
    let quit = Input { quit: true, ..Input::default() };
    let mut frontend = ScriptedFrontend::new(vec![Input::default(), jump, quit]);
    let result = runner::run(level, &mut frontend, &mut seeded_rng()).expect("run");

    assert_eq!(result, LevelResult::Quit);
    assert_eq!(frontend.cues, vec![Cue::Coin, Cue::Jump]);
    assert_eq!(frontend.presented, 2);
}
