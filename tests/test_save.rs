use std::path::PathBuf;

use quest_madness::config::GameConfig;
use quest_madness::entities::Player;
use quest_madness::error::GameError;
use quest_madness::runner::LevelStats;
use quest_madness::save::Progress;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("quest_madness_{}_{}.json", name, std::process::id()))
}

fn stats(number: u32, coins: u32, crystals: u32) -> LevelStats {
    LevelStats {
        number,
        coins,
        crystals,
        score: 0,
        kills: 0,
        deaths: 0,
    }
}

// ── Progress ──────────────────────────────────────────────────────────────────

#[test]
fn missing_save_is_a_fresh_start() {
    let path = temp_path("missing");
    let _ = std::fs::remove_file(&path);
    let progress = Progress::load(&path).expect("missing file is not an error");
    assert_eq!(progress, Progress::default());
    assert_eq!(progress.highest_level, 1);
    assert_eq!(progress.max_health, 100);
}

#[test]
fn saved_progress_loads_back() {
    let path = temp_path("saved");
    let progress = Progress {
        crystals: 9,
        coins: 42,
        max_health: 120,
        speed_bonus: 1,
        highest_level: 3,
    };
    progress.save(&path).expect("save");
    let loaded = Progress::load(&path).expect("load");
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, progress);
}

#[test]
fn partial_save_keeps_defaults() {
    let path = temp_path("partial");
    std::fs::write(&path, r#"{ "coins": 7 }"#).expect("write");
    let loaded = Progress::load(&path).expect("load");
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded.coins, 7);
    assert_eq!(loaded.max_health, 100);
    assert_eq!(loaded.highest_level, 1);
}

#[test]
fn corrupt_save_is_reported_then_ignored() {
    let path = temp_path("corrupt");
    std::fs::write(&path, "not json").expect("write");
    let err = Progress::load(&path).unwrap_err();
    assert!(matches!(err, GameError::Parse { .. }));
    assert_eq!(Progress::load_or_default(&path), Progress::default());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn record_banks_pickups_and_unlocks_next() {
    let mut progress = Progress::default();
    progress.record(&stats(1, 3, 2));
    assert_eq!((progress.coins, progress.crystals), (3, 2));
    assert_eq!(progress.highest_level, 2);

    progress.record(&stats(2, 1, 0));
    assert_eq!(progress.highest_level, 3);

    // Replaying an earlier level never locks later ones again.
    progress.record(&stats(1, 1, 1));
    assert_eq!(progress.highest_level, 3);
    assert_eq!((progress.coins, progress.crystals), (5, 3));
}

#[test]
fn outfit_applies_upgrades() {
    let progress = Progress {
        max_health: 150,
        speed_bonus: 2,
        ..Progress::default()
    };
    let mut player = Player::new(100.0, 600.0, &GameConfig::default());
    progress.outfit(&mut player);
    assert_eq!(player.max_health, 150);
    assert_eq!(player.health, 150);
    assert_eq!(player.move_speed, 7.0);
}

// ── GameConfig ────────────────────────────────────────────────────────────────

#[test]
fn default_config_values() {
    let cfg = GameConfig::default();
    assert_eq!(cfg.screen.width, 1200.0);
    assert_eq!(cfg.screen.level_width, 4000.0);
    assert_eq!(cfg.screen.fps, 60);
    assert_eq!(cfg.physics.gravity, 0.5);
    assert_eq!(cfg.physics.jump_power, -12.0);
    assert_eq!(cfg.death_line(), 900.0);
}

#[test]
fn partial_config_overrides_only_named_fields() {
    let cfg = GameConfig::from_json(r#"{ "physics": { "gravity": 1.0 }, "scoring": { "goal": 500 } }"#)
        .expect("valid json");
    assert_eq!(cfg.physics.gravity, 1.0);
    assert_eq!(cfg.physics.jump_power, -12.0);
    assert_eq!(cfg.scoring.goal, 500);
    assert_eq!(cfg.scoring.coin, 10);
    assert_eq!(cfg.combat, GameConfig::default().combat);
}

#[test]
fn bad_config_file_names_its_path() {
    let path = temp_path("bad_config");
    std::fs::write(&path, "{ \"physics\": 3 }").expect("write");
    let err = GameConfig::load(&path).unwrap_err();
    let _ = std::fs::remove_file(&path);
    match err {
        GameError::Parse { path: p, .. } => assert_eq!(p, path),
        other => panic!("expected parse error, got {other}"),
    }
}
