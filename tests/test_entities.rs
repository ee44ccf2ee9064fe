use quest_madness::config::GameConfig;
use quest_madness::entities::*;

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_edges_and_centre() {
    let r = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(r.left(), 10.0);
    assert_eq!(r.right(), 40.0);
    assert_eq!(r.top(), 20.0);
    assert_eq!(r.bottom(), 60.0);
    assert_eq!(r.center_x(), 25.0);
    assert_eq!(r.center_y(), 40.0);
}

#[test]
fn rect_centered_places_centre() {
    let r = Rect::centered(100.0, 50.0, 20.0, 10.0);
    assert_eq!(r.x, 90.0);
    assert_eq!(r.y, 45.0);
}

#[test]
fn rect_overlap_is_strict() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let touching_right = Rect::new(10.0, 0.0, 10.0, 10.0);
    let touching_below = Rect::new(0.0, 10.0, 10.0, 10.0);
    let overlapping = Rect::new(9.5, 9.5, 10.0, 10.0);
    assert!(!a.intersects(&touching_right));
    assert!(!a.intersects(&touching_below));
    assert!(a.intersects(&overlapping));
    assert!(overlapping.intersects(&a));
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_starts_at_spawn_with_full_health() {
    let cfg = GameConfig::default();
    let p = Player::new(100.0, 600.0, &cfg);
    assert_eq!(p.checkpoint, (100.0, 600.0));
    assert_eq!(p.health, 100);
    assert_eq!(p.max_health, 100);
    assert_eq!(p.score(), 0);
    assert!(p.alive);
    assert!(!p.on_ground);
    assert!(!p.on_wall());
    assert_eq!(p.rect(), Rect::new(100.0, 600.0, 30.0, 40.0));
}

#[test]
fn player_health_clamps_at_zero() {
    let mut p = Player::new(0.0, 0.0, &GameConfig::default());
    p.hurt(30);
    assert_eq!(p.health, 70);
    p.hurt(500);
    assert_eq!(p.health, 0);
}

#[test]
fn player_score_only_grows() {
    let mut p = Player::new(0.0, 0.0, &GameConfig::default());
    p.award(10);
    p.award(25);
    assert_eq!(p.score(), 35);
    p.award(u32::MAX);
    assert_eq!(p.score(), u32::MAX);
}

// ── Checkpoint lifecycle ──────────────────────────────────────────────────────

#[test]
fn checkpoint_activates_exactly_once() {
    let mut cp = Checkpoint::new(1, 425.0, 500.0);
    assert_eq!(cp.state(), CheckpointState::Inactive);
    assert!(cp.activate());
    assert!(cp.is_activated());
    assert!(!cp.activate());
    assert_eq!(cp.state(), CheckpointState::Activated);
}

#[test]
fn checkpoint_anchor_is_its_centre() {
    let cp = Checkpoint::new(2, 425.0, 500.0);
    assert_eq!(cp.rect(), Rect::new(405.0, 480.0, 40.0, 40.0));
    assert_eq!(cp.anchor(), (425.0, 500.0));
}

// ── Enemy lifecycle ───────────────────────────────────────────────────────────

#[test]
fn enemy_dies_on_second_hit_and_stays_dead() {
    let mut e = Enemy::new(450.0, 600.0, 80.0, &GameConfig::default());
    assert_eq!(e.health(), 2);
    assert_eq!(e.take_damage(1), Hit::Hurt);
    assert_eq!(e.health(), 1);
    assert!(e.is_alive());
    assert_eq!(e.take_damage(1), Hit::Killed);
    assert!(!e.is_alive());
    assert_eq!(e.take_damage(1), Hit::Ignored);
    assert_eq!(e.state(), EnemyState::Dead);
}

#[test]
fn enemy_kill_is_idempotent() {
    let mut e = Enemy::new(0.0, 0.0, 80.0, &GameConfig::default());
    assert!(e.kill());
    assert!(!e.kill());
    assert_eq!(e.health(), 0);
}

// ── Pickups & particles ───────────────────────────────────────────────────────

#[test]
fn pickups_are_centred_on_placement() {
    let coin = Pickup::coin(425.0, 380.0);
    assert_eq!(coin.rect(), Rect::new(417.5, 372.5, 15.0, 15.0));
    assert_eq!(coin.origin_y, 372.5);

    let crystal = Pickup::crystal(600.0, 320.0);
    assert_eq!(crystal.kind, PickupKind::Crystal);
    assert_eq!(crystal.rect(), Rect::new(590.0, 310.0, 20.0, 20.0));
}

#[test]
fn particle_alpha_fades_linearly() {
    let p = Particle {
        x: 0.0,
        y: 0.0,
        vel_x: 0.0,
        vel_y: 0.0,
        color: quest_madness::config::CYAN,
        lifetime: 15,
        max_lifetime: 30,
    };
    assert_eq!(p.alpha(), 0.5);
    assert_eq!(Particle { lifetime: 30, ..p.clone() }.alpha(), 1.0);
}

#[test]
fn moving_platform_remembers_origin() {
    let p = Platform::moving(250.0, 550.0, 130.0, 40.0, quest_madness::config::GRAY, 80.0, 2.0);
    let motion = p.motion.expect("moving platform has motion");
    assert_eq!(motion.origin_x, 250.0);
    assert_eq!(motion.direction, 1.0);
    assert!(Platform::fixed(0.0, 0.0, 1.0, 1.0, quest_madness::config::GRAY).motion.is_none());
}
