/// Rendering layer. All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// level.  No game logic is performed; world pixels from `scene::scene` are
/// scaled onto terminal cells and painted with crossterm commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use quest_madness::config::{Rgb, CYAN, GRAY, ORANGE, PURPLE, RED, WHITE, YELLOW};
use quest_madness::entities::{Facing, Level};
use quest_madness::runner::LevelStats;
use quest_madness::save::Progress;
use quest_madness::scene::{self, Sprite, Visual};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_COINS: Color = Color::Yellow;
const C_HUD_CRYSTALS: Color = Color::Magenta;
const C_HUD_SCORE: Color = Color::Cyan;
const C_HUD_PROGRESS: Color = Color::Blue;
const C_HINT: Color = Color::DarkGrey;

fn rgb(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

/// World-pixel → cell mapping for the current terminal size.
/// Row 0 is the HUD and the last row the controls hint.
struct Viewport {
    cols: u16,
    rows: u16,
    sx: f32,
    sy: f32,
}

impl Viewport {
    fn new(cols: u16, rows: u16, level: &Level) -> Self {
        let play_rows = rows.saturating_sub(2).max(1);
        Self {
            cols,
            rows,
            sx: cols as f32 / level.config.screen.width,
            sy: play_rows as f32 / level.config.screen.height,
        }
    }

    /// Inclusive cell span covered by `sprite`, clipped to the play area.
    fn cells(&self, sprite: &Sprite) -> Option<(u16, u16, u16, u16)> {
        let r = &sprite.rect;
        let c0 = (r.x * self.sx).floor() as i32;
        let c1 = (((r.x + r.w) * self.sx).ceil() as i32 - 1).max(c0);
        let r0 = (r.y * self.sy).floor() as i32 + 1;
        let r1 = (((r.y + r.h) * self.sy).ceil() as i32).max(r0);

        let max_col = self.cols as i32 - 1;
        let max_row = self.rows as i32 - 2;
        let (c0, c1) = (c0.max(0), c1.min(max_col));
        let (r0, r1) = (r0.max(1), r1.min(max_row));
        if c0 > c1 || r0 > r1 {
            return None;
        }
        Some((c0 as u16, c1 as u16, r0 as u16, r1 as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, level: &Level) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(cols, rows, level);

    out.queue(style::SetBackgroundColor(rgb(level.theme.background)))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for sprite in scene::scene(level) {
        draw_sprite(out, &view, &sprite)?;
    }

    out.queue(style::ResetColor)?;
    draw_hud(out, level, cols)?;
    draw_controls_hint(out, rows)?;

    // Leave the cursor on the hint row
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn glyph(visual: &Visual) -> (char, Color) {
    match *visual {
        Visual::Platform(c) => ('█', rgb(c)),
        Visual::Spike => ('▲', rgb(RED)),
        Visual::Coin => ('o', rgb(YELLOW)),
        Visual::Crystal => ('◆', rgb(PURPLE)),
        Visual::Enemy { attacking: false } => ('▓', rgb(RED)),
        Visual::Enemy { attacking: true } => ('W', rgb(ORANGE)),
        Visual::Checkpoint { activated: true } => ('⚑', rgb(CYAN)),
        Visual::Checkpoint { activated: false } => ('⚐', rgb(GRAY)),
        Visual::Goal => ('★', rgb(YELLOW)),
        Visual::Player { facing: Facing::Left } => ('◀', rgb(YELLOW)),
        Visual::Player { facing: Facing::Right } => ('▶', rgb(YELLOW)),
        // Fade: dense while fresh, a dot once half gone
        Visual::Particle { color, alpha } if alpha >= 0.5 => ('*', rgb(color)),
        Visual::Particle { color, .. } => ('·', rgb(color)),
    }
}

fn draw_sprite<W: Write>(out: &mut W, view: &Viewport, sprite: &Sprite) -> std::io::Result<()> {
    let Some((c0, c1, r0, r1)) = view.cells(sprite) else {
        return Ok(());
    };
    let (ch, color) = glyph(&sprite.visual);
    let run: String = std::iter::repeat(ch).take((c1 - c0 + 1) as usize).collect();

    out.queue(style::SetForegroundColor(color))?;
    for row in r0..=r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&run))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, level: &Level, cols: u16) -> std::io::Result<()> {
    let hud = scene::hud(level);

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(rgb(WHITE)))?;
    out.queue(Print(format!("Level {} · {}  ", hud.level, hud.theme)))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(format!("Health:{:>4}  ", hud.health)))?;
    out.queue(style::SetForegroundColor(C_HUD_COINS))?;
    out.queue(Print(format!("Coins:{:>3}  ", hud.coins)))?;
    out.queue(style::SetForegroundColor(C_HUD_CRYSTALS))?;
    out.queue(Print(format!("Crystals:{:>3}  ", hud.crystals)))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", hud.score)))?;

    // Progress, right-aligned
    let progress = format!("Progress: {}%", hud.progress);
    let rx = cols.saturating_sub(progress.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_PROGRESS))?;
    out.queue(Print(&progress))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   W / ↑ / SPACE : Jump   X : Attack   Q : Quit",
    ))?;
    Ok(())
}

// ── Level-complete overlay ────────────────────────────────────────────────────

pub fn draw_level_complete<W: Write>(
    out: &mut W,
    stats: &LevelStats,
    last_level: bool,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    out.queue(style::ResetColor)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let title = format!("★  LEVEL {} COMPLETE  ★", stats.number);
    let totals = format!(
        "Crystals: +{}   Coins: +{}   Score: {}",
        stats.crystals, stats.coins, stats.score
    );
    let record = format!("Enemies defeated: {}   Deaths: {}", stats.kills, stats.deaths);
    let hint = if last_level {
        "ENTER - Finish   R - Replay   M - Menu"
    } else {
        "ENTER - Next Level   R - Replay   M - Menu"
    };

    let lines: [(&str, Color); 4] = [
        (&title, Color::Yellow),
        (&totals, Color::Magenta),
        (&record, Color::Grey),
        (hint, Color::White),
    ];

    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub(lines.len() as u16);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + 2 * i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Victory screen ────────────────────────────────────────────────────────────

pub fn draw_victory<W: Write>(out: &mut W, progress: &Progress) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    out.queue(style::ResetColor)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let totals = format!(
        "Total Crystals: {}   Total Coins: {}",
        progress.crystals, progress.coins
    );
    let lines: [(&str, Color); 5] = [
        ("╔════════════════════╗", Color::Yellow),
        ("║     YOU  WIN!      ║", Color::Yellow),
        ("╚════════════════════╝", Color::Yellow),
        (&totals, Color::Magenta),
        ("Press any key", Color::White),
    ];

    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}
