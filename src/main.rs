mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use log::{debug, info, warn};
use rand::thread_rng;

use quest_madness::config::GameConfig;
use quest_madness::entities::{Cue, Input, Level};
use quest_madness::levels::{init_level, LEVEL_COUNT};
use quest_madness::runner::{self, Frontend, LevelResult, LevelStats};
use quest_madness::save::Progress;

/// Frames a key stays held after its last press or repeat event.  Terminals
/// without release events repeat at 15 Hz or faster, which at 60 FPS leaves
/// gaps of about 4 frames; 8 bridges them.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Files ─────────────────────────────────────────────────────────────────────

fn home_file(name: &str) -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(name)
}

fn save_path() -> PathBuf {
    home_file(".quest_madness_save.json")
}

fn load_config() -> anyhow::Result<GameConfig> {
    match std::env::var_os("QUEST_MADNESS_CONFIG") {
        Some(path) => {
            let path = PathBuf::from(path);
            GameConfig::load(&path)
                .with_context(|| format!("loading config from {}", path.display()))
        }
        None => Ok(GameConfig::default()),
    }
}

fn save_progress(progress: &Progress) {
    let path = save_path();
    match progress.save(&path) {
        Ok(()) => info!("Progress saved to {}", path.display()),
        Err(e) => warn!("Could not save progress: {e}"),
    }
}

/// The screen belongs to the game, so logs go to a file.
fn init_logging() {
    let Ok(file) = File::create(home_file(".quest_madness.log")) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

// ── Terminal frontend ─────────────────────────────────────────────────────────

/// Crossterm-backed `Frontend`.  `key_frame` remembers the frame each key was
/// last pressed or repeated on, and `poll_input` turns the keys still inside
/// `HOLD_WINDOW` into an `Input`, so running while jumping works.  A `Release`
/// event (kitty-protocol terminals) drops the key at once.
struct TerminalFrontend<'a, W: Write> {
    out: &'a mut W,
    rx: &'a mpsc::Receiver<Event>,
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

impl<'a, W: Write> TerminalFrontend<'a, W> {
    fn new(out: &'a mut W, rx: &'a mpsc::Receiver<Event>) -> Self {
        Self {
            out,
            rx,
            key_frame: HashMap::new(),
            frame: 0,
        }
    }
}

impl<W: Write> Frontend for TerminalFrontend<'_, W> {
    fn poll_input(&mut self) -> std::io::Result<Input> {
        self.frame += 1;
        let frame = self.frame;
        let mut quit = false;

        while let Ok(ev) = self.rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    self.key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => quit = true,
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            quit = true
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    self.key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    self.key_frame.remove(&code);
                }
            }
        }

        let held = |keys: &[KeyCode]| any_held(&self.key_frame, keys, frame);
        Ok(Input {
            left: held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
            jump: held(&[
                KeyCode::Up,
                KeyCode::Char('w'),
                KeyCode::Char('W'),
                KeyCode::Char(' '),
            ]),
            attack: held(&[KeyCode::Char('x'), KeyCode::Char('X')]),
            quit,
        })
    }

    fn present(&mut self, level: &Level) -> std::io::Result<()> {
        display::render(&mut *self.out, level)
    }

    /// The terminal bell stands in for sound effects.
    fn play(&mut self, cue: Cue) {
        debug!("cue {cue:?}");
        if matches!(cue, Cue::Crystal | Cue::EnemyKill) {
            let _ = self.out.queue(Print('\x07'));
        }
    }
}

/// Blocking read from the input thread.
fn next_event(rx: &mpsc::Receiver<Event>) -> std::io::Result<Event> {
    rx.recv()
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::BrokenPipe, "input thread stopped"))
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(u32),
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    progress: &Progress,
) -> std::io::Result<MenuResult> {
    out.queue(style::ResetColor)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  QUEST  MADNESS  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(title))?;

    let totals = format!(
        "Total Crystals: {}   Total Coins: {}",
        progress.crystals, progress.coins
    );
    out.queue(cursor::MoveTo(
        cx.saturating_sub(totals.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::Magenta))?;
    out.queue(Print(&totals))?;

    let resume = progress.highest_level.clamp(1, LEVEL_COUNT);
    let options: [(&str, String, Color); 4] = [
        ("C", format!("Continue: Level {}", resume), Color::White),
        ("1", "Grass Fields".to_string(), Color::Green),
        ("2", "Desert Wastes".to_string(), Color::Yellow),
        ("3", "Crystal Chamber".to_string(), Color::Blue),
    ];
    for (i, (key, label, color)) in options.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(12), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(label))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 4))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) = next_event(rx)? else {
            continue;
        };
        match code {
            KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Enter => {
                return Ok(MenuResult::Start(resume))
            }
            KeyCode::Char(d @ '1'..='3') => {
                return Ok(MenuResult::Start(d as u32 - '0' as u32));
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Ok(MenuResult::Quit);
            }
            _ => {}
        }
    }
}

enum CompleteChoice {
    Next,
    Replay,
    Menu,
}

fn show_level_complete<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    stats: &LevelStats,
) -> std::io::Result<CompleteChoice> {
    display::draw_level_complete(out, stats, stats.number >= LEVEL_COUNT)?;

    // Drop keys still buffered from play
    while rx.try_recv().is_ok() {}

    loop {
        let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) = next_event(rx)? else {
            continue;
        };
        match code {
            KeyCode::Enter => return Ok(CompleteChoice::Next),
            KeyCode::Char('r') | KeyCode::Char('R') => return Ok(CompleteChoice::Replay),
            KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => {
                return Ok(CompleteChoice::Menu)
            }
            _ => {}
        }
    }
}

// ── Campaign ──────────────────────────────────────────────────────────────────

/// Play levels from `start` onward.  Quitting a level returns to the menu.
fn campaign<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    progress: &mut Progress,
    start: u32,
) -> anyhow::Result<()> {
    let mut rng = thread_rng();
    let mut number = start;

    while number <= LEVEL_COUNT {
        let mut level = init_level(number, config)?;
        progress.outfit(&mut level.player);

        let mut frontend = TerminalFrontend::new(out, rx);
        let stats = match runner::run(level, &mut frontend, &mut rng)? {
            LevelResult::Quit => return Ok(()),
            LevelResult::Completed(stats) => stats,
        };

        progress.record(&stats);
        save_progress(progress);

        match show_level_complete(out, rx, &stats)? {
            CompleteChoice::Next => number += 1,
            CompleteChoice::Replay => {}
            CompleteChoice::Menu => return Ok(()),
        }
    }

    info!("Campaign finished");
    display::draw_victory(out, progress)?;
    while !matches!(
        next_event(rx)?,
        Event::Key(KeyEvent { kind: KeyEventKind::Press, .. })
    ) {}
    Ok(())
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> anyhow::Result<()> {
    let config = load_config()?;
    let mut progress = Progress::load_or_default(&save_path());

    loop {
        match show_menu(out, rx, &progress)? {
            MenuResult::Quit => break,
            MenuResult::Start(level) => campaign(out, rx, &config, &mut progress, level)?,
        }
    }

    save_progress(&progress);
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_logging();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events make running and jumping stop the moment a key is let go.
    // Terminals without the kitty protocol ignore the request.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread; frames drain the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &rx);

    // Restore the terminal even when the game failed
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(style::ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
