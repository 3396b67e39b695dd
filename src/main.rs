//! Endless Platforms entry point
//!
//! Terminal front end around the deterministic simulation: crossterm for
//! input and rendering, rodio for audio, fixed 60 Hz frame pacing. The
//! world is 1920x1080 pixels; the terminal grid just scales it down.

use std::error::Error;
use std::io::{self, Write, stdout};
use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, SetForegroundColor},
    terminal::{self, ClearType},
};

use endless_platforms::audio::{AudioManager, SoundEffect};
use endless_platforms::consts;
use endless_platforms::render::{self, Rgb, Scene};
use endless_platforms::sim::{GameEvent, GameState, TickInput, tick};
use endless_platforms::tuning::Tuning;

const USAGE: &str = "usage: endless-platforms [--seed N] [--demo] [--mute]";

/// How long a key counts as held after its last press/repeat event.
/// Terminals deliver key repeats rather than key-up, so held state has to
/// be inferred with a short expiry window.
const KEY_HOLD: Duration = Duration::from_millis(150);

struct Options {
    seed: u64,
    demo: bool,
    mute: bool,
}

fn parse_args() -> Result<Options, String> {
    // Fresh seed per run unless pinned on the command line
    let clock_seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;

    let mut options = Options {
        seed: clock_seed,
        demo: false,
        mute: false,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--seed needs a value\n{USAGE}"))?;
                options.seed = value
                    .parse()
                    .map_err(|_| format!("--seed wants an integer, got {value:?}\n{USAGE}"))?;
            }
            "--demo" => options.demo = true,
            "--mute" => options.mute = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument {other:?}\n{USAGE}")),
        }
    }
    Ok(options)
}

/// Held-key state inferred from the terminal event stream
#[derive(Default)]
struct InputTracker {
    left_until: Option<Instant>,
    right_until: Option<Instant>,
    jump_until: Option<Instant>,
    quit: bool,
}

impl InputTracker {
    fn handle(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }

        let slot = match key.code {
            KeyCode::Left | KeyCode::Char('a') => &mut self.left_until,
            KeyCode::Right | KeyCode::Char('d') => &mut self.right_until,
            KeyCode::Up | KeyCode::Char(' ') | KeyCode::Char('w') => &mut self.jump_until,
            KeyCode::Char('q') | KeyCode::Esc => {
                self.quit = true;
                return;
            }
            _ => return,
        };
        *slot = match key.kind {
            KeyEventKind::Release => None,
            _ => Some(now + KEY_HOLD),
        };
    }

    fn snapshot(&self, now: Instant, demo: bool) -> TickInput {
        let held = |until: &Option<Instant>| until.is_some_and(|t| now < t);
        TickInput {
            left: held(&self.left_until),
            right: held(&self.right_until),
            jump: held(&self.jump_until),
            idle_mode: demo,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let options = parse_args()?;
    let tuning = Tuning::load(Path::new("tuning.json"));
    log::info!(
        "Starting run: seed {}, demo {}, mute {}",
        options.seed,
        options.demo,
        options.mute
    );

    // Missing audio device is fatal unless explicitly opted out
    let audio = if options.mute {
        None
    } else {
        Some(AudioManager::new()?)
    };

    let mut state = GameState::new(options.seed, &tuning);

    let mut stdout = stdout();
    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide
    )?;

    let run_result = run(&mut state, &tuning, audio.as_ref(), options.demo);

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    run_result?;

    println!(
        "Final distance: {:.0} px (seed {})",
        state.distance, state.seed
    );
    Ok(())
}

/// The frame loop: input, tick, audio cues, draw, pace. Runs until the
/// quit signal; a finished run keeps showing its game-over overlay.
fn run(
    state: &mut GameState,
    tuning: &Tuning,
    audio: Option<&AudioManager>,
    demo: bool,
) -> io::Result<()> {
    let mut stdout = stdout();
    let frame = Duration::from_secs_f32(consts::FRAME_DT);
    let mut input = InputTracker::default();

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                input.handle(key, frame_start);
            }
        }
        if input.quit {
            return Ok(());
        }

        tick(state, &input.snapshot(frame_start, demo), tuning);

        for event in state.events.drain(..) {
            let Some(audio) = audio else { continue };
            match event {
                GameEvent::Jumped => audio.play(SoundEffect::Jump),
                GameEvent::Died => {
                    audio.play(SoundEffect::Death);
                    audio.stop_music();
                }
            }
        }

        let scene = render::build_scene(state, tuning);
        draw(&mut stdout, &scene, tuning, state.seed)?;

        if let Some(remaining) = frame.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
    }
}

fn to_color(color: Rgb) -> Color {
    Color::Rgb {
        r: color.0,
        g: color.1,
        b: color.2,
    }
}

/// Rasterize the scene onto the terminal grid
fn draw(out: &mut impl Write, scene: &Scene, tuning: &Tuning, seed: u64) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let sx = cols as f32 / tuning.screen_width;
    let sy = rows as f32 / tuning.screen_height;

    queue!(out, terminal::Clear(ClearType::All))?;

    for fill in &scene.rects {
        let x0 = ((fill.rect.left() * sx).round() as i32).clamp(0, cols as i32);
        let x1 = ((fill.rect.right() * sx).round() as i32)
            .clamp(0, cols as i32)
            .max(x0 + 1);
        let y0 = ((fill.rect.top() * sy).round() as i32).clamp(0, rows as i32);
        let y1 = ((fill.rect.bottom() * sy).round() as i32)
            .clamp(0, rows as i32)
            .max(y0 + 1);
        if x0 >= cols as i32 || y0 >= rows as i32 {
            continue;
        }

        queue!(out, SetForegroundColor(to_color(fill.color)))?;
        let row_fill = "█".repeat((x1 - x0) as usize);
        for y in y0..y1 {
            if y >= rows as i32 {
                break;
            }
            queue!(out, cursor::MoveTo(x0 as u16, y as u16), Print(&row_fill))?;
        }
    }

    queue!(
        out,
        SetForegroundColor(to_color(render::PLATFORM)),
        cursor::MoveTo(0, 0),
        Print(format!("Distance: {:>6.0}   Seed: {seed}", scene.distance))
    )?;

    if scene.game_over {
        let center_x = cols / 2;
        let center_y = rows / 2;
        queue!(
            out,
            SetForegroundColor(to_color(render::GAME_OVER)),
            cursor::MoveTo(center_x.saturating_sub(4), center_y),
            Print("GAME OVER"),
            cursor::MoveTo(center_x.saturating_sub(10), center_y + 1),
            Print(format!("Final distance: {:.0}", scene.distance)),
            cursor::MoveTo(center_x.saturating_sub(7), center_y + 2),
            Print("press q to quit"),
        )?;
    }

    out.flush()
}
