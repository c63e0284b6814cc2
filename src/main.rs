// Copyright (c) 2026 glyphfall contributors

mod charset;
mod config;
mod entropy;
mod frame;
mod overlay;
mod palette;
mod rain;
mod runtime;
mod terminal;

use std::env;
use std::time::{Duration, Instant};

#[cfg(unix)]
use std::thread;

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use crossterm::event::{Event, KeyCode, KeyEventKind};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::charset::{build_glyphs, charset_from_str, parse_user_chars};
use crate::config::{
    color_enabled_stdout, print_list_charsets, print_list_colors, Args, ColorBg,
    DEFAULT_PARAMS_USAGE,
};
use crate::entropy::StdEntropy;
use crate::frame::Frame;
use crate::overlay::Overlay;
use crate::palette::build_palette;
use crate::rain::Rain;
use crate::runtime::{ColorMode, ColorScheme};
use crate::terminal::{restore_terminal_best_effort, Terminal};

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

fn build_info() -> &'static str {
    env!("GLYPHFALL_BUILD")
}

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn require_f64_range(name: &str, v: f64, min: f64, max: f64) -> f64 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_f32_range(name: &str, v: f32, min: f32, max: f32) -> f32 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_u8_range(name: &str, v: u8, min: u8, max: u8) -> u8 {
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_u16_range(name: &str, v: u16, min: u16, max: u16) -> u16 {
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn detect_color_mode_auto() -> ColorMode {
    let colorterm = env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorMode::TrueColor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term == "dumb" {
        return ColorMode::Mono;
    }
    if term.contains("256color") {
        return ColorMode::Color256;
    }

    ColorMode::Color256
}

fn detect_color_mode(args: &Args) -> ColorMode {
    if let Some(m) = args.colormode {
        return match m {
            0 => ColorMode::Mono,
            8 => ColorMode::Color256,
            24 => ColorMode::TrueColor,
            _ => {
                eprintln!("invalid --colormode: {} (allowed: 0,8,24)", m);
                std::process::exit(1);
            }
        };
    }

    detect_color_mode_auto()
}

fn parse_color_scheme(s: &str) -> Result<ColorScheme, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "green" => Ok(ColorScheme::Green),
        "cyan" => Ok(ColorScheme::Cyan),
        "purple" => Ok(ColorScheme::Purple),
        "amber" => Ok(ColorScheme::Amber),
        "red" => Ok(ColorScheme::Red),
        "blue" => Ok(ColorScheme::Blue),
        "gray" | "grey" => Ok(ColorScheme::Gray),
        "aurora" => Ok(ColorScheme::Aurora),
        _ => Err(format!("invalid color: {} (see --list-colors)", s)),
    }
}

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let mut cmd = Args::command();
    cmd = cmd.styles(clap_styles());
    cmd = cmd.before_help(DEFAULT_PARAMS_USAGE);
    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    cmd = cmd.help_template(help_template);
    cmd.build();

    let matches = cmd.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if args.list_charsets {
        print_list_charsets();
        return Ok(());
    }

    if args.list_colors {
        print_list_colors();
        return Ok(());
    }

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {}", build_info());
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        println!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
        return Ok(());
    }

    let cell = require_u16_range("--cell", args.cell, 1, 200) as u32;
    let tick_ms = require_u16_range("--tick", args.tick, 5, 1000);
    let fade = require_u8_range("--fade", args.fade, 2, 50);
    let reset_chance = require_f32_range("--reset-chance", args.reset_chance, 0.0, 100.0);
    let opacity = require_f32_range("--opacity", args.opacity, 1.0, 100.0);
    let message_interval =
        require_u16_range("--message-interval", args.message_interval, 100, 60000);
    let duration_s = args.duration.map(|s| {
        if !s.is_finite() {
            eprintln!("failed to apply --duration {} (must be a finite number)", s);
            std::process::exit(1);
        }
        if s > 0.0 {
            return require_f64_range("--duration", s, 0.1, 86400.0);
        }
        s
    });

    let color_mode = detect_color_mode(&args);
    let color_scheme = match parse_color_scheme(&args.color) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let glyphs = match &args.chars {
        Some(spec) => match parse_user_chars(spec) {
            Ok(list) => list,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => match charset_from_str(&args.charset) {
            Ok(cs) => build_glyphs(cs),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
    };

    let mut entropy = match args.seed {
        Some(seed) => StdEntropy::seeded(seed),
        None => StdEntropy::from_os(),
    };

    let palette = build_palette(
        color_scheme,
        color_mode,
        fade as usize,
        opacity / 100.0,
        matches!(args.color_bg, ColorBg::Terminal),
    );

    let mut term = Terminal::new()?;
    let (cols, rows) = term.size()?;

    let mut rain = Rain::new(cols as u32 * cell, rows as u32 * cell, cell);
    rain.set_fade_levels(fade);
    rain.set_reset_chance(reset_chance);
    rain.init_glyphs(glyphs);

    let mut frame = Frame::new(cols, rows);

    let start_time = Instant::now();
    let mut overlay = args.message.as_deref().and_then(|text| {
        Overlay::new(
            text,
            Duration::from_millis(message_interval as u64),
            !args.message_no_border,
            start_time,
        )
    });
    if let Some(ov) = overlay.as_mut() {
        ov.layout(cols, rows);
    }

    let end_time = duration_s.and_then(|s| {
        if s <= 0.0 {
            return None;
        }
        Some(start_time + Duration::from_secs_f64(s))
    });

    let mut tick_period = Duration::from_millis(tick_ms as u64);
    let mut next_tick = Instant::now();

    while rain.falling {
        if end_time.is_some_and(|end| Instant::now() >= end) {
            rain.falling = false;
            break;
        }
        let mut pending_resize: Option<(u16, u16)> = None;

        loop {
            while Terminal::poll_event(Duration::from_millis(0))? {
                let ev = Terminal::read_event()?;
                match ev {
                    Event::Resize(nw, nh) => {
                        pending_resize = Some((nw, nh));
                    }
                    Event::Key(k) if k.kind == KeyEventKind::Press => {
                        if args.screensaver {
                            rain.falling = false;
                            break;
                        }

                        match k.code {
                            KeyCode::Esc | KeyCode::Char('q') => rain.falling = false,
                            KeyCode::Char(' ') => {
                                rain.restart();
                                frame.clear();
                            }
                            KeyCode::Char('p') => {
                                rain.toggle_pause();
                            }
                            KeyCode::Up => {
                                let ms = tick_period.as_millis().saturating_sub(10).max(5);
                                tick_period = Duration::from_millis(ms as u64);
                            }
                            KeyCode::Down => {
                                let ms = (tick_period.as_millis() + 10).min(1000);
                                tick_period = Duration::from_millis(ms as u64);
                            }
                            _ => {}
                        }
                    }
                    _ => {}
                }
            }

            if !rain.falling || pending_resize.is_some() {
                break;
            }

            let now = Instant::now();
            if now >= next_tick {
                break;
            }

            let mut timeout = next_tick - now;
            if let Some(end) = end_time {
                if now >= end {
                    break;
                }
                timeout = timeout.min(end - now);
            }
            let _ = Terminal::poll_event(timeout)?;
        }

        if !rain.falling {
            break;
        }

        if let Some((ncols, nrows)) = pending_resize {
            rain.resize(ncols as u32 * cell, nrows as u32 * cell);
            frame = Frame::new(ncols, nrows);
            if let Some(ov) = overlay.as_mut() {
                ov.layout(ncols, nrows);
            }
        }

        let now = Instant::now();
        if let Some(ov) = overlay.as_mut() {
            ov.advance(now);
        }

        rain.fall(&mut frame, &mut entropy);
        if let Some(ov) = overlay.as_ref() {
            ov.draw(&mut frame, fade);
        }

        if frame.is_dirty_all() || !frame.dirty_indices().is_empty() {
            term.draw(&mut frame, &palette)?;
        }

        next_tick += tick_period;
        let now = Instant::now();
        if now > next_tick {
            next_tick = now;
        }
    }

    Ok(())
}
