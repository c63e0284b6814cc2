// Copyright (c) 2026 glyphfall contributors

use std::io::IsTerminal;

use clap::Parser;

pub const DEFAULT_PARAMS_USAGE: &str = "DEFAULT PARAMS USAGE:\n  glyphfall --tick 50 --cell 20 --fade 20 --reset-chance 2.5 --color green --charset printable --opacity 100 --color-bg black --message-interval 3000";

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBg {
    #[value(name = "black")]
    Black,
    #[value(name = "terminal")]
    Terminal,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "glyphfall", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        long = "duration",
        help_heading = "GENERAL",
        help = "Stop after N seconds (min 0.1 max 86400; <=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        short = 's',
        long = "screensaver",
        help_heading = "GENERAL",
        help = "Screensaver mode (exit on keypress)"
    )]
    pub screensaver: bool,

    #[arg(
        long = "seed",
        help_heading = "GENERAL",
        help = "Seed the random source for a reproducible session"
    )]
    pub seed: Option<u64>,

    #[arg(
        short = 'm',
        long = "message",
        help_heading = "GENERAL",
        help = "Overlay status box; '|' separates rotating segments"
    )]
    pub message: Option<String>,

    #[arg(
        long = "message-interval",
        default_value_t = 3000,
        help_heading = "GENERAL",
        help = "Rotation interval for message segments in ms (min 100 max 60000)"
    )]
    pub message_interval: u16,

    #[arg(
        long = "message-no-border",
        help_heading = "GENERAL",
        help = "Draw the message box without border characters"
    )]
    pub message_no_border: bool,

    #[arg(
        short = 'c',
        long = "color",
        default_value = "green",
        help_heading = "APPEARANCE",
        help = "Color scheme (see --list-colors)"
    )]
    pub color: String,

    #[arg(
        long = "colormode",
        help_heading = "APPEARANCE",
        help = "Force color mode (allowed: 0,8,24). Default: auto-detected from COLORTERM/TERM"
    )]
    pub colormode: Option<u16>,

    #[arg(
        long = "color-bg",
        default_value_t = ColorBg::Black,
        value_enum,
        help_heading = "APPEARANCE",
        help = "Background mode (black, terminal)"
    )]
    pub color_bg: ColorBg,

    #[arg(
        short = 'o',
        long = "opacity",
        default_value_t = 100.0,
        help_heading = "APPEARANCE",
        help = "Brightness of the glyph field in percent (min 1 max 100)"
    )]
    pub opacity: f32,

    #[arg(
        long = "cell",
        default_value_t = 20,
        help_heading = "EFFECT",
        help = "Cell size in surface pixels (min 1 max 200)"
    )]
    pub cell: u16,

    #[arg(
        short = 't',
        long = "tick",
        default_value_t = 50,
        help_heading = "EFFECT",
        help = "Draw tick interval in ms (min 5 max 1000)"
    )]
    pub tick: u16,

    #[arg(
        short = 'f',
        long = "fade",
        default_value_t = 20,
        help_heading = "EFFECT",
        help = "Trail length in fade steps (min 2 max 50)"
    )]
    pub fade: u8,

    #[arg(
        short = 'r',
        long = "reset-chance",
        default_value_t = 2.5,
        help_heading = "EFFECT",
        help = "Chance in percent that a past-bottom column restarts per tick (min 0 max 100)"
    )]
    pub reset_chance: f32,

    #[arg(
        long = "charset",
        default_value = "printable",
        help_heading = "CHARSET",
        help = "Glyph pool preset (see --list-charsets)"
    )]
    pub charset: String,

    #[arg(
        long = "chars",
        help_heading = "CHARSET",
        help = "Custom glyph pool, given as a literal string"
    )]
    pub chars: Option<String>,

    #[arg(
        long = "list-charsets",
        help_heading = "HELP",
        help = "List available charset presets and exit"
    )]
    pub list_charsets: bool,

    #[arg(
        long = "list-colors",
        help_heading = "HELP",
        help = "List available color schemes and exit"
    )]
    pub list_colors: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

pub fn print_list_charsets() {
    if color_enabled_stdout() {
        println!("\x1b[1;36mAVAILABLE CHARSET PRESETS:\x1b[0m");
    } else {
        println!("AVAILABLE CHARSET PRESETS:");
    }
    println!();
    println!("VALUE        DESCRIPTION");
    println!("printable    Printable 7-bit range (alias: ascii)");
    println!("binary       0 and 1 (aliases: bin, 01)");
    println!("hex          0-9 and A-F (alias: hexadecimal)");
    println!("digits       Digits only (aliases: dec, decimal)");
    println!("letters      Letters only (alias: english)");
    println!("katakana     Katakana");
    println!("matrix       Letters + digits + katakana");
    println!("symbols      Math/technical symbols");
    println!("blocks       Block elements (shading blocks)");
}

pub fn print_list_colors() {
    if color_enabled_stdout() {
        println!("\x1b[1;36mAVAILABLE COLOR SCHEMES:\x1b[0m");
    } else {
        println!("AVAILABLE COLOR SCHEMES:");
    }
    println!();
    println!("VALUE        DESCRIPTION");
    println!("green        Phosphor green (default; head matches #00ff88)");
    println!("cyan         Cold cyan");
    println!("purple       Violet");
    println!("amber        Amber terminal");
    println!("red          Crimson");
    println!("blue         Cobalt");
    println!("gray         Grayscale (alias: grey)");
    println!("aurora       Green into violet");
}
