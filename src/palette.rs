// Copyright (c) 2026 glyphfall contributors

use crossterm::style::Color;

use crate::runtime::{ColorMode, ColorScheme};

/// Fade-level color ramp. Index 0 is the dimmest trail step, the last entry
/// is the freshly drawn head.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<Color>,
    pub bg: Option<Color>,
}

impl Palette {
    /// Color for a frame fade level. Level 0 is unlit.
    pub fn color_for(&self, level: u8) -> Option<Color> {
        if level == 0 {
            return None;
        }
        let idx = (level as usize - 1).min(self.colors.len().saturating_sub(1));
        self.colors.get(idx).copied()
    }

    #[allow(dead_code)]
    pub fn head(&self) -> Option<Color> {
        self.colors.last().copied()
    }

    #[allow(dead_code)]
    pub fn depth(&self) -> usize {
        self.colors.len()
    }
}

fn dist2(r0: u8, g0: u8, b0: u8, r1: u8, g1: u8, b1: u8) -> i32 {
    let dr = (r0 as i32) - (r1 as i32);
    let dg = (g0 as i32) - (g1 as i32);
    let db = (b0 as i32) - (b1 as i32);
    (dr * dr) + (dg * dg) + (db * db)
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    let r6 = ((r as u16 * 5) + 127) / 255;
    let g6 = ((g as u16 * 5) + 127) / 255;
    let b6 = ((b as u16 * 5) + 127) / 255;

    let cube_idx = 16 + (36 * r6 as u8) + (6 * g6 as u8) + (b6 as u8);
    let cube_dist = dist2(
        r,
        g,
        b,
        CUBE_LEVELS[r6 as usize],
        CUBE_LEVELS[g6 as usize],
        CUBE_LEVELS[b6 as usize],
    );

    let avg = ((r as u16 + g as u16 + b as u16) / 3) as u8;
    let gray_idx = if avg < 8 {
        16
    } else if avg > 238 {
        231
    } else {
        232 + ((avg - 8) / 10)
    };
    let gv = match gray_idx {
        16 => 0,
        231 => 255,
        i => 8 + 10 * (i - 232),
    };
    let gray_dist = dist2(r, g, b, gv, gv, gv);

    if gray_dist < cube_dist {
        gray_idx
    } else {
        cube_idx
    }
}

fn rgb_to_color16(r: u8, g: u8, b: u8) -> Color {
    const TABLE: [(Color, (u8, u8, u8)); 16] = [
        (Color::Black, (0, 0, 0)),
        (Color::DarkGrey, (128, 128, 128)),
        (Color::Grey, (192, 192, 192)),
        (Color::White, (255, 255, 255)),
        (Color::DarkRed, (128, 0, 0)),
        (Color::Red, (255, 0, 0)),
        (Color::DarkGreen, (0, 128, 0)),
        (Color::Green, (0, 255, 0)),
        (Color::DarkBlue, (0, 0, 128)),
        (Color::Blue, (0, 0, 255)),
        (Color::DarkCyan, (0, 128, 128)),
        (Color::Cyan, (0, 255, 255)),
        (Color::DarkMagenta, (128, 0, 128)),
        (Color::Magenta, (255, 0, 255)),
        (Color::DarkYellow, (128, 128, 0)),
        (Color::Yellow, (255, 255, 0)),
    ];

    let mut best = Color::White;
    let mut best_d = i32::MAX;
    for (c, (cr, cg, cb)) in TABLE {
        let d = dist2(r, g, b, cr, cg, cb);
        if d < best_d {
            best_d = d;
            best = c;
        }
    }
    best
}

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let a = a as f32;
    let b = b as f32;
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}

fn gradient_from_stops(stops: &[(u8, u8, u8)], steps: usize) -> Vec<(u8, u8, u8)> {
    if steps == 0 || stops.is_empty() {
        return Vec::new();
    }
    if stops.len() == 1 || steps == 1 {
        return vec![stops[stops.len() - 1]; steps];
    }

    let segs = stops.len() - 1;
    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        let t = (i as f32) / ((steps - 1) as f32);
        let pos = t * (segs as f32);
        let seg = (pos.floor() as usize).min(segs - 1);
        let lt = pos - (seg as f32);
        let (r0, g0, b0) = stops[seg];
        let (r1, g1, b1) = stops[seg + 1];
        out.push((
            lerp_u8(r0, r1, lt),
            lerp_u8(g0, g1, lt),
            lerp_u8(b0, b1, lt),
        ));
    }
    out
}

fn scheme_stops(scheme: ColorScheme) -> &'static [(u8, u8, u8)] {
    match scheme {
        // Head color matches the original effect's #00ff88.
        ColorScheme::Green => &[(0, 24, 10), (0, 110, 52), (0, 255, 136), (205, 255, 228)],
        ColorScheme::Cyan => &[(0, 18, 24), (0, 96, 128), (0, 210, 255), (215, 250, 255)],
        ColorScheme::Purple => &[(18, 0, 30), (90, 20, 140), (190, 90, 255), (240, 220, 255)],
        ColorScheme::Amber => &[(28, 14, 0), (140, 80, 0), (255, 180, 20), (255, 245, 215)],
        ColorScheme::Red => &[(26, 0, 0), (130, 10, 10), (255, 60, 40), (255, 225, 215)],
        ColorScheme::Blue => &[(0, 4, 28), (10, 50, 150), (70, 140, 255), (220, 235, 255)],
        ColorScheme::Gray => &[(22, 22, 22), (90, 90, 90), (180, 180, 180), (250, 250, 250)],
        ColorScheme::Aurora => &[(0, 20, 16), (0, 120, 90), (60, 230, 180), (200, 160, 255)],
    }
}

pub fn build_palette(
    scheme: ColorScheme,
    mode: ColorMode,
    steps: usize,
    opacity: f32,
    default_background: bool,
) -> Palette {
    let bg = if default_background {
        None
    } else {
        Some(match mode {
            ColorMode::Color16 => Color::Black,
            ColorMode::TrueColor => Color::Rgb { r: 0, g: 0, b: 0 },
            _ => Color::AnsiValue(16),
        })
    };

    if matches!(mode, ColorMode::Mono) {
        return Palette {
            colors: vec![Color::White],
            bg,
        };
    }

    let dim = opacity.clamp(0.0, 1.0);
    let stops: Vec<(u8, u8, u8)> = scheme_stops(scheme)
        .iter()
        .map(|&(r, g, b)| {
            (
                (r as f32 * dim).round() as u8,
                (g as f32 * dim).round() as u8,
                (b as f32 * dim).round() as u8,
            )
        })
        .collect();

    let ramp = gradient_from_stops(&stops, steps.max(1));
    let colors = match mode {
        ColorMode::TrueColor => ramp
            .into_iter()
            .map(|(r, g, b)| Color::Rgb { r, g, b })
            .collect(),
        ColorMode::Color256 => ramp
            .into_iter()
            .map(|(r, g, b)| Color::AnsiValue(rgb_to_ansi256(r, g, b)))
            .collect(),
        _ => ramp
            .into_iter()
            .map(|(r, g, b)| rgb_to_color16(r, g, b))
            .collect(),
    };

    Palette { colors, bg }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_has_one_color_per_fade_level() {
        let p = build_palette(ColorScheme::Green, ColorMode::TrueColor, 20, 1.0, false);
        assert_eq!(p.depth(), 20);
        assert!(p.color_for(0).is_none());
        assert_eq!(p.color_for(20), p.head());
    }

    #[test]
    fn levels_past_depth_clamp_to_head() {
        let p = build_palette(ColorScheme::Cyan, ColorMode::Color256, 8, 1.0, false);
        assert_eq!(p.color_for(8), p.color_for(200));
    }

    #[test]
    fn mono_collapses_to_white() {
        let p = build_palette(ColorScheme::Green, ColorMode::Mono, 20, 1.0, false);
        assert_eq!(p.color_for(1), Some(Color::White));
        assert_eq!(p.color_for(20), Some(Color::White));
    }

    #[test]
    fn opacity_scales_toward_black() {
        let full = build_palette(ColorScheme::Gray, ColorMode::TrueColor, 4, 1.0, false);
        let dim = build_palette(ColorScheme::Gray, ColorMode::TrueColor, 4, 0.5, false);
        let (Some(Color::Rgb { r: rf, .. }), Some(Color::Rgb { r: rd, .. })) =
            (full.head(), dim.head())
        else {
            panic!("truecolor palette expected");
        };
        assert!(rd < rf);
    }

    #[test]
    fn default_background_clears_bg() {
        let p = build_palette(ColorScheme::Green, ColorMode::TrueColor, 4, 1.0, true);
        assert!(p.bg.is_none());
    }
}
