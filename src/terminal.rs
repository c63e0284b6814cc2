// Copyright (c) 2026 glyphfall contributors

use std::io::{stdout, Result, Stdout, Write};

use crossterm::{
    cursor, event,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::frame::Frame;
use crate::palette::Palette;

struct LastFrame {
    cols: u16,
    rows: u16,
    cells: Vec<(char, Option<Color>)>,
}

impl LastFrame {
    fn new(cols: u16, rows: u16) -> Self {
        let len = cols as usize * rows as usize;
        Self {
            cols,
            rows,
            cells: vec![(' ', None); len],
        }
    }
}

pub struct Terminal {
    stdout: Stdout,
    last: Option<LastFrame>,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            let _ = out.execute(ResetColor);
            let _ = out.execute(cursor::Show);
            let _ = out.execute(terminal::EnableLineWrap);
            let _ = out.execute(terminal::LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
            let _ = out.flush();
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            last: None,
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: std::time::Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    fn resolve(frame: &Frame, palette: &Palette, idx: usize) -> (char, Option<Color>) {
        let g = frame.cell_at_index(idx);
        if g.ch == ' ' {
            (' ', None)
        } else {
            (g.ch, palette.color_for(g.level))
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, palette: &Palette) -> Result<()> {
        let mut cur_fg: Option<Color> = None;
        let mut cur_bg: Option<Color> = None;
        let mut cur_pos: Option<(u16, u16)> = None;

        let dims_changed = self
            .last
            .as_ref()
            .map(|l| l.cols != frame.cols || l.rows != frame.rows)
            .unwrap_or(true);

        let total = frame.cols as usize * frame.rows as usize;
        let dirty_is_large = total > 0 && frame.dirty_indices().len() >= total / 3;
        let full_redraw = dims_changed || frame.is_dirty_all() || dirty_is_large;

        if full_redraw {
            if dims_changed {
                self.stdout
                    .queue(terminal::Clear(terminal::ClearType::All))?;
                self.last = Some(LastFrame::new(frame.cols, frame.rows));
            }
            let last = self
                .last
                .get_or_insert_with(|| LastFrame::new(frame.cols, frame.rows));

            for y in 0..frame.rows {
                self.stdout.queue(cursor::MoveTo(0, y))?;
                for x in 0..frame.cols {
                    let idx = y as usize * frame.cols as usize + x as usize;
                    let (ch, fg) = Self::resolve(frame, palette, idx);

                    if fg != cur_fg {
                        self.stdout
                            .queue(SetForegroundColor(fg.unwrap_or(Color::Reset)))?;
                        cur_fg = fg;
                    }
                    if palette.bg != cur_bg {
                        self.stdout
                            .queue(SetBackgroundColor(palette.bg.unwrap_or(Color::Reset)))?;
                        cur_bg = palette.bg;
                    }

                    self.stdout.queue(Print(ch))?;
                    last.cells[idx] = (ch, fg);
                }
            }

            self.stdout.queue(ResetColor)?;
            self.stdout.flush()?;
            frame.clear_dirty();
            return Ok(());
        }

        let last = self.last.as_mut().expect("checked above");
        let cols = frame.cols as usize;

        let mut dirty: Vec<usize> = frame.dirty_indices().to_vec();
        dirty.sort_unstable();

        for idx in dirty {
            let (ch, fg) = Self::resolve(frame, palette, idx);
            if last.cells.get(idx).copied() == Some((ch, fg)) {
                continue;
            }
            last.cells[idx] = (ch, fg);

            let x = (idx % cols) as u16;
            let y = (idx / cols) as u16;
            if y >= frame.rows {
                continue;
            }

            if cur_pos != Some((x, y)) {
                self.stdout.queue(cursor::MoveTo(x, y))?;
            }
            if fg != cur_fg {
                self.stdout
                    .queue(SetForegroundColor(fg.unwrap_or(Color::Reset)))?;
                cur_fg = fg;
            }
            if palette.bg != cur_bg {
                self.stdout
                    .queue(SetBackgroundColor(palette.bg.unwrap_or(Color::Reset)))?;
                cur_bg = palette.bg;
            }

            self.stdout.queue(Print(ch))?;
            let next_x = x.saturating_add(1);
            cur_pos = if next_x < frame.cols {
                Some((next_x, y))
            } else {
                None
            };
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        frame.clear_dirty();
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.stdout.execute(ResetColor);
        let _ = self.stdout.execute(cursor::Show);
        let _ = self.stdout.execute(terminal::EnableLineWrap);
        let _ = self.stdout.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = self.stdout.flush();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
