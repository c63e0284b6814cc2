// Copyright (c) 2026 glyphfall contributors

/// One cell of the drawing surface: the glyph it shows and how far its trail
/// has faded. Level 0 is unlit; higher levels map to brighter ramp colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub level: u8,
}

impl Glyph {
    pub const UNLIT: Glyph = Glyph { ch: ' ', level: 0 };
}

#[derive(Clone, Debug)]
pub struct Frame {
    pub cols: u16,
    pub rows: u16,
    cells: Vec<Glyph>,
    dirty_all: bool,
    dirty_map: Vec<bool>,
    dirty: Vec<usize>,
}

impl Frame {
    pub fn new(cols: u16, rows: u16) -> Self {
        let len = cols as usize * rows as usize;
        Self {
            cols,
            rows,
            cells: vec![Glyph::UNLIT; len],
            dirty_all: true,
            dirty_map: vec![false; len],
            dirty: Vec::new(),
        }
    }

    pub fn is_dirty_all(&self) -> bool {
        self.dirty_all
    }

    pub fn dirty_indices(&self) -> &[usize] {
        &self.dirty
    }

    pub fn clear_dirty(&mut self) {
        if self.dirty_all {
            self.dirty_all = false;
            self.dirty_map.fill(false);
            self.dirty.clear();
            return;
        }
        for &i in &self.dirty {
            self.dirty_map[i] = false;
        }
        self.dirty.clear();
    }

    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        Some(y as usize * self.cols as usize + x as usize)
    }

    #[allow(dead_code)]
    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn cell_at_index(&self, i: usize) -> Glyph {
        self.cells.get(i).copied().unwrap_or(Glyph::UNLIT)
    }

    fn mark_dirty(&mut self, i: usize) {
        if !self.dirty_all && !self.dirty_map[i] {
            self.dirty_map[i] = true;
            self.dirty.push(i);
        }
    }

    /// Place a glyph. Out-of-range coordinates are silently clipped; writing
    /// an identical glyph leaves the dirty set untouched.
    pub fn put(&mut self, x: u16, y: u16, ch: char, level: u8) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let next = Glyph { ch, level };
        if self.cells[i] == next {
            return;
        }
        self.cells[i] = next;
        self.mark_dirty(i);
    }

    /// One trail-decay step over the whole surface: every lit cell loses one
    /// fade level, and cells reaching zero go blank.
    pub fn fade(&mut self) {
        for i in 0..self.cells.len() {
            let g = self.cells[i];
            if g.level == 0 {
                continue;
            }
            let level = g.level - 1;
            self.cells[i] = if level == 0 {
                Glyph::UNLIT
            } else {
                Glyph { ch: g.ch, level }
            };
            self.mark_dirty(i);
        }
    }

    /// Blank every cell and schedule a full repaint.
    pub fn clear(&mut self) {
        self.cells.fill(Glyph::UNLIT);
        self.dirty_all = true;
        self.dirty.clear();
        self.dirty_map.fill(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_sets_cell_and_marks_dirty() {
        let mut f = Frame::new(4, 3);
        f.clear_dirty();
        f.put(1, 2, 'x', 5);
        assert_eq!(f.get(1, 2), Some(Glyph { ch: 'x', level: 5 }));
        assert_eq!(f.dirty_indices(), &[2 * 4 + 1]);
    }

    #[test]
    fn put_out_of_range_is_a_noop() {
        let mut f = Frame::new(4, 3);
        f.clear_dirty();
        f.put(4, 0, 'x', 5);
        f.put(0, 3, 'x', 5);
        assert!(f.dirty_indices().is_empty());
    }

    #[test]
    fn identical_put_stays_clean() {
        let mut f = Frame::new(2, 2);
        f.put(0, 0, 'a', 3);
        f.clear_dirty();
        f.put(0, 0, 'a', 3);
        assert!(f.dirty_indices().is_empty());
    }

    #[test]
    fn fade_decays_to_blank() {
        let mut f = Frame::new(2, 1);
        f.put(0, 0, 'z', 2);
        f.fade();
        assert_eq!(f.get(0, 0), Some(Glyph { ch: 'z', level: 1 }));
        f.fade();
        assert_eq!(f.get(0, 0), Some(Glyph::UNLIT));
        f.fade();
        assert_eq!(f.get(0, 0), Some(Glyph::UNLIT));
    }

    #[test]
    fn clear_blanks_and_requests_full_repaint() {
        let mut f = Frame::new(3, 3);
        f.clear_dirty();
        f.put(1, 1, 'q', 9);
        f.clear();
        assert!(f.is_dirty_all());
        assert_eq!(f.get(1, 1), Some(Glyph::UNLIT));
    }
}
