use crate::model::{Entity, MatchState, Player};
use anyhow::Context;
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Write};

/// Where a frame gets drawn.
pub(crate) trait Screen {
    fn size(&self) -> (u16, u16);
    /// Cells outside the screen are dropped.
    fn set_cell(&mut self, x: i32, y: i32, glyph: char);
    fn clear(&mut self);
    fn present(&mut self) -> anyhow::Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
    /// What `clear` resets every cell to.
    blank: Cell,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self::with_style(w, h, Color::Reset, Color::Reset)
    }

    pub(crate) fn with_style(w: u16, h: u16, fg: Color, bg: Color) -> Self {
        let blank = Cell { ch: ' ', fg, bg };
        Self {
            w,
            h,
            cells: vec![blank; (w as usize) * (h as usize)],
            blank,
        }
    }

    /// Cells that differ from `prev`, or every cell when `full` is set.
    pub(crate) fn dirty_cells<'a>(
        &'a self,
        prev: &'a CellBuffer,
        full: bool,
    ) -> impl Iterator<Item = (u16, u16, Cell)> + 'a {
        (0..self.h)
            .flat_map(move |y| (0..self.w).map(move |x| (x, y)))
            .filter_map(move |(x, y)| {
                let i = self.idx(x, y);
                let c = self.cells[i];
                (full || prev.cells.get(i) != Some(&c)).then_some((x, y, c))
            })
    }

    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }

    #[cfg(test)]
    pub(crate) fn get(&self, x: u16, y: u16) -> Option<Cell> {
        if x < self.w && y < self.h {
            Some(self.cells[self.idx(x, y)])
        } else {
            None
        }
    }

    #[cfg(test)]
    pub(crate) fn row_text(&self, y: u16) -> String {
        (0..self.w)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch)
            .collect()
    }
}

impl Screen for CellBuffer {
    fn size(&self) -> (u16, u16) {
        (self.w, self.h)
    }

    fn set_cell(&mut self, x: i32, y: i32, glyph: char) {
        if x < 0 || y < 0 || x >= self.w as i32 || y >= self.h as i32 {
            return;
        }
        let i = self.idx(x as u16, y as u16);
        self.cells[i].ch = glyph;
    }

    fn clear(&mut self) {
        self.cells.fill(self.blank);
    }

    fn present(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

const BOARD_FG: Color = Color::White;
const BOARD_BG: Color = Color::Black;

/// The real terminal, driven through crossterm. The first frame paints every
/// cell so the whole board gets the white-on-black style; after that only
/// changed cells are written.
pub(crate) struct Terminal {
    out: io::Stdout,
    prev: CellBuffer,
    cur: CellBuffer,
    full_redraw: bool,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        let (cols, rows) = terminal::size().context("could not query terminal size")?;
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            terminal::Clear(ClearType::All)
        )
        .context("could not set up terminal")?;
        if let Err(e) = terminal::enable_raw_mode() {
            let _ = execute!(out, EnableLineWrap, cursor::Show, LeaveAlternateScreen);
            return Err(e).context("could not enable raw mode");
        }

        Ok(Self {
            out,
            prev: CellBuffer::with_style(cols, rows, BOARD_FG, BOARD_BG),
            cur: CellBuffer::with_style(cols, rows, BOARD_FG, BOARD_BG),
            full_redraw: true,
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            EndSynchronizedUpdate,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Screen for Terminal {
    fn size(&self) -> (u16, u16) {
        self.cur.size()
    }

    fn set_cell(&mut self, x: i32, y: i32, glyph: char) {
        self.cur.set_cell(x, y, glyph);
    }

    fn clear(&mut self) {
        self.cur.clear();
    }

    fn present(&mut self) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;

        for (x, y, c) in self.cur.dirty_cells(&self.prev, self.full_redraw) {
            queue!(self.out, cursor::MoveTo(x, y))?;
            if last_fg != Some(c.fg) {
                queue!(self.out, SetForegroundColor(c.fg))?;
                last_fg = Some(c.fg);
            }
            if last_bg != Some(c.bg) {
                queue!(self.out, SetBackgroundColor(c.bg))?;
                last_bg = Some(c.bg);
            }
            queue!(self.out, Print(c.ch))?;
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        self.full_redraw = false;
        Ok(())
    }
}

pub(crate) fn draw_text<S: Screen>(screen: &mut S, x: i32, y: i32, s: &str) {
    for (i, ch) in s.chars().enumerate() {
        screen.set_cell(x + i as i32, y, ch);
    }
}

fn draw_entity<S: Screen>(screen: &mut S, e: &Entity) {
    for r in 0..e.height {
        for c in 0..e.width {
            screen.set_cell(e.col + c, e.row + r, e.glyph);
        }
    }
}

/// Clears, draws every entity and presents.
pub(crate) fn draw_frame<S: Screen>(screen: &mut S, st: &MatchState) -> anyhow::Result<()> {
    compose(screen, st);
    screen.present()
}

/// Last frame of a won match with the result centered on top.
pub(crate) fn draw_end_screen<S: Screen>(
    screen: &mut S,
    st: &MatchState,
    winner: Player,
) -> anyhow::Result<()> {
    compose(screen, st);
    let (w, h) = screen.size();
    let lines = ["Game Over!".to_string(), format!("{winner} wins!")];
    let top = h as i32 / 2 - 1;
    for (i, line) in lines.iter().enumerate() {
        let x = (w as i32 - line.chars().count() as i32) / 2;
        draw_text(screen, x.max(0), top + i as i32, line);
    }
    screen.present()
}

fn compose<S: Screen>(screen: &mut S, st: &MatchState) {
    screen.clear();
    for e in st.entities() {
        draw_entity(screen, e);
    }
}
