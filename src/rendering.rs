use std::io::{self, Write};
use log::{debug, info};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use crate::constants::*;
use crate::game::Game;
use crate::types::{GameState, Point};

pub const INVADER_GLYPH: (char, Color) = ('W', Color::Green);
pub const PLAYER_GLYPH: (char, Color) = ('A', Color::Cyan);
pub const PLAYER_BULLET_GLYPH: (char, Color) = ('|', Color::Yellow);
pub const INVADER_BULLET_GLYPH: (char, Color) = ('v', Color::Red);

pub const CONTROLS_HINT: &str = "Controls: A/D or arrow keys to move, SPACE to shoot, Q to quit";
pub const WIN_MESSAGE: &str = "*** YOU WIN! ***";
pub const LOSE_MESSAGE: &str = "*** GAME OVER ***";

// HUD on row 0, playfield below it, one spacer row, then the status line.
pub const GRID_TOP: u16 = 1;
pub const STATUS_ROW: u16 = GRID_TOP + HEIGHT as u16 + 1;
pub const SCREEN_HEIGHT: u16 = STATUS_ROW + 1;
pub const SCREEN_WIDTH: u16 = CONTROLS_HINT.len() as u16;

// --- Cell: one glyph and its foreground colour ---
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub color: Option<Color>,
}

impl Cell {
    const BLANK: Cell = Cell { ch: ' ', color: None };
}

// --- ScreenBuffer: headless screen that keeps glyph colours ---
pub struct ScreenBuffer {
    pub cells: Vec<Vec<Cell>>,
    pub width: u16,
    pub height: u16,
    cursor: (u16, u16),
    pen: Option<Color>,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            cells: vec![vec![Cell::BLANK; width as usize]; height as usize],
            width,
            height,
            cursor: (0, 0),
            pen: None,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor = (x, y);
    }

    /// Writes at the cursor in the current pen colour, clipping at the edges.
    pub fn write_str(&mut self, s: &str) {
        let (mut x, y) = self.cursor;
        for ch in s.chars() {
            if let Some(cell) = self.cells.get_mut(y as usize).and_then(|row| row.get_mut(x as usize)) {
                *cell = Cell { ch, color: self.pen };
            }
            x = x.saturating_add(1);
        }
        self.cursor = (x, y);
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(Cell::BLANK);
        }
        self.cursor = (0, 0);
        self.pen = None;
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        self.cells.get(y as usize).and_then(|row| row.get(x as usize)).copied()
    }

    /// Row `y` with trailing blanks trimmed.
    pub fn line(&self, y: u16) -> String {
        self.cells
            .get(y as usize)
            .map(|row| row.iter().map(|cell| cell.ch).collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// Dumps every row, then each coloured glyph as `x,y=ch:Color` at debug level.
    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for y in 0..self.height {
            info!("{}", self.line(y));
        }
        info!("---------------------");
        if log::log_enabled!(log::Level::Debug) {
            let colored: Vec<String> = self
                .cells
                .iter()
                .enumerate()
                .flat_map(|(y, row)| {
                    row.iter().enumerate().filter_map(move |(x, cell)| {
                        cell.color.map(|color| format!("{},{}={}:{:?}", x, y, cell.ch, color))
                    })
                })
                .collect();
            debug!("Colours: {}", colored.join(" "));
        }
    }
}

// --- OutputTarget: the real terminal or a ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn move_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(s, MoveTo(x, y)),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(x, y);
                Ok(())
            }
        }
    }

    /// Terminal-only commands such as cursor visibility. No-op on a ScreenBuffer.
    pub fn queue_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }

    pub fn write_colored(&mut self, text: &str, color: Option<Color>) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => match color {
                Some(color) => queue!(s, SetForegroundColor(color), Print(text), ResetColor),
                None => queue!(s, Print(text)),
            },
            OutputTarget::ScreenBuffer(sb) => {
                sb.pen = color;
                sb.write_str(text);
                sb.pen = None;
                Ok(())
            }
        }
    }

    pub fn clear_screen_manual(&mut self, width: u16, height: u16) -> io::Result<()> {
        let blank = " ".repeat(width as usize);
        for y in 0..height {
            self.move_to(0, y)?;
            self.write_colored(&blank, None)?;
        }
        self.move_to(0, 0)?;
        self.flush()
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => {
                sb.write_str(&String::from_utf8_lossy(buf));
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

// --- GameGrid: the playfield as glyphs ---
pub struct GameGrid {
    pub grid: Vec<Vec<Cell>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new() -> Self {
        GameGrid {
            grid: vec![vec![Cell::BLANK; WIDTH as usize]; HEIGHT as usize],
            width: WIDTH as u16,
            height: HEIGHT as u16,
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(Cell::BLANK);
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, ch: char, color: Option<Color>) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = Cell { ch, color };
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.grid.get(y as usize).and_then(|row| row.get(x as usize)).copied()
    }

    fn draw_border(&mut self) {
        for x in 0..self.width {
            self.set_char(x, 0, '-', None);
            self.set_char(x, self.height - 1, '-', None);
        }
        for y in 0..self.height {
            self.set_char(0, y, '|', None);
            self.set_char(self.width - 1, y, '|', None);
        }
    }

    /// Overlays a glyph if `p` lies strictly inside the border.
    fn plot(&mut self, p: Point, (ch, color): (char, Color)) {
        if in_bounds(p) {
            self.set_char(p.x as u16, p.y as u16, ch, Some(color));
        }
    }

    /// Rebuilds the grid from the current match state.
    pub fn draw(&mut self, game: &Game) {
        self.clear();
        self.draw_border();
        for invader in game.formation.active() {
            self.plot(invader.position, INVADER_GLYPH);
        }
        self.plot(game.player, PLAYER_GLYPH);
        if game.player_bullet.active {
            self.plot(game.player_bullet.position, PLAYER_BULLET_GLYPH);
        }
        if game.invader_bullet.active {
            self.plot(game.invader_bullet.position, INVADER_BULLET_GLYPH);
        }
    }

    pub fn render(&self, target: &mut OutputTarget, top: u16) -> io::Result<()> {
        for (y, row) in self.grid.iter().enumerate() {
            target.move_to(0, top + y as u16)?;
            for cell in row {
                target.write_colored(cell.ch.encode_utf8(&mut [0; 4]), cell.color)?;
            }
        }
        Ok(())
    }
}

impl Default for GameGrid {
    fn default() -> Self {
        GameGrid::new()
    }
}

pub fn in_bounds(p: Point) -> bool {
    p.x > 0 && p.x < WIDTH - 1 && p.y > 0 && p.y < HEIGHT - 1
}

pub fn lives_str(lives: i32) -> String {
    "A ".repeat(lives.max(0) as usize)
}

pub fn hud_line(game: &Game) -> String {
    format!("Score: {}  Lives: {}", game.score, lives_str(game.lives))
}

pub fn status_line(state: GameState) -> (&'static str, Option<Color>) {
    match state {
        GameState::Playing => (CONTROLS_HINT, None),
        GameState::Won => (WIN_MESSAGE, Some(Color::Green)),
        GameState::Lost => (LOSE_MESSAGE, Some(Color::Red)),
    }
}

/// Draws one full frame: HUD, playfield and status line.
pub fn render_frame(target: &mut OutputTarget, grid: &mut GameGrid, game: &Game) -> io::Result<()> {
    if let OutputTarget::ScreenBuffer(sb) = target {
        sb.clear();
    }

    target.move_to(0, 0)?;
    write!(target, "{:<width$}", "", width = SCREEN_WIDTH as usize)?;
    target.move_to(0, 0)?;
    target.write_colored(&hud_line(game), Some(Color::Yellow))?;

    grid.draw(game);
    grid.render(target, GRID_TOP)?;

    let (status, color) = status_line(game.state);
    target.move_to(0, STATUS_ROW)?;
    write!(target, "{:<width$}", "", width = SCREEN_WIDTH as usize)?;
    target.move_to(0, STATUS_ROW)?;
    target.write_colored(status, color)?;

    target.flush()
}
