#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Abstract player commands decoded from the keyboard.
/// `Quit` never reaches the engine; the driver handles it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Shoot,
    Quit,
}

/// Match phase. `Won` and `Lost` are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::Playing)
    }
}
