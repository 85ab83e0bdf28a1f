use std::time::Duration;

// --- Playfield ---
pub const WIDTH: i32 = 40;
pub const HEIGHT: i32 = 20;

// --- Invader formation ---
pub const INVADER_ROWS: usize = 3;
pub const INVADER_COLS: usize = 8;
pub const INVADER_ORIGIN_X: i32 = 3;
pub const INVADER_ORIGIN_Y: i32 = 2;
pub const INVADER_SPACING_X: i32 = 4;
pub const INVADER_SPACING_Y: i32 = 2;
pub const INVADER_STEPS: u64 = 15; // Ticks between formation moves

// --- Player ---
pub const PLAYER_LIVES: i32 = 3;
pub const BULLET_SPEED: i32 = 1;

pub const SCORE_PER_INVADER: u32 = 10;

// --- Driver ---
pub const TICK_DURATION: Duration = Duration::from_millis(80);
pub const END_PAUSE: Duration = Duration::from_secs(2);
pub const DEBUG_MAX_TICKS: u64 = 600;
pub const LOG_FILE: &str = "term-invaders.log";
