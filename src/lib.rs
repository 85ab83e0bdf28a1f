pub mod constants;
pub mod driver;
pub mod entities;
pub mod game;
pub mod options;
pub mod rendering;
pub mod terminal_io;
pub mod types;
