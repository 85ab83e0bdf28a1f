use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};

use crate::types::Command;

/// Maps a key press onto a game command. Releases and unbound keys yield `None`.
pub fn decode_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Char(' ') => Some(Command::Shoot),
        _ => None,
    }
}

pub fn decode_event(event: Event) -> Option<Command> {
    match event {
        Event::Key(key) => decode_key(key),
        _ => None,
    }
}

/// Spawns a thread that blocks on terminal events and forwards decoded
/// commands. The thread ends quietly on a read error or once the receiver
/// is dropped.
pub fn spawn_input_reader() -> mpsc::Receiver<Command> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(event) => event,
                Err(e) => {
                    debug!("Input reader stopped: {}", e);
                    break;
                }
            };
            if let Some(command) = decode_event(event) {
                if tx.send(command).is_err() {
                    break;
                }
            }
        }
    });
    rx
}

// --- SimulatedInput for headless runs ---
pub struct SimulatedInput {
    commands: HashMap<u64, Command>,
}

impl SimulatedInput {
    pub fn new(commands: HashMap<u64, Command>) -> Self {
        SimulatedInput { commands }
    }

    /// A sweeping left/right pattern that fires every 20 ticks.
    pub fn demo(ticks: u64) -> Self {
        let mut commands = HashMap::new();
        for tick in 1..=ticks {
            let command = if tick % 20 == 0 {
                Command::Shoot
            } else if tick % 3 != 0 {
                continue;
            } else if (tick / 60) % 2 == 0 {
                Command::MoveLeft
            } else {
                Command::MoveRight
            };
            commands.insert(tick, command);
        }
        info!("Simulated input scripted with {} commands", commands.len());
        SimulatedInput::new(commands)
    }

    /// Removes and returns the command scheduled for `tick`.
    pub fn take(&mut self, tick: u64) -> Option<Command> {
        self.commands.remove(&tick)
    }

    pub fn remaining(&self) -> usize {
        self.commands.len()
    }
}
