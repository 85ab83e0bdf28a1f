use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use log::{error, info};

use crate::constants::INVADER_STEPS;
use crate::game::Game;
use crate::rendering::{render_frame, GameGrid, OutputTarget};
use crate::terminal_io::SimulatedInput;
use crate::types::{Command, GameState};

pub enum InputSource {
    Live(mpsc::Receiver<Command>),
    Simulated(SimulatedInput),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    Finished(GameState),
    TickLimit,
}

#[derive(Debug, PartialEq, Eq)]
enum DriverEvent {
    Command(Command),
    Tick,
}

/// Applies a movement or fire command. `Quit` is the driver's business.
pub fn apply_command(game: &mut Game, command: Command) {
    match command {
        Command::MoveLeft => game.move_left(),
        Command::MoveRight => game.move_right(),
        Command::Shoot => game.shoot(),
        Command::Quit => {}
    }
}

/// Feeds the engine from two sources, a command stream and a fixed tick
/// clock, and renders after every step.
pub struct Driver {
    pub stdout_target: OutputTarget,
    input: InputSource,
    input_closed: bool,
    tick_duration: Duration,
    end_pause: Duration,
    max_ticks: Option<u64>,
    grid: GameGrid,
}

impl Driver {
    pub fn new(
        stdout_target: OutputTarget,
        input: InputSource,
        tick_duration: Duration,
        end_pause: Duration,
        max_ticks: Option<u64>,
    ) -> Self {
        Driver {
            stdout_target,
            input,
            input_closed: false,
            tick_duration,
            end_pause,
            max_ticks,
            grid: GameGrid::new(),
        }
    }

    pub fn run(&mut self, game: &mut Game) -> io::Result<Outcome> {
        self.render(game)?;
        let mut deadline = Instant::now() + self.tick_duration;

        loop {
            if self.max_ticks.is_some_and(|max| game.tick >= max) {
                info!("Tick limit reached at tick {}", game.tick);
                return Ok(Outcome::TickLimit);
            }

            let ticked = match self.next_event(game.tick, deadline) {
                DriverEvent::Command(Command::Quit) => {
                    info!("Quit requested at tick {}", game.tick);
                    return Ok(Outcome::Quit);
                }
                DriverEvent::Command(command) => {
                    apply_command(game, command);
                    false
                }
                DriverEvent::Tick => {
                    game.update();
                    let now = Instant::now();
                    deadline += self.tick_duration;
                    if deadline < now {
                        deadline = now + self.tick_duration;
                    }
                    true
                }
            };
            self.render(game)?;
            if ticked && game.tick % INVADER_STEPS == 0 {
                self.dump_screen();
            }

            if game.is_over() {
                self.dump_screen();
                thread::sleep(self.end_pause);
                return Ok(Outcome::Finished(game.state));
            }
        }
    }

    fn next_event(&mut self, tick: u64, deadline: Instant) -> DriverEvent {
        match &mut self.input {
            InputSource::Simulated(sim) => match sim.take(tick + 1) {
                Some(command) => DriverEvent::Command(command),
                None => DriverEvent::Tick,
            },
            InputSource::Live(rx) => {
                let timeout = deadline.saturating_duration_since(Instant::now());
                if self.input_closed {
                    thread::sleep(timeout);
                    return DriverEvent::Tick;
                }
                match rx.recv_timeout(timeout) {
                    Ok(command) => DriverEvent::Command(command),
                    Err(RecvTimeoutError::Timeout) => DriverEvent::Tick,
                    Err(RecvTimeoutError::Disconnected) => {
                        info!("Input channel closed, continuing on the tick clock only");
                        self.input_closed = true;
                        DriverEvent::Tick
                    }
                }
            }
        }
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        render_frame(&mut self.stdout_target, &mut self.grid, game)
            .map_err(|e| { error!("Failed to render frame at tick {}: {}", game.tick, e); e })
    }

    fn dump_screen(&self) {
        if let OutputTarget::ScreenBuffer(sb) = &self.stdout_target {
            sb.print_to_log();
        }
    }
}
