use std::env;
use std::io;
use std::time::Duration;

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};

use term_invaders::constants::*;
use term_invaders::driver::{Driver, InputSource, Outcome};
use term_invaders::game::Game;
use term_invaders::options::Options;
use term_invaders::rendering::{OutputTarget, ScreenBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use term_invaders::terminal_io::{spawn_input_reader, SimulatedInput};

fn main() -> io::Result<()> {
    let options = Options::from_args(env::args().skip(1));
    if let Err(e) = simple_logging::log_to_file(LOG_FILE, options.log_level) {
        eprintln!("Failed to open {}: {}", LOG_FILE, e);
    }
    info!("Starting term-invaders with {:?}", options);

    let mut game = Game::new();
    let outcome = if options.debug {
        run_headless(&options, &mut game)?
    } else {
        run_terminal(&options, &mut game)?
    };

    info!("Exiting: {:?}, score {}, lives {}, tick {}", outcome, game.score, game.lives, game.tick);
    Ok(())
}

fn run_headless(options: &Options, game: &mut Game) -> io::Result<Outcome> {
    info!("Debug mode enabled, rendering to the log.");
    let ticks = options.max_ticks.unwrap_or(DEBUG_MAX_TICKS);
    let mut driver = Driver::new(
        OutputTarget::ScreenBuffer(ScreenBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT)),
        InputSource::Simulated(SimulatedInput::demo(ticks)),
        Duration::ZERO,
        Duration::ZERO,
        options.max_ticks,
    );
    driver.run(game)
}

fn run_terminal(options: &Options, game: &mut Game) -> io::Result<Outcome> {
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
    info!("Raw mode enabled.");

    let mut stdout_target = OutputTarget::Stdout(io::stdout());
    let result = prepare_screen(&mut stdout_target)
        .map_err(|e| { error!("Failed to prepare the screen: {}", e); e })
        .and_then(|_| {
            let mut driver = Driver::new(
                stdout_target,
                InputSource::Live(spawn_input_reader()),
                TICK_DURATION,
                END_PAUSE,
                options.max_ticks,
            );
            driver.run(game)
        });

    // Restore the terminal no matter how the run ended.
    if let Err(e) = execute!(io::stdout(), Show, LeaveAlternateScreen) {
        error!("Failed to restore the screen: {}", e);
    }
    if let Err(e) = disable_raw_mode() {
        error!("Failed to disable raw mode: {}", e);
    }
    result
}

fn prepare_screen(stdout_target: &mut OutputTarget) -> io::Result<()> {
    execute!(stdout_target, EnterAlternateScreen, Hide)?;
    stdout_target.clear_screen_manual(SCREEN_WIDTH, SCREEN_HEIGHT)
}
