use log::{debug, info};
use rand::Rng;

use crate::constants::*;
use crate::entities::{Bullet, Formation};
use crate::types::{GameState, Point};

/// The match engine. Owns every piece of mutable game state; callers
/// drive it through the move/shoot commands and `update`, then read the
/// public fields to render.
pub struct Game {
    pub player: Point,
    pub player_bullet: Bullet,
    pub formation: Formation,
    pub invader_bullet: Bullet,
    pub score: u32,
    pub lives: i32,
    pub tick: u64,
    pub state: GameState,
}

impl Game {
    pub fn new() -> Self {
        info!("New match: {}x{} invaders, {} lives", INVADER_ROWS, INVADER_COLS, PLAYER_LIVES);
        Game {
            player: Point::new(WIDTH / 2, HEIGHT - 2),
            player_bullet: Bullet::idle(-1),
            formation: Formation::new(),
            invader_bullet: Bullet::idle(1),
            score: 0,
            lives: PLAYER_LIVES,
            tick: 0,
            state: GameState::Playing,
        }
    }

    // Movement is deliberately not gated on the match phase.
    pub fn move_left(&mut self) {
        if self.player.x > 1 {
            self.player.x -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.player.x < WIDTH - 2 {
            self.player.x += 1;
        }
    }

    /// Fires from just above the ship. Ignored while a player shot is in flight.
    pub fn shoot(&mut self) {
        if !self.player_bullet.active {
            self.player_bullet = Bullet::fire(self.player.offset(0, -1), -1);
        }
    }

    /// Advances the match by one tick using the thread-local RNG.
    pub fn update(&mut self) {
        self.update_with_rng(&mut rand::thread_rng());
    }

    pub fn update_with_rng(&mut self, rng: &mut impl Rng) {
        if self.state != GameState::Playing {
            return;
        }
        self.tick += 1;

        self.move_player_bullet();
        self.move_invader_bullet();

        if self.tick % INVADER_STEPS == 0 {
            self.move_invaders();
            self.maybe_invader_shoot(rng);
        }

        self.check_collisions();
        self.check_win_loss();
    }

    pub fn move_player_bullet(&mut self) {
        if !self.player_bullet.active {
            return;
        }
        self.player_bullet.update();
        if self.player_bullet.position.y < 1 {
            self.player_bullet.active = false;
        }
    }

    pub fn move_invader_bullet(&mut self) {
        if !self.invader_bullet.active {
            return;
        }
        self.invader_bullet.update();
        if self.invader_bullet.position.y >= HEIGHT - 1 {
            self.invader_bullet.active = false;
        }
    }

    pub fn move_invaders(&mut self) {
        if self.formation.step() {
            debug!("Formation dropped at tick {}, now heading {}", self.tick, self.formation.direction);
        }
    }

    pub fn maybe_invader_shoot(&mut self, rng: &mut impl Rng) {
        if self.invader_bullet.active {
            return;
        }
        if let Some(shooter) = self.formation.pick_shooter(rng) {
            self.invader_bullet = Bullet::fire(shooter.offset(0, 1), 1);
        }
    }

    pub fn check_collisions(&mut self) {
        if self.player_bullet.active {
            if let Some(invader) = self.formation.invader_at_mut(self.player_bullet.position) {
                invader.active = false;
                self.player_bullet.active = false;
                self.score += SCORE_PER_INVADER;
                info!("Invader destroyed at {:?}, score {}", invader.position, self.score);
            }
        }

        if self.invader_bullet.active && self.invader_bullet.position == self.player {
            self.invader_bullet.active = false;
            self.lives -= 1;
            info!("Player hit, {} lives left", self.lives);
        }
    }

    /// Lives first, then the defence line, then an empty formation.
    /// A finished match keeps its phase.
    pub fn check_win_loss(&mut self) {
        if self.state.is_over() {
            return;
        }
        let next = if self.lives <= 0 {
            GameState::Lost
        } else if self.formation.reached_row(self.player.y) {
            GameState::Lost
        } else if self.formation.active_count() == 0 {
            GameState::Won
        } else {
            return;
        };
        info!("Match over at tick {}: {:?} with score {}", self.tick, next, self.score);
        self.state = next;
    }

    pub fn active_invader_count(&self) -> usize {
        self.formation.active_count()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
