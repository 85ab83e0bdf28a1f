use crate::constants::*;
use crate::types::Point;
use rand::Rng;
use rand::seq::SliceRandom;

// --- Bullet ---
#[derive(Clone, Copy, Debug)]
pub struct Bullet {
    pub position: Point,
    pub active: bool,
    pub direction: i32, // -1 = up (player), +1 = down (invader)
}

impl Bullet {
    pub fn idle(direction: i32) -> Self {
        Bullet { position: Point::default(), active: false, direction }
    }

    pub fn fire(position: Point, direction: i32) -> Self {
        Bullet { position, active: true, direction }
    }

    pub fn update(&mut self) {
        if !self.active {
            return;
        }
        self.position.y += self.direction * BULLET_SPEED;
    }
}

// --- Invader ---
#[derive(Clone, Copy, Debug)]
pub struct Invader {
    pub position: Point,
    pub active: bool,
}

/// The invader grid plus the direction it is marching in.
///
/// Grid size never changes after construction. Invaders are only ever
/// deactivated; positions change solely through [`Formation::step`].
pub struct Formation {
    pub invaders: [[Invader; INVADER_COLS]; INVADER_ROWS],
    pub direction: i32, // 1 = right, -1 = left
}

impl Formation {
    pub fn new() -> Self {
        let invaders = std::array::from_fn(|row| {
            std::array::from_fn(|col| Invader {
                position: Point::new(
                    INVADER_ORIGIN_X + col as i32 * INVADER_SPACING_X,
                    INVADER_ORIGIN_Y + row as i32 * INVADER_SPACING_Y,
                ),
                active: true,
            })
        });
        Formation { invaders, direction: 1 }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Invader> {
        self.invaders.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Invader> {
        self.invaders.iter_mut().flatten()
    }

    pub fn active(&self) -> impl Iterator<Item = &Invader> {
        self.iter().filter(|invader| invader.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Marches every active invader one column, or, if any of them would
    /// touch a side border, reverses and drops the whole formation a row.
    /// Returns true when the formation dropped.
    pub fn step(&mut self) -> bool {
        let direction = self.direction;
        let needs_drop = self.active().any(|invader| {
            let next_x = invader.position.x + direction;
            next_x <= 0 || next_x >= WIDTH - 1
        });

        if needs_drop {
            self.direction = -self.direction;
        }
        for invader in self.iter_mut().filter(|invader| invader.active) {
            if needs_drop {
                invader.position.y += 1;
            } else {
                invader.position.x += direction;
            }
        }
        needs_drop
    }

    /// Picks one active invader uniformly at random.
    pub fn pick_shooter(&self, rng: &mut impl Rng) -> Option<Point> {
        let candidates: Vec<Point> = self.active().map(|invader| invader.position).collect();
        candidates.choose(rng).copied()
    }

    /// True if any active invader sits on or below row `y`.
    pub fn reached_row(&self, y: i32) -> bool {
        self.active().any(|invader| invader.position.y >= y)
    }

    /// Active invader occupying `position`, if any.
    pub fn invader_at_mut(&mut self, position: Point) -> Option<&mut Invader> {
        self.iter_mut().find(|invader| invader.active && invader.position == position)
    }
}

impl Default for Formation {
    fn default() -> Self {
        Formation::new()
    }
}
