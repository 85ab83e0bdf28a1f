use crossterm::style::Color;

use term_invaders::constants::*;
use term_invaders::entities::Bullet;
use term_invaders::game::Game;
use term_invaders::rendering::*;
use term_invaders::types::{GameState, Point};

fn headless() -> OutputTarget {
    OutputTarget::ScreenBuffer(ScreenBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT))
}

fn screen(target: &OutputTarget) -> &ScreenBuffer {
    match target {
        OutputTarget::ScreenBuffer(sb) => sb,
        OutputTarget::Stdout(_) => panic!("expected a screen buffer"),
    }
}

#[test]
fn grid_has_border_and_entities() {
    let game = Game::new();
    let mut grid = GameGrid::new();

    grid.draw(&game);

    // Side walls are drawn last, so they own the corners.
    assert_eq!(grid.get(0, 0).map(|c| c.ch), Some('|'));
    assert_eq!(grid.get(WIDTH as u16 - 1, HEIGHT as u16 - 1).map(|c| c.ch), Some('|'));
    assert_eq!(grid.get(1, 0).map(|c| c.ch), Some('-'));
    assert_eq!(grid.get(0, 5).map(|c| c.ch), Some('|'));
    assert_eq!(grid.get(WIDTH as u16 - 1, 5).map(|c| c.ch), Some('|'));
    assert_eq!(grid.get(5, HEIGHT as u16 - 1).map(|c| c.ch), Some('-'));

    let player = grid.get(game.player.x as u16, game.player.y as u16);
    assert_eq!(player, Some(Cell { ch: 'A', color: Some(Color::Cyan) }));
    let invader = grid.get(3, 2);
    assert_eq!(invader, Some(Cell { ch: 'W', color: Some(Color::Green) }));
}

#[test]
fn bullets_drawn_only_when_active_and_inside() {
    let mut game = Game::new();
    let mut grid = GameGrid::new();
    game.player_bullet = Bullet::fire(Point::new(10, 10), -1);
    game.invader_bullet = Bullet::fire(Point::new(12, 0), 1);

    grid.draw(&game);

    assert_eq!(grid.get(10, 10).map(|c| c.ch), Some('|'));
    assert_eq!(grid.get(10, 10).and_then(|c| c.color), Some(Color::Yellow));
    assert_eq!(grid.get(12, 0).map(|c| c.ch), Some('-'));

    game.player_bullet.active = false;
    grid.draw(&game);
    assert_eq!(grid.get(10, 10).map(|c| c.ch), Some(' '));
}

#[test]
fn destroyed_invaders_disappear() {
    let mut game = Game::new();
    let mut grid = GameGrid::new();
    game.formation.invaders[0][0].active = false;

    grid.draw(&game);

    assert_eq!(grid.get(3, 2).map(|c| c.ch), Some(' '));
    assert_eq!(grid.get(7, 2).map(|c| c.ch), Some('W'));
}

#[test]
fn in_bounds_excludes_border() {
    assert!(in_bounds(Point::new(1, 1)));
    assert!(in_bounds(Point::new(WIDTH - 2, HEIGHT - 2)));
    assert!(!in_bounds(Point::new(0, 5)));
    assert!(!in_bounds(Point::new(5, HEIGHT - 1)));
    assert!(!in_bounds(Point::new(WIDTH - 1, 5)));
}

#[test]
fn hud_shows_score_and_lives() {
    let mut game = Game::new();
    game.score = 30;
    game.lives = 2;

    assert_eq!(hud_line(&game), "Score: 30  Lives: A A ");
    assert_eq!(lives_str(0), "");
    assert_eq!(lives_str(-1), "");
}

#[test]
fn status_line_follows_phase() {
    assert_eq!(status_line(GameState::Playing), (CONTROLS_HINT, None));
    assert_eq!(status_line(GameState::Won), (WIN_MESSAGE, Some(Color::Green)));
    assert_eq!(status_line(GameState::Lost), (LOSE_MESSAGE, Some(Color::Red)));
}

#[test]
fn frame_layout_in_screen_buffer() {
    let game = Game::new();
    let mut grid = GameGrid::new();
    let mut target = headless();

    render_frame(&mut target, &mut grid, &game).unwrap();

    let sb = screen(&target);
    assert_eq!(sb.line(0), "Score: 0  Lives: A A A");
    let top_border = format!("|{}|", "-".repeat(WIDTH as usize - 2));
    assert_eq!(sb.line(GRID_TOP), top_border);
    assert_eq!(sb.line(GRID_TOP + HEIGHT as u16 - 1), top_border);
    let player_row = sb.line(GRID_TOP + game.player.y as u16);
    assert_eq!(player_row.chars().nth(game.player.x as usize), Some('A'));
    assert!(player_row.starts_with('|') && player_row.ends_with('|'));
    assert_eq!(sb.line(STATUS_ROW), CONTROLS_HINT);
}

#[test]
fn frame_shows_end_message() {
    let mut game = Game::new();
    let mut grid = GameGrid::new();
    let mut target = headless();

    game.state = GameState::Lost;
    render_frame(&mut target, &mut grid, &game).unwrap();
    assert_eq!(screen(&target).line(STATUS_ROW), LOSE_MESSAGE);

    game.state = GameState::Won;
    render_frame(&mut target, &mut grid, &game).unwrap();
    assert_eq!(screen(&target).line(STATUS_ROW), WIN_MESSAGE);
}

#[test]
fn screen_buffer_clips_writes() {
    let mut sb = ScreenBuffer::new(4, 2);
    sb.move_to(2, 1);
    sb.write_str("abcdef");
    sb.move_to(0, 5);
    sb.write_str("zz");

    assert_eq!(sb.line(0), "");
    assert_eq!(sb.line(1), "  ab");
    assert_eq!(sb.line(9), "");
}

#[test]
fn screen_buffer_keeps_glyph_colours() {
    let game = Game::new();
    let mut grid = GameGrid::new();
    let mut target = headless();

    render_frame(&mut target, &mut grid, &game).unwrap();

    let sb = screen(&target);
    let player = sb.cell(game.player.x as u16, GRID_TOP + game.player.y as u16);
    assert_eq!(player, Some(Cell { ch: 'A', color: Some(Color::Cyan) }));
    assert_eq!(sb.cell(3, GRID_TOP + 2), Some(Cell { ch: 'W', color: Some(Color::Green) }));
    assert_eq!(sb.cell(0, GRID_TOP).and_then(|c| c.color), None);
    assert_eq!(sb.cell(0, 0).and_then(|c| c.color), Some(Color::Yellow));
    assert_eq!(sb.cell(0, STATUS_ROW).and_then(|c| c.color), None);
}

#[test]
fn screen_buffer_clear_resets_cells() {
    let mut target = headless();
    target.move_to(2, 3).unwrap();
    target.write_colored("vv", Some(Color::Red)).unwrap();

    let OutputTarget::ScreenBuffer(sb) = &mut target else {
        panic!("expected a screen buffer");
    };
    assert_eq!(sb.cell(3, 3), Some(Cell { ch: 'v', color: Some(Color::Red) }));
    sb.clear();
    assert_eq!(sb.cell(3, 3).map(|c| c.ch), Some(' '));
    assert_eq!(sb.cell(3, 3).and_then(|c| c.color), None);
}
