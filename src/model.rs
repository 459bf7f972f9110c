use crate::config::Settings;
use std::fmt;

/// Smallest board that still fits both paddle columns and a ball column between them.
pub(crate) const MIN_COLS: u16 = 3;
pub(crate) const MIN_ROWS: u16 = 1;

/// A paddle or the ball. Coordinates are in terminal cells, row 0 at the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Entity {
    pub(crate) row: i32,
    pub(crate) col: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) vel_row: i32,
    pub(crate) vel_col: i32,
    pub(crate) glyph: char,
}

impl Entity {
    pub(crate) fn paddle(row: i32, col: i32, height: i32, glyph: char) -> Self {
        Self {
            row,
            col,
            width: 1,
            height: height.max(1),
            vel_row: 0,
            vel_col: 0,
            glyph,
        }
    }

    pub(crate) fn ball(row: i32, col: i32, vel_row: i32, vel_col: i32, glyph: char) -> Self {
        Self {
            row,
            col,
            width: 1,
            height: 1,
            vel_row,
            vel_col,
            glyph,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Player {
    /// Left paddle, w/s.
    One,
    /// Right paddle, arrow keys.
    Two,
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => f.write_str("Player 1"),
            Player::Two => f.write_str("Player 2"),
        }
    }
}

/// Everything one match needs. Owned by the game loop and handed to each step.
#[derive(Clone, Debug)]
pub(crate) struct MatchState {
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) left: Entity,
    pub(crate) right: Entity,
    pub(crate) ball: Entity,
}

impl MatchState {
    /// Paddles centered vertically on the outer columns, ball in the middle of the board.
    pub(crate) fn new(width: u16, height: u16, settings: &Settings) -> Self {
        let width = width as i32;
        let height = height as i32;
        let paddle_h = settings.paddle_height.clamp(1, height.max(1));
        let paddle_start = height / 2 - paddle_h / 2;

        Self {
            width,
            height,
            left: Entity::paddle(paddle_start, 0, paddle_h, settings.paddle_glyph),
            right: Entity::paddle(paddle_start, width - 1, paddle_h, settings.paddle_glyph),
            ball: Entity::ball(
                height / 2,
                width / 2,
                settings.ball_vel_row,
                settings.ball_vel_col,
                settings.ball_glyph,
            ),
        }
    }

    /// Render order: paddles first, ball on top.
    pub(crate) fn entities(&self) -> [&Entity; 3] {
        [&self.left, &self.right, &self.ball]
    }

    pub(crate) fn entities_mut(&mut self) -> [&mut Entity; 3] {
        [&mut self.left, &mut self.right, &mut self.ball]
    }
}
