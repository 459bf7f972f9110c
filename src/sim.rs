use crate::model::{Entity, MatchState, Player};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
    Quit,
}

impl MatchState {
    /// Moves a paddle one row, kept inside `[0, height - paddle.height]`.
    pub(crate) fn apply(&mut self, cmd: Command) {
        let board_h = self.height;
        match cmd {
            Command::LeftUp => nudge(&mut self.left, -1, board_h),
            Command::LeftDown => nudge(&mut self.left, 1, board_h),
            Command::RightUp => nudge(&mut self.right, -1, board_h),
            Command::RightDown => nudge(&mut self.right, 1, board_h),
            Command::Quit => {}
        }
    }

    /// One simulation tick: integrate, then resolve wall and paddle hits.
    pub(crate) fn step(&mut self) {
        for e in self.entities_mut() {
            e.row += e.vel_row;
            e.col += e.vel_col;
        }

        if wall_collides(&self.ball, self.height) {
            self.ball.vel_row = -self.ball.vel_row;
        }

        if paddle_collides(&self.ball, &self.left) || paddle_collides(&self.ball, &self.right) {
            self.ball.vel_col = -self.ball.vel_col;
        }
    }

    pub(crate) fn winner(&self) -> Option<Player> {
        if self.ball.col < 0 {
            Some(Player::Two)
        } else if self.ball.col >= self.width {
            Some(Player::One)
        } else {
            None
        }
    }

    pub(crate) fn is_over(&self) -> bool {
        self.winner().is_some()
    }
}

fn nudge(paddle: &mut Entity, dir: i32, board_h: i32) {
    let next = paddle.row + dir;
    if next >= 0 && next + paddle.height <= board_h {
        paddle.row = next;
    }
}

/// Looks one move ahead of the ball's current row, like the paddle check does
/// for columns, so the ball turns on the edge row and never leaves the board.
pub(crate) fn wall_collides(ball: &Entity, board_h: i32) -> bool {
    let next = ball.row + ball.vel_row;
    next < 0 || next >= board_h
}

/// The ball's next column reaches or crosses the paddle column from the side
/// it is on now, and its row is within the paddle span.
pub(crate) fn paddle_collides(ball: &Entity, paddle: &Entity) -> bool {
    let next_col = ball.col + ball.vel_col;
    let reaches = if ball.col < paddle.col {
        next_col >= paddle.col
    } else {
        next_col <= paddle.col
    };

    reaches && ball.row >= paddle.row && ball.row < paddle.row + paddle.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use proptest::prelude::*;

    fn match_80x24() -> MatchState {
        MatchState::new(80, 24, &Settings::default())
    }

    #[test]
    fn step_integrates_ball_and_leaves_paddles() {
        let mut st = match_80x24();
        let (left, right) = (st.left, st.right);
        st.step();
        assert_eq!((st.ball.row, st.ball.col), (13, 42));
        assert_eq!(st.left, left);
        assert_eq!(st.right, right);
    }

    #[test]
    fn ball_turns_on_bottom_row() {
        let mut st = match_80x24();
        st.ball.row = 22;
        st.ball.vel_row = 1;
        st.step();
        assert_eq!(st.ball.row, 23);
        assert_eq!(st.ball.vel_row, -1);
        st.step();
        assert_eq!(st.ball.row, 22);
        assert_eq!(st.ball.vel_row, -1);
    }

    #[test]
    fn ball_turns_on_top_row() {
        let mut st = match_80x24();
        st.ball.row = 1;
        st.ball.vel_row = -1;
        st.ball.vel_col = 0;
        let mut path = Vec::new();
        for _ in 0..4 {
            st.step();
            path.push((st.ball.row, st.ball.vel_row));
        }
        assert_eq!(path, vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn ball_inside_board_keeps_row_velocity() {
        let mut st = match_80x24();
        st.ball.row = 5;
        st.ball.vel_row = 1;
        st.step();
        assert_eq!(st.ball.vel_row, 1);
    }

    #[test]
    fn paddle_hit_when_ball_left_of_paddle_moving_right() {
        let ball = Entity::ball(3, 5, 1, 2, 'o');
        let paddle = Entity::paddle(2, 6, 4, '|');
        assert!(paddle_collides(&ball, &paddle));
    }

    #[test]
    fn no_paddle_hit_when_ball_right_of_paddle_moving_away() {
        let ball = Entity::ball(3, 5, 1, 2, 'o');
        let paddle = Entity::paddle(2, 4, 4, '|');
        assert!(!paddle_collides(&ball, &paddle));
    }

    #[test]
    fn no_paddle_hit_outside_paddle_rows() {
        let paddle = Entity::paddle(2, 6, 4, '|');
        assert!(!paddle_collides(&Entity::ball(1, 5, 1, 2, 'o'), &paddle));
        assert!(!paddle_collides(&Entity::ball(6, 5, 1, 2, 'o'), &paddle));
        assert!(paddle_collides(&Entity::ball(5, 5, 1, 2, 'o'), &paddle));
    }

    #[test]
    fn right_paddle_returns_ball() {
        let mut st = match_80x24();
        st.ball.row = 10;
        st.ball.col = 75;
        st.ball.vel_row = 0;
        st.step();
        assert_eq!(st.ball.col, 77);
        assert_eq!(st.ball.vel_col, -2);
        st.step();
        assert_eq!(st.ball.col, 75);
    }

    #[test]
    fn left_paddle_returns_ball() {
        let mut st = match_80x24();
        st.ball.row = 11;
        st.ball.col = 4;
        st.ball.vel_row = 0;
        st.ball.vel_col = -2;
        st.step();
        assert_eq!(st.ball.col, 2);
        assert_eq!(st.ball.vel_col, 2);
        assert!(!st.is_over());
    }

    #[test]
    fn missed_ball_ends_match() {
        let mut st = match_80x24();
        st.left.row = 0;
        st.ball.row = 20;
        st.ball.col = 3;
        st.ball.vel_row = 0;
        st.ball.vel_col = -2;
        st.step();
        st.step();
        assert_eq!(st.ball.col, -1);
        assert_eq!(st.winner(), Some(Player::Two));
    }

    #[test]
    fn winner_by_ball_column() {
        let mut st = match_80x24();
        st.ball.col = -1;
        assert_eq!(st.winner(), Some(Player::Two));
        st.ball.col = 80;
        assert_eq!(st.winner(), Some(Player::One));
        st.ball.col = 40;
        assert_eq!(st.winner(), None);
        assert!(!st.is_over());
    }

    #[test]
    fn winner_is_stable_across_calls() {
        let mut st = match_80x24();
        st.ball.col = 80;
        let first = st.winner();
        assert_eq!(st.winner(), first);
        assert!(st.is_over());
    }

    #[test]
    fn paddles_stop_at_top_and_bottom() {
        let mut st = match_80x24();
        st.left.row = 0;
        st.apply(Command::LeftUp);
        assert_eq!(st.left.row, 0);

        st.right.row = 20;
        st.apply(Command::RightDown);
        assert_eq!(st.right.row, 20);

        st.apply(Command::RightUp);
        assert_eq!(st.right.row, 19);
        st.apply(Command::LeftDown);
        assert_eq!(st.left.row, 1);
    }

    #[test]
    fn quit_does_not_touch_state() {
        let mut st = match_80x24();
        let before = (st.left, st.right, st.ball);
        st.apply(Command::Quit);
        assert_eq!((st.left, st.right, st.ball), before);
    }

    #[test]
    fn ball_column_advances_until_player_one_wins() {
        let mut st = match_80x24();
        let mut ticks = 0;
        while !st.is_over() {
            let col = st.ball.col;
            st.step();
            assert_eq!(st.ball.col, col + 2);
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(st.ball.col, 80);
        assert_eq!(st.winner(), Some(Player::One));
    }

    proptest! {
        #[test]
        fn wall_hit_flips_row_velocity(row in 0i32..24, up in any::<bool>()) {
            let mut st = match_80x24();
            st.ball.col = 40;
            st.ball.row = row;
            st.ball.vel_row = if up { -1 } else { 1 };
            let v = st.ball.vel_row;
            st.step();
            let after = row + v;
            if after + v < 0 || after + v >= 24 {
                prop_assert_eq!(st.ball.vel_row, -v);
            } else {
                prop_assert_eq!(st.ball.vel_row, v);
            }
        }

        #[test]
        fn ball_never_escapes_vertically(row in 0i32..24, up in any::<bool>(), ticks in 1usize..200) {
            let mut st = match_80x24();
            st.ball.vel_col = 0;
            st.ball.col = 40;
            st.ball.row = row;
            // on an edge row the ball is always already heading back in
            st.ball.vel_row = match row {
                0 => 1,
                23 => -1,
                _ if up => -1,
                _ => 1,
            };
            for _ in 0..ticks {
                st.step();
                prop_assert!((0..24).contains(&st.ball.row));
            }
        }

        #[test]
        fn paddle_stays_on_board(moves in proptest::collection::vec(0u8..4, 0..120)) {
            let mut st = match_80x24();
            for m in moves {
                let cmd = match m {
                    0 => Command::LeftUp,
                    1 => Command::LeftDown,
                    2 => Command::RightUp,
                    _ => Command::RightDown,
                };
                st.apply(cmd);
                for p in [&st.left, &st.right] {
                    prop_assert!(p.row >= 0);
                    prop_assert!(p.row <= st.height - p.height);
                }
            }
        }
    }
}
