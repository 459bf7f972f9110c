use std::time::Duration;

#[derive(Clone, Debug)]
pub(crate) struct Settings {
    /// Fixed sleep between ticks. Lower is faster and harder.
    pub(crate) tick_ms: u64,
    pub(crate) paddle_height: i32,
    pub(crate) ball_vel_row: i32,
    pub(crate) ball_vel_col: i32,
    pub(crate) paddle_glyph: char,
    pub(crate) ball_glyph: char,
    /// How long the "Game Over!" frame stays up before the terminal is restored.
    pub(crate) end_linger_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: 75,
            paddle_height: 4,
            ball_vel_row: 1,
            ball_vel_col: 2,
            paddle_glyph: '\u{2588}',
            ball_glyph: '\u{25CF}',
            end_linger_ms: 2000,
        }
    }
}

impl Settings {
    pub(crate) fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub(crate) fn end_linger(&self) -> Duration {
        Duration::from_millis(self.end_linger_ms)
    }
}
