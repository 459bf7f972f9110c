use crate::config::Settings;
use crate::input::{self, map_key, CrosstermKeys, Key};
use crate::model::{MatchState, Player, MIN_COLS, MIN_ROWS};
use crate::render::{draw_end_screen, draw_frame, Screen, Terminal};
use crate::sim::Command;
use std::sync::mpsc::Receiver;
use std::thread;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Quit,
    Won(Player),
}

enum Flow {
    Running,
    Ended(Outcome),
}

pub(crate) struct App {
    settings: Settings,
    term: Terminal,
    keys: Receiver<Key>,
}

impl App {
    fn init() -> anyhow::Result<Self> {
        let settings = Settings::default();
        let mut term = Terminal::begin()?;

        let (w, h) = term.size();
        if let Err(e) = check_board(w, h) {
            // the size problem is what the user needs to see, not a failed restore
            let _ = term.end();
            return Err(e);
        }

        let keys = input::start(CrosstermKeys);

        Ok(Self {
            settings,
            term,
            keys,
        })
    }

    fn run(&mut self) -> anyhow::Result<Outcome> {
        let res = run_match(&mut self.term, &self.keys, &self.settings);
        if let Ok(Outcome::Won(_)) = res {
            thread::sleep(self.settings.end_linger());
        }
        // restore the terminal before reporting anything, error or not
        self.term.end()?;
        res
    }
}

fn check_board(w: u16, h: u16) -> anyhow::Result<()> {
    if w < MIN_COLS || h < MIN_ROWS {
        anyhow::bail!("terminal too small ({w}x{h}), need at least {MIN_COLS}x{MIN_ROWS}");
    }
    Ok(())
}

pub(crate) fn run() -> anyhow::Result<()> {
    let mut app = App::init()?;
    match app.run()? {
        Outcome::Won(winner) => println!("Game Over! {winner} wins!"),
        Outcome::Quit => {}
    }
    Ok(())
}

/// Plays one match on `screen` until someone wins or a quit key arrives.
pub(crate) fn run_match<S: Screen>(
    screen: &mut S,
    keys: &Receiver<Key>,
    settings: &Settings,
) -> anyhow::Result<Outcome> {
    let (w, h) = screen.size();
    let mut st = MatchState::new(w, h, settings);
    log::info!("match started on {w}x{h}");

    loop {
        if let Flow::Ended(outcome) = tick(screen, &mut st, keys)? {
            log::info!("match over: {outcome:?}");
            return Ok(outcome);
        }
        thread::sleep(settings.tick());
    }
}

/// One pass of input, simulation and rendering. Consumes at most one key.
fn tick<S: Screen>(
    screen: &mut S,
    st: &mut MatchState,
    keys: &Receiver<Key>,
) -> anyhow::Result<Flow> {
    if let Some(key) = input::poll(keys) {
        match map_key(key) {
            Some(Command::Quit) => return Ok(Flow::Ended(Outcome::Quit)),
            Some(cmd) => {
                log::debug!("{key} -> {cmd:?}");
                st.apply(cmd);
            }
            None => log::trace!("ignored key {key}"),
        }
    }

    st.step();

    if let Some(winner) = st.winner() {
        draw_end_screen(screen, st, winner)?;
        return Ok(Flow::Ended(Outcome::Won(winner)));
    }

    draw_frame(screen, st)?;
    Ok(Flow::Running)
}
