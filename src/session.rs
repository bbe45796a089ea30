//! Session flow around individual games
//!
//! Menu, a running (possibly paused) game, and the game-over prompt. The
//! session owns the best-score store: it reads it once on creation and
//! writes it only when a finished or abandoned game beat the loaded value.

use glam::Vec2;

use crate::error::GenerationError;
use crate::persistence::{ScoreStore, load_best, save_best};
use crate::render::RenderSurface;
use crate::sim::state::{GameEvent, GameState};
use crate::sim::tick::{TickInput, tick};
use crate::tuning::Tuning;

/// What is on screen
#[derive(Debug)]
pub enum Screen {
    Menu,
    Playing(Box<GameState>),
    /// Waiting for the retry decision
    GameOver { score: u32, best_score: u32 },
}

pub struct Session<S: ScoreStore> {
    tuning: Tuning,
    store: S,
    best_score: u32,
    seed: u64,
    games_started: u64,
    finished: bool,
    pub screen: Screen,
}

impl<S: ScoreStore> Session<S> {
    /// Validate the tuning and load the best score
    pub fn new(tuning: Tuning, mut store: S, seed: u64) -> Result<Self, GenerationError> {
        tuning.validate()?;
        let best_score = load_best(&mut store);
        Ok(Self {
            tuning,
            store,
            best_score,
            seed,
            games_started: 0,
            finished: false,
            screen: Screen::Menu,
        })
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// True once the player quit
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn game(&self) -> Option<&GameState> {
        match &self.screen {
            Screen::Playing(game) => Some(game.as_ref()),
            _ => None,
        }
    }

    pub fn game_mut(&mut self) -> Option<&mut GameState> {
        match &mut self.screen {
            Screen::Playing(game) => Some(game.as_mut()),
            _ => None,
        }
    }

    /// Begin a fresh game. Each game in a session gets its own derived seed.
    pub fn start(&mut self) -> Result<(), GenerationError> {
        let seed = self.seed.wrapping_add(self.games_started);
        self.games_started += 1;
        let game = GameState::new(self.tuning.clone(), seed, self.best_score)?;
        log::info!("Game {} started (seed {})", self.games_started, seed);
        self.screen = Screen::Playing(Box::new(game));
        Ok(())
    }

    /// Run one tick of the current game, returning its events
    pub fn update(&mut self, dt: f32, input: &TickInput) -> Result<Vec<GameEvent>, GenerationError> {
        if input.quit {
            self.quit();
            return Ok(Vec::new());
        }
        let Screen::Playing(game) = &mut self.screen else {
            return Ok(Vec::new());
        };

        let over = tick(game, input, dt)?;
        let events = game.drain_events();
        if over {
            let score = game.score;
            let beaten = game.beat_best();
            if beaten {
                self.persist(score);
            }
            self.screen = Screen::GameOver {
                score,
                best_score: self.best_score,
            };
        }
        Ok(events)
    }

    /// Answer the "try again?" prompt
    pub fn resolve_game_over(&mut self, retry: bool) -> Result<(), GenerationError> {
        if !matches!(self.screen, Screen::GameOver { .. }) {
            return Ok(());
        }
        if retry {
            self.start()
        } else {
            self.screen = Screen::Menu;
            Ok(())
        }
    }

    /// Leave the session, keeping a beaten best score from an unfinished game
    pub fn quit(&mut self) {
        if let Screen::Playing(game) = &self.screen
            && game.beat_best()
        {
            let score = game.score;
            self.persist(score);
        }
        self.finished = true;
        log::info!("Session finished, best score {}", self.best_score);
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        match &self.screen {
            Screen::Menu => surface.draw_text("Start", self.center(), 32.0),
            Screen::Playing(game) => game.draw(surface),
            Screen::GameOver { score, best_score } => {
                let center = self.center();
                surface.draw_text("Game over! Try again?", center, 28.0);
                surface.draw_text(
                    &format!("Score {score}  Best {best_score}"),
                    center + Vec2::new(0.0, 40.0),
                    20.0,
                );
            }
        }
    }

    fn center(&self) -> Vec2 {
        self.tuning.play_area / 2.0
    }

    fn persist(&mut self, score: u32) {
        self.best_score = score;
        if let Err(e) = save_best(&mut self.store, score) {
            log::warn!("Failed to save best score: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::persistence::MemoryStore;
    use crate::render::DrawList;
    use crate::sim::disc::Disc;
    use crate::sim::pin::Pin;
    use crate::tuning::PaletteColor;

    fn session_with_best(best: u32) -> Session<MemoryStore> {
        let store = MemoryStore::with_contents(format!(r#"{{"best_score":{best}}}"#));
        Session::new(Tuning::default(), store, 7).unwrap()
    }

    /// Arrange a certain miss on the last life
    fn doom(game: &mut GameState, score: u32) {
        game.score = score;
        game.lives = 1;
        game.disc = Disc::with_wedges(&[PaletteColor::Green], &game.tuning);
        game.pin = Pin::new(PaletteColor::Red, &game.tuning);
    }

    fn play_out(session: &mut Session<MemoryStore>) -> Vec<GameEvent> {
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        for _ in 0..300 {
            events.extend(session.update(SIM_DT, &input).unwrap());
            if matches!(session.screen, Screen::GameOver { .. }) {
                break;
            }
        }
        events
    }

    #[test]
    fn test_session_starts_in_menu_with_loaded_best() {
        let session = session_with_best(90);
        assert!(matches!(session.screen, Screen::Menu));
        assert_eq!(session.best_score(), 90);
        assert_eq!(session.store().writes, 0);
    }

    #[test]
    fn test_beaten_best_written_once_at_game_over() {
        let mut session = session_with_best(20);
        session.start().unwrap();
        doom(session.game_mut().unwrap(), 35);

        let events = play_out(&mut session);
        assert!(events.contains(&GameEvent::GameOver {
            score: 35,
            new_best: true
        }));
        assert!(matches!(
            session.screen,
            Screen::GameOver {
                score: 35,
                best_score: 35
            }
        ));
        assert_eq!(session.store().writes, 1);
        assert_eq!(session.store().contents(), Some(r#"{"best_score":35}"#));

        // Ticking the prompt does not write again
        session.update(SIM_DT, &TickInput::default()).unwrap();
        assert_eq!(session.store().writes, 1);
    }

    #[test]
    fn test_lower_score_leaves_best_untouched() {
        let mut session = session_with_best(500);
        session.start().unwrap();
        doom(session.game_mut().unwrap(), 35);
        play_out(&mut session);
        assert!(matches!(session.screen, Screen::GameOver { .. }));
        assert_eq!(session.store().writes, 0);
        assert_eq!(session.best_score(), 500);
    }

    #[test]
    fn test_retry_or_menu() {
        let mut session = session_with_best(0);
        session.start().unwrap();
        doom(session.game_mut().unwrap(), 0);
        play_out(&mut session);

        session.resolve_game_over(true).unwrap();
        let game = session.game().unwrap();
        assert_eq!(game.level, 1);
        assert_eq!(game.lives, 3);

        doom(session.game_mut().unwrap(), 0);
        play_out(&mut session);
        session.resolve_game_over(false).unwrap();
        assert!(matches!(session.screen, Screen::Menu));
    }

    #[test]
    fn test_quit_mid_game_keeps_beaten_best() {
        let mut session = session_with_best(10);
        session.start().unwrap();
        session.game_mut().unwrap().score = 44;
        session
            .update(
                SIM_DT,
                &TickInput {
                    quit: true,
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(session.is_finished());
        assert_eq!(session.store().contents(), Some(r#"{"best_score":44}"#));
    }

    #[test]
    fn test_game_over_screen_draws_prompt() {
        let mut session = session_with_best(0);
        session.start().unwrap();
        doom(session.game_mut().unwrap(), 12);
        play_out(&mut session);
        let mut list = DrawList::new();
        session.draw(&mut list);
        assert_eq!(list.texts(), vec!["Game over! Try again?", "Score 12  Best 12"]);
    }
}
