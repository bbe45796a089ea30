//! Game state and the events it reports
//!
//! Everything one game needs between ticks lives here, including its RNG,
//! so a seed fully determines a run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::disc::Disc;
use super::entities::{BonusKind, Reward};
use super::level::LevelGenerator;
use super::pin::Pin;
use crate::error::GenerationError;
use crate::render::{Drawable, RenderSurface};
use crate::tuning::{LevelSettings, PaletteColor, Tuning};
use crate::ui::Hud;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// Only the pause button reacts
    Paused,
    /// Lives exhausted; the owner decides between retry and menu
    GameOver,
}

/// Why a pin failed to stick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissCause {
    WrongColor { wedge: PaletteColor },
    Obstacle,
    EmbeddedPin,
}

/// Something that happened during a tick, drained by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    LevelStarted { level: u32, pins: usize },
    PinFired { color: PaletteColor },
    PinStuck { color: PaletteColor, points: u32 },
    PinMissed { color: PaletteColor, cause: MissCause },
    BonusCollected { kind: BonusKind, reward: Reward },
    GameOver { score: u32, new_best: bool },
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    generator: LevelGenerator,
    /// Current level, starting at 1
    pub level: u32,
    pub lives: u8,
    pub score: u32,
    /// Best score known when the game started, raised at game over
    pub best_score: u32,
    pub phase: GamePhase,
    /// The active pin (resting, flying or falling)
    pub pin: Pin,
    pub disc: Disc,
    /// Colors still to be loaded this level; the last entry comes next
    pub queue: Vec<PaletteColor>,
    pub hud: Hud,
    pub events: Vec<GameEvent>,
    /// Best score loaded at start, used to decide whether it was beaten
    loaded_best: u32,
}

impl GameState {
    /// Start a game at level 1
    pub fn new(tuning: Tuning, seed: u64, best_score: u32) -> Result<Self, GenerationError> {
        let generator = LevelGenerator::new(&tuning)?;
        let hud = Hud::new(&tuning.hud, tuning.starting_lives, best_score);
        let mut state = Self {
            pin: Pin::new(PaletteColor::Red, &tuning),
            disc: Disc::new(&tuning),
            lives: tuning.starting_lives,
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            generator,
            level: 1,
            score: 0,
            best_score,
            phase: GamePhase::Playing,
            queue: Vec::new(),
            hud,
            events: Vec::new(),
            loaded_best: best_score,
        };
        state.start_level()?;
        Ok(state)
    }

    /// Speeds for the current level
    pub fn settings(&self) -> LevelSettings {
        self.tuning.level_settings(self.level)
    }

    /// Generate the color sequence and disc for `self.level` and load its first pin
    pub fn start_level(&mut self) -> Result<(), GenerationError> {
        let mut sequence = self.generator.ordered_colors(&mut self.rng, self.level)?;
        self.disc = Disc::for_level(&sequence, self.level, &self.tuning, &mut self.rng)?;
        self.hud.bullets.reset(&sequence);

        let pins = sequence.len();
        let first = sequence.pop().ok_or(GenerationError::InvalidPartition {
            parts: 0,
            total: 0,
        })?;
        self.pin = Pin::new(first, &self.tuning);
        self.queue = sequence;

        log::info!("Level {} started with {} pins", self.level, pins);
        self.events.push(GameEvent::LevelStarted {
            level: self.level,
            pins,
        });
        Ok(())
    }

    /// Load the next queued pin, or move on to a fresh level when none remain
    pub fn next_pin(&mut self) -> Result<(), GenerationError> {
        match self.queue.pop() {
            Some(color) => {
                self.pin = Pin::new(color, &self.tuning);
                Ok(())
            }
            None => {
                self.level += 1;
                self.start_level()
            }
        }
    }

    /// Launch the resting pin. Returns false if it is already moving.
    pub fn fire(&mut self) -> bool {
        if self.phase != GamePhase::Playing || !self.pin.fire() {
            return false;
        }
        self.hud.bullets.pop();
        self.events.push(GameEvent::PinFired {
            color: self.pin.color(),
        });
        true
    }

    /// Random score for a correctly placed pin
    pub(crate) fn roll_prick_points(&mut self) -> u32 {
        self.rng
            .random_range(self.tuning.prick_score_min..=self.tuning.prick_score_max)
    }

    pub fn apply_reward(&mut self, reward: Reward) {
        match reward {
            Reward::GrantLife => self.lives = (self.lives + 1).min(self.tuning.max_lives),
            Reward::GrantScore(points) => self.score += points,
        }
    }

    /// Lose one life; returns true if none remain
    pub(crate) fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    /// Enter game over, raising the best score if it was beaten
    pub(crate) fn finish(&mut self) {
        self.phase = GamePhase::GameOver;
        let new_best = self.score > self.loaded_best;
        if new_best {
            self.best_score = self.score;
        }
        log::info!(
            "Game over at level {} with score {} (best {})",
            self.level,
            self.score,
            self.best_score
        );
        self.events.push(GameEvent::GameOver {
            score: self.score,
            new_best,
        });
    }

    /// True if this game beat the best score it started with
    pub fn beat_best(&self) -> bool {
        self.score > self.loaded_best
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Components in draw order: disc first, HUD last
    pub fn drawables(&self) -> [&dyn Drawable; 7] {
        [
            &self.disc,
            &self.pin,
            &self.hud.bullets,
            &self.hud.lives,
            &self.hud.score,
            &self.hud.best,
            &self.hud.pause,
        ]
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        for drawable in self.drawables() {
            drawable.draw(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, DrawList};
    use crate::sim::pin::PinMode;

    #[test]
    fn test_new_game_starts_level_one() {
        let state = GameState::new(Tuning::default(), 42, 0).unwrap();
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.pin.mode, PinMode::Still);
        // Bullets show the active pin plus the queue
        assert_eq!(state.hud.bullets.len(), state.queue.len() + 1);
        assert_eq!(
            state.events,
            vec![GameEvent::LevelStarted {
                level: 1,
                pins: state.queue.len() + 1
            }]
        );
    }

    #[test]
    fn test_first_pin_is_last_of_sequence() {
        let state = GameState::new(Tuning::default(), 5, 0).unwrap();
        let shown = state.hud.bullets.colors();
        assert_eq!(shown.last().copied(), Some(state.pin.color()));
    }

    #[test]
    fn test_fire_pops_bullet_once() {
        let mut state = GameState::new(Tuning::default(), 9, 0).unwrap();
        let before = state.hud.bullets.len();
        assert!(state.fire());
        assert!(!state.fire());
        assert_eq!(state.hud.bullets.len(), before - 1);
        assert_eq!(state.pin.mode, PinMode::Shoot);
    }

    #[test]
    fn test_next_pin_advances_level_when_queue_empty() {
        let mut state = GameState::new(Tuning::default(), 11, 0).unwrap();
        state.queue.clear();
        state.next_pin().unwrap();
        assert_eq!(state.level, 2);
        assert!(!state.hud.bullets.is_empty());
    }

    #[test]
    fn test_life_reward_is_capped() {
        let mut state = GameState::new(Tuning::default(), 1, 0).unwrap();
        for _ in 0..10 {
            state.apply_reward(Reward::GrantLife);
        }
        assert_eq!(state.lives, state.tuning.max_lives);
        state.apply_reward(Reward::GrantScore(25));
        assert_eq!(state.score, 25);
    }

    #[test]
    fn test_finish_only_raises_beaten_best() {
        let mut state = GameState::new(Tuning::default(), 1, 50).unwrap();
        state.score = 30;
        state.finish();
        assert_eq!(state.best_score, 50);
        assert!(!state.beat_best());

        let mut state = GameState::new(Tuning::default(), 1, 50).unwrap();
        state.score = 80;
        state.finish();
        assert_eq!(state.best_score, 80);
        assert!(state.drain_events().contains(&GameEvent::GameOver {
            score: 80,
            new_best: true
        }));
    }

    #[test]
    fn test_draw_puts_disc_before_hud() {
        let state = GameState::new(Tuning::default(), 3, 0).unwrap();
        let mut list = DrawList::new();
        state.draw(&mut list);
        let last_sector = list
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Sector { .. }))
            .unwrap();
        let first_text = list
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Text { .. }))
            .unwrap();
        assert!(last_sector < first_text);
        assert_eq!(list.texts(), vec!["0", "Best 0"]);
    }
}
