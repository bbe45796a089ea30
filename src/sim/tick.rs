//! Per-frame simulation step
//!
//! Order within one tick: pause handling, firing, replacing a pin that left
//! the screen, then collision resolution and motion in sweep steps.

use glam::Vec2;

use super::disc::DiscMember;
use super::pin::PinMode;
use super::state::{GameEvent, GamePhase, GameState, MissCause};
use crate::consts::REST_ANGLE;
use crate::error::GenerationError;
use crate::{angular_distance, normalize_angle};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Launch the resting pin (space or a click off the pause button)
    pub fire: bool,
    /// Pause button clicked
    pub toggle_pause: bool,
    /// Last known pointer position, for hover
    pub pointer: Option<Vec2>,
    /// Window closed; handled by the session, ignored by the tick
    pub quit: bool,
    /// Demo mode: fire automatically when the shot looks safe
    pub autoplay: bool,
}

/// Advance the game by `dt` seconds. Returns true once the game is over.
///
/// Game over is reported on the same call that takes the last life.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Result<bool, GenerationError> {
    if state.is_game_over() {
        return Ok(true);
    }

    if input.toggle_pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            _ => GamePhase::Playing,
        };
        state.hud.set_paused(state.phase == GamePhase::Paused);
        log::debug!("Pause toggled: {:?}", state.phase);
    }
    state.hud.pause.update_hover(input.pointer);
    if state.phase == GamePhase::Paused {
        return Ok(false);
    }

    if input.fire || (input.autoplay && autoplay_wants_fire(state)) {
        state.fire();
    }

    // A pin that fell or flew off screen is replaced before anything collides
    let floor = state.tuning.play_area.y;
    if state.pin.top() >= floor || state.pin.bottom() <= 0.0 {
        state.next_pin()?;
    }

    // A flying pin is swept in steps of at most half its length so a long
    // frame cannot carry it through an obstacle
    let steps = sweep_steps(state, dt);
    let step_dt = dt / steps as f32;
    for _ in 0..steps {
        if state.lives > 0 && state.pin.mode == PinMode::Shoot {
            let needle = state.pin.needle(state.tuning.pin_hit_half_width);
            if let Some(index) = state.disc.first_hit(&needle) {
                resolve_hit(state, index)?;
            }
        }
        // A stick can start the next level mid-sweep
        let settings = state.settings();
        state.pin.update(step_dt, &settings);
        state.disc.update(step_dt, &settings);
    }
    state.hud.sync(state.score, state.lives);

    if state.lives == 0 {
        state.finish();
        return Ok(true);
    }
    Ok(false)
}

/// Upper bound on sweep steps in one tick
const MAX_SWEEP_STEPS: u32 = 256;

/// Motion steps needed this tick; one unless a shooting pin would travel
/// more than half its length
fn sweep_steps(state: &GameState, dt: f32) -> u32 {
    if state.pin.mode != PinMode::Shoot || dt <= 0.0 {
        return 1;
    }
    let reach = state.pin.mount.size.y / 2.0;
    let travel = state.settings().shoot_speed * dt;
    if reach <= 0.0 || !travel.is_finite() {
        return 1;
    }
    ((travel / reach).ceil() as u32).clamp(1, MAX_SWEEP_STEPS)
}

enum Outcome {
    Stick,
    Miss(MissCause),
    Collect,
}

/// Apply the effect of the flying pin touching disc member `index`
fn resolve_hit(state: &mut GameState, index: usize) -> Result<(), GenerationError> {
    let color = state.pin.color();
    let outcome = match &state.disc.members()[index] {
        DiscMember::Wedge(w) if w.color == color => Outcome::Stick,
        DiscMember::Wedge(w) => Outcome::Miss(MissCause::WrongColor { wedge: w.color }),
        DiscMember::Obstacle(_) => Outcome::Miss(MissCause::Obstacle),
        DiscMember::Pin(_) => Outcome::Miss(MissCause::EmbeddedPin),
        DiscMember::Bonus(_) => Outcome::Collect,
    };

    match outcome {
        Outcome::Stick => {
            state.disc.add(state.pin.clone());
            let points = state.roll_prick_points();
            state.score += points;
            state.events.push(GameEvent::PinStuck { color, points });
            state.next_pin()?;
        }
        Outcome::Miss(cause) => {
            state.pin.mode = PinMode::Drop;
            state.lose_life();
            log::debug!("{} pin missed: {:?}, {} lives left", color.as_str(), cause, state.lives);
            state.events.push(GameEvent::PinMissed { color, cause });
        }
        Outcome::Collect => {
            // The pin keeps flying
            if let Some(bonus) = state.disc.take_bonus(index) {
                state.apply_reward(bonus.reward);
                state.events.push(GameEvent::BonusCollected {
                    kind: bonus.kind,
                    reward: bonus.reward,
                });
            }
        }
    }
    Ok(())
}

/// Fire when the wedge that will be under the pin on impact matches its
/// color and nothing blocking sits near that spot
fn autoplay_wants_fire(state: &GameState) -> bool {
    if state.pin.mode != PinMode::Still {
        return false;
    }
    let settings = state.settings();
    let tip = state.pin.needle(0.0).tip;
    let rim = state.disc.center.y + state.disc.radius;
    let travel = (tip.y - rim).max(0.0) / settings.shoot_speed;
    let target = normalize_angle(REST_ANGLE - settings.rotation_speed * travel);

    let clearance = state.tuning.min_gap / 2.0;
    let blocked = state.disc.iter().any(|m| match m {
        DiscMember::Obstacle(o) => angular_distance(o.mount.screen_angle(), target) < clearance,
        DiscMember::Pin(p) => angular_distance(p.mount.screen_angle(), target) < clearance,
        DiscMember::Wedge(_) | DiscMember::Bonus(_) => false,
    });
    let color = state.pin.color();
    let on_color = state
        .disc
        .wedges()
        .any(|w| w.color == color && normalize_angle(target - w.current_start()) < w.span);
    on_color && !blocked
}
