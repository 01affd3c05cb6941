//! # Input State
//!
//! Per-frame player input as reported by the host, and the edge-tracked view
//! of it the game logic consumes.
//!
//! The host (browser UI, native window, test harness) fills a [`PlayerInput`]
//! of plain booleans every frame. An [`InputTracker`] compares it with the
//! previous frame and produces a [`ProcessedInput`] where every action is a
//! [`RawInputState`], so one-shot actions (placing a block, starting a swing)
//! fire on the press edge only.

use serde::{Deserialize, Serialize};

/// Represents the state of a key or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawInputState {
    /// Key/button is not pressed
    #[default]
    NotPressed,
    /// Key/button was just pressed this frame
    Pressed,
    /// Key/button has been held down for multiple frames
    Held,
    /// Key/button was just released this frame
    Released,
}

impl RawInputState {
    /// Determines if the input is actively down (either pressed or held)
    pub fn is_active(&self) -> bool {
        matches!(self, RawInputState::Pressed | RawInputState::Held)
    }

    /// Determines if the input was just pressed this frame
    pub fn is_just_pressed(&self) -> bool {
        matches!(self, RawInputState::Pressed)
    }

    /// Determines if the input was just released this frame
    pub fn is_just_released(&self) -> bool {
        matches!(self, RawInputState::Released)
    }

    /// Derives the state from the previous and current raw states
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => RawInputState::Pressed,
            (true, true) => RawInputState::Held,
            (true, false) => RawInputState::Released,
            (false, false) => RawInputState::NotPressed,
        }
    }
}

/// Raw input for one frame, as reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub run: bool,
    pub crouch: bool,
    pub mine: bool,
    pub place: bool,
    /// Look delta accumulated since the last frame (x, y).
    pub look_delta: (f32, f32),
    /// Hotbar slot pressed this frame, 1-based.
    pub slot: Option<u8>,
}

/// A snapshot of the frame's actions with press/release transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProcessedInput {
    pub forward: RawInputState,
    pub backward: RawInputState,
    pub left: RawInputState,
    pub right: RawInputState,
    pub jump: RawInputState,
    pub run: RawInputState,
    pub crouch: RawInputState,
    pub mine: RawInputState,
    pub place: RawInputState,
    pub look_delta: (f32, f32),
    pub slot: Option<u8>,
}

impl ProcessedInput {
    /// Movement axes as `(forward, right)`, each in `{-1, 0, 1}`.
    pub fn movement_axes(&self) -> (f32, f32) {
        fn axis(positive: RawInputState, negative: RawInputState) -> f32 {
            (positive.is_active() as i8 - negative.is_active() as i8) as f32
        }
        (
            axis(self.forward, self.backward),
            axis(self.right, self.left),
        )
    }
}

/// Remembers the previous frame's input to derive transitions.
#[derive(Debug, Default)]
pub struct InputTracker {
    previous: PlayerInput,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produces this frame's processed input and remembers `current`.
    pub fn process(&mut self, current: &PlayerInput) -> ProcessedInput {
        let prev = self.previous;
        let state = RawInputState::from_raw_states;
        let processed = ProcessedInput {
            forward: state(prev.forward, current.forward),
            backward: state(prev.backward, current.backward),
            left: state(prev.left, current.left),
            right: state(prev.right, current.right),
            jump: state(prev.jump, current.jump),
            run: state(prev.run, current.run),
            crouch: state(prev.crouch, current.crouch),
            mine: state(prev.mine, current.mine),
            place: state(prev.place, current.place),
            look_delta: current.look_delta,
            slot: current.slot,
        };
        self.previous = *current;
        processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_follow_previous_frame() {
        assert_eq!(RawInputState::from_raw_states(false, true), RawInputState::Pressed);
        assert_eq!(RawInputState::from_raw_states(true, true), RawInputState::Held);
        assert_eq!(RawInputState::from_raw_states(true, false), RawInputState::Released);
        assert_eq!(RawInputState::from_raw_states(false, false), RawInputState::NotPressed);
    }

    #[test]
    fn place_fires_once_per_press() {
        let mut tracker = InputTracker::new();
        let held = PlayerInput {
            place: true,
            ..Default::default()
        };
        assert!(tracker.process(&held).place.is_just_pressed());
        let second = tracker.process(&held);
        assert!(!second.place.is_just_pressed());
        assert!(second.place.is_active());
        assert!(tracker
            .process(&PlayerInput::default())
            .place
            .is_just_released());
    }

    #[test]
    fn opposite_directions_cancel() {
        let mut tracker = InputTracker::new();
        let input = PlayerInput {
            forward: true,
            backward: true,
            left: true,
            ..Default::default()
        };
        assert_eq!(tracker.process(&input).movement_axes(), (0.0, -1.0));
    }
}
