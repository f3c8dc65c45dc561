use std::collections::VecDeque;

use crate::util::finite_or;

pub(in crate::app) const DAMPING: f32 = 0.75;
pub(in crate::app) const SNAP_SPRING: f32 = 0.35;
pub(in crate::app) const MIN_VELOCITY: f32 = 0.003;
pub(in crate::app) const MAX_VELOCITY: f32 = 0.8;
pub(in crate::app) const SNAP_THRESHOLD: f32 = 0.25;
pub(in crate::app) const STUCK_THRESHOLD: f32 = 0.1;
pub(in crate::app) const BASE_SCROLL_SENSITIVITY: f32 = 0.0003;
pub(in crate::app) const PRECISION_SCROLL_SENSITIVITY: f32 = 0.0008;
pub(in crate::app) const VELOCITY_HISTORY_SIZE: usize = 5;
pub(in crate::app) const CONTINUOUS_SCROLL_THRESHOLD: f32 = 0.12;

const SNAP_EPSILON: f32 = 0.01;
const MAX_FRAME_DELTA_MS: f64 = 32.0;
const FRAME_SKIP_DELTA_MS: f64 = 100.0;
const DEFAULT_MIN_LEVEL: f32 = -6.0;
const DEFAULT_MAX_LEVEL: f32 = 6.0;
const SINGLE_LEVEL_RANGE: f32 = 0.1;
const MULTI_LEVEL_BUFFER: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct LevelBounds {
    pub min: f32,
    pub max: f32,
}

impl LevelBounds {
    pub(in crate::app) fn from_reachable_levels(levels: &[i32]) -> Self {
        let Some(&first) = levels.first() else {
            return Self {
                min: DEFAULT_MIN_LEVEL,
                max: DEFAULT_MAX_LEVEL,
            };
        };

        let mut min = first;
        let mut max = first;
        for &level in levels {
            min = min.min(level);
            max = max.max(level);
        }

        if levels.len() == 1 {
            Self {
                min: min as f32 - SINGLE_LEVEL_RANGE,
                max: max as f32 + SINGLE_LEVEL_RANGE,
            }
        } else {
            Self {
                min: min as f32 + MULTI_LEVEL_BUFFER,
                max: max as f32 - MULTI_LEVEL_BUFFER,
            }
        }
    }

    pub(in crate::app) fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

impl Default for LevelBounds {
    fn default() -> Self {
        Self::from_reachable_levels(&[])
    }
}

/// `target_position` is only meaningful while `is_snapping`.
#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) struct ScrollState {
    pub position: f32,
    pub target_position: f32,
    pub velocity: f32,
    pub is_snapping: bool,
    pub has_user_scrolled: bool,
    pub velocity_history: VecDeque<f32>,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            position: 0.0,
            target_position: 0.0,
            velocity: 0.0,
            is_snapping: false,
            has_user_scrolled: false,
            velocity_history: VecDeque::with_capacity(VELOCITY_HISTORY_SIZE),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) enum ScrollCommand {
    Step {
        frame_multiplier: f32,
        bounds: LevelBounds,
    },
    SetVelocity {
        velocity: f32,
        record_sample: bool,
    },
    MarkUserScrolled,
    InterruptSnap,
    JumpToLevel {
        level: i32,
        bounds: LevelBounds,
    },
    Reset,
}

pub(in crate::app) fn apply(state: &ScrollState, command: ScrollCommand) -> ScrollState {
    match command {
        ScrollCommand::Step {
            frame_multiplier,
            bounds,
        } => step(state, frame_multiplier, bounds),
        ScrollCommand::SetVelocity {
            velocity,
            record_sample,
        } => {
            let mut next = state.clone();
            next.velocity = velocity;
            if record_sample {
                next.velocity_history.push_back(velocity.abs());
                while next.velocity_history.len() > VELOCITY_HISTORY_SIZE {
                    next.velocity_history.pop_front();
                }
            }
            next
        }
        ScrollCommand::MarkUserScrolled => {
            let mut next = state.clone();
            next.has_user_scrolled = true;
            next
        }
        ScrollCommand::InterruptSnap => {
            let mut next = state.clone();
            next.is_snapping = false;
            next
        }
        ScrollCommand::JumpToLevel { level, bounds } => {
            let mut next = state.clone();
            // Position is left alone so the spring animates the move.
            next.target_position = bounds.clamp(level as f32);
            next.is_snapping = true;
            next.velocity = 0.0;
            next.has_user_scrolled = true;
            next
        }
        ScrollCommand::Reset => ScrollState::default(),
    }
}

fn step(state: &ScrollState, frame_multiplier: f32, bounds: LevelBounds) -> ScrollState {
    let damped_velocity = state.velocity * DAMPING.powf(frame_multiplier);

    let mut next = state.clone();
    next.velocity = damped_velocity;

    if state.is_snapping {
        let remaining = state.target_position - state.position;
        if remaining.abs() < SNAP_EPSILON {
            next.position = state.target_position;
            next.is_snapping = false;
            next.velocity = 0.0;
        } else {
            next.position = state.position + remaining * SNAP_SPRING * frame_multiplier;
        }
        return next;
    }

    next.position = bounds.clamp(state.position + damped_velocity * frame_multiplier);

    if damped_velocity.abs() < MIN_VELOCITY && state.has_user_scrolled {
        next.is_snapping = true;
        next.velocity = 0.0;
        // Direction comes from the pre-damping velocity.
        next.target_position = bounds.clamp(choose_snap_target(next.position, state.velocity));
    }

    next
}

// Stuck check runs before the wider close check; past both, the
// direction of travel decides.
fn choose_snap_target(position: f32, velocity: f32) -> f32 {
    let floor = position.floor();
    let ceil = position.ceil();
    if floor == ceil {
        return floor;
    }

    let dist_to_floor = position - floor;
    let dist_to_ceil = ceil - position;

    if dist_to_floor < STUCK_THRESHOLD {
        floor
    } else if dist_to_ceil < STUCK_THRESHOLD {
        ceil
    } else if dist_to_floor < SNAP_THRESHOLD {
        floor
    } else if dist_to_ceil < SNAP_THRESHOLD {
        ceil
    } else if velocity > 0.0 {
        ceil
    } else if velocity < 0.0 {
        floor
    } else {
        position.round()
    }
}

fn wheel_boost(abs_delta: f32) -> f32 {
    if abs_delta < 10.0 {
        2.5
    } else if abs_delta < 25.0 {
        1.8
    } else if abs_delta < 50.0 {
        1.2
    } else {
        1.0
    }
}

#[derive(Clone, Debug)]
pub(in crate::app) struct ScrollEngine {
    state: ScrollState,
    bounds: LevelBounds,
    last_frame_ms: f64,
    running: bool,
}

impl ScrollEngine {
    pub(in crate::app) fn new() -> Self {
        Self {
            state: ScrollState::default(),
            bounds: LevelBounds::default(),
            last_frame_ms: 0.0,
            running: false,
        }
    }

    pub(in crate::app) fn reset(&mut self) {
        self.state = apply(&self.state, ScrollCommand::Reset);
        self.running = false;
    }

    pub(in crate::app) fn set_bounds(&mut self, bounds: LevelBounds) {
        self.bounds = bounds;
    }

    pub(in crate::app) fn state(&self) -> &ScrollState {
        &self.state
    }

    pub(in crate::app) fn position(&self) -> f32 {
        finite_or(self.state.position, 0.0)
    }

    pub(in crate::app) fn is_running(&self) -> bool {
        self.running
    }

    // Stamps the clock so the first frame does not integrate the idle gap.
    pub(in crate::app) fn arm(&mut self, now_ms: f64) {
        if !self.running {
            self.running = true;
            self.last_frame_ms = now_ms;
        }
    }

    pub(in crate::app) fn on_wheel(&mut self, delta_y: f32, now_ms: f64) {
        self.state = apply(&self.state, ScrollCommand::MarkUserScrolled);
        self.state = apply(&self.state, ScrollCommand::InterruptSnap);

        let sensitivity = self.adaptive_sensitivity();
        let boost = wheel_boost(delta_y.abs());
        let velocity = (self.state.velocity + delta_y * sensitivity * boost)
            .clamp(-MAX_VELOCITY, MAX_VELOCITY);

        self.state = apply(
            &self.state,
            ScrollCommand::SetVelocity {
                velocity,
                record_sample: true,
            },
        );
        self.arm(now_ms);
    }

    fn adaptive_sensitivity(&self) -> f32 {
        let history = &self.state.velocity_history;
        let recent = history.len().min(3);
        if recent >= 2 {
            let sum: f32 = history.iter().rev().take(recent).sum();
            if sum / recent as f32 > CONTINUOUS_SCROLL_THRESHOLD {
                return BASE_SCROLL_SENSITIVITY;
            }
        }
        PRECISION_SCROLL_SENSITIVITY
    }

    pub(in crate::app) fn jump_to_level(&mut self, level: i32, now_ms: f64) {
        self.state = apply(
            &self.state,
            ScrollCommand::JumpToLevel {
                level,
                bounds: self.bounds,
            },
        );
        self.arm(now_ms);
    }

    pub(in crate::app) fn tick(&mut self, now_ms: f64) -> bool {
        if !self.running {
            return false;
        }

        let raw_delta = now_ms - self.last_frame_ms;
        self.last_frame_ms = now_ms;

        // A backgrounded window hands us a huge delta; skip that frame.
        if raw_delta > FRAME_SKIP_DELTA_MS {
            return true;
        }

        let delta_ms = raw_delta.clamp(0.0, MAX_FRAME_DELTA_MS);
        let frame_multiplier = (delta_ms / 1000.0 * 60.0) as f32;

        self.state = apply(
            &self.state,
            ScrollCommand::Step {
                frame_multiplier,
                bounds: self.bounds,
            },
        );

        self.running = self.state.velocity.abs() > MIN_VELOCITY || self.state.is_snapping;
        self.running
    }

    pub(in crate::app) fn focus_scale(&self) -> f32 {
        let distance = self.position().abs();
        let scale = if distance == 0.0 {
            1.0
        } else if distance < 1.0 {
            1.0 - distance * 0.3
        } else {
            (0.7 - (distance - 1.0) * 0.15).max(0.4)
        };
        finite_or(scale, 1.0)
    }
}
