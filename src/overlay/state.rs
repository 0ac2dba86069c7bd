//! The authoritative mask state model and its transition rules.
//!
//! A single `MaskState` lives for the whole page session, confined to the
//! browser main thread. All transitions are synchronous in-place mutations;
//! the renderer reads the state after each one.

use super::gesture::Action;

pub const MAX_RADIUS: f64 = 500.0;
pub const DEFAULT_RADIUS: f64 = 0.0;
pub const DEFAULT_OPACITY: f64 = 0.98;
/// Opacity moves in fixed ticks; only the wheel delta's sign matters.
pub const OPACITY_STEP: f64 = 0.02;

/// Occlusion shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShroudMode {
    /// Soft-edged circular reveal only.
    #[default]
    Shade,
    /// Reveal plus a hard exclusion of the player's rectangle.
    Clip,
}

impl ShroudMode {
    /// Step through the mode ring; period 2, so +1 and -1 coincide, but the
    /// arithmetic keeps working if a mode is ever added.
    pub fn cycled(self, step: i32) -> ShroudMode {
        let idx = match self {
            ShroudMode::Shade => 0,
            ShroudMode::Clip => 1,
        };
        match (idx + step).rem_euclid(2) {
            0 => ShroudMode::Shade,
            _ => ShroudMode::Clip,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskState {
    pub mode: ShroudMode,
    /// Hole radius in surface px, clamped to [0, MAX_RADIUS]. 0 renders a
    /// fully closed shroud.
    pub radius: f64,
    /// Shroud translucency in [0, 1].
    pub opacity: f64,
    /// Pointer is outside the surface; render fixed defaults without
    /// touching `radius`/`opacity`.
    pub forced: bool,
    /// "Normal" view: nothing rendered, gestures inert apart from the ones
    /// that re-enable shrouding.
    pub disabled: bool,
}

impl Default for MaskState {
    fn default() -> Self {
        Self {
            mode: ShroudMode::Shade,
            radius: DEFAULT_RADIUS,
            opacity: DEFAULT_OPACITY,
            forced: false,
            disabled: false,
        }
    }
}

impl MaskState {
    /// Apply a classified gesture action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::CycleNext => self.cycle(1),
            Action::CyclePrev => self.cycle(-1),
            Action::Reset => self.reset(),
            Action::ResumeNormal => self.resume_normal(),
        }
    }

    /// Back to defaults and re-enable shrouding.
    pub fn reset(&mut self) {
        self.mode = ShroudMode::Shade;
        self.radius = DEFAULT_RADIUS;
        self.opacity = DEFAULT_OPACITY;
        self.disabled = false;
    }

    /// Cycle the occlusion shape. Also leaves the disabled view, so cycling
    /// is a one-gesture way back into the shroud.
    pub fn cycle(&mut self, step: i32) {
        self.mode = self.mode.cycled(step);
        self.disabled = false;
    }

    pub fn resume_normal(&mut self) {
        self.disabled = true;
    }

    /// Wheel-driven radius change: raw delta magnitude, clamped post-add.
    pub fn adjust_radius(&mut self, delta: f64) {
        self.radius = (self.radius + delta).clamp(0.0, MAX_RADIUS);
    }

    /// Wheel-driven opacity change: one fixed tick per event, sign only.
    pub fn step_opacity(&mut self, delta: f64) {
        let step = if delta > 0.0 {
            OPACITY_STEP
        } else if delta < 0.0 {
            -OPACITY_STEP
        } else {
            0.0
        };
        self.opacity = (self.opacity + step).clamp(0.0, 1.0);
    }

    pub fn set_forced(&mut self, forced: bool) {
        self.forced = forced;
    }

    /// Whether the shroud currently has a visible hole worth tracking the
    /// pointer for.
    pub fn revealing(&self) -> bool {
        self.opacity > 0.0 && self.radius > 0.0
    }
}
