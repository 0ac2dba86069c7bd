//! Pointer gesture classification.
//!
//! Pure functions mapping raw pointer/wheel input plus a hit-test depth to a
//! semantic action. Nothing here touches the DOM, so the whole module is
//! exercised by the native test suite.

/// Hit-test depth (count of stacked elements under the pointer) at or below
/// which a click is treated as landing on open page background rather than
/// dense content. Layout-dependent; tune per host page.
pub const SHALLOW_DEPTH: usize = 3;

// `buttons` bitmask values for the two gestures we react to. Anything else
// (chords, middle button, no button) falls through to reset/resume handling.
const PRIMARY_ONLY: u16 = 1;
const SECONDARY_ONLY: u16 = 2;

/// Raw pointer-button state at event time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerInput {
    pub buttons: u16,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// Semantic action produced by classification; consumed immediately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    CycleNext,
    CyclePrev,
    Reset,
    ResumeNormal,
}

/// Classify a pointer-down (or context-menu) event.
///
/// Rules, in order:
/// 1. Neither primary-only nor secondary-only pressed: `ResumeNormal` with
///    Alt held, `Reset` otherwise.
/// 2. Shrouding disabled: inert.
/// 3. Ctrl held, or the pointer is over shallow page chrome: primary cycles
///    forward (Shift reverses), secondary cycles backward (Shift reverses).
pub fn classify(input: PointerInput, depth: usize, disabled: bool) -> Action {
    if input.buttons != PRIMARY_ONLY && input.buttons != SECONDARY_ONLY {
        return if input.alt { Action::ResumeNormal } else { Action::Reset };
    }
    if disabled {
        return Action::None;
    }
    if input.ctrl || depth <= SHALLOW_DEPTH {
        return match input.buttons {
            PRIMARY_ONLY => if input.shift { Action::CyclePrev } else { Action::CycleNext },
            _ => if input.shift { Action::CycleNext } else { Action::CyclePrev },
        };
    }
    Action::None
}

/// Context-menu suppression shares the classifier: any non-inert outcome
/// means the gesture layer owns the event.
pub fn suppresses_context_menu(input: PointerInput, depth: usize, disabled: bool) -> bool {
    classify(input, depth, disabled) != Action::None
}

/// Which mask parameter a wheel event adjusts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelTarget {
    Radius,
    Opacity,
    Ignore,
}

/// Route a wheel event: Alt (or a shallow hit in the left third of the
/// surface) drives the hole radius; Ctrl (or a shallow hit in the right
/// third) drives the shroud opacity. Everything else scrolls the page.
pub fn route_wheel(alt: bool, ctrl: bool, depth: usize, x: f64, surface_width: f64) -> WheelTarget {
    if alt || (depth <= SHALLOW_DEPTH && x < surface_width / 3.0) {
        WheelTarget::Radius
    } else if ctrl || (depth <= SHALLOW_DEPTH && x > surface_width * 2.0 / 3.0) {
        WheelTarget::Opacity
    } else {
        WheelTarget::Ignore
    }
}
