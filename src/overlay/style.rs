//! Derivation of concrete render parameters from `MaskState`.
//!
//! The projector consumes a tagged `RenderPlan` rather than the raw flags so
//! that impossible combinations (disabled + shroud style, forced + user
//! opacity) never reach the DOM layer.

use super::state::{MaskState, ShroudMode};

/// Blur applied while the pointer is off-surface.
pub const FORCED_BLUR_PX: f64 = 10.0;
/// Blur scales with shroud opacity in normal rendering.
pub const BLUR_PER_OPACITY: f64 = 10.2;

#[derive(Clone, Debug, PartialEq)]
pub enum RenderPlan {
    /// Disabled view: marker class only, every overlay variable cleared.
    Normal,
    Shrouded {
        mode: ShroudMode,
        radius_px: f64,
        /// CSS color for the shroud background, alpha included.
        background: String,
        blur_px: f64,
    },
}

/// Resolve the state into render parameters. The forced override renders a
/// closed, opaque, Shade-shaped shroud regardless of `mode`, without the
/// underlying radius/opacity ever changing.
pub fn plan(state: &MaskState) -> RenderPlan {
    if state.disabled {
        return RenderPlan::Normal;
    }
    if state.forced {
        return RenderPlan::Shrouded {
            mode: ShroudMode::Shade,
            radius_px: 0.0,
            background: "#fff".to_owned(),
            blur_px: FORCED_BLUR_PX,
        };
    }
    RenderPlan::Shrouded {
        mode: state.mode,
        radius_px: state.radius,
        background: format!("rgba(255,255,255,{})", state.opacity),
        blur_px: BLUR_PER_OPACITY * state.opacity,
    }
}
