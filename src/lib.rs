//! Bosskey core crate.
//!
//! A boss-key overlay for pages with a media player: a translucent shroud
//! covers the surface except for a pointer-following hole whose shape, size,
//! and opacity are driven by pointer and wheel gestures, with a fake
//! "loading" placeholder as disguise. All decision logic (gesture
//! classification, mask state transitions, geometry and style synthesis) is
//! pure Rust and re-exported here so the native test suite can exercise it
//! without a browser.

use wasm_bindgen::prelude::*;

pub mod overlay;

pub use overlay::gesture::{
    Action, PointerInput, SHALLOW_DEPTH, WheelTarget, classify, route_wheel,
    suppresses_context_menu,
};
pub use overlay::geometry::{Rect, exclusion_clip_path};
pub use overlay::placeholder::{disguise_image, percent_escape};
pub use overlay::state::{DEFAULT_OPACITY, MAX_RADIUS, MaskState, OPACITY_STEP, ShroudMode};
pub use overlay::style::{BLUR_PER_OPACITY, FORCED_BLUR_PX, RenderPlan, plan};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Attach the overlay to the current document. Safe to call repeatedly (for
/// example after an in-page navigation): previously registered listeners are
/// disposed before new ones are registered.
#[wasm_bindgen]
pub fn attach_overlay() -> Result<(), JsValue> {
    overlay::attach()
}
