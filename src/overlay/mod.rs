//! Boss-key occlusion overlay.
//!
//! The overlay shrouds the page behind a translucent layer with a
//! pointer-following hole. This module is the DOM glue: it injects the style
//! sheet, wires input events through the pure gesture/state/geometry layers,
//! and projects the resulting `RenderPlan` onto the surface root's style
//! variables and marker classes. Everything with decision logic lives in the
//! submodules, which never touch the DOM and run under native `cargo test`.
//!
//! Failure policy is fail-soft and scoped: every DOM operation here returns
//! `Result` and the event closures drop the error, so the overlay can never
//! break the underlying page. Only our own operations are swallowed; we do
//! not install a global error sink.

pub mod gesture;
pub mod geometry;
pub mod placeholder;
pub mod state;
pub mod style;

use std::cell::RefCell;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlElement, MouseEvent, PointerEvent, WheelEvent, window};

use gesture::{Action, PointerInput, WheelTarget};
use state::{MaskState, ShroudMode};
use style::RenderPlan;

const STYLE_ID: &str = "bosskey-style";
/// The media player whose rectangle Clip mode carves out.
const PLAYER_SELECTOR: &str = "#html5video";
/// The player's control strip swallows pointer events, so it gets its own
/// pointer-move listener.
const PROGRESS_BAR_SELECTOR: &str = ".progress-bar";

// Marker classes on the surface root. "shade-mode"/"clip-mode" are mutually
// exclusive; both are absent while "disabled" is set.
const CLASS_DISABLED: &str = "disabled";
const CLASS_SHADE: &str = "shade-mode";
const CLASS_CLIP: &str = "clip-mode";

// Style variables the projector writes. Defaults in the injected sheet keep
// the hole parked far off-surface until the first pointer sample arrives.
const VAR_HOLE_X: &str = "--hole-x";
const VAR_HOLE_Y: &str = "--hole-y";
const VAR_HOLE_SIZE: &str = "--hole-size";
const VAR_SHROUD_BG: &str = "--shroud-bg";
const VAR_SHROUD_FILTER: &str = "--shroud-filter";
const VAR_CLIP_REGION: &str = "--clip-region";
const VAR_DISGUISE: &str = "--disguise";

const GLOBAL_STYLE: &str = "
    body:not(.disabled) { --shroud-bg: rgba(255,255,255,0.98); --hole-x: -500%; --hole-y: -500%; --hole-size: 0px; --disguise: \"\"; --shroud-filter: blur(10px); }
    body:not(.disabled)::after { content: var(--disguise); display: block; position: fixed; top: 0; left: 0; width: 100%; height: 100%; background: var(--shroud-bg); z-index: 99999999; pointer-events: none; overflow: hidden; mask-image: radial-gradient(circle var(--hole-size) at var(--hole-x) var(--hole-y), #ffffff00 10%, #ffffffff 100%); mask-repeat: no-repeat; mask-composite: exclude; backdrop-filter: var(--shroud-filter); transition: all 0.2s; }
    body.clip-mode::after { clip-path: var(--clip-region); }
    body.clip-mode #html5video { filter: contrast(50%) opacity(50%); }
    body:not(.disabled) img { user-drag: none; -webkit-user-drag: none; }
    body:not(.disabled) #fake-loading { width: 100%; height: 100%; display: flex; justify-content: center; align-items: center; }
    body:not(.disabled) #fake-loading::after { content: \"Loading\"; display: block; font-size: 20px; color: #398; }
";

thread_local! {
    // Single MaskState for the page session. Main-thread confinement is the
    // whole lock discipline; no handler ever suspends mid-mutation.
    static STATE: RefCell<MaskState> = RefCell::new(MaskState::default());
    // Registry of live subscriptions. Dropping an EventListener detaches it,
    // so draining the vec is the dispose-all step of re-attachment.
    static LISTENERS: RefCell<Vec<EventListener>> = const { RefCell::new(Vec::new()) };
}

/// Attach (or re-attach) the overlay to the current document. Idempotent:
/// every previously registered listener is dropped and the injected style
/// sheet replaced before anything new is wired up, so calling this again
/// after an in-page navigation never duplicates handlers.
pub fn attach() -> Result<(), JsValue> {
    LISTENERS.with(|l| l.borrow_mut().clear());
    STATE.with(|s| *s.borrow_mut() = MaskState::default());

    let doc = document()?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    inject_style(&doc)?;
    refresh_disguise(&doc, &body).ok();
    render(&doc, &body);
    wire_events(&doc, &body);
    Ok(())
}

fn document() -> Result<Document, JsValue> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn inject_style(doc: &Document) -> Result<(), JsValue> {
    if let Some(old) = doc.get_element_by_id(STYLE_ID) {
        old.remove();
    }
    let style = doc.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_inner_html(GLOBAL_STYLE);
    let head = doc.head().ok_or_else(|| JsValue::from_str("no head"))?;
    head.append_child(&style)?;
    Ok(())
}

// --- Projection --------------------------------------------------------------

/// Read the state, derive the render plan, and write it to the surface root.
fn render(doc: &Document, body: &HtmlElement) {
    let plan = STATE.with(|s| style::plan(&s.borrow()));
    apply_plan(doc, body, &plan).ok();
}

fn apply_plan(doc: &Document, body: &HtmlElement, plan: &RenderPlan) -> Result<(), JsValue> {
    let classes = body.class_list();
    let css = body.style();
    match plan {
        RenderPlan::Normal => {
            classes.remove_1(CLASS_SHADE)?;
            classes.remove_1(CLASS_CLIP)?;
            classes.add_1(CLASS_DISABLED)?;
            for var in [VAR_HOLE_SIZE, VAR_SHROUD_BG, VAR_SHROUD_FILTER, VAR_CLIP_REGION] {
                css.remove_property(var)?;
            }
        }
        RenderPlan::Shrouded { mode, radius_px, background, blur_px } => {
            classes.remove_1(CLASS_DISABLED)?;
            css.set_property(VAR_HOLE_SIZE, &format!("{radius_px}px"))?;
            css.set_property(VAR_SHROUD_BG, background)?;
            css.set_property(VAR_SHROUD_FILTER, &format!("blur({blur_px}px)"))?;
            match mode {
                ShroudMode::Shade => {
                    classes.remove_1(CLASS_CLIP)?;
                    classes.add_1(CLASS_SHADE)?;
                }
                ShroudMode::Clip => {
                    css.set_property(VAR_CLIP_REGION, &current_clip_path(doc))?;
                    classes.remove_1(CLASS_SHADE)?;
                    classes.add_1(CLASS_CLIP)?;
                }
            }
        }
    }
    Ok(())
}

/// Snapshot the player's bounding box and build the exclusion polygon. A
/// missing player degrades to an empty descriptor.
fn current_clip_path(doc: &Document) -> String {
    let Some(body) = doc.body() else {
        return String::new();
    };
    let player = doc.query_selector(PLAYER_SELECTOR).ok().flatten().map(|el| {
        let r = el.get_bounding_client_rect();
        geometry::Rect { x: r.x(), y: r.y(), right: r.right(), bottom: r.bottom() }
    });
    geometry::exclusion_clip_path(body.client_width() as f64, body.client_height() as f64, player)
}

fn refresh_disguise(doc: &Document, body: &HtmlElement) -> Result<(), JsValue> {
    let root = doc
        .document_element()
        .ok_or_else(|| JsValue::from_str("no document element"))?;
    let image = placeholder::disguise_image(root.client_width() as f64, root.client_height() as f64);
    body.style().set_property(VAR_DISGUISE, &image)
}

fn record_hole_center(body: &HtmlElement, x: f64, y: f64) -> Result<(), JsValue> {
    let css = body.style();
    css.set_property(VAR_HOLE_X, &format!("{x}px"))?;
    css.set_property(VAR_HOLE_Y, &format!("{y}px"))
}

// --- Event wiring -------------------------------------------------------------

/// Stacked-element count under the pointer, the "is this empty page chrome"
/// heuristic the classifier consumes.
fn hit_depth(doc: &Document, x: f64, y: f64) -> usize {
    doc.elements_from_point(x as f32, y as f32).length() as usize
}

fn surface_width(doc: &Document) -> f64 {
    doc.document_element().map(|el| el.client_width() as f64).unwrap_or(0.0)
}

fn consume(event: &Event) {
    event.stop_propagation();
    event.prevent_default();
}

fn wire_events(doc: &Document, body: &HtmlElement) {
    let mut listeners = Vec::new();
    // Document-level wheel/pointer listeners must be non-passive or
    // preventDefault is a no-op.
    let blocking = EventListenerOptions::enable_prevent_default;

    // Hole tracking. Only worth moving while a hole is actually visible.
    let track = |body: HtmlElement| {
        move |event: &Event| {
            let Some(e) = event.dyn_ref::<PointerEvent>() else { return };
            let tracking = STATE.with(|s| {
                let st = s.borrow();
                !st.disabled && st.revealing()
            });
            if tracking {
                record_hole_center(&body, e.client_x() as f64, e.client_y() as f64).ok();
            }
        }
    };
    listeners.push(EventListener::new_with_options(
        doc,
        "pointermove",
        blocking(),
        track(body.clone()),
    ));
    if let Ok(Some(bar)) = doc.query_selector(PROGRESS_BAR_SELECTOR) {
        listeners.push(EventListener::new(&bar, "pointermove", track(body.clone())));
    }

    // Gesture classification on pointer-down.
    {
        let doc = doc.clone();
        let body = body.clone();
        listeners.push(EventListener::new_with_options(
            &doc.clone(),
            "pointerdown",
            blocking(),
            move |event: &Event| {
                let Some(e) = event.dyn_ref::<PointerEvent>() else { return };
                let input = PointerInput {
                    buttons: e.buttons(),
                    shift: e.shift_key(),
                    ctrl: e.ctrl_key(),
                    alt: e.alt_key(),
                };
                let depth = hit_depth(&doc, e.client_x() as f64, e.client_y() as f64);
                let disabled = STATE.with(|s| s.borrow().disabled);
                let action = gesture::classify(input, depth, disabled);
                if action == Action::None {
                    return;
                }
                consume(event);
                STATE.with(|s| s.borrow_mut().apply(action));
                render(&doc, &body);
            },
        ));
    }

    // Suppress the context menu whenever the gesture layer owns the event.
    {
        let doc = doc.clone();
        listeners.push(EventListener::new_with_options(
            &doc.clone(),
            "contextmenu",
            blocking(),
            move |event: &Event| {
                let Some(e) = event.dyn_ref::<MouseEvent>() else { return };
                let input = PointerInput {
                    buttons: e.buttons(),
                    shift: e.shift_key(),
                    ctrl: e.ctrl_key(),
                    alt: e.alt_key(),
                };
                let depth = hit_depth(&doc, e.client_x() as f64, e.client_y() as f64);
                let disabled = STATE.with(|s| s.borrow().disabled);
                if gesture::suppresses_context_menu(input, depth, disabled) {
                    consume(event);
                }
            },
        ));
    }

    // Wheel: left third / Alt adjusts the hole radius, right third / Ctrl
    // adjusts opacity. The untouched middle keeps scrolling the page.
    {
        let doc = doc.clone();
        let body = body.clone();
        listeners.push(EventListener::new_with_options(
            &doc.clone(),
            "wheel",
            blocking(),
            move |event: &Event| {
                let Some(e) = event.dyn_ref::<WheelEvent>() else { return };
                if STATE.with(|s| s.borrow().disabled) {
                    return;
                }
                let (x, y) = (e.client_x() as f64, e.client_y() as f64);
                let depth = hit_depth(&doc, x, y);
                let target =
                    gesture::route_wheel(e.alt_key(), e.ctrl_key(), depth, x, surface_width(&doc));
                if target == WheelTarget::Ignore {
                    return;
                }
                consume(event);
                record_hole_center(&body, x, y).ok();
                STATE.with(|s| {
                    let mut st = s.borrow_mut();
                    match target {
                        WheelTarget::Radius => st.adjust_radius(e.delta_y()),
                        WheelTarget::Opacity => st.step_opacity(e.delta_y()),
                        WheelTarget::Ignore => {}
                    }
                });
                render(&doc, &body);
            },
        ));
    }

    // Scroll moves the player relative to the viewport, so Clip geometry
    // goes stale.
    {
        let doc = doc.clone();
        let body = body.clone();
        listeners.push(EventListener::new(&doc.clone(), "scroll", move |_: &Event| {
            let stale = STATE.with(|s| {
                let st = s.borrow();
                !st.disabled && st.mode == ShroudMode::Clip && !st.forced
            });
            if stale {
                body.style().set_property(VAR_CLIP_REGION, &current_clip_path(&doc)).ok();
            }
        }));
    }

    // Pointer leaving the surface snaps the shroud shut without discarding
    // the user's radius/opacity.
    for (name, forced) in [("pointerleave", true), ("pointerenter", false)] {
        let doc = doc.clone();
        let body = body.clone();
        listeners.push(EventListener::new(&doc.clone(), name, move |_: &Event| {
            let changed = STATE.with(|s| {
                let mut st = s.borrow_mut();
                if st.disabled {
                    return false;
                }
                st.set_forced(forced);
                true
            });
            if changed {
                render(&doc, &body);
            }
        }));
    }

    // Viewport change invalidates the disguise image's size-derived metrics.
    if let Some(win) = window() {
        let doc = doc.clone();
        let body = body.clone();
        listeners.push(EventListener::new(&win, "resize", move |_: &Event| {
            if !STATE.with(|s| s.borrow().disabled) {
                refresh_disguise(&doc, &body).ok();
            }
        }));
    }

    LISTENERS.with(|l| *l.borrow_mut() = listeners);
}
