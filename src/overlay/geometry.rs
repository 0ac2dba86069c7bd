//! Clip-region synthesis for Clip mode.

/// Player bounding box in surface coordinates, as reported by layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Build the even-odd clip path that keeps the shroud everywhere except over
/// the player: outer ring = full viewport, inner ring = the player's box.
/// No player means no exclusion; an empty descriptor leaves the clip-path
/// property inert.
pub fn exclusion_clip_path(viewport_w: f64, viewport_h: f64, player: Option<Rect>) -> String {
    let Some(p) = player else {
        return String::new();
    };
    let (vw, vh) = (viewport_w, viewport_h);
    let Rect { x, y, right: r, bottom: b } = p;
    format!(
        r#"path(evenodd, "M 0 0 L {vw} 0 L {vw} {vh} L 0 {vh} L 0 0 M {x} {y} L {r} {y} L {r} {b} L {x} {b} L {x} {y} Z")"#
    )
}
