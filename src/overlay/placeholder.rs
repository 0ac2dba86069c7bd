//! Disguise placeholder: a viewport-sized SVG pretending the page is still
//! loading, encoded as a `url("data:image/svg+xml,…")` style value.

const CAPTION: &str = "Temporarily Unavailable";
/// Rough caption width in font-size units, used to keep the horizontal
/// animation inside the viewport.
const CAPTION_WIDTH_EM: f64 = 11.56;

/// Characters that must be percent-escaped before the SVG can live inside a
/// CSS url() data URI. '%' is in the set, so escaping is single-pass safe.
const ESCAPED: &[char] = &['<', '>', '"', ':', '/', '=', '%', '#', ';', ' '];

/// Pure function of the viewport size. The caption drifts across the screen
/// on two independent multi-second cycles so the "loading" screen looks
/// passively alive.
pub fn disguise_image(width: f64, height: f64) -> String {
    let font_size = height / 20.0;
    let x_extent = width - font_size * CAPTION_WIDTH_EM;
    let y_extent = height - font_size;
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="100%" height="100%">
      <style>text {{font-family: sans-serif; font-size: {font_size}px; font-weight: bold;}}</style>
      <text fill="#489" alignment-baseline="hanging">
        {CAPTION}
        <animate
          attributeName="x"
          values="0;{x_extent};0"
          dur="43s"
          repeatCount="indefinite" />
        <animate
          attributeName="y"
          values="0;{y_extent};0"
          dur="73s"
          repeatCount="indefinite" />
      </text>
    </svg>"##
    );
    format!("url(\"data:image/svg+xml,{}\")", percent_escape(&collapse_whitespace(&svg)))
}

/// Shrink the pretty-printed SVG: whitespace vanishes next to tag boundaries
/// and collapses to a single space elsewhere.
fn collapse_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_ws = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            pending_ws = true;
            continue;
        }
        if pending_ws {
            if !(out.ends_with('>') || c == '<') {
                out.push(' ');
            }
            pending_ws = false;
        }
        out.push(c);
    }
    out
}

/// Escape every reserved character as `%` + lowercase hex of its code point.
pub fn percent_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if ESCAPED.contains(&c) {
            out.push_str(&format!("%{:x}", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}
