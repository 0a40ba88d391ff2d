//! Small SVG helpers shared by the preview-image templates.

use std::fmt::Write as _;

use quick_xml::escape::escape;

/// Open Graph's recommended 1.91:1 canvas.
pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 630;

const FONT_STACK: &str = "Inter, 'Helvetica Neue', Arial, sans-serif";

/// Rough advance width of one glyph as a fraction of the font size.
const GLYPH_WIDTH_EM: f64 = 0.55;

/// Estimated rendered width of `text` at `font_size` pixels.
#[allow(clippy::cast_precision_loss)]
pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * GLYPH_WIDTH_EM
}

/// Greedy word wrap by character count.
///
/// Words longer than a line are hard-split. When the text needs more than
/// `max_lines`, the last line is cut and ends with `…`.
pub fn wrap_text(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        let mut chunks = chars.chunks(max_chars);
        let Some(tail) = chunks.next_back() else {
            continue;
        };
        for chunk in chunks {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(chunk.iter().collect());
        }

        let word: String = tail.iter().collect();
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines && max_lines > 0 {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let mut kept: String = last.chars().take(max_chars.saturating_sub(1)).collect();
            kept = kept.trim_end().to_owned();
            kept.push('…');
            *last = kept;
        }
    }
    lines
}

/// Wraps `body` in an `<svg>` root sized to the canvas.
pub fn document(defs: &str, body: &str) -> String {
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            "<defs>{defs}</defs>",
            "{body}",
            "</svg>"
        ),
        w = WIDTH,
        h = HEIGHT,
        defs = defs,
        body = body,
    )
}

/// A centered text element. `content` is escaped.
pub fn centered_text(out: &mut String, x: f64, y: f64, size: u32, weight: u32, fill: &str, content: &str) {
    let _ = write!(
        out,
        r#"<text x="{x}" y="{y}" font-family="{FONT_STACK}" font-size="{size}" font-weight="{weight}" fill="{fill}" text-anchor="middle">{}</text>"#,
        escape(content)
    );
}

#[derive(Debug, Clone, Copy)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[allow(clippy::cast_lossless)]
    pub const CANVAS: Self = Self {
        x: 0.0,
        y: 0.0,
        width: WIDTH as f64,
        height: HEIGHT as f64,
    };
}

/// A `<rect>` with corner radius. `extra` is appended verbatim as attributes.
pub fn rounded_rect(out: &mut String, rect: Rect, radius: f64, fill: &str, extra: &str) {
    let Rect {
        x,
        y,
        width,
        height,
    } = rect;
    let _ = write!(
        out,
        r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" rx="{radius}" fill="{fill}" {extra}/>"#
    );
}

/// A drop shadow filter, referenced as `filter="url(#shadow)"`.
pub fn shadow_filter(dy: u32, blur: u32, opacity: f64) -> String {
    format!(
        r##"<filter id="shadow" x="-20%" y="-20%" width="140%" height="140%"><feDropShadow dx="0" dy="{dy}" stdDeviation="{blur}" flood-color="#000000" flood-opacity="{opacity}"/></filter>"##
    )
}
