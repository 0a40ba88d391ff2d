//! Preview image for a filtered listing.

use storefront_core::{active_filter_labels, heading, FilterState};

use super::svg::{self, Rect, HEIGHT, WIDTH};

const HEADING_MAX_CHARS: usize = 28;
const CHIP_FONT: u32 = 20;
const CHIP_HEIGHT: f64 = 46.0;
const CHIP_PADDING_X: f64 = 24.0;
const CHIP_GAP: f64 = 12.0;
const PANEL_WIDTH: f64 = 1000.0;
const PANEL_PADDING: f64 = 30.0;
const PANEL_TOP: f64 = 270.0;

/// Renders the listing card for an already reconciled `state`.
pub fn render(state: &FilterState) -> String {
    let center_x = f64::from(WIDTH) / 2.0;
    let title = svg::wrap_text(&heading(state), HEADING_MAX_CHARS, 1)
        .pop()
        .unwrap_or_default();

    let mut body = String::new();
    svg::rounded_rect(&mut body, Rect::CANVAS, 0.0, "url(#bg)", "");
    svg::centered_text(&mut body, center_x, 170.0, 72, 700, "#111827", &title);
    svg::centered_text(&mut body, center_x, 225.0, 32, 400, "#6b7280", "Mini Storefront");

    let labels = active_filter_labels(state);
    if !labels.is_empty() {
        render_filter_panel(&mut body, &labels);
    }
    render_footer(&mut body);

    let defs = format!(
        r##"<linearGradient id="bg" x1="0" y1="0" x2="1" y2="1"><stop offset="0%" stop-color="#f8fafc"/><stop offset="100%" stop-color="#e0e7ff"/></linearGradient>{}"##,
        svg::shadow_filter(10, 15, 0.12)
    );
    svg::document(&defs, &body)
}

/// Greedy packing of chips into rows no wider than the panel interior.
fn chip_rows(labels: &[String]) -> Vec<Vec<(&str, f64)>> {
    let max_row = PANEL_WIDTH - 2.0 * PANEL_PADDING;
    let mut rows: Vec<Vec<(&str, f64)>> = Vec::new();
    let mut row_width = 0.0;

    for label in labels {
        let width = svg::text_width(label, f64::from(CHIP_FONT)) + 2.0 * CHIP_PADDING_X;
        match rows.last_mut() {
            Some(row) if row_width + CHIP_GAP + width <= max_row => {
                row_width += CHIP_GAP + width;
                row.push((label.as_str(), width));
            }
            _ => {
                row_width = width;
                rows.push(vec![(label.as_str(), width)]);
            }
        }
    }
    rows
}

#[allow(clippy::cast_precision_loss)]
fn render_filter_panel(out: &mut String, labels: &[String]) {
    let center_x = f64::from(WIDTH) / 2.0;
    let rows = chip_rows(labels);
    let rows_height = rows.len() as f64 * (CHIP_HEIGHT + CHIP_GAP) - CHIP_GAP;
    let panel_height = PANEL_PADDING + 24.0 + 20.0 + rows_height + PANEL_PADDING;

    svg::rounded_rect(
        out,
        Rect {
            x: center_x - PANEL_WIDTH / 2.0,
            y: PANEL_TOP,
            width: PANEL_WIDTH,
            height: panel_height,
        },
        16.0,
        "#ffffff",
        r#"filter="url(#shadow)""#,
    );
    svg::centered_text(
        out,
        center_x,
        PANEL_TOP + PANEL_PADDING + 20.0,
        24,
        600,
        "#374151",
        "Active Filters",
    );

    let mut y = PANEL_TOP + PANEL_PADDING + 24.0 + 20.0;
    for row in rows {
        let total: f64 = row.iter().map(|(_, w)| w).sum::<f64>()
            + CHIP_GAP * (row.len().saturating_sub(1) as f64);
        let mut x = center_x - total / 2.0;
        for (label, width) in row {
            svg::rounded_rect(
                out,
                Rect {
                    x,
                    y,
                    width,
                    height: CHIP_HEIGHT,
                },
                CHIP_HEIGHT / 2.0,
                "#dbeafe",
                "",
            );
            svg::centered_text(out, x + width / 2.0, y + 30.0, CHIP_FONT, 500, "#1e40af", label);
            x += width + CHIP_GAP;
        }
        y += CHIP_HEIGHT + CHIP_GAP;
    }
}

fn render_footer(out: &mut String) {
    const CAPTION: &str = "Browse our collection";
    const ICON: f64 = 48.0;
    const GAP: f64 = 16.0;

    let text_width = svg::text_width(CAPTION, 24.0);
    let total = ICON + GAP + text_width;
    let left = (f64::from(WIDTH) - total) / 2.0;
    let top = f64::from(HEIGHT) - 40.0 - ICON;

    svg::rounded_rect(
        out,
        Rect {
            x: left,
            y: top,
            width: ICON,
            height: ICON,
        },
        12.0,
        "#2563eb",
        "",
    );
    svg::centered_text(out, left + ICON / 2.0, top + 33.0, 24, 400, "#ffffff", "🛍");
    svg::centered_text(
        out,
        left + ICON + GAP + text_width / 2.0,
        top + 33.0,
        24,
        500,
        "#374151",
        CAPTION,
    );
}
