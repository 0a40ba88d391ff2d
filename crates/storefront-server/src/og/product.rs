//! Preview image for a single product: a white card on a blue gradient.

use super::svg::{self, Rect, HEIGHT, WIDTH};

pub const DEFAULT_TITLE: &str = "Product";
pub const DEFAULT_PRICE: &str = "0.00";

const CARD_WIDTH: f64 = 900.0;
const CARD_PADDING: f64 = 60.0;
const TITLE_SIZE: u32 = 60;
const TITLE_LINE_HEIGHT: f64 = 72.0;
const TITLE_MAX_CHARS: usize = 24;
const TITLE_MAX_LINES: usize = 3;
const PRICE_SIZE: u32 = 80;
const BRAND_SIZE: u32 = 24;
const MAX_PRICE_CHARS: usize = 14;
/// Characters of title read before wrapping; far more than three lines hold.
const MAX_TITLE_INPUT_CHARS: usize = 256;

/// Renders the product card. Blank inputs fall back to the defaults.
pub fn render(title: Option<&str>, price: Option<&str>) -> String {
    let title = title.map(str::trim).filter(|t| !t.is_empty()).unwrap_or(DEFAULT_TITLE);
    let price = price.map(str::trim).filter(|p| !p.is_empty()).unwrap_or(DEFAULT_PRICE);
    let price: String = price.chars().take(MAX_PRICE_CHARS).collect();
    let title: String = title.chars().take(MAX_TITLE_INPUT_CHARS).collect();

    let lines = svg::wrap_text(&title, TITLE_MAX_CHARS, TITLE_MAX_LINES);
    let card = card_rect(lines.len());
    let center_x = f64::from(WIDTH) / 2.0;

    let mut body = String::new();
    svg::rounded_rect(&mut body, Rect::CANVAS, 0.0, "url(#bg)", "");
    svg::rounded_rect(&mut body, card, 20.0, "#ffffff", r#"filter="url(#shadow)""#);

    let mut y = card.y + CARD_PADDING;
    for line in &lines {
        y += TITLE_LINE_HEIGHT;
        svg::centered_text(&mut body, center_x, y - 14.0, TITLE_SIZE, 700, "#1f2937", line);
    }

    y += 30.0 + f64::from(PRICE_SIZE);
    svg::centered_text(
        &mut body,
        center_x,
        y - 10.0,
        PRICE_SIZE,
        700,
        "#2563eb",
        &format!("${price}"),
    );

    y += 30.0 + f64::from(BRAND_SIZE);
    svg::centered_text(&mut body, center_x, y, BRAND_SIZE, 400, "#6b7280", "Mini Storefront");

    let defs = format!(
        r##"<linearGradient id="bg" x1="0" y1="0" x2="1" y2="1"><stop offset="0%" stop-color="#3b82f6"/><stop offset="100%" stop-color="#2563eb"/></linearGradient>{}"##,
        svg::shadow_filter(20, 25, 0.25)
    );
    svg::document(&defs, &body)
}

/// The white card, centred on the canvas and tall enough for `title_lines`.
fn card_rect(title_lines: usize) -> Rect {
    #[allow(clippy::cast_precision_loss)]
    let title_block = title_lines as f64 * TITLE_LINE_HEIGHT;
    let height = CARD_PADDING
        + title_block
        + 30.0
        + f64::from(PRICE_SIZE)
        + 30.0
        + f64::from(BRAND_SIZE)
        + CARD_PADDING;
    Rect {
        x: (f64::from(WIDTH) - CARD_WIDTH) / 2.0,
        y: (f64::from(HEIGHT) - height) / 2.0,
        width: CARD_WIDTH,
        height,
    }
}
