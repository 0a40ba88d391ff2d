//! Shared HTML shell for every storefront page.

use std::borrow::Cow;
use std::fmt::Write as _;

use quick_xml::escape::escape;

pub const SITE_NAME: &str = "Mini Storefront";

/// Escapes text for use in element content or a quoted attribute.
pub fn esc(text: &str) -> Cow<'_, str> {
    escape(text)
}

/// `<head>` metadata for one page.
#[derive(Debug, Default)]
pub struct Head {
    pub title: String,
    pub description: String,
    /// Absolute URL of the page itself.
    pub url: Option<String>,
    /// `website` or `product`.
    pub og_type: &'static str,
    pub image: Option<PreviewImage>,
}

#[derive(Debug)]
pub struct PreviewImage {
    pub url: String,
    pub alt: String,
}

const STYLE: &str = "\
body{margin:0;font-family:system-ui,-apple-system,'Segoe UI',sans-serif;background:#f9fafb;color:#111827}\
header.site{background:#fff;border-bottom:1px solid #e5e7eb;padding:16px 32px}\
header.site a{color:#111827;text-decoration:none;font-weight:700;font-size:20px}\
main{max-width:1200px;margin:0 auto;padding:32px}\
.filters{display:flex;flex-wrap:wrap;gap:12px;align-items:end;background:#fff;padding:16px;border-radius:12px;border:1px solid #e5e7eb}\
.filters label{display:flex;flex-direction:column;font-size:14px;gap:4px}\
.ranges{display:flex;flex-wrap:wrap;gap:8px;margin:16px 0}\
.ranges a,.chip{padding:6px 14px;border-radius:999px;background:#eff6ff;color:#1e40af;text-decoration:none;font-size:14px}\
.ranges a.selected{background:#2563eb;color:#fff}\
.chips{display:flex;flex-wrap:wrap;gap:8px;margin:8px 0 16px}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(220px,1fr));gap:24px}\
.card{background:#fff;border-radius:12px;border:1px solid #e5e7eb;padding:16px;text-decoration:none;color:inherit;display:flex;flex-direction:column;gap:8px}\
.card img{height:180px;object-fit:contain}\
.price{color:#2563eb;font-weight:700;font-size:20px}\
.badge{display:inline-block;padding:4px 10px;border-radius:6px;background:#f3f4f6;color:#4b5563;font-size:13px;text-transform:capitalize}\
.detail{display:grid;grid-template-columns:minmax(240px,420px) 1fr;gap:48px;background:#fff;border-radius:16px;padding:32px}\
.detail img{width:100%;object-fit:contain;max-height:420px}\
.empty{padding:48px;text-align:center;color:#6b7280}";

/// Renders a complete HTML document.
pub fn document(head: &Head, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 2048);
    let title = esc(&head.title);
    let description = esc(&head.description);

    let _ = write!(
        html,
        concat!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<title>{title}</title>\n",
            "<meta name=\"description\" content=\"{description}\">\n",
            "<meta property=\"og:site_name\" content=\"{site}\">\n",
            "<meta property=\"og:title\" content=\"{title}\">\n",
            "<meta property=\"og:description\" content=\"{description}\">\n",
            "<meta property=\"og:type\" content=\"{og_type}\">\n",
        ),
        title = title,
        description = description,
        site = SITE_NAME,
        og_type = if head.og_type.is_empty() { "website" } else { head.og_type },
    );

    if let Some(url) = &head.url {
        let _ = writeln!(html, "<meta property=\"og:url\" content=\"{}\">", esc(url));
    }

    match &head.image {
        Some(image) => {
            let url = esc(&image.url);
            let _ = write!(
                html,
                concat!(
                    "<meta property=\"og:image\" content=\"{url}\">\n",
                    "<meta property=\"og:image:width\" content=\"{w}\">\n",
                    "<meta property=\"og:image:height\" content=\"{h}\">\n",
                    "<meta property=\"og:image:alt\" content=\"{alt}\">\n",
                    "<meta name=\"twitter:card\" content=\"summary_large_image\">\n",
                    "<meta name=\"twitter:image\" content=\"{url}\">\n",
                ),
                url = url,
                w = crate::og::svg::WIDTH,
                h = crate::og::svg::HEIGHT,
                alt = esc(&image.alt),
            );
        }
        None => html.push_str("<meta name=\"twitter:card\" content=\"summary\">\n"),
    }

    let _ = write!(
        html,
        concat!(
            "<meta name=\"twitter:title\" content=\"{title}\">\n",
            "<meta name=\"twitter:description\" content=\"{description}\">\n",
            "<style>{style}</style>\n",
            "</head>\n<body>\n",
            "<header class=\"site\"><a href=\"/\">{site}</a></header>\n",
            "<main>\n{body}\n</main>\n",
            "</body>\n</html>\n",
        ),
        title = title,
        description = description,
        style = STYLE,
        site = SITE_NAME,
        body = body,
    );
    html
}

/// Cuts `text` to at most `max` characters on a word boundary, adding `…`.
pub fn excerpt(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    let cut = match cut.rfind(char::is_whitespace) {
        Some(idx) if idx > 0 => &cut[..idx],
        _ => cut.as_str(),
    };
    format!("{}…", cut.trim_end())
}
