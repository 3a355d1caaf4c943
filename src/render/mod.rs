//! Server-side HTML rendering: the claim form page and the analysis result.
//!
//! Everything here is a pure function of its inputs. Pages are self-contained
//! (inline CSS and a small inline script, no external assets).

pub mod currency;
pub mod page;
pub mod result_view;

pub use currency::{format_idr, format_ledger_cell, format_signed_idr};
pub use page::{render_page, PageView};
pub use result_view::render_result;

/// Escape text for safe inclusion in HTML element content and quoted attributes.
pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
