/// Escapes text for use inside element content or a quoted attribute value.
pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// `$12.5`, `$10`: shortest decimal form, like the backend's JSON numbers.
pub(crate) fn format_price(price: f64) -> String {
    format!("${}", price)
}
