//! HTML tables for e-mailed rosters and receipts

use rust_decimal::Decimal;

use core_kernel::round_money;

/// Escapes `& < > " '` for safe insertion into HTML text or attributes
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Formats an amount as US currency, e.g. `$1,234.50` or `-$12.00`
pub fn currency_cell(amount: Decimal) -> String {
    let rounded = round_money(amount);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// Builds a `<table>` with a header row, body rows and an optional footer
///
/// Every cell is escaped. Rows shorter than the header are padded with
/// empty cells; longer rows keep their extra cells.
#[derive(Debug, Clone, Default)]
pub struct HtmlTableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    footer: Option<Vec<String>>,
    class: Option<String>,
}

impl HtmlTableBuilder {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn row<S: Into<String>>(mut self, cells: impl IntoIterator<Item = S>) -> Self {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn footer<S: Into<String>>(mut self, cells: impl IntoIterator<Item = S>) -> Self {
        self.footer = Some(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn class(mut self, name: impl Into<String>) -> Self {
        self.class = Some(name.into());
        self
    }

    pub fn build(&self) -> String {
        let mut html = String::new();
        match &self.class {
            Some(class) => html.push_str(&format!("<table class=\"{}\">", escape_html(class))),
            None => html.push_str("<table>"),
        }

        html.push_str("<thead>");
        self.push_row(&mut html, &self.headers, "th");
        html.push_str("</thead><tbody>");
        for row in &self.rows {
            self.push_row(&mut html, row, "td");
        }
        html.push_str("</tbody>");

        if let Some(footer) = &self.footer {
            html.push_str("<tfoot>");
            self.push_row(&mut html, footer, "td");
            html.push_str("</tfoot>");
        }

        html.push_str("</table>");
        html
    }

    fn push_row(&self, html: &mut String, cells: &[String], tag: &str) {
        html.push_str("<tr>");
        let width = cells.len().max(self.headers.len());
        for i in 0..width {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            html.push_str(&format!("<{tag}>{}</{tag}>", escape_html(cell)));
        }
        html.push_str("</tr>");
    }
}
