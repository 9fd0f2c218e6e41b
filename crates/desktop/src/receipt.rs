//! Printable receipt for a recorded sale.
//!
//! The receipt is built from the [`Sale`] snapshot only, so a reprint shows
//! exactly what was charged even after the catalog changed.

use std::fmt::Write as _;

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use caisse_core::{Entity, Money, TaxRate};
use caisse_sales::Sale;

pub const THANK_YOU: &str = "Merci pour votre achat!";

/// Columns of the plain-text rendering (80 mm thermal roll).
pub const TEXT_WIDTH: usize = 32;

const MONTHS_FR: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
    "octobre", "novembre", "décembre",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub sale_id: String,
    pub shop_name: String,
    /// e.g. `10 mai 2024 à 14:30`
    pub issued_at: String,
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Money,
    pub tax_label: String,
    pub tax: Money,
    pub total: Money,
    pub payment_label: String,
}

impl Receipt {
    /// Receipt with the timestamp shown in the machine's local time zone.
    pub fn from_sale(sale: &Sale, shop_name: &str) -> Self {
        Self::from_sale_in(sale, shop_name, &Local)
    }

    pub fn from_sale_in<Tz: TimeZone>(sale: &Sale, shop_name: &str, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let lines = sale
            .items()
            .iter()
            .map(|item| ReceiptLine {
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.price,
                line_total: item.line_total(),
            })
            .collect();

        Self {
            sale_id: sale.id().to_string(),
            shop_name: shop_name.to_string(),
            issued_at: format_french_datetime(sale.recorded_at(), tz),
            lines,
            subtotal: sale.subtotal(),
            tax_label: format!("TVA ({})", TaxRate::STANDARD.percent_label()),
            tax: sale.tax(),
            total: sale.total(),
            payment_label: sale.payment_method().label().to_string(),
        }
    }

    /// Standalone HTML document sized for an 80 mm receipt printer.
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(2048);
        html.push_str(
            r#"<!DOCTYPE html>
<html lang="fr">
<head>
<meta charset="utf-8">
<style>
  body { font-family: sans-serif; margin: 0; padding: 4mm; }
  @page { size: 80mm 297mm; margin: 0; }
  .receipt-header { text-align: center; margin-bottom: 10px; }
  .receipt-item { display: flex; justify-content: space-between; margin: 5px 0; }
  .receipt-detail { font-size: 11px; color: #666; }
  .receipt-separator { border-top: 1px dashed #ccc; margin: 10px 0; }
  .receipt-total { font-weight: bold; }
  .receipt-footer { text-align: center; margin-top: 20px; font-size: 12px; }
</style>
</head>
<body>
"#,
        );

        let shop = escape_html(&self.shop_name);
        let _ = writeln!(
            html,
            "<div class=\"receipt-header\"><h2>{shop}</h2><p>{}</p></div>",
            escape_html(&self.issued_at)
        );
        html.push_str("<div class=\"receipt-separator\"></div>\n");

        for line in &self.lines {
            let _ = writeln!(
                html,
                "<div class=\"receipt-item\"><div><span>{}</span><div class=\"receipt-detail\">{} x {}</div></div><div>{}</div></div>",
                escape_html(&line.name),
                line.quantity,
                line.unit_price.display(),
                line.line_total.display()
            );
        }

        html.push_str("<div class=\"receipt-separator\"></div>\n");
        push_html_row(&mut html, "receipt-item", "Sous-total", self.subtotal);
        push_html_row(&mut html, "receipt-item", &self.tax_label, self.tax);
        push_html_row(&mut html, "receipt-item receipt-total", "Total", self.total);
        html.push_str("<div class=\"receipt-separator\"></div>\n");

        let _ = writeln!(
            html,
            "<div class=\"receipt-item\"><span>Mode de paiement</span><span>{}</span></div>",
            escape_html(&self.payment_label)
        );
        let _ = writeln!(
            html,
            "<div class=\"receipt-footer\"><p>{THANK_YOU}</p><p>{shop}</p></div>"
        );
        html.push_str("</body>\n</html>\n");
        html
    }

    /// Fixed-width rendering, [`TEXT_WIDTH`] columns.
    pub fn to_text(&self) -> String {
        let rule = "-".repeat(TEXT_WIDTH);
        let mut out = String::new();

        let _ = writeln!(out, "{}", centered(&self.shop_name));
        let _ = writeln!(out, "{}", centered(&self.issued_at));
        let _ = writeln!(out, "{rule}");

        for line in &self.lines {
            let _ = writeln!(out, "{}", text_row(&line.name, &line.line_total.display()));
            let _ = writeln!(out, "  {} x {}", line.quantity, line.unit_price.display());
        }

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "{}", text_row("Sous-total", &self.subtotal.display()));
        let _ = writeln!(out, "{}", text_row(&self.tax_label, &self.tax.display()));
        let _ = writeln!(out, "{}", text_row("TOTAL", &self.total.display()));
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "{}", text_row("Mode de paiement", &self.payment_label));
        out.push('\n');
        let _ = writeln!(out, "{}", centered(THANK_YOU));
        let _ = writeln!(out, "{}", centered(&self.shop_name));
        out
    }
}

/// `10 mai 2024 à 14:30`, in the given time zone.
pub fn format_french_datetime<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let local = at.with_timezone(tz);
    format!(
        "{} {} {} à {}",
        local.day(),
        MONTHS_FR[local.month0() as usize],
        local.year(),
        local.format("%H:%M")
    )
}

fn push_html_row(html: &mut String, class: &str, label: &str, amount: Money) {
    let _ = writeln!(
        html,
        "<div class=\"{class}\"><span>{}</span><span>{}</span></div>",
        escape_html(label),
        amount.display()
    );
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Centered on the roll; text wider than the roll is truncated.
fn centered(text: &str) -> String {
    let len = text.chars().count();
    if len >= TEXT_WIDTH {
        return text.chars().take(TEXT_WIDTH).collect();
    }
    let pad = (TEXT_WIDTH - len) / 2;
    format!("{}{text}", " ".repeat(pad))
}

/// Label left, value right; long labels are truncated to keep the value visible.
fn text_row(label: &str, value: &str) -> String {
    let value_len = value.chars().count();
    let room = TEXT_WIDTH.saturating_sub(value_len + 1);
    let label: String = label.chars().take(room).collect();
    let gap = TEXT_WIDTH.saturating_sub(label.chars().count() + value_len).max(1);
    format!("{label}{}{value}", " ".repeat(gap))
}
