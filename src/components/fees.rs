use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::FeeRow;
use crate::parsers::CurrencyFormatter;
use crate::view::{Element, Node};

static MONEY_COLUMN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)price|fee|amount").expect("Invalid money column regex"));

pub const FEES_PLACEHOLDER_TEXT: &str = "Fee schedule coming soon. Contact us for a quote.";

pub fn is_money_column(column: &str) -> bool {
    MONEY_COLUMN_REGEX.is_match(column)
}

/// Table whose columns are the first row's keys, in order.
pub fn fees_table(rows: &[FeeRow], fmt: &CurrencyFormatter) -> Node {
    let Some(first) = rows.first() else {
        return Element::new("p")
            .class("muted small fees-empty")
            .text(FEES_PLACEHOLDER_TEXT)
            .into();
    };

    let columns: Vec<&str> = first.columns().collect();

    let head = Element::new("thead").child(
        Element::new("tr").children(
            columns
                .iter()
                .map(|column| Element::new("th").attr("scope", "col").text(*column)),
        ),
    );

    let body = Element::new("tbody").children(rows.iter().map(|row| {
        Element::new("tr").children(columns.iter().map(|column| {
            let text = row.cell_text(column);
            let text = if is_money_column(column) {
                fmt.format_cell(&text)
            } else {
                text
            };
            Element::new("td").text(text)
        }))
    }));

    Element::new("table")
        .class("fees-table")
        .child(head)
        .child(body)
        .into()
}
