// File: src/core/quantity.rs
use regex::Regex;
use std::sync::LazyLock;

/// Text, at least one whitespace character, then a run of digits at the end.
/// `(?s)` lets the base span line breaks.
static QUANTITY_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(.*\S)\s+([0-9]+)$").expect("static regex"));

/// An item name split into its base and trailing quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedItem {
    pub base: String,
    pub quantity: u32,
}

/// Splits `"whole milk 3"` into `("whole milk", 3)`.
///
/// The digits must be separated from the base by whitespace, so `"flour 100g"`
/// and `"vitamin b12"` keep quantity 1. A suffix that is zero or does not fit
/// a `u32` is treated as part of the base.
pub fn parse_item_name(name: &str) -> ParsedItem {
    let trimmed = name.trim();
    if let Some(caps) = QUANTITY_SUFFIX.captures(trimmed) {
        if let Ok(quantity) = caps[2].parse::<u32>() {
            if quantity >= 1 {
                return ParsedItem {
                    base: caps[1].trim().to_string(),
                    quantity,
                };
            }
        }
    }
    ParsedItem {
        base: trimmed.to_string(),
        quantity: 1,
    }
}

/// Inverse of [`parse_item_name`]: a quantity of one is left implicit.
pub fn format_item_name(base: &str, quantity: u32) -> String {
    if quantity == 1 {
        base.to_string()
    } else {
        format!("{base} {quantity}")
    }
}
