use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;

/// Fields rendered as money rather than raw decimals.
const MONEY_FIELDS: &[&str] = &[
    "monthly_payment",
    "monthly_payment_with_extra",
    "extra_payment",
    "payment",
    "interest",
    "principal",
    "balance",
    "total_interest_paid",
    "total_paid",
    "interest_saved",
];

pub fn is_money_field(key: &str) -> bool {
    MONEY_FIELDS.contains(&key)
}

/// Format an amount as dollars with two decimals and thousands separators.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{frac}")
}

/// Format a JSON money value; non-numeric values pass through unchanged.
pub fn format_money_value(value: &Value) -> Option<String> {
    let amount = match value {
        Value::String(s) => Decimal::from_str(s).ok()?,
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok()?,
        _ => return None,
    };
    Some(format_currency(amount))
}
