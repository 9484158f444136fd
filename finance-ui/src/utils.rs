use finance_core::Ratio;
use rust_decimal::Decimal;

/// Formats an amount with `,` as thousands separator (e.g. `1,234.5`).
///
/// The fractional part is kept as stored; trailing zeros are dropped.
pub fn format_amount(value: Decimal) -> String {
    let text = value.normalize().to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Formats a ratio as a percentage, using "N/A" when undefined.
pub fn format_ratio(ratio: Ratio) -> String {
    match ratio {
        Ratio::Percent(_) => format!("{ratio}%"),
        Ratio::Undefined => ratio.to_string(),
    }
}
