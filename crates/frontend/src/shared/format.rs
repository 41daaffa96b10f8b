//! Number and label formatting for report tables (pt-BR locale)

use crate::shared::config::{INDENT_PER_LEVEL, MESES};

const THOUSANDS_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';
const NBSP: char = '\u{00A0}';

/// Rounds `value` half-up to `decimals` places.
///
/// Works on the shortest decimal representation of the float, so `12.345`
/// rounds to `12.35` the way the browser's `Intl.NumberFormat` does, instead
/// of `12.34` from the binary expansion.
///
/// Returns `(negative, integer digits, fraction digits)`.
fn round_half_up(value: f64, decimals: usize) -> (bool, String, String) {
    if !value.is_finite() {
        return (false, "0".to_string(), "0".repeat(decimals));
    }

    let repr = format!("{}", value.abs());
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(decimals))
        .map(|b| b - b'0')
        .collect();

    let round_up = frac_part
        .as_bytes()
        .get(decimals)
        .is_some_and(|&next| next >= b'5');

    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let split = digits.len() - decimals;
    let to_string = |slice: &[u8]| slice.iter().map(|d| (d + b'0') as char).collect::<String>();
    let integer = to_string(&digits[..split]);
    let fraction = to_string(&digits[split..]);

    let is_zero = digits.iter().all(|&d| d == 0);
    (value < 0.0 && !is_zero, integer, fraction)
}

/// Inserts the thousands separator every 3 digits from the right
fn group_thousands(integer: &str) -> String {
    let mut result = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            result.push(THOUSANDS_SEPARATOR);
        }
        result.push(c);
    }
    result
}

/// Formats a number with pt-BR separators and the given number of decimals
///
/// # Examples
///
/// ```
/// use balanco_web::shared::format::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1.234,57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let (negative, integer, fraction) = round_half_up(value, decimals);
    let mut result = String::new();
    if negative {
        result.push('-');
    }
    result.push_str(&group_thousands(&integer));
    if decimals > 0 {
        result.push(DECIMAL_SEPARATOR);
        result.push_str(&fraction);
    }
    result
}

/// Currency cell without symbol; missing values render as zero
pub fn format_currency(value: Option<f64>) -> String {
    format_number_with_decimals(value.unwrap_or(0.0), 2)
}

/// Percentage cell with two decimals, e.g. `12,35%`
pub fn format_percent(value: Option<f64>) -> String {
    format!("{}%", format_number_with_decimals(value.unwrap_or(0.0), 2))
}

/// Integer with thousands separator (record counts)
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Indented label of a report row.
///
/// The totals row (level 0) shows only its description.
pub fn format_hierarchy_label(nivel: u8, codigo: &str, descricao: &str) -> String {
    if nivel == 0 {
        return descricao.to_string();
    }
    let indent: String = std::iter::repeat(NBSP)
        .take(nivel as usize * INDENT_PER_LEVEL)
        .collect();
    if codigo.trim().is_empty() {
        format!("{}{}", indent, descricao)
    } else {
        format!("{}{} - {}", indent, codigo.trim(), descricao)
    }
}

pub fn month_name(mes: u32) -> Option<&'static str> {
    MESES.get((mes as usize).checked_sub(1)?).copied()
}

/// "Janeiro a Junho de 2024" style label for an accumulated period
pub fn period_label(ano: i32, mes: u32) -> String {
    match month_name(mes) {
        Some("Janeiro") => format!("Janeiro de {}", ano),
        Some(nome) => format!("Janeiro a {} de {}", nome, ano),
        None => format!("{}/{}", mes, ano),
    }
}
