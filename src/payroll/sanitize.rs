//! Salary sanitizer for bulk spreadsheet imports.
//!
//! Imported salary cells are free text. Every cell maps to a usable salary
//! so a single bad row never aborts an import batch.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

/// Salary used for blank, unparseable or negative cells.
pub const DEFAULT_IMPORTED_SALARY: Decimal = Decimal::from_parts(3000, 0, 0, false, 0);

/// Largest salary accepted as-is.
pub const MAX_PLAUSIBLE_SALARY: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Salary substituted for values above [`MAX_PLAUSIBLE_SALARY`].
pub const CLAMPED_IMPORTED_SALARY: Decimal = Decimal::from_parts(50_000, 0, 0, false, 0);

const NULL_TOKENS: [&str; 4] = ["", "nan", "none", "null"];

const STRIPPED_TOKENS: [&str; 3] = [",", "ر.س", "ريال"];

enum Parsed {
    Value(Decimal),
    PositiveOverflow,
    NegativeOverflow,
    Unparseable,
}

fn parse_amount(text: &str) -> Parsed {
    if let Ok(value) = Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text)) {
        return Parsed::Value(value);
    }

    // Exponents and infinities outside the decimal range.
    match text.parse::<f64>() {
        Ok(value) if value.is_nan() => Parsed::Unparseable,
        Ok(value) => match Decimal::try_from(value) {
            Ok(decimal) => Parsed::Value(decimal),
            Err(_) if value.is_sign_negative() => Parsed::NegativeOverflow,
            Err(_) => Parsed::PositiveOverflow,
        },
        Err(_) => Parsed::Unparseable,
    }
}

/// Converts a raw spreadsheet cell into a salary.
///
/// - `None` or a blank/`nan`/`none`/`null` cell (any case) yields 3000
/// - thousands separators and the currency tokens `ر.س` and `ريال` are stripped
/// - an unparseable value yields 3000
/// - a negative value yields 3000
/// - a value above 1,000,000 yields 50,000
///
/// # Examples
///
/// ```
/// use hr_engine::payroll::sanitize_salary;
/// use rust_decimal::Decimal;
///
/// assert_eq!(sanitize_salary(Some("4500 ر.س")), Decimal::new(4500, 0));
/// assert_eq!(sanitize_salary(Some("2,000,000")), Decimal::new(50000, 0));
/// assert_eq!(sanitize_salary(Some("-500")), Decimal::new(3000, 0));
/// assert_eq!(sanitize_salary(None), Decimal::new(3000, 0));
/// ```
pub fn sanitize_salary(value: Option<&str>) -> Decimal {
    let Some(raw) = value else {
        return DEFAULT_IMPORTED_SALARY;
    };

    if NULL_TOKENS.contains(&raw.trim().to_lowercase().as_str()) {
        return DEFAULT_IMPORTED_SALARY;
    }

    let cleaned = STRIPPED_TOKENS
        .iter()
        .fold(raw.to_string(), |acc, token| acc.replace(token, ""));

    let salary = match parse_amount(cleaned.trim()) {
        Parsed::Value(salary) if salary < Decimal::ZERO => DEFAULT_IMPORTED_SALARY,
        Parsed::Value(salary) if salary > MAX_PLAUSIBLE_SALARY => CLAMPED_IMPORTED_SALARY,
        Parsed::Value(salary) => salary,
        Parsed::PositiveOverflow => CLAMPED_IMPORTED_SALARY,
        Parsed::NegativeOverflow | Parsed::Unparseable => DEFAULT_IMPORTED_SALARY,
    };

    debug!(raw = %raw, salary = %salary, "Sanitized imported salary");
    salary
}
