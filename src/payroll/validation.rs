//! Caller-side validation of payroll inputs.
//!
//! The computation functions never fail, so malformed records have to be
//! rejected before they reach them. Request handlers run [`validate_inputs`]
//! on every record they are about to compute.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::PayrollRecord;

/// Largest accepted money amount, hour count or overtime rate: 1,000,000,000,000.
///
/// Keeps every product the payroll computations form well inside the
/// `Decimal` range.
pub const MAX_PAYROLL_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Largest accepted day count (period length, attendance or overtime days).
pub const MAX_PERIOD_DAYS: u32 = 366;

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidPayroll {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Checks the input fields of a payroll record.
///
/// Rejects, in order:
/// - a month outside 1..=12
/// - a period whose end precedes its start
/// - a period length of zero days
/// - an overtime rate below 1
/// - a negative basic salary, overtime amount, allowance or deduction
/// - a day count above [`MAX_PERIOD_DAYS`]
/// - an amount, hour count or overtime rate above [`MAX_PAYROLL_AMOUNT`]
///
/// Only the first violation is reported. Derived fields are not inspected.
///
/// # Examples
///
/// ```
/// use hr_engine::config::PayrollSettings;
/// use hr_engine::error::EngineError;
/// use hr_engine::models::PayrollRecord;
/// use hr_engine::payroll::validate_inputs;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut record = PayrollRecord::new(
///     "EMP-001",
///     13,
///     2026,
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
///     Decimal::new(3000, 0),
///     &PayrollSettings::default(),
/// );
/// assert!(matches!(
///     validate_inputs(&record),
///     Err(EngineError::InvalidPayroll { .. })
/// ));
///
/// record.month = 1;
/// assert!(validate_inputs(&record).is_ok());
/// ```
pub fn validate_inputs(record: &PayrollRecord) -> EngineResult<()> {
    if !(1..=12).contains(&record.month) {
        return Err(invalid("month", "must be between 1 and 12"));
    }

    if record.period_to < record.period_from {
        return Err(invalid(
            "period_to",
            format!(
                "period end {} is before period start {}",
                record.period_to, record.period_from
            ),
        ));
    }

    if record.period_days < 1 {
        return Err(invalid("period_days", "must be at least 1"));
    }

    if record.overtime_rate < Decimal::ONE {
        return Err(invalid("overtime_rate", "must be at least 1"));
    }

    let amounts = [
        ("basic_salary", record.basic_salary),
        ("overtime_days", record.overtime_days),
        ("regular_hours", record.regular_hours),
        ("overtime_hours", record.overtime_hours),
        ("housing_allowance", record.housing_allowance),
        ("transport_allowance", record.transport_allowance),
        ("other_allowances", record.other_allowances),
        ("advance_deduction", record.advance_deduction),
        ("violation_deduction", record.violation_deduction),
        ("insurance_deduction", record.insurance_deduction),
        ("tax_deduction", record.tax_deduction),
        ("other_deductions", record.other_deductions),
    ];

    if let Some((field, _)) = amounts.iter().find(|(_, value)| *value < Decimal::ZERO) {
        return Err(invalid(field, "must not be negative"));
    }

    let day_counts = [
        ("period_days", record.period_days),
        ("present_days", record.present_days),
        ("absent_days", record.absent_days),
        ("withdrawal_days", record.withdrawal_days),
    ];

    if let Some((field, _)) = day_counts
        .iter()
        .find(|(_, days)| *days > MAX_PERIOD_DAYS)
    {
        return Err(invalid(field, format!("must not exceed {} days", MAX_PERIOD_DAYS)));
    }

    if record.overtime_days > Decimal::from(MAX_PERIOD_DAYS) {
        return Err(invalid(
            "overtime_days",
            format!("must not exceed {} days", MAX_PERIOD_DAYS),
        ));
    }

    if let Some((field, _)) = amounts
        .iter()
        .find(|(_, value)| *value > MAX_PAYROLL_AMOUNT)
    {
        return Err(invalid(field, format!("must not exceed {}", MAX_PAYROLL_AMOUNT)));
    }

    if record.overtime_rate > MAX_PAYROLL_AMOUNT {
        return Err(invalid(
            "overtime_rate",
            format!("must not exceed {}", MAX_PAYROLL_AMOUNT),
        ));
    }

    Ok(())
}
