//! Attendance-based payroll computation.
//!
//! Used when a payroll record is created. Every derived field is computed
//! from the basic salary, the attendance day counts, overtime days,
//! allowances and deduction categories.

use rust_decimal::Decimal;

use crate::models::{AuditStep, PayrollRecord};

/// Number of days a monthly salary is divided by.
///
/// Salaries are normalized to a fixed 30-day month regardless of the actual
/// number of days in the period.
pub const SALARY_DAYS_PER_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

fn step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    formula: &str,
    input: serde_json::Value,
    output: serde_json::Value,
    reasoning: String,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        formula: formula.to_string(),
        input,
        output,
        reasoning,
    }
}

pub(super) fn money(value: Decimal, currency_symbol: &str) -> String {
    format!("{} {}", value.round_dp(2).normalize(), currency_symbol)
}

/// Fills every derived field of `record` from its attendance inputs.
///
/// The computation is a single pass:
///
/// 1. `daily_salary = basic_salary / 30`
/// 2. `due_salary = daily_salary * present_days`
/// 3. `overtime_due = overtime_days * daily_salary * overtime_rate`
/// 4. `total_salary = due_salary + overtime_due + allowances`
/// 5. `absence_deduction = absent_days * daily_salary`
/// 6. `withdrawal_deduction = withdrawal_days * daily_salary`
/// 7. `total_deductions` = advance + violation + absence + withdrawal + insurance + tax + other
/// 8. `net_salary = total_salary - total_deductions`
/// 9. `gross_salary = total_salary`
///
/// Amounts in the audit reasoning are rounded to two places and followed by
/// `currency_symbol`.
///
/// `net_salary` is not clamped; a negative value signals over-deduction.
/// `period_days` does not affect the result. Calling this twice on the same
/// inputs yields identical derived fields.
///
/// # Returns
///
/// One audit step per derived field, numbered from 1.
///
/// # Examples
///
/// ```
/// use hr_engine::config::PayrollSettings;
/// use hr_engine::models::PayrollRecord;
/// use hr_engine::payroll::compute_from_attendance;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut record = PayrollRecord::new(
///     "EMP-001",
///     1,
///     2026,
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
///     Decimal::new(3000, 0),
///     &PayrollSettings::default(),
/// );
/// record.present_days = 25;
/// record.absent_days = 5;
/// record.overtime_days = Decimal::new(2, 0);
/// record.housing_allowance = Decimal::new(500, 0);
///
/// let steps = compute_from_attendance(&mut record, "ر.س");
///
/// assert_eq!(record.daily_salary, Decimal::new(100, 0));
/// assert_eq!(record.total_salary, Decimal::new(3300, 0));
/// assert_eq!(record.net_salary, Decimal::new(2800, 0));
/// assert_eq!(steps.len(), 9);
/// assert_eq!(steps[0].reasoning, "3000 ر.س / 30 days = 100 ر.س");
/// ```
pub fn compute_from_attendance(
    record: &mut PayrollRecord,
    currency_symbol: &str,
) -> Vec<AuditStep> {
    let present_days = Decimal::from(record.present_days);
    let absent_days = Decimal::from(record.absent_days);
    let withdrawal_days = Decimal::from(record.withdrawal_days);

    let daily_salary = record.basic_salary / SALARY_DAYS_PER_MONTH;
    let due_salary = daily_salary * present_days;
    let overtime_due = record.overtime_days * daily_salary * record.overtime_rate;
    let allowances = record.allowances_total();
    let total_salary = due_salary + overtime_due + allowances;
    let absence_deduction = absent_days * daily_salary;
    let withdrawal_deduction = withdrawal_days * daily_salary;
    let total_deductions = record.advance_deduction
        + record.violation_deduction
        + absence_deduction
        + withdrawal_deduction
        + record.insurance_deduction
        + record.tax_deduction
        + record.other_deductions;
    let net_salary = total_salary - total_deductions;

    let steps = vec![
        step(
            1,
            "daily_salary",
            "Daily Salary",
            "basic_salary / 30",
            serde_json::json!({ "basic_salary": record.basic_salary.to_string() }),
            serde_json::json!({ "daily_salary": daily_salary.to_string() }),
            format!(
                "{} / {} days = {}",
                money(record.basic_salary, currency_symbol),
                SALARY_DAYS_PER_MONTH,
                money(daily_salary, currency_symbol)
            ),
        ),
        step(
            2,
            "due_salary",
            "Due Salary",
            "daily_salary * present_days",
            serde_json::json!({
                "daily_salary": daily_salary.to_string(),
                "present_days": record.present_days
            }),
            serde_json::json!({ "due_salary": due_salary.to_string() }),
            format!(
                "{} x {} present days = {}",
                money(daily_salary, currency_symbol),
                record.present_days,
                money(due_salary, currency_symbol)
            ),
        ),
        step(
            3,
            "overtime_due",
            "Overtime Due",
            "overtime_days * daily_salary * overtime_rate",
            serde_json::json!({
                "overtime_days": record.overtime_days.to_string(),
                "daily_salary": daily_salary.to_string(),
                "overtime_rate": record.overtime_rate.to_string()
            }),
            serde_json::json!({ "overtime_due": overtime_due.to_string() }),
            format!(
                "{} days x {} x {} = {}",
                record.overtime_days.normalize(),
                money(daily_salary, currency_symbol),
                record.overtime_rate.normalize(),
                money(overtime_due, currency_symbol)
            ),
        ),
        step(
            4,
            "total_salary",
            "Total Salary",
            "due_salary + overtime_due + housing_allowance + transport_allowance + other_allowances",
            serde_json::json!({
                "due_salary": due_salary.to_string(),
                "overtime_due": overtime_due.to_string(),
                "housing_allowance": record.housing_allowance.to_string(),
                "transport_allowance": record.transport_allowance.to_string(),
                "other_allowances": record.other_allowances.to_string()
            }),
            serde_json::json!({ "total_salary": total_salary.to_string() }),
            format!(
                "{} + {} overtime + {} allowances = {}",
                money(due_salary, currency_symbol),
                money(overtime_due, currency_symbol),
                money(allowances, currency_symbol),
                money(total_salary, currency_symbol)
            ),
        ),
        step(
            5,
            "absence_deduction",
            "Absence Deduction",
            "absent_days * daily_salary",
            serde_json::json!({
                "absent_days": record.absent_days,
                "daily_salary": daily_salary.to_string()
            }),
            serde_json::json!({ "absence_deduction": absence_deduction.to_string() }),
            format!(
                "{} absent days x {} = {}",
                record.absent_days,
                money(daily_salary, currency_symbol),
                money(absence_deduction, currency_symbol)
            ),
        ),
        step(
            6,
            "withdrawal_deduction",
            "Withdrawal Deduction",
            "withdrawal_days * daily_salary",
            serde_json::json!({
                "withdrawal_days": record.withdrawal_days,
                "daily_salary": daily_salary.to_string()
            }),
            serde_json::json!({ "withdrawal_deduction": withdrawal_deduction.to_string() }),
            format!(
                "{} withdrawal days x {} = {}",
                record.withdrawal_days,
                money(daily_salary, currency_symbol),
                money(withdrawal_deduction, currency_symbol)
            ),
        ),
        step(
            7,
            "total_deductions",
            "Total Deductions",
            "advance_deduction + violation_deduction + absence_deduction + withdrawal_deduction + insurance_deduction + tax_deduction + other_deductions",
            serde_json::json!({
                "advance_deduction": record.advance_deduction.to_string(),
                "violation_deduction": record.violation_deduction.to_string(),
                "absence_deduction": absence_deduction.to_string(),
                "withdrawal_deduction": withdrawal_deduction.to_string(),
                "insurance_deduction": record.insurance_deduction.to_string(),
                "tax_deduction": record.tax_deduction.to_string(),
                "other_deductions": record.other_deductions.to_string()
            }),
            serde_json::json!({ "total_deductions": total_deductions.to_string() }),
            format!(
                "Seven deduction categories sum to {}",
                money(total_deductions, currency_symbol)
            ),
        ),
        step(
            8,
            "net_salary",
            "Net Salary",
            "total_salary - total_deductions",
            serde_json::json!({
                "total_salary": total_salary.to_string(),
                "total_deductions": total_deductions.to_string()
            }),
            serde_json::json!({
                "net_salary": net_salary.to_string(),
                "over_deducted": net_salary.is_sign_negative() && !net_salary.is_zero()
            }),
            format!(
                "{} - {} = {}",
                money(total_salary, currency_symbol),
                money(total_deductions, currency_symbol),
                money(net_salary, currency_symbol)
            ),
        ),
        step(
            9,
            "gross_salary",
            "Gross Salary",
            "total_salary",
            serde_json::json!({ "total_salary": total_salary.to_string() }),
            serde_json::json!({ "gross_salary": total_salary.to_string() }),
            "Gross salary mirrors total salary".to_string(),
        ),
    ];

    record.daily_salary = daily_salary;
    record.due_salary = due_salary;
    record.overtime_due = overtime_due;
    record.total_salary = total_salary;
    record.absence_deduction = absence_deduction;
    record.withdrawal_deduction = withdrawal_deduction;
    record.total_deductions = total_deductions;
    record.net_salary = net_salary;
    record.gross_salary = total_salary;

    steps
}
