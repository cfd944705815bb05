//! Hours-based payroll recomputation.
//!
//! Used when an existing payroll record is edited. Only `gross_salary` and
//! `net_salary` are recomputed; attendance day counts play no part and every
//! other derived field keeps its previous value. The result can therefore
//! disagree with [`compute_from_attendance`](super::compute_from_attendance)
//! for the same record.

use super::attendance::money;
use crate::models::{AuditStep, PayrollRecord};

/// Recomputes `gross_salary` and `net_salary` from hours and allowances.
///
/// - `gross_salary = basic_salary + housing + transport + other_allowances + overtime_hours * overtime_rate`
/// - `net_salary = gross_salary - (insurance_deduction + tax_deduction + other_deductions)`
///
/// Advance and violation deductions are not part of this path. Amounts in
/// the audit reasoning are followed by `currency_symbol`.
///
/// # Examples
///
/// ```
/// use hr_engine::config::PayrollSettings;
/// use hr_engine::models::PayrollRecord;
/// use hr_engine::payroll::compute_from_hours;
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
/// record.overtime_hours = Decimal::new(10, 0);
/// record.tax_deduction = Decimal::new(100, 0);
///
/// let steps = compute_from_hours(&mut record, "ر.س");
///
/// assert_eq!(record.gross_salary, Decimal::new(3015, 0));
/// assert_eq!(record.net_salary, Decimal::new(2915, 0));
/// assert_eq!(steps[1].reasoning, "3015 ر.س - 100 ر.س = 2915 ر.س");
/// ```
pub fn compute_from_hours(
    record: &mut PayrollRecord,
    currency_symbol: &str,
) -> Vec<AuditStep> {
    let allowances = record.allowances_total();
    let overtime_pay = record.overtime_hours * record.overtime_rate;
    let gross_salary = record.basic_salary + allowances + overtime_pay;
    let deductions = record.insurance_deduction + record.tax_deduction + record.other_deductions;
    let net_salary = gross_salary - deductions;

    let steps = vec![
        AuditStep {
            step_number: 1,
            rule_id: "gross_salary".to_string(),
            rule_name: "Gross Salary (Hours)".to_string(),
            formula: "basic_salary + housing_allowance + transport_allowance + other_allowances + overtime_hours * overtime_rate".to_string(),
            input: serde_json::json!({
                "basic_salary": record.basic_salary.to_string(),
                "allowances": allowances.to_string(),
                "overtime_hours": record.overtime_hours.to_string(),
                "overtime_rate": record.overtime_rate.to_string()
            }),
            output: serde_json::json!({
                "overtime_pay": overtime_pay.to_string(),
                "gross_salary": gross_salary.to_string()
            }),
            reasoning: format!(
                "{} + {} allowances + {}h x {} = {}",
                money(record.basic_salary, currency_symbol),
                money(allowances, currency_symbol),
                record.overtime_hours.normalize(),
                record.overtime_rate.normalize(),
                money(gross_salary, currency_symbol)
            ),
        },
        AuditStep {
            step_number: 2,
            rule_id: "net_salary".to_string(),
            rule_name: "Net Salary (Hours)".to_string(),
            formula: "gross_salary - (insurance_deduction + tax_deduction + other_deductions)"
                .to_string(),
            input: serde_json::json!({
                "gross_salary": gross_salary.to_string(),
                "insurance_deduction": record.insurance_deduction.to_string(),
                "tax_deduction": record.tax_deduction.to_string(),
                "other_deductions": record.other_deductions.to_string()
            }),
            output: serde_json::json!({ "net_salary": net_salary.to_string() }),
            reasoning: format!(
                "{} - {} = {}",
                money(gross_salary, currency_symbol),
                money(deductions, currency_symbol),
                money(net_salary, currency_symbol)
            ),
        },
    ];

    record.gross_salary = gross_salary;
    record.net_salary = net_salary;

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayrollSettings;
    use crate::payroll::compute_from_attendance;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const SYMBOL: &str = "ر.س";

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_record() -> PayrollRecord {
        PayrollRecord::new(
            "EMP-002",
            4,
            2026,
            NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 4, 30).unwrap(),
            dec("4000"),
            &PayrollSettings::default(),
        )
    }

    #[test]
    fn test_gross_includes_allowances_and_overtime_pay() {
        let mut record = create_test_record();
        record.housing_allowance = dec("800");
        record.transport_allowance = dec("300");
        record.other_allowances = dec("100");
        record.overtime_hours = dec("12");
        record.overtime_rate = dec("1.5");

        compute_from_hours(&mut record, SYMBOL);

        assert_eq!(record.gross_salary, dec("5218"));
        assert_eq!(record.net_salary, dec("5218"));
    }

    #[test]
    fn test_only_three_deduction_categories_apply() {
        let mut record = create_test_record();
        record.insurance_deduction = dec("90");
        record.tax_deduction = dec("10");
        record.other_deductions = dec("50");
        record.advance_deduction = dec("1000");
        record.violation_deduction = dec("500");

        compute_from_hours(&mut record, SYMBOL);

        assert_eq!(record.gross_salary, dec("4000"));
        assert_eq!(record.net_salary, dec("3850"));
    }

    #[test]
    fn test_ignores_attendance_day_counts() {
        let mut record = create_test_record();
        record.present_days = 10;
        record.absent_days = 20;

        compute_from_hours(&mut record, SYMBOL);

        assert_eq!(record.gross_salary, dec("4000"));
        assert_eq!(record.net_salary, dec("4000"));
    }

    #[test]
    fn test_leaves_other_derived_fields_untouched() {
        let mut record = create_test_record();
        record.present_days = 30;
        compute_from_attendance(&mut record, SYMBOL);
        let before = record.clone();

        record.overtime_hours = dec("4");
        compute_from_hours(&mut record, SYMBOL);

        assert_eq!(record.daily_salary, before.daily_salary);
        assert_eq!(record.total_salary, before.total_salary);
        assert_eq!(record.total_deductions, before.total_deductions);
        assert_eq!(record.gross_salary, dec("4006"));
    }

    #[test]
    fn test_diverges_from_attendance_path() {
        let mut by_attendance = create_test_record();
        by_attendance.present_days = 20;
        by_attendance.absent_days = 10;
        let mut by_hours = by_attendance.clone();

        compute_from_attendance(&mut by_attendance, SYMBOL);
        compute_from_hours(&mut by_hours, SYMBOL);

        assert_ne!(by_attendance.net_salary, by_hours.net_salary);
    }

    #[test]
    fn test_audit_steps() {
        let mut record = create_test_record();
        record.overtime_hours = dec("2");

        let steps = compute_from_hours(&mut record, SYMBOL);

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].rule_id, "gross_salary");
        assert_eq!(
            dec(steps[0].output["overtime_pay"].as_str().unwrap()),
            dec("3")
        );
        assert_eq!(steps[1].rule_id, "net_salary");
    }

    #[test]
    fn test_reasoning_uses_currency_symbol() {
        let mut record = create_test_record();
        record.housing_allowance = dec("500");
        record.overtime_hours = dec("10");
        record.tax_deduction = dec("100");

        let steps = compute_from_hours(&mut record, SYMBOL);

        assert_eq!(
            steps[0].reasoning,
            "4000 ر.س + 500 ر.س allowances + 10h x 1.5 = 4515 ر.س"
        );
        assert_eq!(steps[1].reasoning, "4515 ر.س - 100 ر.س = 4415 ر.س");
    }
}
