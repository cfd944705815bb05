//! Payroll record model.
//!
//! A [`PayrollRecord`] holds one employee's pay for one month: the inputs
//! collected from attendance and the payroll form, plus the derived
//! monetary fields filled in by the payroll engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollSettings;

/// Lifecycle tag of a payroll record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Editable working copy.
    #[default]
    Draft,
    /// Approved for payment.
    Finalized,
}

fn default_overtime_rate() -> Decimal {
    Decimal::new(15, 1)
}

/// One payroll record per (employee, month, year).
///
/// Input fields are supplied by the caller. The derived fields (`daily_salary`
/// through `gross_salary`) are only ever written by
/// [`compute_from_attendance`](crate::payroll::compute_from_attendance) and
/// [`compute_from_hours`](crate::payroll::compute_from_hours).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Reference to the employee this record pays.
    pub employee_id: String,
    /// Month of the record (1-12).
    pub month: u32,
    /// Year of the record.
    pub year: i32,

    /// First day of the pay period.
    pub period_from: NaiveDate,
    /// Last day of the pay period.
    pub period_to: NaiveDate,
    /// Length of the period in days.
    pub period_days: u32,

    /// Days the employee was present.
    #[serde(default)]
    pub present_days: u32,
    /// Days the employee was absent.
    #[serde(default)]
    pub absent_days: u32,
    /// Days the employee withdrew from duty.
    #[serde(default)]
    pub withdrawal_days: u32,

    /// Monthly base salary.
    pub basic_salary: Decimal,
    /// Overtime expressed in days.
    #[serde(default)]
    pub overtime_days: Decimal,
    /// Overtime multiplier applied to the daily or hourly amount.
    #[serde(default = "default_overtime_rate")]
    pub overtime_rate: Decimal,
    /// Regular monthly hours (edit flow only).
    #[serde(default)]
    pub regular_hours: Decimal,
    /// Overtime hours (edit flow only).
    #[serde(default)]
    pub overtime_hours: Decimal,

    /// Housing allowance.
    #[serde(default)]
    pub housing_allowance: Decimal,
    /// Transport allowance.
    #[serde(default)]
    pub transport_allowance: Decimal,
    /// Any other allowances.
    #[serde(default)]
    pub other_allowances: Decimal,

    /// Salary advance being recovered.
    #[serde(default)]
    pub advance_deduction: Decimal,
    /// Penalty for violations.
    #[serde(default)]
    pub violation_deduction: Decimal,
    /// Insurance contribution.
    #[serde(default)]
    pub insurance_deduction: Decimal,
    /// Tax withheld.
    #[serde(default)]
    pub tax_deduction: Decimal,
    /// Any other deductions.
    #[serde(default)]
    pub other_deductions: Decimal,

    /// `basic_salary / 30`.
    #[serde(default)]
    pub daily_salary: Decimal,
    /// Salary earned for present days.
    #[serde(default)]
    pub due_salary: Decimal,
    /// Overtime pay.
    #[serde(default)]
    pub overtime_due: Decimal,
    /// Due salary plus overtime and allowances.
    #[serde(default)]
    pub total_salary: Decimal,
    /// Deduction for absent days.
    #[serde(default)]
    pub absence_deduction: Decimal,
    /// Deduction for withdrawal days.
    #[serde(default)]
    pub withdrawal_deduction: Decimal,
    /// Sum of every deduction category.
    #[serde(default)]
    pub total_deductions: Decimal,
    /// Take-home pay. May be negative when deductions exceed earnings.
    #[serde(default)]
    pub net_salary: Decimal,
    /// Legacy alias of `total_salary`.
    #[serde(default)]
    pub gross_salary: Decimal,

    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: PayrollStatus,
}

impl PayrollRecord {
    /// Creates a draft record with every optional input at its default.
    ///
    /// `period_days` is the inclusive length of the period, `overtime_rate`
    /// and `regular_hours` come from the payroll settings, and every
    /// attendance count, allowance, deduction and derived field is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_engine::config::PayrollSettings;
    /// use hr_engine::models::{PayrollRecord, PayrollStatus};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let record = PayrollRecord::new(
    ///     "EMP-001",
    ///     3,
    ///     2026,
    ///     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
    ///     Decimal::new(3000, 0),
    ///     &PayrollSettings::default(),
    /// );
    /// assert_eq!(record.period_days, 31);
    /// assert_eq!(record.overtime_rate, Decimal::new(15, 1));
    /// assert_eq!(record.status, PayrollStatus::Draft);
    /// ```
    pub fn new(
        employee_id: impl Into<String>,
        month: u32,
        year: i32,
        period_from: NaiveDate,
        period_to: NaiveDate,
        basic_salary: Decimal,
        settings: &PayrollSettings,
    ) -> Self {
        let period_days = u32::try_from((period_to - period_from).num_days() + 1).unwrap_or(0);

        Self {
            employee_id: employee_id.into(),
            month,
            year,
            period_from,
            period_to,
            period_days,
            present_days: 0,
            absent_days: 0,
            withdrawal_days: 0,
            basic_salary,
            overtime_days: Decimal::ZERO,
            overtime_rate: settings.default_overtime_rate,
            regular_hours: Decimal::from(settings.monthly_hours),
            overtime_hours: Decimal::ZERO,
            housing_allowance: Decimal::ZERO,
            transport_allowance: Decimal::ZERO,
            other_allowances: Decimal::ZERO,
            advance_deduction: Decimal::ZERO,
            violation_deduction: Decimal::ZERO,
            insurance_deduction: Decimal::ZERO,
            tax_deduction: Decimal::ZERO,
            other_deductions: Decimal::ZERO,
            daily_salary: Decimal::ZERO,
            due_salary: Decimal::ZERO,
            overtime_due: Decimal::ZERO,
            total_salary: Decimal::ZERO,
            absence_deduction: Decimal::ZERO,
            withdrawal_deduction: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            net_salary: Decimal::ZERO,
            gross_salary: Decimal::ZERO,
            notes: None,
            status: PayrollStatus::Draft,
        }
    }

    /// Sum of housing, transport and other allowances.
    pub fn allowances_total(&self) -> Decimal {
        self.housing_allowance + self.transport_allowance + self.other_allowances
    }
}
