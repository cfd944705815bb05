//! Request types for the HR engine API.
//!
//! This module defines the JSON request structures for the payroll and
//! import endpoints. Role creation accepts [`NewRole`](crate::permissions::NewRole)
//! directly, and recomputation accepts a full [`PayrollRecord`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::PayrollSettings;
use crate::models::PayrollRecord;

/// Request body for `POST /payroll/compute`.
///
/// Carries the inputs of a new payroll record. Derived amounts are never
/// accepted from the caller. Omitted optional fields take their defaults
/// from the payroll settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The employee being paid.
    pub employee_id: String,
    /// Month of the record (1-12).
    pub month: u32,
    /// Year of the record.
    pub year: i32,
    /// First day of the pay period.
    pub period_from: NaiveDate,
    /// Last day of the pay period.
    pub period_to: NaiveDate,
    /// Period length; defaults to the inclusive day count.
    #[serde(default)]
    pub period_days: Option<u32>,
    /// Days present.
    #[serde(default)]
    pub present_days: u32,
    /// Days absent.
    #[serde(default)]
    pub absent_days: u32,
    /// Days withdrawn from duty.
    #[serde(default)]
    pub withdrawal_days: u32,
    /// Monthly base salary.
    pub basic_salary: Decimal,
    /// Overtime in days.
    #[serde(default)]
    pub overtime_days: Decimal,
    /// Overtime multiplier; defaults to the configured rate.
    #[serde(default)]
    pub overtime_rate: Option<Decimal>,
    /// Housing allowance.
    #[serde(default)]
    pub housing_allowance: Decimal,
    /// Transport allowance.
    #[serde(default)]
    pub transport_allowance: Decimal,
    /// Other allowances.
    #[serde(default)]
    pub other_allowances: Decimal,
    /// Advance recovery.
    #[serde(default)]
    pub advance_deduction: Decimal,
    /// Violation penalty.
    #[serde(default)]
    pub violation_deduction: Decimal,
    /// Insurance contribution.
    #[serde(default)]
    pub insurance_deduction: Decimal,
    /// Tax withheld.
    #[serde(default)]
    pub tax_deduction: Decimal,
    /// Other deductions.
    #[serde(default)]
    pub other_deductions: Decimal,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl PayrollRequest {
    /// Builds a draft payroll record from the request.
    pub fn into_record(self, settings: &PayrollSettings) -> PayrollRecord {
        let mut record = PayrollRecord::new(
            self.employee_id,
            self.month,
            self.year,
            self.period_from,
            self.period_to,
            self.basic_salary,
            settings,
        );

        if let Some(period_days) = self.period_days {
            record.period_days = period_days;
        }
        if let Some(overtime_rate) = self.overtime_rate {
            record.overtime_rate = overtime_rate;
        }

        record.present_days = self.present_days;
        record.absent_days = self.absent_days;
        record.withdrawal_days = self.withdrawal_days;
        record.overtime_days = self.overtime_days;
        record.housing_allowance = self.housing_allowance;
        record.transport_allowance = self.transport_allowance;
        record.other_allowances = self.other_allowances;
        record.advance_deduction = self.advance_deduction;
        record.violation_deduction = self.violation_deduction;
        record.insurance_deduction = self.insurance_deduction;
        record.tax_deduction = self.tax_deduction;
        record.other_deductions = self.other_deductions;
        record.notes = self.notes;
        record
    }
}

/// Request body for `POST /import/salaries`.
///
/// Cells are taken as they came out of the spreadsheet: strings, numbers
/// or nulls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryImportRequest {
    /// Raw salary cells in row order.
    pub values: Vec<Value>,
}

impl SalaryImportRequest {
    /// Returns each cell as text, with nulls as `None`.
    pub fn cells(&self) -> Vec<Option<String>> {
        self.values
            .iter()
            .map(|value| match value {
                Value::Null => None,
                Value::String(text) => Some(text.clone()),
                other => Some(other.to_string()),
            })
            .collect()
    }
}
