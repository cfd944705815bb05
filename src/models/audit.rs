//! Audit trail model for payroll computations.

use serde::{Deserialize, Serialize};

/// A single step in the audit trail recording how a derived value was computed.
///
/// Each step captures the input, output, and reasoning for one derived field.
///
/// # Example
///
/// ```
/// use hr_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "daily_salary".to_string(),
///     rule_name: "Daily Salary".to_string(),
///     formula: "basic_salary / 30".to_string(),
///     input: serde_json::json!({"basic_salary": "3000"}),
///     output: serde_json::json!({"daily_salary": "100"}),
///     reasoning: "$3000 / 30 = $100".to_string(),
/// };
/// assert_eq!(step.rule_id, "daily_salary");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The identifier of the derived field this step produced.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The formula applied, in terms of record field names.
    pub formula: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the computation.
    pub reasoning: String,
}
