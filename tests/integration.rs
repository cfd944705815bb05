//! Integration tests for the HR engine.
//!
//! This test suite drives the HTTP router end to end:
//! - Attendance-based payroll computation
//! - Hours-based payroll recomputation
//! - Permission lookups per role
//! - Role administration and its rejection reasons
//! - Salary import sanitizing
//! - Role document persistence across reloads

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use hr_engine::api::{AppState, USER_NAME_HEADER, USER_ROLE_HEADER, create_router};
use hr_engine::config::{ConfigLoader, ROLE_DOCUMENT_FILE};
use hr_engine::permissions::InMemoryUserDirectory;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::builtin().expect("Failed to load config");
    create_router(AppState::new(config, Arc::new(InMemoryUserDirectory::new())))
}

fn create_router_with_users(users: Arc<InMemoryUserDirectory>) -> Router {
    let config = ConfigLoader::builtin().expect("Failed to load config");
    create_router(AppState::new(config, users))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal serialized as a JSON string.
fn decimal_at(value: &Value, field: &str) -> Decimal {
    decimal(value[field].as_str().unwrap_or_else(|| panic!("{} missing", field)))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn post(uri: &str, role: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(role) = role {
        builder = builder
            .header(USER_ROLE_HEADER, role)
            .header(USER_NAME_HEADER, "tester");
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, role: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(role) = role {
        builder = builder.header(USER_ROLE_HEADER, role);
    }
    builder.body(Body::empty()).unwrap()
}

fn delete(uri: &str, role: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(role) = role {
        builder = builder.header(USER_ROLE_HEADER, role);
    }
    builder.body(Body::empty()).unwrap()
}

fn payroll_request(basic_salary: &str, present_days: u32, absent_days: u32) -> Value {
    json!({
        "employee_id": "EMP-100",
        "month": 3,
        "year": 2026,
        "period_from": "2026-03-01",
        "period_to": "2026-03-31",
        "present_days": present_days,
        "absent_days": absent_days,
        "basic_salary": basic_salary
    })
}

fn auditor_role() -> Value {
    json!({
        "key": "auditor",
        "name": "Auditor",
        "modules": {
            "payroll": {"view": true, "fields": ["deductions"]},
            "employees": {"view": true, "fields": ["all"]}
        }
    })
}

// =============================================================================
// Payroll computation
// =============================================================================

#[tokio::test]
async fn test_full_attendance_month() {
    let router = create_router_for_test();

    let (status, body) = send(
        &router,
        post("/payroll/compute", Some("admin"), payroll_request("3000", 30, 0)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let record = &body["record"];
    assert_eq!(decimal_at(record, "daily_salary"), decimal("100"));
    assert_eq!(decimal_at(record, "due_salary"), decimal("3000"));
    assert_eq!(decimal_at(record, "total_salary"), decimal("3000"));
    assert_eq!(decimal_at(record, "net_salary"), decimal("3000"));
    assert_eq!(decimal_at(record, "gross_salary"), decimal("3000"));
    assert_eq!(record["status"], "draft");
    assert_eq!(body["method"], "attendance");
}

#[tokio::test]
async fn test_absences_overtime_and_housing() {
    let router = create_router_for_test();
    let mut request = payroll_request("3000", 25, 5);
    request["overtime_days"] = json!("2");
    request["overtime_rate"] = json!("1.5");
    request["housing_allowance"] = json!("500");

    let (status, body) = send(&router, post("/payroll/compute", Some("manager"), request)).await;

    assert_eq!(status, StatusCode::OK);
    let record = &body["record"];
    assert_eq!(decimal_at(record, "daily_salary"), decimal("100"));
    assert_eq!(decimal_at(record, "due_salary"), decimal("2500"));
    assert_eq!(decimal_at(record, "overtime_due"), decimal("300"));
    assert_eq!(decimal_at(record, "total_salary"), decimal("3300"));
    assert_eq!(decimal_at(record, "absence_deduction"), decimal("500"));
    assert_eq!(decimal_at(record, "total_deductions"), decimal("500"));
    assert_eq!(decimal_at(record, "net_salary"), decimal("2800"));
}

#[tokio::test]
async fn test_over_deduction_yields_negative_net() {
    let router = create_router_for_test();
    let mut request = payroll_request("3000", 10, 0);
    request["advance_deduction"] = json!("1500");

    let (status, body) = send(&router, post("/payroll/compute", Some("admin"), request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_at(&body["record"], "net_salary"), decimal("-500"));
}

#[tokio::test]
async fn test_daily_salary_ignores_period_length() {
    let router = create_router_for_test();
    let mut request = payroll_request("3100", 28, 0);
    request["period_from"] = json!("2026-02-01");
    request["period_to"] = json!("2026-02-28");

    let (_, body) = send(&router, post("/payroll/compute", Some("admin"), request)).await;

    let record = &body["record"];
    assert_eq!(record["period_days"], 28);
    assert_eq!(
        decimal_at(record, "daily_salary"),
        decimal("3100") / decimal("30")
    );
}

#[tokio::test]
async fn test_audit_trail_lists_every_derived_field() {
    let router = create_router_for_test();

    let (_, body) = send(
        &router,
        post("/payroll/compute", Some("admin"), payroll_request("3000", 30, 0)),
    )
    .await;

    let rules: Vec<&str> = body["audit_steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|step| step["rule_id"].as_str().unwrap())
        .collect();
    assert_eq!(
        rules,
        vec![
            "daily_salary",
            "due_salary",
            "overtime_due",
            "total_salary",
            "absence_deduction",
            "withdrawal_deduction",
            "total_deductions",
            "net_salary",
            "gross_salary"
        ]
    );
    assert!(body["calculation_id"].is_string());
    assert_eq!(body["engine_version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_reversed_period_is_rejected() {
    let router = create_router_for_test();
    let mut request = payroll_request("3000", 30, 0);
    request["period_from"] = json!("2026-03-31");
    request["period_to"] = json!("2026-03-01");

    let (status, body) = send(&router, post("/payroll/compute", Some("admin"), request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PAYROLL");
}

#[tokio::test]
async fn test_negative_allowance_is_rejected() {
    let router = create_router_for_test();
    let mut request = payroll_request("3000", 30, 0);
    request["transport_allowance"] = json!("-50");

    let (status, body) = send(&router, post("/payroll/compute", Some("admin"), request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("transport_allowance"));
}

#[tokio::test]
async fn test_amounts_beyond_decimal_range_are_rejected() {
    let router = create_router_for_test();
    let mut request = payroll_request("79228162514264337593543950335", 30, 0);
    request["housing_allowance"] = json!("79228162514264337593543950335");

    let (status, body) = send(&router, post("/payroll/compute", Some("admin"), request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PAYROLL");
    assert!(body["message"].as_str().unwrap().contains("basic_salary"));
}

#[tokio::test]
async fn test_oversized_day_counts_are_rejected() {
    let router = create_router_for_test();

    let (status, body) = send(
        &router,
        post("/payroll/compute", Some("admin"), payroll_request("3000", 367, 0)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("present_days"));
}

#[tokio::test]
async fn test_recompute_rejects_oversized_overtime_hours() {
    let router = create_router_for_test();
    let (_, created) = send(
        &router,
        post("/payroll/compute", Some("admin"), payroll_request("3000", 30, 0)),
    )
    .await;
    let mut record = created["record"].clone();
    record["overtime_hours"] = json!("79228162514264337593543950335");
    record["overtime_rate"] = json!("2");

    let (status, body) = send(&router, post("/payroll/recompute", Some("manager"), record)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PAYROLL");
    assert!(body["message"].as_str().unwrap().contains("overtime_hours"));
}

#[tokio::test]
async fn test_missing_salary_is_validation_error() {
    let router = create_router_for_test();
    let request = json!({
        "employee_id": "EMP-100",
        "month": 3,
        "year": 2026,
        "period_from": "2026-03-01",
        "period_to": "2026-03-31"
    });

    let (status, body) = send(&router, post("/payroll/compute", Some("admin"), request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_employee_cannot_compute_payroll() {
    let router = create_router_for_test();

    let (status, body) = send(
        &router,
        post("/payroll/compute", Some("employee"), payroll_request("3000", 30, 0)),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["message"].as_str().unwrap().contains("payroll"));
}

// =============================================================================
// Payroll recomputation
// =============================================================================

#[tokio::test]
async fn test_recompute_uses_hours_path() {
    let router = create_router_for_test();
    let mut request = payroll_request("3000", 25, 5);
    request["housing_allowance"] = json!("500");

    let (_, created) = send(&router, post("/payroll/compute", Some("admin"), request)).await;
    let mut record = created["record"].clone();
    record["overtime_hours"] = json!("10");
    record["insurance_deduction"] = json!("200");

    let (status, body) = send(&router, post("/payroll/recompute", Some("manager"), record)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["method"], "hours");
    let record = &body["record"];
    // 3000 + 500 + 10 x 1.5
    assert_eq!(decimal_at(record, "gross_salary"), decimal("3515"));
    assert_eq!(decimal_at(record, "net_salary"), decimal("3315"));
    // Attendance-derived fields keep their earlier values
    assert_eq!(decimal_at(record, "total_salary"), decimal("3000"));
    assert_eq!(decimal_at(record, "absence_deduction"), decimal("500"));
    assert_eq!(body["audit_steps"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_recompute_requires_edit_permission() {
    let router = create_router_for_test();
    let (_, created) = send(
        &router,
        post("/payroll/compute", Some("admin"), payroll_request("3000", 30, 0)),
    )
    .await;

    let (status, _) = send(
        &router,
        post("/payroll/recompute", Some("hr"), created["record"].clone()),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Permission lookups
// =============================================================================

#[tokio::test]
async fn test_permission_matrix() {
    let router = create_router_for_test();

    let (_, employee) = send(&router, get("/permissions/payroll", Some("employee"))).await;
    assert_eq!(employee["view"], false);

    let (_, admin) = send(&router, get("/permissions/payroll", Some("admin"))).await;
    assert_eq!(admin["view"], true);
    assert_eq!(admin["delete"], true);
    assert_eq!(
        admin["fields"],
        json!(["salary_components", "deductions", "working_hours"])
    );

    let (_, unknown) = send(&router, get("/permissions/payroll", Some("nonexistent_role"))).await;
    assert_eq!(unknown["view"], false);

    let (status, anonymous) = send(&router, get("/permissions/employees", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(anonymous["view"], false);
    assert_eq!(anonymous["fields"], json!([]));
}

#[tokio::test]
async fn test_hr_sees_salary_components_only() {
    let router = create_router_for_test();

    let (_, hr) = send(&router, get("/permissions/payroll", Some("hr"))).await;

    assert_eq!(hr["view"], true);
    assert_eq!(hr["add"], false);
    assert_eq!(hr["edit"], false);
    assert_eq!(hr["fields"], json!(["salary_components"]));
}

// =============================================================================
// Role administration
// =============================================================================

#[tokio::test]
async fn test_add_role_then_query_it() {
    let router = create_router_for_test();

    let (status, body) = send(&router, post("/roles", Some("admin"), auditor_role())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Auditor");
    assert_eq!(body["modules"]["employees"]["fields"], "all");
    assert_eq!(body["modules"]["assets"]["view"], false);

    let (_, payroll) = send(&router, get("/permissions/payroll", Some("auditor"))).await;
    assert_eq!(payroll["view"], true);
    assert_eq!(payroll["edit"], false);
    assert_eq!(payroll["fields"], json!(["deductions"]));

    let (_, assets) = send(&router, get("/permissions/assets", Some("auditor"))).await;
    assert_eq!(assets["view"], false);
}

#[tokio::test]
async fn test_add_role_rejections_are_distinct() {
    let router = create_router_for_test();

    let (status, body) = send(&router, post("/roles", Some("admin"), auditor_role())).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);

    let (status, duplicate) = send(&router, post("/roles", Some("admin"), auditor_role())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(duplicate["code"], "DUPLICATE_ROLE");

    let (status, missing) = send(
        &router,
        post("/roles", Some("admin"), json!({"key": "clerk", "name": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(missing["code"], "MISSING_FIELD");

    let (status, dangling) = send(
        &router,
        post(
            "/roles",
            Some("admin"),
            json!({
                "key": "clerk",
                "name": "Clerk",
                "modules": {"assets": {"view": true, "fields": ["warranty"]}}
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(dangling["code"], "UNKNOWN_FIELD_GROUP");
}

#[tokio::test]
async fn test_role_administration_requires_admin() {
    let router = create_router_for_test();

    let (status, body) = send(&router, post("/roles", Some("manager"), auditor_role())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, _) = send(&router, post("/roles", None, auditor_role())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&router, delete("/roles/auditor", Some("hr"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_protected_role_regardless_of_users() {
    let users = Arc::new(InMemoryUserDirectory::new());
    let router = create_router_with_users(users.clone());

    let (status, body) = send(&router, delete("/roles/admin", Some("admin"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "PROTECTED_ROLE");

    users.assign("lina", "employee");
    let (status, body) = send(&router, delete("/roles/employee", Some("admin"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "PROTECTED_ROLE");
}

#[tokio::test]
async fn test_delete_custom_role_lifecycle() {
    let users = Arc::new(InMemoryUserDirectory::new());
    let router = create_router_with_users(users.clone());
    send(&router, post("/roles", Some("admin"), auditor_role())).await;

    users.assign("nour", "auditor");
    let (status, body) = send(&router, delete("/roles/auditor", Some("admin"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ROLE_IN_USE");
    assert!(body["message"].as_str().unwrap().contains("1 user(s)"));

    users.assign("nour", "hr");
    let (status, body) = send(&router, delete("/roles/auditor", Some("admin"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"key": "auditor", "name": "Auditor"}));

    let (status, body) = send(&router, delete("/roles/auditor", Some("admin"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ROLE_NOT_FOUND");
}

#[tokio::test]
async fn test_role_changes_survive_reload() {
    let dir: PathBuf = std::env::temp_dir().join(format!("hr_engine_reload_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    for file in ["modules.yaml", "roles.yaml", "payroll.yaml"] {
        fs::copy(PathBuf::from("./config/default").join(file), dir.join(file)).unwrap();
    }

    let config = ConfigLoader::load(&dir).unwrap();
    let router = create_router(AppState::new(config, Arc::new(InMemoryUserDirectory::new())));
    let (status, _) = send(&router, post("/roles", Some("admin"), auditor_role())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(dir.join(ROLE_DOCUMENT_FILE).exists());

    let reloaded = ConfigLoader::load(&dir).unwrap();
    assert!(reloaded.permissions().role("auditor").is_some());
    assert_eq!(reloaded.permissions().roles().len(), 6);

    let _ = fs::remove_dir_all(&dir);
}

// =============================================================================
// Salary import
// =============================================================================

#[tokio::test]
async fn test_import_salaries() {
    let router = create_router_for_test();
    let request = json!({"values": ["", "-500", "2,000,000", "4500 ر.س", "NULL", "abc", 7250.5]});

    let (status, body) = send(&router, post("/import/salaries", Some("manager"), request)).await;

    assert_eq!(status, StatusCode::OK);
    let salaries: Vec<Decimal> = body["salaries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| decimal(v.as_str().unwrap()))
        .collect();
    assert_eq!(
        salaries,
        vec![
            decimal("3000"),
            decimal("3000"),
            decimal("50000"),
            decimal("4500"),
            decimal("3000"),
            decimal("3000"),
            decimal("7250.5"),
        ]
    );
}

#[tokio::test]
async fn test_import_requires_employee_add() {
    let router = create_router_for_test();

    let (status, _) = send(
        &router,
        post("/import/salaries", Some("employee"), json!({"values": ["3000"]})),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_builtin_roles_reference_defined_field_groups() {
    let config = ConfigLoader::builtin().unwrap();
    let table = config.permissions();

    for (key, role) in table.roles() {
        for (module, permission) in &role.modules {
            let definition = table
                .module(module)
                .unwrap_or_else(|| panic!("role '{}' grants unknown module '{}'", key, module));
            if let hr_engine::permissions::FieldAccess::Explicit(groups) = &permission.fields {
                for group in groups {
                    assert!(
                        definition.has_field_group(group),
                        "role '{}' references '{}' in '{}'",
                        key,
                        group,
                        module
                    );
                }
            }
        }
    }
}
