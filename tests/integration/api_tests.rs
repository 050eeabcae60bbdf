//! API integration tests
//!
//! Need a running server with the reference schema and sample projects
//! loaded (`database.run_migrations = true`).

use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};

use buildtrack_server::models::auth::AuthClaims;

const BASE_URL: &str = "http://localhost:8080/api";

/// Sign a token the way the identity provider would
fn auth_token() -> String {
    let secret = std::env::var("SUPABASE_JWT_SECRET")
        .unwrap_or_else(|_| "change-this-secret-in-production".to_string());
    AuthClaims {
        sub: "0d9c5a8e-7f61-4b2a-9c3e-5e4f3a2b1c0d".to_string(),
        aud: "authenticated".to_string(),
        exp: Utc::now().timestamp() + 3600,
        iat: Some(Utc::now().timestamp()),
        email: Some("office@example.com".to_string()),
        role: Some("authenticated".to_string()),
    }
    .create_token(&secret)
    .expect("Failed to sign token")
}

/// Unique suffix so repeated runs do not collide
fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

async fn post(client: &Client, path: &str, body: Value) -> (u16, Value) {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .bearer_auth(auth_token())
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status().as_u16();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn patch(client: &Client, path: &str, body: Value) -> (u16, Value) {
    let response = client
        .patch(format!("{}{}", BASE_URL, path))
        .bearer_auth(auth_token())
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status().as_u16();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn get(client: &Client, path: &str) -> (u16, Value) {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .bearer_auth(auth_token())
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status().as_u16();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn delete(client: &Client, path: &str) -> (u16, Value) {
    let response = client
        .delete(format!("{}{}", BASE_URL, path))
        .bearer_auth(auth_token())
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status().as_u16();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn first_project_id(client: &Client) -> i64 {
    let (status, projects) = get(client, "/projects").await;
    assert_eq!(status, 200);
    projects[0]["id"].as_i64().expect("No sample project")
}

/// Create a tool with the given serials, returning (tool id, serial ids)
async fn create_tool(client: &Client, serials: &[&str]) -> (i64, Vec<i64>) {
    let (status, tool) = post(
        client,
        "/tools",
        json!({ "name": unique("Drill"), "serial_numbers": serials }),
    )
    .await;
    assert_eq!(status, 201, "{}", tool);
    assert_eq!(tool["status"], "Available");
    assert_eq!(tool["quantity"], serials.len());

    let ids = tool["serial_numbers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    (tool["id"].as_i64().unwrap(), ids)
}

async fn assign(client: &Client, project_id: i64, tool_id: i64, serial: &str) -> (u16, Value) {
    post(
        client,
        "/tool-assignments",
        json!({ "project_id": project_id, "serial_number": serial, "tool_id": tool_id }),
    )
    .await
}

async fn schedule_repair(client: &Client, tool_id: i64, serial_id: i64) -> (u16, Value) {
    post(
        client,
        "/maintenance",
        json!({
            "tool_id": tool_id,
            "serial_number_id": serial_id,
            "scheduled_date": "2025-07-01",
            "maintenance_type": "Repair"
        }),
    )
    .await
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_reaches_database() {
    let client = Client::new();
    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore]
async fn test_assignment_and_return_roll_up() {
    let client = Client::new();
    let project_id = first_project_id(&client).await;
    let (tool_id, serial_ids) = create_tool(&client, &["D1", "D2"]).await;

    // One of two units out: tool stays available
    let (status, first) = post(
        &client,
        "/tool-assignments",
        json!({ "project_id": project_id, "serial_number": "D1", "tool_id": tool_id }),
    )
    .await;
    assert_eq!(status, 201, "{}", first);
    assert_eq!(first["tool_status"], "Available");

    // Both out
    let (status, second) = post(
        &client,
        "/tool-assignments",
        json!({ "project_id": project_id, "serial_number": "D2", "tool_id": tool_id }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(second["tool_status"], "Not Available");

    // D1 again: conflict, nothing written
    let (status, err) = post(
        &client,
        "/tool-assignments",
        json!({ "project_id": project_id, "serial_number": "D1", "tool_id": tool_id }),
    )
    .await;
    assert_eq!(status, 409);
    assert!(err["message"].as_str().unwrap().contains("Not Available"));

    let (status, rows) = get(
        &client,
        &format!("/tool-assignments?serial_number_id={}", serial_ids[0]),
    )
    .await;
    assert_eq!(status, 200);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["status"], "Assigned");

    let (_, tool) = get(&client, &format!("/tools/{}", tool_id)).await;
    assert_eq!(tool["status"], "Not Available");

    // Return D1
    let assignment_id = first["assignment"]["id"].as_i64().unwrap();
    let (status, returned) = patch(
        &client,
        &format!("/tool-assignments/{}", assignment_id),
        json!({ "status": "Returned" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(returned["assignment"]["status"], "Returned");
    assert_eq!(returned["tool_status"], "Available");

    // Returning twice is a conflict
    let (status, _) = patch(
        &client,
        &format!("/tool-assignments/{}", assignment_id),
        json!({ "status": "Returned" }),
    )
    .await;
    assert_eq!(status, 409);

    let (_, tool) = get(&client, &format!("/tools/{}", tool_id)).await;
    assert_eq!(tool["status"], "Available");
}

#[tokio::test]
#[ignore]
async fn test_repair_every_unit_then_complete() {
    let client = Client::new();
    let (tool_id, serial_ids) = create_tool(&client, &["R1", "R2"]).await;

    // R2 is still free
    let (status, first) = schedule_repair(&client, tool_id, serial_ids[0]).await;
    assert_eq!(status, 201, "{}", first);
    assert_eq!(first["schedule"]["status"], "Scheduled");
    assert_eq!(first["tool_status"], "Available");

    let (status, second) = schedule_repair(&client, tool_id, serial_ids[1]).await;
    assert_eq!(status, 201, "{}", second);
    assert_eq!(second["tool_status"], "Under Maintenance");

    let (status, listed) = get(&client, &format!("/maintenance?tool_id={}", tool_id)).await;
    assert_eq!(status, 200);
    assert_eq!(listed.as_array().unwrap().len(), 2);

    let schedule_id = first["schedule"]["id"].as_i64().unwrap();
    let (status, completed) = patch(
        &client,
        &format!("/maintenance/{}", schedule_id),
        json!({ "status": "Completed" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(completed["tool_status"], "Available");
    assert!(completed["schedule"]["completed_date"].is_string());

    let (_, tool) = get(&client, &format!("/tools/{}", tool_id)).await;
    assert!(tool["last_maintenance_date"].is_string());

    // A closed schedule stays closed
    let (status, err) = patch(
        &client,
        &format!("/maintenance/{}", schedule_id),
        json!({ "status": "In Progress" }),
    )
    .await;
    assert_eq!(status, 409);
    assert!(err["message"].as_str().unwrap().contains("already Completed"));
}

#[tokio::test]
#[ignore]
async fn test_inspection_leaves_status_alone() {
    let client = Client::new();
    let (tool_id, serial_ids) = create_tool(&client, &["I1"]).await;

    let (status, scheduled) = post(
        &client,
        "/maintenance",
        json!({
            "tool_id": tool_id,
            "serial_number_id": serial_ids[0],
            "scheduled_date": "2025-08-15",
            "maintenance_type": "Inspection"
        }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(scheduled["tool_status"], "Available");
}

#[tokio::test]
#[ignore]
async fn test_unknown_serial_is_not_found() {
    let client = Client::new();
    let project_id = first_project_id(&client).await;

    let (status, _) = post(
        &client,
        "/tool-assignments",
        json!({ "project_id": project_id, "serial_number": unique("missing") }),
    )
    .await;
    assert_eq!(status, 404);
}

#[tokio::test]
#[ignore]
async fn test_forecast_three_months() {
    let client = Client::new();

    let (status, forecast) = post(
        &client,
        "/forecasting/forecast",
        json!({ "name": unique("Quarter"), "horizon": 3, "start_date": "2025-01-15" }),
    )
    .await;
    assert_eq!(status, 201, "{}", forecast);
    assert_eq!(forecast["duration"], 3);

    let items = forecast["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["date"], "2025-02-01");
    assert_eq!(items[2]["date"], "2025-04-01");

    let forecast_id = forecast["id"].as_i64().unwrap();
    let (status, report) = post(&client, "/forecasting/report", json!({ "forecast_id": forecast_id })).await;
    assert_eq!(status, 200);
    assert_eq!(report["points"], 3);
}

#[tokio::test]
#[ignore]
async fn test_material_for_unknown_project() {
    let client = Client::new();

    let (status, _) = post(
        &client,
        "/materials",
        json!({ "project_id": 999_999, "name": "Cement", "quantity": "10", "unit_cost": "8.50" }),
    )
    .await;
    assert_eq!(status, 404);
}

#[tokio::test]
#[ignore]
async fn test_dashboard_counts_every_status() {
    let client = Client::new();

    let (status, dashboard) = get(&client, "/dashboard").await;
    assert_eq!(status, 200);
    assert_eq!(dashboard["tools_by_status"].as_array().unwrap().len(), 3);
}

#[tokio::test]
#[ignore]
async fn test_tool_with_unit_out_cannot_be_deleted() {
    let client = Client::new();
    let project_id = first_project_id(&client).await;
    let (tool_id, _) = create_tool(&client, &["X1"]).await;

    let (status, assignment) = assign(&client, project_id, tool_id, "X1").await;
    assert_eq!(status, 201);

    let (status, err) = delete(&client, &format!("/tools/{}", tool_id)).await;
    assert_eq!(status, 409);
    assert!(err["message"].as_str().unwrap().contains("assigned"));

    // Once returned the tool can go
    let assignment_id = assignment["assignment"]["id"].as_i64().unwrap();
    let (status, _) = patch(
        &client,
        &format!("/tool-assignments/{}", assignment_id),
        json!({ "status": "Returned" }),
    )
    .await;
    assert_eq!(status, 200);

    let (status, _) = delete(&client, &format!("/tools/{}", tool_id)).await;
    assert_eq!(status, 204);
    let (status, _) = get(&client, &format!("/tools/{}", tool_id)).await;
    assert_eq!(status, 404);
}

#[tokio::test]
#[ignore]
async fn test_assigned_unit_cannot_be_dropped_from_tool() {
    let client = Client::new();
    let project_id = first_project_id(&client).await;
    let (tool_id, _) = create_tool(&client, &["U1", "U2"]).await;

    let (status, _) = assign(&client, project_id, tool_id, "U1").await;
    assert_eq!(status, 201);

    let (status, err) = patch(
        &client,
        &format!("/tools/{}", tool_id),
        json!({ "serial_numbers": ["U2", "U3"] }),
    )
    .await;
    assert_eq!(status, 409);
    assert!(err["message"].as_str().unwrap().contains("U1"));

    // Nothing changed
    let (_, tool) = get(&client, &format!("/tools/{}", tool_id)).await;
    assert_eq!(tool["quantity"], 2);
    let serials: Vec<&str> = tool["serial_numbers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["serial_number"].as_str().unwrap())
        .collect();
    assert_eq!(serials, vec!["U1", "U2"]);

    // Dropping the free unit is fine
    let (status, updated) = patch(
        &client,
        &format!("/tools/{}", tool_id),
        json!({ "serial_numbers": ["U1", "U3"] }),
    )
    .await;
    assert_eq!(status, 200, "{}", updated);
    assert_eq!(updated["quantity"], 2);
    assert_eq!(updated["status"], "Available");
}

#[tokio::test]
#[ignore]
async fn test_assigned_unit_cannot_go_to_repair() {
    let client = Client::new();
    let project_id = first_project_id(&client).await;
    let (tool_id, serial_ids) = create_tool(&client, &["A1"]).await;

    let (status, _) = assign(&client, project_id, tool_id, "A1").await;
    assert_eq!(status, 201);

    let (status, err) = schedule_repair(&client, tool_id, serial_ids[0]).await;
    assert_eq!(status, 409);
    assert!(err["message"].as_str().unwrap().contains("return it"));

    let (_, listed) = get(&client, &format!("/maintenance?serial_number_id={}", serial_ids[0])).await;
    assert!(listed.as_array().unwrap().is_empty());

    let (_, tool) = get(&client, &format!("/tools/{}", tool_id)).await;
    assert_eq!(tool["status"], "Not Available");
}

#[tokio::test]
#[ignore]
async fn test_cancelled_repair_releases_unit() {
    let client = Client::new();
    let (tool_id, serial_ids) = create_tool(&client, &["C1"]).await;

    let (status, scheduled) = schedule_repair(&client, tool_id, serial_ids[0]).await;
    assert_eq!(status, 201);
    assert_eq!(scheduled["tool_status"], "Under Maintenance");

    let schedule_id = scheduled["schedule"]["id"].as_i64().unwrap();
    let (status, cancelled) = patch(
        &client,
        &format!("/maintenance/{}", schedule_id),
        json!({ "status": "Cancelled" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(cancelled["schedule"]["status"], "Cancelled");
    assert!(cancelled["schedule"]["completed_date"].is_null());
    assert_eq!(cancelled["tool_status"], "Available");

    // Cancelling is not maintenance done
    let (_, tool) = get(&client, &format!("/tools/{}", tool_id)).await;
    assert_eq!(tool["status"], "Available");
    assert!(tool["last_maintenance_date"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_second_open_repair_keeps_unit_held() {
    let client = Client::new();
    let (tool_id, serial_ids) = create_tool(&client, &["H1"]).await;

    let (status, first) = schedule_repair(&client, tool_id, serial_ids[0]).await;
    assert_eq!(status, 201);
    let (status, second) = schedule_repair(&client, tool_id, serial_ids[0]).await;
    assert_eq!(status, 201);
    assert_eq!(second["tool_status"], "Under Maintenance");

    let first_id = first["schedule"]["id"].as_i64().unwrap();
    let (status, closed) = patch(
        &client,
        &format!("/maintenance/{}", first_id),
        json!({ "status": "Completed" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(closed["tool_status"], "Under Maintenance");

    let (_, tool) = get(&client, &format!("/tools/{}", tool_id)).await;
    assert_eq!(tool["status"], "Under Maintenance");
    assert_eq!(tool["serial_numbers"][0]["status"], "Under Maintenance");

    // Closing the last repair frees it
    let second_id = second["schedule"]["id"].as_i64().unwrap();
    let (status, closed) = patch(
        &client,
        &format!("/maintenance/{}", second_id),
        json!({ "status": "Cancelled" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(closed["tool_status"], "Available");
}

#[tokio::test]
#[ignore]
async fn test_records_filtered_by_project() {
    let client = Client::new();
    let project_id = first_project_id(&client).await;
    let name = unique("Rebar");

    let (status, _) = post(
        &client,
        "/materials",
        json!({
            "project_id": project_id,
            "name": name,
            "quantity": "4",
            "unit_cost": "12.25",
            "purchase_date": "2025-03-10"
        }),
    )
    .await;
    assert_eq!(status, 201);

    let (status, rows) = get(
        &client,
        &format!("/materials?project_id={}&from=2025-03-10&to=2025-03-10", project_id),
    )
    .await;
    assert_eq!(status, 200);
    let rows = rows.as_array().unwrap();
    assert!(rows.iter().any(|r| r["name"] == name.as_str()));
    assert!(rows.iter().all(|r| r["project_id"] == project_id));

    let (status, rows) = get(&client, &format!("/labor?project_id={}", project_id)).await;
    assert_eq!(status, 200);
    assert!(rows.as_array().unwrap().iter().all(|r| r["project_id"] == project_id));
}
