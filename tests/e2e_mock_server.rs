//! E2E tests using the mock 99 server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use taxis99::mock_server::{Fixtures, MockServer, MockState};
use taxis99::{Client, Context, CostCenter, Filter, Phone};

fn client(server: &MockServer) -> Client {
    Client::builder()
        .api_key("test-key")
        .company_id("47a3083b-5d03-4e05-ad9d-9fd6fddd613e")
        .base_url(server.url())
        .build()
        .unwrap()
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    // After shutdown, server should not respond
    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Authentication Tests
// =============================================================================

#[tokio::test]
async fn test_wrong_api_key_is_rejected() {
    let state = MockState::new()
        .with_company(Fixtures::company())
        .with_required_api_key("secret");
    let server = MockServer::with_state(state).await;

    let err = client(&server)
        .companies()
        .find(&Context::new())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(401));
    assert_eq!(err.as_api_error().unwrap().message, "Unauthorized");

    let authorized = Client::builder()
        .api_key("secret")
        .base_url(server.url())
        .build()
        .unwrap();
    let companies = authorized.companies().find(&Context::new()).await.unwrap();
    assert_eq!(companies.len(), 1);

    server.shutdown().await;
}

#[tokio::test]
async fn test_company_id_reaches_server() {
    let server = MockServer::start().await;
    let client = client(&server);

    client.companies().find(&Context::new()).await.unwrap();
    assert_eq!(
        server.state().read().await.last_company_id.as_deref(),
        Some("47a3083b-5d03-4e05-ad9d-9fd6fddd613e")
    );

    let ctx = Context::new().with_company_id("123");
    client.companies().find(&ctx).await.unwrap();
    assert_eq!(
        server.state().read().await.last_company_id.as_deref(),
        Some("123")
    );

    server.shutdown().await;
}

// =============================================================================
// Cost Center Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_cost_center_lifecycle() {
    let server = MockServer::start().await;
    let client = client(&server);
    let ctx = Context::new();

    // Step 1: Search the default fixtures
    let filter = Filter::new().with("search", "sales");
    let found = client
        .cost_centers()
        .find(&ctx, Some(&filter))
        .await
        .unwrap();
    assert_eq!(found.len(), 2);

    // Step 2: Create a new one
    let created = client
        .cost_centers()
        .create(
            &ctx,
            &CostCenter {
                name: "Marketing".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(created.id > 3);
    assert!(created.enabled);

    // Step 3: Remove it
    client.cost_centers().remove(&ctx, created.id).await.unwrap();
    let all = client.cost_centers().find(&ctx, None).await.unwrap();
    assert_eq!(all.len(), 3);

    // Step 4: Removing again is a 404
    let err = client
        .cost_centers()
        .remove(&ctx, created.id)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));

    server.shutdown().await;
}

#[tokio::test]
async fn test_create_cost_center_without_name_is_rejected() {
    let server = MockServer::start_empty().await;

    let err = client(&server)
        .cost_centers()
        .create(&Context::new(), &CostCenter::default())
        .await
        .unwrap_err();

    let api = err.as_api_error().unwrap();
    assert!(api.is_validation());
    assert_eq!(api.errors[0].field.as_deref(), Some("costCenter.name"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_pagination() {
    let server = MockServer::start().await;
    let client = client(&server);

    let filter = Filter::new().with("limit", "2").with("page", "2");
    let page = client
        .cost_centers()
        .find(&Context::new(), Some(&filter))
        .await
        .unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Sales Support");

    server.shutdown().await;
}

// =============================================================================
// Employee Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_employee_lifecycle() {
    let server = MockServer::start_empty().await;
    let client = client(&server);
    let ctx = Context::new();

    // Step 1: Register
    let mut employee = Fixtures::employee(0, "Carla Souza", "11122233344");
    employee.external_id = 777;
    let created = client
        .employees()
        .create(&ctx, &employee, true)
        .await
        .unwrap();
    assert!(created.id > 0);

    // Step 2: Look up by external id
    let by_external = client
        .employees()
        .find_by_external_id(&ctx, 777)
        .await
        .unwrap();
    assert_eq!(by_external.len(), 1);
    assert_eq!(by_external[0].id, created.id);

    // Step 3: Update
    let mut changed = created.clone();
    changed.email = "carla@empresa.com.br".to_string();
    let updated = client.employees().update(&ctx, &changed).await.unwrap();
    assert_eq!(updated.email, "carla@empresa.com.br");

    // Step 4: Remove
    client.employees().remove(&ctx, created.id).await.unwrap();
    assert!(client.employees().find(&ctx, None).await.unwrap().is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn test_invalid_phone_number_is_rejected() {
    let server = MockServer::start_empty().await;

    let mut employee = Fixtures::employee(0, "Carla Souza", "11122233344");
    employee.phone = Some(Phone {
        number: "12345".to_string(),
        country: "BRA".to_string(),
    });

    let err = client(&server)
        .employees()
        .create(&Context::new(), &employee, false)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Error Status Code: 422; Message: employee.phone: error.invalidPhoneNumber."
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_find_employees_by_national_id() {
    let server = MockServer::start().await;

    let filter = Filter::new().with("nationalId", "12345678900");
    let employees = client(&server)
        .employees()
        .find(&Context::new(), Some(&filter))
        .await
        .unwrap();

    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].name, "Maria Santos");

    server.shutdown().await;
}

#[tokio::test]
async fn test_employee_cost_center_assignment() {
    let server = MockServer::start().await;
    let client = client(&server);
    let ctx = Context::new();

    let assigned = client
        .employees()
        .find_cost_centers(&ctx, 125)
        .await
        .unwrap();
    assert_eq!(assigned.len(), 2);

    // Unknown ids are dropped by the server
    let ids = client
        .employees()
        .update_cost_centers(&ctx, 126, &[3, 99])
        .await
        .unwrap();
    assert_eq!(ids, vec![3]);

    let via_users = client.users().cost_centers(&ctx, 126).await.unwrap();
    assert_eq!(via_users[0].name, "Sales Support");

    server.shutdown().await;
}

#[tokio::test]
async fn test_users_view_of_employees() {
    let server = MockServer::start().await;

    let filter = Filter::new().with("search", "santos");
    let users = client(&server)
        .users()
        .find(&Context::new(), Some(&filter))
        .await
        .unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].external_id, "12500");
    assert!(users.iter().all(|u| !u.phone.number.is_empty()));

    server.shutdown().await;
}
