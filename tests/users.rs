//! Tests for the user service.

use taxis99::{Client, Context, Filter, User, UserPhone};
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> Client {
    Client::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_find_users() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/employees"))
        .and(query_param("limit", "1"))
        .and(query_param_is_missing("invalid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 126,
            "name": "Maria Santos",
            "phone": { "number": "11988887777", "country": "BRA" },
            "email": "maria.santos@empresa.com.br",
            "externalId": "ms-126",
            "categories": ["pop99"]
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let filter = Filter::new().with("limit", "1").with("invalid", "x");
    let users = client(&mock_server)
        .users()
        .find(&Context::new(), Some(&filter))
        .await
        .unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].external_id, "ms-126");
    assert_eq!(users[0].phone.number, "11988887777");
}

#[tokio::test]
async fn test_create_user_sends_mandatory_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/employees"))
        .and(body_json(serde_json::json!({
            "employee": {
                "name": "Ana Lima",
                "phone": { "number": "11977776666" },
                "email": "ana.lima@empresa.com.br",
                "categories": []
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 200,
            "name": "Ana Lima",
            "phone": { "number": "11977776666" },
            "email": "ana.lima@empresa.com.br",
            "categories": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let user = User {
        name: "Ana Lima".to_string(),
        phone: UserPhone {
            number: "11977776666".to_string(),
            ..Default::default()
        },
        email: "ana.lima@empresa.com.br".to_string(),
        ..Default::default()
    };

    let created = client(&mock_server)
        .users()
        .create(&Context::new(), &user, false)
        .await
        .unwrap();

    assert_eq!(created.id, 200);
}

#[tokio::test]
async fn test_user_cost_centers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/employees/126/costcenter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 2, "name": "Engineering" }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cost_centers = client(&mock_server)
        .users()
        .cost_centers(&Context::new(), 126)
        .await
        .unwrap();

    assert_eq!(cost_centers[0].id, 2);
}

#[tokio::test]
async fn test_find_users_with_numeric_external_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 125,
            "name": "José Santos",
            "email": "jose.santos@empresa.com.br",
            "phone": { "number": "11999999999", "country": "BRA" },
            "nationalId": "98765432100",
            "enabled": true,
            "externalId": 55091,
            "categories": ["regular-taxi", "pop99"]
        }])))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let employees = client.employees().find(&Context::new(), None).await.unwrap();
    let users = client.users().find(&Context::new(), None).await.unwrap();

    assert_eq!(employees[0].external_id, 55091);
    assert_eq!(users[0].external_id, "55091");
    assert_eq!(users[0].national_id, "98765432100");
}
