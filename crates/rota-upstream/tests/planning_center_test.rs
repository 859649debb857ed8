//! Integration tests for `PlanningCenterClient` against a mock upstream.

use rota_config::UpstreamConfig;
use rota_core::RotaError;
use rota_upstream::{MemberStatus, PlanningCenterClient, RosterSource, UpstreamQuery};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PlanningCenterClient {
    let config = UpstreamConfig {
        base_url: server.uri(),
        app_id: "app".to_string(),
        app_secret: "secret".to_string(),
        ..UpstreamConfig::default()
    };
    PlanningCenterClient::new(&config).expect("client")
}

async fn mount_plan(server: &MockServer, service_type: &str, plan_id: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/service_types/{}/plans", service_type)))
        .and(query_param("filter", "future"))
        .and(query_param("per_page", "1"))
        .and(header("authorization", "Basic YXBwOnNlY3JldA=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "type": "Plan",
                "id": plan_id,
                "attributes": { "short_dates": "March 3", "sort_date": "2024-03-03T09:00:00Z" },
                "links": { "self": format!("{}/service_types/{}/plans/{}", server.uri(), service_type, plan_id) }
            }]
        })))
        .mount(server)
        .await;
}

async fn mount_members_and_teams(server: &MockServer, service_type: &str, plan_id: &str) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/service_types/{}/plans/{}/team_members",
            service_type, plan_id
        )))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "type": "PlanPerson",
                "id": "900",
                "attributes": {
                    "name": "Alice",
                    "status": "C",
                    "photo_thumbnail": "https://avatars.test/alice.png",
                    "team_position_name": "Usher"
                },
                "relationships": { "team": { "data": { "type": "Team", "id": "10" } } }
            }],
            "included": []
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/service_types/{}/teams", service_type)))
        .and(query_param("include", "team_positions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "type": "Team",
                "id": "10",
                "attributes": { "name": "Welcome" },
                "relationships": {
                    "team_positions": { "data": [{ "type": "TeamPosition", "id": "100" }] }
                }
            }],
            "included": [{
                "type": "TeamPosition",
                "id": "100",
                "attributes": { "name": "Usher", "sequence": 2 }
            }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_service_collects_all_records() {
    let server = MockServer::start().await;
    mount_plan(&server, "1134523", "55").await;
    mount_members_and_teams(&server, "1134523", "55").await;

    let client = client_for(&server);
    let records = client
        .fetch_service("1134523", &UpstreamQuery::new())
        .await
        .expect("fetch");

    assert_eq!(records.plan.id, "55");
    assert_eq!(records.plan.attributes.short_dates, "March 3");
    assert_eq!(records.teams.len(), 1);
    assert_eq!(records.positions[0].attributes.sequence, Some(2));
    assert_eq!(records.members[0].attributes.status, MemberStatus::Confirmed);
    assert_eq!(records.members[0].team_id(), Some("10"));
}

#[tokio::test]
async fn test_offset_is_forwarded_to_plans() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service_types/1/plans"))
        .and(query_param("offset", "2"))
        .and(query_param("per_page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "77",
                "attributes": { "short_dates": "March 17" },
                "links": { "self": format!("{}/service_types/1/plans/77", server.uri()) }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut query = UpstreamQuery::new();
    query.insert("offset".to_string(), "2".to_string());
    query.insert("per_page".to_string(), "50".to_string());

    let plan = client_for(&server).next_plan("1", &query).await.expect("plan");
    assert_eq!(plan.id, "77");
}

#[tokio::test]
async fn test_no_future_plan_is_an_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service_types/1/plans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .fetch_service("1", &UpstreamQuery::new())
        .await;
    assert!(matches!(result, Err(RotaError::ExternalService { .. })));
}

#[tokio::test]
async fn test_non_success_status_fails_the_fetch() {
    let server = MockServer::start().await;
    mount_plan(&server, "1", "55").await;

    Mock::given(method("GET"))
        .and(path("/service_types/1/plans/55/team_members"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/service_types/1/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [], "included": [] })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_service("1", &UpstreamQuery::new())
        .await
        .unwrap_err();
    assert!(err.is_upstream());
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_malformed_payload_fails_the_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service_types/1/plans"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .next_plan("1", &UpstreamQuery::new())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("malformed payload"));
}
