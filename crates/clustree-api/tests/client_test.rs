#![allow(clippy::unwrap_used)]
// Integration tests for `ConsoleClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use clustree_api::{ConsoleClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ConsoleClient) {
    let server = MockServer::start().await;
    let client = ConsoleClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Group endpoint ──────────────────────────────────────────────────

#[tokio::test]
async fn test_get_group() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/groups/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "name": "AS Cluster",
            "category": "COMPATIBLE",
            "resourceTypeId": 1001
        })))
        .mount(&server)
        .await;

    let group = client.get_group(42).await.unwrap();

    assert_eq!(group.id, 42);
    assert_eq!(group.name, "AS Cluster");
    assert_eq!(group.category, "COMPATIBLE");
    assert_eq!(group.resource_type_id, Some(1001));
}

#[tokio::test]
async fn test_get_group_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/groups/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "no such group",
            "code": "inventory.group.not-found"
        })))
        .mount(&server)
        .await;

    let err = client.get_group(999).await.unwrap_err();

    assert!(err.is_not_found(), "expected not-found, got: {err:?}");
    assert_eq!(err.api_error_code(), Some("inventory.group.not-found"));
}

// ── Cluster graph endpoint ──────────────────────────────────────────

#[tokio::test]
async fn test_get_cluster_graph_recursive_shape() {
    let (server, client) = setup().await;

    let graph = json!({
        "name": "AS Cluster",
        "resourceTypeId": null,
        "resourceKey": null,
        "members": 2,
        "clusterSize": 2,
        "children": [{
            "name": "app.war",
            "resourceTypeId": 2002,
            "resourceKey": "deployment=app.war",
            "members": 1,
            "clusterSize": 2,
            "children": []
        }]
    });

    Mock::given(method("GET"))
        .and(path("/v1/groups/42/cluster-graph"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&graph))
        .mount(&server)
        .await;

    let root = client.get_cluster_graph(42).await.unwrap();

    assert_eq!(root.name, "AS Cluster");
    assert!(root.resource_type_id.is_none());
    assert_eq!(root.children.len(), 1);
    let child = &root.children[0];
    assert_eq!(child.resource_type_id, Some(2002));
    assert_eq!(child.resource_key.as_deref(), Some("deployment=app.war"));
    assert_eq!(child.members, 1);
    assert_eq!(child.cluster_size, 2);
}

#[tokio::test]
async fn test_get_cluster_graph_missing_children_defaults_empty() {
    let (server, client) = setup().await;

    // Leaf nodes may omit "children" entirely.
    Mock::given(method("GET"))
        .and(path("/v1/groups/7/cluster-graph"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Standalone",
            "resourceTypeId": null,
            "resourceKey": null,
            "members": 1,
            "clusterSize": 1
        })))
        .mount(&server)
        .await;

    let root = client.get_cluster_graph(7).await.unwrap();
    assert!(root.children.is_empty());
}

// ── Resource type endpoint ──────────────────────────────────────────

#[tokio::test]
async fn test_get_resource_types_sends_csv_ids() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/resource-types"))
        .and(query_param("ids", "1001,2002"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1001,
                "name": "Application Server",
                "category": "SERVER",
                "singleton": false,
                "subcategory": null
            },
            {
                "id": 2002,
                "name": "WAR",
                "category": "SERVICE",
                "singleton": false,
                "subcategory": "Runtime|Deployments"
            }
        ])))
        .mount(&server)
        .await;

    let types = client.get_resource_types(&[1001, 2002]).await.unwrap();

    assert_eq!(types.len(), 2);
    assert_eq!(types[1].subcategory.as_deref(), Some("Runtime|Deployments"));
    assert!(!types[0].singleton);
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_api_key_header_is_sent() {
    let server = MockServer::start().await;
    let api_key: secrecy::SecretString = "secret-key".to_string().into();
    let client = ConsoleClient::from_api_key(
        &server.uri(),
        &api_key,
        &clustree_api::TransportConfig::default(),
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/groups/1"))
        .and(header("X-API-KEY", "secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "g",
            "category": "MIXED",
            "resourceTypeId": null
        })))
        .mount(&server)
        .await;

    client.get_group(1).await.unwrap();
}

#[tokio::test]
async fn test_unauthorized_maps_to_invalid_api_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/groups/1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.get_group(1).await.unwrap_err();
    assert!(matches!(err, Error::InvalidApiKey), "got: {err:?}");
}

#[tokio::test]
async fn test_deserialization_error_carries_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/groups/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.get_group(1).await.unwrap_err();
    assert!(
        matches!(err, Error::Deserialization { ref body, .. } if body == "not json"),
        "got: {err:?}"
    );
}
