mod common;

use common::{client, requests, resolver, ORG, TOKEN};
use serde_json::json;
use sonarcloud_mcp::managers::projects::{
    ComponentTreeParams, SearchProjectsParams, ShowComponentParams,
};
use sonarcloud_mcp::managers::ProjectsManager;
use sonarcloud_mcp::models::{Paging, Project};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn search_projects_sends_page_and_organization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/components/search"))
        .and(query_param("p", "1"))
        .and(query_param("organization", "acme"))
        .and(query_param_is_missing("qualifiers"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "components": [{"key": "k1", "name": "Project One", "qualifier": "TRK"}],
            "paging": {"pageIndex": 1, "pageSize": 100, "total": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let manager = ProjectsManager::new(client(), resolver(&server, Some("acme")));
    let response = manager
        .search_my_projects(SearchProjectsParams::default())
        .await
        .expect("search");

    assert_eq!(
        response.projects,
        vec![Project {
            key: "k1".to_string(),
            name: "Project One".to_string()
        }]
    );
    assert_eq!(response.paging.total, 1);

    let received = requests(&server).await;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].url.query(), Some("p=1&organization=acme"));
}

#[tokio::test]
async fn search_projects_without_organization_filters_on_projects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/components/search"))
        .and(query_param("p", "2"))
        .and(query_param("qualifiers", "TRK"))
        .and(query_param_is_missing("organization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"components": []})))
        .expect(1)
        .mount(&server)
        .await;

    let manager = ProjectsManager::new(client(), resolver(&server, None));
    let response = manager
        .search_my_projects(SearchProjectsParams {
            page: "2".to_string(),
        })
        .await
        .expect("search");

    assert!(response.projects.is_empty());
    assert_eq!(response.paging, Paging::default());
}

#[tokio::test]
async fn show_component_omits_absent_optionals() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/components/show"))
        .and(query_param("component", "my-project"))
        .and(query_param("branch", "main"))
        .and(query_param_is_missing("pullRequest"))
        .and(query_param("organization", ORG))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "component": {"key": "my-project", "qualifier": "TRK"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let manager = ProjectsManager::new(client(), resolver(&server, Some(ORG)));
    let raw = manager
        .show_component(ShowComponentParams {
            component: "my-project".to_string(),
            branch: Some("main".to_string()),
            pull_request: Some(String::new()),
        })
        .await
        .expect("show");

    assert_eq!(raw["component"]["qualifier"], "TRK");
}

#[tokio::test]
async fn component_tree_joins_lists_and_renders_booleans() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/components/tree"))
        .and(query_param("component", "my-project"))
        .and(query_param("p", "1"))
        .and(query_param("ps", "100"))
        .and(query_param("qualifiers", "FIL,DIR"))
        .and(query_param("s", "name,path"))
        .and(query_param("asc", "false"))
        .and(query_param("strategy", "leaves"))
        .and(query_param_is_missing("branch"))
        .and(query_param_is_missing("q"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"components": []})))
        .expect(1)
        .mount(&server)
        .await;

    let manager = ProjectsManager::new(client(), resolver(&server, None));
    let mut params = ComponentTreeParams::new("my-project");
    params.qualifiers = Some(vec!["FIL".to_string(), "DIR".to_string()]);
    params.sort_fields = Some(vec!["name".to_string(), "path".to_string()]);
    params.asc = Some(false);
    params.strategy = Some("leaves".to_string());

    manager.component_tree(params).await.expect("tree");

    let received = requests(&server).await;
    let keys: Vec<String> = received[0]
        .url
        .query_pairs()
        .map(|(k, _)| k.into_owned())
        .collect();
    assert_eq!(
        keys,
        vec!["component", "p", "ps", "qualifiers", "strategy", "s", "asc"]
    );
}
