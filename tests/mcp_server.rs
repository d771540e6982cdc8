mod common;

use common::{mcp_server, requests};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn call(server: &sonarcloud_mcp::mcp::server::McpServer, frame: Value) -> Value {
    let response = server
        .handle_line(&frame.to_string())
        .await
        .expect("a response");
    serde_json::to_value(&response).expect("encode")
}

#[tokio::test]
async fn initialize_reports_server_info() {
    let upstream = MockServer::start().await;
    let server = mcp_server(&upstream, None);

    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
    )
    .await;

    assert_eq!(response["result"]["protocolVersion"], "2025-06-18");
    assert_eq!(response["result"]["serverInfo"]["name"], "sonarcloud");
    assert_eq!(
        response["result"]["serverInfo"]["version"],
        env!("CARGO_PKG_VERSION")
    );
    assert!(response["result"]["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn notifications_get_no_reply() {
    let upstream = MockServer::start().await;
    let server = mcp_server(&upstream, None);

    let reply = server
        .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
        .await;
    assert!(reply.is_none());
    assert!(server.handle_line("   ").await.is_none());
}

#[tokio::test]
async fn tools_list_serves_the_catalog() {
    let upstream = MockServer::start().await;
    let server = mcp_server(&upstream, None);

    let response = call(
        &server,
        json!({"jsonrpc": "2.0", "id": "t", "method": "tools/list"}),
    )
    .await;
    let tools = response["result"]["tools"].as_array().expect("tools");
    assert_eq!(tools.len(), 15);
    let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
    assert!(names.contains(&"search_my_sonarqube_projects"));
    assert!(names.contains(&"change_hotspot_status"));
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
}

#[tokio::test]
async fn framing_errors_use_rpc_codes() {
    let upstream = MockServer::start().await;
    let server = mcp_server(&upstream, None);

    let parse = server.handle_line("{not json").await.expect("reply");
    let parse = serde_json::to_value(&parse).expect("encode");
    assert_eq!(parse["error"]["code"], -32700);
    assert!(parse["id"].is_null());

    let invalid = server.handle_line(r#"{"id": 3}"#).await.expect("reply");
    let invalid = serde_json::to_value(&invalid).expect("encode");
    assert_eq!(invalid["error"]["code"], -32600);

    let unknown = call(&server, json!({"jsonrpc": "2.0", "id": 4, "method": "resources/list"})).await;
    assert_eq!(unknown["error"]["code"], -32601);

    let nameless = call(
        &server,
        json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call", "params": {}}),
    )
    .await;
    assert_eq!(nameless["error"]["code"], -32602);
}

#[tokio::test]
async fn tools_call_returns_text_and_structured_content() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/components/search"))
        .and(query_param("p", "1"))
        .and(query_param("organization", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "components": [{"key": "k1", "name": "Project One"}],
            "paging": {"pageIndex": 1, "pageSize": 100, "total": 1}
        })))
        .expect(1)
        .mount(&upstream)
        .await;
    let server = mcp_server(&upstream, Some("acme"));

    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 10,
            "method": "tools/call",
            "params": {"name": "search_my_sonarqube_projects", "arguments": {"page": "1"}}
        }),
    )
    .await;

    let result = &response["result"];
    assert_eq!(result["structuredContent"]["projects"][0]["key"], "k1");
    assert_eq!(result["structuredContent"]["paging"]["pageSize"], 100);
    let text = result["content"][0]["text"].as_str().expect("text");
    let decoded: Value = serde_json::from_str(text).expect("json text");
    assert_eq!(decoded, result["structuredContent"]);
    assert_eq!(result["content"][0]["type"], "text");
    assert_eq!(result["_meta"]["tool"], "search_my_sonarqube_projects");
    assert!(result["_meta"]["trace_id"].as_str().is_some());
}

#[tokio::test]
async fn schema_violations_never_reach_upstream() {
    let upstream = MockServer::start().await;
    let server = mcp_server(&upstream, Some("acme"));

    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 11,
            "method": "tools/call",
            "params": {
                "name": "change_hotspot_status",
                "arguments": {"hotspot": "HS1", "status": "CLOSED"}
            }
        }),
    )
    .await;

    assert_eq!(response["error"]["code"], -32602);
    let message = response["error"]["message"].as_str().expect("message");
    assert!(message.starts_with("Invalid arguments for change_hotspot_status"));
    assert!(requests(&upstream).await.is_empty());
}

#[tokio::test]
async fn configuration_errors_map_to_invalid_request() {
    let upstream = MockServer::start().await;
    let server = mcp_server(&upstream, None);

    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 12,
            "method": "tools/call",
            "params": {"name": "list_quality_gates", "arguments": {}}
        }),
    )
    .await;

    assert_eq!(response["error"]["code"], -32600);
    let message = response["error"]["message"].as_str().expect("message");
    assert!(message.contains("code: CONFIGURATION_ERROR"));
    assert!(message.contains("list_quality_gates requires SONARCLOUD_ORGANIZATION"));
}

#[tokio::test]
async fn upstream_failures_report_status_and_body() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hotspots/show"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Hotspot not found"))
        .mount(&upstream)
        .await;
    let server = mcp_server(&upstream, None);

    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 13,
            "method": "tools/call",
            "params": {"name": "show_hotspot", "arguments": {"hotspot": "nope"}}
        }),
    )
    .await;

    assert_eq!(response["error"]["code"], -32603);
    let message = response["error"]["message"].as_str().expect("message");
    assert!(message.contains("status: 404"));
    assert!(message.contains("body: Hotspot not found"));
}

#[tokio::test]
async fn unknown_tool_suggests_close_names() {
    let upstream = MockServer::start().await;
    let server = mcp_server(&upstream, None);

    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 14,
            "method": "tools/call",
            "params": {"name": "show_hotspots", "arguments": {}}
        }),
    )
    .await;

    assert_eq!(response["error"]["code"], -32602);
    let message = response["error"]["message"].as_str().expect("message");
    assert!(message.contains("show_hotspot"));
}
