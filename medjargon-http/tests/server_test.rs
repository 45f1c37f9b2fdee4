use medjargon_core::config::ServiceConfig;
use medjargon_http::{
    handlers::test_helpers::create_test_service,
    server::{ServerConfig, start_server},
    start_with_config,
};
use std::net::TcpListener;
use std::time::Duration;
use tokio::time::timeout;

#[test]
fn test_server_config_default() {
    let config = ServerConfig::default();

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 3000);
}

#[test]
fn test_server_address_parsing() {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 8081,
    };

    let addr = config.socket_addr().unwrap();
    assert_eq!(addr.ip().to_string(), "127.0.0.1");
    assert_eq!(addr.port(), 8081);

    let bad = ServerConfig {
        host: "not a host".to_string(),
        port: 8081,
    };
    assert!(bad.socket_addr().is_err());
}

#[tokio::test]
async fn test_startup_fails_on_missing_lexicon() {
    let service_config = ServiceConfig {
        lexicon_path: Some("/nonexistent/term_to_cui.json".into()),
        ..Default::default()
    };

    let result = timeout(
        Duration::from_secs(1),
        start_with_config(ServerConfig::default(), service_config, None),
    )
    .await;
    assert!(matches!(result, Ok(Err(_))), "startup should fail fast");
}

#[tokio::test]
async fn test_startup_from_data_files() {
    let dir = tempfile::tempdir().unwrap();
    let lexicon_path = dir.path().join("term_to_cui.json");
    std::fs::write(&lexicon_path, r#"{"embolism": "C0013922"}"#).unwrap();

    let port = find_available_port().expect("Failed to find an available port");
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port,
    };
    let service_config = ServiceConfig {
        lexicon_path: Some(lexicon_path),
        ..Default::default()
    };

    // a server that loaded its data keeps running
    let result = timeout(
        Duration::from_millis(300),
        start_with_config(config, service_config, None),
    )
    .await;
    assert!(result.is_err(), "Server should still be running");
}

#[tokio::test]
#[ignore] // This test starts an actual server and talks to it over TCP
async fn test_server_startup() {
    let port = find_available_port().expect("Failed to find an available port");
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port,
    };
    let addr = format!("{}:{}", config.host, config.port);

    let server = tokio::spawn(start_server(config, create_test_service()));
    tokio::time::sleep(Duration::from_millis(200)).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{}/api/v1/identify", addr))
        .json(&serde_json::json!({
            "text": "Test results returned positive for chronic emphysema and an embolism."
        }))
        .timeout(Duration::from_secs(1))
        .send()
        .await
        .expect("Failed to connect to the server");
    assert!(response.status().is_success(), "Server returned an error");

    let matches: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        matches,
        serde_json::json!([
            {"char_position_in_text": 35, "term_length": 17},
            {"char_position_in_text": 60, "term_length": 8}
        ])
    );

    server.abort();
}

// Helper function to find an available port
fn find_available_port() -> Option<u16> {
    // Try to bind to port 0, which will assign a random available port
    let listener = TcpListener::bind("127.0.0.1:0").ok()?;
    listener.local_addr().ok().map(|addr| addr.port())
}
