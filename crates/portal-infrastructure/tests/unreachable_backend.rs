use portal_core::catalog::CatalogRepository;
use portal_core::config::BackendSettings;
use portal_core::session::{AuthGateway, Credentials};
use portal_infrastructure::{ConfigService, HttpPortalClient};
use tempfile::TempDir;

fn unreachable_client() -> HttpPortalClient {
    // Port 9 (discard) is closed on CI hosts, so connects fail fast.
    HttpPortalClient::new(BackendSettings {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
        ..BackendSettings::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let client = unreachable_client();

    let err = client
        .login(&Credentials::new("alice", "secret"))
        .await
        .unwrap_err();
    assert!(err.is_transport(), "unexpected error: {err:?}");
    assert_eq!(err.detail(), None);

    let err = client.current_user().await.unwrap_err();
    assert!(err.is_transport());
    assert!(!err.is_unauthenticated());

    assert!(client.technologies().await.unwrap_err().is_transport());
}

#[tokio::test]
async fn test_client_built_from_loaded_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "[backend]\nbase_url = \"http://127.0.0.1:9\"\ntimeout_secs = 2\n").unwrap();

    let config = ConfigService::new(&path).get_config().unwrap();
    let client = HttpPortalClient::new(config.backend).unwrap();

    // Clearing an empty session is harmless.
    client.clear_session_artifacts().await;
    assert!(client.logout().await.unwrap_err().is_transport());
}
