use super::load_config;
use super::settings::Settings;
use serial_test::serial;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.server.log_level, "info");
    assert_eq!(settings.broker.max_connections, 1000);
}

#[test]
#[serial]
fn test_load_config_falls_back_to_defaults() {
    temp_env::with_vars_unset(["SERVER_HOST", "SERVER_PORT"], || {
        let cfg = load_config().expect("config should load");
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.broker.max_connections, 1000);
    });
}

#[test]
#[serial]
fn test_env_overrides_defaults() {
    temp_env::with_vars(
        [
            ("SERVER_HOST", Some("0.0.0.0")),
            ("SERVER_PORT", Some("9100")),
        ],
        || {
            let cfg = load_config().expect("config should load");
            assert_eq!(cfg.server.host, "0.0.0.0");
            assert_eq!(cfg.server.port, 9100);
        },
    );
}
