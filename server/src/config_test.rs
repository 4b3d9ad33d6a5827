use super::*;

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: usize = env_parse("__TEST_NOTES_MISSING_KEY__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_valid() {
    unsafe { std::env::set_var("__TEST_NOTES_EP_VALID__", " 99 ") };
    let val: usize = env_parse("__TEST_NOTES_EP_VALID__", 0);
    assert_eq!(val, 99);
    unsafe { std::env::remove_var("__TEST_NOTES_EP_VALID__") };
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__TEST_NOTES_EP_INVALID__", "lots") };
    let val: u32 = env_parse("__TEST_NOTES_EP_INVALID__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__TEST_NOTES_EP_INVALID__") };
}

// =============================================================================
// ServerConfig
// =============================================================================

// Every env-mutating ServerConfig assertion lives in this one test so parallel
// test threads never observe each other's PORT/DATABASE_URL values.
#[test]
fn from_env_reads_defaults_overrides_and_rejects_bad_port() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("DB_MAX_CONNECTIONS");
        std::env::remove_var("NOTES_FEED_CAPACITY");
        std::env::remove_var("WS_OUTBOUND_CAPACITY");
    }
    let config = ServerConfig::from_env().expect("defaults parse");
    assert_eq!(config, ServerConfig::default());

    unsafe {
        std::env::set_var("PORT", "8080");
        std::env::set_var("DATABASE_URL", "postgres://notes@localhost/notes");
        std::env::set_var("NOTES_FEED_CAPACITY", "0");
    }
    let config = ServerConfig::from_env().expect("overrides parse");
    assert_eq!(config.port, 8080);
    assert_eq!(config.database_url.as_deref(), Some("postgres://notes@localhost/notes"));
    assert_eq!(config.feed_capacity, 1);

    unsafe {
        std::env::set_var("DATABASE_URL", "   ");
        std::env::set_var("PORT", "eighty");
    }
    let err = ServerConfig::from_env().expect_err("bad port rejected");
    assert!(matches!(err, ConfigError::InvalidPort(ref raw) if raw == "eighty"));

    unsafe { std::env::set_var("PORT", "3001") };
    let config = ServerConfig::from_env().expect("blank url parses");
    assert!(config.database_url.is_none());

    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("NOTES_FEED_CAPACITY");
    }
}
