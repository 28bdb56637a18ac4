//! Shared helpers for in-crate unit tests.

use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Application state over a lazily connecting pool.
///
/// The pool never opens a connection until a query runs, so tests that only
/// exercise pre-query logic (payload validation, extractors) need no
/// database.
pub(crate) fn lazy_state() -> AppState {
    let config = ServerConfig {
        database_url: SecretString::from("postgres://localhost/orchard_test"),
        host: "127.0.0.1".parse().expect("host literal"),
        port: 3000,
        sentry_dsn: None,
        sentry_environment: None,
    };
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/orchard_test")
        .expect("lazy pool from a well-formed URL");

    AppState::new(config, pool)
}
