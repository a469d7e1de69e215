// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use portfolio_app::{SessionStorage, SessionStore, TOKEN_KEY, USER_ID_KEY, UserId};
use portfolio_store::{Store, validate_db_path};

#[test]
fn validate_db_path_rejects_uri_forms() {
    assert!(validate_db_path("file:session.db").is_err());
    assert!(validate_db_path("https://example.com/session.db").is_err());
    assert!(validate_db_path("session.db?mode=ro").is_err());
    assert!(validate_db_path("").is_err());
    assert!(validate_db_path("/tmp/portfolio/session.db").is_ok());
    assert!(validate_db_path(":memory:").is_ok());
}

#[test]
fn session_survives_reopen() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("session.db");

    {
        let store = Store::open(&path)?;
        store.bootstrap()?;
        let mut session = SessionStore::new(store);
        session.set_session(UserId::new(42), "abc")?;
    }

    let store = Store::open(&path)?;
    store.bootstrap()?;
    let session = SessionStore::new(store);
    assert!(session.is_authenticated()?);
    assert_eq!(session.session()?.user_id, Some(UserId::new(42)));
    Ok(())
}

#[test]
fn clear_session_writes_empty_values_together() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    let mut session = SessionStore::new(store);
    session.set_session(UserId::new(1), "token")?;
    session.clear_session()?;

    assert!(!session.is_authenticated()?);
    let store = session.into_inner();
    assert_eq!(store.get_item(USER_ID_KEY)?, Some(String::new()));
    assert_eq!(store.get_item(TOKEN_KEY)?, Some(String::new()));
    assert_eq!(store.updated_at(USER_ID_KEY)?, store.updated_at(TOKEN_KEY)?);
    Ok(())
}

#[test]
fn fresh_store_is_not_authenticated() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    let session = SessionStore::new(store);
    assert!(!session.is_authenticated()?);
    Ok(())
}

#[test]
fn bootstrap_rejects_session_table_missing_columns() -> Result<()> {
    let store = Store::open_memory()?;
    store
        .raw_connection()
        .execute_batch("CREATE TABLE session (key TEXT PRIMARY KEY, value TEXT NOT NULL);")?;

    let error = store
        .bootstrap()
        .expect_err("schema validation should fail");
    let message = error.to_string();
    assert!(message.contains("table `session` is missing required columns"));
    assert!(message.contains("updated_at"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn session_database_is_private() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempfile::tempdir()?;
    let path = temp.path().join("session.db");
    let store = Store::open(&path)?;
    store.bootstrap()?;

    let mode = std::fs::metadata(&path)?.permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    Ok(())
}
