//! Helpers shared by the PostgreSQL-backed integration suites.

mod cluster_skip;

pub use cluster_skip::handle_cluster_setup_failure;

use postgres::{Client, NoTls};

/// Render a `postgres` error with its SQLSTATE and detail.
///
/// The `Display` form of `postgres::Error` often collapses to `db error`,
/// which says nothing useful in CI logs.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }
    summary
}

/// Drop and recreate `db_name` through the maintenance database.
///
/// Runs over `postgres` rather than Diesel, one statement per call, so
/// neither statement lands in a transaction block.
pub fn reset_database(admin_url: &str, db_name: &str) -> Result<(), String> {
    let mut client =
        Client::connect(admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("DROP DATABASE IF EXISTS \"{db_name}\""))
        .map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE \"{db_name}\""))
        .map_err(|err| format_postgres_error(&err))
}
