//! Embedded PostgreSQL provisioning for repository integration tests.
//!
//! Each test gets its own database cloned from a template that already has
//! the crate's embedded migrations applied, so schemas never drift from what
//! the server runs at startup.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use company_api::outbound::persistence::run_pending_migrations_blocking;
use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use uuid::Uuid;

use super::format_postgres_error;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "company_api_template";
const SHARED_CLUSTER_RETRIES: u32 = 3;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String, String> {
    let hash = hash_directory(migrations_dir()).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

/// Shared cluster for the whole test binary.
///
/// Bootstrap is retried a few times because parallel suites race on the
/// PostgreSQL binary download.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(err) if attempt < SHARED_CLUSTER_RETRIES => {
                eprintln!("pg-embed: cluster bootstrap attempt {attempt} failed: {err}");
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
            Err(err) => return Err(err.to_string()),
        }
    }
}

/// Create the migrated template once per cluster.
fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template_name);
        run_pending_migrations_blocking(&url).map_err(|err| err.to_string())?;
    }
    Ok(template_name)
}

/// Fresh database cloned from the migrated template.
pub fn provision_template_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let template_name = ensure_template_database(cluster)?;
    let db_name = format!("test_{}", Uuid::new_v4());
    cluster
        .temporary_database_from_template(db_name.as_str(), template_name.as_str())
        .map_err(|err| format!("create database from template: {err:?}"))
}

/// Drop `table` to simulate schema loss.
pub fn drop_table(url: &str, table: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("DROP TABLE IF EXISTS {table} CASCADE;"))
        .map_err(|err| format_postgres_error(&err))
}
