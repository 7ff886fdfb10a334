//! Integration tests for `DieselCompanyRepository` against embedded PostgreSQL.
//!
//! Each test runs in its own database cloned from the migrated template. The
//! suite is synchronous and drives async calls through a runtime owned by the
//! test context, so the blocking `postgres` client used for schema tampering
//! never runs inside an executor.

use chrono::{DateTime, TimeZone, Utc};
use company_api::domain::ports::{CompanyPersistenceError, CompanyRepository};
use company_api::domain::{CompanyDraft, CompanyId, Isin};
use company_api::outbound::persistence::{DbPool, DieselCompanyRepository, PoolConfig};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::{drop_table, handle_cluster_setup_failure, provision_template_database, shared_cluster};

struct TestContext {
    runtime: Runtime,
    repository: DieselCompanyRepository,
    database_url: String,
    _database: TemporaryDatabase,
}

impl TestContext {
    fn run<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let temp_db = provision_template_database(cluster)?;
    let database_url = temp_db.url().to_string();

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        repository: DieselCompanyRepository::new(pool),
        database_url,
        _database: temp_db,
    })
}

#[fixture]
fn context() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn timestamp(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn draft(name: &str, isin: &str) -> CompanyDraft {
    CompanyDraft::try_from_parts(name, "TCK", "NASDAQ", isin, Some("https://example.com"))
        .expect("valid draft")
}

#[rstest]
fn create_assigns_identifier_and_round_trips(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };

    let created = ctx
        .run(
            ctx.repository
                .create(&draft("Apple Inc.", "US0378331005"), timestamp(9)),
        )
        .expect("create succeeds");

    assert_eq!(created.name, "Apple Inc.");
    assert_eq!(created.created_at, timestamp(9));
    assert_eq!(created.updated_at, timestamp(9));
    assert_eq!(created.website.as_deref(), Some("https://example.com"));

    let by_id = ctx
        .run(ctx.repository.find_by_id(created.id))
        .expect("lookup succeeds");
    assert_eq!(by_id, Some(created.clone()));

    let isin = Isin::new("US0378331005").expect("valid isin");
    let by_isin = ctx
        .run(ctx.repository.find_by_isin(&isin))
        .expect("lookup succeeds");
    assert_eq!(by_isin, Some(created));
}

#[rstest]
fn lookups_return_none_for_unknown_records(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };

    let by_id = ctx
        .run(ctx.repository.find_by_id(CompanyId::new(4242)))
        .expect("lookup succeeds");
    let isin = Isin::new("NL0000235190").expect("valid isin");
    let by_isin = ctx
        .run(ctx.repository.find_by_isin(&isin))
        .expect("lookup succeeds");
    let exists = ctx
        .run(ctx.repository.exists_by_isin(&isin))
        .expect("exists succeeds");

    assert_eq!(by_id, None);
    assert_eq!(by_isin, None);
    assert!(!exists);
}

#[rstest]
fn list_all_orders_by_identifier(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };

    for (name, isin) in [
        ("Apple Inc.", "US0378331005"),
        ("British Airways Plc", "US1104193065"),
        ("Heineken NV", "NL0000009165"),
    ] {
        ctx.run(ctx.repository.create(&draft(name, isin), timestamp(9)))
            .expect("create succeeds");
    }

    let listed = ctx
        .run(ctx.repository.list_all())
        .expect("list succeeds");
    let names: Vec<_> = listed.iter().map(|company| company.name.as_str()).collect();
    assert_eq!(
        names,
        ["Apple Inc.", "British Airways Plc", "Heineken NV"]
    );
    assert!(listed.windows(2).all(|pair| pair[0].id < pair[1].id));
}

#[rstest]
fn duplicate_isin_insert_maps_to_duplicate_error(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };

    ctx.run(
        ctx.repository
            .create(&draft("Apple Inc.", "US0378331005"), timestamp(9)),
    )
    .expect("first insert succeeds");

    let error = ctx
        .run(
            ctx.repository
                .create(&draft("Apple Clone", "US0378331005"), timestamp(10)),
        )
        .expect_err("unique index rejects duplicate");

    assert_eq!(
        error,
        CompanyPersistenceError::duplicate_isin("US0378331005")
    );
}

#[rstest]
fn update_overwrites_mutable_columns(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };

    let created = ctx
        .run(
            ctx.repository
                .create(&draft("Apple Inc.", "US0378331005"), timestamp(9)),
        )
        .expect("create succeeds");
    let revision = CompanyDraft::try_from_parts("Apple", "AAPL", "NYSE", "US0378331005", None)
        .expect("valid draft");
    let revised = created.revised(&revision, timestamp(11));

    let stored = ctx
        .run(ctx.repository.update(&revised))
        .expect("update succeeds")
        .expect("row matched");

    assert_eq!(stored.name, "Apple");
    assert_eq!(stored.exchange, "NYSE");
    assert_eq!(stored.website, None);
    assert_eq!(stored.created_at, timestamp(9));
    assert_eq!(stored.updated_at, timestamp(11));
}

#[rstest]
fn update_into_taken_isin_maps_to_duplicate_error(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };

    ctx.run(
        ctx.repository
            .create(&draft("Apple Inc.", "US0378331005"), timestamp(9)),
    )
    .expect("create succeeds");
    let heineken = ctx
        .run(
            ctx.repository
                .create(&draft("Heineken NV", "NL0000009165"), timestamp(9)),
        )
        .expect("create succeeds");

    let stolen = heineken.revised(&draft("Heineken NV", "US0378331005"), timestamp(10));
    let error = ctx
        .run(ctx.repository.update(&stolen))
        .expect_err("unique index rejects duplicate");

    assert_eq!(
        error,
        CompanyPersistenceError::duplicate_isin("US0378331005")
    );
}

#[rstest]
fn update_of_missing_row_returns_none(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };

    let created = ctx
        .run(
            ctx.repository
                .create(&draft("Apple Inc.", "US0378331005"), timestamp(9)),
        )
        .expect("create succeeds");
    let mut ghost = created.revised(&draft("Ghost", "NL0000235190"), timestamp(10));
    ghost.id = CompanyId::new(created.id.get() + 1000);

    let outcome = ctx
        .run(ctx.repository.update(&ghost))
        .expect("update succeeds");
    assert_eq!(outcome, None);
}

#[rstest]
fn delete_reports_whether_a_row_was_removed(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };

    let created = ctx
        .run(
            ctx.repository
                .create(&draft("Apple Inc.", "US0378331005"), timestamp(9)),
        )
        .expect("create succeeds");

    let first = ctx
        .run(ctx.repository.delete(created.id))
        .expect("delete succeeds");
    let second = ctx
        .run(ctx.repository.delete(created.id))
        .expect("delete succeeds");
    let exists = ctx
        .run(ctx.repository.exists_by_isin(&created.isin))
        .expect("exists succeeds");

    assert!(first);
    assert!(!second);
    assert!(!exists);
}

#[rstest]
fn missing_table_surfaces_as_query_error(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };

    drop_table(&ctx.database_url, "companies").expect("drop companies table");

    let error = ctx
        .run(ctx.repository.list_all())
        .expect_err("query fails without table");
    assert!(
        matches!(error, CompanyPersistenceError::Query { .. }),
        "expected query error, got {error:?}"
    );
}
