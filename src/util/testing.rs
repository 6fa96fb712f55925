// src/util/testing.rs

use std::env;
use std::sync::OnceLock;
use tempfile::TempDir;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::infrastructure::repositories::sqlite::migration;
use crate::infrastructure::repositories::sqlite::repository::SqliteBookmarkRepository;

/// Global test configuration, initialized exactly once via OnceLock.
#[derive(Debug)]
pub struct TestEnv {
    /// File name of the throwaway database inside each temp dir
    pub db_file_name: &'static str,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            db_file_name: "linkshelf.db",
        }
    }
}

static TEST_ENV: OnceLock<TestEnv> = OnceLock::new();

/// Initializes the global test environment exactly once and sets up logging.
pub fn init_test_env() -> &'static TestEnv {
    TEST_ENV.get_or_init(|| {
        let data = TestEnv::new();
        setup_test_logging();
        info!("Test environment initialized");
        data
    })
}

/// Logging setup only runs once; subsequent calls do nothing if `tracing` is already set.
fn setup_test_logging() {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    let noisy_modules = ["diesel", "r2d2"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_test_writer()
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

/// A migrated database living in its own temporary directory.
///
/// The directory is removed on drop unless `NO_CLEANUP` is set.
#[derive(Debug)]
pub struct TestDb {
    pub repository: SqliteBookmarkRepository,
    dir: Option<TempDir>,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            if env::var("NO_CLEANUP").is_ok() {
                info!("Test artifacts left at: {}", dir.keep().display());
            }
        }
    }
}

/// Creates a repository on a fresh, fully migrated database.
pub fn setup_test_db() -> TestDb {
    let env_data = init_test_env();
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join(env_data.db_file_name);

    let repository = SqliteBookmarkRepository::from_url(db_path.to_string_lossy().as_ref())
        .expect("Failed to create SqliteBookmarkRepository");
    let mut conn = repository
        .get_connection()
        .expect("Failed to get connection from SqliteBookmarkRepository");
    migration::init_db(&mut conn).expect("Failed to initialize DB schema");

    TestDb {
        repository,
        dir: Some(dir),
    }
}
