//! Shared `PostgreSQL` server for integration tests.
//!
//! When `KANBAN_TEST_DATABASE_URL` is set, tests create their databases on
//! that server; its role needs `CREATEDB`. Otherwise one embedded server is
//! started per test binary. If neither is available, tests return early.

use crate::test_helpers::EnvVarGuard;
use diesel::prelude::*;
use pg_embedded_setup_unpriv::{
    ExecutionPrivileges, TestBootstrapSettings, bootstrap_for_tests, detect_execution_privileges,
};
use postgresql_embedded::{PostgreSQL, Settings, Status};
use std::ffi::OsString;
use std::net::TcpListener;
use std::sync::OnceLock;
use tokio::runtime::Runtime;
use tracing::warn;
use uuid::Uuid;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Points the suite at an existing server instead of an embedded one.
pub const EXTERNAL_URL_ENV: &str = "KANBAN_TEST_DATABASE_URL";

static SHARED_CLUSTER: OnceLock<Option<ManagedCluster>> = OnceLock::new();

/// Shared cluster handle.
pub type PostgresCluster = &'static ManagedCluster;

enum Server {
    External {
        url: String,
    },
    Embedded {
        settings: Settings,
        // Kept alive for the lifetime of the test binary.
        _runtime: Runtime,
        _postgres: PostgreSQL,
    },
}

/// Running server plus the admin operations the tests need.
pub struct ManagedCluster {
    server: Server,
}

impl ManagedCluster {
    fn external(url: String) -> Self {
        Self {
            server: Server::External { url },
        }
    }

    fn embedded() -> Result<Self, BoxError> {
        if matches!(detect_execution_privileges(), ExecutionPrivileges::Root) {
            return Err("embedded PostgreSQL refuses to run as root".into());
        }
        let port_guard = EnvVarGuard::set_many(&port_override()?);
        let bootstrap: TestBootstrapSettings =
            bootstrap_for_tests().map_err(|err| Box::new(err) as BoxError)?;
        drop(port_guard);

        let env_vars: Vec<(OsString, Option<OsString>)> = bootstrap
            .environment
            .to_env()
            .into_iter()
            .map(|(key, value)| (OsString::from(key), value.map(OsString::from)))
            .collect();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| Box::new(err) as BoxError)?;
        let env_guard = EnvVarGuard::set_many(&env_vars);
        let mut postgres = PostgreSQL::new(bootstrap.settings);
        runtime.block_on(async {
            postgres
                .setup()
                .await
                .map_err(|err| Box::new(err) as BoxError)?;
            if !matches!(postgres.status(), Status::Started) {
                postgres
                    .start()
                    .await
                    .map_err(|err| Box::new(err) as BoxError)?;
            }
            Ok::<(), BoxError>(())
        })?;
        drop(env_guard);

        Ok(Self {
            server: Server::Embedded {
                settings: postgres.settings().clone(),
                _runtime: runtime,
                _postgres: postgres,
            },
        })
    }

    /// Returns the connection URL for `database`.
    #[must_use]
    pub fn database_url(&self, database: &str) -> String {
        match &self.server {
            Server::External { url } => with_database(url, database),
            Server::Embedded { settings, .. } => settings.url(database),
        }
    }

    fn admin_url(&self) -> String {
        match &self.server {
            Server::External { url } => url.clone(),
            Server::Embedded { settings, .. } => settings.url("postgres"),
        }
    }

    fn execute_admin_sql(&self, sql: &str) -> Result<(), BoxError> {
        let mut conn =
            PgConnection::establish(&self.admin_url()).map_err(|err| Box::new(err) as BoxError)?;
        diesel::sql_query(sql)
            .execute(&mut conn)
            .map_err(|err| Box::new(err) as BoxError)?;
        Ok(())
    }

    /// Creates an empty, uniquely named database.
    ///
    /// # Errors
    ///
    /// Returns an error if the admin connection or `CREATE DATABASE` fails.
    pub fn temporary_database(&'static self) -> Result<TemporaryDatabase, BoxError> {
        let name = format!("kanban_test_{}", Uuid::new_v4().simple());
        self.execute_admin_sql(&format!("CREATE DATABASE {}", quote_identifier(&name)))?;
        Ok(TemporaryDatabase {
            cluster: self,
            url: self.database_url(&name),
            name,
        })
    }
}

/// Database dropped, connections and all, when the guard goes out of scope.
pub struct TemporaryDatabase {
    cluster: PostgresCluster,
    name: String,
    url: String,
}

impl TemporaryDatabase {
    /// Returns the connection URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        let sql = format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            quote_identifier(&self.name)
        );
        drop(self.cluster.execute_admin_sql(&sql));
    }
}

/// Returns the shared cluster, or `None` when no server can be used.
///
/// The first call starts the server on a dedicated thread so that it never
/// blocks inside the caller's runtime.
pub fn shared_cluster() -> Option<PostgresCluster> {
    SHARED_CLUSTER
        .get_or_init(|| {
            if let Some(url) = std::env::var(EXTERNAL_URL_ENV)
                .ok()
                .filter(|value| !value.trim().is_empty())
            {
                return Some(ManagedCluster::external(url));
            }
            match std::thread::spawn(ManagedCluster::embedded).join() {
                Ok(Ok(cluster)) => Some(cluster),
                Ok(Err(err)) => {
                    warn!(error = %err, "PostgreSQL unavailable, skipping database tests");
                    None
                }
                Err(_) => {
                    warn!("PostgreSQL startup panicked, skipping database tests");
                    None
                }
            }
        })
        .as_ref()
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Replaces the database path of a `postgres://` URL, keeping any query.
fn with_database(url: &str, database: &str) -> String {
    let (base, query) = url.split_once('?').map_or((url, None), |(b, q)| (b, Some(q)));
    let authority_start = base.find("://").map_or(0, |index| index + 3);
    let prefix = base
        .get(authority_start..)
        .and_then(|rest| rest.find('/'))
        .and_then(|slash| base.get(..authority_start + slash))
        .unwrap_or(base);
    match query {
        Some(params) => format!("{prefix}/{database}?{params}"),
        None => format!("{prefix}/{database}"),
    }
}

fn port_override() -> Result<Vec<(OsString, Option<OsString>)>, BoxError> {
    if std::env::var_os("PG_PORT").is_some() {
        return Ok(Vec::new());
    }
    let listener = TcpListener::bind(("127.0.0.1", 0)).map_err(|err| Box::new(err) as BoxError)?;
    let port = listener
        .local_addr()
        .map(|addr| addr.port())
        .map_err(|err| Box::new(err) as BoxError)?;
    drop(listener);
    Ok(vec![(
        OsString::from("PG_PORT"),
        Some(OsString::from(port.to_string())),
    )])
}

#[cfg(test)]
mod tests {
    use super::with_database;
    use rstest::rstest;

    #[rstest]
    #[case("postgres://u:p@db:5432/postgres", "postgres://u:p@db:5432/t1")]
    #[case("postgres://db/postgres?sslmode=disable", "postgres://db/t1?sslmode=disable")]
    #[case("postgres://db", "postgres://db/t1")]
    fn database_path_is_replaced(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(with_database(url, "t1"), expected);
    }
}
