//! Postgres-backed person repository.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `PersonError` as follows:
//!
//! | SQLx Error | PostgreSQL Error Code | PersonError | Scenario |
//! |------------|----------------------|-------------|----------|
//! | RowNotFound | N/A | `NotFound` | `fetch_one` matched no row |
//! | Database (unique violation) | `23505` | `AlreadyExists` | Unique constraint hit (no such constraint in the current schema) |
//! | Database (other) | Any other | `Store` | Constraint, type or syntax errors |
//! | PoolClosed / PoolTimedOut / Io / Tls / ... | N/A | `Store` | Connection-level failures |
//!
//! `get` and `partial_update` use `fetch_optional` and report `NotFound`
//! themselves; `delete` reports it when no row was affected.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{FromRow, PgPool, Postgres, Row};
use tracing::{debug, instrument};

use persons_core::{CreatePerson, Person, PersonError, PersonPatch, PersonRepository, PersonResult};

use super::query::{self, SqlArg};

/// Postgres-backed person repository.
///
/// ## Thread Safety
///
/// Uses the SQLx connection pool which is thread-safe (Arc + Send + Sync).
/// Every operation is a single autocommit statement; there are no explicit
/// transactions, so concurrent patches of one person are last-write-wins.
#[derive(Debug, Clone)]
pub struct PostgresPersonRepository {
    pool: Arc<PgPool>,
}

impl PostgresPersonRepository {
    /// Create a repository on top of a shared connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl PersonRepository for PostgresPersonRepository {
    #[instrument(skip(self, params), err)]
    async fn create(&self, params: CreatePerson) -> PersonResult<Person> {
        let row = sqlx::query(query::CREATE_SQL)
            .bind(&params.name)
            .bind(params.age)
            .bind(&params.address)
            .bind(&params.work)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("create", e))?;

        let person = decode_person(&row)?;
        debug!(person_id = person.id, "new person created");
        Ok(person)
    }

    #[instrument(skip(self), err)]
    async fn get(&self, id: i64) -> PersonResult<Person> {
        let row = sqlx::query(query::GET_SQL)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get", e))?
            .ok_or(PersonError::NotFound)?;

        decode_person(&row)
    }

    #[instrument(skip(self), err)]
    async fn list(&self, offset: u64, limit: u64) -> PersonResult<Vec<Person>> {
        let sql = query::list_sql(limit);
        let mut stmt = sqlx::query(&sql).bind(to_i64(offset));
        if limit != 0 {
            stmt = stmt.bind(to_i64(limit));
        }

        let rows = stmt
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("list", e))?;

        rows.iter().map(decode_person).collect()
    }

    #[instrument(skip(self, patch), fields(person_id = patch.id), err)]
    async fn partial_update(&self, patch: PersonPatch) -> PersonResult<Option<Person>> {
        let Some(update) = query::build_update(&patch) else {
            debug!("empty patch, nothing to update");
            return Ok(None);
        };

        let mut stmt = sqlx::query(update.sql());
        for arg in update.args() {
            stmt = bind_arg(stmt, arg);
        }

        let row = stmt
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("partial_update", e))?
            .ok_or(PersonError::NotFound)?;

        let person = decode_person(&row)?;
        debug!(assignments = update.assignments(), "person partially updated");
        Ok(Some(person))
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: i64) -> PersonResult<()> {
        let result = sqlx::query(query::DELETE_SQL)
            .bind(id)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(PersonError::NotFound);
        }

        debug!("person deleted");
        Ok(())
    }
}

fn bind_arg<'q>(
    stmt: Query<'q, Postgres, PgArguments>,
    arg: &SqlArg,
) -> Query<'q, Postgres, PgArguments> {
    match arg {
        SqlArg::Text(v) => stmt.bind(v.clone()),
        SqlArg::Int(v) => stmt.bind(*v),
        SqlArg::BigInt(v) => stmt.bind(*v),
    }
}

/// Offsets/limits beyond `i64::MAX` cannot match more rows than `i64::MAX` does.
fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Map a SQLx error to a `PersonError`.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> PersonError {
    match err {
        sqlx::Error::RowNotFound => PersonError::NotFound,
        sqlx::Error::Database(db_err) => {
            if db_err.code().as_deref() == Some("23505") {
                PersonError::AlreadyExists
            } else {
                PersonError::store(format!("database error in {}: {}", operation, db_err.message()))
            }
        }
        sqlx::Error::PoolClosed => {
            PersonError::store(format!("connection pool closed in {}", operation))
        }
        _ => PersonError::store(format!("sqlx error in {}: {}", operation, err)),
    }
}

fn decode_person(row: &PgRow) -> PersonResult<Person> {
    PersonRow::from_row(row)
        .map(Person::from)
        .map_err(|e| PersonError::store(format!("failed to decode person row: {}", e)))
}

// SQLx row types

#[derive(Debug)]
struct PersonRow {
    id: i64,
    name: String,
    age: i32,
    address: String,
    work: String,
}

impl<'r> FromRow<'r, PgRow> for PersonRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(PersonRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            age: row.try_get("age")?,
            address: row.try_get("address")?,
            work: row.try_get("work")?,
        })
    }
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Person {
            id: row.id,
            name: row.name,
            age: row.age,
            address: row.address,
            work: row.work,
        }
    }
}
