//! Person persistence: statement building plus the Postgres and in-memory
//! `PersonRepository` implementations.

pub mod in_memory;
pub mod postgres;
pub mod query;

pub use in_memory::InMemoryPersonRepository;
pub use postgres::PostgresPersonRepository;
pub use query::{SqlArg, UpdateStatement, build_update};
