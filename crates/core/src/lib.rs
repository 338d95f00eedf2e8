//! `persons-core`: the person entity, its call parameters, the repository
//! port and the domain error taxonomy.
//!
//! This crate is pure domain code (no IO, no HTTP, no SQL).

pub mod error;
pub mod person;
pub mod repository;

pub use error::{ErrorKind, PersonError, PersonResult};
pub use person::{CreatePerson, Person, PersonPatch};
pub use repository::PersonRepository;
