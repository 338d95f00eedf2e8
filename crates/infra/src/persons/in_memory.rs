//! In-memory person repository for tests/dev.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

use persons_core::{CreatePerson, Person, PersonError, PersonPatch, PersonRepository, PersonResult};

#[derive(Debug)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Person>,
}

/// In-memory person repository.
///
/// Ids are assigned from a sequence starting at 1 and never reused, matching a
/// `BIGSERIAL` column. Store order is ascending id.
#[derive(Debug)]
pub struct InMemoryPersonRepository {
    table: RwLock<Table>,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn read(&self) -> PersonResult<RwLockReadGuard<'_, Table>> {
        self.table
            .read()
            .map_err(|_| PersonError::store("persons table lock poisoned"))
    }

    fn write(&self) -> PersonResult<RwLockWriteGuard<'_, Table>> {
        self.table
            .write()
            .map_err(|_| PersonError::store("persons table lock poisoned"))
    }
}

impl Default for InMemoryPersonRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn create(&self, params: CreatePerson) -> PersonResult<Person> {
        let mut table = self.write()?;
        let id = table.next_id;
        table.next_id += 1;

        let person = params.into_person(id);
        table.rows.insert(id, person.clone());
        debug!(person_id = id, "new person created");
        Ok(person)
    }

    async fn get(&self, id: i64) -> PersonResult<Person> {
        self.read()?
            .rows
            .get(&id)
            .cloned()
            .ok_or(PersonError::NotFound)
    }

    async fn list(&self, offset: u64, limit: u64) -> PersonResult<Vec<Person>> {
        let table = self.read()?;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = match limit {
            0 => usize::MAX,
            n => usize::try_from(n).unwrap_or(usize::MAX),
        };
        Ok(table.rows.values().skip(skip).take(take).cloned().collect())
    }

    async fn partial_update(&self, patch: PersonPatch) -> PersonResult<Option<Person>> {
        if patch.is_empty() {
            return Ok(None);
        }

        let mut table = self.write()?;
        let person = table.rows.get_mut(&patch.id).ok_or(PersonError::NotFound)?;
        patch.apply_to(person);
        debug!(person_id = patch.id, "person partially updated");
        Ok(Some(person.clone()))
    }

    async fn delete(&self, id: i64) -> PersonResult<()> {
        if self.write()?.rows.remove(&id).is_none() {
            return Err(PersonError::NotFound);
        }
        debug!(person_id = id, "person deleted");
        Ok(())
    }
}
