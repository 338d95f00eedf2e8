//! The person entity and the parameters of the calls that create or change it.

use serde::{Deserialize, Serialize};

/// A stored person.
///
/// Field order matches the column order every statement returns:
/// `id, name, age, address, work`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Store-assigned, immutable after creation.
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub address: String,
    pub work: String,
}

/// Fields required to create a person. The id is always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePerson {
    pub name: String,
    pub age: i32,
    pub address: String,
    pub work: String,
}

impl CreatePerson {
    /// Materialize the stored record once the store has assigned `id`.
    pub fn into_person(self, id: i64) -> Person {
        Person {
            id,
            name: self.name,
            age: self.age,
            address: self.address,
            work: self.work,
        }
    }
}

/// Partial update of a person.
///
/// `None` means "leave the stored value alone"; `Some(String::new())` is a
/// real value and overwrites the column with an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonPatch {
    pub id: i64,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub address: Option<String>,
    pub work: Option<String>,
}

impl PersonPatch {
    /// Empty patch for `id`; set fields with the builder methods.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn work(mut self, work: impl Into<String>) -> Self {
        self.work = Some(work.into());
        self
    }

    /// True when no field is supplied; such a patch never reaches the store.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.address.is_none() && self.work.is_none()
    }

    /// Apply the supplied fields to `person`, leaving the others untouched.
    pub fn apply_to(&self, person: &mut Person) {
        if let Some(name) = &self.name {
            person.name = name.clone();
        }
        if let Some(age) = self.age {
            person.age = age;
        }
        if let Some(address) = &self.address {
            person.address = address.clone();
        }
        if let Some(work) = &self.work {
            person.work = work.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn johnny() -> Person {
        CreatePerson {
            name: "Johnny".to_string(),
            age: 22,
            address: "Moscow, Red Square".to_string(),
            work: "Yandex".to_string(),
        }
        .into_person(1)
    }

    #[test]
    fn json_shape_is_flat() {
        let json = serde_json::to_value(johnny()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "Johnny",
                "age": 22,
                "address": "Moscow, Red Square",
                "work": "Yandex",
            })
        );
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(PersonPatch::new(7).is_empty());
        assert!(!PersonPatch::new(7).work("").is_empty());
    }

    #[test]
    fn apply_touches_only_supplied_fields() {
        let mut person = johnny();
        PersonPatch::new(1).age(23).apply_to(&mut person);

        assert_eq!(person.age, 23);
        assert_eq!(person.name, "Johnny");
        assert_eq!(person.address, "Moscow, Red Square");
        assert_eq!(person.work, "Yandex");
    }

    #[test]
    fn empty_string_overwrites() {
        let mut person = johnny();
        PersonPatch::new(1).address("").apply_to(&mut person);
        assert_eq!(person.address, "");
    }
}
