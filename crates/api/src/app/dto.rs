use serde::{Deserialize, Serialize};

use persons_core::{CreatePerson, Person, PersonError, PersonPatch};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreatePersonRequest {
    pub name: String,
    pub age: i32,
    pub address: String,
    pub work: String,
}

impl From<CreatePersonRequest> for CreatePerson {
    fn from(body: CreatePersonRequest) -> Self {
        CreatePerson {
            name: body.name,
            age: body.age,
            address: body.address,
            work: body.work,
        }
    }
}

/// PATCH body: a missing key leaves the column untouched.
#[derive(Debug, Default, Deserialize)]
pub struct PartialUpdateRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub address: Option<String>,
    pub work: Option<String>,
}

impl PartialUpdateRequest {
    pub fn into_patch(self, id: i64) -> PersonPatch {
        PersonPatch {
            id,
            name: self.name,
            age: self.age,
            address: self.address,
            work: self.work,
        }
    }
}

/// Raw `offset`/`limit` query parameters; parsed by [`ListQuery::page`].
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    /// `(offset, limit)`; missing or empty values are 0, anything that is not
    /// a non-negative integer is a malformed request.
    pub fn page(&self) -> Result<(u64, u64), PersonError> {
        Ok((
            parse_page_param("offset", self.offset.as_deref())?,
            parse_page_param("limit", self.limit.as_deref())?,
        ))
    }
}

fn parse_page_param(name: &str, raw: Option<&str>) -> Result<u64, PersonError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(0),
        Some(v) => v
            .parse()
            .map_err(|_| PersonError::malformed(format!("{name} must be a non-negative integer, got {v:?}"))),
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonResponse {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub address: String,
    pub work: String,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        PersonResponse {
            id: person.id,
            name: person.name,
            age: person.age,
            address: person.address,
            work: person.work,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_keeps_absent_and_empty_apart() {
        let body: PartialUpdateRequest = serde_json::from_str(r#"{"work": "", "age": 23}"#).unwrap();
        let patch = body.into_patch(5);
        assert_eq!(patch, PersonPatch::new(5).age(23).work(""));
    }

    #[test]
    fn empty_patch_body() {
        let body: PartialUpdateRequest = serde_json::from_str("{}").unwrap();
        assert!(body.into_patch(1).is_empty());
    }

    #[test]
    fn create_requires_every_field() {
        let res = serde_json::from_str::<CreatePersonRequest>(r#"{"name": "Johnny", "age": 22}"#);
        assert!(res.is_err());
    }

    #[test]
    fn page_defaults_to_zero() {
        assert_eq!(ListQuery::default().page(), Ok((0, 0)));
        let q = ListQuery {
            offset: Some(String::new()),
            limit: Some("10".to_string()),
        };
        assert_eq!(q.page(), Ok((0, 10)));
    }

    #[test]
    fn page_rejects_negative_and_garbage() {
        let negative = ListQuery {
            offset: Some("-1".to_string()),
            limit: None,
        };
        assert!(matches!(negative.page(), Err(PersonError::MalformedRequest(_))));

        let garbage = ListQuery {
            offset: None,
            limit: Some("ten".to_string()),
        };
        assert!(matches!(garbage.page(), Err(PersonError::MalformedRequest(_))));
    }
}
