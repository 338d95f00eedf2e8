use std::sync::Arc;

use axum::{
    extract::{
        Extension, Path, Query,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use persons_core::PersonError;

use crate::app::dto::{CreatePersonRequest, ListQuery, PartialUpdateRequest, PersonResponse};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

/// Collection path, relative to the API prefix.
pub const PERSONS_PATH: &str = "/persons";

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_persons).post(create_person))
        .route("/:id", get(get_person).patch(update_person).delete(delete_person))
}

/// `Location` of a person resource under the public API prefix.
pub fn person_location(id: i64) -> String {
    format!("{}{}/{}", crate::app::API_PREFIX, PERSONS_PATH, id)
}

pub async fn create_person(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<CreatePersonRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body.map_err(malformed_body)?;

    let person = services.persons().create(body.into()).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, person_location(person.id))],
    )
        .into_response())
}

pub async fn get_person(
    Extension(services): Extension<Arc<AppServices>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let id = person_id(id)?;
    let person = services.persons().get(id).await?;
    Ok((StatusCode::OK, Json(PersonResponse::from(person))).into_response())
}

pub async fn list_persons(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| PersonError::malformed(e.body_text()))?;
    let (offset, limit) = query.page()?;

    let persons = services.persons().list(offset, limit).await?;
    let body: Vec<PersonResponse> = persons.into_iter().map(PersonResponse::from).collect();
    Ok((StatusCode::OK, Json(body)).into_response())
}

/// An empty body is a no-op: the current record is returned unchanged.
pub async fn update_person(
    Extension(services): Extension<Arc<AppServices>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<PartialUpdateRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = person_id(id)?;
    let Json(body) = body.map_err(malformed_body)?;

    let repo = services.persons();
    let person = match repo.partial_update(body.into_patch(id)).await? {
        Some(person) => person,
        None => repo.get(id).await?,
    };

    Ok((StatusCode::OK, Json(PersonResponse::from(person))).into_response())
}

pub async fn delete_person(
    Extension(services): Extension<Arc<AppServices>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let id = person_id(id)?;
    services.persons().delete(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

fn person_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, PersonError> {
    path.map(|Path(id)| id)
        .map_err(|_| PersonError::malformed("person id must be an integer"))
}

fn malformed_body(rejection: JsonRejection) -> PersonError {
    PersonError::malformed(format!("read request body error: {}", rejection.body_text()))
}
