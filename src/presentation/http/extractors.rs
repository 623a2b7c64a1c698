//! Custom Extractors
//!
//! Axum extractors for request parsing.

use std::marker::PhantomData;

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::shared::error::AppError;
use crate::shared::validation::{parse_id, validation_error};

/// JSON body that has been deserialized and passed `validator` checks.
///
/// Any rejection becomes a 400 with the usual `{"error": ...}` body instead
/// of axum's plain-text default.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::info!(reason = %rejection.body_text(), "rejected request body");
            AppError::BadRequest("json is invalid".into())
        })?;

        value.validate().map_err(validation_error)?;
        Ok(Self(value))
    }
}

/// Entity addressed by an `{id}` path segment; names it in error messages.
pub trait PathEntity {
    const NAME: &'static str;
}

pub struct UserEntity;
pub struct PostEntity;
pub struct MessageEntity;
pub struct ChatEntity;

impl PathEntity for UserEntity {
    const NAME: &'static str = "user";
}

impl PathEntity for PostEntity {
    const NAME: &'static str = "post";
}

impl PathEntity for MessageEntity {
    const NAME: &'static str = "message";
}

impl PathEntity for ChatEntity {
    const NAME: &'static str = "chat";
}

/// Positive id taken from the single path parameter.
///
/// Segments that fail to decode and ids that are not positive integers both
/// become a 400 `invalid {entity} id`.
#[derive(Debug)]
pub struct IdPath<E>(pub i64, pub PhantomData<E>);

impl<E, S> FromRequestParts<S> for IdPath<E>
where
    E: PathEntity,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::info!(reason = %rejection.body_text(), entity = E::NAME, "rejected path");
                AppError::BadRequest(format!("invalid {} id", E::NAME))
            })?;

        Ok(Self(parse_id(&raw, E::NAME)?, PhantomData))
    }
}
