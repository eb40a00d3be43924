//! Query and path extractors that reject with JSON errors

use axum::{
    extract::{FromRequestParts, Path as AxumPath, Query as AxumQuery},
    http::{request::Parts, StatusCode},
};
use serde::de::DeserializeOwned;

use super::json::RequestRejection;

/// Query-string extractor mirroring `axum::extract::Query`
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<T>(pub T);

/// Path extractor mirroring `axum::extract::Path`
#[derive(Debug, Clone, Copy)]
pub struct Path<T>(pub T);

impl<S, T> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RequestRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        AxumQuery::<T>::from_request_parts(parts, state)
            .await
            .map(|AxumQuery(value)| Query(value))
            .map_err(|rejection| RequestRejection {
                status: StatusCode::BAD_REQUEST,
                message: rejection.body_text(),
                code: "invalid_query",
            })
    }
}

impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = RequestRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        AxumPath::<T>::from_request_parts(parts, state)
            .await
            .map(|AxumPath(value)| Path(value))
            .map_err(|rejection| RequestRejection {
                status: StatusCode::BAD_REQUEST,
                message: rejection.body_text(),
                code: "invalid_path",
            })
    }
}
