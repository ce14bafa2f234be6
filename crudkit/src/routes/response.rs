//! Response types for the CRUD routes

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::query::ListParams;
use crate::pagination::{next_page_url, previous_page_url};

/// One page of results plus the total row count
///
/// Produced by [`CrudService::list`](super::CrudService::list); the route
/// handler turns it into a [`ListEnvelope`] once it knows the request URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    /// Total rows in the collection (not just this page)
    pub count: i64,
    /// The rows of this page
    pub results: Vec<T>,
}

/// List response envelope: `{count, results, next, previous}`
///
/// `next` and `previous` serialize as `null` when the corresponding page
/// does not exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    /// Total rows in the collection
    pub count: i64,
    /// The rows of this page
    pub results: Vec<T>,
    /// URL of the next page, if any
    pub next: Option<String>,
    /// URL of the previous page, if any
    pub previous: Option<String>,
}

impl<T> ListEnvelope<T> {
    /// Wrap a page, computing the next/previous links
    pub fn paginate(page: ListPage<T>, base_url: &str, params: &ListParams) -> Self {
        let order_by = params.order_by.as_deref();
        Self {
            next: next_page_url(base_url, params.offset, params.limit, page.count, order_by),
            previous: previous_page_url(base_url, params.offset, params.limit, order_by),
            count: page.count,
            results: page.results,
        }
    }
}

impl<T: Serialize> IntoResponse for ListEnvelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// HTTP 204 No Content response
#[derive(Debug, Clone, Copy)]
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}
