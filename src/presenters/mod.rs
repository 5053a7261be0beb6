//! Response bodies.
//!
//! Every success body is `{"status":"success", ..., "data": ...}`. Lists add
//! `results`, paginated lists add `pagination`.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

use crate::repositories::Paging;
use crate::utils::page_count;

pub mod auth;
pub mod message;
pub mod notification;
pub mod portfolio;
pub mod project;
pub mod views;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
}

impl Pagination {
    pub fn new(paging: Paging, total: u64) -> Self {
        Self {
            page: paging.page,
            limit: paging.limit,
            total,
            pages: page_count(total, paging.limit),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            token: None,
            results: None,
            pagination: None,
            message: None,
            data,
        }
    }

    pub fn results(mut self, n: usize) -> Self {
        self.results = Some(n);
        self
    }

    pub fn pagination(mut self, p: Pagination) -> Self {
        self.pagination = Some(p);
        self
    }

    pub fn token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    pub fn message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }

    pub fn respond(self, status: StatusCode) -> HttpResponse { HttpResponse::build(status).json(self) }
}

pub fn no_content() -> HttpResponse { HttpResponse::NoContent().finish() }

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn envelope_omits_absent_parts() {
        let v = serde_json::to_value(Envelope::success(json!({ "a": 1 }))).unwrap();

        assert_eq!(v, json!({ "status": "success", "data": { "a": 1 } }));
    }

    #[test]
    fn pagination_counts_pages() {
        let v = serde_json::to_value(
            Envelope::success(json!([]))
                .results(0)
                .pagination(Pagination::new(Paging::new(Some(1), Some(10)), 21)),
        )
        .unwrap();

        assert_eq!(v["pagination"], json!({ "page": 1, "limit": 10, "total": 21, "pages": 3 }));
        assert_eq!(v["results"], 0);
    }
}
