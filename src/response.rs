//! Acknowledgement bodies for mutating endpoints.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Ack {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Ack {
    pub fn new(message: impl Into<String>) -> Self {
        Ack {
            message: message.into(),
            id: None,
            path: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

pub fn created(ack: Ack) -> (StatusCode, Json<Ack>) {
    (StatusCode::CREATED, Json(ack))
}

pub fn ok(ack: Ack) -> (StatusCode, Json<Ack>) {
    (StatusCode::OK, Json(ack))
}
