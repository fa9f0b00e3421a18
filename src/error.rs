// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure of a single call against the finance API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("request could not complete: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("server answered with status {status}")]
    Server { status: u16 },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if let Some(status) = e.status() {
            ApiError::Server {
                status: status.as_u16(),
            }
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("{0}")]
    Validation(String),
    #[error("a reply is still pending; wait for it before sending again")]
    Busy,
    #[error("message is empty")]
    EmptyMessage,
    #[error("no {kind} with id {id}")]
    NotFound { kind: &'static str, id: i64 },
    #[error(transparent)]
    Api(#[from] ApiError),
}
