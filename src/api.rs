// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The REST API of the finance companion backend.

use std::time::Duration;

use anyhow::Result;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::ApiError;
use crate::models::{
    ChatReply, ChatRequest, Expense, Goal, GoalUpdate, HealthStatus, NewExpense, NewGoal,
    decode_rows,
};
use crate::utils::http_client;

/// Every call the client makes against the backend.
///
/// Writes only report success; callers re-read the collection afterwards.
pub trait FinanceApi {
    fn list_expenses(&self) -> Result<Vec<Expense>, ApiError>;
    fn create_expense(&self, expense: &NewExpense) -> Result<(), ApiError>;
    fn update_expense(&self, id: i64, expense: &NewExpense) -> Result<(), ApiError>;
    fn delete_expense(&self, id: i64) -> Result<(), ApiError>;

    fn list_goals(&self) -> Result<Vec<Goal>, ApiError>;
    fn create_goal(&self, goal: &NewGoal) -> Result<(), ApiError>;
    fn update_goal(&self, id: i64, goal: &GoalUpdate) -> Result<(), ApiError>;
    fn delete_goal(&self, id: i64) -> Result<(), ApiError>;

    fn list_categories(&self) -> Result<Vec<String>, ApiError>;
    fn create_category(&self, name: &str) -> Result<(), ApiError>;

    fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError>;
    fn health(&self) -> Result<HealthStatus, ApiError>;
}

pub struct HttpApi {
    client: Client,
    base: String,
}

impl HttpApi {
    pub fn new(base: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    fn send(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send()?;
        let status = resp.status();
        debug!(url = %resp.url(), status = status.as_u16(), "api response");
        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.send(self.client.get(self.url(path)))?;
        resp.json::<T>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl FinanceApi for HttpApi {
    fn list_expenses(&self) -> Result<Vec<Expense>, ApiError> {
        let rows: Vec<Value> = self.get_json("expenses")?;
        Ok(decode_rows("expense", rows))
    }

    fn create_expense(&self, expense: &NewExpense) -> Result<(), ApiError> {
        self.send(self.client.post(self.url("expenses")).json(expense))?;
        Ok(())
    }

    fn update_expense(&self, id: i64, expense: &NewExpense) -> Result<(), ApiError> {
        self.send(
            self.client
                .put(self.url(&format!("expenses/{id}")))
                .json(expense),
        )?;
        Ok(())
    }

    fn delete_expense(&self, id: i64) -> Result<(), ApiError> {
        self.send(self.client.delete(self.url(&format!("expenses/{id}"))))?;
        Ok(())
    }

    fn list_goals(&self) -> Result<Vec<Goal>, ApiError> {
        let rows: Vec<Value> = self.get_json("goals")?;
        Ok(decode_rows("goal", rows))
    }

    fn create_goal(&self, goal: &NewGoal) -> Result<(), ApiError> {
        self.send(self.client.post(self.url("goals")).json(goal))?;
        Ok(())
    }

    fn update_goal(&self, id: i64, goal: &GoalUpdate) -> Result<(), ApiError> {
        self.send(self.client.put(self.url(&format!("goals/{id}"))).json(goal))?;
        Ok(())
    }

    fn delete_goal(&self, id: i64) -> Result<(), ApiError> {
        self.send(self.client.delete(self.url(&format!("goals/{id}"))))?;
        Ok(())
    }

    fn list_categories(&self) -> Result<Vec<String>, ApiError> {
        self.get_json("categories")
    }

    fn create_category(&self, name: &str) -> Result<(), ApiError> {
        self.send(
            self.client
                .post(self.url("categories"))
                .json(&json!({ "name": name })),
        )?;
        Ok(())
    }

    fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        let resp = self.send(self.client.post(self.url("chat")).json(request))?;
        resp.json::<ChatReply>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get_json("health")
    }
}
