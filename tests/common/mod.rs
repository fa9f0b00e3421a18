// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendwise::api::FinanceApi;
use spendwise::error::ApiError;
use spendwise::models::{
    ChatReply, ChatRequest, Expense, Goal, GoalUpdate, HealthStatus, NewExpense, NewGoal,
    PaymentMethod, Priority,
};
use spendwise::store::Session;

#[derive(Default)]
pub struct FakeState {
    pub expenses: Vec<Expense>,
    pub goals: Vec<Goal>,
    pub categories: Vec<String>,
    pub next_id: i64,
    pub calls: Vec<String>,
    pub fail_expense_deletes: HashSet<i64>,
    pub fail_goal_deletes: HashSet<i64>,
    pub fail_writes: bool,
    pub fail_lists: bool,
    pub replies: VecDeque<Result<String, ApiError>>,
    pub chat_requests: Vec<ChatRequest>,
}

/// In-memory stand-in for the backend; records every call it receives.
#[derive(Default)]
pub struct FakeApi {
    pub state: RefCell<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.state.borrow_mut().next_id = 1;
        api
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn queue_reply(&self, reply: Result<&str, ApiError>) {
        self.state
            .borrow_mut()
            .replies
            .push_back(reply.map(str::to_string));
    }

    pub fn seed_expense(&self, amount: &str, category: &str, date: &str, method: PaymentMethod) -> i64 {
        let mut s = self.state.borrow_mut();
        let id = s.next_id;
        s.next_id += 1;
        s.expenses.push(expense(id, amount, category, date, method));
        id
    }

    pub fn seed_goal(&self, name: &str, target: &str, current: &str, deadline: &str) -> i64 {
        let mut s = self.state.borrow_mut();
        let id = s.next_id;
        s.next_id += 1;
        s.goals.push(goal(id, name, target, current, deadline));
        id
    }

    fn record(&self, call: String) {
        self.state.borrow_mut().calls.push(call);
    }

    fn write_guard(&self) -> Result<(), ApiError> {
        if self.state.borrow().fail_writes {
            Err(ApiError::Server { status: 500 })
        } else {
            Ok(())
        }
    }

    fn list_guard(&self) -> Result<(), ApiError> {
        if self.state.borrow().fail_lists {
            Err(ApiError::Network("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

impl FinanceApi for FakeApi {
    fn list_expenses(&self) -> Result<Vec<Expense>, ApiError> {
        self.record("GET /expenses".into());
        self.list_guard()?;
        Ok(self.state.borrow().expenses.clone())
    }

    fn create_expense(&self, e: &NewExpense) -> Result<(), ApiError> {
        self.record("POST /expenses".into());
        self.write_guard()?;
        let mut s = self.state.borrow_mut();
        let id = s.next_id;
        s.next_id += 1;
        s.expenses.push(Expense {
            id,
            amount: e.amount,
            category: e.category.clone(),
            date: e.date,
            payment_method: e.payment_method,
            description: Some(e.description.clone()),
        });
        Ok(())
    }

    fn update_expense(&self, id: i64, e: &NewExpense) -> Result<(), ApiError> {
        self.record(format!("PUT /expenses/{id}"));
        self.write_guard()?;
        let mut s = self.state.borrow_mut();
        if let Some(x) = s.expenses.iter_mut().find(|x| x.id == id) {
            x.amount = e.amount;
            x.category = e.category.clone();
            x.date = e.date;
            x.payment_method = e.payment_method;
            x.description = Some(e.description.clone());
        }
        Ok(())
    }

    fn delete_expense(&self, id: i64) -> Result<(), ApiError> {
        self.record(format!("DELETE /expenses/{id}"));
        let mut s = self.state.borrow_mut();
        if s.fail_expense_deletes.contains(&id) {
            return Err(ApiError::Server { status: 500 });
        }
        s.expenses.retain(|x| x.id != id);
        Ok(())
    }

    fn list_goals(&self) -> Result<Vec<Goal>, ApiError> {
        self.record("GET /goals".into());
        self.list_guard()?;
        Ok(self.state.borrow().goals.clone())
    }

    fn create_goal(&self, g: &NewGoal) -> Result<(), ApiError> {
        self.record("POST /goals".into());
        self.write_guard()?;
        let mut s = self.state.borrow_mut();
        let id = s.next_id;
        s.next_id += 1;
        s.goals.push(Goal {
            id,
            name: g.name.clone(),
            target: g.target,
            current: Decimal::ZERO,
            deadline: g.deadline,
            priority: g.priority,
        });
        Ok(())
    }

    fn update_goal(&self, id: i64, g: &GoalUpdate) -> Result<(), ApiError> {
        self.record(format!("PUT /goals/{id}"));
        self.write_guard()?;
        let mut s = self.state.borrow_mut();
        if let Some(x) = s.goals.iter_mut().find(|x| x.id == id) {
            x.name = g.name.clone();
            x.target = g.target;
            x.current = g.current;
            x.deadline = g.deadline;
            x.priority = g.priority;
        }
        Ok(())
    }

    fn delete_goal(&self, id: i64) -> Result<(), ApiError> {
        self.record(format!("DELETE /goals/{id}"));
        let mut s = self.state.borrow_mut();
        if s.fail_goal_deletes.contains(&id) {
            return Err(ApiError::Network("connection reset".into()));
        }
        s.goals.retain(|x| x.id != id);
        Ok(())
    }

    fn list_categories(&self) -> Result<Vec<String>, ApiError> {
        self.record("GET /categories".into());
        self.list_guard()?;
        Ok(self.state.borrow().categories.clone())
    }

    fn create_category(&self, name: &str) -> Result<(), ApiError> {
        self.record("POST /categories".into());
        self.write_guard()?;
        let mut s = self.state.borrow_mut();
        if s.categories.iter().any(|c| c == name) {
            return Err(ApiError::Server { status: 400 });
        }
        s.categories.push(name.to_string());
        Ok(())
    }

    fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        self.record("POST /chat".into());
        let mut s = self.state.borrow_mut();
        s.chat_requests.push(request.clone());
        let reply = s
            .replies
            .pop_front()
            .unwrap_or_else(|| Ok("noted".to_string()));
        reply.map(|response| ChatReply { response })
    }

    fn health(&self) -> Result<HealthStatus, ApiError> {
        self.record("GET /health".into());
        Ok(HealthStatus {
            status: "ok".into(),
            message: "Finance API is running".into(),
        })
    }
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn expense(id: i64, amount: &str, category: &str, date: &str, method: PaymentMethod) -> Expense {
    Expense {
        id,
        amount: dec(amount),
        category: category.to_string(),
        date: day(date),
        payment_method: method,
        description: None,
    }
}

pub fn goal(id: i64, name: &str, target: &str, current: &str, deadline: &str) -> Goal {
    Goal {
        id,
        name: name.to_string(),
        target: dec(target),
        current: dec(current),
        deadline: day(deadline),
        priority: Priority::Medium,
    }
}

/// A session over a fake backend, already loaded.
pub fn loaded_session(api: FakeApi) -> Session<FakeApi> {
    let mut session = Session::new(api);
    session.refresh_all().unwrap();
    session.api().clear_calls();
    session
}
