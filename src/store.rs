// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client-side copy of the backend collections and the session that owns it.
//!
//! Local collections are only ever replaced by a fresh read from the API:
//! every successful write is followed by a refetch of the collection it
//! touched, and nothing is patched in place.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::api::FinanceApi;
use crate::chat::{ChatSession, CompletionOutcome};
use crate::error::{ApiError, SessionError};
use crate::models::{
    BUILTIN_CATEGORIES, Expense, Goal, GoalUpdate, NewExpense, NewGoal, PaymentMethod, Priority,
};
use crate::utils::parse_amount;

#[derive(Debug, Default, Clone)]
pub struct DomainStore {
    pub expenses: Vec<Expense>,
    pub goals: Vec<Goal>,
    pub custom_categories: Vec<String>,
}

impl DomainStore {
    /// Built-in categories followed by custom ones, without duplicates.
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for c in BUILTIN_CATEGORIES
            .iter()
            .map(|c| c.to_string())
            .chain(self.custom_categories.iter().cloned())
        {
            if !out.contains(&c) {
                out.push(c);
            }
        }
        out
    }

    pub fn expense(&self, id: i64) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn goal(&self, id: i64) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }
}

/// Raw form input for an expense; validated before anything is sent.
#[derive(Debug, Clone)]
pub struct ExpenseForm {
    pub amount: String,
    pub category: String,
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub description: String,
}

impl Default for ExpenseForm {
    fn default() -> Self {
        Self {
            amount: String::new(),
            category: "Food".to_string(),
            date: Local::now().date_naive(),
            payment_method: PaymentMethod::Upi,
            description: String::new(),
        }
    }
}

impl ExpenseForm {
    pub fn from_expense(e: &Expense) -> Self {
        Self {
            amount: e.amount.to_string(),
            category: e.category.clone(),
            date: e.date,
            payment_method: e.payment_method,
            description: e.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<NewExpense, SessionError> {
        let category = self.category.trim();
        if self.amount.trim().is_empty() || category.is_empty() {
            return Err(SessionError::Validation(
                "amount and category are required".into(),
            ));
        }
        let amount = parse_amount(&self.amount)
            .map_err(|e| SessionError::Validation(e.to_string()))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(SessionError::Validation(
                "amount must not be negative".into(),
            ));
        }
        Ok(NewExpense {
            amount,
            category: category.to_string(),
            date: self.date,
            payment_method: self.payment_method,
            description: self.description.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct GoalForm {
    pub name: String,
    pub target: String,
    pub deadline: Option<NaiveDate>,
    pub priority: Priority,
}

impl GoalForm {
    pub fn validate(&self) -> Result<NewGoal, SessionError> {
        let name = self.name.trim();
        let deadline = match self.deadline {
            Some(d) if !name.is_empty() && !self.target.trim().is_empty() => d,
            _ => {
                return Err(SessionError::Validation(
                    "name, target and deadline are required".into(),
                ));
            }
        };
        let target = parse_amount(&self.target)
            .map_err(|e| SessionError::Validation(e.to_string()))?;
        if target <= Decimal::ZERO {
            return Err(SessionError::Validation(
                "target must be greater than zero".into(),
            ));
        }
        Ok(NewGoal {
            name: name.to_string(),
            target,
            deadline,
            priority: self.priority,
        })
    }
}

/// What a bulk clear is about to delete; shown when asking for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearPlan {
    pub expenses: usize,
    pub goals: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearReport {
    pub attempted: usize,
    pub failed: usize,
    /// The collections could not be re-read afterwards, so the cache may still
    /// show deleted records.
    pub refetch_failed: bool,
}

impl ClearReport {
    pub fn succeeded(&self) -> usize {
        self.attempted - self.failed
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0 && !self.refetch_failed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cancelled,
    Completed(ClearReport),
}

/// One user session: the API handle, the cached collections and the advisor chat.
pub struct Session<A: FinanceApi> {
    api: A,
    store: DomainStore,
    chat: ChatSession,
}

fn logged<T>(what: &str, r: Result<T, ApiError>) -> Result<T, SessionError> {
    r.map_err(|e| {
        warn!(error = %e, "failed to {}", what);
        SessionError::Api(e)
    })
}

impl<A: FinanceApi> Session<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            store: DomainStore::default(),
            chat: ChatSession::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &DomainStore {
        &self.store
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.store.expenses
    }

    pub fn goals(&self) -> &[Goal] {
        &self.store.goals
    }

    pub fn categories(&self) -> Vec<String> {
        self.store.categories()
    }

    /// Load all three collections; each failure is logged and the others still load.
    pub fn refresh_all(&mut self) -> Result<(), SessionError> {
        let expenses = self.refresh_expenses();
        let goals = self.refresh_goals();
        let categories = self.refresh_categories();
        expenses.and(goals).and(categories)
    }

    pub fn refresh_expenses(&mut self) -> Result<(), SessionError> {
        self.store.expenses = logged("fetch expenses", self.api.list_expenses())?;
        Ok(())
    }

    pub fn refresh_goals(&mut self) -> Result<(), SessionError> {
        self.store.goals = logged("fetch goals", self.api.list_goals())?;
        Ok(())
    }

    pub fn refresh_categories(&mut self) -> Result<(), SessionError> {
        self.store.custom_categories = logged("fetch categories", self.api.list_categories())?;
        Ok(())
    }

    pub fn add_expense(&mut self, form: &ExpenseForm) -> Result<(), SessionError> {
        let body = form.validate()?;
        logged("add expense", self.api.create_expense(&body))?;
        self.refresh_expenses()
    }

    pub fn update_expense(&mut self, id: i64, form: &ExpenseForm) -> Result<(), SessionError> {
        let body = form.validate()?;
        logged("update expense", self.api.update_expense(id, &body))?;
        self.refresh_expenses()
    }

    pub fn delete_expense(&mut self, id: i64) -> Result<(), SessionError> {
        logged("delete expense", self.api.delete_expense(id))?;
        self.refresh_expenses()
    }

    pub fn add_goal(&mut self, form: &GoalForm) -> Result<(), SessionError> {
        let body = form.validate()?;
        logged("add goal", self.api.create_goal(&body))?;
        self.refresh_goals()
    }

    pub fn update_goal(&mut self, id: i64, update: &GoalUpdate) -> Result<(), SessionError> {
        if update.name.trim().is_empty() || update.target <= Decimal::ZERO {
            return Err(SessionError::Validation(
                "name and a positive target are required".into(),
            ));
        }
        logged("update goal", self.api.update_goal(id, update))?;
        self.refresh_goals()
    }

    /// Add `amount` to a goal's saved amount, based on the last fetched copy.
    pub fn contribute_goal(&mut self, id: i64, amount: &str) -> Result<(), SessionError> {
        let amount =
            parse_amount(amount).map_err(|e| SessionError::Validation(e.to_string()))?;
        let goal = self
            .store
            .goal(id)
            .ok_or(SessionError::NotFound { kind: "goal", id })?;
        let mut update = GoalUpdate::from(goal);
        update.current = update
            .current
            .checked_add(amount)
            .ok_or_else(|| SessionError::Validation("amount is too large".into()))?
            .max(Decimal::ZERO);
        self.update_goal(id, &update)
    }

    pub fn delete_goal(&mut self, id: i64) -> Result<(), SessionError> {
        logged("delete goal", self.api.delete_goal(id))?;
        self.refresh_goals()
    }

    pub fn add_category(&mut self, name: &str) -> Result<(), SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::Validation("category name is required".into()));
        }
        logged("add category", self.api.create_category(name))?;
        self.refresh_categories()
    }

    /// Send `text` to the advisor with the current expenses and goals as context.
    pub fn send_chat(&mut self, text: &str) -> Result<CompletionOutcome, SessionError> {
        self.chat.set_input(text);
        let result = self
            .chat
            .send(&self.api, &self.store.expenses, &self.store.goals);
        if result.is_err() {
            // Leave nothing behind in the buffer when the send never started.
            self.chat.set_input("");
        }
        result
    }

    pub fn reset_chat(&mut self) {
        self.chat.reset();
    }

    /// Delete every cached expense and goal, one call at a time.
    ///
    /// Nothing happens unless `confirm` agrees. Failures do not stop the
    /// sequence and nothing is rolled back; the report only counts them.
    pub fn clear_all<F>(&mut self, confirm: F) -> ClearOutcome
    where
        F: FnOnce(&ClearPlan) -> bool,
    {
        let plan = ClearPlan {
            expenses: self.store.expenses.len(),
            goals: self.store.goals.len(),
        };
        if !confirm(&plan) {
            return ClearOutcome::Cancelled;
        }

        let expense_ids: Vec<i64> = self.store.expenses.iter().map(|e| e.id).collect();
        let goal_ids: Vec<i64> = self.store.goals.iter().map(|g| g.id).collect();
        let mut report = ClearReport::default();

        for id in expense_ids {
            report.attempted += 1;
            if logged("delete expense", self.api.delete_expense(id)).is_err() {
                report.failed += 1;
            }
        }
        for id in goal_ids {
            report.attempted += 1;
            if logged("delete goal", self.api.delete_goal(id)).is_err() {
                report.failed += 1;
            }
        }

        let expenses = self.refresh_expenses();
        let goals = self.refresh_goals();
        report.refetch_failed = expenses.is_err() || goals.is_err();
        self.chat.reset();
        info!(
            attempted = report.attempted,
            failed = report.failed,
            refetch_failed = report.refetch_failed,
            "bulk clear finished"
        );
        ClearOutcome::Completed(report)
    }
}
