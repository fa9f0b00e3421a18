// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{day, dec};
use rust_decimal::Decimal;
use serde_json::json;
use spendwise::models::{
    ChatTurn, Expense, Goal, NewExpense, PaymentMethod, Priority, Role, decode_rows,
};

#[test]
fn decodes_backend_expense_rows() {
    let body = json!([
        {
            "id": 7,
            "amount": 250.75,
            "category": "Food",
            "date": "2024-01-15",
            "payment_method": "UPI",
            "description": "lunch",
            "created_at": "2024-01-15 12:30:00"
        },
        {
            "id": 8,
            "amount": "1,200",
            "category": "Bills",
            "date": "2024-02-01T00:00:00",
            "paymentMethod": "Card"
        }
    ]);
    let rows: Vec<Expense> = serde_json::from_value(body).unwrap();
    assert_eq!(rows[0].amount, dec("250.75"));
    assert_eq!(rows[0].payment_method, PaymentMethod::Upi);
    assert_eq!(rows[0].description.as_deref(), Some("lunch"));
    assert_eq!(rows[1].amount, dec("1200"));
    assert_eq!(rows[1].date, day("2024-02-01"));
    assert_eq!(rows[1].payment_method, PaymentMethod::Card);
    assert_eq!(rows[1].description, None);
}

#[test]
fn unusable_amounts_count_as_zero_and_negatives_as_magnitude() {
    let body = json!([
        {"id": 1, "amount": "abc", "category": "Food", "date": "2024-01-01", "payment_method": "Cash"},
        {"id": 2, "amount": null, "category": "Food", "date": "2024-01-01", "payment_method": "Cash"},
        {"id": 3, "category": "Food", "date": "2024-01-01", "payment_method": "Cash"},
        {"id": 4, "amount": -30, "category": "Food", "date": "2024-01-01", "payment_method": "Cash"}
    ]);
    let rows: Vec<Expense> = serde_json::from_value(body).unwrap();
    let amounts: Vec<Decimal> = rows.iter().map(|e| e.amount).collect();
    assert_eq!(
        amounts,
        vec![Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, dec("30")]
    );
}

#[test]
fn bad_dates_are_rejected() {
    let body = json!({"id": 1, "amount": 5, "category": "Food", "date": "15/01/2024", "payment_method": "Cash"});
    assert!(serde_json::from_value::<Expense>(body).is_err());
}

#[test]
fn goal_defaults_priority_and_reads_numeric_strings() {
    let body = json!({
        "id": 3,
        "name": "Bike",
        "target": "45000",
        "current": 12000.5,
        "deadline": "2024-12-31"
    });
    let g: Goal = serde_json::from_value(body).unwrap();
    assert_eq!(g.target, dec("45000"));
    assert_eq!(g.current, dec("12000.5"));
    assert_eq!(g.priority, Priority::Medium);
}

#[test]
fn new_expense_uses_camel_case_payment_and_numeric_amount() {
    let body = NewExpense {
        amount: dec("99.5"),
        category: "Transport".into(),
        date: day("2024-03-05"),
        payment_method: PaymentMethod::Upi,
        description: String::new(),
    };
    let v = serde_json::to_value(&body).unwrap();
    assert_eq!(
        v,
        json!({
            "amount": 99.5,
            "category": "Transport",
            "date": "2024-03-05",
            "paymentMethod": "UPI",
            "description": ""
        })
    );
}

#[test]
fn chat_turns_use_lowercase_roles() {
    let v = serde_json::to_value(ChatTurn::assistant("hi")).unwrap();
    assert_eq!(v, json!({"role": "assistant", "content": "hi"}));
    let t: ChatTurn = serde_json::from_value(json!({"role": "user", "content": "x"})).unwrap();
    assert_eq!(t.role, Role::User);
}

#[test]
fn payment_methods_parse_case_insensitively() {
    assert_eq!("upi".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);
    assert_eq!(" CARD ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
    assert!("cheque".parse::<PaymentMethod>().is_err());
    assert_eq!(PaymentMethod::ALL.len(), 3);
    assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
}

#[test]
fn one_bad_row_does_not_drop_the_list() {
    let body = json!([
        {"id": 1, "amount": 10, "category": "Food", "date": "2024-01-01", "payment_method": "Cash"},
        {"id": 2, "amount": 20, "category": "Bills", "date": "2024-01-02", "payment_method": "Net Banking"},
        {"id": 3, "amount": 30, "category": "Food", "date": "01/03/2024", "payment_method": "UPI"},
        {"id": 4, "amount": 40, "category": "Health", "date": "2024-01-04", "payment_method": "Card"}
    ]);
    let rows: Vec<serde_json::Value> = serde_json::from_value(body).unwrap();
    let expenses: Vec<Expense> = decode_rows("expense", rows);
    let ids: Vec<i64> = expenses.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 4]);

    let goals: Vec<Goal> = decode_rows(
        "goal",
        vec![
            json!({"id": 5, "name": "Bike", "target": 100, "current": 0, "deadline": "2024-12-31"}),
            json!({"id": 6, "name": "Bad", "target": 100, "current": 0}),
        ],
    );
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].id, 5);
}
