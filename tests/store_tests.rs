// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{FakeApi, day, dec, loaded_session};
use spendwise::error::SessionError;
use spendwise::models::{PaymentMethod, Priority};
use spendwise::store::{ClearOutcome, ClearReport, ExpenseForm, GoalForm};

fn food_form(amount: &str, date: &str, method: PaymentMethod) -> ExpenseForm {
    ExpenseForm {
        amount: amount.to_string(),
        category: "Food".to_string(),
        date: day(date),
        payment_method: method,
        description: String::new(),
    }
}

#[test]
fn every_write_is_followed_by_a_refetch() {
    let mut session = loaded_session(FakeApi::new());
    session
        .add_expense(&food_form("100", "2024-01-15", PaymentMethod::Cash))
        .unwrap();
    let id = session.expenses()[0].id;
    session
        .update_expense(id, &food_form("120", "2024-01-15", PaymentMethod::Cash))
        .unwrap();
    session.delete_expense(id).unwrap();

    assert_eq!(
        session.api().calls(),
        vec![
            "POST /expenses",
            "GET /expenses",
            format!("PUT /expenses/{id}").as_str(),
            "GET /expenses",
            format!("DELETE /expenses/{id}").as_str(),
            "GET /expenses",
        ]
    );
    assert!(session.expenses().is_empty());
}

#[test]
fn added_expenses_feed_the_store() {
    let mut session = loaded_session(FakeApi::new());
    session
        .add_expense(&food_form("100", "2024-01-15", PaymentMethod::Cash))
        .unwrap();
    session
        .add_expense(&food_form("1,250.50", "2024-02-10", PaymentMethod::Upi))
        .unwrap();
    let amounts: Vec<_> = session.expenses().iter().map(|e| e.amount).collect();
    assert_eq!(amounts, vec![dec("100"), dec("1250.50")]);
}

#[test]
fn invalid_forms_never_reach_the_network() {
    let mut session = loaded_session(FakeApi::new());

    let mut form = food_form("", "2024-01-15", PaymentMethod::Cash);
    assert!(matches!(
        session.add_expense(&form),
        Err(SessionError::Validation(_))
    ));
    form.amount = "twelve".into();
    assert!(matches!(
        session.add_expense(&form),
        Err(SessionError::Validation(_))
    ));
    form.amount = "12".into();
    form.category = "  ".into();
    assert!(matches!(
        session.add_expense(&form),
        Err(SessionError::Validation(_))
    ));
    form.category = "Food".into();
    form.amount = "12,50".into();
    assert!(matches!(
        session.add_expense(&form),
        Err(SessionError::Validation(_))
    ));
    form.amount = "-12".into();
    assert!(matches!(
        session.add_expense(&form),
        Err(SessionError::Validation(_))
    ));

    let goal = GoalForm {
        name: "Trip".into(),
        target: "5000".into(),
        deadline: None,
        priority: Priority::High,
    };
    assert!(matches!(
        session.add_goal(&goal),
        Err(SessionError::Validation(_))
    ));
    let goal = GoalForm {
        name: String::new(),
        deadline: Some(day("2024-12-31")),
        ..goal
    };
    assert!(matches!(
        session.add_goal(&goal),
        Err(SessionError::Validation(_))
    ));

    assert!(session.api().calls().is_empty());
}

#[test]
fn failed_write_leaves_local_state_untouched() {
    let api = FakeApi::new();
    api.seed_expense("40", "Bills", "2024-03-01", PaymentMethod::Card);
    let mut session = loaded_session(api);
    session.api().state.borrow_mut().fail_writes = true;

    let before = session.expenses().to_vec();
    let err = session
        .add_expense(&food_form("10", "2024-03-02", PaymentMethod::Cash))
        .unwrap_err();
    assert!(matches!(err, SessionError::Api(_)));
    assert_eq!(session.expenses(), before.as_slice());
    assert_eq!(session.api().calls(), vec!["POST /expenses"]);
}

#[test]
fn failed_refetch_keeps_previous_collection() {
    let api = FakeApi::new();
    api.seed_goal("Phone", "30000", "0", "2025-01-01");
    let mut session = loaded_session(api);
    session.api().state.borrow_mut().fail_lists = true;

    assert!(session.refresh_goals().is_err());
    assert_eq!(session.goals().len(), 1);
}

#[test]
fn goals_create_contribute_and_delete() {
    let mut session = loaded_session(FakeApi::new());
    session
        .add_goal(&GoalForm {
            name: "Emergency fund".into(),
            target: "₹50,000".into(),
            deadline: Some(day("2025-06-30")),
            priority: Priority::High,
        })
        .unwrap();
    let goal = session.goals()[0].clone();
    assert_eq!(goal.target, dec("50000"));
    assert_eq!(goal.current, dec("0"));

    session.contribute_goal(goal.id, "12,500").unwrap();
    assert_eq!(session.store().goal(goal.id).unwrap().current, dec("12500"));

    assert_eq!(
        session.contribute_goal(999, "1").unwrap_err(),
        SessionError::NotFound { kind: "goal", id: 999 }
    );

    session.delete_goal(goal.id).unwrap();
    assert!(session.goals().is_empty());
}

#[test]
fn category_view_merges_builtin_and_custom_without_duplicates() {
    let api = FakeApi::new();
    api.state.borrow_mut().categories = vec!["Pets".into(), "Food".into(), "Gifts".into()];
    let mut session = loaded_session(api);

    let cats = session.categories();
    assert_eq!(cats.len(), 10);
    assert_eq!(cats[0], "Food");
    assert_eq!(&cats[8..], &["Pets".to_string(), "Gifts".to_string()]);

    session.add_category("Travel").unwrap();
    assert_eq!(session.categories().last().unwrap(), "Travel");
    assert!(matches!(
        session.add_category("Travel"),
        Err(SessionError::Api(_))
    ));
}

#[test]
fn bulk_clear_deletes_each_record_then_resets() {
    let api = FakeApi::new();
    for (amt, date) in [("10", "2024-01-01"), ("20", "2024-01-02"), ("30", "2024-01-03")] {
        api.seed_expense(amt, "Food", date, PaymentMethod::Cash);
    }
    api.seed_goal("A", "100", "0", "2024-12-31");
    api.seed_goal("B", "200", "0", "2024-12-31");
    api.queue_reply(Ok("hello"));
    let mut session = loaded_session(api);
    session.send_chat("hi").unwrap();
    session.api().clear_calls();

    let outcome = session.clear_all(|plan| {
        assert_eq!((plan.expenses, plan.goals), (3, 2));
        true
    });
    assert_eq!(
        outcome,
        ClearOutcome::Completed(ClearReport {
            attempted: 5,
            failed: 0,
            refetch_failed: false,
        })
    );

    let calls = session.api().calls();
    let deletes: Vec<&String> = calls.iter().filter(|c| c.starts_with("DELETE")).collect();
    assert_eq!(deletes.len(), 5);
    assert_eq!(
        calls,
        vec![
            "DELETE /expenses/1",
            "DELETE /expenses/2",
            "DELETE /expenses/3",
            "DELETE /goals/4",
            "DELETE /goals/5",
            "GET /expenses",
            "GET /goals",
        ]
    );
    assert!(session.expenses().is_empty());
    assert!(session.goals().is_empty());
    assert!(session.chat().transcript().is_empty());
    assert!(session.chat().history().is_empty());
}

#[test]
fn bulk_clear_keeps_going_after_failures() {
    let api = FakeApi::new();
    let e1 = api.seed_expense("10", "Food", "2024-01-01", PaymentMethod::Cash);
    let e2 = api.seed_expense("20", "Food", "2024-01-02", PaymentMethod::Cash);
    let g1 = api.seed_goal("A", "100", "0", "2024-12-31");
    api.state.borrow_mut().fail_expense_deletes.insert(e1);
    api.state.borrow_mut().fail_goal_deletes.insert(g1);
    let mut session = loaded_session(api);

    let ClearOutcome::Completed(report) = session.clear_all(|_| true) else {
        panic!("clear was not confirmed");
    };
    assert_eq!(report.attempted, 3);
    assert_eq!(report.failed, 2);
    assert_eq!(report.succeeded(), 1);
    assert!(!report.is_success());

    let left: Vec<i64> = session.expenses().iter().map(|e| e.id).collect();
    assert_eq!(left, vec![e1]);
    assert!(!left.contains(&e2));
    assert_eq!(session.goals().len(), 1);
}

#[test]
fn bulk_clear_without_confirmation_does_nothing() {
    let api = FakeApi::new();
    api.seed_expense("10", "Food", "2024-01-01", PaymentMethod::Cash);
    let mut session = loaded_session(api);

    assert_eq!(session.clear_all(|_| false), ClearOutcome::Cancelled);
    assert!(session.api().calls().is_empty());
    assert_eq!(session.expenses().len(), 1);
}

#[test]
fn bulk_clear_flags_a_failed_reload() {
    let api = FakeApi::new();
    api.seed_expense("10", "Food", "2024-01-01", PaymentMethod::Cash);
    api.seed_goal("A", "100", "0", "2024-12-31");
    let mut session = loaded_session(api);
    session.api().state.borrow_mut().fail_lists = true;

    let ClearOutcome::Completed(report) = session.clear_all(|_| true) else {
        panic!("clear was not confirmed");
    };
    assert_eq!(report.failed, 0);
    assert!(report.refetch_failed);
    assert!(!report.is_success());
    // The stale cache is still what the session shows.
    assert_eq!(session.expenses().len(), 1);
}

#[test]
fn contribution_that_would_overflow_is_rejected() {
    let api = FakeApi::new();
    let id = api.seed_goal("Moon", "1", "70000000000000000000000000000", "2030-01-01");
    let mut session = loaded_session(api);
    assert!(matches!(
        session.contribute_goal(id, "50000000000000000000000000000"),
        Err(SessionError::Validation(_))
    ));
    assert!(session.api().calls().is_empty());
}
