mod common;

use budget_schedule::{
    spent_in_window, Budget, BudgetPeriodSpec, BudgetService, BudgetStatus, PeriodKind,
    ScheduleError, Transaction,
};
use common::date;
use uuid::Uuid;

fn ledger(groceries: Uuid, travel: Uuid) -> Vec<Transaction> {
    vec![
        Transaction::expense(Some(groceries), 8_450, date(2024, 5, 30)),
        Transaction::expense(Some(groceries), 6_200, date(2024, 6, 2)),
        Transaction::expense(Some(groceries), 11_375, date(2024, 6, 9)),
        Transaction::expense(Some(groceries), 4_000, date(2024, 6, 15)),
        Transaction::expense(Some(travel), 82_000, date(2024, 6, 10)),
        Transaction::expense(None, 1_500, date(2024, 6, 11)).with_description("parking"),
        Transaction::income(None, 350_000, date(2024, 6, 1)),
    ]
}

#[test]
fn weekly_and_monthly_budgets_share_a_ledger() {
    let groceries = Uuid::new_v4();
    let travel = Uuid::new_v4();
    let txns = ledger(groceries, travel);
    let as_of = date(2024, 6, 12);

    let weekly = Budget::new(
        "Groceries (week)",
        10_000,
        Some(groceries),
        BudgetPeriodSpec::weekly(date(2024, 1, 1)),
    );
    let monthly = Budget::new(
        "Groceries (month)",
        40_000,
        Some(groceries),
        BudgetPeriodSpec::monthly(date(2024, 1, 1)),
    );

    let week = BudgetService::evaluate(&weekly, &txns, as_of).unwrap().unwrap();
    assert_eq!(week.window.window_start(), date(2024, 6, 9));
    assert_eq!(week.window.window_end(), date(2024, 6, 15));
    assert_eq!(week.spent_cents, 15_375);
    assert_eq!(week.status, BudgetStatus::OverBudget);
    assert_eq!(week.remaining_cents, -5_375);

    let month = BudgetService::evaluate(&monthly, &txns, as_of).unwrap().unwrap();
    assert_eq!(month.spent_cents, 21_575);
    assert_eq!(month.status, BudgetStatus::UnderBudget);
}

#[test]
fn uncategorised_budget_counts_every_expense() {
    let txns = ledger(Uuid::new_v4(), Uuid::new_v4());
    let window = BudgetPeriodSpec::monthly(date(2024, 1, 1))
        .window_for(date(2024, 6, 30))
        .unwrap();
    assert_eq!(spent_in_window(&txns, &window, None), 105_075);
}

#[test]
fn custom_trip_budget_only_active_inside_its_range() {
    let travel = Uuid::new_v4();
    let txns = ledger(Uuid::new_v4(), travel);
    let period = BudgetPeriodSpec::custom(date(2024, 6, 8), date(2024, 6, 16)).unwrap();
    let trip = Budget::new("Lisbon", 100_000, Some(travel), period);

    assert!(BudgetService::evaluate(&trip, &txns, date(2024, 6, 1)).unwrap().is_none());
    assert!(BudgetService::evaluate(&trip, &txns, date(2024, 6, 17)).unwrap().is_none());

    let progress = BudgetService::evaluate(&trip, &txns, date(2024, 6, 16))
        .unwrap()
        .unwrap();
    assert_eq!(progress.spent_cents, 82_000);
    assert_eq!(progress.percent_used, Some(82.0));
}

#[test]
fn evaluate_all_skips_inactive_and_surfaces_malformed() {
    let txns = ledger(Uuid::new_v4(), Uuid::new_v4());
    let as_of = date(2024, 6, 12);
    let budgets = vec![
        Budget::new("All", 200_000, None, BudgetPeriodSpec::yearly(date(2024, 1, 1))),
        Budget::new("Next year", 5_000, None, BudgetPeriodSpec::yearly(date(2025, 1, 1))),
    ];
    let progress = BudgetService::evaluate_all(&budgets, &txns, as_of).unwrap();
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0].budget_id, budgets[0].id);

    let mut broken = budgets.clone();
    broken[1].period.period_kind = PeriodKind::Custom;
    let err = BudgetService::evaluate_all(&broken, &txns, as_of).unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidSpec(_)));
}

#[test]
fn progress_serializes_for_callers() {
    let period = BudgetPeriodSpec::monthly(date(2024, 1, 1));
    let budget = Budget::new("Fun", 0, None, period);
    let progress = BudgetService::evaluate(&budget, &[], date(2024, 6, 12))
        .unwrap()
        .unwrap();
    let json = serde_json::to_value(&progress).unwrap();
    assert_eq!(json["status"], "empty");
    assert_eq!(json["window"]["window_start"], "2024-06-01");
    assert!(json["percent_used"].is_null());
}
