use budgetcraft_core::{reconcile_expenses, BudgetService, SummaryService};
use budgetcraft_domain::{BudgetCategory, BudgetState, CategoryKind, NewExpense};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

const BUDGETS: [&str; 4] = ["Needs", "Wants", "Savings", "Debt"];

fn build_sample_state(expense_count: usize) -> BudgetState {
    let mut state = BudgetState::new(10_000.0);
    for name in BUDGETS {
        state
            .budget_categories
            .push(BudgetCategory::with_percentage(name, "#888888", 20.0));
    }
    for idx in 0..expense_count {
        let budget = BUDGETS[idx % BUDGETS.len()];
        state.expenses.push(
            NewExpense::new(
                "2025-01-01",
                format!("Expense {idx}"),
                5.0 + (idx % 100) as f64,
                format!("Spend {}", idx % 12),
                budget,
            )
            .into_expense(idx as i64 + 1),
        );
    }
    state.sync_colors();
    state
}

fn bench_reconcile(c: &mut Criterion) {
    let state = build_sample_state(black_box(10_000));

    c.bench_function("delete_budget_category_10k", |b| {
        b.iter_batched(
            || state.clone(),
            |mut state| {
                let report = BudgetService::delete_category(&mut state, "Savings").expect("delete");
                black_box(report);
            },
            BatchSize::LargeInput,
        )
    });

    c.bench_function("reconcile_clean_10k", |b| {
        b.iter_batched(
            || state.clone(),
            |mut state| black_box(reconcile_expenses(&mut state, CategoryKind::Budget)),
            BatchSize::LargeInput,
        )
    });

    c.bench_function("snapshot_10k", |b| {
        b.iter(|| black_box(SummaryService::snapshot(&state)))
    });
}

criterion_group!(benches, bench_reconcile);
criterion_main!(benches);
