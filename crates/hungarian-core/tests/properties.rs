use hungarian_core::{solve, solve_with_options, verify, CostMatrix, HungarianSolver, SolverOptions};
use proptest::prelude::*;

fn brute_force_min(costs: &CostMatrix) -> i128 {
    fn walk(costs: &CostMatrix, row: usize, used: &mut Vec<bool>, acc: i128, best: &mut i128) {
        let n = costs.size();
        if row == n {
            *best = (*best).min(acc);
            return;
        }
        for col in 0..n {
            if !used[col] {
                used[col] = true;
                walk(costs, row + 1, used, acc + costs.get(row, col) as i128, best);
                used[col] = false;
            }
        }
    }
    let mut best = i128::MAX;
    let mut used = vec![false; costs.size()];
    walk(costs, 0, &mut used, 0, &mut best);
    if costs.is_empty() {
        0
    } else {
        best
    }
}

fn square_matrix(max_n: usize, max_cost: i64) -> impl Strategy<Value = CostMatrix> {
    (0..=max_n).prop_flat_map(move |n| {
        prop::collection::vec(0..=max_cost, n * n)
            .prop_map(move |data| CostMatrix::new(n, data).unwrap())
    })
}

proptest! {
    #[test]
    fn matches_brute_force_on_small_instances(costs in square_matrix(6, 50)) {
        let assignment = solve(&costs).unwrap();
        prop_assert_eq!(assignment.cost, brute_force_min(&costs));
    }

    #[test]
    fn result_is_a_certified_bijection(costs in square_matrix(12, 1_000)) {
        let assignment = solve(&costs).unwrap();
        let n = costs.size();
        let mut seen = vec![false; n];
        for &col in &assignment.row_to_column {
            prop_assert!(col < n);
            prop_assert!(!seen[col]);
            seen[col] = true;
        }
        prop_assert_eq!(verify(&costs, &assignment), Ok(()));
        prop_assert_eq!(assignment.cost, costs.assignment_cost(&assignment.row_to_column));
        prop_assert_eq!(assignment.cost, assignment.duals.objective());
    }

    #[test]
    fn invariants_hold_after_every_phase(costs in square_matrix(10, 30)) {
        let n = costs.size();
        let mut solver = HungarianSolver::new(&costs, &SolverOptions::default());
        for phase in 0..n {
            solver.run_phase().unwrap();
            prop_assert_eq!(solver.matching().size(), phase + 1);
            prop_assert!(solver.check_invariants().is_ok());
            let duals = solver.duals();
            for row in 0..n {
                for col in 0..n {
                    prop_assert!(duals.alpha[row] + duals.beta[col] <= 2 * costs.get(row, col));
                }
            }
        }
        prop_assert!(solver.is_complete());
    }

    #[test]
    fn resolving_is_deterministic(costs in square_matrix(9, 5)) {
        let opts = SolverOptions { check_invariants: true, record_phases: true };
        let first = solve_with_options(&costs, &opts).unwrap();
        let second = solve_with_options(&costs, &opts).unwrap();
        prop_assert_eq!(first.cost, second.cost);
        prop_assert_eq!(&first.row_to_column, &second.row_to_column);
        prop_assert_eq!(&first.stats, &second.stats);
    }

    #[test]
    fn constant_matrix_costs_n_times_k(n in 0usize..12, k in 0i64..1_000) {
        let costs = CostMatrix::new(n, vec![k; n * n]).unwrap();
        let assignment = solve(&costs).unwrap();
        prop_assert_eq!(assignment.cost, n as i128 * k as i128);
    }
}
