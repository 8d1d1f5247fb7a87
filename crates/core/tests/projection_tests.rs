// ═══════════════════════════════════════════════════════════════════
// Projection Tests — compound simulation, annuity solver, goal math
// ═══════════════════════════════════════════════════════════════════

use approx::{assert_abs_diff_eq, assert_relative_eq};

use invest_tracker_core::models::scenario::ScenarioInputs;
use invest_tracker_core::services::projection_service::ProjectionService;

fn scenario(
    initial_amount: f64,
    monthly_deposit: f64,
    expected_irr: f64,
    target_amount: f64,
    duration_years: u32,
) -> ScenarioInputs {
    ScenarioInputs {
        initial_amount,
        monthly_deposit,
        expected_irr,
        target_amount,
        duration_years,
    }
}

// ═══════════════════════════════════════════════════════════════════
//  project_future_value
// ═══════════════════════════════════════════════════════════════════

mod future_value {
    use super::*;

    #[test]
    fn zero_rate_is_linear_accumulation() {
        let service = ProjectionService::new();
        let inputs = scenario(1_000.0, 100.0, 0.0, 0.0, 2);
        // 1 000 + 24 × 100
        assert_relative_eq!(service.project_future_value(&inputs), 3_400.0);
    }

    #[test]
    fn zero_duration_returns_initial() {
        let service = ProjectionService::new();
        let inputs = scenario(1_000.0, 100.0, 8.0, 0.0, 0);
        assert_relative_eq!(service.project_future_value(&inputs), 1_000.0);
    }

    #[test]
    fn compounds_monthly_without_deposits() {
        let service = ProjectionService::new();
        // 12% annual → 1% monthly over one year
        let inputs = scenario(1_000.0, 0.0, 12.0, 0.0, 1);
        let expected = 1_000.0 * 1.01_f64.powi(12);
        assert_abs_diff_eq!(service.project_future_value(&inputs), expected, epsilon = 1e-9);
    }

    #[test]
    fn matches_closed_form_annuity() {
        let service = ProjectionService::new();
        let inputs = scenario(10_000.0, 250.0, 6.0, 0.0, 10);
        let r = 0.06 / 12.0;
        let n = 120;
        let growth = (1.0_f64 + r).powi(n);
        // ordinary annuity: FV = P·(1+r)^n + pmt·((1+r)^n − 1)/r
        let expected = 10_000.0 * growth + 250.0 * (growth - 1.0) / r;
        assert_abs_diff_eq!(service.project_future_value(&inputs), expected, epsilon = 1e-6);
    }

    #[test]
    fn deterministic() {
        let service = ProjectionService::new();
        let inputs = scenario(5_000.0, 150.0, 7.5, 0.0, 15);
        assert_eq!(
            service.project_future_value(&inputs).to_bits(),
            service.project_future_value(&inputs).to_bits()
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
//  project_growth_series
// ═══════════════════════════════════════════════════════════════════

mod growth_series {
    use super::*;

    #[test]
    fn starts_at_year_zero_with_initial_amount() {
        let service = ProjectionService::new();
        let inputs = scenario(25_000.0, 300.0, 8.0, 0.0, 15);
        let series = service.project_growth_series(&inputs);
        assert_eq!(series[0].year_offset, 0);
        assert_relative_eq!(series[0].value, 25_000.0);
    }

    #[test]
    fn has_one_point_per_year_plus_start() {
        let service = ProjectionService::new();
        let inputs = scenario(25_000.0, 300.0, 8.0, 0.0, 15);
        let series = service.project_growth_series(&inputs);
        assert_eq!(series.len(), 16);
        assert_eq!(series.last().unwrap().year_offset, 15);
    }

    #[test]
    fn final_point_equals_future_value() {
        // the chart re-derives checkpoints from the same simulation,
        // so the last one must equal the scalar projection exactly
        let service = ProjectionService::new();
        let inputs = scenario(25_000.0, 300.0, 8.0, 0.0, 15);
        let series = service.project_growth_series(&inputs);
        let fv = service.project_future_value(&inputs);
        assert_eq!(series.last().unwrap().value.to_bits(), fv.to_bits());
    }

    #[test]
    fn values_grow_monotonically_with_positive_inputs() {
        let service = ProjectionService::new();
        let inputs = scenario(10_000.0, 100.0, 5.0, 0.0, 10);
        let series = service.project_growth_series(&inputs);
        for pair in series.windows(2) {
            assert!(pair[1].value > pair[0].value);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
//  solve_required_monthly_deposit
// ═══════════════════════════════════════════════════════════════════

mod solver {
    use super::*;

    #[test]
    fn round_trip_reproduces_target() {
        // the regression test for this module: feed the solver's output
        // back into the simulator and land on the target
        let service = ProjectionService::new();
        let inputs = scenario(100_000.0, 0.0, 8.0, 500_000.0, 15);
        let pmt = service.solve_required_monthly_deposit(&inputs);
        assert!(pmt >= 0.0);

        let mut check = inputs.clone();
        check.monthly_deposit = pmt;
        let reached = service.project_future_value(&check);
        assert_abs_diff_eq!(reached, 500_000.0, epsilon = 1.0);
    }

    #[test]
    fn goal_reachable_from_principal_alone_needs_nothing() {
        let service = ProjectionService::new();
        // 100 000 at 8% over 15 years grows well past 200 000
        let inputs = scenario(100_000.0, 0.0, 8.0, 200_000.0, 15);
        assert_relative_eq!(service.solve_required_monthly_deposit(&inputs), 0.0);
    }

    #[test]
    fn zero_rate_guards_to_zero() {
        let service = ProjectionService::new();
        let inputs = scenario(1_000.0, 0.0, 0.0, 100_000.0, 10);
        assert_relative_eq!(service.solve_required_monthly_deposit(&inputs), 0.0);
    }

    #[test]
    fn zero_duration_guards_to_zero() {
        let service = ProjectionService::new();
        let inputs = scenario(1_000.0, 0.0, 8.0, 100_000.0, 0);
        assert_relative_eq!(service.solve_required_monthly_deposit(&inputs), 0.0);
    }

    #[test]
    fn larger_target_needs_larger_deposit() {
        let service = ProjectionService::new();
        let small = scenario(50_000.0, 0.0, 6.0, 300_000.0, 20);
        let large = scenario(50_000.0, 0.0, 6.0, 600_000.0, 20);
        assert!(
            service.solve_required_monthly_deposit(&large)
                > service.solve_required_monthly_deposit(&small)
        );
    }

    #[test]
    fn never_negative() {
        let service = ProjectionService::new();
        // absurdly overshooting principal
        let inputs = scenario(10_000_000.0, 0.0, 8.0, 1_000.0, 30);
        assert!(service.solve_required_monthly_deposit(&inputs) >= 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  goal_progress
// ═══════════════════════════════════════════════════════════════════

mod goal_progress {
    use super::*;

    #[test]
    fn halfway() {
        let service = ProjectionService::new();
        assert_relative_eq!(service.goal_progress(250_000.0, 500_000.0), 50.0);
    }

    #[test]
    fn exceeding_the_goal_is_not_clamped() {
        // display clamping belongs to the presentation layer
        let service = ProjectionService::new();
        assert_relative_eq!(service.goal_progress(600_000.0, 500_000.0), 120.0);
    }

    #[test]
    fn zero_target_guards_to_zero() {
        let service = ProjectionService::new();
        assert_relative_eq!(service.goal_progress(250_000.0, 0.0), 0.0);
    }
}
