use crate::models::Plan;

/// Cost breakdown of a plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanCost {
    /// Sum of every day's monetary cost.
    pub money: f64,

    /// Sum over dish names of `occurrences - 1`.
    pub repetitions: usize,

    /// Penalty charged per repetition.
    pub penalty_per_repetition: f64,
}

impl PlanCost {
    /// `money + penalty * repetitions`.
    pub fn total(&self) -> f64 {
        self.money + self.penalty_per_repetition * self.repetitions as f64
    }

    /// The repetition share of the total.
    pub fn penalty(&self) -> f64 {
        self.penalty_per_repetition * self.repetitions as f64
    }
}

/// Break a plan's cost down into money and repetition penalty.
pub fn evaluate_plan(plan: &Plan, repetition_penalty: f64) -> PlanCost {
    PlanCost {
        money: plan.total_cost(),
        repetitions: plan.repetition_count(),
        penalty_per_repetition: repetition_penalty,
    }
}

/// Annealing objective: monetary cost plus the repetition penalty.
pub fn plan_cost(plan: &Plan, repetition_penalty: f64) -> f64 {
    evaluate_plan(plan, repetition_penalty).total()
}
