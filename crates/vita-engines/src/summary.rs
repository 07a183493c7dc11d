use std::time::{Duration, Instant};
use vita_core::{Objective, Statistic};
use vita_gp::Individual;

/// Running account of a single evolutionary run: generation/operator
/// counters, elapsed wall time, the best individual seen so far, and a
/// distribution of the current generation's fitness values. The driver
/// owns one of these per run and hands a read-only view to termination
/// callbacks and progress logging.
pub struct Summary {
    pub generation: usize,
    pub crossovers: usize,
    pub mutations: usize,
    pub best: Option<Individual>,
    pub fitness_distribution: Statistic,
    pub elapsed: Duration,
    started_at: Instant,
}

impl Summary {
    pub fn new() -> Self {
        Summary {
            generation: 0,
            crossovers: 0,
            mutations: 0,
            best: None,
            fitness_distribution: Statistic::default(),
            elapsed: Duration::ZERO,
            started_at: Instant::now(),
        }
    }

    /// Clears the counters and best-ever, and restarts the elapsed-time
    /// clock — the driver's main loop calls this once before its first
    /// generation.
    pub fn reset(&mut self) {
        *self = Summary::new();
    }

    pub fn tick(&mut self) {
        self.elapsed = self.started_at.elapsed();
    }

    pub fn record_crossover(&mut self) {
        self.crossovers += 1;
    }

    pub fn record_mutation(&mut self) {
        self.mutations += 1;
    }

    /// Replaces `best` with `candidate` if it beats the current best (or
    /// there is none yet). Returns whether the update happened, so the
    /// driver can emit a progress event only on genuine improvement.
    pub fn consider_best(&mut self, candidate: &Individual, objective: &Objective) -> bool {
        let Some(candidate_fitness) = candidate.fitness.as_ref() else {
            return false;
        };
        let improved = match self.best.as_ref().and_then(|b| b.fitness.as_ref()) {
            Some(current_fitness) => objective.is_better(candidate_fitness, current_fitness),
            None => true,
        };
        if improved {
            self.best = Some(candidate.clone());
        }
        improved
    }

    pub fn snapshot_distribution(&mut self, fitnesses: impl Iterator<Item = f32>) {
        self.fitness_distribution = Statistic::default();
        for f in fitnesses {
            self.fitness_distribution.add(f);
        }
    }
}

impl Default for Summary {
    fn default() -> Self {
        Summary::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vita_core::{Optimize, Score};
    use vita_gp::{Category, Genome, Symbol, SymbolTable, Value};

    fn individual(fitness: f32) -> Individual {
        let mut t = SymbolTable::new();
        t.insert(Symbol::terminal("x", Category(1), 1.0, |_| Value::Double(1.0)));
        let mut ind = Individual::new(Genome::random(&t, 4, Category(1)));
        ind.fitness = Some(Score::from_vec(vec![fitness]));
        ind
    }

    #[test]
    fn consider_best_accepts_first_candidate_unconditionally() {
        let mut summary = Summary::new();
        let objective = Objective::Single(Optimize::Maximize);
        assert!(summary.consider_best(&individual(1.0), &objective));
    }

    #[test]
    fn consider_best_rejects_a_worse_candidate() {
        let mut summary = Summary::new();
        let objective = Objective::Single(Optimize::Maximize);
        summary.consider_best(&individual(5.0), &objective);
        assert!(!summary.consider_best(&individual(1.0), &objective));
    }

    #[test]
    fn reset_clears_counters_and_best() {
        let mut summary = Summary::new();
        let objective = Objective::Single(Optimize::Maximize);
        summary.consider_best(&individual(5.0), &objective);
        summary.record_crossover();
        summary.reset();
        assert!(summary.best.is_none());
        assert_eq!(summary.crossovers, 0);
    }
}
