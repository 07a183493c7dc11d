use vita_core::Objective;

use crate::summary::Summary;

#[derive(Debug, Clone)]
pub enum Limit {
    Generation(usize),
    Seconds(f64),
    Score(f32),
}

impl Limit {
    /// Whether this limit has been reached, given the run's current
    /// summary. The driver stops as soon as any configured limit (plus
    /// an external interrupt) is satisfied — a disjunction, per spec.
    pub fn reached(&self, summary: &Summary, objective: &Objective) -> bool {
        match self {
            Limit::Generation(max) => summary.generation >= *max,
            Limit::Seconds(max) => summary.elapsed.as_secs_f64() >= *max,
            Limit::Score(target) => summary
                .best
                .as_ref()
                .and_then(|b| b.fitness.as_ref())
                .is_some_and(|f| !objective.is_better(&target_score(*target), f)),
        }
    }
}

fn target_score(target: f32) -> vita_core::Score {
    vita_core::Score::from_vec(vec![target])
}

#[cfg(test)]
mod tests {
    use super::*;
    use vita_core::{Optimize, Score};
    use vita_gp::{Category, Genome, Individual, Symbol, SymbolTable, Value};

    fn individual(fitness: f32) -> Individual {
        let mut t = SymbolTable::new();
        t.insert(Symbol::terminal("x", Category(1), 1.0, |_| Value::Double(1.0)));
        let mut ind = Individual::new(Genome::random(&t, 4, Category(1)));
        ind.fitness = Some(Score::from_vec(vec![fitness]));
        ind
    }

    #[test]
    fn generation_limit_reached_at_exact_count() {
        let mut summary = Summary::new();
        summary.generation = 10;
        assert!(Limit::Generation(10).reached(&summary, &Objective::Single(Optimize::Maximize)));
        assert!(!Limit::Generation(11).reached(&summary, &Objective::Single(Optimize::Maximize)));
    }

    #[test]
    fn score_limit_reached_once_best_meets_or_beats_target() {
        let objective = Objective::Single(Optimize::Maximize);
        let mut summary = Summary::new();
        summary.consider_best(&individual(5.0), &objective);
        assert!(Limit::Score(5.0).reached(&summary, &objective));
        assert!(!Limit::Score(6.0).reached(&summary, &objective));
    }
}
