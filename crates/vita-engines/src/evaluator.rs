use std::sync::Mutex;
use vita_core::{Optimize, Score, random_provider};
use vita_gp::{Genome, Interpreter, SymbolTable, TranspositionCache};

/// The evaluator contract: total, never fails. `fast_evaluate` defaults
/// to `evaluate` — override it when a cheaper approximation exists (used
/// by brood recombination to rank candidates without a full evaluation).
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, genome: &Genome) -> Score;

    fn fast_evaluate(&self, genome: &Genome) -> Score {
        self.evaluate(genome)
    }
}

impl<F: Fn(&Genome) -> Score + Send + Sync> Evaluator for F {
    fn evaluate(&self, genome: &Genome) -> Score {
        self(genome)
    }
}

/// Consults the transposition cache by signature before delegating to
/// the wrapped evaluator. A hit returns the stored fitness; a miss calls
/// through, inserts, then returns.
pub struct CachingEvaluator<E> {
    inner: E,
    cache: Mutex<TranspositionCache>,
}

impl<E: Evaluator> CachingEvaluator<E> {
    pub fn new(inner: E, cache_size_exponent: u32) -> Self {
        CachingEvaluator { inner, cache: Mutex::new(TranspositionCache::new(cache_size_exponent)) }
    }

    pub fn clear_cache(&self) {
        self.cache.lock().unwrap().clear();
    }
}

impl<E: Evaluator> Evaluator for CachingEvaluator<E> {
    fn evaluate(&self, genome: &Genome) -> Score {
        let sig = genome.signature();
        if let Some(hit) = self.cache.lock().unwrap().find(sig) {
            return hit.clone();
        }
        let fitness = self.inner.evaluate(genome);
        self.cache.lock().unwrap().insert(sig, fitness.clone(), genome.len() as u32);
        fitness
    }
}

/// Wraps an evaluator with a constraint penalty: `combine(-penalty(g),
/// inner(g))`, so that any positive penalty strictly worsens a solution
/// in lexicographic order (the penalty term leads the fitness vector).
pub struct PenaltyEvaluator<E> {
    inner: E,
    table: SymbolTable,
}

impl<E: Evaluator> PenaltyEvaluator<E> {
    pub fn new(inner: E, table: SymbolTable) -> Self {
        PenaltyEvaluator { inner, table }
    }
}

impl<E: Evaluator> Evaluator for PenaltyEvaluator<E> {
    fn evaluate(&self, genome: &Genome) -> Score {
        let mut interpreter = Interpreter::new();
        let penalty = interpreter.penalty(&self.table, genome);
        let inner = self.inner.evaluate(genome);

        let mut values = vec![-(penalty as f32)];
        values.extend(inner.values.iter().copied());
        Score::from_vec(values)
    }

    fn fast_evaluate(&self, genome: &Genome) -> Score {
        let mut interpreter = Interpreter::new();
        let penalty = interpreter.penalty(&self.table, genome);
        let inner = self.inner.fast_evaluate(genome);

        let mut values = vec![-(penalty as f32)];
        values.extend(inner.values.iter().copied());
        Score::from_vec(values)
    }
}

/// Adapts an arbitrary objective function `f: Genome -> f64` (e.g. a
/// GA/DE fitness function evaluated over a decoded genome) into a
/// bounded `Score` via `1000 * (atan(f)/pi - 0.5)`. Non-finite `f`
/// yields a sentinel (the worst possible fitness for `optimize`).
pub struct GaEvaluator<F> {
    objective: F,
    optimize: Optimize,
}

impl<F: Fn(&Genome) -> f64 + Send + Sync> GaEvaluator<F> {
    pub fn new(objective: F, optimize: Optimize) -> Self {
        GaEvaluator { objective, optimize }
    }

    fn sentinel(&self) -> f32 {
        match self.optimize {
            Optimize::Maximize => f32::MIN,
            Optimize::Minimize => f32::MAX,
        }
    }
}

impl<F: Fn(&Genome) -> f64 + Send + Sync> Evaluator for GaEvaluator<F> {
    fn evaluate(&self, genome: &Genome) -> Score {
        let f = (self.objective)(genome);
        let fit = if f.is_finite() {
            (1000.0 * (f.atan() / std::f64::consts::PI - 0.5)) as f32
        } else {
            self.sentinel()
        };
        Score::from_vec(vec![fit])
    }
}

/// Returns a uniformly sampled fitness, ignoring the genome entirely.
/// Exists to exercise the selection/replacement/driver machinery without
/// a real objective function.
pub struct RandomEvaluator {
    pub range: std::ops::Range<f32>,
}

impl RandomEvaluator {
    pub fn new(range: std::ops::Range<f32>) -> Self {
        RandomEvaluator { range }
    }
}

impl Default for RandomEvaluator {
    fn default() -> Self {
        RandomEvaluator::new(0.0..1.0)
    }
}

impl Evaluator for RandomEvaluator {
    fn evaluate(&self, _genome: &Genome) -> Score {
        Score::from_vec(vec![random_provider::range(self.range.clone())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vita_gp::{Category, Symbol, Value};

    fn table() -> SymbolTable {
        let mut t = SymbolTable::new();
        t.insert(Symbol::terminal("x", Category(1), 1.0, |_| Value::Double(1.0)));
        t
    }

    #[test]
    fn caching_evaluator_returns_same_fitness_for_repeated_genome() {
        let calls = Mutex::new(0usize);
        let inner = move |_: &Genome| {
            *calls.lock().unwrap() += 1;
            Score::from_vec(vec![1.0])
        };
        let cached = CachingEvaluator::new(inner, 4);
        let g = Genome::random(&table(), 5, Category(1));

        let a = cached.evaluate(&g);
        let b = cached.evaluate(&g);
        assert_eq!(a, b);
    }

    #[test]
    fn ga_evaluator_sentinel_on_non_finite_objective() {
        let ga = GaEvaluator::new(|_: &Genome| f64::INFINITY, Optimize::Maximize);
        let g = Genome::random(&table(), 5, Category(1));
        let score = ga.evaluate(&g);
        assert_eq!(score.as_f32(), f32::MIN);
    }

    #[test]
    fn ga_evaluator_squashes_finite_objective_into_bounded_range() {
        let ga = GaEvaluator::new(|_: &Genome| 42.0, Optimize::Maximize);
        let g = Genome::random(&table(), 5, Category(1));
        let score = ga.evaluate(&g);
        assert!(score.as_f32() > -500.0 && score.as_f32() < 500.0);
    }

    #[test]
    fn penalty_evaluator_prepends_negative_penalty() {
        let mut t = table();
        t.insert(Symbol::terminal("bad", Category(1), 1.0, |_| Value::Void));
        let inner = |_: &Genome| Score::from_vec(vec![10.0]);
        let penalized = PenaltyEvaluator::new(inner, t.clone());
        let g = Genome::random(&t, 5, Category(1));
        let score = penalized.evaluate(&g);
        assert_eq!(score.values.len(), 2);
    }
}
