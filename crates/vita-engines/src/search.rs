use vita_core::{Objective, Score, Statistic, random_provider};
use vita_gp::Individual;

/// How a run's dataset relates to training vs. validation.
#[derive(Clone, Debug)]
pub enum Split {
    /// No split: the whole dataset is training data.
    AsIs,
    /// A random, run-stable partition into training (`1 - validation_percentage`)
    /// and validation (`validation_percentage`).
    Holdout { validation_percentage: f32 },
    /// Dynamic Subset Selection: each generation resamples a training
    /// subset biased toward old/difficult examples.
    Dss { k: f32, subset_size: usize },
}

/// Partitions `0..n` into `(training, validation)` index sets once, per
/// `validation_percentage`. Stable for the caller to reuse across every
/// generation of one run.
pub fn holdout_split(n: usize, validation_percentage: f32) -> (Vec<usize>, Vec<usize>) {
    let indices = random_provider::shuffled_indices(0..n);
    let val_count = ((n as f32) * validation_percentage).round() as usize;
    let split_at = n.saturating_sub(val_count);
    let mut indices = indices;
    let validation = indices.split_off(split_at);
    (indices, validation)
}

/// Per-example `(age, difficulty)` bookkeeping for Dynamic Subset
/// Selection. `difficulty` increments on a misclassification by the
/// running best; `age` increments every generation an example is *not*
/// resampled, and resets to 0 when it is.
pub struct DssSampler {
    age: Vec<u32>,
    difficulty: Vec<u32>,
    k: f32,
}

impl DssSampler {
    pub fn new(examples: usize, k: f32) -> Self {
        DssSampler { age: vec![0; examples], difficulty: vec![0; examples], k }
    }

    pub fn record_misclassification(&mut self, example: usize) {
        self.difficulty[example] += 1;
    }

    /// Draws `subset_size` example indices, weighted toward
    /// `age + k * difficulty` (plus 1, so a never-seen example still has
    /// a chance), without replacement. Resets the drawn examples' age to
    /// 0 and ages every other example by one.
    pub fn resample(&mut self, subset_size: usize) -> Vec<usize> {
        let n = self.age.len();
        let subset_size = subset_size.min(n);

        let mut remaining: Vec<usize> = (0..n).collect();
        let mut weights: Vec<f32> = remaining
            .iter()
            .map(|&i| self.age[i] as f32 + self.k * self.difficulty[i] as f32 + 1.0)
            .collect();

        let mut selected = Vec::with_capacity(subset_size);
        for _ in 0..subset_size {
            let total: f32 = weights.iter().sum();
            let mut pick = random_provider::range(0.0..total);
            let mut chosen = weights.len() - 1;
            for (i, &w) in weights.iter().enumerate() {
                pick -= w;
                if pick <= 0.0 {
                    chosen = i;
                    break;
                }
            }
            selected.push(remaining.remove(chosen));
            weights.remove(chosen);
        }

        let selected_set: std::collections::HashSet<usize> = selected.iter().copied().collect();
        for i in 0..n {
            if selected_set.contains(&i) {
                self.age[i] = 0;
            } else {
                self.age[i] += 1;
            }
        }

        selected
    }
}

/// Aggregates `runs` independent evolution-driver invocations: the
/// best-of-all individual, a distribution of each run's best fitness,
/// and (when `success_threshold` is set) how many runs met it. The
/// caller supplies `run_once`, which builds and runs a fresh driver
/// (wiring in whatever [`Split`] it needs) and returns its summary's
/// terminal state.
pub struct Search {
    runs: usize,
    success_threshold: Option<f32>,
}

pub struct SearchReport {
    pub best: Option<Individual>,
    pub best_distribution: Statistic,
    pub success_count: usize,
}

impl Search {
    pub fn new(runs: usize) -> Self {
        Search { runs, success_threshold: None }
    }

    pub fn success_threshold(mut self, threshold: f32) -> Self {
        self.success_threshold = Some(threshold);
        self
    }

    pub fn run(
        &self,
        objective: &Objective,
        mut run_once: impl FnMut(usize) -> Option<Individual>,
    ) -> SearchReport {
        let mut report =
            SearchReport { best: None, best_distribution: Statistic::default(), success_count: 0 };

        for run_index in 0..self.runs {
            let Some(candidate) = run_once(run_index) else { continue };
            let Some(fitness) = candidate.fitness.as_ref() else { continue };

            report.best_distribution.add(fitness.as_f32());

            let improved = match report.best.as_ref().and_then(|b| b.fitness.as_ref()) {
                Some(current) => objective.is_better(fitness, current),
                None => true,
            };
            if improved {
                report.best = Some(candidate.clone());
            }

            if let Some(threshold) = self.success_threshold {
                let target = Score::from_vec(vec![threshold]);
                if !objective.is_better(&target, fitness) {
                    report.success_count += 1;
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vita_core::Optimize;
    use vita_gp::{Category, Genome, Symbol, SymbolTable, Value};

    fn individual(fitness: f32) -> Individual {
        let mut t = SymbolTable::new();
        t.insert(Symbol::terminal("x", Category(1), 1.0, |_| Value::Double(1.0)));
        let mut ind = Individual::new(Genome::random(&t, 4, Category(1)));
        ind.fitness = Some(Score::from_vec(vec![fitness]));
        ind
    }

    #[test]
    fn holdout_split_respects_the_requested_percentage() {
        random_provider::set_seed(3);
        let (train, validation) = holdout_split(100, 0.2);
        assert_eq!(train.len() + validation.len(), 100);
        assert_eq!(validation.len(), 20);
    }

    #[test]
    fn dss_resample_resets_age_for_selected_and_ages_the_rest() {
        random_provider::set_seed(3);
        let mut sampler = DssSampler::new(10, 2.0);
        let selected = sampler.resample(4);
        assert_eq!(selected.len(), 4);
        for &i in &selected {
            assert_eq!(sampler.age[i], 0);
        }
    }

    #[test]
    fn search_tracks_best_across_runs_and_counts_successes() {
        let objective = Objective::Single(Optimize::Maximize);
        let results = [individual(1.0), individual(5.0), individual(3.0)];
        let mut i = 0;
        let search = Search::new(3).success_threshold(3.0);
        let report = search.run(&objective, |_| {
            let r = results[i].clone();
            i += 1;
            Some(r)
        });

        assert_eq!(report.best.unwrap().fitness.unwrap().as_f32(), 5.0);
        assert_eq!(report.success_count, 2);
        assert_eq!(report.best_distribution.count(), 3);
    }
}
