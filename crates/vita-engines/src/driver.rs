use tracing::info;

use vita_alters::{MepRecombination, RecombinationParams};
use vita_core::{Objective, Score};
use vita_gp::{AgeCeiling, Category, Coord, Genome, Individual, Population, SymbolTable};
use vita_selectors::{AlpsTournamentSelector, MepTournamentSelector, ParetoSelector, RandomSelector};

use crate::bookkeeping::post_generation_bookkeeping;
use crate::config::EvolutionConfig;
use crate::control::EngineControl;
use crate::evaluator::Evaluator;
use crate::limit::Limit;
use crate::replacement::{alps_replace, steady_state_replace};
use crate::summary::Summary;

/// Which selection/replacement regime governs a generation. `Steady`,
/// `Pareto` and `Random` all pair their selector's draw with steady-state
/// tournament replacement on a single layer; `Alps` pairs the age-layered
/// tournament with [`alps_replace`] across every layer.
#[derive(Clone, Copy)]
pub enum Strategy {
    Steady(MepTournamentSelector),
    Alps(AlpsTournamentSelector),
    Pareto(ParetoSelector),
    Random(RandomSelector),
}

fn fresh_individuals(
    table: &SymbolTable,
    root_category: Category,
    code_length: usize,
    n: usize,
) -> Vec<Individual> {
    (0..n).map(|_| Individual::new(Genome::random(table, code_length, root_category))).collect()
}

/// The MEP evolution driver: owns the layered population and runs the
/// generational loop of selection, recombination, evaluation, and
/// replacement, interleaved with the ALPS bookkeeping cadence and a
/// periodic "shake" that lets a caller refresh a dynamic dataset subset
/// and re-validates the recorded best against it.
pub struct EvolutionDriver<'a, E: Evaluator> {
    population: Population,
    evaluator: &'a E,
    table: SymbolTable,
    root_category: Category,
    objective: Objective,
    config: EvolutionConfig,
    recombination_params: RecombinationParams,
    strategy: Strategy,
    control: EngineControl,
    summary: Summary,
}

impl<'a, E: Evaluator> EvolutionDriver<'a, E> {
    pub fn new(
        config: EvolutionConfig,
        table: SymbolTable,
        root_category: Category,
        objective: Objective,
        evaluator: &'a E,
        strategy: Strategy,
    ) -> Self {
        let age_gap = config.effective_age_gap();
        let mut population = Population::new(age_gap, AgeCeiling::Polynomial);
        let per_layer = (config.individuals / config.max_layers).max(1);
        for _ in 0..config.max_layers {
            population.add_layer(fresh_individuals(&table, root_category, config.code_length, per_layer));
        }

        let recombination_params = RecombinationParams {
            p_cross: config.p_cross,
            p_mutation: config.p_mutation,
            patch_fraction: vita_gp::DEFAULT_PATCH_FRACTION,
            brood_size: config.brood_size,
        };

        EvolutionDriver {
            population,
            evaluator,
            table,
            root_category,
            objective,
            config,
            recombination_params,
            strategy,
            control: EngineControl::new(),
            summary: Summary::new(),
        }
    }

    pub fn control(&self) -> EngineControl {
        self.control.clone()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    fn evaluate_all(&mut self) {
        for layer in 0..self.population.num_layers() {
            for individual in self.population.individuals_mut(layer) {
                if individual.fitness.is_none() {
                    individual.fitness = Some(self.evaluator.evaluate(&individual.genome));
                }
            }
        }
    }

    fn seed_best(&mut self) {
        let snapshot: Vec<Individual> = (0..self.population.num_layers())
            .flat_map(|l| self.population.individuals(l).to_vec())
            .collect();
        for individual in &snapshot {
            self.summary.consider_best(individual, &self.objective);
        }
    }

    fn make_offspring(&mut self, parent_a: &Genome, parent_b: &Genome) -> Individual {
        let evaluator = self.evaluator;
        let mut fast = |g: &Genome| evaluator.fast_evaluate(g);
        let genome = MepRecombination::recombine_with_brood(
            &self.table,
            self.root_category,
            parent_a,
            parent_b,
            &self.recombination_params,
            Some(&mut fast),
        );
        self.summary.record_crossover();
        self.summary.record_mutation();

        let fitness = self.evaluator.evaluate(&genome);
        let mut offspring = Individual::new(genome);
        offspring.fitness = Some(fitness);
        offspring
    }

    /// Runs one generation's worth of selection -> recombination ->
    /// replacement, one slot at a time, per [`Strategy`].
    fn step_generation(&mut self) {
        let strategy = self.strategy;
        match &strategy {
            Strategy::Alps(selector) => {
                for layer in 0..self.population.num_layers() {
                    let slots = self.population.individuals(layer).len();
                    for idx in 0..slots {
                        let [c0, c1] = selector.run(&self.population, &self.objective);
                        let parent_a = self.population.get(c0).genome.clone();
                        let parent_b = self.population.get(c1).genome.clone();
                        let offspring = self.make_offspring(&parent_a, &parent_b);

                        let improved = self.summary.consider_best(&offspring, &self.objective);
                        alps_replace(&mut self.population, Coord::new(layer, idx), offspring, &self.objective);
                        if improved {
                            info!(generation = self.summary.generation, "new best via ALPS replacement");
                        }
                    }
                }
            }
            Strategy::Steady(_) | Strategy::Pareto(_) | Strategy::Random(_) => {
                let slots = self.population.individuals(0).len();
                for _ in 0..slots {
                    let drawn = self.draw_tournament();
                    let parent_a = self.population.get(drawn[0]).genome.clone();
                    let parent_b = self.population.get(drawn[drawn.len().min(2) - 1]).genome.clone();
                    let offspring = self.make_offspring(&parent_a, &parent_b);

                    let protected = self.summary.best.as_ref().map(|b| b.genome.signature());
                    let replaced = steady_state_replace(
                        &mut self.population,
                        &drawn,
                        offspring.clone(),
                        &self.objective,
                        protected,
                    );
                    if replaced {
                        let improved = self.summary.consider_best(&offspring, &self.objective);
                        if improved {
                            info!(generation = self.summary.generation, "new best via steady-state replacement");
                        }
                    }
                }
            }
        }
    }

    fn draw_tournament(&self) -> Vec<Coord> {
        match &self.strategy {
            Strategy::Steady(selector) => selector.run(&self.population, &self.objective),
            Strategy::Pareto(selector) => selector.run(&self.population, &self.objective),
            Strategy::Random(selector) => selector.run(&self.population),
            Strategy::Alps(_) => unreachable!("ALPS strategy uses its own per-layer loop"),
        }
    }

    fn snapshot_fitness(&mut self) {
        let fitnesses: Vec<f32> = (0..self.population.num_layers())
            .flat_map(|l| {
                self.population.individuals(l).iter().filter_map(|i| i.fitness.as_ref().map(Score::as_f32))
            })
            .collect();
        self.summary.snapshot_distribution(fitnesses.into_iter());
    }

    fn bookkeep(&mut self) {
        let age_gap = self.config.effective_age_gap();
        let max_layers = self.config.max_layers;
        let n = self.population.individuals(0).len();
        let table = self.table.clone();
        let root_category = self.root_category;
        let code_length = self.config.code_length;
        let objective = self.objective.clone();
        let generation = self.summary.generation;

        post_generation_bookkeeping(&mut self.population, &objective, generation, age_gap, max_layers, move || {
            fresh_individuals(&table, root_category, code_length, n)
        });
    }

    /// Runs generations until any of `limits`, `should_stop`, or an
    /// external [`EngineControl::stop`] fires. Every 4th generation calls
    /// `shake` (meant to refresh a dynamic dataset subset) and re-scores
    /// the recorded best against the (possibly now different) evaluator
    /// before continuing.
    pub fn run(
        &mut self,
        limits: &[Limit],
        mut should_stop: impl FnMut(&Summary) -> bool,
        mut shake: impl FnMut(),
    ) -> &Summary {
        self.summary.reset();
        self.evaluate_all();
        self.seed_best();

        loop {
            self.control.wait_before_step();
            if self.control.is_stopped() {
                break;
            }
            if limits.iter().any(|l| l.reached(&self.summary, &self.objective)) {
                break;
            }
            if should_stop(&self.summary) {
                break;
            }

            if self.summary.generation > 0 && self.summary.generation % 4 == 0 {
                shake();
                if let Some(best) = self.summary.best.clone() {
                    let refreshed = self.evaluator.evaluate(&best.genome);
                    self.summary.best = Some(Individual { genome: best.genome, fitness: Some(refreshed) });
                }
            }

            self.snapshot_fitness();
            self.summary.tick();
            info!(
                generation = self.summary.generation,
                best = ?self.summary.best.as_ref().and_then(|b| b.fitness.as_ref()).map(Score::as_f32),
                mean = self.summary.fitness_distribution.mean(),
                "generation snapshot"
            );

            self.step_generation();
            self.bookkeep();

            self.summary.generation += 1;
        }

        &self.summary
    }
}
