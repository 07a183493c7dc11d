use super::pickup_layer;
use vita_core::{Objective, Score};
use vita_gp::{Coord, Population};

/// ALPS tournament selection: returns exactly two parents, biased toward
/// younger, fitter individuals while still allowing cross-layer mating.
/// The first parent anchors a uniformly chosen layer `l`; each
/// subsequent contender is drawn, with probability `p_same_layer`, from
/// `l`, otherwise from `l - 1`.
///
/// Individuals are ranked by the lexicographic key `(not_aged, fitness)`
/// — a non-aged individual strictly beats an aged one regardless of
/// fitness. The returned pair always has parent 0's key >= parent 1's.
#[derive(Clone, Copy)]
pub struct AlpsTournamentSelector {
    tournament_size: usize,
    p_same_layer: f32,
}

impl AlpsTournamentSelector {
    pub fn new(tournament_size: usize, p_same_layer: f32) -> Self {
        assert!(tournament_size > 0, "tournament_size must be positive");
        AlpsTournamentSelector { tournament_size, p_same_layer }
    }

    pub fn run(&self, population: &Population, objective: &Objective) -> [Coord; 2] {
        let layer = vita_core::random_provider::range(0..population.num_layers());

        let mut c0 = pickup_layer(population, layer, self.p_same_layer);
        let mut c1 = pickup_layer(population, layer, self.p_same_layer);
        let mut key0 = self.key(population, c0);
        let mut key1 = self.key(population, c1);

        if Self::less(&key0, &key1, objective) {
            std::mem::swap(&mut c0, &mut c1);
            std::mem::swap(&mut key0, &mut key1);
        }

        for _ in 0..self.tournament_size {
            let candidate = pickup_layer(population, layer, self.p_same_layer);
            let candidate_key = self.key(population, candidate);

            if Self::less(&key0, &candidate_key, objective) {
                c1 = c0;
                key1 = key0;
                c0 = candidate;
                key0 = candidate_key;
            } else if Self::less(&key1, &candidate_key, objective) {
                c1 = candidate;
                key1 = candidate_key;
            }
        }

        [c0, c1]
    }

    fn key(&self, population: &Population, coord: Coord) -> (bool, Option<Score>) {
        let individual = population.get(coord);
        (!population.aged(coord), individual.fitness.clone())
    }

    /// `a < b` under the `(not_aged, fitness)` lexicographic ordering.
    /// A missing fitness sorts below any recorded one.
    fn less(a: &(bool, Option<Score>), b: &(bool, Option<Score>), objective: &Objective) -> bool {
        if a.0 != b.0 {
            return !a.0 && b.0;
        }
        match (&a.1, &b.1) {
            (Some(x), Some(y)) => objective.is_better(y, x),
            (None, Some(_)) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vita_core::Optimize;
    use vita_gp::{AgeCeiling, Genome, Individual, Symbol, SymbolTable, Value};

    fn table() -> SymbolTable {
        let mut t = SymbolTable::new();
        t.insert(Symbol::terminal("x", vita_gp::Category(1), 1.0, |_| Value::Double(1.0)));
        t
    }

    fn seed_single_layer(fitnesses: &[f32]) -> Population {
        let t = table();
        let mut pop = Population::new(5, AgeCeiling::Polynomial);
        let individuals = fitnesses
            .iter()
            .map(|&f| {
                let mut ind = Individual::new(Genome::random(&t, 3, vita_gp::Category(1)));
                ind.fitness = Some(Score::from_vec(vec![f]));
                ind
            })
            .collect();
        pop.add_layer(individuals);
        pop
    }

    #[test]
    fn returns_two_parents_with_key_ordering_maintained() {
        let pop = seed_single_layer(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let selector = AlpsTournamentSelector::new(4, 0.8);
        let objective = Objective::Single(Optimize::Maximize);
        let [c0, c1] = selector.run(&pop, &objective);

        let key0 = selector.key(&pop, c0);
        let key1 = selector.key(&pop, c1);
        assert!(!AlpsTournamentSelector::less(&key0, &key1, &objective));
    }
}
