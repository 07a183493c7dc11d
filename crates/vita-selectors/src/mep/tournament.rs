use super::{pickup_any, pickup_near};
use vita_core::Objective;
use vita_gp::{Coord, Population};

/// Tournament selection: pick an anchor uniformly, draw `tournament_size`
/// contenders from the ring of radius `mate_zone` around it within the
/// same layer, return them ordered by fitness descending.
///
/// Unevaluated individuals (no recorded fitness yet) sort last.
#[derive(Clone, Copy)]
pub struct MepTournamentSelector {
    tournament_size: usize,
    mate_zone: usize,
}

impl MepTournamentSelector {
    pub fn new(tournament_size: usize, mate_zone: usize) -> Self {
        assert!(tournament_size > 0, "tournament_size must be positive");
        MepTournamentSelector { tournament_size, mate_zone }
    }

    /// Runs the tournament, returning the drawn coordinates sorted by
    /// fitness descending (ties broken by draw order). Insertion sort is
    /// used, matching the small-`tournament_size` shape this is tuned
    /// for (typically 3-8 contenders).
    pub fn run(&self, population: &Population, objective: &Objective) -> Vec<Coord> {
        let target = pickup_any(population);
        let mut ranked: Vec<Coord> = Vec::with_capacity(self.tournament_size);

        for _ in 0..self.tournament_size {
            let candidate = pickup_near(population, target, self.mate_zone);
            let candidate_fitness = population.get(candidate).fitness.clone();

            let mut j = ranked.len();
            while j > 0 {
                let better = match (&candidate_fitness, &population.get(ranked[j - 1]).fitness) {
                    (Some(a), Some(b)) => objective.is_better(a, b),
                    (Some(_), None) => true,
                    _ => false,
                };
                if !better {
                    break;
                }
                j -= 1;
            }
            ranked.insert(j, candidate);
        }

        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vita_core::{Optimize, Score};
    use vita_gp::{AgeCeiling, Genome, Individual, Symbol, SymbolTable, Value};

    fn table() -> SymbolTable {
        let mut t = SymbolTable::new();
        t.insert(Symbol::terminal("x", vita_gp::Category(1), 1.0, |_| Value::Double(1.0)));
        t
    }

    fn seed_population(fitnesses: &[f32]) -> Population {
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
    fn returns_tournament_size_contenders() {
        let pop = seed_population(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let selector = MepTournamentSelector::new(3, 2);
        let objective = Objective::Single(Optimize::Maximize);
        let drawn = selector.run(&pop, &objective);
        assert_eq!(drawn.len(), 3);
    }

    #[test]
    fn ranks_by_fitness_descending_under_maximize() {
        let pop = seed_population(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let selector = MepTournamentSelector::new(5, 5);
        let objective = Objective::Single(Optimize::Maximize);
        let drawn = selector.run(&pop, &objective);
        let fitnesses: Vec<f32> =
            drawn.iter().map(|c| pop.get(*c).fitness.as_ref().unwrap().as_f32()).collect();
        for w in fitnesses.windows(2) {
            assert!(w[0] >= w[1]);
        }
    }
}
