use vita_core::{Objective, pareto};
use vita_gp::{Coord, Population};

/// Pareto selection: draw `tournament_size` individuals from layer 0,
/// partition them into non-dominated ("front") and dominated sets by
/// pairwise dominance of their fitness vectors, then return two
/// uniformly-chosen front members plus one dominated member (if any) to
/// serve as the replacement victim.
#[derive(Clone, Copy)]
pub struct ParetoSelector {
    tournament_size: usize,
}

impl ParetoSelector {
    pub fn new(tournament_size: usize) -> Self {
        assert!(tournament_size > 0, "tournament_size must be positive");
        ParetoSelector { tournament_size }
    }

    pub fn run(&self, population: &Population, objective: &Objective) -> Vec<Coord> {
        let layer_len = population.individuals(0).len();
        let pool: Vec<usize> = (0..self.tournament_size)
            .map(|_| vita_core::random_provider::range(0..layer_len))
            .collect();

        let scores: Vec<Option<vita_core::Score>> =
            pool.iter().map(|&i| population.individuals(0)[i].fitness.clone()).collect();

        let scored_idx: Vec<usize> =
            (0..pool.len()).filter(|&i| scores[i].is_some()).collect();

        let front_of_scored = if scored_idx.is_empty() {
            Vec::new()
        } else {
            let scored_scores: Vec<vita_core::Score> =
                scored_idx.iter().map(|&i| scores[i].clone().unwrap()).collect();
            pareto::non_dominated(&scored_scores, objective)
                .into_iter()
                .map(|rel| scored_idx[rel])
                .collect()
        };

        let front: std::collections::HashSet<usize> = front_of_scored.into_iter().collect();
        let dominated: Vec<usize> =
            (0..pool.len()).filter(|i| !front.contains(i)).collect();

        let mut front_vec: Vec<usize> = front.into_iter().collect();
        if front_vec.is_empty() {
            front_vec = (0..pool.len()).collect();
        }

        let mut result = vec![
            Coord::new(0, pool[*vita_core::random_provider::choose(&front_vec)]),
            Coord::new(0, pool[*vita_core::random_provider::choose(&front_vec)]),
        ];

        if !dominated.is_empty() {
            let victim = *vita_core::random_provider::choose(&dominated);
            result.push(Coord::new(0, pool[victim]));
        }

        result
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

    fn seed(scores: &[[f32; 2]]) -> Population {
        let t = table();
        let mut pop = Population::new(5, AgeCeiling::Polynomial);
        let individuals = scores
            .iter()
            .map(|s| {
                let mut ind = Individual::new(Genome::random(&t, 3, vita_gp::Category(1)));
                ind.fitness = Some(Score::from_vec(s.to_vec()));
                ind
            })
            .collect();
        pop.add_layer(individuals);
        pop
    }

    #[test]
    fn returns_at_least_two_front_members() {
        let pop = seed(&[[1.0, 1.0], [2.0, 2.0], [0.5, 3.0], [3.0, 0.5]]);
        let objective = Objective::Multi(vec![Optimize::Maximize, Optimize::Maximize]);
        let selector = ParetoSelector::new(4);
        let drawn = selector.run(&pop, &objective);
        assert!(drawn.len() >= 2);
    }
}
