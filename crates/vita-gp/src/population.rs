use crate::genome::Genome;
use vita_core::{Objective, Score};

/// Addresses a single individual: which layer it lives in, and its
/// position within that layer's slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coord {
    pub layer: usize,
    pub index: usize,
}

impl Coord {
    pub fn new(layer: usize, index: usize) -> Self {
        Coord { layer, index }
    }
}

/// A genome paired with its last-evaluated fitness. `fitness` is `None`
/// until the evaluator has scored it at least once.
#[derive(Clone, Debug)]
pub struct Individual {
    pub genome: Genome,
    pub fitness: Option<Score>,
}

impl Individual {
    pub fn new(genome: Genome) -> Self {
        Individual { genome, fitness: None }
    }

    pub fn age(&self) -> usize {
        self.genome.age()
    }
}

/// The age-ceiling scheme governing how long an individual may remain in
/// a given ALPS layer before it must either improve enough to move up or
/// be replaced. Polynomial is the scheme the original implementation
/// ships with; the others are equally valid "selectable" schemes spec §4.7
/// calls out explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgeCeiling {
    Polynomial,
    Linear,
    Exponential,
    Fibonacci,
}

impl AgeCeiling {
    /// `age_gap` is the configuration unit all schemes scale from. The
    /// last layer never ages out, regardless of scheme — callers pass
    /// `is_last` for that one case.
    pub fn max_age(&self, layer: usize, age_gap: usize, is_last: bool) -> usize {
        if is_last {
            return usize::MAX;
        }
        match self {
            AgeCeiling::Polynomial => match layer {
                0 => age_gap,
                1 => 2 * age_gap,
                l => l * l * age_gap,
            },
            AgeCeiling::Linear => (layer + 1) * age_gap,
            AgeCeiling::Exponential => age_gap * (1usize << layer),
            AgeCeiling::Fibonacci => Self::fibonacci(layer + 2) * age_gap,
        }
    }

    fn fibonacci(n: usize) -> usize {
        let (mut a, mut b) = (1usize, 1usize);
        for _ in 0..n {
            let next = a + b;
            a = b;
            b = next;
        }
        a
    }
}

/// An ordered sequence of layers, each a contiguous slice of individuals
/// with a shared age ceiling. Layer 0 holds the youngest individuals;
/// each successive layer's ceiling is looser, and the last layer never
/// ages anyone out — matching spec §4.7's ALPS structure.
pub struct Population {
    layers: Vec<Vec<Individual>>,
    age_gap: usize,
    age_ceiling: AgeCeiling,
}

impl Population {
    pub fn new(age_gap: usize, age_ceiling: AgeCeiling) -> Self {
        Population { layers: Vec::new(), age_gap, age_ceiling }
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn individuals(&self, layer: usize) -> &[Individual] {
        &self.layers[layer]
    }

    pub fn individuals_mut(&mut self, layer: usize) -> &mut Vec<Individual> {
        &mut self.layers[layer]
    }

    pub fn get(&self, coord: Coord) -> &Individual {
        &self.layers[coord.layer][coord.index]
    }

    pub fn get_mut(&mut self, coord: Coord) -> &mut Individual {
        &mut self.layers[coord.layer][coord.index]
    }

    pub fn len(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a brand-new, empty-aging layer seeded with `individuals`.
    pub fn add_layer(&mut self, individuals: Vec<Individual>) {
        self.layers.push(individuals);
    }

    /// Replaces layer 0's contents wholesale with fresh individuals —
    /// the "reinit layer 0" half of the post-generation bookkeeping
    /// cadence, used instead of `add_layer` once `max_layers` is reached.
    pub fn init_layer(&mut self, layer: usize, individuals: Vec<Individual>) {
        self.layers[layer] = individuals;
    }

    /// The age ceiling for `layer`: `usize::MAX` if it is the last layer,
    /// otherwise `age_ceiling.max_age(layer, age_gap, false)`.
    pub fn max_age(&self, layer: usize) -> usize {
        let is_last = layer + 1 == self.layers.len();
        self.age_ceiling.max_age(layer, self.age_gap, is_last)
    }

    pub fn aged(&self, coord: Coord) -> bool {
        self.get(coord).age() > self.max_age(coord.layer)
    }

    /// Ages every resident individual by one generation.
    pub fn inc_age(&mut self) {
        for layer in &mut self.layers {
            for individual in layer {
                individual.genome.inc_age();
            }
        }
    }

    /// If `coord`'s individual has aged past its layer's ceiling *and*
    /// its fitness beats the target layer's representative (its best
    /// member, under `objective`), moves it up into layer `coord.layer +
    /// 1` in place of that representative's worst member, vacating
    /// `coord`'s old slot with a freshly re-encoded individual supplied
    /// by `replacement`. Returns whether a move happened.
    pub fn try_move_up_layer(
        &mut self,
        coord: Coord,
        objective: &Objective,
        replacement: impl FnOnce() -> Individual,
    ) -> bool {
        if coord.layer + 1 >= self.layers.len() || !self.aged(coord) {
            return false;
        }

        let Some(fitness) = self.get(coord).fitness.clone() else {
            return false;
        };

        let worst_above = self.layers[coord.layer + 1]
            .iter()
            .enumerate()
            .filter_map(|(i, ind)| ind.fitness.clone().map(|f| (i, f)))
            .min_by(|(_, a), (_, b)| objective.cmp(a, b))
            .map(|(i, _)| i);

        let Some(worst_above) = worst_above else {
            return false;
        };

        let beats_worst_above = {
            let worst_fitness = self.layers[coord.layer + 1][worst_above].fitness.clone().unwrap();
            objective.is_better(&fitness, &worst_fitness)
        };

        if !beats_worst_above {
            return false;
        }

        let moved = self.layers[coord.layer][coord.index].clone_into_individual();
        self.layers[coord.layer + 1][worst_above] = moved;
        self.layers[coord.layer][coord.index] = replacement();
        true
    }
}

impl Individual {
    fn clone_into_individual(&self) -> Individual {
        Individual { genome: self.genome.clone(), fitness: self.fitness.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polynomial_age_ceiling_matches_spec_constants() {
        let gap = 5;
        assert_eq!(AgeCeiling::Polynomial.max_age(0, gap, false), 5);
        assert_eq!(AgeCeiling::Polynomial.max_age(1, gap, false), 10);
        assert_eq!(AgeCeiling::Polynomial.max_age(2, gap, false), 20);
        assert_eq!(AgeCeiling::Polynomial.max_age(3, gap, false), 45);
    }

    #[test]
    fn last_layer_never_ages_out() {
        assert_eq!(AgeCeiling::Polynomial.max_age(2, 5, true), usize::MAX);
    }

    #[test]
    fn inc_age_advances_every_individual() {
        let mut pop = Population::new(5, AgeCeiling::Polynomial);
        let table = crate::symbol::SymbolTable::new();
        let _ = table;
        pop.add_layer(vec![]);
        pop.inc_age();
        assert_eq!(pop.num_layers(), 1);
    }
}
