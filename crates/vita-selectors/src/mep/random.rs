use super::{pickup_any, pickup_near};
use vita_gp::{Coord, Population};

/// Random selection: `tournament_size` uniformly random individuals. The
/// first is the anchor; the rest are drawn from the ring of radius
/// `mate_zone` around it.
#[derive(Clone, Copy)]
pub struct RandomSelector {
    tournament_size: usize,
    mate_zone: usize,
}

impl RandomSelector {
    pub fn new(tournament_size: usize, mate_zone: usize) -> Self {
        assert!(tournament_size > 0, "tournament_size must be positive");
        RandomSelector { tournament_size, mate_zone }
    }

    pub fn run(&self, population: &Population) -> Vec<Coord> {
        let anchor = pickup_any(population);
        let mut result = Vec::with_capacity(self.tournament_size);
        result.push(anchor);
        for _ in 1..self.tournament_size {
            result.push(pickup_near(population, anchor, self.mate_zone));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vita_gp::{AgeCeiling, Genome, Individual, Symbol, SymbolTable, Value};

    #[test]
    fn returns_tournament_size_individuals() {
        let mut t = SymbolTable::new();
        t.insert(Symbol::terminal("x", vita_gp::Category(1), 1.0, |_| Value::Double(1.0)));
        let mut pop = Population::new(5, AgeCeiling::Polynomial);
        pop.add_layer(
            (0..10).map(|_| Individual::new(Genome::random(&t, 3, vita_gp::Category(1)))).collect(),
        );

        let selector = RandomSelector::new(4, 2);
        let drawn = selector.run(&pop);
        assert_eq!(drawn.len(), 4);
    }
}
