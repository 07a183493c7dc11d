use vita_core::Objective;
use vita_gp::{Coord, Individual, Population};

/// ALPS post-generation bookkeeping: ages the whole population by one
/// generation, then every `age_gap` generations either grows the
/// population by one layer (while under `max_layers`) or gives layer 0's
/// residents a last chance to escape upward before wiping the layer with
/// fresh random genomes. `age_gap == 0` disables the layer cadence
/// entirely (steady-state-only runs never call `add_layer`/reinit).
pub fn post_generation_bookkeeping(
    population: &mut Population,
    objective: &Objective,
    generation: usize,
    age_gap: usize,
    max_layers: usize,
    fresh_layer: impl FnOnce() -> Vec<Individual>,
) {
    population.inc_age();

    if age_gap == 0 || generation % age_gap != 0 {
        return;
    }

    if population.num_layers() < max_layers {
        population.add_layer(fresh_layer());
        return;
    }

    let fresh = fresh_layer();
    let len = population.individuals(0).len().min(fresh.len());
    for (i, replacement) in fresh.iter().take(len).cloned().enumerate() {
        population.try_move_up_layer(Coord::new(0, i), objective, || replacement);
    }
    population.init_layer(0, fresh);
}

#[cfg(test)]
mod tests {
    use super::*;
    use vita_core::{Optimize, Score};
    use vita_gp::{AgeCeiling, Category, Genome, Symbol, SymbolTable, Value};

    fn table() -> SymbolTable {
        let mut t = SymbolTable::new();
        t.insert(Symbol::terminal("x", Category(1), 1.0, |_| Value::Double(1.0)));
        t
    }

    fn fresh(n: usize) -> Vec<Individual> {
        (0..n).map(|_| Individual::new(Genome::random(&table(), 4, Category(1)))).collect()
    }

    fn scored(fitness: f32) -> Individual {
        let mut ind = Individual::new(Genome::random(&table(), 4, Category(1)));
        ind.fitness = Some(Score::from_vec(vec![fitness]));
        ind
    }

    #[test]
    fn adds_a_layer_when_under_max_layers_on_cadence() {
        let mut pop = Population::new(2, AgeCeiling::Polynomial);
        pop.add_layer(vec![scored(1.0)]);
        let objective = Objective::Single(Optimize::Maximize);

        post_generation_bookkeeping(&mut pop, &objective, 2, 2, 3, || fresh(1));

        assert_eq!(pop.num_layers(), 2);
    }

    #[test]
    fn reinits_layer_zero_once_max_layers_reached() {
        let mut pop = Population::new(2, AgeCeiling::Polynomial);
        pop.add_layer(vec![scored(1.0)]);
        pop.add_layer(vec![scored(9.0)]);
        let objective = Objective::Single(Optimize::Maximize);

        post_generation_bookkeeping(&mut pop, &objective, 2, 2, 2, || fresh(1));

        assert_eq!(pop.num_layers(), 2);
    }

    #[test]
    fn off_cadence_generation_only_ages_the_population() {
        let mut pop = Population::new(2, AgeCeiling::Polynomial);
        pop.add_layer(vec![scored(1.0)]);
        let objective = Objective::Single(Optimize::Maximize);

        post_generation_bookkeeping(&mut pop, &objective, 1, 2, 3, || fresh(1));

        assert_eq!(pop.num_layers(), 1);
        assert_eq!(pop.get(Coord::new(0, 0)).age(), 1);
    }
}
