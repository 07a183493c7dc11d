use vita_core::Objective;
use vita_gp::{Coord, Individual, Population};

/// Steady-state tournament replacement: among `tournament`'s contenders,
/// find the worst (lowest fitness) and replace it with `offspring` if
/// `offspring` beats it. Never replaces the individual at
/// `protected_signature` (the run's current best-ever), regardless of
/// how the tournament comes out. Returns whether a replacement happened.
pub fn steady_state_replace(
    population: &mut Population,
    tournament: &[Coord],
    offspring: Individual,
    objective: &Objective,
    protected_signature: Option<u128>,
) -> bool {
    assert!(!tournament.is_empty(), "tournament must be non-empty");

    let mut worst = tournament[0];
    for &candidate in &tournament[1..] {
        let candidate_is_better = match (
            population.get(candidate).fitness.as_ref(),
            population.get(worst).fitness.as_ref(),
        ) {
            (Some(cf), Some(wf)) => objective.is_better(cf, wf),
            (None, _) => false,
            (Some(_), None) => true,
        };
        if !candidate_is_better {
            worst = candidate;
        }
    }

    if protected_signature == Some(population.get(worst).genome.signature()) {
        return false;
    }

    let offspring_wins = match population.get(worst).fitness.as_ref() {
        Some(wf) => {
            let of = offspring.fitness.as_ref().expect("offspring must be evaluated first");
            objective.is_better(of, wf)
        }
        None => true,
    };

    if offspring_wins {
        *population.get_mut(worst) = offspring;
        true
    } else {
        false
    }
}

/// ALPS replacement: before `offspring` takes `coord`'s slot, give the
/// current occupant a chance to escape into the layer above via
/// [`Population::try_move_up_layer`]. If it moves up, `offspring` fills
/// the vacated slot as part of that move; otherwise `offspring` simply
/// overwrites `coord` directly.
pub fn alps_replace(
    population: &mut Population,
    coord: Coord,
    offspring: Individual,
    objective: &Objective,
) {
    let moved = {
        let offspring = offspring.clone();
        population.try_move_up_layer(coord, objective, move || offspring)
    };
    if !moved {
        *population.get_mut(coord) = offspring;
    }
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

    fn scored(fitness: f32) -> Individual {
        let mut ind = Individual::new(Genome::random(&table(), 4, Category(1)));
        ind.fitness = Some(Score::from_vec(vec![fitness]));
        ind
    }

    #[test]
    fn steady_state_replaces_the_worst_tournament_loser() {
        let mut pop = Population::new(5, AgeCeiling::Polynomial);
        pop.add_layer(vec![scored(1.0), scored(5.0), scored(3.0)]);
        let objective = Objective::Single(Optimize::Maximize);
        let tournament = vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)];

        let replaced =
            steady_state_replace(&mut pop, &tournament, scored(2.0), &objective, None);

        assert!(replaced);
        assert_eq!(pop.get(Coord::new(0, 0)).fitness.as_ref().unwrap().as_f32(), 2.0);
    }

    #[test]
    fn steady_state_never_replaces_the_protected_best() {
        let mut pop = Population::new(5, AgeCeiling::Polynomial);
        pop.add_layer(vec![scored(1.0), scored(5.0)]);
        let objective = Objective::Single(Optimize::Maximize);
        let protected = pop.get(Coord::new(0, 0)).genome.signature();
        let tournament = vec![Coord::new(0, 0), Coord::new(0, 1)];

        let replaced = steady_state_replace(
            &mut pop,
            &tournament,
            scored(100.0),
            &objective,
            Some(protected),
        );

        assert!(!replaced);
    }

    #[test]
    fn alps_replace_overwrites_in_place_when_nothing_can_move_up() {
        let mut pop = Population::new(5, AgeCeiling::Polynomial);
        pop.add_layer(vec![scored(1.0)]);
        let objective = Objective::Single(Optimize::Maximize);

        alps_replace(&mut pop, Coord::new(0, 0), scored(9.0), &objective);

        assert_eq!(pop.get(Coord::new(0, 0)).fitness.as_ref().unwrap().as_f32(), 9.0);
    }
}
