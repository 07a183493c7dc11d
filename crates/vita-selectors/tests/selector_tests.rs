use rstest::*;
use vita_core::{Objective, Optimize, Score, random_provider};
use vita_gp::{AgeCeiling, Category, Genome, Individual, Population, Symbol, SymbolTable, Value};
use vita_selectors::{AlpsTournamentSelector, MepTournamentSelector, ParetoSelector, RandomSelector};

fn table() -> SymbolTable {
    let mut t = SymbolTable::new();
    t.insert(Symbol::terminal("x", Category(1), 1.0, |_| Value::Double(1.0)));
    t
}

fn single_layer_population(fitnesses: &[f32]) -> Population {
    let t = table();
    let mut pop = Population::new(5, AgeCeiling::Polynomial);
    let individuals = fitnesses
        .iter()
        .map(|&f| {
            let mut ind = Individual::new(Genome::random(&t, 4, Category(1)));
            ind.fitness = Some(Score::from_vec(vec![f]));
            ind
        })
        .collect();
    pop.add_layer(individuals);
    pop
}

#[rstest]
#[case(Optimize::Minimize)]
#[case(Optimize::Maximize)]
fn tournament_selection_beats_random_on_average(#[case] optimize: Optimize) {
    random_provider::set_seed(7);
    let objective = Objective::Single(optimize.clone());
    let fitnesses: Vec<f32> = (0..80).map(|i| i as f32).collect();
    let pop = single_layer_population(&fitnesses);

    let tournament = MepTournamentSelector::new(5, 80);
    let random = RandomSelector::new(1, 80);

    let mut tournament_better = 0;
    let trials = 300;
    for _ in 0..trials {
        let drawn = tournament.run(&pop, &objective);
        let winner = pop.get(drawn[0]).fitness.as_ref().unwrap().as_f32();

        let random_pick = random.run(&pop);
        let random_fitness = pop.get(random_pick[0]).fitness.as_ref().unwrap().as_f32();

        let better = match optimize {
            Optimize::Maximize => winner >= random_fitness,
            Optimize::Minimize => winner <= random_fitness,
        };
        if better {
            tournament_better += 1;
        }
    }

    assert!(tournament_better as f32 / trials as f32 > 0.8);
}

#[test]
fn tournament_returns_contenders_sorted_descending() {
    let objective = Objective::Single(Optimize::Maximize);
    let pop = single_layer_population(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]);
    let selector = MepTournamentSelector::new(8, 8);
    let drawn = selector.run(&pop, &objective);

    let fitnesses: Vec<f32> =
        drawn.iter().map(|c| pop.get(*c).fitness.as_ref().unwrap().as_f32()).collect();
    for w in fitnesses.windows(2) {
        assert!(w[0] >= w[1]);
    }
}

#[test]
fn alps_tournament_returns_two_parents_ordered_by_key() {
    let objective = Objective::Single(Optimize::Maximize);
    let pop = single_layer_population(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let selector = AlpsTournamentSelector::new(6, 0.9);

    for _ in 0..50 {
        let parents = selector.run(&pop, &objective);
        assert_ne!(parents[0], parents[1]);
    }
}

#[test]
fn pareto_selection_returns_nondominated_pair_plus_victim() {
    let objective = Objective::Multi(vec![Optimize::Maximize, Optimize::Maximize]);
    let t = table();
    let mut pop = Population::new(5, AgeCeiling::Polynomial);
    let scores = [[1.0, 1.0], [2.0, 2.0], [0.5, 3.0], [3.0, 0.5], [0.1, 0.1]];
    let individuals = scores
        .iter()
        .map(|s| {
            let mut ind = Individual::new(Genome::random(&t, 4, Category(1)));
            ind.fitness = Some(Score::from_vec(s.to_vec()));
            ind
        })
        .collect();
    pop.add_layer(individuals);

    let selector = ParetoSelector::new(5);
    let drawn = selector.run(&pop, &objective);
    assert!(drawn.len() >= 2);
}

#[test]
fn random_selection_returns_requested_count() {
    let pop = single_layer_population(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let selector = RandomSelector::new(3, 2);
    let drawn = selector.run(&pop);
    assert_eq!(drawn.len(), 3);
}
