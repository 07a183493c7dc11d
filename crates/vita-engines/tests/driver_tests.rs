use vita_core::{Objective, Optimize, Score};
use vita_engines::{EvolutionConfig, EvolutionDriver, Limit, Search, Strategy};
use vita_gp::{Category, Symbol, SymbolTable, Value};
use vita_selectors::{AlpsTournamentSelector, MepTournamentSelector};

const NUMERIC: Category = Category(1);

fn regression_table() -> SymbolTable {
    let mut table = SymbolTable::new();
    table.insert(Symbol::terminal("one", NUMERIC, 1.0, |_| Value::Double(1.0)));
    table.insert(Symbol::function("add", NUMERIC, [NUMERIC, NUMERIC], 1.0, |args| {
        Value::from_finite(args[0].as_double().unwrap_or(0.0) + args[1].as_double().unwrap_or(0.0))
    }));
    table
}

/// Closeness to a constant target, via an in-tree interpreter pass per genome.
fn target_fitness_evaluator(table: SymbolTable, target: f64) -> impl Fn(&vita_gp::Genome) -> Score {
    move |genome| {
        let mut interpreter = vita_gp::Interpreter::new();
        let value = interpreter.eval(&table, genome).as_double().unwrap_or(f64::MIN);
        Score::from_vec(vec![-(value - target).abs() as f32])
    }
}

#[test]
fn steady_state_driver_improves_fitness_over_generations() {
    vita_core::random_provider::set_seed(7);

    let table = regression_table();
    let evaluator = target_fitness_evaluator(table.clone(), 8.0);
    let objective = Objective::Single(Optimize::Maximize);
    let config = EvolutionConfig::builder().individuals(40).max_layers(1).code_length(12).build().unwrap();
    let strategy = Strategy::Steady(MepTournamentSelector::new(5, 10));

    let mut driver = EvolutionDriver::new(config, table, NUMERIC, objective.clone(), &evaluator, strategy);
    let initial_best =
        driver.population().individuals(0).iter().filter_map(|i| i.fitness.as_ref()).fold(f32::MIN, |acc, f| {
            acc.max(f.as_f32())
        });

    let summary = driver.run(&[Limit::Generation(25)], |_| false, || {});
    let final_best = summary.best.as_ref().and_then(|b| b.fitness.as_ref()).map(Score::as_f32).unwrap();

    assert!(final_best >= initial_best, "expected evolution not to regress: {final_best} < {initial_best}");
    assert_eq!(summary.generation, 25);
}

#[test]
fn alps_strategy_runs_to_completion_and_preserves_layer_count() {
    vita_core::random_provider::set_seed(11);

    let table = regression_table();
    let evaluator = target_fitness_evaluator(table.clone(), 3.0);
    let objective = Objective::Single(Optimize::Maximize);
    let config = EvolutionConfig::builder().individuals(30).max_layers(3).code_length(8).age_gap(2).build().unwrap();
    let strategy = Strategy::Alps(AlpsTournamentSelector::new(5, 0.75));

    let mut driver = EvolutionDriver::new(config, table, NUMERIC, objective, &evaluator, strategy);
    let summary = driver.run(&[Limit::Generation(12)], |_| false, || {});

    assert_eq!(summary.generation, 12);
    assert!(driver.population().num_layers() <= 3);
    assert!(summary.best.is_some());
}

#[test]
fn search_aggregates_the_best_individual_across_runs() {
    vita_core::random_provider::set_seed(13);

    let objective = Objective::Single(Optimize::Maximize);
    let search = Search::new(3).success_threshold(-0.5);

    let report = search.run(&objective, |run_index| {
        let table = regression_table();
        let evaluator = target_fitness_evaluator(table.clone(), 4.0);
        let config =
            EvolutionConfig::builder().individuals(20).max_layers(1).code_length(8).build().unwrap();
        let strategy = Strategy::Steady(MepTournamentSelector::new(3, 5));

        let mut driver =
            EvolutionDriver::new(config, table, NUMERIC, objective.clone(), &evaluator, strategy);
        let summary = driver.run(&[Limit::Generation(15)], |_| false, || {});
        assert_eq!(summary.generation, 15, "run {run_index} should finish its generation budget");
        summary.best.clone()
    });

    assert!(report.best.is_some());
    assert_eq!(report.best_distribution.count(), 3);
}
