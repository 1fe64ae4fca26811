use {
    slmax::{
        config::StrategyKind,
        search::{FlipIF, LocalSearch, SearchIF, SelectIF, ValidateIF, WEIGHT_FLOOR},
        types::Instantiate,
        Config, Instance,
    },
    std::path::Path,
};

fn load(strategy: StrategyKind) -> (Config, Instance) {
    let mut ins = Instance::try_from(Path::new("wcnfs/random40.wcnf")).expect("can't load");
    if strategy == StrategyKind::Neighbor {
        assert!(ins.build_neighbor_relation(usize::MAX));
    }
    let config = Config {
        strategy,
        seed: 7,
        // small thresholds to exercise smoothing and BMS sampling
        hd_count_threshold: 5,
        large_clause_count_threshold: 3,
        smooth_probability: 0.1,
        ..Config::default()
    };
    (config, ins)
}

/// drive the engine by hand and check every incremental quantity after each step.
fn walk(strategy: StrategyKind, steps: usize) {
    let (config, ins) = load(strategy);
    let mut sls = LocalSearch::instantiate(&config, &ins);
    sls.init(&ins, &[]);
    sls.check_consistency(&ins).expect("consistent after init");
    let cap = sls.params().softclause_weight_threshold;
    for step in 1..=steps {
        let Some(v) = sls.pick_var(&ins) else {
            break;
        };
        sls.check_consistency(&ins)
            .unwrap_or_else(|e| panic!("after weighting at step {step}: {e}"));
        sls.flip(&ins, v);
        sls.check_consistency(&ins)
            .unwrap_or_else(|e| panic!("after flipping {v} at step {step}: {e}"));
        for c in 0..ins.num_clauses {
            let w = sls.clause(c).weight();
            assert!(WEIGHT_FLOOR <= w);
            if !ins.is_hard(c) {
                assert!(w <= cap.max(WEIGHT_FLOOR));
            }
        }
    }
}

#[test]
fn consistency_under_neighbor_strategy() {
    walk(StrategyKind::Neighbor, 3_000);
}

#[test]
fn consistency_under_score_change_strategy() {
    walk(StrategyKind::ScoreChange, 3_000);
}

#[test]
fn goodvars_have_positive_scores_and_no_tabu() {
    for strategy in [StrategyKind::Neighbor, StrategyKind::ScoreChange] {
        let (config, ins) = load(strategy);
        let mut sls = LocalSearch::instantiate(&config, &ins);
        sls.init(&ins, &[]);
        for _ in 0..500 {
            let Some(v) = sls.pick_var(&ins) else {
                break;
            };
            sls.flip(&ins, v);
            assert!(sls.var(v).is_tabu());
            assert!(!sls.goodvars().contains(&v));
            for u in 1..=ins.num_vars {
                let var = sls.var(u);
                assert_eq!(
                    sls.goodvars().contains(&u),
                    0 < var.score() && !var.is_tabu(),
                    "var {u}"
                );
            }
        }
    }
}

#[test]
fn greedy_picks_never_undo_the_last_flip() {
    for strategy in [StrategyKind::Neighbor, StrategyKind::ScoreChange] {
        let (config, ins) = load(strategy);
        let mut sls = LocalSearch::instantiate(&config, &ins);
        sls.init(&ins, &[]);
        let mut last: Option<usize> = None;
        let mut greedy = 0;
        for _ in 0..20_000 {
            let from_goodvars = !sls.goodvars().is_empty();
            let Some(v) = sls.pick_var(&ins) else {
                break;
            };
            if from_goodvars {
                greedy += 1;
                assert_ne!(Some(v), last, "{strategy:?} flips {v} back");
            }
            sls.flip(&ins, v);
            last = Some(v);
        }
        assert!(0 < greedy);
    }
}

#[test]
fn verification_is_idempotent() {
    let (config, ins) = load(StrategyKind::Auto);
    let config = Config {
        quiet_mode: true,
        max_tries: 3,
        max_flips: 5_000,
        ..config
    };
    let mut sls = LocalSearch::instantiate(&config, &ins);
    let mut state = slmax::state::State::instantiate(&config, &ins);
    sls.local_search(&ins, &mut state, &[]).expect("no error");
    assert!(sls.best_soln_feasible());
    assert!(sls.verify_sol(&ins).is_ok());
    assert!(sls.verify_sol(&ins).is_ok());
    assert_eq!(ins.evaluate(sls.best_soln()), Ok(sls.opt_unsat_weight()));
}
