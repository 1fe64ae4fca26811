use {
    slmax::{config::StrategyKind, *},
    std::path::Path,
};

macro_rules! solve {
    ($path: expr) => {
        solve!($path, StrategyKind::Auto)
    };
    ($path: expr, $strategy: expr) => {{
        let config = Config {
            quiet_mode: true,
            max_tries: 20,
            max_flips: 20_000,
            cutoff_time: 10.0,
            strategy: $strategy,
            ..Config::from($path)
        };
        let mut s = Solver::build(&config).expect("can't load");
        let cert = s.solve();
        (s, cert)
    }};
}

#[test]
fn sample_wcnf() {
    let (_, cert) = solve!("wcnfs/sample.wcnf");
    let Ok(Certificate::Feasible { cost, model }) = cert else {
        panic!("the optimum costs 2");
    };
    assert_eq!(cost, 2);
    // var 3 appears nowhere.
    assert_eq!(&model[..2], &[1, -2]);
}

#[test]
fn sample_in_2022_format() {
    let (s, cert) = solve!("wcnfs/sample2022.wcnf");
    assert_eq!(s.ins.num_hclauses, 1);
    assert_eq!(s.ins.num_sclauses, 2);
    assert_eq!(cert.ok().and_then(|c| c.cost()), Some(2));
}

#[test]
fn satisfiable_cnf_is_solved_to_zero_cost() {
    for strategy in [StrategyKind::Neighbor, StrategyKind::ScoreChange] {
        let (s, cert) = solve!("wcnfs/uf8.cnf", strategy);
        assert!(!s.ins.partial);
        let Ok(Certificate::Optimum { cost: 0, model }) = cert else {
            panic!("uf8 is satisfiable");
        };
        let assign = model.iter().map(|l| 0 < *l).collect::<Vec<_>>();
        let mut indexed = vec![false];
        indexed.extend(assign);
        assert_eq!(s.ins.evaluate(&indexed), Ok(0));
    }
}

#[test]
fn random_instance_under_both_strategies() {
    for strategy in [StrategyKind::Neighbor, StrategyKind::ScoreChange] {
        let (s, cert) = solve!("wcnfs/random40.wcnf", strategy);
        let cert = cert.expect("no error");
        let cost = cert.cost().expect("the hard part is satisfiable");
        assert!(cost <= s.ins.total_soft_weight);
        let mut assign = vec![false];
        assign.extend(cert.model().iter().map(|l| 0 < *l));
        assert_eq!(s.ins.evaluate(&assign), Ok(cost));
        // every reported cost is better than the previous one.
        let costs = s
            .state
            .improvements()
            .iter()
            .map(|(_, cost, _)| *cost)
            .collect::<Vec<_>>();
        assert!(costs.windows(2).all(|w| w[1] < w[0]));
        assert_eq!(costs.last(), Some(&cost));
    }
}

#[test]
fn infeasible_instance() {
    let (s, cert) = solve!("wcnfs/infeasible.wcnf");
    let Ok(Certificate::Unknown { hard_unsat, model }) = cert else {
        panic!("no assignment satisfies all hard clauses");
    };
    assert!(0 < hard_unsat);
    assert_eq!(model.len(), 2);
    assert!(s.state.improvements().is_empty());
    let mut out: Vec<u8> = Vec::new();
    s.simple_print(&mut out).expect("no io error");
    assert_eq!(String::from_utf8_lossy(&out), "-1\t-1\n");
}

#[test]
fn zero_cutoff_keeps_the_initial_assignment() {
    let config = Config {
        quiet_mode: true,
        cutoff_time: 0.0,
        ..Config::from("wcnfs/random40.wcnf")
    };
    let mut s = Solver::build(&config).expect("can't load");
    let _ = s.solve().expect("no error");
    assert_eq!(s.sls.step(), 0);
    assert_eq!(s.sls.tries(), 1);
}

#[test]
fn decimation_from_file() {
    let config = Config {
        quiet_mode: true,
        decimation: true,
        max_tries: 5,
        max_flips: 10_000,
        ..Config::from("wcnfs/random40.wcnf")
    };
    let mut s = Solver::build(&config).expect("can't load");
    let cert = s.solve().expect("no error");
    assert!(cert.cost().is_some());
}

#[test]
fn loading_errors() {
    assert!(matches!(
        Solver::try_from("wcnfs/broken-count.wcnf"),
        Err(SolverError::InconsistentClauseCount {
            declared: 4,
            read: 3
        })
    ));
    assert!(matches!(
        Instance::try_from(Path::new("wcnfs/nowhere.wcnf")),
        Err(SolverError::IOError(_))
    ));
}

#[test]
fn clause_producer() {
    struct Pigeons(usize);
    impl ClauseProducer for Pigeons {
        // n pigeons into n - 1 holes: every pigeon wants a hole (soft),
        // no two pigeons share a hole (hard).
        fn produce(&self, builder: &mut InstanceBuilder) -> Result<(), SolverError> {
            let n = self.0;
            let var = |p: usize, h: usize| (p * (n - 1) + h + 1) as i32;
            for p in 0..n {
                builder.add_soft_clause(1, (0..n - 1).map(|h| var(p, h)).collect::<Vec<_>>())?;
            }
            for h in 0..n - 1 {
                for p in 0..n {
                    for q in p + 1..n {
                        builder.add_hard_clause([-var(p, h), -var(q, h)])?;
                    }
                }
            }
            Ok(())
        }
    }
    let n = 4;
    let mut builder = InstanceBuilder::new(n * (n - 1));
    builder.add_from(&Pigeons(n)).expect("valid clauses");
    let ins = builder.build().expect("a valid instance");
    let config = Config {
        quiet_mode: true,
        max_tries: 10,
        max_flips: 5_000,
        ..Config::default()
    };
    let mut s = Solver::instantiate(&config, ins);
    // one pigeon must stay outside.
    assert_eq!(s.solve().ok().and_then(|c| c.cost()), Some(1));
}
