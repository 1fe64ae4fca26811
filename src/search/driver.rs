use {
    super::{weight::WEIGHT_FLOOR, FlipIF, LocalSearch, SelectIF, Stat},
    crate::{instance::Instance, state::State, types::*},
    rand::Rng,
    tracing::{debug, info},
};

/// the interval of progress reports in flips
const PROGRESS_INTERVAL: usize = 1000;

/// API for the search loop.
pub trait SearchIF {
    /// assign every var from `init_solution` or at random, then rebuild all
    /// sat counts, critical vars, scores, stacks and weights from scratch.
    /// `init_solution` is indexed by `VarId`; a missing or `None` entry is random.
    fn init(&mut self, ins: &Instance, init_solution: &[Option<bool>]);
    /// run tries until an assignment costing nothing is found or a limit is reached.
    /// The first try starts from `init_solution`; later ones from random assignments.
    ///
    /// # Errors
    ///
    /// * `SolverError::InvalidAssignment` if `init_solution` isn't empty and
    ///   its length isn't `num_vars + 1`.
    fn local_search(
        &mut self,
        ins: &Instance,
        state: &mut State,
        init_solution: &[Option<bool>],
    ) -> MaybeInconsistent;
    /// the same as `local_search` but each try starts from an assignment built by decimation.
    fn local_search_with_decimation(&mut self, ins: &Instance, state: &mut State)
        -> MaybeInconsistent;
}

impl SearchIF for LocalSearch {
    fn init(&mut self, ins: &Instance, init_solution: &[Option<bool>]) {
        self.strategy.reset(&mut self.var);
        for c in self.large_weight_clauses.drain(..) {
            self.clause[c].turn_off(FlagClause::LARGE_WEIGHT);
        }
        for c in self.soft_large_weight_clauses.drain(..) {
            self.clause[c].turn_off(FlagClause::SOFT_LARGE_WEIGHT);
        }
        for v in 1..=ins.num_vars {
            let value = match init_solution.get(v) {
                Some(Some(b)) => *b,
                _ => self.rng.gen::<bool>(),
            };
            let var = &mut self.var[v];
            var.value = value;
            var.score = 0;
            var.time_stamp = 0;
        }
        self.book.clear();
        for (c, lits) in ins.clause_lit.iter().enumerate() {
            let ch = &mut self.clause[c];
            ch.weight = WEIGHT_FLOOR;
            ch.sat_count = 0;
            ch.sat_var = 0;
            for l in lits.iter() {
                if l.is_satisfied_by(self.var[l.var].value) {
                    ch.sat_count += 1;
                    ch.sat_var = l.var;
                }
            }
            match ch.sat_count {
                0 => {
                    for l in lits.iter() {
                        self.var[l.var].score += WEIGHT_FLOOR;
                    }
                    self.book.unsat(ins, c);
                }
                1 => self.var[ch.sat_var].score -= WEIGHT_FLOOR,
                _ => (),
            }
        }
        self.goodvar_stack.clear();
        for v in 1..=ins.num_vars {
            if self.var[v].is_good() {
                self.goodvar_stack.push(v);
            }
        }
        self.step = 0;
        self.local_soln_feasible = false;
        self.local_opt_hard_unsat = usize::MAX;
        self.local_opt_unsat_weight = Weight::MAX;
    }
    fn local_search(
        &mut self,
        ins: &Instance,
        state: &mut State,
        init_solution: &[Option<bool>],
    ) -> MaybeInconsistent {
        if !init_solution.is_empty() && init_solution.len() != ins.num_vars + 1 {
            return Err(SolverError::InvalidAssignment(format!(
                "expected {} entries indexed by var, found {}",
                ins.num_vars + 1,
                init_solution.len()
            )));
        }
        self.clock.start();
        info!("start local search with the {} strategy", self.strategy);
        for t in 1..=self.params.max_tries.max(1) {
            if t == 1 {
                self.init(ins, init_solution);
            } else {
                self.init(ins, &[]);
            }
            if self.run_try(ins, state, t) {
                break;
            }
        }
        Ok(())
    }
    fn local_search_with_decimation(
        &mut self,
        ins: &Instance,
        state: &mut State,
    ) -> MaybeInconsistent {
        self.clock.start();
        info!(
            "start local search with decimation and the {} strategy",
            self.strategy
        );
        for t in 1..=self.params.max_tries.max(1) {
            let guide = if self.best_soln_feasible {
                Some((self.best_soln.as_slice(), self.local_opt_soln.as_slice()))
            } else {
                None
            };
            let assign = self
                .decimation
                .make_assignment(ins, &mut self.rng, guide, self.params.hd_count_threshold)
                .to_vec();
            self.stats[Stat::Decimation as usize] += 1;
            self.init(ins, &assign);
            if self.run_try(ins, state, t) {
                break;
            }
        }
        Ok(())
    }
}

impl LocalSearch {
    /// run a try and return `true` if the whole search should stop.
    fn run_try(&mut self, ins: &Instance, state: &mut State, t: usize) -> bool {
        self.tries = t;
        self.stats[Stat::Try as usize] += 1;
        debug!("try {t}: {}", self.book);
        let mut last_improve_step = 0;
        loop {
            if self.update_local_opt() {
                last_improve_step = self.step;
            }
            if self.update_best() {
                state.report_best(self);
            }
            if self.best_soln_feasible && self.opt_unsat_weight == 0 {
                info!("found an assignment costing nothing at try {t}");
                return true;
            }
            if self.clock.is_over(self.params.cutoff_time) {
                debug!("time out at try {t}, step {}", self.step);
                state.progress(self);
                return true;
            }
            if self.step % PROGRESS_INTERVAL == 0 {
                state.progress(self);
            }
            if self.params.max_flips <= self.step
                || self.params.max_non_improve_flip < self.step - last_improve_step
            {
                state.progress(self);
                return false;
            }
            let Some(v) = self.pick_var(ins) else {
                return true;
            };
            self.flip(ins, v);
            self.step += 1;
            self.var[v].time_stamp = self.step;
        }
    }
    /// record the current assignment if it's the best in this try.
    /// Fewer falsified hard clauses come first, then less soft cost.
    fn update_local_opt(&mut self) -> bool {
        let hard = self.book.hard_unsat_nb();
        let soft = self.book.soft_unsat_weight();
        if (self.local_opt_hard_unsat, self.local_opt_unsat_weight) <= (hard, soft) {
            return false;
        }
        self.local_opt_hard_unsat = hard;
        self.local_opt_unsat_weight = soft;
        self.local_soln_feasible = hard == 0;
        for (v, var) in self.var.iter().enumerate() {
            self.local_opt_soln[v] = var.value;
        }
        true
    }
    /// record the current assignment if it's the best ever.
    /// Return `true` only if a better feasible assignment was found.
    fn update_best(&mut self) -> bool {
        let hard = self.book.hard_unsat_nb();
        let soft = self.book.soft_unsat_weight();
        let feasible = hard == 0;
        let improved = if self.best_soln_feasible {
            feasible && soft < self.opt_unsat_weight
        } else {
            feasible || (hard, soft) < (self.best_hard_unsat, self.opt_unsat_weight)
        };
        if !improved {
            return false;
        }
        self.best_hard_unsat = hard;
        self.opt_unsat_weight = soft;
        self.best_soln_feasible = feasible;
        for (v, var) in self.var.iter().enumerate() {
            self.best_soln[v] = var.value;
        }
        if feasible {
            self.opt_time = self.clock.elapsed();
            self.stats[Stat::Improvement as usize] += 1;
        }
        feasible
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::search::ValidateIF,
    };

    fn sample() -> Instance {
        Instance::build_instance(
            2,
            3,
            10,
            &[(10, vec![1, 2]), (2, vec![-1]), (3, vec![-2])],
        )
        .expect("a valid instance")
    }

    #[test]
    fn test_init_from_solution() {
        let ins = sample();
        let mut sls = LocalSearch::instantiate(&Config::default(), &ins);
        sls.init(&ins, &[None, Some(true), Some(true)]);
        assert_eq!(sls.cur_soln(), vec![false, true, true]);
        assert_eq!(sls.hard_unsat_nb(), 0);
        assert_eq!(sls.soft_unsat_weight(), 5);
        assert_eq!(sls.clause(0).sat_count(), 2);
        assert!(sls.check_consistency(&ins).is_ok());
    }

    #[test]
    fn test_local_search_finds_the_optimum() {
        let ins = sample();
        let config = Config {
            max_tries: 10,
            max_flips: 1000,
            ..Config::default()
        };
        let mut state = State::instantiate(&config, &ins);
        let mut sls = LocalSearch::instantiate(&config, &ins);
        assert!(sls.local_search(&ins, &mut state, &[]).is_ok());
        assert!(sls.best_soln_feasible());
        assert_eq!(sls.opt_unsat_weight(), 2);
        assert_eq!(sls.best_soln(), &[false, true, false]);
        assert!(sls.verify_sol(&ins).is_ok());
    }

    #[test]
    fn test_zero_cutoff() {
        let ins = sample();
        let config = Config {
            cutoff_time: 0.0,
            ..Config::default()
        };
        let mut state = State::instantiate(&config, &ins);
        let mut sls = LocalSearch::instantiate(&config, &ins);
        assert!(sls
            .local_search(&ins, &mut state, &[None, Some(false), Some(false)])
            .is_ok());
        assert_eq!(sls[Stat::Flip], 0);
        assert_eq!(sls.local_opt_soln(), &[false, false, false]);
        assert!(!sls.local_soln_feasible());
        assert!(!sls.best_soln_feasible());
        assert_eq!(sls.best_hard_unsat(), 1);
    }

    #[test]
    fn test_cutoff_during_a_try() {
        // no assignment is feasible and no try ends by flips.
        let ins = Instance::build_instance(2, 3, 10, &[(10, vec![1]), (10, vec![-1]), (1, vec![2])])
            .expect("a valid instance");
        let config = Config {
            max_tries: 1,
            max_flips: usize::MAX,
            max_non_improve_flip: usize::MAX,
            cutoff_time: 0.05,
            ..Config::default()
        };
        let mut state = State::instantiate(&config, &ins);
        let mut sls = LocalSearch::instantiate(&config, &ins);
        assert!(sls.local_search(&ins, &mut state, &[]).is_ok());
        assert!(0 < sls.step());
        assert!(sls.clock.is_over(0.05));
        // stopped right after the budget ran out
        assert!(sls.elapsed() < 0.05 + 0.05);
        assert!(!sls.best_soln_feasible());
    }

    #[test]
    fn test_reject_short_solution() {
        let ins = sample();
        let mut state = State::instantiate(&Config::default(), &ins);
        let mut sls = LocalSearch::instantiate(&Config::default(), &ins);
        assert!(matches!(
            sls.local_search(&ins, &mut state, &[Some(true)]),
            Err(SolverError::InvalidAssignment(_))
        ));
    }

    #[test]
    fn test_decimation_search() {
        let ins = Instance::build_instance(
            3,
            4,
            10,
            &[(10, vec![1]), (10, vec![-1, 2]), (10, vec![-2, 3]), (4, vec![-3])],
        )
        .expect("a valid instance");
        let config = Config {
            max_tries: 3,
            max_flips: 100,
            ..Config::default()
        };
        let mut state = State::instantiate(&config, &ins);
        let mut sls = LocalSearch::instantiate(&config, &ins);
        assert!(sls.local_search_with_decimation(&ins, &mut state).is_ok());
        assert!(0 < sls[Stat::Decimation]);
        assert!(sls.best_soln_feasible());
        assert_eq!(sls.opt_unsat_weight(), 4);
        assert!(sls.verify_sol(&ins).is_ok());
    }
}
