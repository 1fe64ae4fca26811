use {
    super::LocalSearch,
    crate::{instance::Instance, types::*},
};

/// API for checking the search state against an evaluation from scratch.
pub trait ValidateIF {
    /// recompute the cost of the best assignment.
    /// It's a no-op if no feasible assignment has been found.
    ///
    /// # Errors
    ///
    /// * `SolverError::HardClauseViolated` if it falsifies a hard clause.
    /// * `SolverError::VerificationMismatch` if its cost differs from the recorded one.
    fn verify_sol(&self, ins: &Instance) -> MaybeInconsistent;
    /// check every incrementally maintained quantity of the current assignment.
    ///
    /// # Errors
    ///
    /// * `SolverError::SolverBug` on the first mismatch.
    fn check_consistency(&self, ins: &Instance) -> MaybeInconsistent;
}

macro_rules! ensure {
    ($cond: expr, $($arg: tt)+) => {
        if !$cond {
            return Err(SolverError::SolverBug(format!($($arg)+)));
        }
    };
}

impl ValidateIF for LocalSearch {
    fn verify_sol(&self, ins: &Instance) -> MaybeInconsistent {
        if !self.best_soln_feasible {
            return Ok(());
        }
        match ins.evaluate(&self.best_soln) {
            Err(c) => Err(SolverError::HardClauseViolated(c)),
            Ok(cost) if cost != self.opt_unsat_weight => Err(SolverError::VerificationMismatch {
                reported: self.opt_unsat_weight,
                verified: cost,
            }),
            Ok(_) => Ok(()),
        }
    }
    fn check_consistency(&self, ins: &Instance) -> MaybeInconsistent {
        let mut score: Vec<i64> = vec![0; ins.num_vars + 1];
        let mut unsat_app_count: Vec<usize> = vec![0; ins.num_vars + 1];
        let mut hard_unsat = 0;
        let mut soft_unsat_weight = 0;
        for (c, lits) in ins.clause_lit.iter().enumerate() {
            let ch = &self.clause[c];
            let w = ch.weight;
            ensure!(1 <= w, "clause {c} has weight {w}");
            let sat_count = lits
                .iter()
                .filter(|l| l.is_satisfied_by(self.var[l.var].value))
                .count();
            ensure!(
                sat_count == ch.sat_count,
                "clause {c} has {sat_count} satisfied literals but sat_count is {}",
                ch.sat_count
            );
            match sat_count {
                0 => {
                    for l in lits.iter() {
                        score[l.var] += w;
                        unsat_app_count[l.var] += 1;
                    }
                    if ins.is_hard(c) {
                        hard_unsat += 1;
                        ensure!(
                            self.book.hard_clauses().contains(c),
                            "falsified hard clause {c} is missing"
                        );
                    } else {
                        soft_unsat_weight += ins.org_clause_weight[c];
                        ensure!(
                            self.book.soft_clauses().contains(c),
                            "falsified soft clause {c} is missing"
                        );
                    }
                }
                1 => {
                    let sv = ch.sat_var;
                    ensure!(
                        lits.iter()
                            .any(|l| l.var == sv && l.is_satisfied_by(self.var[sv].value)),
                        "clause {c} has a wrong critical var {sv}"
                    );
                    score[sv] -= w;
                }
                _ => (),
            }
            if 0 < sat_count {
                ensure!(!self.book.is_unsat(c), "satisfied clause {c} is on a stack");
            }
            ensure!(
                self.clause[c].is(FlagClause::LARGE_WEIGHT)
                    == self.large_weight_clauses.contains(&c),
                "clause {c} has a wrong large weight flag"
            );
            ensure!(
                self.clause[c].is(FlagClause::SOFT_LARGE_WEIGHT)
                    == self.soft_large_weight_clauses.contains(&c),
                "clause {c} has a wrong soft large weight flag"
            );
            ensure!(
                ins.is_hard(c) || w <= self.params.softclause_weight_threshold.max(1),
                "soft clause {c} has weight {w} over the cap"
            );
        }
        ensure!(
            hard_unsat == self.book.hard_unsat_nb(),
            "{hard_unsat} falsified hard clauses but counted {}",
            self.book.hard_unsat_nb()
        );
        ensure!(
            soft_unsat_weight == self.book.soft_unsat_weight(),
            "falsified soft weight {soft_unsat_weight} but counted {}",
            self.book.soft_unsat_weight()
        );
        for v in 1..=ins.num_vars {
            ensure!(
                score[v] == self.var[v].score,
                "var {v} has score {} but should be {}",
                self.var[v].score,
                score[v]
            );
            ensure!(
                self.var[v].is_good() == self.goodvar_stack.contains(v),
                "var {v} with score {} (tabu:{}) has a wrong goodvar membership",
                score[v],
                self.var[v].is_tabu()
            );
            ensure!(
                unsat_app_count[v] == self.book.unsat_app_count(v)
                    && (0 < unsat_app_count[v]) == self.book.vars().contains(v),
                "var {v} occurs in {} falsified clauses but counted {}",
                unsat_app_count[v],
                self.book.unsat_app_count(v)
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::search::{FlipIF, SearchIF},
    };

    #[test]
    fn test_verify_sol() {
        let ins = Instance::build_instance(
            2,
            3,
            10,
            &[(10, vec![1, 2]), (2, vec![-1]), (3, vec![-2])],
        )
        .expect("a valid instance");
        let mut sls = LocalSearch::instantiate(&Config::default(), &ins);
        sls.init(&ins, &[None, Some(true), Some(false)]);
        assert!(sls.verify_sol(&ins).is_ok());
        sls.best_soln = vec![false, true, false];
        sls.best_soln_feasible = true;
        sls.opt_unsat_weight = 2;
        assert!(sls.verify_sol(&ins).is_ok());
        // twice
        assert!(sls.verify_sol(&ins).is_ok());
        sls.opt_unsat_weight = 1;
        assert!(matches!(
            sls.verify_sol(&ins),
            Err(SolverError::VerificationMismatch {
                reported: 1,
                verified: 2
            })
        ));
        sls.best_soln = vec![false, false, false];
        assert!(matches!(
            sls.verify_sol(&ins),
            Err(SolverError::HardClauseViolated(0))
        ));
    }

    #[test]
    fn test_detect_drift() {
        let ins = Instance::build_instance(2, 2, 10, &[(10, vec![1, 2]), (1, vec![-1])])
            .expect("a valid instance");
        let mut sls = LocalSearch::instantiate(&Config::default(), &ins);
        sls.init(&ins, &[None, Some(true), Some(true)]);
        sls.flip(&ins, 2);
        assert!(sls.check_consistency(&ins).is_ok());
        sls.var[1].score += 1;
        assert!(matches!(
            sls.check_consistency(&ins),
            Err(SolverError::SolverBug(_))
        ));
    }
}
