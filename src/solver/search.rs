//! Top-level search entry points
use {
    super::{Certificate, Solver, SolverResult},
    crate::search::{SearchIF, Stat, ValidateIF},
    tracing::info,
};

/// API to run the search.
pub trait SolveIF {
    /// search until a limit in `Config` is reached, then return the best assignment.
    ///
    /// # Errors
    ///
    /// * `SolverError::HardClauseViolated` or `SolverError::VerificationMismatch`
    ///   if the best assignment doesn't pass a check from scratch.
    ///
    /// # Example
    ///
    /// ```
    /// use slmax::{config::Config, solver::*};
    ///
    /// let config = Config {
    ///     max_tries: 10,
    ///     max_flips: 2000,
    ///     ..Config::from("wcnfs/sample.wcnf")
    /// };
    /// let mut s = Solver::build(&config).expect("can't load");
    /// assert!(matches!(s.solve(), Ok(Certificate::Feasible { cost: 2, .. })));
    ///```
    fn solve(&mut self) -> SolverResult;
    /// the same as `solve` but the first try starts from `init_solution`,
    /// which is indexed by var and whose `None`s are filled at random.
    ///
    /// # Errors
    ///
    /// * `SolverError::InvalidAssignment` if the length of `init_solution` isn't `num_vars + 1`.
    fn solve_from(&mut self, init_solution: &[Option<bool>]) -> SolverResult;
}

impl SolveIF for Solver {
    fn solve(&mut self) -> SolverResult {
        self.solve_from(&[])
    }
    fn solve_from(&mut self, init_solution: &[Option<bool>]) -> SolverResult {
        let Solver {
            ref ins,
            ref mut sls,
            ref mut state,
            decimation,
        } = self;
        state.progress_header(ins, sls);
        if *decimation && init_solution.is_empty() {
            sls.local_search_with_decimation(ins, state)?;
        } else {
            sls.local_search(ins, state, init_solution)?;
        }
        sls.verify_sol(ins)?;
        state.dump_stats(sls);
        let cert = self.certificate();
        info!(
            "finished: cost {:?} after {} flips",
            cert.cost(),
            self.sls[Stat::Flip]
        );
        Ok(cert)
    }
}
