//! Module `solver` provides the top-level API as a MaxSAT solver.

/// API to instantiate
mod build;
/// API to run the search
mod search;

pub use self::{build::SolverBuildIF, search::SolveIF};

use {
    crate::{
        instance::Instance,
        search::{LocalSearch, ValidateIF},
        state::State,
        types::*,
    },
    std::io::{self, Write},
};

/// Normal results returned by Solver.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Certificate {
    /// No soft clause is falsified; `model` is such an assignment sorted by var order.
    Optimum { cost: Weight, model: Vec<i32> },
    /// `model` satisfies every hard clause and costs `cost`.
    /// Local search can't prove it's optimal.
    Feasible { cost: Weight, model: Vec<i32> },
    /// No feasible assignment was found; `model` falsifies `hard_unsat` hard clauses.
    Unknown { hard_unsat: usize, model: Vec<i32> },
}

impl Certificate {
    /// return the cost of a feasible assignment.
    pub fn cost(&self) -> Option<Weight> {
        match self {
            Certificate::Optimum { cost, .. } | Certificate::Feasible { cost, .. } => Some(*cost),
            Certificate::Unknown { .. } => None,
        }
    }
    pub fn model(&self) -> &[i32] {
        match self {
            Certificate::Optimum { model, .. }
            | Certificate::Feasible { model, .. }
            | Certificate::Unknown { model, .. } => model,
        }
    }
}

/// The return type of `Solver::solve`.
/// This captures the following cases:
/// * `Certificate::*` -- the best assignment found under the given limits, and
/// * `SolverError::*` -- caused by a bug
pub type SolverResult = Result<Certificate, SolverError>;

/// The MaxSAT solver object consisting of an instance, a search engine and a reporter.
///
///```
/// use slmax::{solver::*, types::*};
///
/// let config = Config {
///     max_tries: 10,
///     max_flips: 1000,
///     ..Config::default()
/// };
/// let clauses: Vec<WeightedClause> = vec![(Weight::MAX, vec![1, 2]), (2, vec![-1]), (3, vec![-2])];
/// let mut s = Solver::try_from((config, clauses.as_slice())).expect("a valid instance");
/// assert_eq!(s.ins.top_clause_weight, 6);
/// assert!(matches!(s.solve(), Ok(Certificate::Feasible { cost: 2, .. })));
///```
#[derive(Clone, Debug)]
pub struct Solver {
    /// the instance
    pub ins: Instance,
    /// the search engine
    pub sls: LocalSearch,
    /// misc data holder
    pub state: State,
    /// build initial assignments by decimation
    pub decimation: bool,
}

impl Solver {
    /// return the best assignment found so far.
    pub fn certificate(&self) -> Certificate {
        let model = LocalSearch::as_model(self.sls.best_soln());
        if self.sls.best_soln_feasible() {
            let cost = self.sls.opt_unsat_weight();
            if cost == 0 {
                Certificate::Optimum { cost, model }
            } else {
                Certificate::Feasible { cost, model }
            }
        } else {
            Certificate::Unknown {
                hard_unsat: self.sls.best_hard_unsat(),
                model,
            }
        }
    }
    /// write the best feasible assignment as a `v` line.
    /// Nothing is written if no feasible assignment has been found.
    pub fn print_best_solution<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if !self.sls.best_soln_feasible() {
            return Ok(());
        }
        write!(out, "v")?;
        for l in LocalSearch::as_model(self.sls.best_soln()).iter() {
            write!(out, " {l}")?;
        }
        writeln!(out)
    }
    /// write the best cost and the time to find it, or `-1 -1` if none.
    pub fn simple_print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if !self.sls.best_soln_feasible() {
            return writeln!(out, "-1\t-1");
        }
        if self.sls.verify_sol(&self.ins).is_ok() {
            writeln!(
                out,
                "{}\t{}",
                self.sls.opt_unsat_weight(),
                self.sls.opt_time()
            )
        } else {
            writeln!(out, "solution is wrong")
        }
    }
}
