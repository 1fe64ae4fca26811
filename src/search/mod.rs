//! Module `search` implements the stochastic local search engine.
//! All per-var and per-clause states live in a single arena, [`LocalSearch`],
//! sized once from an [`Instance`](`crate::instance::Instance`).

/// unit propagation based initial assignment
mod decimation;
/// initialization and the flip loop
mod driver;
/// incremental score maintenance
mod score;
/// pick a var to flip
mod select;
/// stacks of unsatisfied clauses and related vars
mod unsat;
/// consistency checks
mod validate;
/// dynamic clause weighting
mod weight;

pub use self::{
    decimation::Decimation,
    driver::SearchIF,
    score::FlipIF,
    select::{FlipStrategy, SelectIF},
    unsat::UnsatBook,
    validate::ValidateIF,
    weight::{WeightIF, WEIGHT_FLOOR},
};

use {
    crate::{
        config::StrategyKind,
        instance::Instance,
        primitive::{Clock, IndexedStack},
        types::*,
    },
    rand::{rngs::SmallRng, SeedableRng},
    std::{fmt, ops::Index},
};

/// Object representing the dynamic state of a variable.
#[derive(Clone, Debug, Default)]
pub struct Var {
    /// the current value
    pub(crate) value: bool,
    /// the weighted gain by flipping it
    pub(crate) score: i64,
    /// the step of its last flip
    pub(crate) time_stamp: usize,
    pub(crate) flags: FlagVar,
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "V{{{}, score:{}, at:{}}}",
            self.value, self.score, self.time_stamp
        )
    }
}

impl Var {
    pub fn value(&self) -> bool {
        self.value
    }
    pub fn score(&self) -> i64 {
        self.score
    }
    pub fn time_stamp(&self) -> usize {
        self.time_stamp
    }
    /// return `true` if it can't be a goodvar: nothing around it changed since its last flip.
    #[inline]
    pub fn is_tabu(&self) -> bool {
        !self.is(FlagVar::CONF_CHANGED)
    }
    /// return `true` if it should be on the goodvar stack.
    #[inline]
    pub fn is_good(&self) -> bool {
        0 < self.score && !self.is_tabu()
    }
}

/// Object representing the dynamic state of a clause.
#[derive(Clone, Debug, Default)]
pub struct Clause {
    /// the current (boosted) weight
    pub(crate) weight: i64,
    /// the number of satisfied literals
    pub(crate) sat_count: usize,
    /// the var of the only satisfied literal if `sat_count == 1`
    pub(crate) sat_var: VarId,
    pub(crate) flags: FlagClause,
}

impl Clause {
    pub fn weight(&self) -> i64 {
        self.weight
    }
    pub fn sat_count(&self) -> usize {
        self.sat_count
    }
    pub fn sat_var(&self) -> Option<VarId> {
        (self.sat_count == 1).then_some(self.sat_var)
    }
}

/// Tunables copied from [`Config`], resolved against the instance.
#[derive(Clone, Debug)]
pub struct SearchParams {
    pub max_tries: usize,
    pub max_flips: usize,
    pub max_non_improve_flip: usize,
    pub cutoff_time: f64,
    pub rwprob: f64,
    pub rdprob: f64,
    pub smooth_probability: f64,
    pub h_inc: i64,
    pub hd_count_threshold: usize,
    pub large_clause_count_threshold: usize,
    pub softclause_weight_threshold: i64,
}

/// Search statistics index.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stat {
    /// the number of tries
    Try = 0,
    /// the number of flips
    Flip,
    /// the number of random picks from the goodvar stack
    RandomPick,
    /// the number of random walk steps
    RandomWalk,
    /// the number of weight increases
    Increase,
    /// the number of weight smoothings
    Smooth,
    /// the number of improved feasible solutions
    Improvement,
    /// the number of decimations
    Decimation,
    /// Don't use this dummy.
    EndOfStatIndex,
}

/// The search arena.
///
///```
/// use slmax::{config::Config, instance::Instance, search::*, types::*};
/// let ins = Instance::build_instance(2, 3, 10, &[(10, vec![1, 2]), (2, vec![-1]), (3, vec![-2])])
///     .expect("a valid instance");
/// let mut sls = LocalSearch::instantiate(&Config::default(), &ins);
/// sls.init(&ins, &[Some(false), Some(true), Some(true)]);
/// assert_eq!(sls.hard_unsat_nb(), 0);
/// assert_eq!(sls.soft_unsat_weight(), 5);
/// sls.flip(&ins, 1);
/// assert_eq!(sls.soft_unsat_weight(), 3);
/// assert!(sls.check_consistency(&ins).is_ok());
///```
#[derive(Clone, Debug)]
pub struct LocalSearch {
    pub(crate) var: Vec<Var>,
    pub(crate) clause: Vec<Clause>,
    /// unsat clauses and vars in them
    pub(crate) book: UnsatBook,
    /// vars with a positive score
    pub(crate) goodvar_stack: IndexedStack,
    pub(crate) strategy: FlipStrategy,
    /// hard clauses weighted over the floor
    pub(crate) large_weight_clauses: Vec<ClauseId>,
    /// soft clauses weighted over the floor
    pub(crate) soft_large_weight_clauses: Vec<ClauseId>,
    pub(crate) decimation: Decimation,

    //
    //## solutions
    //
    pub(crate) best_soln: Vec<bool>,
    pub(crate) local_opt_soln: Vec<bool>,
    pub(crate) best_soln_feasible: bool,
    pub(crate) local_soln_feasible: bool,
    /// the soft cost of `best_soln`
    pub(crate) opt_unsat_weight: Weight,
    /// the number of hard clauses falsified by `best_soln`
    pub(crate) best_hard_unsat: usize,
    pub(crate) local_opt_unsat_weight: Weight,
    pub(crate) local_opt_hard_unsat: usize,
    /// the elapsed time when `best_soln` was found
    pub(crate) opt_time: f64,

    //
    //## steps and time
    //
    pub(crate) tries: usize,
    pub(crate) step: usize,
    pub(crate) params: SearchParams,
    pub(crate) clock: Clock,
    pub(crate) rng: SmallRng,
    pub(crate) stats: [usize; Stat::EndOfStatIndex as usize],
}

impl Instantiate<Instance> for LocalSearch {
    /// The strategy is `FlipStrategy::Neighbor` only if the instance carries
    /// a neighbor relation and the config doesn't ask for the other.
    fn instantiate(config: &Config, ins: &Instance) -> LocalSearch {
        let nv = ins.num_vars;
        let nc = ins.num_clauses;
        let strategy = match config.strategy {
            StrategyKind::ScoreChange => FlipStrategy::score_change(nv),
            _ if ins.has_neighbors() => FlipStrategy::Neighbor,
            _ => FlipStrategy::score_change(nv),
        };
        LocalSearch {
            var: vec![Var::default(); nv + 1],
            clause: vec![Clause::default(); nc],
            book: UnsatBook::new(nv, nc),
            goodvar_stack: IndexedStack::new(nv + 1),
            strategy,
            large_weight_clauses: Vec::new(),
            soft_large_weight_clauses: Vec::new(),
            decimation: Decimation::new(nv, nc),
            best_soln: vec![false; nv + 1],
            local_opt_soln: vec![false; nv + 1],
            best_soln_feasible: false,
            local_soln_feasible: false,
            opt_unsat_weight: Weight::MAX,
            best_hard_unsat: usize::MAX,
            local_opt_unsat_weight: Weight::MAX,
            local_opt_hard_unsat: usize::MAX,
            opt_time: 0.0,
            tries: 0,
            step: 0,
            params: SearchParams {
                max_tries: config.max_tries,
                max_flips: config.max_flips,
                max_non_improve_flip: config.max_non_improve_flip,
                cutoff_time: config.cutoff_time,
                rwprob: config.rwprob,
                rdprob: config.rdprob,
                smooth_probability: config.smooth_probability,
                h_inc: config.h_inc_for(ins.weighted),
                hd_count_threshold: config.hd_count_threshold.max(1),
                large_clause_count_threshold: config.large_clause_count_threshold,
                softclause_weight_threshold: config
                    .softclause_weight_threshold_for(ins.weighted),
            },
            clock: Clock::default(),
            rng: SmallRng::seed_from_u64(config.seed),
            stats: [0; Stat::EndOfStatIndex as usize],
        }
    }
}

impl Index<Stat> for LocalSearch {
    type Output = usize;
    #[inline]
    fn index(&self, i: Stat) -> &usize {
        &self.stats[i as usize]
    }
}

impl fmt::Display for LocalSearch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "LocalSearch(try:{}, step:{}, hard unsat:{}, soft unsat:{}, {})",
            self.tries,
            self.step,
            self.book.hard_unsat_nb(),
            self.book.soft_unsat_weight(),
            self.strategy,
        )
    }
}

impl LocalSearch {
    pub fn var(&self, v: VarId) -> &Var {
        &self.var[v]
    }
    pub fn clause(&self, c: ClauseId) -> &Clause {
        &self.clause[c]
    }
    pub fn params(&self) -> &SearchParams {
        &self.params
    }
    pub fn strategy(&self) -> &FlipStrategy {
        &self.strategy
    }
    /// the number of falsified hard clauses under the current assignment
    pub fn hard_unsat_nb(&self) -> usize {
        self.book.hard_unsat_nb()
    }
    /// the total original weight of falsified soft clauses under the current assignment
    pub fn soft_unsat_weight(&self) -> Weight {
        self.book.soft_unsat_weight()
    }
    pub fn unsat_book(&self) -> &UnsatBook {
        &self.book
    }
    pub fn goodvars(&self) -> &[VarId] {
        self.goodvar_stack.as_slice()
    }
    /// the current assignment, indexed by `VarId`
    pub fn cur_soln(&self) -> Vec<bool> {
        self.var.iter().map(|v| v.value).collect::<Vec<_>>()
    }
    /// the best assignment; see `best_soln_feasible` for its feasibility.
    pub fn best_soln(&self) -> &[bool] {
        &self.best_soln
    }
    pub fn best_soln_feasible(&self) -> bool {
        self.best_soln_feasible
    }
    /// the best assignment in the current try.
    pub fn local_opt_soln(&self) -> &[bool] {
        &self.local_opt_soln
    }
    pub fn local_soln_feasible(&self) -> bool {
        self.local_soln_feasible
    }
    /// the soft cost of the best assignment
    pub fn opt_unsat_weight(&self) -> Weight {
        self.opt_unsat_weight
    }
    pub fn local_opt_unsat_weight(&self) -> Weight {
        self.local_opt_unsat_weight
    }
    /// the number of hard clauses falsified by the best assignment
    pub fn best_hard_unsat(&self) -> usize {
        self.best_hard_unsat
    }
    pub fn opt_time(&self) -> f64 {
        self.opt_time
    }
    pub fn tries(&self) -> usize {
        self.tries
    }
    /// the number of flips in the current try
    pub fn step(&self) -> usize {
        self.step
    }
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }
    /// convert a Boolean vector indexed by `VarId` to DIMACS literals.
    pub fn as_model(assign: &[bool]) -> Vec<i32> {
        assign
            .iter()
            .enumerate()
            .skip(1)
            .map(|(v, b)| if *b { v as i32 } else { -(v as i32) })
            .collect::<Vec<_>>()
    }
}
