use {
    super::{LocalSearch, Stat, Var, WeightIF},
    crate::{instance::Instance, primitive::IndexedStack, types::*},
    rand::Rng,
    std::fmt,
};

/// The way to refresh the goodvar stack after a flip.
/// Both keep the stack equal to the set of vars with a positive score which
/// aren't tabu. They differ in what lifts the tabu of a var.
#[derive(Clone, Debug)]
pub enum FlipStrategy {
    /// a flip lifts the tabu of its neighbors; it's configuration checking.
    /// Requires `Instance::var_neighbor`.
    Neighbor,
    /// a score change lifts the tabu of the var.
    /// `score_change_stack` holds the vars whose score changed in the current flip.
    ScoreChange { score_change_stack: Vec<VarId> },
}

impl fmt::Display for FlipStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FlipStrategy::Neighbor => write!(f, "neighbor"),
            FlipStrategy::ScoreChange { .. } => write!(f, "score-change"),
        }
    }
}

impl FlipStrategy {
    pub fn score_change(num_vars: usize) -> Self {
        FlipStrategy::ScoreChange {
            score_change_stack: Vec::with_capacity(num_vars + 1),
        }
    }
    /// note that the score of `vi` has changed in a flip.
    #[inline]
    pub(crate) fn record(&mut self, v: &mut Var, vi: VarId) {
        if let FlipStrategy::ScoreChange { score_change_stack } = self {
            v.turn_on(FlagVar::CONF_CHANGED);
            if !v.is(FlagVar::SCORE_CHANGED) {
                v.turn_on(FlagVar::SCORE_CHANGED);
                score_change_stack.push(vi);
            }
        }
    }
    /// forget all records and lift every tabu.
    pub(crate) fn reset(&mut self, var: &mut [Var]) {
        if let FlipStrategy::ScoreChange { score_change_stack } = self {
            score_change_stack.clear();
        }
        for v in var.iter_mut() {
            v.turn_off(FlagVar::SCORE_CHANGED);
            v.turn_on(FlagVar::CONF_CHANGED);
        }
    }
    /// make `flipvar` tabu, then make `goodvar_stack` consistent with the vars
    /// around it. Only `flipvar` and its neighbors can change their scores in a flip.
    pub(crate) fn update_goodvars(
        &mut self,
        ins: &Instance,
        var: &mut [Var],
        goodvar_stack: &mut IndexedStack,
        flipvar: VarId,
    ) {
        match self {
            FlipStrategy::Neighbor => {
                for v in ins.var_neighbor[flipvar].iter() {
                    var[*v].turn_on(FlagVar::CONF_CHANGED);
                    refresh(var, goodvar_stack, *v);
                }
            }
            FlipStrategy::ScoreChange { score_change_stack } => {
                for v in score_change_stack.drain(..) {
                    var[v].turn_off(FlagVar::SCORE_CHANGED);
                    refresh(var, goodvar_stack, v);
                }
            }
        }
        var[flipvar].turn_off(FlagVar::CONF_CHANGED);
        goodvar_stack.remove(flipvar);
    }
}

#[inline]
fn refresh(var: &[Var], goodvar_stack: &mut IndexedStack, v: VarId) {
    if var[v].is_good() {
        goodvar_stack.push(v);
    } else {
        goodvar_stack.remove(v);
    }
}

/// Return `true` if `a` is a better candidate than `b`.
/// A higher score wins; an older flip wins a tie.
#[inline]
fn is_better(a: &Var, b: &Var) -> bool {
    b.score < a.score || (a.score == b.score && a.time_stamp < b.time_stamp)
}

/// API for var selection.
pub trait SelectIF {
    /// return the var to flip next, or `None` if every clause is satisfied.
    /// It may update clause weights when no var has a positive score.
    fn pick_var(&mut self, ins: &Instance) -> Option<VarId>;
}

impl SelectIF for LocalSearch {
    fn pick_var(&mut self, ins: &Instance) -> Option<VarId> {
        let LocalSearch {
            ref var,
            ref goodvar_stack,
            ref params,
            ref mut rng,
            ref mut stats,
            ..
        } = self;
        let len = goodvar_stack.len();
        if 0 < len {
            if rng.gen::<f64>() < params.rdprob {
                stats[Stat::RandomPick as usize] += 1;
                return Some(goodvar_stack[rng.gen_range(0..len)]);
            }
            let mut best = goodvar_stack[0];
            if len < params.hd_count_threshold {
                for v in goodvar_stack.iter().skip(1) {
                    if is_better(&var[*v], &var[best]) {
                        best = *v;
                    }
                }
            } else {
                best = goodvar_stack[rng.gen_range(0..len)];
                for _ in 1..params.hd_count_threshold {
                    let v = goodvar_stack[rng.gen_range(0..len)];
                    if is_better(&var[v], &var[best]) {
                        best = v;
                    }
                }
            }
            return Some(best);
        }
        if self.book.is_empty() {
            return None;
        }
        self.update_clause_weights(ins);
        let hard = self.book.hard_clauses();
        let soft = self.book.soft_clauses();
        let c = if !hard.is_empty() {
            hard[self.rng.gen_range(0..hard.len())]
        } else {
            soft[self.rng.gen_range(0..soft.len())]
        };
        let lits = &ins.clause_lit[c];
        if self.rng.gen::<f64>() < self.params.rwprob {
            self.stats[Stat::RandomWalk as usize] += 1;
            return Some(lits[self.rng.gen_range(0..lits.len())].var);
        }
        let mut best = lits[0].var;
        for l in lits.iter().skip(1) {
            if is_better(&self.var[l.var], &self.var[best]) {
                best = l.var;
            }
        }
        Some(best)
    }
}
