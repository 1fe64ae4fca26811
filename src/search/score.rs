use {
    super::{FlipStrategy, LocalSearch, Stat, Var},
    crate::{instance::Instance, types::*},
};

/// API for flipping.
pub trait FlipIF {
    /// flip `v` and update sat counts, critical vars, scores, the unsat
    /// bookkeeping and the goodvar stack incrementally.
    fn flip(&mut self, ins: &Instance, v: VarId);
}

#[inline]
fn add_score(var: &mut [Var], strategy: &mut FlipStrategy, vi: VarId, delta: i64) {
    var[vi].score += delta;
    strategy.record(&mut var[vi], vi);
}

impl FlipIF for LocalSearch {
    fn flip(&mut self, ins: &Instance, flipvar: VarId) {
        let LocalSearch {
            ref mut var,
            ref mut clause,
            ref mut book,
            ref mut goodvar_stack,
            ref mut strategy,
            ref mut stats,
            ..
        } = self;
        stats[Stat::Flip as usize] += 1;
        let org_flipvar_score = var[flipvar].score;
        let value = !var[flipvar].value;
        var[flipvar].value = value;
        for occ in ins.var_lit[flipvar].iter() {
            let c = occ.clause;
            let w = clause[c].weight;
            let lits = &ins.clause_lit[c];
            if occ.sense == value {
                clause[c].sat_count += 1;
                match clause[c].sat_count {
                    2 => {
                        // the former sole satisfier isn't critical anymore.
                        add_score(var, strategy, clause[c].sat_var, w);
                    }
                    1 => {
                        clause[c].sat_var = flipvar;
                        for l in lits.iter() {
                            add_score(var, strategy, l.var, -w);
                        }
                        book.sat(ins, c);
                    }
                    _ => (),
                }
            } else {
                clause[c].sat_count -= 1;
                match clause[c].sat_count {
                    1 => {
                        // the remaining satisfier becomes critical.
                        for l in lits.iter() {
                            if l.sense == var[l.var].value {
                                add_score(var, strategy, l.var, -w);
                                clause[c].sat_var = l.var;
                                break;
                            }
                        }
                    }
                    0 => {
                        for l in lits.iter() {
                            add_score(var, strategy, l.var, w);
                        }
                        book.unsat(ins, c);
                    }
                    _ => (),
                }
            }
        }
        var[flipvar].score = -org_flipvar_score;
        strategy.update_goodvars(ins, var, goodvar_stack, flipvar);
    }
}
