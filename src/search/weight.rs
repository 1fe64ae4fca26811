use {
    super::{LocalSearch, Stat},
    crate::{instance::Instance, types::*},
    rand::Rng,
    tracing::trace,
};

/// The weight every clause starts with, and the floor of smoothing.
pub const WEIGHT_FLOOR: i64 = 1;

/// API for dynamic clause weighting.
pub trait WeightIF {
    /// smooth weights with probability `smooth_probability` if enough hard
    /// clauses are weighted over the floor; increase them otherwise.
    fn update_clause_weights(&mut self, ins: &Instance);
    /// raise the weights of falsified clauses.
    /// Hard ones grow by `h_inc`; soft ones grow by one up to `softclause_weight_threshold`.
    fn increase_weights(&mut self, ins: &Instance);
    /// lower the weights of satisfied clauses on the large weight lists toward the floor.
    fn smooth_weights(&mut self, ins: &Instance);
}

impl WeightIF for LocalSearch {
    fn update_clause_weights(&mut self, ins: &Instance) {
        if self.rng.gen::<f64>() < self.params.smooth_probability
            && self.params.large_clause_count_threshold < self.large_weight_clauses.len()
        {
            self.smooth_weights(ins);
        } else {
            self.increase_weights(ins);
        }
    }
    fn increase_weights(&mut self, ins: &Instance) {
        let LocalSearch {
            ref mut var,
            ref mut clause,
            ref book,
            ref mut goodvar_stack,
            ref mut large_weight_clauses,
            ref mut soft_large_weight_clauses,
            ref params,
            ref mut stats,
            ..
        } = self;
        stats[Stat::Increase as usize] += 1;
        let h_inc = params.h_inc;
        for c in book.hard_clauses().iter() {
            let c = *c;
            clause[c].weight += h_inc;
            if WEIGHT_FLOOR < clause[c].weight && !clause[c].is(FlagClause::LARGE_WEIGHT) {
                clause[c].turn_on(FlagClause::LARGE_WEIGHT);
                large_weight_clauses.push(c);
            }
            for l in ins.clause_lit[c].iter() {
                var[l.var].score += h_inc;
                if var[l.var].is_good() {
                    goodvar_stack.push(l.var);
                }
            }
        }
        for c in book.soft_clauses().iter() {
            let c = *c;
            if params.softclause_weight_threshold <= clause[c].weight {
                continue;
            }
            clause[c].weight += 1;
            if WEIGHT_FLOOR < clause[c].weight && !clause[c].is(FlagClause::SOFT_LARGE_WEIGHT) {
                clause[c].turn_on(FlagClause::SOFT_LARGE_WEIGHT);
                soft_large_weight_clauses.push(c);
            }
            for l in ins.clause_lit[c].iter() {
                var[l.var].score += 1;
                if var[l.var].is_good() {
                    goodvar_stack.push(l.var);
                }
            }
        }
    }
    fn smooth_weights(&mut self, _ins: &Instance) {
        let LocalSearch {
            ref mut var,
            ref mut clause,
            ref mut goodvar_stack,
            ref mut large_weight_clauses,
            ref mut soft_large_weight_clauses,
            ref params,
            ref mut stats,
            ..
        } = self;
        stats[Stat::Smooth as usize] += 1;
        trace!(
            "smooth {} hard and {} soft clauses",
            large_weight_clauses.len(),
            soft_large_weight_clauses.len()
        );
        for (list, dec, flag) in [
            (large_weight_clauses, params.h_inc, FlagClause::LARGE_WEIGHT),
            (soft_large_weight_clauses, 1, FlagClause::SOFT_LARGE_WEIGHT),
        ] {
            let mut i = 0;
            while i < list.len() {
                let c = list[i];
                let ch = &mut clause[c];
                if 0 < ch.sat_count {
                    let old = ch.weight;
                    ch.weight = (old - dec).max(WEIGHT_FLOOR);
                    if ch.sat_count == 1 {
                        let v = ch.sat_var;
                        var[v].score += old - ch.weight;
                        if var[v].is_good() {
                            goodvar_stack.push(v);
                        }
                    }
                    if ch.weight == WEIGHT_FLOOR {
                        ch.turn_off(flag);
                        list.swap_remove(i);
                        continue;
                    }
                }
                i += 1;
            }
        }
    }
}
