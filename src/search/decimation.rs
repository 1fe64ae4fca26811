use {
    crate::{instance::Instance, primitive::IndexedStack, types::*},
    rand::{rngs::SmallRng, Rng},
    std::cmp::Ordering,
};

/// A unit propagation based constructor of initial assignments.
#[derive(Clone, Debug, Default)]
pub struct Decimation {
    fix: Vec<Option<bool>>,
    unfixed_vars: IndexedStack,
    /// `true` if the clause is neither satisfied nor exhausted.
    clause_open: Vec<bool>,
    /// the number of unfixed literals in each clause
    clause_unfixed: Vec<usize>,
    hunit_stack: Vec<ClauseId>,
    sunit_stack: IndexedStack,
}

impl Decimation {
    pub fn new(num_vars: usize, num_clauses: usize) -> Self {
        Decimation {
            fix: vec![None; num_vars + 1],
            unfixed_vars: IndexedStack::new(num_vars + 1),
            clause_open: vec![true; num_clauses],
            clause_unfixed: vec![0; num_clauses],
            hunit_stack: Vec::new(),
            sunit_stack: IndexedStack::new(num_clauses),
        }
    }
    /// fix every var and return the assignment indexed by `VarId`.
    /// `guide` is a pair of the best feasible solution and the latest local optimum.
    pub fn make_assignment(
        &mut self,
        ins: &Instance,
        rng: &mut SmallRng,
        guide: Option<(&[bool], &[bool])>,
        hd_count_threshold: usize,
    ) -> &[Option<bool>] {
        self.reset(ins);
        while !self.unfixed_vars.is_empty() {
            if let Some(c) = self.hunit_stack.pop() {
                if let Some((v, value)) = self.unit_literal(ins, c) {
                    self.assign(ins, v, value);
                }
                continue;
            }
            if !self.sunit_stack.is_empty() {
                let len = self.sunit_stack.len();
                let mut best = self.sunit_stack[0];
                if len <= hd_count_threshold {
                    for c in self.sunit_stack.iter().skip(1) {
                        if ins.org_clause_weight[best] < ins.org_clause_weight[*c] {
                            best = *c;
                        }
                    }
                } else {
                    for _ in 0..hd_count_threshold {
                        let c = self.sunit_stack[rng.gen_range(0..len)];
                        if ins.org_clause_weight[best] < ins.org_clause_weight[c] {
                            best = c;
                        }
                    }
                }
                self.sunit_stack.remove(best);
                if let Some((v, value)) = self.unit_literal(ins, best) {
                    self.assign(ins, v, value);
                }
                continue;
            }
            let v = self.unfixed_vars[rng.gen_range(0..self.unfixed_vars.len())];
            let value = match guide {
                Some((best, local)) => {
                    if rng.gen::<bool>() {
                        best[v]
                    } else {
                        local[v]
                    }
                }
                None => self.preferred_polarity(ins, rng, v),
            };
            self.assign(ins, v, value);
        }
        &self.fix
    }
    fn reset(&mut self, ins: &Instance) {
        for f in self.fix.iter_mut() {
            *f = None;
        }
        self.unfixed_vars.clear();
        for v in 1..=ins.num_vars {
            self.unfixed_vars.push(v);
        }
        for (c, lits) in ins.clause_lit.iter().enumerate() {
            self.clause_open[c] = true;
            self.clause_unfixed[c] = lits.len();
        }
        self.hunit_stack.clear();
        self.sunit_stack.clear();
        for l in ins.unit_clause.iter() {
            if ins.is_hard(l.clause) {
                self.hunit_stack.push(l.clause);
            }
        }
        // hard units are popped from the top.
        self.hunit_stack.reverse();
        for l in ins.unit_clause.iter() {
            if !ins.is_hard(l.clause) {
                self.sunit_stack.push(l.clause);
            }
        }
    }
    /// return the last unfixed literal of an open clause.
    fn unit_literal(&self, ins: &Instance, c: ClauseId) -> Option<(VarId, bool)> {
        if !self.clause_open[c] {
            return None;
        }
        ins.clause_lit[c]
            .iter()
            .find(|l| self.fix[l.var].is_none())
            .map(|l| (l.var, l.sense))
    }
    fn assign(&mut self, ins: &Instance, v: VarId, value: bool) {
        self.fix[v] = Some(value);
        self.unfixed_vars.remove(v);
        for occ in ins.var_lit[v].iter() {
            let c = occ.clause;
            if !self.clause_open[c] {
                continue;
            }
            if occ.sense == value {
                self.clause_open[c] = false;
                self.sunit_stack.remove(c);
                continue;
            }
            self.clause_unfixed[c] -= 1;
            match self.clause_unfixed[c] {
                0 => {
                    self.clause_open[c] = false;
                    self.sunit_stack.remove(c);
                }
                1 if ins.is_hard(c) => self.hunit_stack.push(c),
                1 => {
                    self.sunit_stack.push(c);
                }
                _ => (),
            }
        }
    }
    /// the value satisfying more open hard clauses, then more open soft weight.
    fn preferred_polarity(&self, ins: &Instance, rng: &mut SmallRng, v: VarId) -> bool {
        let mut hard = [0usize; 2];
        let mut soft = [0 as Weight; 2];
        for occ in ins.var_lit[v].iter() {
            if !self.clause_open[occ.clause] {
                continue;
            }
            if ins.is_hard(occ.clause) {
                hard[occ.sense as usize] += 1;
            } else {
                soft[occ.sense as usize] += ins.org_clause_weight[occ.clause];
            }
        }
        match (hard[1].cmp(&hard[0]), soft[1].cmp(&soft[0])) {
            (Ordering::Equal, Ordering::Equal) => rng.gen::<bool>(),
            (Ordering::Equal, o) => o.is_gt(),
            (o, _) => o.is_gt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, rand::SeedableRng};

    #[test]
    fn test_unit_propagation() {
        // x1 is a hard unit; x1 -> x2 is hard; -x2 | x3 is hard; -x3 is soft.
        let ins = Instance::build_instance(
            3,
            4,
            10,
            &[(10, vec![1]), (10, vec![-1, 2]), (10, vec![-2, 3]), (1, vec![-3])],
        )
        .expect("a valid instance");
        let mut dec = Decimation::new(3, 4);
        let mut rng = SmallRng::seed_from_u64(0);
        let assign = dec.make_assignment(&ins, &mut rng, None, 15).to_vec();
        assert_eq!(assign, vec![None, Some(true), Some(true), Some(true)]);
        assert_eq!(ins.evaluate(&[false, true, true, true]), Ok(1));
    }

    #[test]
    fn test_heaviest_soft_unit_first() {
        let ins = Instance::build_instance(1, 2, 10, &[(2, vec![1]), (5, vec![-1])])
            .expect("a valid instance");
        let mut dec = Decimation::new(1, 2);
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..4 {
            let assign = dec.make_assignment(&ins, &mut rng, None, 15).to_vec();
            assert_eq!(assign[1], Some(false));
        }
    }

    #[test]
    fn test_guided_assignment() {
        let ins = Instance::build_instance(2, 1, 10, &[(1, vec![1, 2])])
            .expect("a valid instance");
        let mut dec = Decimation::new(2, 1);
        let mut rng = SmallRng::seed_from_u64(2);
        let best = [false, true, false];
        let assign = dec
            .make_assignment(&ins, &mut rng, Some((&best, &best)), 15)
            .to_vec();
        assert_eq!(assign[1], Some(true));
        assert!(assign.iter().skip(1).all(|a| a.is_some()));
    }
}
