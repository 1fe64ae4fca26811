use {
    crate::{instance::Instance, primitive::IndexedStack, types::*},
    std::fmt,
};

/// Bookkeeping of falsified clauses under the current assignment.
///
/// Hard and soft clauses are kept in separate stacks so that the selector can
/// prefer hard ones. `unsatvar_stack` holds every var occurring in a falsified clause.
#[derive(Clone, Debug, Default)]
pub struct UnsatBook {
    hardunsat_stack: IndexedStack,
    softunsat_stack: IndexedStack,
    unsatvar_stack: IndexedStack,
    /// `unsat_app_count[v]` is the number of falsified clauses containing `v`.
    unsat_app_count: Vec<usize>,
    soft_unsat_weight: Weight,
}

impl fmt::Display for UnsatBook {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Unsat{{hard:{}, soft:{}, weight:{}, vars:{}}}",
            self.hardunsat_stack.len(),
            self.softunsat_stack.len(),
            self.soft_unsat_weight,
            self.unsatvar_stack.len(),
        )
    }
}

impl UnsatBook {
    pub fn new(num_vars: usize, num_clauses: usize) -> Self {
        UnsatBook {
            hardunsat_stack: IndexedStack::new(num_clauses),
            softunsat_stack: IndexedStack::new(num_clauses),
            unsatvar_stack: IndexedStack::new(num_vars + 1),
            unsat_app_count: vec![0; num_vars + 1],
            soft_unsat_weight: 0,
        }
    }
    pub fn clear(&mut self) {
        self.hardunsat_stack.clear();
        self.softunsat_stack.clear();
        self.unsatvar_stack.clear();
        for n in self.unsat_app_count.iter_mut() {
            *n = 0;
        }
        self.soft_unsat_weight = 0;
    }
    /// register clause `c` as falsified.
    pub fn unsat(&mut self, ins: &Instance, c: ClauseId) {
        if ins.is_hard(c) {
            if !self.hardunsat_stack.push(c) {
                return;
            }
        } else {
            if !self.softunsat_stack.push(c) {
                return;
            }
            self.soft_unsat_weight += ins.org_clause_weight[c];
        }
        for l in ins.clause_lit[c].iter() {
            self.unsat_app_count[l.var] += 1;
            if self.unsat_app_count[l.var] == 1 {
                self.unsatvar_stack.push(l.var);
            }
        }
    }
    /// unregister clause `c` since it got satisfied.
    pub fn sat(&mut self, ins: &Instance, c: ClauseId) {
        if ins.is_hard(c) {
            if !self.hardunsat_stack.remove(c) {
                return;
            }
        } else {
            if !self.softunsat_stack.remove(c) {
                return;
            }
            self.soft_unsat_weight -= ins.org_clause_weight[c];
        }
        for l in ins.clause_lit[c].iter() {
            self.unsat_app_count[l.var] -= 1;
            if self.unsat_app_count[l.var] == 0 {
                self.unsatvar_stack.remove(l.var);
            }
        }
    }
    /// the number of falsified hard clauses
    #[inline]
    pub fn hard_unsat_nb(&self) -> usize {
        self.hardunsat_stack.len()
    }
    /// the total original weight of falsified soft clauses
    #[inline]
    pub fn soft_unsat_weight(&self) -> Weight {
        self.soft_unsat_weight
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hardunsat_stack.is_empty() && self.softunsat_stack.is_empty()
    }
    #[inline]
    pub fn is_unsat(&self, c: ClauseId) -> bool {
        self.hardunsat_stack.contains(c) || self.softunsat_stack.contains(c)
    }
    pub fn hard_clauses(&self) -> &IndexedStack {
        &self.hardunsat_stack
    }
    pub fn soft_clauses(&self) -> &IndexedStack {
        &self.softunsat_stack
    }
    pub fn vars(&self) -> &IndexedStack {
        &self.unsatvar_stack
    }
    pub fn unsat_app_count(&self, v: VarId) -> usize {
        self.unsat_app_count[v]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsat_book() {
        let ins = Instance::build_instance(
            3,
            3,
            10,
            &[(10, vec![1, 2]), (2, vec![-1, 3]), (3, vec![-2])],
        )
        .expect("a valid instance");
        let mut book = UnsatBook::new(3, 3);
        book.unsat(&ins, 0);
        book.unsat(&ins, 1);
        book.unsat(&ins, 1);
        assert_eq!(book.hard_unsat_nb(), 1);
        assert_eq!(book.soft_unsat_weight(), 2);
        assert_eq!(book.unsat_app_count(1), 2);
        assert_eq!(book.vars().len(), 3);
        book.sat(&ins, 0);
        assert_eq!(book.hard_unsat_nb(), 0);
        assert_eq!(book.unsat_app_count(1), 1);
        assert!(!book.vars().contains(2));
        assert!(book.is_unsat(1));
        book.sat(&ins, 1);
        assert!(book.is_empty());
        assert_eq!(book.soft_unsat_weight(), 0);
        assert!(book.vars().is_empty());
    }
}
