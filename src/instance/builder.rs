use {
    super::Instance,
    crate::types::*,
};

/// API for an external clause producer, like a cardinality or pseudo-boolean encoder.
/// The search engine is agnostic to where clauses came from.
pub trait ClauseProducer {
    /// add clauses (and fresh vars if needed) to `builder`.
    ///
    /// # Errors
    ///
    /// * `SolverError::InvalidLiteral` if a literal refers to an unknown var.
    fn produce(&self, builder: &mut InstanceBuilder) -> MaybeInconsistent;
}

impl ClauseProducer for [WeightedClause] {
    /// treat each pair as a soft clause unless its weight is `u64::MAX`.
    fn produce(&self, builder: &mut InstanceBuilder) -> MaybeInconsistent {
        for (w, lits) in self.iter() {
            if *w == Weight::MAX {
                builder.add_hard_clause(lits)?;
            } else {
                builder.add_soft_clause(*w, lits)?;
            }
        }
        Ok(())
    }
}

/// Collect hard and soft clauses, then make an [`Instance`].
/// The top weight is decided at `build` as the total soft weight plus one.
///
/// # Example
///
///```
/// use slmax::instance::InstanceBuilder;
/// let mut builder = InstanceBuilder::default();
/// let x = builder.new_var();
/// let y = builder.new_var();
/// builder.add_hard_clause([x, y]).expect("valid");
/// builder.add_soft_clause(2, [-x]).expect("valid");
/// builder.add_soft_clause(3, [-y]).expect("valid");
/// let ins = builder.build().expect("valid");
/// assert_eq!(ins.top_clause_weight, 6);
/// assert!(ins.is_hard(0));
///```
#[derive(Clone, Debug, Default)]
pub struct InstanceBuilder {
    num_vars: usize,
    hard: Vec<Vec<i32>>,
    soft: Vec<WeightedClause>,
}

impl InstanceBuilder {
    /// make a builder with `num_vars` vars.
    pub fn new(num_vars: usize) -> Self {
        InstanceBuilder {
            num_vars,
            ..InstanceBuilder::default()
        }
    }
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }
    pub fn num_clauses(&self) -> usize {
        self.hard.len() + self.soft.len()
    }
    /// allocate a fresh var and return it as a positive literal.
    pub fn new_var(&mut self) -> i32 {
        self.num_vars += 1;
        self.num_vars as i32
    }
    pub fn add_hard_clause<V: AsRef<[i32]>>(&mut self, lits: V) -> MaybeInconsistent {
        let lits = self.check(lits.as_ref())?;
        self.hard.push(lits);
        Ok(())
    }
    pub fn add_soft_clause<V: AsRef<[i32]>>(&mut self, weight: Weight, lits: V) -> MaybeInconsistent {
        if weight == 0 {
            return Err(SolverError::InvalidWeight {
                clause: self.num_clauses(),
                weight,
            });
        }
        let lits = self.check(lits.as_ref())?;
        self.soft.push((weight, lits));
        Ok(())
    }
    /// let `producer` add its clauses.
    pub fn add_from<P: ClauseProducer + ?Sized>(&mut self, producer: &P) -> MaybeInconsistent {
        producer.produce(self)
    }
    /// make an instance. Hard clauses come first.
    pub fn build(self) -> Result<Instance, SolverError> {
        let InstanceBuilder {
            num_vars,
            hard,
            soft,
        } = self;
        let top = 1 + soft.iter().map(|(w, _)| *w).sum::<Weight>();
        let clauses = hard
            .into_iter()
            .map(|lits| (top, lits))
            .chain(soft)
            .collect::<Vec<_>>();
        Instance::build_instance(num_vars, clauses.len(), top, &clauses)
    }
    fn check(&self, lits: &[i32]) -> Result<Vec<i32>, SolverError> {
        if lits.is_empty() {
            return Err(SolverError::EmptyClause(self.num_clauses()));
        }
        if let Some(l) = lits
            .iter()
            .find(|l| **l == 0 || self.num_vars < l.unsigned_abs() as usize)
        {
            return Err(SolverError::InvalidLiteral {
                clause: self.num_clauses(),
                lit: *l,
                num_vars: self.num_vars,
            });
        }
        Ok(lits.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// x1 + x2 + x3 <= 1 by the pairwise encoding
    struct AtMostOne(Vec<i32>);

    impl ClauseProducer for AtMostOne {
        fn produce(&self, builder: &mut InstanceBuilder) -> MaybeInconsistent {
            for (i, a) in self.0.iter().enumerate() {
                for b in self.0.iter().skip(i + 1) {
                    builder.add_hard_clause([-a, -b])?;
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_producer() {
        let mut builder = InstanceBuilder::new(3);
        builder.add_from(&AtMostOne(vec![1, 2, 3])).expect("valid");
        let soft: Vec<WeightedClause> = vec![(1, vec![1]), (1, vec![2]), (1, vec![3])];
        builder.add_from(soft.as_slice()).expect("valid");
        assert_eq!(builder.num_clauses(), 6);
        let ins = builder.build().expect("valid");
        assert_eq!(ins.num_hclauses, 3);
        assert_eq!(ins.num_sclauses, 3);
        assert_eq!(ins.top_clause_weight, 4);
    }

    #[test]
    fn test_reject_unknown_var() {
        let mut builder = InstanceBuilder::new(2);
        assert!(matches!(
            builder.add_hard_clause([1, -3]),
            Err(SolverError::InvalidLiteral { lit: -3, .. })
        ));
        let x = builder.new_var();
        assert_eq!(x, 3);
        assert!(builder.add_hard_clause([1, -3]).is_ok());
        assert!(matches!(
            builder.add_soft_clause(0, [1]),
            Err(SolverError::InvalidWeight { .. })
        ));
    }
}
