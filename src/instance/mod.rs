//! Module `instance` provides the immutable representation of a MaxSAT instance.
//! It is built once, then shared by the search engine for its entire lifetime.

/// An incremental builder for clause producers
mod builder;

pub use self::builder::{ClauseProducer, InstanceBuilder};

use {
    crate::types::*,
    std::{fmt, path::Path},
    tracing::debug,
};

/// The class of a clause
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseKind {
    /// must be satisfied by a feasible assignment
    Hard,
    /// costs its weight when falsified
    Soft,
}

/// The bipartite incidence structure between vars and clauses.
///
///```
/// use slmax::{instance::Instance, types::*};
/// let ins = Instance::build_instance(2, 3, 10, &[(10, vec![1, 2]), (2, vec![-1]), (3, vec![-2])])
///     .expect("a valid instance");
/// assert_eq!(ins.num_hclauses, 1);
/// assert_eq!(ins.total_soft_weight, 5);
/// assert_eq!(ins.var_lit[1].len(), 2);
///```
#[derive(Clone, Debug, Default)]
pub struct Instance {
    /// var index from 1 to num_vars
    pub num_vars: usize,
    /// clause index from 0 to num_clauses - 1
    pub num_clauses: usize,
    pub num_hclauses: usize,
    pub num_sclauses: usize,
    /// the weight of hard clauses
    pub top_clause_weight: Weight,
    pub total_soft_weight: Weight,
    /// the original weights; `top_clause_weight` for hard clauses
    pub org_clause_weight: Vec<Weight>,
    /// `clause_lit[c]` is the list of literals of clause `c`.
    pub clause_lit: Vec<Vec<Lit>>,
    /// `var_lit[v]` is the list of occurrences of var `v`.
    pub var_lit: Vec<Vec<Lit>>,
    /// `var_neighbor[v]` is the list of vars sharing a clause with `v`.
    /// It's empty unless `build_neighbor_relation` succeeded.
    pub var_neighbor: Vec<Vec<VarId>>,
    /// literals of the original unit clauses
    pub unit_clause: Vec<Lit>,
    pub max_clause_length: usize,
    pub min_clause_length: usize,
    /// `true` if there are hard clauses.
    pub partial: bool,
    /// `true` if there is no soft clause.
    pub pure_sat: bool,
    /// `true` if soft clauses have different weights.
    pub weighted: bool,
    /// the number of dropped clauses which contain a literal and its negation
    pub num_tautologies: usize,
    pub description: WCNFDescription,
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Instance({} vars, {} hard, {} soft, top:{}, soft weight:{})",
            self.num_vars,
            self.num_hclauses,
            self.num_sclauses,
            self.top_clause_weight,
            self.total_soft_weight,
        )
    }
}

impl TryFrom<&Path> for Instance {
    type Error = SolverError;
    /// load an instance from a file in the WCNF or CNF format.
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let (wcnf, clauses) = WCNFReader::try_from(path)?.read_clauses()?;
        let top = wcnf.top_weight.unwrap_or(Weight::MAX);
        let mut ins =
            Instance::build_instance(wcnf.num_of_variables, wcnf.num_of_clauses, top, &clauses)?;
        ins.description = wcnf;
        Ok(ins)
    }
}

impl Instance {
    /// build an instance from parsed clauses.
    /// A clause weighted `top_weight` or more is a hard clause.
    ///
    /// # Errors
    ///
    /// * `SolverError::InconsistentClauseCount` if `num_clauses` differs from `clauses.len()`.
    /// * `SolverError::InvalidLiteral` if a literal is zero or out of range.
    /// * `SolverError::EmptyClause` if a clause has no literal.
    /// * `SolverError::InvalidWeight` if a soft clause has weight zero.
    pub fn build_instance(
        num_vars: usize,
        num_clauses: usize,
        top_weight: Weight,
        clauses: &[WeightedClause],
    ) -> Result<Instance, SolverError> {
        if num_clauses != clauses.len() {
            return Err(SolverError::InconsistentClauseCount {
                declared: num_clauses,
                read: clauses.len(),
            });
        }
        let mut ins = Instance {
            num_vars,
            top_clause_weight: top_weight,
            var_lit: vec![Vec::new(); num_vars + 1],
            min_clause_length: usize::MAX,
            description: WCNFDescription {
                num_of_variables: num_vars,
                num_of_clauses: num_clauses,
                top_weight: Some(top_weight),
                pathname: WCNFIndicator::LitVec(num_clauses),
                ..WCNFDescription::default()
            },
            ..Instance::default()
        };
        let mut seen: Vec<Option<bool>> = vec![None; num_vars + 1];
        let mut first_soft_weight: Option<Weight> = None;
        'next_clause: for (i, (weight, ints)) in clauses.iter().enumerate() {
            if ints.is_empty() {
                return Err(SolverError::EmptyClause(i));
            }
            if *weight == 0 {
                return Err(SolverError::InvalidWeight {
                    clause: i,
                    weight: 0,
                });
            }
            for l in ints.iter() {
                if *l == 0 || num_vars < l.unsigned_abs() as usize {
                    return Err(SolverError::InvalidLiteral {
                        clause: i,
                        lit: *l,
                        num_vars,
                    });
                }
            }
            let cid = ins.clause_lit.len();
            let mut lits: Vec<Lit> = Vec::with_capacity(ints.len());
            let mut tautology = false;
            for l in ints.iter() {
                let lit = Lit::from((cid, *l));
                match seen[lit.var] {
                    Some(s) if s == lit.sense => (),
                    Some(_) => tautology = true,
                    None => {
                        seen[lit.var] = Some(lit.sense);
                        lits.push(lit);
                    }
                }
            }
            for lit in lits.iter() {
                seen[lit.var] = None;
            }
            if tautology {
                debug!("drop a tautology: clause {i}");
                ins.num_tautologies += 1;
                continue 'next_clause;
            }
            if top_weight <= *weight {
                ins.num_hclauses += 1;
                ins.org_clause_weight.push(top_weight);
            } else {
                ins.num_sclauses += 1;
                ins.total_soft_weight += *weight;
                ins.org_clause_weight.push(*weight);
                match first_soft_weight {
                    None => first_soft_weight = Some(*weight),
                    Some(w) if w != *weight => ins.weighted = true,
                    _ => (),
                }
            }
            if lits.len() == 1 {
                ins.unit_clause.push(lits[0]);
            }
            ins.max_clause_length = ins.max_clause_length.max(lits.len());
            ins.min_clause_length = ins.min_clause_length.min(lits.len());
            for lit in lits.iter() {
                ins.var_lit[lit.var].push(*lit);
            }
            ins.clause_lit.push(lits);
        }
        ins.num_clauses = ins.clause_lit.len();
        if ins.num_clauses == 0 {
            ins.min_clause_length = 0;
        }
        ins.partial = 0 < ins.num_hclauses;
        ins.pure_sat = ins.num_sclauses == 0;
        debug!(
            "built {ins}, clause length:{}..={}",
            ins.min_clause_length, ins.max_clause_length
        );
        Ok(ins)
    }
    /// return the kind of clause `c`.
    #[inline]
    pub fn kind(&self, c: ClauseId) -> ClauseKind {
        if self.top_clause_weight <= self.org_clause_weight[c] {
            ClauseKind::Hard
        } else {
            ClauseKind::Soft
        }
    }
    #[inline]
    pub fn is_hard(&self, c: ClauseId) -> bool {
        self.kind(c) == ClauseKind::Hard
    }
    /// return `true` if the neighbor relation is available.
    pub fn has_neighbors(&self) -> bool {
        self.var_neighbor.len() == self.num_vars + 1
    }
    /// build `var_neighbor`.
    /// Return `false` and leave it empty if the number of entries exceeds `limit`.
    pub fn build_neighbor_relation(&mut self, limit: usize) -> bool {
        if self.has_neighbors() {
            return true;
        }
        let mut neighbor_flag: Vec<bool> = vec![false; self.num_vars + 1];
        let mut var_neighbor: Vec<Vec<VarId>> = Vec::with_capacity(self.num_vars + 1);
        var_neighbor.push(Vec::new());
        let mut total = 0;
        for v in 1..=self.num_vars {
            neighbor_flag[v] = true;
            let mut temp_neighbor: Vec<VarId> = Vec::new();
            for occ in self.var_lit[v].iter() {
                for lit in self.clause_lit[occ.clause].iter() {
                    if !neighbor_flag[lit.var] {
                        neighbor_flag[lit.var] = true;
                        temp_neighbor.push(lit.var);
                    }
                }
            }
            neighbor_flag[v] = false;
            for n in temp_neighbor.iter() {
                neighbor_flag[*n] = false;
            }
            total += temp_neighbor.len();
            if limit < total {
                debug!("give up the neighbor relation at var {v}: {total} entries");
                return false;
            }
            temp_neighbor.shrink_to_fit();
            var_neighbor.push(temp_neighbor);
        }
        debug!("neighbor relation: {total} entries");
        self.var_neighbor = var_neighbor;
        true
    }
    /// return the total weight of soft clauses falsified by `assign`, or
    /// the first falsified hard clause. `assign` is indexed by `VarId`.
    pub fn evaluate(&self, assign: &[bool]) -> Result<Weight, ClauseId> {
        let mut cost = 0;
        for (c, lits) in self.clause_lit.iter().enumerate() {
            if lits.iter().any(|l| l.is_satisfied_by(assign[l.var])) {
                continue;
            }
            if self.is_hard(c) {
                return Err(c);
            }
            cost += self.org_clause_weight[c];
        }
        Ok(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Instance {
        Instance::build_instance(3, 3, 10, &[(10, vec![1, 2]), (2, vec![-1]), (3, vec![-2])])
            .expect("a valid instance")
    }

    #[test]
    fn test_classification() {
        let ins = sample();
        assert_eq!(ins.num_clauses, 3);
        assert_eq!(ins.kind(0), ClauseKind::Hard);
        assert_eq!(ins.kind(1), ClauseKind::Soft);
        assert_eq!(ins.total_soft_weight, 5);
        assert!(ins.partial);
        assert!(!ins.pure_sat);
        assert!(ins.weighted);
        assert_eq!(ins.unit_clause.len(), 2);
        assert_eq!((ins.min_clause_length, ins.max_clause_length), (1, 2));
        assert!(ins.var_lit[3].is_empty());
        assert_eq!(ins.var_lit[2][0].clause, 0);
        assert_eq!(ins.var_lit[2][1].clause, 2);
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(
            Instance::build_instance(2, 1, 10, &[(1, vec![1, 3])]),
            Err(SolverError::InvalidLiteral { lit: 3, .. })
        ));
        assert!(matches!(
            Instance::build_instance(2, 1, 10, &[(1, vec![0])]),
            Err(SolverError::InvalidLiteral { lit: 0, .. })
        ));
        assert!(matches!(
            Instance::build_instance(2, 2, 10, &[(1, vec![1])]),
            Err(SolverError::InconsistentClauseCount {
                declared: 2,
                read: 1
            })
        ));
        assert!(matches!(
            Instance::build_instance(2, 1, 10, &[(1, vec![])]),
            Err(SolverError::EmptyClause(0))
        ));
    }

    #[test]
    fn test_tautology_and_duplication() {
        let ins = Instance::build_instance(
            3,
            3,
            5,
            &[(5, vec![1, -1, 2]), (1, vec![2, 2, -3]), (1, vec![3])],
        )
        .expect("a valid instance");
        assert_eq!(ins.num_tautologies, 1);
        assert_eq!(ins.num_clauses, 2);
        assert_eq!(i32s(&ins.clause_lit[0]), vec![2, -3]);
        assert_eq!(ins.clause_lit[1][0].clause, 1);
        assert!(!ins.partial);
        assert!(!ins.weighted);
    }

    #[test]
    fn test_neighbor_relation() {
        let mut ins = Instance::build_instance(
            4,
            3,
            10,
            &[(10, vec![1, 2]), (1, vec![-2, 3]), (1, vec![4])],
        )
        .expect("a valid instance");
        assert!(!ins.has_neighbors());
        assert!(!ins.build_neighbor_relation(2));
        assert!(!ins.has_neighbors());
        assert!(ins.build_neighbor_relation(100));
        assert_eq!(ins.var_neighbor[1], vec![2]);
        let mut n2 = ins.var_neighbor[2].clone();
        n2.sort_unstable();
        assert_eq!(n2, vec![1, 3]);
        assert!(ins.var_neighbor[4].is_empty());
    }

    #[test]
    fn test_evaluate() {
        let ins = sample();
        assert_eq!(ins.evaluate(&[false, true, false, false]), Ok(2));
        assert_eq!(ins.evaluate(&[false, false, true, false]), Ok(3));
        assert_eq!(ins.evaluate(&[false, false, false, false]), Err(0));
    }
}
