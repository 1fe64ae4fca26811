use {
    super::{ClauseId, VarId},
    std::fmt,
};

/// An occurrence of a var in a clause.
/// The same value is stored in both the clause-side and the var-side incidence lists.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Lit {
    /// the clause containing it
    pub clause: ClauseId,
    /// the var, starting with one
    pub var: VarId,
    /// `true` for a positive literal
    pub sense: bool,
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}L@{}", i32::from(self), self.clause)
    }
}

impl From<(ClauseId, i32)> for Lit {
    #[inline]
    fn from((clause, l): (ClauseId, i32)) -> Self {
        Lit {
            clause,
            var: l.unsigned_abs() as VarId,
            sense: 0 < l,
        }
    }
}

impl From<&Lit> for i32 {
    #[inline]
    fn from(l: &Lit) -> i32 {
        if l.sense {
            l.var as i32
        } else {
            -(l.var as i32)
        }
    }
}

impl From<Lit> for i32 {
    #[inline]
    fn from(l: Lit) -> i32 {
        i32::from(&l)
    }
}

impl Lit {
    /// return `true` if the literal is satisfied by the value of its var.
    #[inline]
    pub fn is_satisfied_by(&self, value: bool) -> bool {
        self.sense == value
    }
}

/// convert literals to `[i32]` (for debug).
pub fn i32s(v: &[Lit]) -> Vec<i32> {
    v.iter().map(i32::from).collect::<Vec<_>>()
}
