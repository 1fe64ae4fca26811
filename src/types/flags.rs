use bitflags::bitflags;

/// API for object properties.
pub trait FlagIF {
    type FlagType;
    /// return true if the flag in on.
    fn is(&self, flag: Self::FlagType) -> bool;
    /// set the flag.
    fn set(&mut self, f: Self::FlagType, b: bool);
    /// toggle the flag off.
    fn turn_off(&mut self, flag: Self::FlagType);
    /// toggle the flag on.
    fn turn_on(&mut self, flag: Self::FlagType);
}

bitflags! {
    /// Misc flags used by [`Clause`](`crate::search::Clause`).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
    pub struct FlagClause: u8 {
        /// a hard clause whose weight was raised over its floor.
        const LARGE_WEIGHT      = 0b0000_0001;
        /// a soft clause whose weight was raised over its floor.
        const SOFT_LARGE_WEIGHT = 0b0000_0010;
    }
}

bitflags! {
    /// Misc flags used by [`Var`](`crate::search::Var`).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
    pub struct FlagVar: u8 {
        /// its score was modified during the current flip.
        const SCORE_CHANGED = 0b0000_0001;
        /// its configuration changed since its last flip; a var without it is tabu.
        const CONF_CHANGED  = 0b0000_0010;
    }
}

macro_rules! impl_flag_if {
    ($target: ty, $flag: ty) => {
        impl FlagIF for $target {
            type FlagType = $flag;
            #[inline]
            fn is(&self, flag: Self::FlagType) -> bool {
                self.flags.contains(flag)
            }
            #[inline]
            fn set(&mut self, f: Self::FlagType, b: bool) {
                self.flags.set(f, b);
            }
            #[inline]
            fn turn_off(&mut self, flag: Self::FlagType) {
                self.flags.remove(flag);
            }
            #[inline]
            fn turn_on(&mut self, flag: Self::FlagType) {
                self.flags.insert(flag);
            }
        }
    };
}

impl_flag_if!(crate::search::Var, FlagVar);
impl_flag_if!(crate::search::Clause, FlagClause);
