/// explicit timing state owned by a driver
pub mod clock;
/// dense stacks with a reverse index
pub mod index_stack;

pub use self::{clock::*, index_stack::*};
