/*!
# A stochastic local search solver for weighted partial MaxSAT in Rust

`slmax` searches for an assignment satisfying every hard clause while minimizing
the total weight of falsified soft clauses. It flips one var at a time, guided by
scores maintained incrementally under dynamic clause weights.

## Examples

#### Solve a WCNF file

```
use slmax::*;

let config = Config {
    max_tries: 10,
    max_flips: 2000,
    ..Config::from("wcnfs/sample.wcnf")
};
let mut s = Solver::build(&config).expect("can't load");
if let Ok(Certificate::Feasible { cost, model }) = s.solve() {
    assert_eq!(cost, 2);
    assert_eq!(&model[..2], &[1, -2]);
}
```

#### Solve clauses on memory

```
use slmax::*;

let clauses: Vec<WeightedClause> = vec![(Weight::MAX, vec![1, 2]), (1, vec![-1]), (1, vec![-2])];
let config = Config {
    max_tries: 10,
    max_flips: 1000,
    ..Config::default()
};
let mut s = Solver::try_from((config, clauses.as_slice())).expect("a valid instance");
assert_eq!(s.solve().ok().and_then(|c| c.cost()), Some(1));
```
*/
/// Module `config` provides solver's configuration and CLI.
pub mod config;
/// Module `instance` provides the immutable instance model.
pub mod instance;
/// Module `primitive` provides generic building blocks.
pub mod primitive;
/// Module `search` provides the local search engine.
pub mod search;
/// Module `solver` provides the top-level API as a MaxSAT solver.
pub mod solver;
/// Module `state` prints progress and statistics.
pub mod state;
/// Module `types` provides various building blocks, including some common traits.
pub mod types;

pub use {
    config::Config,
    instance::{ClauseProducer, Instance, InstanceBuilder},
    solver::{Certificate, SolveIF, Solver, SolverBuildIF, SolverResult},
    types::{SolverError, Weight, WeightedClause},
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
