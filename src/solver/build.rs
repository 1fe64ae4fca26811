//! Solver Builder
use {
    super::Solver,
    crate::{
        config::StrategyKind,
        instance::{Instance, InstanceBuilder},
        search::LocalSearch,
        state::State,
        types::*,
    },
    std::{io, path::Path},
    tracing::debug,
};

/// API for Solver construction.
pub trait SolverBuildIF {
    /// make a solver for the instance file in `config`.
    ///
    /// # Errors
    ///
    /// * `SolverError::IOError` if it failed to read the file.
    /// * the other loading errors if the file is malformed.
    ///
    /// ```
    /// use slmax::{config::Config, solver::*};
    ///
    /// let config = Config::from("wcnfs/sample.wcnf");
    /// assert!(Solver::build(&config).is_ok());
    ///```
    fn build(config: &Config) -> Result<Solver, SolverError>;
    /// make a solver for an instance.
    /// The neighbor relation is built here if the strategy in `config` needs it.
    fn instantiate(config: &Config, ins: Instance) -> Solver;
}

impl SolverBuildIF for Solver {
    fn build(config: &Config) -> Result<Solver, SolverError> {
        let path = config.wcnf_file.as_ref().ok_or_else(|| {
            SolverError::IOError(io::Error::new(
                io::ErrorKind::NotFound,
                "no instance file is given",
            ))
        })?;
        let ins = Instance::try_from(path.as_path())?;
        Ok(Solver::instantiate(config, ins))
    }
    fn instantiate(config: &Config, mut ins: Instance) -> Solver {
        match config.strategy {
            StrategyKind::Neighbor => {
                ins.build_neighbor_relation(usize::MAX);
            }
            StrategyKind::Auto => {
                if !ins.build_neighbor_relation(config.neighbor_limit) {
                    debug!(
                        "the neighbor relation exceeds {}; switch to score-change",
                        config.neighbor_limit
                    );
                }
            }
            StrategyKind::ScoreChange => (),
        }
        let sls = LocalSearch::instantiate(config, &ins);
        let state = State::instantiate(config, &ins);
        debug!("{ins} with the {} strategy", sls.strategy());
        Solver {
            ins,
            sls,
            state,
            decimation: config.decimation,
        }
    }
}

impl TryFrom<(Config, &[WeightedClause])> for Solver {
    type Error = SolverError;
    /// make a solver for clauses on memory. A clause weighted `Weight::MAX` is hard.
    fn try_from((config, vec): (Config, &[WeightedClause])) -> Result<Self, Self::Error> {
        let wcnf = WCNFDescription::from(vec);
        let mut builder = InstanceBuilder::new(wcnf.num_of_variables);
        builder.add_from(vec)?;
        let ins = builder.build()?;
        Ok(Solver::instantiate(&config, ins))
    }
}

impl TryFrom<&Path> for Solver {
    type Error = SolverError;
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        Solver::build(&Config::from(path))
    }
}

impl TryFrom<&str> for Solver {
    type Error = SolverError;
    /// return a new solver build for a WCNF file.
    ///
    /// # Example
    /// ```
    /// use slmax::solver::Solver;
    ///
    /// let s = Solver::try_from("wcnfs/sample.wcnf").expect("fail to load");
    /// assert_eq!(s.ins.num_hclauses, 1);
    ///```
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Solver::build(&Config::from(s))
    }
}
