/// Crate `config` provides solver's configuration and CLI.
use {
    clap::{Parser, ValueEnum},
    std::path::PathBuf,
};

/// The way the goodvar stack is refreshed after each flip.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum StrategyKind {
    /// use the neighbor relation if it fits in `neighbor_limit`
    #[default]
    Auto,
    /// rescan the neighbors of the flipped var
    Neighbor,
    /// rescan the vars whose score changed
    ScoreChange,
}

/// Configuration built from command line options
#[derive(Clone, Debug, Parser)]
#[command(name = "slmax", version, about = "A stochastic local search solver for weighted partial MaxSAT")]
pub struct Config {
    //
    //## I/O configuration
    //
    /// WCNF (or CNF) file
    pub wcnf_file: Option<PathBuf>,

    /// Disable any progress message
    #[arg(short = 'q', long = "quiet")]
    pub quiet_mode: bool,

    /// Also write the best model to this file
    #[arg(short = 'r', long = "result")]
    pub result_file: Option<PathBuf>,

    /// Log filter for diagnostics on stderr
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    //
    //## search limits
    //
    /// #tries (restarts)
    #[arg(long, default_value_t = 100_000_000)]
    pub max_tries: usize,

    /// #flips in a try
    #[arg(long, default_value_t = 200_000_000)]
    pub max_flips: usize,

    /// #flips without improvement to end a try
    #[arg(long, default_value_t = 10_000_000)]
    pub max_non_improve_flip: usize,

    /// Wall-clock limit in sec.
    #[arg(short = 't', long = "timeout", default_value_t = 300.0)]
    pub cutoff_time: f64,

    //
    //## heuristics
    //
    /// Random walk probability
    #[arg(long, default_value_t = 0.1)]
    pub rwprob: f64,

    /// Random goodvar pick probability
    #[arg(long, default_value_t = 0.01)]
    pub rdprob: f64,

    /// Weight smoothing probability
    #[arg(long, default_value_t = 0.01)]
    pub smooth_probability: f64,

    /// Hard clause weight increment [default: 1, or 3 if weighted]
    #[arg(long)]
    pub h_inc: Option<i64>,

    /// Sample size of best-from-multiple-selections
    #[arg(long, default_value_t = 15)]
    pub hd_count_threshold: usize,

    /// #weighted hard clauses needed to smooth
    #[arg(long, default_value_t = 0)]
    pub large_clause_count_threshold: usize,

    /// Cap of soft clause weights [default: 400, or 500 if weighted]
    #[arg(long)]
    pub softclause_weight_threshold: Option<i64>,

    /// Goodvar maintenance strategy
    #[arg(long, value_enum, default_value_t = StrategyKind::Auto)]
    pub strategy: StrategyKind,

    /// Max #entries of the neighbor relation for 'auto'
    #[arg(long, default_value_t = 50_000_000)]
    pub neighbor_limit: usize,

    /// Build initial assignments by decimation
    #[arg(long)]
    pub decimation: bool,

    /// Random seed
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            wcnf_file: None,
            quiet_mode: true,
            result_file: None,
            log_level: "warn".to_string(),
            max_tries: 100_000_000,
            max_flips: 200_000_000,
            max_non_improve_flip: 10_000_000,
            cutoff_time: 300.0,
            rwprob: 0.1,
            rdprob: 0.01,
            smooth_probability: 0.01,
            h_inc: None,
            hd_count_threshold: 15,
            large_clause_count_threshold: 0,
            softclause_weight_threshold: None,
            strategy: StrategyKind::Auto,
            neighbor_limit: 50_000_000,
            decimation: false,
            seed: 0,
        }
    }
}

impl<T> From<T> for Config
where
    PathBuf: From<T>,
{
    fn from(path: T) -> Config {
        Config {
            wcnf_file: Some(PathBuf::from(path)),
            ..Config::default()
        }
    }
}

impl Config {
    /// return the hard clause increment for an instance.
    pub fn h_inc_for(&self, weighted: bool) -> i64 {
        self.h_inc.unwrap_or(if weighted { 3 } else { 1 })
    }
    /// return the soft clause weight cap for an instance.
    pub fn softclause_weight_threshold_for(&self, weighted: bool) -> i64 {
        self.softclause_weight_threshold
            .unwrap_or(if weighted { 500 } else { 400 })
    }
}
