//! Module `state` prints progress messages and run statistics in the MaxSAT
//! competition format: `c` comments and `o` lines for improved costs.
use {
    crate::{
        instance::Instance,
        search::{LocalSearch, Stat},
        types::*,
    },
    std::{fmt, path::Path},
    tracing::info,
};

/// A record of an improvement: elapsed time, cost and #flips so far
pub type Improvement = (f64, Weight, usize);

/// Data storage for progress reporting.
#[derive(Clone, Debug, Default)]
pub struct State {
    /// don't print anything if `true`.
    pub quiet_mode: bool,
    /// the loaded instance
    pub target: WCNFDescription,
    /// the number of progress lines printed
    pub progress_cnt: usize,
    /// the elapsed time to print the next progress line
    next_progress: f64,
    /// the history of feasible costs
    improvements: Vec<Improvement>,
}

impl Instantiate<Instance> for State {
    fn instantiate(config: &Config, ins: &Instance) -> State {
        State {
            quiet_mode: config.quiet_mode,
            target: ins.description.clone(),
            progress_cnt: 0,
            next_progress: 1.0,
            improvements: Vec::new(),
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match &self.target.pathname {
            WCNFIndicator::File(path) => Path::new(path)
                .file_name()
                .map_or_else(|| path.clone(), |s| s.to_string_lossy().to_string()),
            WCNFIndicator::LitVec(n) => format!("a vec({n} clauses)"),
            WCNFIndicator::Void => "--".to_string(),
        };
        write!(
            f,
            "{name} ({} vars, {} clauses)",
            self.target.num_of_variables, self.target.num_of_clauses
        )
    }
}

impl State {
    /// print the instance statistics.
    pub fn progress_header(&self, ins: &Instance, sls: &LocalSearch) {
        if self.quiet_mode {
            return;
        }
        println!("c {self}");
        println!(
            "c  hard:{:>10}, soft:{:>10}, taut:{:>10}",
            ins.num_hclauses, ins.num_sclauses, ins.num_tautologies,
        );
        println!(
            "c  top:{:>11}, total soft weight:{:>10}",
            ins.top_clause_weight, ins.total_soft_weight,
        );
        println!(
            "c  clause length:{}..={}, weighted:{}, strategy:{}, h_inc:{}, soft cap:{}",
            ins.min_clause_length,
            ins.max_clause_length,
            ins.weighted,
            sls.strategy(),
            sls.params().h_inc,
            sls.params().softclause_weight_threshold,
        );
    }
    /// record an improved feasible cost and print an `o` line.
    pub fn report_best(&mut self, sls: &LocalSearch) {
        let cost = sls.opt_unsat_weight();
        let time = sls.opt_time();
        self.improvements.push((time, cost, sls[Stat::Flip]));
        info!("cost {cost} at {time:.3}s, try {}, step {}", sls.tries(), sls.step());
        if !self.quiet_mode {
            println!("o {cost}");
        }
    }
    /// print a progress line once in a while; the interval doubles every time.
    pub fn progress(&mut self, sls: &LocalSearch) {
        let elapsed = sls.elapsed();
        if self.quiet_mode || elapsed < self.next_progress {
            return;
        }
        self.next_progress = 2.0 * elapsed;
        self.progress_cnt += 1;
        println!(
            "c |time:{:>9.2}, try:{:>8}, flip:{:>12}, best:{:>10}, hard unsat:{:>6}",
            elapsed,
            sls[Stat::Try],
            sls[Stat::Flip],
            self.best_cost_str(sls),
            sls.best_hard_unsat(),
        );
    }
    /// print run statistics.
    pub fn dump_stats(&self, sls: &LocalSearch) {
        if self.quiet_mode {
            return;
        }
        println!(
            "c  #try:{:>12}, #flip:{:>14}, #decimation:{:>8}",
            sls[Stat::Try],
            sls[Stat::Flip],
            sls[Stat::Decimation],
        );
        println!(
            "c  #increase:{:>8}, #smooth:{:>12}, #walk:{:>14}, #pick:{:>8}",
            sls[Stat::Increase],
            sls[Stat::Smooth],
            sls[Stat::RandomWalk],
            sls[Stat::RandomPick],
        );
        println!(
            "c  best:{:>12}, found at:{:>9.3}s, #improve:{:>8}, elapsed:{:>9.3}s",
            self.best_cost_str(sls),
            sls.opt_time(),
            sls[Stat::Improvement],
            sls.elapsed(),
        );
    }
    pub fn improvements(&self) -> &[Improvement] {
        &self.improvements
    }
    fn best_cost_str(&self, sls: &LocalSearch) -> String {
        if sls.best_soln_feasible() {
            sls.opt_unsat_weight().to_string()
        } else {
            "--".to_string()
        }
    }
}
