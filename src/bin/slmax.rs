//! A stochastic local search solver for weighted partial MaxSAT
use {
    clap::Parser,
    slmax::{Certificate, Config, SolveIF, Solver, SolverBuildIF, VERSION},
    std::{
        fs::File,
        io::{self, BufWriter, Write},
        process::exit,
    },
    tracing_subscriber::EnvFilter,
};

fn main() {
    let config = Config::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_writer(io::stderr)
        .init();
    if config.wcnf_file.is_none() {
        eprintln!("slmax {VERSION}: no instance file is given; try --help");
        exit(1);
    }
    let mut s = match Solver::build(&config) {
        Ok(s) => s,
        Err(e) => {
            println!("c {e}");
            println!("s UNKNOWN");
            exit(1);
        }
    };
    let result = s.solve();
    let code = match report(&s, &result, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("failed to write: {e}");
            1
        }
    };
    exit(code);
}

fn report(
    s: &Solver,
    result: &Result<Certificate, slmax::SolverError>,
    config: &Config,
) -> io::Result<i32> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !config.quiet_mode {
        let mut line: Vec<u8> = Vec::new();
        s.simple_print(&mut line)?;
        write!(out, "c {}", String::from_utf8_lossy(&line))?;
    }
    let code = match result {
        Ok(Certificate::Optimum { .. }) => {
            writeln!(out, "s OPTIMUM FOUND")?;
            s.print_best_solution(&mut out)?;
            30
        }
        Ok(Certificate::Feasible { .. }) => {
            writeln!(out, "s SATISFIABLE")?;
            s.print_best_solution(&mut out)?;
            10
        }
        Ok(Certificate::Unknown { hard_unsat, .. }) => {
            writeln!(out, "c the best assignment falsifies {hard_unsat} hard clauses")?;
            writeln!(out, "s UNKNOWN")?;
            0
        }
        Err(e) => {
            writeln!(out, "c {e}")?;
            writeln!(out, "s UNKNOWN")?;
            1
        }
    };
    if let Some(path) = &config.result_file {
        let mut buf = BufWriter::new(File::create(path)?);
        s.simple_print(&mut buf)?;
        s.print_best_solution(&mut buf)?;
        buf.flush()?;
    }
    Ok(code)
}
