//! Weighted Model Checker in Rust
use {
    clap::Parser,
    slmax::{Instance, SolverError, VERSION},
    std::{
        io::{stdin, BufRead, BufReader},
        path::PathBuf,
        process::exit,
    },
};

/// Check an assignment given by `v` lines on stdin against a WCNF file.
#[derive(Debug, Parser)]
#[command(name = "wmcr", version = VERSION)]
struct TargetOpts {
    /// WCNF (or CNF) file
    problem: PathBuf,
}

fn main() {
    let args = TargetOpts::parse();
    let ins = match Instance::try_from(args.problem.as_path()) {
        Ok(ins) => ins,
        Err(e) => {
            println!("Failed to load {}: {e}", args.problem.display());
            exit(1);
        }
    };
    let assign = match read_assignment(BufReader::new(stdin()), ins.num_vars) {
        Ok(assign) => assign,
        Err(e) => {
            println!("Invalid assignment: {e}");
            exit(1);
        }
    };
    match ins.evaluate(&assign) {
        Ok(cost) => {
            println!(
                "A feasible assignment for {} with cost {cost}.",
                args.problem.display()
            );
        }
        Err(c) => {
            println!(
                "An infeasible assignment for {} due to hard clause {c}: {:?}.",
                args.problem.display(),
                slmax::types::i32s(&ins.clause_lit[c]),
            );
            exit(1);
        }
    }
}

/// collect literals on `v` lines. Unmentioned vars are false.
fn read_assignment<R: BufRead>(reader: R, num_vars: usize) -> Result<Vec<bool>, SolverError> {
    let mut assign = vec![false; num_vars + 1];
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let Some(body) = line.strip_prefix('v') else {
            continue;
        };
        for token in body.split_whitespace() {
            let l = token.parse::<i32>().map_err(|_| SolverError::ParseError {
                line: i + 1,
                token: token.to_string(),
            })?;
            if l == 0 {
                break;
            }
            let v = l.unsigned_abs() as usize;
            if num_vars < v {
                return Err(SolverError::InvalidAssignment(format!(
                    "var {v} is out of range 1..={num_vars}"
                )));
            }
            assign[v] = 0 < l;
        }
    }
    Ok(assign)
}
