use {
    super::{SolverError, Weight, WeightedClause},
    std::{
        fmt,
        fs::File,
        io::{BufRead, BufReader},
        path::Path,
    },
};

/// Instance locator
#[derive(Clone, Debug, Default)]
pub enum WCNFIndicator {
    /// not specified
    #[default]
    Void,
    /// from a file
    File(String),
    /// embedded directly
    LitVec(usize),
}

impl fmt::Display for WCNFIndicator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WCNFIndicator::Void => write!(f, "No instance specified"),
            WCNFIndicator::File(file) => write!(f, "WCNF file({file})"),
            WCNFIndicator::LitVec(n) => write!(f, "A vec({n} clauses)"),
        }
    }
}

/// Dialects of the input format.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum WCNFFormat {
    /// `p cnf nv nc`: every clause is a soft clause of weight 1.
    Cnf,
    /// `p wcnf nv nc [top]`: clauses weighted `top` or more are hard.
    #[default]
    Wcnf,
    /// no header; hard clauses start with `h`.
    Wcnf2022,
}

/// Data storage about a problem.
#[derive(Clone, Debug, Default)]
pub struct WCNFDescription {
    pub num_of_variables: usize,
    pub num_of_clauses: usize,
    /// the declared top weight. `None` means there is no hard clause.
    pub top_weight: Option<Weight>,
    pub format: WCNFFormat,
    pub pathname: WCNFIndicator,
}

impl fmt::Display for WCNFDescription {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let WCNFDescription {
            num_of_variables: nv,
            num_of_clauses: nc,
            top_weight,
            pathname: path,
            ..
        } = &self;
        match top_weight {
            Some(top) => write!(f, "WCNF({nv}, {nc}, top:{top}, {path})"),
            None => write!(f, "WCNF({nv}, {nc}, {path})"),
        }
    }
}

impl From<&[WeightedClause]> for WCNFDescription {
    /// count vars and clauses. A clause weighted `Weight::MAX` is hard.
    fn from(vec: &[WeightedClause]) -> Self {
        let num_of_variables = vec
            .iter()
            .map(|(_, lits)| lits.iter().map(|l| l.unsigned_abs()).max().unwrap_or(0))
            .max()
            .unwrap_or(0) as usize;
        WCNFDescription {
            num_of_variables,
            num_of_clauses: vec.len(),
            top_weight: None,
            format: WCNFFormat::Wcnf,
            pathname: WCNFIndicator::LitVec(vec.len()),
        }
    }
}

/// A wrapper structure to make a WCNFDescription from a file.
/// To make WCNFDescription clone-able, a BufReader should be separated from it.
#[derive(Debug)]
pub struct WCNFReader {
    pub wcnf: WCNFDescription,
    pub reader: BufReader<File>,
    /// the first clause line in a header-less file, read while looking for a header.
    pending: Option<(usize, String)>,
    line: usize,
}

impl TryFrom<&Path> for WCNFReader {
    type Error = SolverError;
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let pathname = if path.to_string_lossy().is_empty() {
            "--".to_string()
        } else {
            path.file_name().map_or("aStrangeNamed".to_string(), |f| {
                f.to_string_lossy().into_owned()
            })
        };
        let fs = File::open(path)?;
        let mut reader = BufReader::new(fs);
        let mut buf = String::new();
        let mut line = 0;
        let mut wcnf = WCNFDescription {
            pathname: WCNFIndicator::File(pathname),
            ..WCNFDescription::default()
        };
        loop {
            buf.clear();
            if reader.read_line(&mut buf)? == 0 {
                // an empty instance in the 2022 format
                wcnf.format = WCNFFormat::Wcnf2022;
                return Ok(WCNFReader {
                    wcnf,
                    reader,
                    pending: None,
                    line,
                });
            }
            line += 1;
            let trimmed = buf.trim();
            if trimmed.is_empty() || trimmed.starts_with('c') {
                continue;
            }
            let mut iter = trimmed.split_whitespace();
            if iter.next() != Some("p") {
                wcnf.format = WCNFFormat::Wcnf2022;
                return Ok(WCNFReader {
                    wcnf,
                    reader,
                    pending: Some((line, trimmed.to_string())),
                    line,
                });
            }
            wcnf.format = match iter.next() {
                Some("cnf") => WCNFFormat::Cnf,
                Some("wcnf") => WCNFFormat::Wcnf,
                _ => return Err(SolverError::InvalidHeader(trimmed.to_string())),
            };
            let mut number = || {
                iter.next()
                    .and_then(|s| s.parse::<u64>().ok())
                    .ok_or_else(|| SolverError::InvalidHeader(trimmed.to_string()))
            };
            wcnf.num_of_variables = number()? as usize;
            wcnf.num_of_clauses = number()? as usize;
            if wcnf.format == WCNFFormat::Wcnf {
                wcnf.top_weight = number().ok();
            }
            return Ok(WCNFReader {
                wcnf,
                reader,
                pending: None,
                line,
            });
        }
    }
}

impl WCNFReader {
    /// read all clauses. Counts are checked against the header if there is one;
    /// a header-less file gets its counts from the data.
    /// The returned description always has a resolved `top_weight`.
    pub fn read_clauses(mut self) -> Result<(WCNFDescription, Vec<WeightedClause>), SolverError> {
        let mut clauses: Vec<WeightedClause> = Vec::new();
        let mut hard: Vec<bool> = Vec::new();
        if let Some((line, text)) = self.pending.take() {
            self.parse_line(line, &text, &mut clauses, &mut hard)?;
        }
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                break;
            }
            self.line += 1;
            let text = buf.trim().to_string();
            if text.is_empty() || text.starts_with('c') {
                continue;
            }
            self.parse_line(self.line, &text, &mut clauses, &mut hard)?;
        }
        let WCNFReader { mut wcnf, .. } = self;
        match wcnf.format {
            WCNFFormat::Wcnf2022 => {
                wcnf.num_of_clauses = clauses.len();
                wcnf.num_of_variables = clauses
                    .iter()
                    .map(|(_, c)| c.iter().map(|l| l.unsigned_abs()).max().unwrap_or(0))
                    .max()
                    .unwrap_or(0) as usize;
                let top = 1 + hard
                    .iter()
                    .zip(clauses.iter())
                    .filter(|(h, _)| !**h)
                    .map(|(_, (w, _))| *w)
                    .sum::<Weight>();
                for ((w, _), _) in clauses.iter_mut().zip(hard.iter()).filter(|(_, h)| **h) {
                    *w = top;
                }
                wcnf.top_weight = Some(top);
            }
            WCNFFormat::Cnf | WCNFFormat::Wcnf => {
                if wcnf.num_of_clauses != clauses.len() {
                    return Err(SolverError::InconsistentClauseCount {
                        declared: wcnf.num_of_clauses,
                        read: clauses.len(),
                    });
                }
                if wcnf.top_weight.is_none() {
                    wcnf.top_weight = Some(1 + clauses.iter().map(|(w, _)| *w).sum::<Weight>());
                }
            }
        }
        Ok((wcnf, clauses))
    }
    fn parse_line(
        &self,
        line: usize,
        text: &str,
        clauses: &mut Vec<WeightedClause>,
        hard: &mut Vec<bool>,
    ) -> Result<(), SolverError> {
        let mut iter = text.split_whitespace().peekable();
        let weight = match self.wcnf.format {
            WCNFFormat::Cnf => 1,
            WCNFFormat::Wcnf2022 if iter.peek() == Some(&"h") => {
                iter.next();
                hard.push(true);
                0
            }
            WCNFFormat::Wcnf | WCNFFormat::Wcnf2022 => {
                let token = iter.next().unwrap_or_default();
                let w = token.parse::<Weight>().map_err(|_| SolverError::ParseError {
                    line,
                    token: token.to_string(),
                })?;
                hard.push(false);
                w
            }
        };
        let mut lits: Vec<i32> = Vec::new();
        for token in iter {
            match token.parse::<i32>() {
                Ok(0) => break,
                Ok(l) => lits.push(l),
                Err(_) => {
                    return Err(SolverError::ParseError {
                        line,
                        token: token.to_string(),
                    })
                }
            }
        }
        clauses.push((weight, lits));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_classic_wcnf() {
        let reader = WCNFReader::try_from(Path::new("wcnfs/sample.wcnf")).expect("can't open");
        assert_eq!(reader.wcnf.format, WCNFFormat::Wcnf);
        let (wcnf, clauses) = reader.read_clauses().expect("can't read");
        assert_eq!(wcnf.top_weight, Some(10));
        assert_eq!(
            clauses,
            vec![(10, vec![1, 2]), (2, vec![-1]), (3, vec![-2])]
        );
    }

    #[test]
    fn test_read_2022_format() {
        let reader = WCNFReader::try_from(Path::new("wcnfs/sample2022.wcnf")).expect("can't open");
        assert_eq!(reader.wcnf.format, WCNFFormat::Wcnf2022);
        let (wcnf, clauses) = reader.read_clauses().expect("can't read");
        assert_eq!(wcnf.num_of_variables, 2);
        assert_eq!(wcnf.num_of_clauses, 3);
        assert_eq!(wcnf.top_weight, Some(6));
        assert_eq!(clauses[0], (6, vec![1, 2]));
    }

    #[test]
    fn test_read_cnf_as_maxsat() {
        let reader = WCNFReader::try_from(Path::new("wcnfs/uf8.cnf")).expect("can't open");
        let (wcnf, clauses) = reader.read_clauses().expect("can't read");
        assert_eq!(wcnf.format, WCNFFormat::Cnf);
        assert!(clauses.iter().all(|(w, _)| *w == 1));
        assert_eq!(wcnf.top_weight, Some(1 + clauses.len() as Weight));
    }

    #[test]
    fn test_clause_count_mismatch() {
        let reader = WCNFReader::try_from(Path::new("wcnfs/broken-count.wcnf")).expect("can't open");
        assert!(matches!(
            reader.read_clauses(),
            Err(SolverError::InconsistentClauseCount {
                declared: 4,
                read: 3
            })
        ));
    }
}
