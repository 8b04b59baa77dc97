//! The six-column CSV wire format.
//!
//! Records carry `idstatefrom, idaction, idoutcome, idstateto, probability,
//! reward`, one per line, comma-separated. Import replays every record
//! through [`Rmdp::add_transition`], so grow-on-write applies and state ids
//! may appear in any order. Outcome mixing distributions and thresholds are
//! deliberately not part of the format: a round-trip preserves the
//! transition tensor and resets distributions and thresholds to their
//! defaults. Full-fidelity persistence goes through the serde derives
//! instead.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::ModelError;
use crate::rmdp::Rmdp;

/// The header line written by [`Rmdp::to_csv`]. On import the names are
/// informational; only the column order is enforced.
pub const CSV_HEADER: &str = "idstatefrom,idaction,idoutcome,idstateto,probability,reward";

fn parse_id(field: &str, position: usize, line: usize) -> Result<usize, ModelError> {
    field.trim().parse::<usize>().map_err(|_| ModelError::Parse {
        line,
        reason: format!("field {} is not a non-negative id: {:?}", position, field),
    })
}

fn parse_real(field: &str, position: usize, line: usize) -> Result<f64, ModelError> {
    field.trim().parse::<f64>().map_err(|_| ModelError::Parse {
        line,
        reason: format!("field {} is not a number: {:?}", position, field),
    })
}

fn parse_record(
    text: &str,
    line: usize,
) -> Result<(usize, usize, usize, usize, f64, f64), ModelError> {
    let fields: Vec<&str> = text.split(',').collect();
    if fields.len() != 6 {
        return Err(ModelError::Parse {
            line,
            reason: format!("expected 6 fields, found {}", fields.len()),
        });
    }
    Ok((
        parse_id(fields[0], 1, line)?,
        parse_id(fields[1], 2, line)?,
        parse_id(fields[2], 3, line)?,
        parse_id(fields[3], 4, line)?,
        parse_real(fields[4], 5, line)?,
        parse_real(fields[5], 6, line)?,
    ))
}

impl Rmdp {
    /// Load a process from CSV records.
    ///
    /// With `header` set, the first line is skipped without validating the
    /// column names. A blank (or whitespace-only) line terminates parsing;
    /// anything else that is not a well-formed record is a
    /// [`ModelError::Parse`] carrying the 1-based line number.
    pub fn from_csv<R: BufRead>(input: R, header: bool) -> Result<Self, ModelError> {
        let mut mdp = Rmdp::new();
        let mut lineno = 0usize;

        for line in input.lines() {
            let line = line?;
            lineno += 1;
            if header && lineno == 1 {
                continue;
            }
            if line.trim().is_empty() {
                break;
            }
            let (fromid, actionid, outcomeid, toid, probability, reward) =
                parse_record(&line, lineno)?;
            mdp.add_transition(fromid, actionid, outcomeid, toid, probability, reward)?;
        }
        Ok(mdp)
    }

    /// Write the transition tensor as CSV records.
    ///
    /// The walk is lexicographic in (state, action, outcome, branch).
    /// Actions and outcomes without branches produce no records, so a
    /// process with gaps round-trips to a different shape (the branches
    /// themselves are preserved).
    pub fn to_csv<W: Write>(&self, output: &mut W, header: bool) -> Result<(), ModelError> {
        if header {
            writeln!(output, "{}", CSV_HEADER)?;
        }
        for (i, state) in self.states.iter().enumerate() {
            for (j, action) in state.actions.iter().enumerate() {
                for (k, outcome) in action.outcomes.iter().enumerate() {
                    for l in 0..outcome.len() {
                        writeln!(
                            output,
                            "{},{},{},{},{},{}",
                            i,
                            j,
                            k,
                            outcome.indices[l],
                            outcome.probabilities[l],
                            outcome.rewards[l]
                        )?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Load a process from a CSV file.
    pub fn from_csv_file<P: AsRef<Path>>(path: P, header: bool) -> Result<Self, ModelError> {
        let file = File::open(path)?;
        Self::from_csv(BufReader::new(file), header)
    }

    /// Save the transition tensor to a CSV file.
    pub fn to_csv_file<P: AsRef<Path>>(&self, path: P, header: bool) -> Result<(), ModelError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_csv(&mut writer, header)?;
        writer.flush()?;
        Ok(())
    }
}
