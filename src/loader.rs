//! Process table loading.
//!
//! The table is a stream of unsigned decimal integers: a count `N`, then `N`
//! triples of `pid arrival_time burst_time`. Any byte that is not an ASCII
//! digit separates integers, so whitespace, commas or labels all work.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    core::state::Ticks,
    sim::job::{Job, Pid},
};

const EINVAL: i32 = 22;

// Upper bound on the up-front allocation; a bogus count fails on EOF instead
const MAX_PREALLOCATED_JOBS: usize = 1 << 16;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read process table: {0}")]
    Read(#[from] io::Error),

    #[error("reached end of file while looking for another integer")]
    UnexpectedEof,

    #[error("integer in process table does not fit in 32 bits")]
    Overflow,

    #[error("invalid quantum {0:?}: expected an unsigned decimal integer")]
    InvalidQuantum(String),
}

impl LoadError {
    /// Process exit status for this error: the OS error code for I/O
    /// failures, `EINVAL` for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Open { source, .. } | Self::Read(source) => {
                source.raw_os_error().unwrap_or(EINVAL)
            }
            Self::UnexpectedEof | Self::Overflow | Self::InvalidQuantum(_) => EINVAL,
        }
    }
}

struct IntScanner<R> {
    reader: R,
}

impl<R: BufRead> IntScanner<R> {
    fn new(reader: R) -> Self {
        Self { reader }
    }

    fn next_int(&mut self) -> Result<u32, LoadError> {
        let mut current: Option<u32> = None;

        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            // A digit run cut short by end of input still counts
            if buf.is_empty() {
                return current.ok_or(LoadError::UnexpectedEof);
            }

            let mut consumed = 0;
            let mut finished = false;
            for &byte in buf {
                if byte.is_ascii_digit() {
                    let digit = u32::from(byte - b'0');
                    let value = current
                        .unwrap_or(0)
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(digit))
                        .ok_or(LoadError::Overflow)?;
                    current = Some(value);
                } else if current.is_some() {
                    finished = true;
                    break;
                }
                consumed += 1;
            }

            self.reader.consume(consumed);
            if finished {
                return current.ok_or(LoadError::UnexpectedEof);
            }
        }
    }
}

/// Parses a process table from any buffered reader.
///
/// Duplicate pids are accepted as-is; each one is logged.
pub fn parse_processes<R: BufRead>(reader: R) -> Result<Vec<Job>, LoadError> {
    let mut scanner = IntScanner::new(reader);
    let count = scanner.next_int()? as usize;

    let mut jobs = Vec::with_capacity(count.min(MAX_PREALLOCATED_JOBS));
    let mut seen: FxHashSet<Pid> = FxHashSet::default();
    for _ in 0..count {
        let pid = scanner.next_int()?;
        let arrival_time = scanner.next_int()?;
        let burst_time = scanner.next_int()?;

        if !seen.insert(pid) {
            warn!(pid, "duplicate pid in process table");
        }
        jobs.push(Job::new(pid, Ticks::from(arrival_time), Ticks::from(burst_time)));
    }

    debug!(count, "loaded process table");
    Ok(jobs)
}

pub fn load_processes(path: impl AsRef<Path>) -> Result<Vec<Job>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_processes(BufReader::new(file))
}

/// Parses the quantum argument. Every character must be a decimal digit;
/// the empty string is quantum 0.
pub fn parse_quantum(arg: &str) -> Result<Ticks, LoadError> {
    let invalid = || LoadError::InvalidQuantum(arg.to_owned());
    let quantum = arg.bytes().try_fold(0u32, |acc, byte| {
        if !byte.is_ascii_digit() {
            return Err(invalid());
        }
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(byte - b'0')))
            .ok_or_else(invalid)
    })?;
    Ok(Ticks::from(quantum))
}
