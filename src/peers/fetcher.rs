use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::peers::record::PeerRecord;

/// RPC the node client is asked for
pub const PEER_INFO_SUBCOMMAND: &str = "getpeerinfo";

/// Client used when `--cli` is not given
pub const DEFAULT_CLI: &str = "bitcoin-cli";

/// Why one refresh produced no peer list
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl FetchError {
    /// The client binary does not exist (not on PATH, bad `--cli`)
    pub fn is_missing_program(&self) -> bool {
        matches!(
            self,
            FetchError::Execution(ExecutionError::Spawn { source, .. })
                if source.kind() == io::ErrorKind::NotFound
        )
    }
}

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("cannot run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("`{program}` exited with {status}: {stderr}")]
    NonZeroExit {
        program: String,
        status: ExitStatus,
        /// First line of the client's stderr
        stderr: String,
    },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("output is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("expected a list of peers, got {0}")]
    NotAList(&'static str),
    #[error("peer #{index} is malformed: {source}")]
    BadPeer {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Runs `<cli> getpeerinfo` and turns its stdout into peer records.
///
/// The call blocks until the client exits. There is no timeout.
#[derive(Debug, Clone)]
pub struct PeerFetcher {
    program: PathBuf,
}

impl PeerFetcher {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    pub fn fetch(&self) -> Result<Vec<PeerRecord>, FetchError> {
        let program = self.program.display().to_string();
        debug!(%program, "running {}", PEER_INFO_SUBCOMMAND);

        let output = Command::new(&self.program)
            .arg(PEER_INFO_SUBCOMMAND)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ExecutionError::Spawn { program: program.clone(), source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let first_line = stderr
                .lines()
                .map(str::trim)
                .find(|l| !l.is_empty())
                .unwrap_or("no diagnostic output")
                .to_string();
            return Err(ExecutionError::NonZeroExit {
                program,
                status: output.status,
                stderr: first_line,
            }
            .into());
        }

        let peers = parse_peers(&output.stdout)?;
        debug!(count = peers.len(), "parsed peer list");
        Ok(peers)
    }
}

/// Parse `getpeerinfo` JSON: an array with one object per peer
pub fn parse_peers(raw: &[u8]) -> Result<Vec<PeerRecord>, ParseError> {
    let value: Value = serde_json::from_slice(raw).map_err(ParseError::InvalidJson)?;
    let items = match value {
        Value::Array(items) => items,
        other => return Err(ParseError::NotAList(json_kind(&other))),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|source| ParseError::BadPeer { index, source })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
