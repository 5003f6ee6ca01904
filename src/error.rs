/**********************************************************************************************
*
*   rebound - error type
*
*   Only world bookkeeping and scene files can fail. Numeric dead ends inside the kernel
*   (no impact instant, no overlap) are answered with `Option`/`bool` instead.
*
*   LICENSE: zlib/libpng
*
*   Copyright (c) 2025 rebound contributors
*
**********************************************************************************************/

use std::{fmt, io};

use crate::body::BodyId;

#[derive(Debug)]
pub enum Error {
    /// The world already holds as many bodies as it can
    CapacityExceeded {
        limit: usize,
    },
    /// Another body already uses this name
    DuplicateName {
        name: String,
    },
    /// No body with this id lives in the world
    UnknownBody {
        id: BodyId,
    },
    /// No built-in scenario goes by this name
    UnknownScenario {
        name: String,
    },
    /// A scene record is not valid JSON for any body type
    MalformedRecord {
        /// 1-based line number within the scene
        line: usize,
        reason: String,
    },
    /// A scene record parsed but describes an impossible body
    InvalidRecord {
        /// 1-based line number within the scene
        line: usize,
        reason: String,
    },
    Io(io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { limit } => write!(f, "world capacity exceeded (limit={limit})"),
            Self::DuplicateName { name } => write!(f, "a body named {name:?} already exists"),
            Self::UnknownBody { id } => write!(f, "no body with id {}", id.0),
            Self::UnknownScenario { name } => write!(f, "unknown scenario {name:?}"),
            Self::MalformedRecord { line, reason } => write!(f, "malformed record on line {line}: {reason}"),
            Self::InvalidRecord { line, reason } => write!(f, "invalid record on line {line}: {reason}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_line() {
        let e = Error::MalformedRecord { line: 7, reason: "expected value".into() };
        let s = e.to_string();
        assert!(s.contains('7'));
        assert!(s.contains("expected value"));
    }

    #[test]
    fn io_errors_keep_their_source() {
        use std::error::Error as _;
        let e = Error::from(io::Error::new(io::ErrorKind::NotFound, "scene.jsonl"));
        assert!(e.source().is_some());
        assert!(Error::UnknownBody { id: BodyId(3) }.source().is_none());
    }
}
