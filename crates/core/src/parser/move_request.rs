//! `<START>-<END>-<CAPTURED>` move strings, e.g. `E2-E4-false`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::board::Square;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MoveRequest {
    pub start: Square,
    pub end: Square,
    pub captured: bool,
}

impl MoveRequest {
    pub fn new(start: Square, end: Square, captured: bool) -> Self {
        Self {
            start,
            end,
            captured,
        }
    }
}

impl FromStr for MoveRequest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        let [start, end, captured] = parts.as_slice() else {
            return Err(Error::MalformedRequest(format!(
                "expected START-END-CAPTURED, got {:?}",
                s
            )));
        };

        let captured = match *captured {
            "true" => true,
            "false" => false,
            other => {
                return Err(Error::MalformedRequest(format!(
                    "capture flag must be true or false, got {:?}",
                    other
                )))
            }
        };

        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
            captured,
        })
    }
}

impl TryFrom<String> for MoveRequest {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MoveRequest> for String {
    fn from(value: MoveRequest) -> Self {
        value.to_string()
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.start, self.end, self.captured)
    }
}
