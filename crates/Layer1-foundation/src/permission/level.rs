//! Permission level 정의
//!
//! `none` / `r` / `w` / `rw` 네 가지 레벨. 계층이 아니라 capability 집합이다.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single access capability gated by a [`PermissionLevel`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Read,
    Write,
}

impl Capability {
    /// Verb used in denial messages
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Read => "Reading",
            Self::Write => "Write",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// Access level declared for a property name
///
/// Serialized as the literal strings `"none"`, `"r"`, `"w"`, `"rw"`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PermissionLevel {
    /// Neither read nor write
    #[default]
    #[serde(rename = "none")]
    None,

    /// Read only
    #[serde(rename = "r")]
    Read,

    /// Write only
    #[serde(rename = "w")]
    Write,

    /// Read and write
    #[serde(rename = "rw")]
    ReadWrite,
}

impl PermissionLevel {
    /// Whether this level includes `capability`
    pub fn permits(&self, capability: Capability) -> bool {
        match capability {
            Capability::Read => self.can_read(),
            Capability::Write => self.can_write(),
        }
    }

    pub fn can_read(&self) -> bool {
        matches!(self, Self::Read | Self::ReadWrite)
    }

    pub fn can_write(&self) -> bool {
        matches!(self, Self::Write | Self::ReadWrite)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Read => "r",
            Self::Write => "w",
            Self::ReadWrite => "rw",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Self::None),
            "r" => Ok(Self::Read),
            "w" => Ok(Self::Write),
            "rw" => Ok(Self::ReadWrite),
            other => Err(Error::InvalidInput(format!(
                "Unknown permission level '{}' (expected none, r, w or rw)",
                other
            ))),
        }
    }
}
