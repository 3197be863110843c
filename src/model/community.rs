// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::fmt;

/// SNMP protocol version. Discriminants match the SNMP wire version numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Version {
    V1 = 0,
    V2C = 1,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Version::V1 => "V1",
            Version::V2C => "V2C",
        })
    }
}

/// SNMP community string and protocol version — authentication material for
/// v1/v2c.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Community {
    string: String,
    version: Version,
}

impl Community {
    pub fn new(string: impl Into<String>, version: Version) -> Self {
        Self {
            string: string.into(),
            version,
        }
    }

    pub fn string(&self) -> &str {
        &self.string
    }

    pub fn version(&self) -> Version {
        self.version
    }
}

impl fmt::Display for Community {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Community({}, {})", self.string, self.version)
    }
}
