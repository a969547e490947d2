use std::{fmt, str::FromStr};

/// Specifies whether the partition table on the disk is **MSDOS** or **GPT**.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PartitionTable {
    Msdos,
    Gpt,
}

/// A possible error when validating the partition table.
#[derive(Debug, Fail, PartialEq)]
pub enum PartitionTableError {
    #[fail(display = "invalid partition table type '{}', only msdos and gpt are supported", label)]
    Unsupported { label: String },
}

impl PartitionTable {
    pub fn as_str(self) -> &'static str {
        match self {
            PartitionTable::Msdos => "msdos",
            PartitionTable::Gpt => "gpt",
        }
    }
}

/// Only the exact, lowercase names are accepted.
impl FromStr for PartitionTable {
    type Err = PartitionTableError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "msdos" => Ok(PartitionTable::Msdos),
            "gpt" => Ok(PartitionTable::Gpt),
            _ => Err(PartitionTableError::Unsupported { label: label.into() }),
        }
    }
}

impl fmt::Display for PartitionTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.as_str()) }
}
