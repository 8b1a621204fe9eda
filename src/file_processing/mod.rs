pub mod csv_format;
pub mod json_format;

use crate::attraction::Attraction;
use crate::utils::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Csv,
    Json,
}

impl DataFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DataFormat::Csv => ".csv",
            DataFormat::Json => ".json",
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<Vec<Attraction>> {
        match self {
            DataFormat::Csv => csv_format::decode(bytes),
            DataFormat::Json => json_format::decode(bytes),
        }
    }

    pub fn encode(self, attractions: &[Attraction]) -> Result<Vec<u8>> {
        match self {
            DataFormat::Csv => csv_format::encode(attractions),
            DataFormat::Json => json_format::encode(attractions),
        }
    }

    pub fn matches_file_name(self, file_name: &str) -> bool {
        file_name
            .to_ascii_lowercase()
            .ends_with(self.extension())
    }

    /// File name without this format's extension. Names that do not carry
    /// the extension come back unchanged.
    pub fn strip_extension(self, file_name: &str) -> String {
        if self.matches_file_name(file_name) {
            file_name[..file_name.len() - self.extension().len()].to_string()
        } else {
            file_name.to_string()
        }
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataFormat::Csv => write!(f, "csv"),
            DataFormat::Json => write!(f, "json"),
        }
    }
}
