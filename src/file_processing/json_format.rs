use crate::attraction::Attraction;
use crate::utils::{BotError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn decode(bytes: &[u8]) -> Result<Vec<Attraction>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let attractions: Option<Vec<Attraction>> = serde_json::from_slice(bytes)?;
    attractions.ok_or(BotError::EmptyDocument)
}

pub fn encode(attractions: &[Attraction]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(attractions)?)
}
