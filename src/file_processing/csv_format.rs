use crate::attraction::Attraction;
use crate::utils::{unquote, BotError, Result};
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};

pub const CANONICAL_HEADER: &str = "\"Name\";\"Photo\";\"AdmArea\";\"District\";\"Location\";\
\"RegistrationNumber\";\"State\";\"LocationType\";\"global_id\";\"geodata_center\";\"geoarea\";";

pub const LOCALIZED_HEADER: &str = "\"Название объекта\";\"Фотография\";\
\"Административный округ по адресу\";\"Район\";\"Месторасположение\";\
\"Государственный регистрационный знак\";\"Состояние регистрации\";\
\"Тип места расположения\";\"global_id\";\"geodata_center\";\"geoarea\";";

const DELIMITER: u8 = b';';

pub fn decode(bytes: &[u8]) -> Result<Vec<Attraction>> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let (canonical, rest) = next_line(text);
    let (localized, body) = next_line(rest);
    if canonical != CANONICAL_HEADER || localized != LOCALIZED_HEADER {
        return Err(BotError::MalformedHeader);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(DELIMITER)
        .quoting(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut attractions = Vec::new();
    for result in reader.records() {
        let record = result?;
        attractions.push(Attraction::from_values(record.iter().map(unquote)));
    }

    Ok(attractions)
}

pub fn encode(attractions: &[Attraction]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    for header in [CANONICAL_HEADER, LOCALIZED_HEADER] {
        buffer.extend_from_slice(header.as_bytes());
        buffer.push(b'\n');
    }

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .delimiter(DELIMITER)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);

    for attraction in attractions {
        let mut row: Vec<String> = attraction.values().map(quote_cell).collect();
        // trailing delimiter
        row.push(String::new());
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| BotError::IoError(e.into_error()))
}

fn quote_cell(value: &str) -> String {
    if value == "\"\"" {
        String::new()
    } else {
        format!("\"{}\"", value)
    }
}

fn next_line(text: &str) -> (&str, &str) {
    match text.split_once('\n') {
        Some((line, rest)) => (line.strip_suffix('\r').unwrap_or(line), rest),
        None => (text, ""),
    }
}
