//! Menu vocabulary and the parser that turns raw message text into commands.
//!
//! Labels are matched verbatim. Relocalizing them is fine as long as the set
//! of labels and the single/compound split of the filter choices stay the same.

use crate::attraction::Field;
use crate::bot::event::ChoiceSet;
use crate::file_processing::DataFormat;

pub const START: &str = "/start";
pub const FORMAT_CSV: &str = "CSV";
pub const FORMAT_JSON: &str = "JSON";

pub const FILTER: &str = "Filter data";
pub const SORT: &str = "Sort";
pub const DOWNLOAD: &str = "Download file";
pub const UPLOAD_NEW_FILE: &str = "Upload new file";

pub const SORT_ASCENDING: &str = "Sort by Name ascending";
pub const SORT_DESCENDING: &str = "Sort by Name descending";

pub const DOWNLOAD_CSV: &str = "Download as CSV";
pub const DOWNLOAD_JSON: &str = "Download as JSON";

const FILTER_PREFIX: &str = "Filter by ";
const VALUE_PREFIX: &str = "Value ";
const DOWNLOAD_PREFIX: &str = "Download";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChoice {
    Single(Field),
    /// Two fields resolved one after the other, the second over what the
    /// first one left.
    Compound(Field, Field),
}

pub const FILTER_CHOICES: [FilterChoice; 10] = [
    FilterChoice::Single(Field::Name),
    FilterChoice::Single(Field::Photo),
    FilterChoice::Single(Field::AdmArea),
    FilterChoice::Single(Field::District),
    FilterChoice::Single(Field::Location),
    FilterChoice::Single(Field::RegistrationNumber),
    FilterChoice::Single(Field::State),
    FilterChoice::Single(Field::LocationType),
    FilterChoice::Single(Field::GlobalId),
    FilterChoice::Compound(Field::AdmArea, Field::Location),
];

impl FilterChoice {
    pub fn label(self) -> String {
        match self {
            FilterChoice::Single(field) => format!("{}{}", FILTER_PREFIX, field.key()),
            FilterChoice::Compound(first, second) => {
                format!("{}{} and {}", FILTER_PREFIX, first.key(), second.key())
            }
        }
    }

    pub fn from_label(text: &str) -> Option<Self> {
        FILTER_CHOICES.iter().copied().find(|c| c.label() == text)
    }

    pub fn fields(self) -> Vec<Field> {
        match self {
            FilterChoice::Single(field) => vec![field],
            FilterChoice::Compound(first, second) => vec![first, second],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    ChooseFormat(DataFormat),
    OpenSortMenu,
    Sort { descending: bool },
    OpenFilterMenu,
    ChooseFilterField(FilterChoice),
    InvalidFilterField(String),
    ChooseFilterValue(String),
    OpenDownloadMenu,
    Download(DataFormat),
    InvalidDownload(String),
    UploadNewFile,
    Unrecognized(String),
}

impl Command {
    pub fn parse(text: &str) -> Command {
        match text {
            START => return Command::Start,
            FORMAT_CSV => return Command::ChooseFormat(DataFormat::Csv),
            FORMAT_JSON => return Command::ChooseFormat(DataFormat::Json),
            SORT => return Command::OpenSortMenu,
            SORT_ASCENDING => return Command::Sort { descending: false },
            SORT_DESCENDING => return Command::Sort { descending: true },
            FILTER => return Command::OpenFilterMenu,
            DOWNLOAD => return Command::OpenDownloadMenu,
            DOWNLOAD_CSV => return Command::Download(DataFormat::Csv),
            DOWNLOAD_JSON => return Command::Download(DataFormat::Json),
            UPLOAD_NEW_FILE => return Command::UploadNewFile,
            _ => {}
        }

        if let Some(choice) = FilterChoice::from_label(text) {
            Command::ChooseFilterField(choice)
        } else if text.starts_with(FILTER_PREFIX) {
            Command::InvalidFilterField(text.to_string())
        } else if let Some(value) = text.strip_prefix(VALUE_PREFIX) {
            Command::ChooseFilterValue(value.to_string())
        } else if text.starts_with(DOWNLOAD_PREFIX) {
            Command::InvalidDownload(text.to_string())
        } else {
            Command::Unrecognized(text.to_string())
        }
    }
}

pub fn format_menu() -> ChoiceSet {
    ChoiceSet::rows([[FORMAT_CSV, FORMAT_JSON]])
}

pub fn main_menu() -> ChoiceSet {
    ChoiceSet::column([FILTER, SORT, DOWNLOAD, UPLOAD_NEW_FILE])
}

pub fn sort_menu() -> ChoiceSet {
    ChoiceSet::column([SORT_ASCENDING, SORT_DESCENDING])
}

pub fn filter_menu() -> ChoiceSet {
    ChoiceSet::column(FILTER_CHOICES.iter().map(|c| c.label()))
}

pub fn value_menu(values: &[String]) -> ChoiceSet {
    ChoiceSet::column(values.iter().map(|v| format!("{}{}", VALUE_PREFIX, v)))
}

pub fn download_menu() -> ChoiceSet {
    ChoiceSet::column([DOWNLOAD_CSV, DOWNLOAD_JSON])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_labels() {
        assert_eq!(Command::parse("/start"), Command::Start);
        assert_eq!(Command::parse("CSV"), Command::ChooseFormat(DataFormat::Csv));
        assert_eq!(Command::parse("JSON"), Command::ChooseFormat(DataFormat::Json));
        assert_eq!(Command::parse("Sort"), Command::OpenSortMenu);
        assert_eq!(
            Command::parse("Sort by Name descending"),
            Command::Sort { descending: true }
        );
        assert_eq!(Command::parse("Filter data"), Command::OpenFilterMenu);
        assert_eq!(Command::parse("Download file"), Command::OpenDownloadMenu);
        assert_eq!(
            Command::parse("Download as JSON"),
            Command::Download(DataFormat::Json)
        );
        assert_eq!(Command::parse("Upload new file"), Command::UploadNewFile);
    }

    #[test]
    fn every_menu_label_parses_to_a_known_command() {
        let menus = [
            format_menu(),
            main_menu(),
            sort_menu(),
            filter_menu(),
            download_menu(),
        ];
        for menu in &menus {
            for label in menu.labels() {
                assert!(
                    !matches!(
                        Command::parse(label),
                        Command::Unrecognized(_)
                            | Command::InvalidFilterField(_)
                            | Command::InvalidDownload(_)
                    ),
                    "label {label:?} did not parse"
                );
            }
        }
    }

    #[test]
    fn filter_menu_has_nine_single_and_one_compound_choice() {
        let singles = FILTER_CHOICES
            .iter()
            .filter(|c| matches!(c, FilterChoice::Single(_)))
            .count();
        assert_eq!(filter_menu().labels().len(), 10);
        assert_eq!(singles, 9);
        assert_eq!(
            Command::parse("Filter by AdmArea and Location"),
            Command::ChooseFilterField(FilterChoice::Compound(Field::AdmArea, Field::Location))
        );
        assert_eq!(
            Command::parse("Filter by RegistrationNumber"),
            Command::ChooseFilterField(FilterChoice::Single(Field::RegistrationNumber))
        );
    }

    #[test]
    fn geodata_columns_are_not_filterable() {
        assert_eq!(
            Command::parse("Filter by geoarea"),
            Command::InvalidFilterField("Filter by geoarea".into())
        );
    }

    #[test]
    fn value_prefix_carries_the_rest_verbatim() {
        assert_eq!(
            Command::parse("Value  Central district "),
            Command::ChooseFilterValue(" Central district ".into())
        );
        assert_eq!(Command::parse("Value "), Command::ChooseFilterValue(String::new()));
    }

    #[test]
    fn unknown_text_is_unrecognized() {
        assert_eq!(
            Command::parse("Download as XML"),
            Command::InvalidDownload("Download as XML".into())
        );
        assert_eq!(Command::parse("csv"), Command::Unrecognized("csv".into()));
        assert_eq!(Command::parse(""), Command::Unrecognized(String::new()));
    }

    #[test]
    fn value_menu_prefixes_each_value() {
        let menu = value_menu(&["Arbat".to_string(), "Tver".to_string()]);
        assert_eq!(menu.labels(), ["Value Arbat", "Value Tver"]);
    }
}
