use crate::attraction::{Attraction, Field};
use crate::file_processing::DataFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    Idle,
    FormatChosen,
    Loaded,
    FilterValueMenu,
}

impl std::fmt::Display for SessionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStep::Idle => write!(f, "idle"),
            SessionStep::FormatChosen => write!(f, "format_chosen"),
            SessionStep::Loaded => write!(f, "loaded"),
            SessionStep::FilterValueMenu => write!(f, "filter_value_menu"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub format: Option<DataFormat>,
    pub uploaded_file_base_name: String,
    pub has_data: bool,
    pub records: Vec<Attraction>,
    pub pending_filter_fields: Vec<Field>,
    pub has_filter_field: bool,
    pub download_format: Option<DataFormat>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(format: DataFormat) -> Self {
        Self {
            format: Some(format),
            ..Self::default()
        }
    }

    pub fn loaded(format: DataFormat, base_name: String, records: Vec<Attraction>) -> Self {
        Self {
            format: Some(format),
            uploaded_file_base_name: base_name,
            has_data: true,
            records,
            ..Self::default()
        }
    }

    pub fn reset(&self) -> Session {
        Session::new()
    }

    pub fn reset_keeping_format(&self) -> Session {
        match self.format {
            Some(format) => Session::with_format(format),
            None => Session::new(),
        }
    }

    pub fn step(&self) -> SessionStep {
        if self.has_data && self.has_filter_field {
            SessionStep::FilterValueMenu
        } else if self.has_data {
            SessionStep::Loaded
        } else if self.format.is_some() {
            SessionStep::FormatChosen
        } else {
            SessionStep::Idle
        }
    }

    pub fn begin_filter(&mut self, fields: Vec<Field>) {
        self.pending_filter_fields = fields;
        self.has_filter_field = true;
    }

    /// Leaves the value-selection step. Unresolved fields are abandoned in
    /// place and ignored until the next field choice overwrites them.
    pub fn end_filter(&mut self) {
        self.has_filter_field = false;
    }

    pub fn current_filter_field(&self) -> Option<Field> {
        self.pending_filter_fields.first().copied()
    }

    pub fn pop_filter_field(&mut self) -> Option<Field> {
        if self.pending_filter_fields.is_empty() {
            None
        } else {
            Some(self.pending_filter_fields.remove(0))
        }
    }
}
