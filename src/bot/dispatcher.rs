use crate::attraction::{distinct_values, filter_by_field, sort_by_name};
use crate::bot::event::{ChoiceSet, InboundEvent, OutboundEffect};
use crate::bot::menu::{self, Command, FilterChoice};
use crate::bot::replies;
use crate::file_processing::DataFormat;
use crate::state::{Session, SessionRegistry};
use crate::utils::BotError;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    registry: SessionRegistry,
}

impl Dispatcher {
    pub fn new(registry: SessionRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub async fn handle(&self, event: &InboundEvent) -> Vec<OutboundEffect> {
        let conversation_id = event.conversation_id();
        let handle = self.registry.session(conversation_id).await;
        let mut session = handle.lock().await;

        let before = session.step();
        let effects = match event {
            InboundEvent::Text { text, .. } => {
                info!(conversation_id = %conversation_id, text = %text, "Received message");
                apply_command(&mut session, conversation_id, Command::parse(text))
            }
            InboundEvent::File {
                file_name, bytes, ..
            } => {
                info!(
                    conversation_id = %conversation_id,
                    file_name = %file_name,
                    size = bytes.len(),
                    "Received file"
                );
                apply_file(&mut session, conversation_id, file_name, bytes)
            }
        };
        debug!(
            conversation_id = %conversation_id,
            from = %before,
            to = %session.step(),
            "Session step"
        );

        effects
    }

    pub async fn recover_from_transport_failure(
        &self,
        conversation_id: &str,
        error: &BotError,
    ) -> OutboundEffect {
        error!(conversation_id = %conversation_id, error = %error, "Delivery failed, resetting session");
        self.registry.reset(conversation_id).await;
        OutboundEffect::text(replies::TRANSPORT_FAILED, menu::format_menu())
    }
}

fn reply(message: &str, choices: ChoiceSet) -> Vec<OutboundEffect> {
    vec![OutboundEffect::text(message, choices)]
}

pub fn apply_command(
    session: &mut Session,
    conversation_id: &str,
    command: Command,
) -> Vec<OutboundEffect> {
    match command {
        Command::Start => {
            *session = session.reset();
            reply(replies::WELCOME, menu::format_menu())
        }
        Command::ChooseFormat(format) => {
            *session = Session::with_format(format);
            reply(replies::SEND_FILE, ChoiceSet::Remove)
        }
        Command::UploadNewFile => {
            *session = session.reset();
            reply(replies::CHOOSE_UPLOAD_FORMAT, menu::format_menu())
        }
        Command::Unrecognized(text) => {
            let err = BotError::UnrecognizedCommand(text);
            warn!(conversation_id = %conversation_id, error = %err, "Starting over");
            *session = session.reset();
            reply(replies::UNKNOWN_COMMAND, menu::format_menu())
        }
        Command::ChooseFilterValue(value) => choose_filter_value(session, &value),
        _ if !session.has_data => {
            *session = session.reset_keeping_format();
            reply(replies::NO_DATA, menu::format_menu())
        }
        Command::OpenSortMenu => {
            session.end_filter();
            reply(replies::CHOOSE_SORT, menu::sort_menu())
        }
        Command::Sort { descending } => {
            session.end_filter();
            session.records = sort_by_name(&session.records, descending);
            reply(replies::SORTED, menu::main_menu())
        }
        Command::OpenFilterMenu => {
            session.end_filter();
            reply(replies::CHOOSE_FILTER_FIELD, menu::filter_menu())
        }
        Command::InvalidFilterField(_) => {
            reply(replies::INVALID_FILTER_FIELD, menu::filter_menu())
        }
        Command::ChooseFilterField(choice) => choose_filter_field(session, choice),
        Command::OpenDownloadMenu => {
            session.end_filter();
            reply(replies::CHOOSE_DOWNLOAD_FORMAT, menu::download_menu())
        }
        Command::InvalidDownload(_) => reply(replies::INVALID_DOWNLOAD, menu::main_menu()),
        Command::Download(format) => download(session, conversation_id, format),
    }
}

pub fn apply_file(
    session: &mut Session,
    conversation_id: &str,
    file_name: &str,
    bytes: &[u8],
) -> Vec<OutboundEffect> {
    let Some(format) = session.format else {
        return reply(replies::FORMAT_NOT_CHOSEN, menu::format_menu());
    };

    if !format.matches_file_name(file_name) {
        return reply(replies::WRONG_EXTENSION, ChoiceSet::Remove);
    }

    match format.decode(bytes) {
        Ok(records) => {
            info!(
                conversation_id = %conversation_id,
                file_name = %file_name,
                records = records.len(),
                "Loaded attractions"
            );
            *session = Session::loaded(format, format.strip_extension(file_name), records);
            reply(replies::FILE_LOADED, menu::main_menu())
        }
        Err(e) if e.keeps_upload_format() => {
            warn!(conversation_id = %conversation_id, error = %e, "Rejected file contents");
            reply(replies::INCORRECT_DATA, ChoiceSet::Remove)
        }
        Err(e) => {
            error!(conversation_id = %conversation_id, error = %e, "Failed to read file");
            *session = session.reset();
            reply(replies::READ_FAILED, menu::format_menu())
        }
    }
}

fn choose_filter_field(session: &mut Session, choice: FilterChoice) -> Vec<OutboundEffect> {
    session.begin_filter(choice.fields());

    let Some(field) = session.current_filter_field() else {
        session.end_filter();
        return reply(replies::INVALID_FILTER_FIELD, menu::filter_menu());
    };

    if session.records.is_empty() {
        session.end_filter();
        return reply(replies::EMPTY_SET, menu::main_menu());
    }

    let values = distinct_values(&session.records, field);
    reply(replies::CHOOSE_FILTER_VALUE, menu::value_menu(&values))
}

fn choose_filter_value(session: &mut Session, value: &str) -> Vec<OutboundEffect> {
    if !session.has_filter_field {
        return reply(replies::NO_FILTER_FIELD, menu::main_menu());
    }

    let Some(field) = session.pop_filter_field() else {
        session.end_filter();
        return reply(replies::NO_FILTER_FIELD, menu::main_menu());
    };

    session.records = filter_by_field(&session.records, field, value);

    match session.current_filter_field() {
        Some(_) if session.records.is_empty() => {
            session.end_filter();
            reply(replies::EMPTY_SET, menu::main_menu())
        }
        Some(next) => {
            let values = distinct_values(&session.records, next);
            reply(replies::CHOOSE_FILTER_VALUE, menu::value_menu(&values))
        }
        None => {
            session.end_filter();
            reply(replies::FILTER_DONE, menu::main_menu())
        }
    }
}

fn download(session: &mut Session, conversation_id: &str, format: DataFormat) -> Vec<OutboundEffect> {
    session.end_filter();
    session.download_format = Some(format);

    match format.encode(&session.records) {
        Ok(bytes) => {
            let file_name = format!("{}{}", session.uploaded_file_base_name, format.extension());
            info!(
                conversation_id = %conversation_id,
                file_name = %file_name,
                records = session.records.len(),
                "Prepared download"
            );
            vec![
                OutboundEffect::SendFile { file_name, bytes },
                OutboundEffect::text(replies::DATA_SENT, menu::main_menu()),
            ]
        }
        Err(e) => {
            error!(conversation_id = %conversation_id, error = %e, "Failed to encode download");
            *session = session.reset();
            reply(replies::DOWNLOAD_FAILED, menu::format_menu())
        }
    }
}
