//! End-to-end conversations through the dispatcher.

use attraction_bot::bot::{menu, replies, ChoiceSet, Dispatcher, InboundEvent, OutboundEffect};
use attraction_bot::file_processing::csv_format::{CANONICAL_HEADER, LOCALIZED_HEADER};
use attraction_bot::{Attraction, DataFormat, Field, Session, SessionStep};

const CHAT: &str = "chat-1";

async fn say(dispatcher: &Dispatcher, text: &str) -> Vec<OutboundEffect> {
    dispatcher.handle(&InboundEvent::text(CHAT, text)).await
}

async fn upload(dispatcher: &Dispatcher, file_name: &str, bytes: &[u8]) -> Vec<OutboundEffect> {
    dispatcher
        .handle(&InboundEvent::file(CHAT, file_name, bytes.to_vec()))
        .await
}

async fn session(dispatcher: &Dispatcher) -> Session {
    dispatcher.registry().snapshot(CHAT).await.unwrap()
}

fn messages(effects: &[OutboundEffect]) -> Vec<&str> {
    effects.iter().filter_map(|e| e.message()).collect()
}

fn choices(effects: &[OutboundEffect]) -> Vec<&str> {
    match effects.last() {
        Some(OutboundEffect::SendText { choices, .. }) => choices.labels(),
        other => panic!("expected a text reply, got {other:?}"),
    }
}

fn names(session: &Session) -> Vec<&str> {
    session.records.iter().map(|r| r.name.as_str()).collect()
}

fn place(name: &str, adm_area: &str, location: &str) -> Attraction {
    let mut attraction = Attraction::from_values([name]);
    attraction.adm_area = adm_area.to_string();
    attraction.location = location.to_string();
    attraction
}

async fn loaded_with(dispatcher: &Dispatcher, attractions: &[Attraction]) {
    say(dispatcher, menu::FORMAT_JSON).await;
    let bytes = DataFormat::Json.encode(attractions).unwrap();
    let effects = upload(dispatcher, "places.json", &bytes).await;
    assert_eq!(messages(&effects), [replies::FILE_LOADED]);
}

#[tokio::test]
async fn start_greets_and_offers_formats() {
    let dispatcher = Dispatcher::default();
    let effects = say(&dispatcher, menu::START).await;

    assert_eq!(messages(&effects), [replies::WELCOME]);
    assert_eq!(choices(&effects), [menu::FORMAT_CSV, menu::FORMAT_JSON]);
    assert_eq!(session(&dispatcher).await.step(), SessionStep::Idle);
}

#[tokio::test]
async fn csv_with_wrong_canonical_header_keeps_format() {
    let dispatcher = Dispatcher::default();
    say(&dispatcher, menu::FORMAT_CSV).await;

    let text = format!(
        "{}\n{}\n\"Tower\";\n",
        CANONICAL_HEADER.replace("\"Photo\"", "\"Picture\""),
        LOCALIZED_HEADER
    );
    let effects = upload(&dispatcher, "tower.csv", text.as_bytes()).await;

    assert_eq!(messages(&effects), [replies::INCORRECT_DATA]);
    let session = session(&dispatcher).await;
    assert_eq!(session.step(), SessionStep::FormatChosen);
    assert_eq!(session.format, Some(DataFormat::Csv));
    assert!(session.records.is_empty());
}

#[tokio::test]
async fn sorts_uploaded_json_both_ways() {
    let dispatcher = Dispatcher::default();
    say(&dispatcher, menu::FORMAT_JSON).await;
    let effects = upload(
        &dispatcher,
        "letters.json",
        br#"[{"Name": "B"}, {"Name": "A"}, {"Name": "C"}]"#,
    )
    .await;
    assert_eq!(choices(&effects), [menu::FILTER, menu::SORT, menu::DOWNLOAD, menu::UPLOAD_NEW_FILE]);

    let effects = say(&dispatcher, menu::SORT).await;
    assert_eq!(choices(&effects), [menu::SORT_ASCENDING, menu::SORT_DESCENDING]);

    let effects = say(&dispatcher, menu::SORT_ASCENDING).await;
    assert_eq!(messages(&effects), [replies::SORTED]);
    assert_eq!(names(&session(&dispatcher).await), ["A", "B", "C"]);

    say(&dispatcher, menu::SORT_DESCENDING).await;
    let session = session(&dispatcher).await;
    assert_eq!(names(&session), ["C", "B", "A"]);
    assert_eq!(session.step(), SessionStep::Loaded);
}

#[tokio::test]
async fn compound_filter_narrows_progressively() {
    let dispatcher = Dispatcher::default();
    loaded_with(
        &dispatcher,
        &[
            place("Fountain", "Central", "Arbat"),
            place("Tower", "North", "Park"),
            place("Gate", "Central", "Arbat"),
        ],
    )
    .await;

    let effects = say(&dispatcher, "Filter by AdmArea and Location").await;
    assert_eq!(choices(&effects), ["Value Central", "Value North"]);
    let session_now = session(&dispatcher).await;
    assert_eq!(session_now.pending_filter_fields, [Field::AdmArea, Field::Location]);
    assert_eq!(session_now.step(), SessionStep::FilterValueMenu);

    let effects = say(&dispatcher, "Value Central").await;
    assert_eq!(messages(&effects), [replies::CHOOSE_FILTER_VALUE]);
    // the second field's options come from the already narrowed set
    assert_eq!(choices(&effects), ["Value Arbat"]);

    let effects = say(&dispatcher, "Value Arbat").await;
    assert_eq!(messages(&effects), [replies::FILTER_DONE]);

    let session = session(&dispatcher).await;
    assert_eq!(names(&session), ["Fountain", "Gate"]);
    assert_eq!(session.step(), SessionStep::Loaded);
}

#[tokio::test]
async fn empty_set_mid_chain_abandons_remaining_fields() {
    let dispatcher = Dispatcher::default();
    loaded_with(&dispatcher, &[place("Fountain", "Central", "Arbat")]).await;

    say(&dispatcher, "Filter by AdmArea and Location").await;
    let effects = say(&dispatcher, "Value Nowhere").await;

    assert_eq!(messages(&effects), [replies::EMPTY_SET]);
    let session_now = session(&dispatcher).await;
    assert!(session_now.records.is_empty());
    assert_eq!(session_now.pending_filter_fields, [Field::Location]);
    assert_eq!(session_now.step(), SessionStep::Loaded);

    // the abandoned chain does not accept further values
    let effects = say(&dispatcher, "Value Arbat").await;
    assert_eq!(messages(&effects), [replies::NO_FILTER_FIELD]);
}

#[tokio::test]
async fn data_commands_without_upload_ask_for_a_file() {
    let dispatcher = Dispatcher::default();
    say(&dispatcher, menu::FORMAT_JSON).await;

    for command in [
        menu::SORT,
        menu::SORT_ASCENDING,
        menu::FILTER,
        "Filter by District",
        menu::DOWNLOAD,
        menu::DOWNLOAD_CSV,
    ] {
        let effects = say(&dispatcher, command).await;
        assert_eq!(messages(&effects), [replies::NO_DATA], "command {command:?}");
        assert_eq!(
            session(&dispatcher).await,
            Session::with_format(DataFormat::Json),
            "command {command:?}"
        );
    }

    let fresh = Dispatcher::default();
    let effects = fresh.handle(&InboundEvent::text(CHAT, menu::SORT)).await;
    assert_eq!(messages(&effects), [replies::NO_DATA]);
    assert_eq!(session(&fresh).await, Session::new());
}

#[tokio::test]
async fn unknown_command_starts_over() {
    let dispatcher = Dispatcher::default();
    loaded_with(&dispatcher, &[place("Fountain", "Central", "Arbat")]).await;
    say(&dispatcher, "Filter by Name").await;

    let effects = say(&dispatcher, "hello there").await;

    assert_eq!(effects.len(), 1);
    assert_eq!(messages(&effects), [replies::UNKNOWN_COMMAND]);
    assert_eq!(choices(&effects), [menu::FORMAT_CSV, menu::FORMAT_JSON]);
    assert_eq!(session(&dispatcher).await, Session::new());
}

#[tokio::test]
async fn upload_filter_and_download_csv() {
    let dispatcher = Dispatcher::default();
    say(&dispatcher, menu::FORMAT_CSV).await;

    let text = format!(
        "{}\n{}\n{}\n{}\n",
        CANONICAL_HEADER,
        LOCALIZED_HEADER,
        "\"Fountain\";\"\";\"Central\";\"Arbat\";\"Arbat 1\";\"\";\"\";\"\";\"1\";\"\";\"\";",
        "\"Tower\";\"\";\"North\";\"Sokol\";\"Field 2\";\"\";\"\";\"\";\"2\";\"\";\"\";"
    );
    let effects = upload(&dispatcher, "Moscow.CSV", text.as_bytes()).await;
    assert_eq!(messages(&effects), [replies::FILE_LOADED]);

    say(&dispatcher, "Filter by District").await;
    say(&dispatcher, "Value Sokol").await;

    let effects = say(&dispatcher, menu::DOWNLOAD).await;
    assert_eq!(choices(&effects), [menu::DOWNLOAD_CSV, menu::DOWNLOAD_JSON]);

    let effects = say(&dispatcher, menu::DOWNLOAD_CSV).await;
    assert_eq!(effects.len(), 2);
    let OutboundEffect::SendFile { file_name, bytes } = &effects[0] else {
        panic!("expected a file, got {:?}", effects[0]);
    };
    assert_eq!(file_name, "Moscow.csv");
    let downloaded = DataFormat::Csv.decode(bytes).unwrap();
    assert_eq!(downloaded.len(), 1);
    assert_eq!(downloaded[0].name, "Tower");
    assert_eq!(downloaded[0].global_id, "2");
    assert_eq!(messages(&effects), [replies::DATA_SENT]);

    let effects = say(&dispatcher, menu::DOWNLOAD_JSON).await;
    let OutboundEffect::SendFile { file_name, bytes } = &effects[0] else {
        panic!("expected a file, got {:?}", effects[0]);
    };
    assert_eq!(file_name, "Moscow.json");
    assert_eq!(DataFormat::Json.decode(bytes).unwrap(), downloaded);
}

#[tokio::test]
async fn mismatched_extension_is_ignored() {
    let dispatcher = Dispatcher::default();
    say(&dispatcher, menu::FORMAT_CSV).await;

    let effects = upload(&dispatcher, "data.json", b"[]").await;

    assert_eq!(messages(&effects), [replies::WRONG_EXTENSION]);
    assert_eq!(
        effects[0],
        OutboundEffect::text(replies::WRONG_EXTENSION, ChoiceSet::Remove)
    );
    assert_eq!(session(&dispatcher).await, Session::with_format(DataFormat::Csv));
}

#[tokio::test]
async fn unreadable_file_resets_to_idle() {
    let dispatcher = Dispatcher::default();
    say(&dispatcher, menu::FORMAT_JSON).await;

    let effects = upload(&dispatcher, "broken.json", b"[{\"Name\": ").await;

    assert_eq!(messages(&effects), [replies::READ_FAILED]);
    assert_eq!(session(&dispatcher).await, Session::new());
}

#[tokio::test]
async fn conversations_are_isolated() {
    let dispatcher = Dispatcher::default();
    loaded_with(&dispatcher, &[place("Fountain", "Central", "Arbat")]).await;

    let other = dispatcher
        .handle(&InboundEvent::text("chat-2", "nonsense"))
        .await;
    assert_eq!(messages(&other), [replies::UNKNOWN_COMMAND]);

    assert_eq!(session(&dispatcher).await.step(), SessionStep::Loaded);
    assert_eq!(dispatcher.registry().len().await, 2);
}
