pub mod dispatcher;
pub mod event;
pub mod menu;
pub mod replies;
pub mod runtime;

pub use dispatcher::{apply_command, apply_file, Dispatcher};
pub use event::{ChoiceSet, InboundEvent, OutboundEffect};
pub use menu::{Command, FilterChoice};
pub use runtime::{process_event, BotRuntime, Transport};
