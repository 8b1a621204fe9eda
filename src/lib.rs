pub mod attraction;
pub mod bot;
pub mod file_processing;
pub mod server;
pub mod state;
pub mod utils;

pub use attraction::{Attraction, Field};
pub use bot::{BotRuntime, Dispatcher, InboundEvent, OutboundEffect, Transport};
pub use file_processing::DataFormat;
pub use state::{Session, SessionRegistry, SessionStep};
pub use utils::{AppConfig, BotError, Result};
