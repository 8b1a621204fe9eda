pub mod console;
pub mod http;

pub use console::{run_console, ConsoleTransport};
pub use http::{router, run_http_server};
