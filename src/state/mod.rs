pub mod registry;
pub mod session;

pub use registry::{ConversationId, SessionHandle, SessionRegistry};
pub use session::{Session, SessionStep};
