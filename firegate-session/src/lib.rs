pub mod inmemory;
pub mod service;
pub mod session;

pub use inmemory::{DEFAULT_SESSION_TTL_SECS, InMemorySessionService};
pub use service::{CreateRequest, DeleteRequest, GetRequest, SessionService};
pub use session::Session;
