//! Session module - demo quota state machine and persistence

pub mod quota;
pub mod store;

pub use quota::{QuotaExhausted, QuotaGuard, QuotaState, DEMO_QUOTE_LIMIT};
pub use store::{Session, SessionError, SessionStore};
