//! Authentication and authorization module

pub mod middleware;
pub mod session;

pub use middleware::{require_admin, require_authenticated, HOME_PATH, LOGIN_PATH};
pub use session::{current_user, end_session, start_session, with_sessions, SessionUser};
