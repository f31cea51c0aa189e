//! Authentication: token storage, session ownership, idle expiry and the role guard.

pub mod api;
pub mod claims;
pub mod context;
pub mod guard;
pub mod idle;
pub mod session;
pub mod storage;

pub use context::{use_api, use_auth, AuthProvider, AuthState};
pub use guard::RequireRole;
pub use session::Session;
