// Registration, login, session verification and profile editing.
// Sessions are opaque bearer tokens stored in `user_sessions`.

pub mod handlers;
pub mod password;
pub mod repository;
pub mod session;
