pub mod debounce;
pub mod error;
pub mod session;
pub mod state;

pub use error::SessionError;
pub use session::TranslateSession;
pub use state::SessionState;

#[cfg(test)]
mod tests;
