mod errors;
mod forms;
mod session_manager;
#[cfg(test)]
mod tests;

pub use errors::SessionError;
pub use forms::{LoginForm, RegistrationForm};
pub use session_manager::SessionManager;
