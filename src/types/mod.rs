mod amount;
mod errors;
mod ids;

pub use amount::Amount;
pub use errors::AmountError;
pub use ids::random_base36;

pub type TransactionId = String;
pub type UserId = String;
