mod errors;
mod recorder_actor;
#[cfg(test)]
mod tests;

pub use errors::RecorderError;
pub use recorder_actor::{RecordRequest, RecorderActor, RecorderHandle};
