pub mod answers;
pub mod progress;
pub mod requests;
pub mod responses;
