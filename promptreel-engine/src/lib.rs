pub mod engine;
pub mod http;
pub mod outcome;
pub mod traits;
