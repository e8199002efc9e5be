pub mod status;
pub mod types;
pub mod wire;

// Keep the public surface small and intentional.
pub use status::*;
pub use types::*;
pub use wire::*;
