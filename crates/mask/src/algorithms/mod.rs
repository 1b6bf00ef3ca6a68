pub mod preprocessing;
pub mod extraction;
pub mod outline;
pub mod simplification;

pub use preprocessing::*;
pub use extraction::*;
pub use outline::trace_outline;
pub use simplification::*;
