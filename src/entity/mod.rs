pub mod flatten;
pub mod model;
pub mod snapshot;

pub use flatten::*;
pub use model::*;
pub use snapshot::*;
