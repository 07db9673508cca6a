pub mod edge;
pub mod node;
pub mod store;

pub use edge::*;
pub use node::*;
pub use store::*;
