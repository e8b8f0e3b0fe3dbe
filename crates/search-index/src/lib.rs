pub mod group;
pub mod index;
pub mod panel;

pub use group::*;
pub use index::*;
pub use panel::*;
