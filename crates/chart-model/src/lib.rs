pub mod breakdown;
pub mod charts;
pub mod format;
pub mod instance;
pub mod spec;
pub mod theme;

pub use breakdown::*;
pub use charts::*;
pub use format::*;
pub use instance::*;
pub use spec::*;
pub use theme::*;
