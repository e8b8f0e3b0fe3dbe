pub mod error;
pub mod interpolate;
pub mod range;
pub mod transform;
pub mod types;

pub use error::*;
pub use interpolate::interpolate;
pub use range::*;
pub use transform::*;
pub use types::*;
