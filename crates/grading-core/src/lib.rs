pub mod error;
pub mod palette;
pub mod payload;
pub mod traits;
pub mod types;

pub use error::*;
pub use palette::*;
pub use payload::*;
pub use traits::*;
pub use types::*;
