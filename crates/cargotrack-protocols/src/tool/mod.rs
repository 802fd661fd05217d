//! Tool protocol for the browser agent.

mod definition;
mod result;
mod traits;

pub use definition::*;
pub use result::*;
pub use traits::*;
