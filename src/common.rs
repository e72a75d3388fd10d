pub mod coercion;
pub mod filter;
pub mod names;

pub use coercion::*;
pub use filter::*;
pub use names::*;
