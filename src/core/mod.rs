//! Data model shared by every layer: school records and income brackets.
//!
//! Types here are data-only. No filesystem or network access happens in this
//! module; decoding leniency lives in [`de`].

mod bracket;
pub mod de;
mod school;

pub use bracket::IncomeBracket;
pub use school::{School, SeverityTag, TravelMode};
