//! Move legality rules

mod shape;
mod trace;
mod validator;

pub use shape::{shape_allows, Delta};
pub use trace::{trace, Trace};
pub use validator::{is_legal, validate};
