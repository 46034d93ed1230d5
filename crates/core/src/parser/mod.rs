//! Request string parsing

mod move_request;

pub use move_request::MoveRequest;
