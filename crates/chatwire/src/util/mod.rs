//! Small helpers shared by chat frontends.

pub mod collections;
pub mod input;
pub mod query;
pub mod shared;

pub use collections::{insert, insert_start, move_item, remove, replace};
pub use input::is_numeric_input_key;
pub use query::{query_param, query_params};
pub use shared::SharedValue;
