pub mod client;
pub mod types;

pub use client::TodoClient;
pub use types::{NewTodo, Todo};
