mod input;
mod key_result;
mod todo_form;

pub use input::{InputResult, TextInput};
pub use key_result::KeyResult;
pub use todo_form::{TodoForm, TodoFormEvent};
