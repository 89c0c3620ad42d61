use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One todo item as the server represents it.
///
/// Field names are camelCase on the wire (`createdAt`). The server always
/// stamps `createdAt` on creation, but it is decoded leniently so a body
/// without it still parses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
  pub id: i64,
  pub title: String,
  pub description: String,
  pub done: bool,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating a todo. The server assigns `id`, `done = false`,
/// and `createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTodo {
  pub title: String,
  pub description: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_decode_todo() {
    let json = r#"{
      "id": 1,
      "title": "Buy milk",
      "description": "2%",
      "done": false,
      "createdAt": "2024-05-01T12:00:00Z"
    }"#;

    let todo: Todo = serde_json::from_str(json).unwrap();
    assert_eq!(todo.id, 1);
    assert_eq!(todo.title, "Buy milk");
    assert_eq!(todo.description, "2%");
    assert!(!todo.done);
    assert!(todo.created_at.is_some());
  }

  #[test]
  fn test_decode_todo_without_created_at() {
    let json = r#"{"id": 7, "title": "x", "description": "y", "done": true}"#;

    let todo: Todo = serde_json::from_str(json).unwrap();
    assert_eq!(todo.id, 7);
    assert!(todo.done);
    assert!(todo.created_at.is_none());
  }

  #[test]
  fn test_encode_new_todo() {
    let new = NewTodo {
      title: "Buy milk".to_string(),
      description: "2%".to_string(),
    };

    let json = serde_json::to_value(&new).unwrap();
    assert_eq!(
      json,
      serde_json::json!({"title": "Buy milk", "description": "2%"})
    );
  }

  #[test]
  fn test_decode_todo_list() {
    let json = r#"[
      {"id": 1, "title": "a", "description": "", "done": false},
      {"id": 2, "title": "b", "description": "", "done": true}
    ]"#;

    let todos: Vec<Todo> = serde_json::from_str(json).unwrap();
    assert_eq!(todos.len(), 2);
    assert_eq!(todos[0].id, 1);
    assert!(todos[1].done);
  }
}
