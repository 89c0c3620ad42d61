use crate::api::types::{NewTodo, Todo};
use color_eyre::{eyre::eyre, Result};
use url::Url;

/// Todo API client wrapper.
///
/// A thin reqwest wrapper over the three endpoints of the todo service.
/// No retries, no timeouts: a failed request surfaces immediately to the
/// caller as a terminal error for that attempt.
#[derive(Debug, Clone)]
pub struct TodoClient {
  http: reqwest::Client,
  base: Url,
}

impl TodoClient {
  pub fn new(base_url: &str) -> Result<Self> {
    let base =
      Url::parse(base_url).map_err(|e| eyre!("Invalid server URL {}: {}", base_url, e))?;

    Ok(Self {
      http: reqwest::Client::new(),
      base,
    })
  }

  fn endpoint(&self, path: &str) -> Result<Url> {
    self
      .base
      .join(path)
      .map_err(|e| eyre!("Invalid endpoint {}: {}", path, e))
  }

  /// Fetch the full todo collection.
  pub async fn list(&self) -> Result<Vec<Todo>> {
    let url = self.endpoint("/api/todos")?;

    let todos = self
      .http
      .get(url)
      .send()
      .await
      .map_err(|e| eyre!("Failed to fetch todos: {}", e))?
      .error_for_status()
      .map_err(|e| eyre!("Failed to fetch todos: {}", e))?
      .json()
      .await
      .map_err(|e| eyre!("Failed to parse todo list: {}", e))?;

    Ok(todos)
  }

  /// Create a todo; returns the server-assigned task (id, done=false).
  pub async fn create(&self, new: &NewTodo) -> Result<Todo> {
    let url = self.endpoint("/api/todos")?;

    let todo = self
      .http
      .post(url)
      .json(new)
      .send()
      .await
      .map_err(|e| eyre!("Failed to create todo: {}", e))?
      .error_for_status()
      .map_err(|e| eyre!("Failed to create todo: {}", e))?
      .json()
      .await
      .map_err(|e| eyre!("Failed to parse created todo: {}", e))?;

    Ok(todo)
  }

  /// Mark one todo done. The response body is not interpreted, only
  /// success/failure matters.
  pub async fn mark_done(&self, id: i64) -> Result<()> {
    let url = self.endpoint(&format!("/api/todos/{}/done", id))?;

    self
      .http
      .patch(url)
      .send()
      .await
      .map_err(|e| eyre!("Failed to mark todo {} done: {}", id, e))?
      .error_for_status()
      .map_err(|e| eyre!("Failed to mark todo {} done: {}", id, e))?;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use wiremock::matchers::{body_json, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  #[tokio::test]
  async fn test_list_decodes_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/api/todos"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([
        {"id": 1, "title": "Buy milk", "description": "2%", "done": false},
        {"id": 2, "title": "Walk dog", "description": "", "done": true},
      ])))
      .expect(1)
      .mount(&server)
      .await;

    let client = TodoClient::new(&server.uri()).unwrap();
    let todos = client.list().await.unwrap();

    assert_eq!(todos.len(), 2);
    assert_eq!(todos[0].title, "Buy milk");
    assert!(!todos[0].done);
    assert!(todos[1].done);
  }

  #[tokio::test]
  async fn test_list_surfaces_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/api/todos"))
      .respond_with(ResponseTemplate::new(500))
      .mount(&server)
      .await;

    let client = TodoClient::new(&server.uri()).unwrap();
    let err = client.list().await.unwrap_err();

    assert!(err.to_string().contains("Failed to fetch todos"));
  }

  #[tokio::test]
  async fn test_list_surfaces_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/api/todos"))
      .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
      .mount(&server)
      .await;

    let client = TodoClient::new(&server.uri()).unwrap();
    let err = client.list().await.unwrap_err();

    assert!(err.to_string().contains("Failed to parse todo list"));
  }

  #[tokio::test]
  async fn test_create_posts_fields_and_returns_task() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/api/todos"))
      .and(body_json(json!({"title": "Buy milk", "description": "2%"})))
      .respond_with(ResponseTemplate::new(201).set_body_json(json!({
        "id": 1, "title": "Buy milk", "description": "2%", "done": false,
        "createdAt": "2024-05-01T12:00:00Z",
      })))
      .expect(1)
      .mount(&server)
      .await;

    let client = TodoClient::new(&server.uri()).unwrap();
    let todo = client
      .create(&NewTodo {
        title: "Buy milk".to_string(),
        description: "2%".to_string(),
      })
      .await
      .unwrap();

    assert_eq!(todo.id, 1);
    assert!(!todo.done);
  }

  #[tokio::test]
  async fn test_mark_done_patches_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
      .and(path("/api/todos/7/done"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "id": 7, "title": "x", "description": "", "done": true,
      })))
      .expect(1)
      .mount(&server)
      .await;

    let client = TodoClient::new(&server.uri()).unwrap();
    client.mark_done(7).await.unwrap();
  }

  #[tokio::test]
  async fn test_mark_done_surfaces_failure() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
      .and(path("/api/todos/9/done"))
      .respond_with(ResponseTemplate::new(401).set_body_string("Todo not found"))
      .mount(&server)
      .await;

    let client = TodoClient::new(&server.uri()).unwrap();
    let err = client.mark_done(9).await.unwrap_err();

    assert!(err.to_string().contains("Failed to mark todo 9 done"));
  }
}
