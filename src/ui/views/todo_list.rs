use crate::api::types::{NewTodo, Todo};
use crate::api::TodoClient;
use crate::query::{Mutation, Query, QueryState};
use crate::ui::components::{KeyResult, TodoForm, TodoFormEvent};
use crate::ui::ensure_valid_selection;
use crate::ui::renderfns::{done_mark, truncate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

/// Actions a view can request from the app in response to user input
pub enum ViewAction {
  /// No action needed
  None,
  /// Exit the application
  Quit,
}

/// The root view: the cached todo list plus the create form.
///
/// Owns the list query and both mutations. Mutation completions are folded
/// into the cache from `tick()`: a successful create is appended directly
/// (no refetch), a successful mark-done invalidates the whole list and
/// refetches in the background. Failed mutations are logged and otherwise
/// silent, matching the behavior of the web client this replaces.
pub struct TodoListView {
  client: TodoClient,
  todos: Query<Vec<Todo>>,
  create: Mutation<Todo>,
  mark_done: Mutation<i64>,
  list_state: ListState,
  form: TodoForm,
}

impl TodoListView {
  pub fn new(client: TodoClient) -> Self {
    let client_for_query = client.clone();
    let mut todos = Query::new(move || {
      let client = client_for_query.clone();
      async move { client.list().await.map_err(|e| e.to_string()) }
    });

    // Start fetching immediately
    todos.fetch();

    Self {
      client,
      todos,
      create: Mutation::new(),
      mark_done: Mutation::new(),
      list_state: ListState::default(),
      form: TodoForm::new(),
    }
  }

  pub fn is_form_open(&self) -> bool {
    self.form.is_open()
  }

  fn todos(&self) -> &[Todo] {
    self.todos.data().map(|v| v.as_slice()).unwrap_or(&[])
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    // The modal captures all input while open
    match self.form.handle_key(key) {
      KeyResult::Event(TodoFormEvent::Submitted(new)) => {
        self.submit_create(new);
        return ViewAction::None;
      }
      KeyResult::Event(TodoFormEvent::Cancelled) | KeyResult::Handled => return ViewAction::None,
      KeyResult::NotHandled => {}
    }

    match key.code {
      KeyCode::Char('j') | KeyCode::Down => self.list_state.select_next(),
      KeyCode::Char('k') | KeyCode::Up => self.list_state.select_previous(),
      KeyCode::Char('a') => self.form.open(),
      KeyCode::Char('r') => self.todos.refetch(),
      KeyCode::Enter => self.mark_selected_done(),
      KeyCode::Char('q') => return ViewAction::Quit,
      // Esc only dismisses the modal; on the bare list it does nothing,
      // so mashing Esc past a cancelled form cannot exit the app
      KeyCode::Esc => {}
      _ => {}
    }
    ViewAction::None
  }

  fn submit_create(&mut self, new: NewTodo) {
    let client = self.client.clone();
    self
      .create
      .start(async move { client.create(&new).await.map_err(|e| e.to_string()) });
  }

  fn mark_selected_done(&mut self) {
    let Some(idx) = self.list_state.selected() else {
      return;
    };
    let Some(todo) = self.todos().get(idx) else {
      return;
    };

    // Done is one-way; selecting an already-done todo sends nothing
    if todo.done {
      return;
    }

    let id = todo.id;
    let client = self.client.clone();
    self.mark_done.start(async move {
      client.mark_done(id).await.map_err(|e| e.to_string())?;
      Ok(id)
    });
  }

  /// Poll the query and fold finished mutations into the cache.
  pub fn tick(&mut self) {
    self.todos.poll();

    if let Some(result) = self.create.poll() {
      match result {
        Ok(todo) => {
          // Merge the server's task straight into the cache, no refetch
          self.todos.update(|list| list.push(todo));
          self.form.reset();
          self.form.close();
        }
        Err(error) => {
          // The modal stays open with its values; nothing is surfaced
          tracing::warn!(error = %error, "failed to create todo");
        }
      }
    }

    if let Some(result) = self.mark_done.poll() {
      match result {
        Ok(id) => {
          tracing::debug!(id, "todo marked done, refetching list");
          self.todos.invalidate();
        }
        Err(error) => {
          // Cache left untouched
          tracing::warn!(error = %error, "failed to mark todo done");
        }
      }
    }
  }

  pub fn render(&mut self, frame: &mut Frame, area: Rect) {
    self.render_list(frame, area);
    self.form.render_overlay(frame, area);
  }

  fn render_list(&mut self, frame: &mut Frame, area: Rect) {
    let len = self.todos().len();
    ensure_valid_selection(&mut self.list_state, len);

    let title = match self.todos.state() {
      QueryState::Idle | QueryState::Loading => " Todos (loading...) ".to_string(),
      QueryState::Error(_) => " Todos ".to_string(),
      QueryState::Ready(_) if self.todos.is_fetching() => {
        format!(" Todos ({}) (refreshing...) ", len)
      }
      QueryState::Ready(_) => format!(" Todos ({}) ", len),
    };

    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    if let Some(error) = self.todos.error() {
      let paragraph = Paragraph::new(error.to_string())
        .block(block)
        .style(Style::default().fg(Color::Red));
      frame.render_widget(paragraph, area);
      return;
    }

    if self.todos().is_empty() {
      let content = if self.todos.is_loading() {
        "Loading..."
      } else {
        "No todos yet. Press 'a' to add one."
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    let items: Vec<ListItem> = self
      .todos()
      .iter()
      .map(|todo| {
        let (mark, color) = done_mark(todo.done);
        let title_style = if todo.done {
          Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
        } else {
          Style::default()
        };

        let line = Line::from(vec![
          Span::styled(format!(" {} ", mark), Style::default().fg(color)),
          Span::styled(truncate(&todo.title, 60), title_style),
        ]);
        ListItem::new(line)
      })
      .collect();

    let list = List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::DarkGray)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut self.list_state);
  }
}
