use super::{InputResult, KeyResult, TextInput};
use crate::api::types::NewTodo;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Events emitted by the create form that the owning view handles
#[derive(Debug, Clone, PartialEq)]
pub enum TodoFormEvent {
  /// Both fields filled in and Enter pressed
  Submitted(NewTodo),
  /// Form dismissed; entered values are kept for the next open
  Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Field {
  #[default]
  Title,
  Description,
}

/// Modal form for creating a todo.
///
/// Both fields are required; an empty field rejects the submit locally,
/// before any request goes out. Closing the form does not clear the
/// fields - only a successful create does, via `reset()`.
#[derive(Debug, Clone, Default)]
pub struct TodoForm {
  active: bool,
  title: TextInput,
  description: TextInput,
  focus: Field,
  missing: Option<Field>,
}

impl TodoForm {
  pub fn new() -> Self {
    Self::default()
  }

  /// Check if the form is currently shown
  pub fn is_open(&self) -> bool {
    self.active
  }

  /// Show the form. Fields keep whatever was entered before.
  pub fn open(&mut self) {
    self.active = true;
    self.focus = Field::Title;
    self.missing = None;
  }

  /// Hide the form without touching the fields
  pub fn close(&mut self) {
    self.active = false;
  }

  /// Clear both fields (after a successful create)
  pub fn reset(&mut self) {
    self.title.clear();
    self.description.clear();
    self.focus = Field::Title;
    self.missing = None;
  }

  pub fn title(&self) -> &str {
    self.title.value()
  }

  pub fn description(&self) -> &str {
    self.description.value()
  }

  /// Handle a key event
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<TodoFormEvent> {
    if !self.active {
      return KeyResult::NotHandled;
    }

    match key.code {
      KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
        self.focus = match self.focus {
          Field::Title => Field::Description,
          Field::Description => Field::Title,
        };
        return KeyResult::Handled;
      }
      _ => {}
    }

    let input = match self.focus {
      Field::Title => &mut self.title,
      Field::Description => &mut self.description,
    };

    match input.handle_key(key) {
      InputResult::Submitted(_) => self.try_submit(),
      InputResult::Cancelled => {
        self.close();
        KeyResult::Event(TodoFormEvent::Cancelled)
      }
      InputResult::Consumed => {
        self.missing = None;
        KeyResult::Handled
      }
      // Swallow everything else while the modal is open
      InputResult::NotHandled => KeyResult::Handled,
    }
  }

  fn try_submit(&mut self) -> KeyResult<TodoFormEvent> {
    let title = self.title.value().trim();
    let description = self.description.value().trim();

    if title.is_empty() {
      self.missing = Some(Field::Title);
      self.focus = Field::Title;
      return KeyResult::Handled;
    }
    if description.is_empty() {
      self.missing = Some(Field::Description);
      self.focus = Field::Description;
      return KeyResult::Handled;
    }

    KeyResult::Event(TodoFormEvent::Submitted(NewTodo {
      title: title.to_string(),
      description: description.to_string(),
    }))
  }

  /// Render the form overlay if open
  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    if !self.active {
      return;
    }

    let width = 48.min(area.width.saturating_sub(4)).max(24);
    let height = 9.min(area.height.saturating_sub(2)).max(5);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay = Rect::new(x, y, width, height);

    frame.render_widget(Clear, overlay);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Yellow))
      .title(" Create Todo ");
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    if inner.height < 7 {
      return;
    }

    let rows = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(3), // Title field
        Constraint::Length(3), // Description field
        Constraint::Length(1), // Hint line
      ])
      .split(inner);

    self.render_field(frame, rows[0], Field::Title, "Todo", self.title.value());
    self.render_field(
      frame,
      rows[1],
      Field::Description,
      "Description",
      self.description.value(),
    );

    let hint = Paragraph::new(" Enter:create  Tab:next field  Esc:close")
      .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, rows[2]);

    // Place the terminal cursor inside the focused field
    let (row, input) = match self.focus {
      Field::Title => (rows[0], &self.title),
      Field::Description => (rows[1], &self.description),
    };
    frame.set_cursor_position(Position::new(
      row.x + 1 + input.cursor_position() as u16,
      row.y + 1,
    ));
  }

  fn render_field(&self, frame: &mut Frame, area: Rect, field: Field, label: &str, value: &str) {
    let border = if self.missing == Some(field) {
      Style::default().fg(Color::Red)
    } else if self.focus == field {
      Style::default().fg(Color::Cyan)
    } else {
      Style::default().fg(Color::DarkGray)
    };

    let title = if self.missing == Some(field) {
      format!(" {} (required) ", label)
    } else {
      format!(" {} ", label)
    };

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(border)
      .title(title);

    let paragraph = Paragraph::new(value.to_string()).block(block);
    frame.render_widget(paragraph, area);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::KeyModifiers;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn type_str(form: &mut TodoForm, s: &str) {
    for c in s.chars() {
      form.handle_key(key(KeyCode::Char(c)));
    }
  }

  #[test]
  fn test_closed_form_ignores_keys() {
    let mut form = TodoForm::new();
    assert_eq!(
      form.handle_key(key(KeyCode::Char('a'))),
      KeyResult::NotHandled
    );
  }

  #[test]
  fn test_fill_and_submit() {
    let mut form = TodoForm::new();
    form.open();

    type_str(&mut form, "Buy milk");
    form.handle_key(key(KeyCode::Tab));
    type_str(&mut form, "2%");

    let result = form.handle_key(key(KeyCode::Enter));
    assert_eq!(
      result,
      KeyResult::Event(TodoFormEvent::Submitted(NewTodo {
        title: "Buy milk".to_string(),
        description: "2%".to_string(),
      }))
    );
  }

  #[test]
  fn test_empty_title_rejected_locally() {
    let mut form = TodoForm::new();
    form.open();

    form.handle_key(key(KeyCode::Tab));
    type_str(&mut form, "only a description");

    // Submit must not produce an event with a missing required field
    assert_eq!(form.handle_key(key(KeyCode::Enter)), KeyResult::Handled);
    assert!(form.is_open());
  }

  #[test]
  fn test_empty_description_rejected_locally() {
    let mut form = TodoForm::new();
    form.open();
    type_str(&mut form, "title only");

    assert_eq!(form.handle_key(key(KeyCode::Enter)), KeyResult::Handled);
    assert!(form.is_open());
  }

  #[test]
  fn test_whitespace_only_field_is_empty() {
    let mut form = TodoForm::new();
    form.open();
    type_str(&mut form, "   ");
    form.handle_key(key(KeyCode::Tab));
    type_str(&mut form, "desc");

    assert_eq!(form.handle_key(key(KeyCode::Enter)), KeyResult::Handled);
  }

  #[test]
  fn test_escape_closes_but_keeps_fields() {
    let mut form = TodoForm::new();
    form.open();
    type_str(&mut form, "half-typed");

    let result = form.handle_key(key(KeyCode::Esc));
    assert_eq!(result, KeyResult::Event(TodoFormEvent::Cancelled));
    assert!(!form.is_open());

    // Fields persist across opens until a successful submit clears them
    form.open();
    assert_eq!(form.title(), "half-typed");
  }

  #[test]
  fn test_reset_clears_fields() {
    let mut form = TodoForm::new();
    form.open();
    type_str(&mut form, "done with this");
    form.reset();

    assert_eq!(form.title(), "");
    assert_eq!(form.description(), "");
  }

  #[test]
  fn test_tab_cycles_focus_both_ways() {
    let mut form = TodoForm::new();
    form.open();

    type_str(&mut form, "a");
    form.handle_key(key(KeyCode::Tab));
    type_str(&mut form, "b");
    form.handle_key(key(KeyCode::Tab));
    type_str(&mut form, "c");

    assert_eq!(form.title(), "ac");
    assert_eq!(form.description(), "b");
  }
}
