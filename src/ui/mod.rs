pub mod components;
pub mod renderfns;
pub mod views;

use crate::app::App;
use ratatui::prelude::*;
use ratatui::widgets::{ListState, Paragraph};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Main content
      Constraint::Length(1), // Status bar
    ])
    .split(frame.area());

  renderfns::draw_header(frame, chunks[0], app.title());
  let content = chunks[1];
  let status = chunks[2];
  app.view_mut().render(frame, content);
  draw_status_bar(frame, status, app);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
  let hint = if app.view().is_form_open() {
    " Enter:create  Tab:next field  Esc:close"
  } else {
    " j/k:nav  Enter:mark done  a:add  r:refresh  q:quit"
  };

  let paragraph = Paragraph::new(hint).style(Style::default().fg(Color::DarkGray));
  frame.render_widget(paragraph, area);
}

/// Keep the list selection inside the current item range.
pub fn ensure_valid_selection(state: &mut ListState, len: usize) {
  match state.selected() {
    Some(_) if len == 0 => state.select(None),
    Some(i) if i >= len => state.select(Some(len - 1)),
    _ => {}
  }
}
