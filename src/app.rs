use crate::api::TodoClient;
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::ui;
use crate::ui::renderfns::header::extract_domain;
use crate::ui::views::{TodoListView, ViewAction};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;

/// Main application state
pub struct App {
  /// The single root view
  view: TodoListView,

  /// Header title (config override or the server domain)
  title: String,

  /// Whether to quit
  should_quit: bool,
}

impl App {
  pub fn new(config: Config) -> Result<Self> {
    let client = TodoClient::new(&config.server.url)?;
    let title = config
      .title
      .clone()
      .unwrap_or_else(|| extract_domain(&config.server.url).to_string());

    Ok(Self {
      view: TodoListView::new(client),
      title,
      should_quit: false,
    })
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut events = EventHandler::new(Duration::from_millis(250));

    // Main loop
    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      if let Some(event) = events.next().await {
        self.handle_event(event);
      }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => {
        // Ctrl-C always quits, regardless of what has focus
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
          self.should_quit = true;
          return;
        }

        if let ViewAction::Quit = self.view.handle_key(key) {
          self.should_quit = true;
        }
      }
      Event::Tick => self.view.tick(),
    }
  }

  // Accessors for UI rendering
  pub fn view(&self) -> &TodoListView {
    &self.view
  }

  pub fn view_mut(&mut self) -> &mut TodoListView {
    &mut self.view
  }

  pub fn title(&self) -> &str {
    &self.title
  }
}
