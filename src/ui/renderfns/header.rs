use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the header bar with logo, server context, and shortcuts
pub fn draw_header(frame: &mut Frame, area: Rect, title: &str) {
  let header = Line::from(vec![
    Span::styled(" tdo ", Style::default().fg(Color::Cyan).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(format!(" {} ", title), Style::default().fg(Color::White)),
    Span::raw("  "),
    // Shortcuts - keys highlighted, descriptions dimmed
    Span::styled("<a>", Style::default().fg(Color::Cyan)),
    Span::styled(" add", Style::default().fg(Color::DarkGray)),
    Span::raw("   "),
    Span::styled("<Enter>", Style::default().fg(Color::Cyan)),
    Span::styled(" done", Style::default().fg(Color::DarkGray)),
    Span::raw("   "),
    Span::styled("<r>", Style::default().fg(Color::Cyan)),
    Span::styled(" refresh", Style::default().fg(Color::DarkGray)),
    Span::raw("   "),
    Span::styled("<q>", Style::default().fg(Color::Cyan)),
    Span::styled(" quit", Style::default().fg(Color::DarkGray)),
  ]);

  let paragraph = Paragraph::new(header).style(Style::default().bg(Color::Black));

  frame.render_widget(paragraph, area);
}

/// Extract the domain from the server URL for header display
pub fn extract_domain(url: &str) -> &str {
  url
    .strip_prefix("https://")
    .or_else(|| url.strip_prefix("http://"))
    .unwrap_or(url)
    .split('/')
    .next()
    .unwrap_or(url)
}
