use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;
use crate::session::SessionStore;

pub fn render<S: SessionStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .split(area);

    let file_line = match app.source() {
        Some(path) => Line::from(path.display().to_string().fg(Color::White).bold()),
        None => Line::from("no file given, pass a .csv path".fg(Color::DarkGray)),
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "MCQ/MSQ EXAM",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        file_line,
        Line::from(""),
        Line::from("question, option_a..option_d, correct answer(s) e.g. B or \"A,C\"".fg(Color::DarkGray)),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start  ·  q quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);

    if let Some(error) = app.error() {
        let widget = Paragraph::new(error)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .fg(Color::Red)
            .bold();
        frame.render_widget(widget, chunks[2]);
    }
}
