use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::models::{Answer, Question};
use crate::scoring::is_correct;
use crate::session::SessionStore;

const QUESTION_PREVIEW_LENGTH: usize = 70;
/// Header, four options and a spacer.
const LINES_PER_QUESTION: usize = 6;

pub fn render<S: SessionStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let title = Paragraph::new(Span::styled(
        "ANSWER REVIEW",
        Style::default().fg(Color::Cyan).bold(),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(title, chunks[0]);

    let lines: Vec<Line> = app
        .questions()
        .iter()
        .enumerate()
        .flat_map(|(index, question)| question_lines(index, question, app.answers().get(question.id)))
        .collect();

    let scroll = app.review_scroll() * LINES_PER_QUESTION;
    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, chunks[1]);

    let controls = Paragraph::new("j/k scroll  ·  b back to results  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[2]);
}

fn question_lines<'a>(index: usize, question: &'a Question, answer: Option<&'a Answer>) -> Vec<Line<'a>> {
    let correct = is_correct(question, answer);
    let (symbol, color) = if correct {
        ("+", Color::Green)
    } else {
        ("-", Color::Red)
    };

    let mut lines = Vec::with_capacity(LINES_PER_QUESTION);
    lines.push(Line::from(vec![
        Span::styled(format!(" {} ", symbol), Style::default().fg(color).bold()),
        Span::styled(format!("{:2}. ", index + 1), Style::default().fg(Color::DarkGray)),
        Span::styled(
            super::truncate(&question.text, QUESTION_PREVIEW_LENGTH),
            Style::default().fg(Color::White).bold(),
        ),
        Span::styled(
            format!("  [{}]", question.kind().label()),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    for option in &question.options {
        let is_key = question
            .correct_answer
            .as_ref()
            .is_some_and(|key| key.contains(&option.id));
        let is_yours = answer.is_some_and(|a| a.contains(&option.id));

        let (style, tag) = match (is_key, is_yours) {
            (true, true) => (Style::default().fg(Color::Green), "  correct answer · your answer"),
            (true, false) => (Style::default().fg(Color::Green), "  correct answer"),
            (false, true) => (Style::default().fg(Color::Red), "  your answer"),
            (false, false) => (Style::default().fg(Color::Gray), ""),
        };

        lines.push(Line::from(vec![
            Span::styled(format!("      {}. ", option.id), style),
            Span::styled(option.text.as_str(), style),
            Span::styled(tag, Style::default().fg(Color::DarkGray)),
        ]));
    }

    lines.push(Line::from(""));
    lines
}
