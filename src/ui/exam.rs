use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{AnswerSet, Question};
use crate::session::SessionStore;

pub fn render<S: SessionStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let Some(question) = app.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], app);
    render_navigator(frame, chunks[1], app);
    render_question_text(frame, chunks[2], question);
    render_options(frame, chunks[3], question, app.answers(), app.selected_option());
    render_notice(frame, chunks[4], app);
    render_controls(frame, chunks[5]);
}

fn render_progress<S: SessionStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let progress = format!(
        "answered {}/{}    {}/{}",
        app.answered_count(),
        app.total_questions(),
        app.current_question_number(),
        app.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

/// One cell per question: current, answered or open.
fn render_navigator<S: SessionStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let spans: Vec<Span> = app
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let style = if index == app.current_question_index() {
                Style::default().fg(Color::Black).bg(Color::Cyan).bold()
            } else if app.answers().is_answered(question.id) {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!(" {} ", index + 1), style)
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_question_text(frame: &mut Frame, area: Rect, question: &Question) {
    let hint = if question.is_multi_answer() {
        "select all that apply"
    } else {
        "select one"
    };

    let lines = vec![
        Line::from(Span::styled(
            question.text.as_str(),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(Span::styled(
            format!("{} · {}", question.kind().label(), hint),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    answers: &AnswerSet,
    cursor: usize,
) {
    let chosen = answers.get(question.id);
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let is_cursor = index == cursor;
        let is_chosen = chosen.is_some_and(|answer| answer.contains(&option.id));

        let style = match (is_cursor, is_chosen) {
            (true, _) => Style::default().fg(Color::Cyan).bold(),
            (false, true) => Style::default().fg(Color::Green),
            (false, false) => Style::default().fg(Color::Gray),
        };
        let marker = if is_cursor { ">" } else { " " };
        let check = match (question.is_multi_answer(), is_chosen) {
            (true, true) => "[x]",
            (true, false) => "[ ]",
            (false, true) => "(*)",
            (false, false) => "( )",
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{} ", check), style),
            Span::styled(format!("{}. ", option.id), style),
            Span::styled(option.text.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_notice<S: SessionStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let (text, color) = match app.notice() {
        Some(notice) => (notice.to_string(), Color::Yellow),
        None if app.all_answered() => ("All questions answered!".to_string(), Color::Green),
        None => (String::new(), Color::Reset),
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(color);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k option  ·  enter select  ·  h/l question  ·  s submit  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
