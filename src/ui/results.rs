use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::app::App;
use crate::scoring::{Grade, ScoreSummary};
use crate::session::SessionStore;

pub fn render<S: SessionStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let Some(summary) = app.summary() else {
        return;
    };
    let grade_color = get_grade_color(summary.grade());

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], summary, grade_color);
    render_gauge(frame, chunks[2], summary, grade_color);
    render_counts(frame, chunks[3], summary);
    render_notice(frame, chunks[5], app.notice());
    render_controls(frame, chunks[6]);
}

fn get_grade_color(grade: Grade) -> Color {
    match grade {
        Grade::Excellent => Color::Green,
        Grade::Good => Color::Yellow,
        Grade::Fair => Color::Magenta,
        Grade::NeedsImprovement => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, summary: &ScoreSummary, grade_color: Color) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}%", summary.percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(summary.grade().label().fg(Color::White)),
        Line::from(
            format!("{} out of {} correct", summary.correct_count, summary.total).fg(Color::Gray),
        ),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_gauge(frame: &mut Frame, area: Rect, summary: &ScoreSummary, grade_color: Color) {
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(grade_color))
        .percent(u16::from(summary.percentage))
        .label("");
    frame.render_widget(gauge, area);
}

fn render_counts(frame: &mut Frame, area: Rect, summary: &ScoreSummary) {
    let columns = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);

    let cells = [
        (summary.correct_count, "Correct", Color::Green),
        (summary.incorrect_count(), "Incorrect", Color::Red),
        (summary.total, "Total", Color::White),
    ];

    for ((count, label, color), column) in cells.into_iter().zip(columns.iter()) {
        let widget = Paragraph::new(vec![
            Line::from(count.to_string().fg(color).bold()),
            Line::from(label.fg(Color::DarkGray)),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Color::DarkGray),
        );
        frame.render_widget(widget, *column);
    }
}

fn render_notice(frame: &mut Frame, area: Rect, notice: Option<&str>) {
    if let Some(notice) = notice {
        let widget = Paragraph::new(notice)
            .alignment(Alignment::Center)
            .fg(Color::Yellow);
        frame.render_widget(widget, area);
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("v review  ·  e export  ·  n new exam  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
