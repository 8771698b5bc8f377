mod exam;
mod results;
mod review;
mod upload;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::models::AppState;
use crate::session::SessionStore;

pub fn render<S: SessionStore>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.state {
        AppState::Upload => upload::render(frame, area, app),
        AppState::Exam => exam::render(frame, area, app),
        AppState::Results => results::render(frame, area, app),
        AppState::Review => review::render(frame, area, app),
    }
}

/// Shortens `text` to `max` characters, adding an ellipsis when cut.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let truncated: String = text.chars().take(max).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
        assert_eq!(truncate("a longer question", 8), "a longer...");
        assert_eq!(truncate("ünïcödé", 3), "ünï...");
    }
}
