use ratatui::{prelude::*, widgets::*};

use crate::{alert::Alerter, app::App, session::{SessionType, format_clock}};

const BORDER_COLOR: Color = Color::Rgb(0, 200, 255);
const ACCENT_COLOR: Color = Color::Rgb(255, 100, 0);

fn session_color(session: SessionType) -> Color {
    match session {
        // sky
        SessionType::Work => Color::Rgb(14, 165, 233),
        // teal
        SessionType::Break => Color::Rgb(20, 184, 166),
    }
}

pub fn render<A: Alerter>(f: &mut Frame, app: &App<A>) {
    let engine = &app.engine;
    let shell = app.shell();
    let color = session_color(engine.session_type());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)])
        .split(f.size());

    // Header
    let header = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(Span::styled(" 🍅 FOCUSFLOW ", Style::default()
            .fg(ACCENT_COLOR).add_modifier(Modifier::BOLD)));
    f.render_widget(header, chunks[0]);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(15),
            Constraint::Length(1), Constraint::Length(1),
            Constraint::Length(3), Constraint::Length(1),
            Constraint::Length(1), Constraint::Length(1),
            Constraint::Length(3), Constraint::Length(1),
            Constraint::Length(1), Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Percentage(15),
        ])
        .split(chunks[1]);

    f.render_widget(
        Paragraph::new(engine.session_type().label().to_uppercase())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[1],
    );

    f.render_widget(
        Paragraph::new(format_clock(engine.time_left()))
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[3],
    );

    let (status, status_color) = if engine.is_active() {
        ("● RUNNING", Color::Green)
    } else {
        ("⏸  PAUSED", Color::Yellow)
    };
    f.render_widget(
        Paragraph::new(status)
            .style(Style::default().fg(status_color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[5],
    );

    f.render_widget(
        Gauge::default()
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .percent((engine.progress() * 100.0) as u16),
        sections[7],
    );

    let stats = Line::from(vec![
        Span::styled("Today's focused minutes: ", Style::default().fg(Color::Gray)),
        Span::styled(
            shell.stats().minutes.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(stats).alignment(Alignment::Center), sections[9]);

    let config = shell.config();
    let settings = format!(
        "Sound {}  •  Notifications {}",
        on_off(config.sound_enabled),
        on_off(config.notifications_enabled)
    );
    f.render_widget(
        Paragraph::new(settings).style(Style::default().fg(Color::DarkGray)).alignment(Alignment::Center),
        sections[11],
    );

    let controls = Line::from(vec![
        span_key("Space"), Span::raw(if engine.is_active() { " Pause  •  " } else { " Start  •  " }),
        span_key("R"), Span::raw(" Reset  •  "),
        span_key("S"), Span::raw(" Sound  •  "),
        span_key("N"), Span::raw(" Notifications  •  "),
        span_key("Q"), Span::raw(" Quit"),
    ]);
    f.render_widget(
        Paragraph::new(controls)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(BORDER_COLOR))),
        chunks[2],
    );
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "ON" } else { "OFF" }
}

fn span_key(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alert::RecordingAlerter,
        clock::ManualClock,
        config::Config,
        engine::TimerEngine,
        shell::SessionShell,
        store::MemoryStore,
    };
    use chrono::NaiveDate;
    use ratatui::{Terminal, backend::TestBackend};
    use std::{path::PathBuf, rc::Rc};

    #[test]
    fn renders_countdown_and_stats() {
        let store = Rc::new(MemoryStore::new());
        let clock = Rc::new(ManualClock::new(0, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        let shell = SessionShell::new(store.clone(), clock.clone(), Config::default(), RecordingAlerter::default());
        let app = App::new(TimerEngine::new(store, clock, shell), PathBuf::from("unused"));

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(text.contains("FOCUS"));
        assert!(text.contains("25:00"));
        assert!(text.contains("PAUSED"));
        assert!(text.contains("Today's focused minutes: 0"));
    }
}
