use crate::errors::RoostError;
use crate::hotkeys::playback_controls_legend;
use crate::panel::RecorderPanel;
use crate::steps::{source_lines, StepView};
use crate::types::PanelView;
use ratatui::backend::TestBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Terminal;

pub const EMPTY_STEPS_HINT: &str = "Click Record to start capturing actions";

pub fn render_panel(panel: &RecorderPanel, width: u16, height: u16) -> Result<String, RoostError> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).map_err(|e| RoostError::Render(e.to_string()))?;
    let banner = panel.error_banner();
    let source = panel.current_source();
    let toolbar = panel.toolbar();

    terminal
        .draw(|frame| {
            let mut constraints = vec![Constraint::Length(3), Constraint::Length(3)];
            if banner.is_some() {
                constraints.push(Constraint::Length(4));
            }
            constraints.push(Constraint::Min(3));
            constraints.push(Constraint::Length(1));
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints(constraints)
                .split(frame.area());

            let mode_style = if toolbar.recording {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Gray)
            };
            let header = Paragraph::new(Line::from(vec![
                Span::styled(
                    panel.recording_name().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  mode="),
                Span::styled(panel.mode().as_str(), mode_style),
            ]))
            .block(Block::default().borders(Borders::ALL).title("Roost"));
            frame.render_widget(header, chunks[0]);

            let target = if source.label.is_empty() {
                source.id.clone()
            } else {
                source.label.clone()
            };
            let toolbar_line = Paragraph::new(format!("{}  Target: {target}", toolbar.summary()))
                .block(Block::default().borders(Borders::ALL).title("Toolbar"));
            frame.render_widget(toolbar_line, chunks[1]);

            let mut next = 2;
            if let Some(message) = &banner {
                let text = vec![
                    Line::from(Span::styled(
                        "Playback Error",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!("{message}  [Resume Recording] [Dismiss]")),
                ];
                frame.render_widget(
                    Paragraph::new(text)
                        .wrap(Wrap { trim: true })
                        .block(Block::default().borders(Borders::ALL)),
                    chunks[next],
                );
                next += 1;
            }

            match panel.view() {
                PanelView::Steps => {
                    let steps = panel.display_steps();
                    let block = Block::default().borders(Borders::ALL).title("Steps");
                    if steps.is_empty() {
                        frame.render_widget(Paragraph::new(EMPTY_STEPS_HINT).block(block), chunks[next]);
                    } else {
                        let items = steps
                            .iter()
                            .enumerate()
                            .map(|(index, step)| step_item(index, step))
                            .collect::<Vec<_>>();
                        frame.render_widget(List::new(items).block(block), chunks[next]);
                    }
                }
                PanelView::Code => {
                    let lines = source_lines(&source.text)
                        .map(|line| Line::from(format!("{:>3} {}", line.index + 1, line.text)))
                        .collect::<Vec<_>>();
                    frame.render_widget(
                        Paragraph::new(lines).block(
                            Block::default()
                                .borders(Borders::ALL)
                                .title(format!("Code ({})", source.language)),
                        ),
                        chunks[next],
                    );
                }
            }

            frame.render_widget(Paragraph::new(playback_controls_legend()), chunks[next + 1]);
        })
        .map_err(|e| RoostError::Render(e.to_string()))?;

    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..height {
        let mut row = String::new();
        for x in 0..width {
            if let Some(cell) = buffer.cell((x, y)) {
                row.push_str(cell.symbol());
            }
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }
    Ok(out)
}

fn step_item(index: usize, step: &StepView) -> ListItem<'static> {
    let mut spans = vec![
        Span::styled(format!("{:>2}.", index + 1), Style::default().fg(Color::Cyan)),
        Span::raw(format!(" {}", step.title())),
    ];
    if let Some(target) = step.target() {
        spans.push(Span::styled(
            format!("  {target}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(error) = step.error() {
        spans.push(Span::styled(
            format!("  ! {error}"),
            Style::default().fg(Color::Red),
        ));
    }
    let mut lines = vec![Line::from(spans)];
    lines.extend(
        step.messages()
            .iter()
            .map(|message| Line::from(format!("     {message}"))),
    );
    ListItem::new(lines)
}

#[cfg(test)]
mod tests {
    use super::{render_panel, EMPTY_STEPS_HINT};
    use crate::config::AppConfig;
    use crate::dispatch::FakeEventSink;
    use crate::panel::RecorderPanel;
    use crate::sources::Source;
    use std::sync::Arc;

    #[test]
    fn empty_panel_shows_hint_and_legend() {
        let panel = RecorderPanel::new(Arc::new(FakeEventSink::default()), &AppConfig::default());
        let frame = render_panel(&panel, 80, 16).expect("render");
        assert!(frame.contains("new recording"));
        assert!(frame.contains("mode=none"));
        assert!(frame.contains(EMPTY_STEPS_HINT));
        assert!(frame.contains("F8 resume/pause"));
    }

    #[test]
    fn steps_are_numbered_in_source_order() {
        let mut panel =
            RecorderPanel::new(Arc::new(FakeEventSink::default()), &AppConfig::default());
        panel.update_sources(vec![Source {
            id: "test.spec.ts".to_string(),
            label: "Test".to_string(),
            language: "javascript".to_string(),
            text: "await page.goto('https://x.com');\nawait page.getByText('Go').click();"
                .to_string(),
            is_recorded: true,
            reveal_line: None,
        }]);
        let frame = render_panel(&panel, 80, 16).expect("render");
        let first = frame.find(" 1. Go to https://x.com").expect("first step");
        let second = frame.find(" 2. Click on \"Go\"").expect("second step");
        assert!(first < second);
        assert!(frame.contains("Target: Test"));
    }
}
