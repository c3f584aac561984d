use super::runner::ViewerEvent;
use crate::scheduler::{Comparison, Metric, RunResult};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io::{self, Stdout},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Spans,
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Tabs},
    Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

const TICK_RATE: Duration = Duration::from_millis(200);

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen)?;

        // Set up the input handling thread; it exits once the receiver is dropped
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = TICK_RATE
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        Ok(Event::Key(key)) => {
                            if input_tx.send(DisplayEvent::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(_) => break,
                    },
                    Ok(false) => {}
                    Err(_) => break,
                }

                if last_tick.elapsed() >= TICK_RATE {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, input_rx })
    }

    pub fn draw(&mut self, comparison: &Comparison, selected: usize) -> Result<()> {
        let titles: Vec<Spans> = comparison
            .results
            .iter()
            .enumerate()
            .map(|(index, result)| Spans::from(format!("{} {}", index + 1, result.discipline)))
            .collect();
        let result = &comparison.results[selected];

        self.terminal
            .draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .margin(1)
                    .constraints([
                        Constraint::Length(3),
                        Constraint::Min(6),
                        Constraint::Length(5),
                        Constraint::Length(6),
                    ])
                    .split(f.size());

                let tabs = Tabs::new(titles)
                    .select(selected)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title("Disciplines (←/→, 1-4, q to quit)")
                            .border_type(BorderType::Rounded),
                    )
                    .highlight_style(
                        Style::default()
                            .add_modifier(Modifier::BOLD)
                            .fg(Color::LightBlue),
                    );
                f.render_widget(tabs, chunks[0]);

                f.render_widget(process_table(result), chunks[1]);

                let gantt = Paragraph::new(result.gantt.render())
                    .style(Style::default().fg(Color::LightYellow))
                    .block(Block::default().title("Gantt Chart").borders(Borders::ALL));
                f.render_widget(gantt, chunks[2]);

                let summary = Paragraph::new(summary_text(comparison, result))
                    .block(Block::default().title("Summary").borders(Borders::ALL));
                f.render_widget(summary, chunks[3]);
            })
            .context("failed to draw frame")?;
        Ok(())
    }

    pub fn get_input(&self) -> ViewerEvent {
        // The input thread only stops when the terminal is gone
        let event = match self.input_rx.recv() {
            Ok(event) => event,
            Err(_) => return ViewerEvent::Quit,
        };

        match event {
            DisplayEvent::Input(key) if key.modifiers.is_empty() => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => ViewerEvent::Quit,
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => ViewerEvent::Next,
                KeyCode::Left | KeyCode::Char('h') => ViewerEvent::Previous,
                KeyCode::Char(c) => match c.to_digit(10) {
                    Some(digit) if digit > 0 => ViewerEvent::Select(digit as usize - 1),
                    _ => ViewerEvent::None,
                },
                _ => ViewerEvent::None,
            },
            DisplayEvent::Input(_) | DisplayEvent::Tick => ViewerEvent::None,
        }
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn process_table(result: &RunResult) -> Table<'_> {
    let rows = result.processes.iter().map(|state| {
        let process = state.process();
        let metric = |value: Option<i64>| value.map_or_else(|| "-".to_owned(), |v| v.to_string());
        Row::new(vec![
            Cell::from(format!("P{}", process.id()))
                .style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from(process.arrival_time().to_string()),
            Cell::from(process.burst_time().to_string()),
            Cell::from(process.priority().to_string()),
            Cell::from(metric(state.completion_time())),
            Cell::from(metric(state.waiting_time())),
            Cell::from(metric(state.turnaround_time())),
        ])
    });

    Table::new(rows)
        .header(
            Row::new(vec![
                "PID",
                "Arrival",
                "Burst",
                "Priority",
                "Completion",
                "Waiting",
                "Turnaround",
            ])
            .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .widths(&[
            Constraint::Length(5),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(9),
            Constraint::Length(11),
            Constraint::Length(8),
            Constraint::Length(11),
        ])
        .block(
            Block::default()
                .title(result.discipline.as_str())
                .borders(Borders::ALL),
        )
        .style(Style::default().fg(Color::LightGreen))
        .column_spacing(1)
}

fn summary_text(comparison: &Comparison, result: &RunResult) -> String {
    let best_waiting = comparison.best(Metric::WaitingTime);
    let best_turnaround = comparison.best(Metric::TurnaroundTime);
    format!(
        "Average waiting time: {:.2}    Average turnaround time: {:.2}\n\
         CPU utilization: {:.1}%    Context switches: {}\n\
         Best for waiting time: {} ({:.2})\n\
         Best for turnaround time: {} ({:.2})",
        result.average_waiting_time,
        result.average_turnaround_time,
        result.cpu_utilization() * 100.0,
        result.gantt.context_switches(),
        best_waiting.discipline,
        best_waiting.average_waiting_time,
        best_turnaround.discipline,
        best_turnaround.average_turnaround_time
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::compare_all;
    use crate::simulator::workload::SampleSet;

    #[test]
    fn summary_reports_selected_run_and_winners() {
        let comparison = compare_all(&SampleSet::Uniform.processes(), 3).unwrap();
        let round_robin = &comparison.results[3];
        let text = summary_text(&comparison, round_robin);

        assert!(text.contains("CPU utilization: 100.0%"));
        assert!(text.contains("Context switches: 8"));
        assert!(text.contains("Best for waiting time: SJF"));
    }
}
