use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};

use crate::dispatch::{self, Effect, Input};
use crate::launcher::{LaunchError, LinkLauncher};
use crate::model::StoryList;
use crate::view::{self, ViewOptions};

const COLOR_TEXT_PRIMARY: Color = Color::Rgb(205, 214, 244);
const COLOR_TEXT_SECONDARY: Color = Color::Rgb(166, 173, 200);
const COLOR_PANEL_SELECTED_BG: Color = Color::Rgb(69, 71, 90);
const COLOR_ACCENT: Color = Color::Rgb(137, 180, 250);
const COLOR_ERROR: Color = Color::Rgb(243, 139, 168);

pub fn input_from_key(key: KeyEvent) -> Input {
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Input::CtrlC
        }
        KeyCode::Up => Input::Up,
        KeyCode::Down => Input::Down,
        KeyCode::Enter => Input::Confirm,
        KeyCode::Esc => Input::Esc,
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => Input::Char(ch),
        _ => Input::Other,
    }
}

/// The interactive session: the story list, the link launcher and the
/// status line shown under the list.
pub struct Shell {
    list: StoryList,
    view: ViewOptions,
    launcher: Box<dyn LinkLauncher>,
    status_message: String,
    status_is_error: bool,
}

impl Shell {
    pub fn new(list: StoryList, view: ViewOptions, launcher: Box<dyn LinkLauncher>) -> Self {
        let status_message = format!("{} stories loaded.", list.len());
        Self {
            list,
            view,
            launcher,
            status_message,
            status_is_error: false,
        }
    }

    pub fn list(&self) -> &StoryList {
        &self.list
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Applies one key press. Returns `true` once the session should end.
    pub fn handle_input(&mut self, input: Input) -> bool {
        match dispatch::dispatch(&mut self.list, input, self.view.quit_keys) {
            Some(Effect::Terminate) => true,
            Some(Effect::LaunchUrl(url)) => {
                self.launch(&url);
                false
            }
            None => false,
        }
    }

    fn launch(&mut self, url: &str) {
        match self.launcher.open(url) {
            Ok(()) => {
                log::info!("opened {url}");
                self.status_message = format!("Opened {url}");
                self.status_is_error = false;
            }
            Err(LaunchError::Unsupported(platform)) => {
                log::warn!("cannot open links on {platform}; skipping {url}");
            }
            Err(err) => {
                log::warn!("failed to open '{url}': {err}");
                self.status_message = format!("Failed to open '{url}': {err}");
                self.status_is_error = true;
            }
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        terminal.backend_mut().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                self.redraw(terminal)?;
                needs_redraw = false;
            }

            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_input(input_from_key(key)) {
                        log::info!("quit requested");
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => needs_redraw = true,
                _ => {}
            }
        }
        Ok(())
    }

    pub fn redraw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|frame| self.draw(frame))?;
        Ok(())
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(frame.size());

        let header: Vec<Line> = self
            .view
            .header_lines()
            .into_iter()
            .map(Line::from)
            .collect();
        let header = Paragraph::new(header).style(
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(header, layout[0]);

        self.draw_stories(frame, layout[1]);

        let status_color = if self.status_is_error {
            COLOR_ERROR
        } else {
            COLOR_TEXT_SECONDARY
        };
        let status = Paragraph::new(self.status_message.as_str())
            .style(Style::default().fg(status_color));
        frame.render_widget(status, layout[2]);

        let footer = Paragraph::new(self.view.footer()).style(
            Style::default()
                .fg(COLOR_TEXT_SECONDARY)
                .add_modifier(Modifier::ITALIC),
        );
        frame.render_widget(footer, layout[3]);
    }

    fn draw_stories(&self, frame: &mut Frame<'_>, area: Rect) {
        if self.list.is_empty() {
            let empty = Paragraph::new("No stories to show")
                .style(Style::default().fg(COLOR_TEXT_SECONDARY));
            frame.render_widget(empty, area);
            return;
        }

        let cursor = self.list.cursor();
        let items: Vec<ListItem> = view::story_lines(&self.list)
            .into_iter()
            .enumerate()
            .map(|(idx, line)| {
                let style = if Some(idx) == cursor {
                    Style::default()
                        .fg(COLOR_TEXT_PRIMARY)
                        .bg(COLOR_PANEL_SELECTED_BG)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(COLOR_TEXT_PRIMARY)
                };
                ListItem::new(line).style(style)
            })
            .collect();

        let mut state = ListState::default().with_selected(cursor);
        frame.render_stateful_widget(List::new(items), area, &mut state);
    }
}
