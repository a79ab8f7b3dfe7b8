use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::config::AppConfig;
use crate::model::display::DisplayItem;
use crate::model::list_view::{self, ListEffect, ListEvent, ListState};
use crate::model::mode::Mode;
use crate::msg::Msg;

/// Screen rows outside the item list: header, status bar, list borders.
const CHROME_ROWS: u16 = 4;
/// Each item takes a title line and a description line.
const ROWS_PER_ITEM: u16 = 2;

pub struct App {
    pub mode: Mode,
    pub list: ListState,
    pub should_quit: bool,
    title: String,
}

impl App {
    pub fn new(config: &AppConfig, items: Vec<DisplayItem>) -> Self {
        Self {
            mode: Mode::Browse,
            list: ListState::new(items, usize::from(config.ui.page_size)),
            should_quit: false,
            title: config.ui.title.clone(),
        }
    }

    // ── MVU: Update ──────────────────────────────────────────────

    pub fn update(&mut self, msg: Msg) -> Result<()> {
        match msg {
            Msg::Key(key) => self.handle_key(key),
            Msg::Resize(_w, h) => self.apply(ListEvent::Resize(item_rows(h))),
        }
        Ok(())
    }

    fn apply(&mut self, event: ListEvent) {
        if list_view::update(&mut self.list, event) == ListEffect::Quit {
            self.should_quit = true;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.apply(ListEvent::Quit);
            return;
        }

        match self.mode {
            Mode::Browse => self.handle_key_browse(key),
            Mode::Filter => self.handle_key_filter(key),
        }
    }

    fn handle_key_browse(&mut self, key: KeyEvent) {
        let event = match key.code {
            KeyCode::Char('q') => ListEvent::Quit,
            KeyCode::Esc if self.list.filter().is_empty() => ListEvent::Quit,
            KeyCode::Esc => ListEvent::ClearFilter,
            KeyCode::Char('/') => {
                self.mode = Mode::Filter;
                return;
            }
            KeyCode::Char('j') | KeyCode::Down => ListEvent::Down,
            KeyCode::Char('k') | KeyCode::Up => ListEvent::Up,
            KeyCode::PageDown | KeyCode::Char('l') | KeyCode::Right => ListEvent::PageDown,
            KeyCode::PageUp | KeyCode::Char('h') | KeyCode::Left => ListEvent::PageUp,
            KeyCode::Home | KeyCode::Char('g') => ListEvent::First,
            KeyCode::End | KeyCode::Char('G') => ListEvent::Last,
            _ => return,
        };
        self.apply(event);
    }

    fn handle_key_filter(&mut self, key: KeyEvent) {
        let event = match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Browse;
                ListEvent::ClearFilter
            }
            KeyCode::Enter => {
                self.mode = Mode::Browse;
                return;
            }
            KeyCode::Backspace => ListEvent::FilterBackspace,
            KeyCode::Down => ListEvent::Down,
            KeyCode::Up => ListEvent::Up,
            KeyCode::Char(ch)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                ListEvent::FilterChar(ch)
            }
            _ => return,
        };
        self.apply(event);
    }

    // ── MVU: View ────────────────────────────────────────────────

    pub fn view(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(1),    // list
                Constraint::Length(1), // status bar
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_list(frame, chunks[1]);
        self.render_status_bar(frame, chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let count = if self.list.filter().is_empty() {
            format!("{} items", self.list.total())
        } else {
            format!("{} of {} items", self.list.visible_count(), self.list.total())
        };

        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", self.title),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {count}"), Style::default().fg(Color::DarkGray)),
        ]);

        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(Color::Rgb(20, 20, 30))),
            area,
        );
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let selected = self.list.selected_index();

        let lines: Vec<Line> = if self.list.visible_count() == 0 {
            vec![Line::from(Span::styled(
                "No matches",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            self.list
                .window()
                .flat_map(|(pos, item)| item_lines(item, Some(pos) == selected))
                .collect()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Rgb(12, 12, 18)));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mode_style = match self.mode {
            Mode::Browse => Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            Mode::Filter => Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        };

        let mode_span = Span::styled(format!(" {} ", self.mode.label()), mode_style);

        let hints = match self.mode {
            Mode::Browse if self.list.filter().is_empty() => {
                " j/k: move  /: filter  g/G: first/last  q: quit ".to_string()
            }
            Mode::Browse => format!(
                " filter: {}  Esc: clear  /: edit  q: quit ",
                self.list.filter()
            ),
            Mode::Filter => format!(" /{}  Enter: apply  Esc: clear ", self.list.filter()),
        };

        let info = Span::styled(hints, Style::default().fg(Color::Gray).bg(Color::DarkGray));

        let bar = Line::from(vec![mode_span, info]);
        let status = Paragraph::new(bar).style(Style::default().bg(Color::DarkGray));
        frame.render_widget(status, area);

        if self.mode == Mode::Filter {
            let label_width = self.mode.label().len() as u16 + 2;
            let cursor_x = area.x + label_width + 2 + self.list.filter().chars().count() as u16;
            frame.set_cursor_position((cursor_x, area.y));
        }
    }
}

fn item_lines(item: &DisplayItem, selected: bool) -> [Line<'static>; 2] {
    let (marker, marker_style) = if item.installed() {
        ("✔ ", Style::default().fg(Color::Green))
    } else {
        ("  ", Style::default())
    };

    let (prefix, title_style, desc_style) = if selected {
        (
            "> ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Cyan),
        )
    } else {
        (
            "  ",
            Style::default().fg(Color::Gray),
            Style::default().fg(Color::DarkGray),
        )
    };

    [
        Line::from(vec![
            Span::styled(prefix, title_style),
            Span::styled(marker, marker_style),
            Span::styled(item.title().to_string(), title_style),
        ]),
        Line::from(Span::styled(
            format!("    {}", item.description()),
            desc_style,
        )),
    ]
}

/// Number of items that fit in a terminal of the given height.
fn item_rows(height: u16) -> u16 {
    (height.saturating_sub(CHROME_ROWS) / ROWS_PER_ITEM).max(1)
}
