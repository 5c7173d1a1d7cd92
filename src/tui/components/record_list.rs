//! # RecordList Component
//!
//! Renders any `ListScreen`: an optional parent header card (company or
//! department detail) above the selectable rows.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::core::entity::{DetailValue, Record};
use crate::core::i18n::Language;
use crate::core::screen::ListScreen;
use crate::tui::component::Component;
use crate::tui::components::{detail_text, heading_line, labelled_line, truncate_str};

pub struct RecordList<'a> {
    pub list: &'a ListScreen,
    pub language: Language,
}

impl<'a> RecordList<'a> {
    pub fn new(list: &'a ListScreen, language: Language) -> Self {
        Self { list, language }
    }

    fn title(&self) -> String {
        let name = match &self.list.header {
            Some(header) => format!(
                "{} › {}",
                header.title,
                self.language.entities(self.list.kind)
            ),
            None => self.language.entities(self.list.kind).to_string(),
        };
        format!(" {} ({}) ", name, self.list.records.len())
    }

    fn header_lines(&self, header: &Record) -> Vec<Line<'static>> {
        let mut lines = vec![heading_line(&header.title)];
        lines.extend(header.details.iter().map(|(field, value)| {
            labelled_line(
                self.language.field(*field),
                detail_text(self.language, *field, value),
            )
        }));
        lines
    }

    fn row(&self, record: &Record, selected: bool, width: usize) -> ListItem<'static> {
        let style = if selected {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        let dim = if selected {
            style
        } else {
            Style::default().fg(Color::DarkGray)
        };

        // A flag detail (active/inactive) goes at the end of the row
        let status = record.details.iter().find_map(|(field, value)| match value {
            DetailValue::Flag(_) => Some(detail_text(self.language, *field, value)),
            DetailValue::Text(_) => None,
        });
        let subtitle = record
            .subtitle
            .as_deref()
            .map(|s| format!("  {s}"))
            .unwrap_or_default();
        let status_text = status.map(|s| format!("  [{s}]")).unwrap_or_default();

        let title_width = width
            .saturating_sub(status_text.chars().count())
            .saturating_sub(subtitle.chars().count().min(width / 2));
        let title = truncate_str(&record.title, title_width);
        let subtitle = truncate_str(
            &subtitle,
            width.saturating_sub(title.chars().count() + status_text.chars().count()),
        );

        ListItem::new(Line::from(vec![
            Span::styled(title, style),
            Span::styled(subtitle, dim),
            Span::styled(status_text, dim),
        ]))
    }
}

impl Component for RecordList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let s = self.language.strings();
        let body = match &self.list.header {
            Some(header) => {
                let lines = self.header_lines(header);
                let height = (lines.len() as u16 + 2).min(area.height / 2);
                let [header_area, body] =
                    Layout::vertical([Constraint::Length(height), Constraint::Min(0)]).areas(area);
                let card = Paragraph::new(lines).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray))
                        .padding(Padding::horizontal(1)),
                );
                frame.render_widget(card, header_area);
                body
            }
            None => area,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(self.title())
            .padding(Padding::horizontal(1));

        if self.list.records.is_empty() {
            let text = if self.list.loading {
                s.loading
            } else {
                s.empty_list
            };
            let empty = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, body);
            return;
        }

        let width = body.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .list
            .records
            .iter()
            .enumerate()
            .map(|(i, record)| self.row(record, i == self.list.selected, width))
            .collect();

        let mut state = ListState::default();
        state.select(Some(self.list.selected));
        frame.render_stateful_widget(List::new(items).block(block), body, &mut state);
    }
}
