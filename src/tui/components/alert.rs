//! # Alert Component
//!
//! Blocking modal for errors, information and delete confirmation. Drawn
//! over everything else; the event loop routes keys to it first.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::i18n::Language;
use crate::core::state::{Alert, AlertKind};
use crate::tui::component::Component;
use crate::tui::components::centered_rect;

pub struct AlertView<'a> {
    pub alert: &'a Alert,
    pub language: Language,
}

impl Component for AlertView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let s = self.language.strings();
        let (title, help, color) = match self.alert.kind {
            AlertKind::Error => (s.error_title, s.help_alert, Color::Red),
            AlertKind::Info => (s.info_title, s.help_alert, Color::Cyan),
            AlertKind::ConfirmDelete { .. } => (s.confirm_title, s.help_confirm, Color::Yellow),
        };

        let overlay = centered_rect(60, 30, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {title} "))
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .title_bottom(Line::from(format!(" {help} ")).centered())
            .padding(Padding::uniform(1));

        let body = Paragraph::new(self.alert.message.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(body, overlay);
    }
}
