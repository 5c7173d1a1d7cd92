//! # TitleBar Component
//!
//! Top status bar: who is signed in, in which role, the active language and
//! the latest status message.
//!
//! Stateless. Every prop comes from core state and the title bar doesn't care
//! where; it renders what it's given:
//!
//! 1. **Signed in**: `"orgdesk | Ayşe Yılmaz (Yönetici) | TR | Kaydedildi"`
//! 2. **Signed out**: `"orgdesk | TR | Giriş yapılmadı"`
//!
//! A loading marker is appended while the visible screen waits on a request.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// `"Name Surname (Role)"` when signed in.
    pub user: Option<String>,
    /// Short language code, e.g. `"TR"`.
    pub language_code: &'static str,
    pub status_message: String,
    /// Text shown while loading, `None` when idle.
    pub loading: Option<&'static str>,
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let dim = Style::default().fg(Color::DarkGray);
        let mut spans = vec![Span::styled(
            "orgdesk",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
        if let Some(user) = &self.user {
            spans.push(Span::styled(" | ", dim));
            spans.push(Span::raw(user.clone()));
        }
        spans.push(Span::styled(" | ", dim));
        spans.push(Span::styled(self.language_code, Style::default().fg(Color::Yellow)));
        if !self.status_message.is_empty() {
            spans.push(Span::styled(" | ", dim));
            spans.push(Span::raw(self.status_message.clone()));
        }
        if let Some(loading) = self.loading {
            spans.push(Span::styled(" | ", dim));
            spans.push(Span::styled(loading, dim));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
