//! # FormView Component
//!
//! Renders any `FormScreen`, one field per line:
//!
//! ```text
//! ┌ New company ─────────────────────────┐
//! │ › Name*          Acme▏               │
//! │   Short name*    ACM                 │
//! │   Town*          Kadıköy ▾           │
//! │   Active         [x]                 │
//! └──────────────────────────────────────┘
//! ```
//!
//! Secrets are masked; choice fields show the picked option's label once
//! the options have loaded.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::entity::{FieldKind, FieldSpec};
use crate::core::form::FormState;
use crate::core::i18n::Language;
use crate::core::screen::FormScreen;
use crate::tui::component::Component;
use crate::tui::components::{tail_str, truncate_str};

const MASK: char = '•';

pub struct FormView<'a> {
    pub screen: &'a FormScreen,
    pub language: Language,
}

impl<'a> FormView<'a> {
    pub fn new(screen: &'a FormScreen, language: Language) -> Self {
        Self { screen, language }
    }

    fn label(&self, spec: &FieldSpec) -> String {
        let name = self.language.field(spec.field);
        if spec.required {
            format!("{name}*")
        } else {
            name.to_string()
        }
    }

    fn value_text(&self, form: &FormState, spec: &FieldSpec) -> String {
        let s = self.language.strings();
        match spec.kind {
            FieldKind::Text => form.text(spec.field).to_string(),
            FieldKind::Secret => MASK.to_string().repeat(form.text(spec.field).chars().count()),
            FieldKind::Flag => {
                if form.flag(spec.field) {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
            FieldKind::Choice(_) => {
                let label = match form.choice(spec.field) {
                    Some(id) => form
                        .choice_label(spec.field)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("#{id}")),
                    None => s.select_placeholder.to_string(),
                };
                format!("{label} ▾")
            }
        }
    }
}

impl Component for FormView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let s = self.language.strings();
        let form = &self.screen.form;
        let mut title = format!(" {} ", self.screen.purpose.title(self.language));
        if self.screen.loading || self.screen.submitting {
            title = format!(" {} · {} ", self.screen.purpose.title(self.language), s.loading);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);

        let label_width = form
            .specs
            .iter()
            .map(|spec| self.label(spec).width())
            .max()
            .unwrap_or(0)
            + 2;
        let value_width = (inner.width as usize).saturating_sub(label_width + 2);

        let mut cursor = None;
        let lines: Vec<Line> = form
            .specs
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let focused = i == form.focused;
                let marker = if focused { "› " } else { "  " };
                let label_style = if focused {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let value_style = if focused {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let value = self.value_text(form, spec);
                // Keep the tail of long text, with a column left for the caret
                let value = if value.width() >= value_width
                    && matches!(spec.kind, FieldKind::Text | FieldKind::Secret)
                {
                    tail_str(&value, value_width.saturating_sub(1))
                } else {
                    truncate_str(&value, value_width)
                };
                if focused && matches!(spec.kind, FieldKind::Text | FieldKind::Secret) {
                    cursor = Some(Position::new(
                        inner.x + (2 + label_width + value.width()) as u16,
                        inner.y + i as u16,
                    ));
                }
                Line::from(vec![
                    Span::styled(marker, label_style),
                    Span::styled(
                        format!("{:<width$}", self.label(spec), width = label_width),
                        label_style,
                    ),
                    Span::styled(value, value_style),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
        if let Some(position) = cursor
            && position.x < inner.right()
            && position.y < inner.bottom()
        {
            frame.set_cursor_position(position);
        }
    }
}
