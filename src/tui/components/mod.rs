//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props:
//! - `TitleBar`: user, role, language and status line
//! - `TabBar`: the active tab set
//! - `RecordList`: any entity list, with an optional parent header
//! - `FormView`: any form, auth or entity
//! - `DashboardView`, `CompanyInfoView`, `ProfileView`: role screens
//! - `AlertView`: blocking error/info/confirm modal
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `ChoicePicker`: overlay for picking a choice field's value. Its state
//!   lives in `TuiState` and it emits `PickerEvent`s.
//!
//! Components never read `App` directly; the caller hands them the slices
//! they draw.

pub mod alert;
pub mod choice_picker;
pub mod form_view;
pub mod panels;
pub mod record_list;
pub mod tab_bar;
pub mod title_bar;

pub use alert::AlertView;
pub use choice_picker::{ChoicePicker, ChoicePickerState, PickerEvent};
pub use form_view::FormView;
pub use panels::{CompanyInfoView, DashboardView, ProfileView};
pub use record_list::RecordList;
pub use tab_bar::TabBar;
pub use title_bar::TitleBar;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::entity::{DetailValue, Field};
use crate::core::i18n::Language;

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}

/// Keep the end of a string that fits within `max_width` columns.
pub fn tail_str(s: &str, max_width: usize) -> String {
    let mut used = 0;
    let mut start = s.len();
    for (i, c) in s.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        start = i;
    }
    s[start..].to_string()
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

pub fn detail_text(language: Language, field: Field, value: &DetailValue) -> String {
    let s = language.strings();
    match value {
        DetailValue::Text(text) => text.clone(),
        DetailValue::Flag(true) if field == Field::Active => s.active.to_string(),
        DetailValue::Flag(false) if field == Field::Active => s.inactive.to_string(),
        DetailValue::Flag(true) => s.yes.to_string(),
        DetailValue::Flag(false) => s.no.to_string(),
    }
}

/// `Label: value` with a dim label.
pub fn labelled_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

pub fn heading_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}
