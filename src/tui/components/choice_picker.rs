//! # Choice Picker Component
//!
//! Overlay for picking the value of a choice field (town, company, role...).
//! Opened with Enter on a focused choice field.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ChoicePickerState` lives in `TuiState`
//! - `ChoicePicker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::core::entity::{Choice, Field};
use crate::core::i18n::Language;
use crate::tui::component::EventHandler;
use crate::tui::components::{centered_rect, truncate_str};
use crate::tui::event::TuiEvent;

/// Persistent state for the picker overlay.
pub struct ChoicePickerState {
    pub field: Field,
    pub choices: Vec<Choice>,
    pub selected: usize,
    pub list_state: ListState,
}

impl ChoicePickerState {
    /// Opens on the current value when it is among the options.
    pub fn new(field: Field, choices: Vec<Choice>, current: Option<i64>) -> Self {
        let selected = current
            .and_then(|id| choices.iter().position(|c| c.id == id))
            .unwrap_or(0);
        let mut list_state = ListState::default();
        if !choices.is_empty() {
            list_state.select(Some(selected));
        }
        Self {
            field,
            choices,
            selected,
            list_state,
        }
    }
}

/// Events emitted by the picker.
#[derive(Debug, PartialEq)]
pub enum PickerEvent {
    Pick(Field, i64),
    Dismiss,
}

impl EventHandler for ChoicePickerState {
    type Event = PickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<PickerEvent> {
        match event {
            TuiEvent::Escape => Some(PickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                if !self.choices.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.choices.is_empty() {
                    self.selected = (self.selected + 1).min(self.choices.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => Some(match self.choices.get(self.selected) {
                Some(choice) => PickerEvent::Pick(self.field, choice.id),
                None => PickerEvent::Dismiss,
            }),
            _ => None,
        }
    }
}

/// Transient render wrapper for the picker overlay.
pub struct ChoicePicker<'a> {
    state: &'a mut ChoicePickerState,
    language: Language,
}

impl<'a> ChoicePicker<'a> {
    pub fn new(state: &'a mut ChoicePickerState, language: Language) -> Self {
        Self { state, language }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let s = self.language.strings();
        let overlay = centered_rect(60, 60, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let help_text = format!(" {} ", s.help_picker);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.language.field(self.state.field)))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.state.choices.is_empty() {
            let empty = Paragraph::new(s.empty_list)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let inner_width = overlay.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .state
            .choices
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::styled(truncate_str(&choice.label, inner_width), style))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn towns() -> Vec<Choice> {
        vec![
            Choice { id: 1, label: "Kadıköy".to_string() },
            Choice { id: 2, label: "Üsküdar".to_string() },
            Choice { id: 3, label: "Beşiktaş".to_string() },
        ]
    }

    #[test]
    fn test_opens_on_current_value() {
        let picker = ChoicePickerState::new(Field::Town, towns(), Some(3));
        assert_eq!(picker.selected, 2);
        let picker = ChoicePickerState::new(Field::Town, towns(), Some(99));
        assert_eq!(picker.selected, 0);
    }

    #[test]
    fn test_navigate_and_pick() {
        let mut picker = ChoicePickerState::new(Field::Town, towns(), None);
        assert_eq!(picker.handle_event(&TuiEvent::CursorDown), None);
        picker.handle_event(&TuiEvent::CursorDown);
        picker.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            picker.handle_event(&TuiEvent::Submit),
            Some(PickerEvent::Pick(Field::Town, 3))
        );
    }

    #[test]
    fn test_empty_picker_submit_dismisses() {
        let mut picker = ChoicePickerState::new(Field::Company, Vec::new(), None);
        assert_eq!(picker.handle_event(&TuiEvent::Submit), Some(PickerEvent::Dismiss));
        assert_eq!(picker.handle_event(&TuiEvent::Escape), Some(PickerEvent::Dismiss));
    }
}
