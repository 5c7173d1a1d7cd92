use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Tabs;

use crate::core::i18n::Language;
use crate::core::role::Tab;
use crate::tui::component::Component;

/// The tab strip of the active tab set. Numbered so `1`..`3` read naturally.
pub struct TabBar {
    pub tabs: &'static [Tab],
    pub active: usize,
    pub language: Language,
}

impl Component for TabBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let titles: Vec<String> = self
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| format!("{} {}", i + 1, self.language.tab(*tab)))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.active)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider(" ");
        frame.render_widget(tabs, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::role::TabSet;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_manager_tabs_in_order() {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut bar = TabBar {
            tabs: TabSet::Manager.tabs(),
            active: 1,
            language: Language::En,
        };
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        let dashboard = text.find("1 Dashboard").unwrap();
        let users = text.find("2 Users").unwrap();
        let profile = text.find("3 Profile").unwrap();
        assert!(dashboard < users && users < profile);
    }
}
