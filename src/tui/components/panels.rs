//! Role screens: dashboards, the company info card and the profile page.
//!
//! All three read the signed-in `Profile`; the dashboard adds its shortcut
//! list and the company card adds the fetched company record.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::core::entity::{Field, Profile};
use crate::core::i18n::{Language, fill};
use crate::core::role::TabSet;
use crate::core::screen::{CompanyInfoScreen, Dashboard};
use crate::tui::component::Component;
use crate::tui::components::{detail_text, heading_line, labelled_line};

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {title} "))
        .padding(Padding::horizontal(1))
}

fn optional(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

pub struct DashboardView<'a> {
    pub dashboard: &'a Dashboard,
    pub profile: Option<&'a Profile>,
    pub tab_set: TabSet,
    pub language: Language,
}

impl DashboardView<'_> {
    fn greeting(&self) -> Vec<Line<'static>> {
        let s = self.language.strings();
        let Some(profile) = self.profile else {
            return vec![Line::from(s.loading)];
        };
        let f = |field| self.language.field(field);
        let mut lines = vec![
            heading_line(&fill(s.welcome, "name", &profile.display_name())),
            Line::from(""),
            labelled_line(f(Field::Email), optional(profile.email.as_deref())),
            labelled_line(f(Field::Role), self.language.role(&profile.role)),
        ];
        match self.tab_set {
            TabSet::Admin => {}
            TabSet::Manager => lines.push(labelled_line(
                f(Field::Department),
                optional(profile.department_name.as_deref()),
            )),
            TabSet::User => {
                lines.push(labelled_line(
                    f(Field::Company),
                    optional(profile.company_name.as_deref()),
                ));
                lines.push(labelled_line(
                    f(Field::Department),
                    optional(profile.department_name.as_deref()),
                ));
            }
        }
        lines
    }
}

impl Component for DashboardView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let s = self.language.strings();
        let greeting = self.greeting();

        if self.dashboard.shortcuts.is_empty() {
            frame.render_widget(
                Paragraph::new(greeting).block(panel(s.tab_dashboard)),
                area,
            );
            return;
        }

        let height = (greeting.len() as u16 + 2).min(area.height / 2);
        let [top, bottom] =
            Layout::vertical([Constraint::Length(height), Constraint::Min(0)]).areas(area);
        frame.render_widget(
            Paragraph::new(greeting).block(panel(s.tab_dashboard)),
            top,
        );

        let items: Vec<ListItem> = self
            .dashboard
            .shortcuts
            .iter()
            .enumerate()
            .map(|(i, shortcut)| {
                let style = if i == self.dashboard.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::styled(shortcut.label(self.language).to_string(), style))
            })
            .collect();
        let mut state = ListState::default();
        state.select(Some(self.dashboard.selected));
        frame.render_stateful_widget(
            List::new(items).block(panel(s.shortcuts)),
            bottom,
            &mut state,
        );
    }
}

pub struct CompanyInfoView<'a> {
    pub screen: &'a CompanyInfoScreen,
    pub profile: Option<&'a Profile>,
    pub language: Language,
}

impl Component for CompanyInfoView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let s = self.language.strings();
        let [company_area, department_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(5)]).areas(area);

        let company_lines: Vec<Line> = match &self.screen.company {
            Some(company) => {
                let mut lines = vec![heading_line(&company.title)];
                lines.extend(company.details.iter().map(|(field, value)| {
                    labelled_line(
                        self.language.field(*field),
                        detail_text(self.language, *field, value),
                    )
                }));
                lines
            }
            None if self.screen.loading => vec![Line::from(s.loading)],
            None => vec![Line::styled(s.no_company, Style::default().fg(Color::DarkGray))],
        };
        frame.render_widget(
            Paragraph::new(company_lines)
                .wrap(Wrap { trim: true })
                .block(panel(s.my_company)),
            company_area,
        );

        let department_lines = match self.profile {
            Some(profile) => vec![
                labelled_line(
                    self.language.field(Field::Department),
                    optional(profile.department_name.as_deref()),
                ),
                labelled_line(
                    self.language.field(Field::Role),
                    self.language.role(&profile.role),
                ),
            ],
            None => vec![Line::from(s.loading)],
        };
        frame.render_widget(
            Paragraph::new(department_lines).block(panel(s.my_department)),
            department_area,
        );
    }
}

pub struct ProfileView<'a> {
    pub profile: Option<&'a Profile>,
    pub language: Language,
}

impl Component for ProfileView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let s = self.language.strings();
        let Some(profile) = self.profile else {
            frame.render_widget(Paragraph::new(s.loading).block(panel(s.personal_info)), area);
            return;
        };
        let f = |field| self.language.field(field);
        let lines = vec![
            heading_line(&profile.display_name()),
            Line::from(""),
            labelled_line(f(Field::Name), profile.name.clone()),
            labelled_line(f(Field::Surname), profile.surname.clone()),
            labelled_line(f(Field::Email), optional(profile.email.as_deref())),
            labelled_line(f(Field::Phone), optional(profile.phone.as_deref())),
            labelled_line(f(Field::Role), self.language.role(&profile.role)),
            labelled_line(f(Field::Department), optional(profile.department_name.as_deref())),
            labelled_line(f(Field::Company), optional(profile.company_name.as_deref())),
            labelled_line(
                f(Field::CreatedAt),
                optional(profile.created_at.as_deref().map(|t| t.split('T').next().unwrap_or(t))),
            ),
        ];
        frame.render_widget(Paragraph::new(lines).block(panel(s.personal_info)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Record;
    use crate::core::role::Role;
    use crate::test_support::profile;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(component: &mut dyn Component) -> String {
        let backend = TestBackend::new(70, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| component.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_admin_dashboard_lists_reference_data() {
        let dashboard = Dashboard::for_tab_set(TabSet::Admin);
        let admin = profile(Role::Admin);
        let text = render(&mut DashboardView {
            dashboard: &dashboard,
            profile: Some(&admin),
            tab_set: TabSet::Admin,
            language: Language::En,
        });
        assert!(text.contains("Welcome, Test User"));
        assert!(text.contains("Administrator"));
        assert!(text.contains("Regions"));
        assert!(text.contains("Department types"));
    }

    #[test]
    fn test_user_dashboard_shows_company() {
        let dashboard = Dashboard::for_tab_set(TabSet::User);
        let user = profile(Role::User);
        let text = render(&mut DashboardView {
            dashboard: &dashboard,
            profile: Some(&user),
            tab_set: TabSet::User,
            language: Language::En,
        });
        assert!(text.contains("Company: Acme"));
        assert!(text.contains("Department: Muhasebe"));
    }

    #[test]
    fn test_company_info_without_company() {
        let screen = CompanyInfoScreen::default();
        let user = profile(Role::User);
        let text = render(&mut CompanyInfoView {
            screen: &screen,
            profile: Some(&user),
            language: Language::En,
        });
        assert!(text.contains("No company information"));
        assert!(text.contains("Muhasebe"));
    }

    #[test]
    fn test_company_info_card() {
        let screen = CompanyInfoScreen {
            company: Some(
                Record::new(9, "Acme")
                    .detail(Field::AddressDetail, Some("Moda Cad. 1, Kadıköy"))
                    .flag(Field::Active, true),
            ),
            loading: false,
        };
        let text = render(&mut CompanyInfoView {
            screen: &screen,
            profile: None,
            language: Language::En,
        });
        assert!(text.contains("Address: Moda Cad. 1, Kadıköy"));
        assert!(text.contains("Active: Active"));
    }

    #[test]
    fn test_profile_in_turkish() {
        let manager = profile(Role::Manager);
        let text = render(&mut ProfileView {
            profile: Some(&manager),
            language: Language::Tr,
        });
        assert!(text.contains("Kişisel bilgiler"));
        assert!(text.contains("test@example.com"));
        assert!(text.contains("Telefon: -"));
    }
}
