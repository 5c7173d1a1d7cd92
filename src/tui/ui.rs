use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::screen::{FormPurpose, ScreenKind};
use crate::core::state::{AlertKind, App};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    AlertView, ChoicePicker, CompanyInfoView, DashboardView, FormView, ProfileView, RecordList,
    TabBar, TitleBar, centered_rect,
};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let tabs_height = if app.nav.tab_set().is_some() { 1 } else { 0 };
    let layout = Layout::vertical([Length(1), Length(tabs_height), Min(0), Length(1)]);
    let [title_area, tabs_area, body_area, help_area] = layout.areas(frame.area());

    let s = app.language.strings();
    TitleBar {
        user: app.profile.as_ref().map(|profile| {
            format!(
                "{} ({})",
                profile.display_name(),
                app.language.role(&profile.role)
            )
        }),
        language_code: app.language.code(),
        status_message: app.status_message.clone(),
        loading: app.is_loading().then_some(s.loading),
    }
    .render(frame, title_area);

    if app.nav.tab_set().is_some() {
        TabBar {
            tabs: app.nav.tabs(),
            active: app.nav.active_tab(),
            language: app.language,
        }
        .render(frame, tabs_area);
    }

    draw_body(frame, app, body_area);

    frame.render_widget(
        Line::styled(help_text(app, tui), Style::default().fg(Color::DarkGray)),
        help_area,
    );

    // Overlays, alert on top
    if let Some(picker) = tui.picker.as_mut() {
        ChoicePicker::new(picker, app.language).render(frame, body_area);
    }
    if let Some(alert) = &app.alert {
        AlertView {
            alert,
            language: app.language,
        }
        .render(frame, frame.area());
    }
}

fn draw_body(frame: &mut Frame, app: &App, area: Rect) {
    let Some(screen) = app.nav.current() else {
        return;
    };
    let language = app.language;
    let profile = app.profile.as_ref();
    match &screen.kind {
        ScreenKind::Form(form) => {
            // Auth forms float in the middle of an empty screen
            let area = if app.nav.tab_set().is_none() {
                centered_rect(60, 50, area)
            } else {
                area
            };
            FormView::new(form, language).render(frame, area);
        }
        ScreenKind::List(list) => RecordList::new(list, language).render(frame, area),
        ScreenKind::Dashboard(dashboard) => {
            if let Some(tab_set) = app.nav.tab_set() {
                DashboardView {
                    dashboard,
                    profile,
                    tab_set,
                    language,
                }
                .render(frame, area);
            }
        }
        ScreenKind::CompanyInfo(info) => CompanyInfoView {
            screen: info,
            profile,
            language,
        }
        .render(frame, area),
        ScreenKind::Profile(_) => ProfileView { profile, language }.render(frame, area),
    }
}

/// Key hints for whatever currently has input.
pub fn help_text(app: &App, tui: &TuiState) -> String {
    let s = app.language.strings();
    if let Some(alert) = &app.alert {
        return match alert.kind {
            AlertKind::ConfirmDelete { .. } => s.help_confirm,
            _ => s.help_alert,
        }
        .to_string();
    }
    if tui.picker.is_some() {
        return s.help_picker.to_string();
    }

    let signed_in = app.nav.tab_set().is_some();
    let local = match app.nav.current().map(|screen| &screen.kind) {
        Some(ScreenKind::Form(form)) if form.purpose == FormPurpose::Login => s.help_login,
        Some(ScreenKind::Form(_)) => s.help_form,
        Some(ScreenKind::List(list)) => {
            if list.caps.create || list.caps.edit {
                s.help_list
            } else if list.caps.delete {
                s.help_list_delete_only
            } else {
                s.help_list_read_only
            }
        }
        Some(ScreenKind::Profile(profile)) if profile.editable => s.help_manager_profile,
        Some(ScreenKind::Profile(_)) => s.help_profile,
        Some(ScreenKind::Dashboard(_)) | Some(ScreenKind::CompanyInfo(_)) => s.help_dashboard,
        None => "",
    };

    if signed_in {
        format!("{local} · {}", s.help_global)
    } else {
        local.to_string()
    }
}
