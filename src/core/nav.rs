//! # Navigation
//!
//! One stack per tab. Before login there is a single auth stack rooted at
//! the login form; after login the role's tab set replaces it wholesale.
//!
//! ```text
//! signed out:  [Login] ─push─▶ [Login, ForgotPassword]
//! signed in:   tab 0: [Dashboard, Regions, Edit region]
//!              tab 1: [Companies]          ◀── active
//!              tab 2: [Users]
//! ```
//!
//! Pushing an admin-only screen outside the Admin tab set is refused, so
//! entity management is unreachable for managers and users whatever the
//! input.

use log::{debug, warn};

use crate::core::entity::{EntityKind, Scope};
use crate::core::role::{Tab, TabSet};
use crate::core::screen::{
    CompanyInfoScreen, Dashboard, FormPurpose, FormScreen, ListCaps, ListScreen, ProfileScreen,
    Screen, ScreenKey, ScreenKind,
};

#[derive(Debug)]
pub struct Navigator {
    tab_set: Option<TabSet>,
    active_tab: usize,
    /// Never empty; each inner stack keeps its root.
    stacks: Vec<Vec<Screen>>,
    next_key: u64,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Starts signed out, on the login form.
    pub fn new() -> Self {
        let mut nav = Self {
            tab_set: None,
            active_tab: 0,
            stacks: Vec::new(),
            next_key: 0,
        };
        nav.show_auth();
        nav
    }

    fn screen(&mut self, kind: ScreenKind) -> Screen {
        self.next_key += 1;
        Screen {
            key: ScreenKey(self.next_key),
            kind,
        }
    }

    pub fn tab_set(&self) -> Option<TabSet> {
        self.tab_set
    }

    pub fn active_tab(&self) -> usize {
        self.active_tab
    }

    /// Tabs of the active set; empty while signed out.
    pub fn tabs(&self) -> &'static [Tab] {
        self.tab_set.map(TabSet::tabs).unwrap_or(&[])
    }

    /// Drops every stack and returns to the login form.
    pub fn show_auth(&mut self) {
        let login = self.screen(ScreenKind::Form(FormScreen::new(FormPurpose::Login)));
        self.tab_set = None;
        self.active_tab = 0;
        self.stacks = vec![vec![login]];
    }

    /// Replaces everything with the given tab set, first tab active.
    pub fn enter(&mut self, tab_set: TabSet) {
        let roots: Vec<Screen> = tab_set
            .tabs()
            .iter()
            .map(|tab| {
                let kind = root_kind(*tab, tab_set);
                self.screen(kind)
            })
            .collect();
        self.stacks = roots.into_iter().map(|root| vec![root]).collect();
        self.tab_set = Some(tab_set);
        self.active_tab = 0;
        debug!("Entered {:?} tab set", tab_set);
    }

    pub fn select_tab(&mut self, index: usize) -> bool {
        if index < self.stacks.len() && self.tab_set.is_some() && index != self.active_tab {
            self.active_tab = index;
            true
        } else {
            false
        }
    }

    pub fn next_tab(&mut self) -> bool {
        if self.stacks.len() < 2 {
            return false;
        }
        self.select_tab((self.active_tab + 1) % self.stacks.len())
    }

    pub fn select(&mut self, tab: Tab) -> bool {
        match self.tabs().iter().position(|t| *t == tab) {
            Some(index) => self.select_tab(index),
            None => false,
        }
    }

    /// Pushes onto the active stack. Returns `None` when the screen is not
    /// reachable from the current tab set.
    pub fn push(&mut self, kind: ScreenKind) -> Option<ScreenKey> {
        let screen = self.screen(kind);
        if screen.admin_only() && self.tab_set != Some(TabSet::Admin) {
            warn!("Refused admin-only screen outside the admin tab set");
            return None;
        }
        let key = screen.key;
        self.stacks.get_mut(self.active_tab)?.push(screen);
        Some(key)
    }

    /// Pops the active stack. Roots stay.
    pub fn pop(&mut self) -> bool {
        match self.stacks.get_mut(self.active_tab) {
            Some(stack) if stack.len() > 1 => {
                stack.pop();
                true
            }
            _ => false,
        }
    }

    /// Pops `key` and everything above it, on whichever stack holds it.
    pub fn pop_screen(&mut self, key: ScreenKey) -> bool {
        for stack in &mut self.stacks {
            if let Some(index) = stack.iter().position(|s| s.key == key) {
                if index == 0 {
                    return false;
                }
                stack.truncate(index);
                return true;
            }
        }
        false
    }

    pub fn depth(&self) -> usize {
        self.stacks.get(self.active_tab).map_or(0, Vec::len)
    }

    pub fn current(&self) -> Option<&Screen> {
        self.stacks.get(self.active_tab)?.last()
    }

    pub fn current_mut(&mut self) -> Option<&mut Screen> {
        self.stacks.get_mut(self.active_tab)?.last_mut()
    }

    /// Looks a screen up on any stack.
    pub fn find_mut(&mut self, key: ScreenKey) -> Option<&mut Screen> {
        self.stacks.iter_mut().flatten().find(|s| s.key == key)
    }

    pub fn is_current(&self, key: ScreenKey) -> bool {
        self.current().is_some_and(|s| s.key == key)
    }
}

fn root_kind(tab: Tab, tab_set: TabSet) -> ScreenKind {
    let list = |kind: EntityKind, scope: Scope| {
        ScreenKind::List(ListScreen::new(kind, scope, ListCaps::for_list(Some(tab_set), scope)))
    };
    match tab {
        Tab::AdminDashboard | Tab::ManagerDashboard | Tab::UserDashboard => {
            ScreenKind::Dashboard(Dashboard::for_tab_set(tab_set))
        }
        Tab::Companies => list(EntityKind::Company, Scope::All),
        Tab::Users => list(EntityKind::User, Scope::All),
        Tab::ManagerUsers => list(EntityKind::User, Scope::ManagedDepartment),
        Tab::UserCompanyInfo => ScreenKind::CompanyInfo(CompanyInfoScreen::default()),
        Tab::ManagerProfile => ScreenKind::Profile(ProfileScreen { editable: true }),
        Tab::UserProfile => ScreenKind::Profile(ProfileScreen { editable: false }),
    }
}
