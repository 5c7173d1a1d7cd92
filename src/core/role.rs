//! # Roles and Tab Sets
//!
//! The backend tags every user with a role name. After login that name picks
//! exactly one of three fixed tab sets for the rest of the session:
//!
//! | Role      | Tab set | Tabs                                   |
//! |-----------|---------|----------------------------------------|
//! | `ADMIN`   | Admin   | Admin dashboard, Companies, Users      |
//! | `MANAGER` | Manager | Dashboard, Users, Profile              |
//! | `USER`    | User    | Dashboard, Company info, Profile       |
//! | other     | none    | stays on login with "role not defined" |
//!
//! This is a lookup, not a state machine: `Role::tab_set` is the whole gate.

/// A server-assigned role. Unrecognized names are kept for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Admin,
    Manager,
    User,
    Unknown(String),
}

impl Role {
    /// Roles a new user can be created with, paired with their backend ids.
    pub const ASSIGNABLE: [(i64, Role); 3] = [(4, Role::Admin), (5, Role::Manager), (6, Role::User)];

    pub fn from_name(name: &str) -> Role {
        match name.trim() {
            "ADMIN" => Role::Admin,
            "MANAGER" => Role::Manager,
            "USER" => Role::User,
            other => Role::Unknown(other.to_string()),
        }
    }

    /// Backend name, e.g. `"MANAGER"`.
    pub fn name(&self) -> &str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::User => "USER",
            Role::Unknown(name) => name,
        }
    }

    pub fn tab_set(&self) -> Option<TabSet> {
        match self {
            Role::Admin => Some(TabSet::Admin),
            Role::Manager => Some(TabSet::Manager),
            Role::User => Some(TabSet::User),
            Role::Unknown(_) => None,
        }
    }
}

/// One of the three navigation trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabSet {
    Admin,
    Manager,
    User,
}

impl TabSet {
    pub fn tabs(self) -> &'static [Tab] {
        match self {
            TabSet::Admin => &[Tab::AdminDashboard, Tab::Companies, Tab::Users],
            TabSet::Manager => &[Tab::ManagerDashboard, Tab::ManagerUsers, Tab::ManagerProfile],
            TabSet::User => &[Tab::UserDashboard, Tab::UserCompanyInfo, Tab::UserProfile],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    AdminDashboard,
    Companies,
    Users,
    ManagerDashboard,
    ManagerUsers,
    ManagerProfile,
    UserDashboard,
    UserCompanyInfo,
    UserProfile,
}
