//! # Localization
//!
//! Turkish and English string tables. The active `Language` lives in `App`
//! and is handed to rendering; nothing reads a global.
//!
//! Templates mark their slots as `{name}` and are filled with [`fill`].

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::entity::{EntityKind, Field};
use crate::core::role::{Role, Tab};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Tr,
    En,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::Tr => Language::En,
            Language::En => Language::Tr,
        }
    }

    /// Accepts `tr`/`en` in any case, as found in env vars and config files.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "tr" => Some(Language::Tr),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// Upper-case code shown in the title bar.
    pub fn code(self) -> &'static str {
        match self {
            Language::Tr => "TR",
            Language::En => "EN",
        }
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Language::Tr => &TR,
            Language::En => &EN,
        }
    }

    pub fn field(self, field: Field) -> &'static str {
        match self {
            Language::Tr => match field {
                Field::Name => "Ad",
                Field::ShortName => "Kısa ad",
                Field::Surname => "Soyad",
                Field::Email => "E-posta",
                Field::Phone => "Telefon",
                Field::AddressDetail => "Adres",
                Field::Active => "Aktif",
                Field::Town => "İlçe",
                Field::City => "İl",
                Field::Region => "Bölge",
                Field::Company => "Şirket",
                Field::CompanyType => "Şirket türü",
                Field::Department => "Departman",
                Field::DepartmentType => "Departman türü",
                Field::Role => "Rol",
                Field::CreatedAt => "Oluşturulma",
                Field::Password => "Şifre",
                Field::ConfirmPassword => "Şifre (tekrar)",
                Field::CurrentPassword => "Mevcut şifre",
                Field::NewPassword => "Yeni şifre",
            },
            Language::En => match field {
                Field::Name => "Name",
                Field::ShortName => "Short name",
                Field::Surname => "Surname",
                Field::Email => "Email",
                Field::Phone => "Phone",
                Field::AddressDetail => "Address",
                Field::Active => "Active",
                Field::Town => "Town",
                Field::City => "City",
                Field::Region => "Region",
                Field::Company => "Company",
                Field::CompanyType => "Company type",
                Field::Department => "Department",
                Field::DepartmentType => "Department type",
                Field::Role => "Role",
                Field::CreatedAt => "Created",
                Field::Password => "Password",
                Field::ConfirmPassword => "Confirm password",
                Field::CurrentPassword => "Current password",
                Field::NewPassword => "New password",
            },
        }
    }

    /// Singular entity name, used in form titles.
    pub fn entity(self, kind: EntityKind) -> &'static str {
        match (self, kind) {
            (Language::Tr, EntityKind::Company) => "Şirket",
            (Language::Tr, EntityKind::Department) => "Departman",
            (Language::Tr, EntityKind::User) => "Kullanıcı",
            (Language::Tr, EntityKind::Region) => "Bölge",
            (Language::Tr, EntityKind::City) => "İl",
            (Language::Tr, EntityKind::Town) => "İlçe",
            (Language::Tr, EntityKind::CompanyType) => "Şirket türü",
            (Language::Tr, EntityKind::DepartmentType) => "Departman türü",
            (Language::En, EntityKind::Company) => "Company",
            (Language::En, EntityKind::Department) => "Department",
            (Language::En, EntityKind::User) => "User",
            (Language::En, EntityKind::Region) => "Region",
            (Language::En, EntityKind::City) => "City",
            (Language::En, EntityKind::Town) => "Town",
            (Language::En, EntityKind::CompanyType) => "Company type",
            (Language::En, EntityKind::DepartmentType) => "Department type",
        }
    }

    /// Plural entity name, used in list titles and dashboard shortcuts.
    pub fn entities(self, kind: EntityKind) -> &'static str {
        match (self, kind) {
            (Language::Tr, EntityKind::Company) => "Şirketler",
            (Language::Tr, EntityKind::Department) => "Departmanlar",
            (Language::Tr, EntityKind::User) => "Kullanıcılar",
            (Language::Tr, EntityKind::Region) => "Bölgeler",
            (Language::Tr, EntityKind::City) => "İller",
            (Language::Tr, EntityKind::Town) => "İlçeler",
            (Language::Tr, EntityKind::CompanyType) => "Şirket türleri",
            (Language::Tr, EntityKind::DepartmentType) => "Departman türleri",
            (Language::En, EntityKind::Company) => "Companies",
            (Language::En, EntityKind::Department) => "Departments",
            (Language::En, EntityKind::User) => "Users",
            (Language::En, EntityKind::Region) => "Regions",
            (Language::En, EntityKind::City) => "Cities",
            (Language::En, EntityKind::Town) => "Towns",
            (Language::En, EntityKind::CompanyType) => "Company types",
            (Language::En, EntityKind::DepartmentType) => "Department types",
        }
    }

    pub fn tab(self, tab: Tab) -> &'static str {
        let s = self.strings();
        match tab {
            Tab::AdminDashboard | Tab::ManagerDashboard | Tab::UserDashboard => s.tab_dashboard,
            Tab::Companies => s.tab_companies,
            Tab::Users | Tab::ManagerUsers => s.tab_users,
            Tab::UserCompanyInfo => s.tab_company_info,
            Tab::ManagerProfile | Tab::UserProfile => s.tab_profile,
        }
    }

    pub fn role(self, role: &Role) -> String {
        let s = self.strings();
        match role {
            Role::Admin => s.role_admin.to_string(),
            Role::Manager => s.role_manager.to_string(),
            Role::User => s.role_user.to_string(),
            Role::Unknown(name) => name.clone(),
        }
    }
}

/// Replaces `{key}` in `template` with `value`.
pub fn fill(template: &str, key: &str, value: &str) -> String {
    template.replace(&format!("{{{key}}}"), value)
}

/// Every fixed UI string, one table per language.
#[derive(Debug)]
pub struct Strings {
    pub language_name: &'static str,

    // Common
    pub loading: &'static str,
    pub empty_list: &'static str,
    pub select_placeholder: &'static str,
    pub active: &'static str,
    pub inactive: &'static str,
    pub yes: &'static str,
    pub no: &'static str,
    pub saved: &'static str,
    pub deleted: &'static str,
    pub error_title: &'static str,
    pub info_title: &'static str,
    pub confirm_title: &'static str,
    pub delete_confirm: &'static str,
    pub new_record: &'static str,
    pub edit_record: &'static str,
    pub not_logged_in: &'static str,

    // Errors
    pub required_field: &'static str,
    pub password_mismatch: &'static str,
    pub password_too_short: &'static str,
    pub missing_token: &'static str,
    pub network_error: &'static str,
    pub unexpected_error: &'static str,
    pub role_not_defined: &'static str,
    pub session_expired: &'static str,

    // Auth
    pub login_title: &'static str,
    pub forgot_password_title: &'static str,
    pub activation_title: &'static str,
    pub reset_password_title: &'static str,
    pub change_password_title: &'static str,
    pub edit_profile_title: &'static str,
    pub reset_mail_sent: &'static str,
    pub activation_mail_sent: &'static str,
    pub account_activated: &'static str,
    pub password_reset_done: &'static str,
    pub password_changed: &'static str,
    pub profile_updated: &'static str,
    pub logged_out: &'static str,

    // Tabs and role screens
    pub tab_dashboard: &'static str,
    pub tab_companies: &'static str,
    pub tab_users: &'static str,
    pub tab_company_info: &'static str,
    pub tab_profile: &'static str,
    pub welcome: &'static str,
    pub shortcuts: &'static str,
    pub my_company: &'static str,
    pub my_department: &'static str,
    pub no_company: &'static str,
    pub personal_info: &'static str,
    pub role_admin: &'static str,
    pub role_manager: &'static str,
    pub role_user: &'static str,

    // Help lines
    pub help_global: &'static str,
    pub help_list: &'static str,
    pub help_list_delete_only: &'static str,
    pub help_list_read_only: &'static str,
    pub help_form: &'static str,
    pub help_login: &'static str,
    pub help_alert: &'static str,
    pub help_confirm: &'static str,
    pub help_picker: &'static str,
    pub help_dashboard: &'static str,
    pub help_profile: &'static str,
    pub help_manager_profile: &'static str,
}

pub static TR: Strings = Strings {
    language_name: "Türkçe",

    loading: "Yükleniyor...",
    empty_list: "Kayıt bulunamadı",
    select_placeholder: "Seçiniz",
    active: "Aktif",
    inactive: "Pasif",
    yes: "Evet",
    no: "Hayır",
    saved: "Kaydedildi",
    deleted: "Silindi",
    error_title: "Hata",
    info_title: "Bilgi",
    confirm_title: "Onay",
    delete_confirm: "\"{name}\" silinsin mi?",
    new_record: "Yeni {entity}",
    edit_record: "{entity} düzenle",
    not_logged_in: "Giriş yapılmadı",

    required_field: "{field} alanı zorunludur",
    password_mismatch: "Şifreler eşleşmiyor",
    password_too_short: "Şifre en az {min} karakter olmalıdır",
    missing_token: "Bağlantı geçersiz: token bulunamadı",
    network_error: "Sunucuya ulaşılamadı",
    unexpected_error: "Beklenmeyen bir hata oluştu",
    role_not_defined: "Rol tanımlı değil",
    session_expired: "Oturum süresi doldu, lütfen tekrar giriş yapın",

    login_title: "Giriş",
    forgot_password_title: "Şifremi unuttum",
    activation_title: "Hesap aktivasyonu",
    reset_password_title: "Şifre sıfırlama",
    change_password_title: "Şifre değiştir",
    edit_profile_title: "Profili düzenle",
    reset_mail_sent: "Şifre sıfırlama bağlantısı e-posta adresinize gönderildi",
    activation_mail_sent: "Aktivasyon e-postası gönderildi",
    account_activated: "Hesabınız aktifleştirildi, giriş yapabilirsiniz",
    password_reset_done: "Şifreniz sıfırlandı, giriş yapabilirsiniz",
    password_changed: "Şifreniz değiştirildi",
    profile_updated: "Profil güncellendi",
    logged_out: "Çıkış yapıldı",

    tab_dashboard: "Ana sayfa",
    tab_companies: "Şirketler",
    tab_users: "Kullanıcılar",
    tab_company_info: "Şirket bilgileri",
    tab_profile: "Profil",
    welcome: "Hoş geldiniz, {name}",
    shortcuts: "Kısayollar",
    my_company: "Şirketim",
    my_department: "Departmanım",
    no_company: "Şirket bilgisi bulunamadı",
    personal_info: "Kişisel bilgiler",
    role_admin: "Yönetici",
    role_manager: "Müdür",
    role_user: "Kullanıcı",

    help_global: "Ctrl+T sekme · Ctrl+L dil · Ctrl+O çıkış · Ctrl+C kapat",
    help_list: "↑↓ seç · Enter aç · n yeni · e düzenle · d sil · r yenile · Esc geri",
    help_list_delete_only: "↑↓ seç · d sil · r yenile · Esc geri",
    help_list_read_only: "↑↓ seç · Enter aç · r yenile · Esc geri",
    help_form: "↑↓/Tab alan · Boşluk değiştir · Enter seç/gönder · Ctrl+S gönder · Esc geri",
    help_login: "Enter giriş · Ctrl+F şifremi unuttum · Ctrl+A aktivasyon · Ctrl+L dil",
    help_alert: "Enter/Esc kapat",
    help_confirm: "Enter onayla · Esc vazgeç",
    help_picker: "↑↓ seç · Enter onayla · Esc vazgeç",
    help_dashboard: "↑↓ seç · Enter aç",
    help_profile: "Enter şifre değiştir · Ctrl+O çıkış",
    help_manager_profile: "Enter şifre değiştir · e profili düzenle · Ctrl+O çıkış",
};

pub static EN: Strings = Strings {
    language_name: "English",

    loading: "Loading...",
    empty_list: "No records found",
    select_placeholder: "Select",
    active: "Active",
    inactive: "Inactive",
    yes: "Yes",
    no: "No",
    saved: "Saved",
    deleted: "Deleted",
    error_title: "Error",
    info_title: "Info",
    confirm_title: "Confirm",
    delete_confirm: "Delete \"{name}\"?",
    new_record: "New {entity}",
    edit_record: "Edit {entity}",
    not_logged_in: "Not signed in",

    required_field: "{field} is required",
    password_mismatch: "Passwords do not match",
    password_too_short: "Password must be at least {min} characters",
    missing_token: "Invalid link: token is missing",
    network_error: "Could not reach the server",
    unexpected_error: "An unexpected error occurred",
    role_not_defined: "Role not defined",
    session_expired: "Session expired, please sign in again",

    login_title: "Sign in",
    forgot_password_title: "Forgot password",
    activation_title: "Account activation",
    reset_password_title: "Reset password",
    change_password_title: "Change password",
    edit_profile_title: "Edit profile",
    reset_mail_sent: "A password reset link was sent to your email",
    activation_mail_sent: "Activation email sent",
    account_activated: "Your account is active, you can sign in",
    password_reset_done: "Your password was reset, you can sign in",
    password_changed: "Your password was changed",
    profile_updated: "Profile updated",
    logged_out: "Signed out",

    tab_dashboard: "Dashboard",
    tab_companies: "Companies",
    tab_users: "Users",
    tab_company_info: "Company info",
    tab_profile: "Profile",
    welcome: "Welcome, {name}",
    shortcuts: "Shortcuts",
    my_company: "My company",
    my_department: "My department",
    no_company: "No company information",
    personal_info: "Personal info",
    role_admin: "Administrator",
    role_manager: "Manager",
    role_user: "User",

    help_global: "Ctrl+T tab · Ctrl+L language · Ctrl+O sign out · Ctrl+C quit",
    help_list: "↑↓ select · Enter open · n new · e edit · d delete · r refresh · Esc back",
    help_list_delete_only: "↑↓ select · d delete · r refresh · Esc back",
    help_list_read_only: "↑↓ select · Enter open · r refresh · Esc back",
    help_form: "↑↓/Tab field · Space toggle · Enter pick/submit · Ctrl+S submit · Esc back",
    help_login: "Enter sign in · Ctrl+F forgot password · Ctrl+A activation · Ctrl+L language",
    help_alert: "Enter/Esc close",
    help_confirm: "Enter confirm · Esc cancel",
    help_picker: "↑↓ select · Enter confirm · Esc cancel",
    help_dashboard: "↑↓ select · Enter open",
    help_profile: "Enter change password · Ctrl+O sign out",
    help_manager_profile: "Enter change password · e edit profile · Ctrl+O sign out",
};
