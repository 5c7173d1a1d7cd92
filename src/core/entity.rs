//! # Entities
//!
//! Backend record kinds, the REST endpoints behind each of them, and the
//! presentation-neutral `Record` that every list, detail header and form
//! pre-fill works with.
//!
//! Typed decoding happens in `api::types`; by the time data reaches the core
//! it has been flattened into `Record`s so the reducer never needs to know
//! which concrete struct it came from.
//!
//! ```text
//! JSON ──serde──▶ api::types::Company ──Resource::to_record──▶ Record
//!                                                               │
//!                                 ListScreen / FormState ◀──────┘
//! ```

use std::collections::HashMap;

use crate::core::role::Role;

/// Every record type the backend owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Company,
    Department,
    User,
    Region,
    City,
    Town,
    CompanyType,
    DepartmentType,
}

/// How an update request identifies the record it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStyle {
    /// `PUT {update}/{id}`
    PathId,
    /// `PUT {update}` with `"id"` inside the JSON body
    BodyId,
}

/// REST paths for one entity kind. Ids are appended as a final path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    pub list: &'static str,
    pub item: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub update_style: UpdateStyle,
    pub delete: &'static str,
}

impl Endpoints {
    pub fn item_path(&self, id: i64) -> String {
        format!("{}/{}", self.item, id)
    }

    pub fn update_path(&self, id: i64) -> String {
        match self.update_style {
            UpdateStyle::PathId => format!("{}/{}", self.update, id),
            UpdateStyle::BodyId => self.update.to_string(),
        }
    }

    pub fn delete_path(&self, id: i64) -> String {
        format!("{}/{}", self.delete, id)
    }
}

const COMPANY_ENDPOINTS: Endpoints = Endpoints {
    list: "/api/companies",
    item: "/api/companies",
    create: "/api/companies",
    update: "/api/companies",
    update_style: UpdateStyle::BodyId,
    delete: "/api/companies/soft",
};

const DEPARTMENT_ENDPOINTS: Endpoints = Endpoints {
    list: "/api/departments",
    item: "/api/departments",
    create: "/api/departments",
    update: "/api/departments",
    update_style: UpdateStyle::BodyId,
    delete: "/api/department/delete",
};

const USER_ENDPOINTS: Endpoints = Endpoints {
    list: "/api/user/get-users-of-detailed",
    item: "/api/user/get-user-detail",
    create: "/api/user/create-user",
    update: "/api/user/update-user",
    update_style: UpdateStyle::BodyId,
    delete: "/api/user/delete-user",
};

const REGION_ENDPOINTS: Endpoints = location_endpoints("/api/location/region");
const CITY_ENDPOINTS: Endpoints = location_endpoints("/api/location/city");
const TOWN_ENDPOINTS: Endpoints = location_endpoints("/api/location/town");

const COMPANY_TYPE_ENDPOINTS: Endpoints = Endpoints {
    list: "/api/company-types",
    item: "/api/company-types",
    create: "/api/company-types",
    update: "/api/company-types",
    update_style: UpdateStyle::PathId,
    delete: "/api/company-types",
};

const DEPARTMENT_TYPE_ENDPOINTS: Endpoints = Endpoints {
    list: "/api/department-types",
    item: "/api/department-types",
    create: "/api/department-types",
    update: "/api/department-types",
    update_style: UpdateStyle::BodyId,
    delete: "/api/department-types",
};

/// Location resources share one path for every verb.
const fn location_endpoints(base: &'static str) -> Endpoints {
    Endpoints {
        list: base,
        item: base,
        create: base,
        update: base,
        update_style: UpdateStyle::PathId,
        delete: base,
    }
}

/// The caller's own company (manager and user views).
pub const OWN_COMPANY_PATH: &str = "/api/company";

impl EntityKind {
    pub fn endpoints(self) -> &'static Endpoints {
        match self {
            EntityKind::Company => &COMPANY_ENDPOINTS,
            EntityKind::Department => &DEPARTMENT_ENDPOINTS,
            EntityKind::User => &USER_ENDPOINTS,
            EntityKind::Region => &REGION_ENDPOINTS,
            EntityKind::City => &CITY_ENDPOINTS,
            EntityKind::Town => &TOWN_ENDPOINTS,
            EntityKind::CompanyType => &COMPANY_TYPE_ENDPOINTS,
            EntityKind::DepartmentType => &DEPARTMENT_TYPE_ENDPOINTS,
        }
    }

    /// Field layout of the create/edit form for this kind.
    pub fn form_fields(self) -> &'static [FieldSpec] {
        match self {
            EntityKind::Company => COMPANY_FIELDS,
            EntityKind::Department => DEPARTMENT_FIELDS,
            EntityKind::User => USER_FIELDS,
            EntityKind::Region => REGION_FIELDS,
            EntityKind::City => CITY_FIELDS,
            EntityKind::Town => TOWN_FIELDS,
            EntityKind::CompanyType => COMPANY_TYPE_FIELDS,
            EntityKind::DepartmentType => DEPARTMENT_TYPE_FIELDS,
        }
    }

    /// Reference-data kinds reachable from the admin dashboard shortcuts.
    pub fn reference_data() -> [EntityKind; 5] {
        [
            EntityKind::Region,
            EntityKind::City,
            EntityKind::Town,
            EntityKind::CompanyType,
            EntityKind::DepartmentType,
        ]
    }
}

// ============================================================================
// Fields
// ============================================================================

/// Every labelled value that appears on a form or in a record's details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    ShortName,
    Surname,
    Email,
    Phone,
    AddressDetail,
    Active,
    Town,
    City,
    Region,
    Company,
    CompanyType,
    Department,
    DepartmentType,
    Role,
    CreatedAt,
    Password,
    ConfirmPassword,
    CurrentPassword,
    NewPassword,
}

/// Where a choice field gets its options from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceSource {
    Entity(EntityKind),
    /// The fixed list of assignable roles.
    Roles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Text that is masked when rendered.
    Secret,
    Flag,
    Choice(ChoiceSource),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    /// JSON key in the request body.
    pub key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Shown and sent only when creating.
    pub create_only: bool,
}

impl FieldSpec {
    pub const fn text(field: Field, key: &'static str, required: bool) -> Self {
        Self { field, key, kind: FieldKind::Text, required, create_only: false }
    }

    pub const fn secret(field: Field, key: &'static str) -> Self {
        Self { field, key, kind: FieldKind::Secret, required: true, create_only: false }
    }

    pub const fn flag(field: Field, key: &'static str) -> Self {
        Self { field, key, kind: FieldKind::Flag, required: false, create_only: false }
    }

    pub const fn choice(field: Field, key: &'static str, source: ChoiceSource, required: bool) -> Self {
        Self { field, key, kind: FieldKind::Choice(source), required, create_only: false }
    }

    pub const fn on_create(mut self) -> Self {
        self.create_only = true;
        self
    }
}

const COMPANY_FIELDS: &[FieldSpec] = &[
    FieldSpec::text(Field::Name, "name", true),
    FieldSpec::text(Field::ShortName, "shortName", true),
    FieldSpec::text(Field::AddressDetail, "addressDetail", false),
    FieldSpec::choice(Field::Town, "townId", ChoiceSource::Entity(EntityKind::Town), true),
    FieldSpec::choice(
        Field::CompanyType,
        "companyTypeId",
        ChoiceSource::Entity(EntityKind::CompanyType),
        false,
    ),
    FieldSpec::flag(Field::Active, "active"),
];

const DEPARTMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::text(Field::Name, "name", true),
    FieldSpec::choice(Field::Company, "companyId", ChoiceSource::Entity(EntityKind::Company), true),
    FieldSpec::choice(
        Field::DepartmentType,
        "departmentTypeId",
        ChoiceSource::Entity(EntityKind::DepartmentType),
        true,
    ),
    FieldSpec::choice(Field::Town, "townId", ChoiceSource::Entity(EntityKind::Town), true),
    FieldSpec::text(Field::AddressDetail, "addressDetail", false),
];

const USER_FIELDS: &[FieldSpec] = &[
    FieldSpec::text(Field::Name, "name", true),
    FieldSpec::text(Field::Surname, "surname", true),
    FieldSpec::text(Field::Email, "email", true),
    FieldSpec::text(Field::Phone, "phone", false),
    FieldSpec::choice(
        Field::Department,
        "departmentId",
        ChoiceSource::Entity(EntityKind::Department),
        true,
    ),
    FieldSpec::choice(Field::Role, "roleId", ChoiceSource::Roles, true).on_create(),
];

const REGION_FIELDS: &[FieldSpec] = &[
    FieldSpec::text(Field::Name, "name", true),
    FieldSpec::choice(Field::City, "cityId", ChoiceSource::Entity(EntityKind::City), true),
];

const CITY_FIELDS: &[FieldSpec] = &[FieldSpec::text(Field::Name, "name", true)];

const TOWN_FIELDS: &[FieldSpec] = &[
    FieldSpec::text(Field::Name, "name", true),
    FieldSpec::choice(Field::Region, "regionId", ChoiceSource::Entity(EntityKind::Region), true),
];

const COMPANY_TYPE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text(Field::Name, "name", true),
    FieldSpec::flag(Field::Active, "active"),
];

const DEPARTMENT_TYPE_FIELDS: &[FieldSpec] = &[FieldSpec::text(Field::Name, "name", true)];

// ============================================================================
// Records
// ============================================================================

/// A value held by a form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Choice(Option<i64>),
}

/// A read-only value shown in a record's detail lines.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailValue {
    Text(String),
    Flag(bool),
}

/// One row of a list, one detail header, or the source of a form pre-fill.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub details: Vec<(Field, DetailValue)>,
    /// Form values keyed by field, used to pre-fill edit forms.
    pub values: HashMap<Field, FieldValue>,
}

impl Record {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            subtitle: None,
            details: Vec::new(),
            values: HashMap::new(),
        }
    }

    pub fn subtitle(mut self, subtitle: Option<String>) -> Self {
        self.subtitle = subtitle.filter(|s| !s.is_empty());
        self
    }

    /// Adds a text detail line; empty values are skipped.
    pub fn detail(mut self, field: Field, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.details.push((field, DetailValue::Text(value.to_string())));
        }
        self
    }

    pub fn flag(mut self, field: Field, value: bool) -> Self {
        self.details.push((field, DetailValue::Flag(value)));
        self
    }

    pub fn value(mut self, field: Field, value: FieldValue) -> Self {
        self.values.insert(field, value);
        self
    }

    pub fn text_value(self, field: Field, value: Option<&str>) -> Self {
        let text = value.unwrap_or_default().to_string();
        self.value(field, FieldValue::Text(text))
    }

    pub fn choice_value(self, field: Field, id: Option<i64>) -> Self {
        self.value(field, FieldValue::Choice(id))
    }

    pub fn as_choice(&self) -> Choice {
        Choice {
            id: self.id,
            label: self.title.clone(),
        }
    }
}

/// An option in a picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub id: i64,
    pub label: String,
}

/// Which slice of a collection a list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    All,
    /// Departments belonging to one company.
    Company(i64),
    /// Users of one department, managers first.
    Department(i64),
    /// Users sharing the caller's department, admins excluded.
    ManagedDepartment,
    /// Only the caller's own company.
    OwnCompany,
}

impl Scope {
    /// The parent record shown as a header above a scoped list.
    pub fn parent(self) -> Option<(EntityKind, i64)> {
        match self {
            Scope::Company(id) => Some((EntityKind::Company, id)),
            Scope::Department(id) => Some((EntityKind::Department, id)),
            Scope::All | Scope::ManagedDepartment | Scope::OwnCompany => None,
        }
    }
}

/// The signed-in user, as returned by `get-self`.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub company_id: Option<i64>,
    pub company_name: Option<String>,
    pub created_at: Option<String>,
}

impl Profile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.surname).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_id_update_appends_id() {
        let endpoints = EntityKind::Region.endpoints();
        assert_eq!(endpoints.update_path(7), "/api/location/region/7");
    }

    #[test]
    fn test_body_id_update_keeps_collection_path() {
        assert_eq!(EntityKind::Company.endpoints().update_path(7), "/api/companies");
        assert_eq!(
            EntityKind::User.endpoints().update_path(7),
            "/api/user/update-user"
        );
    }

    #[test]
    fn test_company_delete_is_soft() {
        assert_eq!(
            EntityKind::Company.endpoints().delete_path(3),
            "/api/companies/soft/3"
        );
    }

    #[test]
    fn test_every_form_has_a_required_name() {
        for kind in [
            EntityKind::Company,
            EntityKind::Department,
            EntityKind::User,
            EntityKind::Region,
            EntityKind::City,
            EntityKind::Town,
            EntityKind::CompanyType,
            EntityKind::DepartmentType,
        ] {
            let first = kind.form_fields()[0];
            assert_eq!(first.field, Field::Name, "{kind:?}");
            assert!(first.required, "{kind:?}");
        }
    }

    #[test]
    fn test_record_skips_blank_details() {
        let record = Record::new(1, "Acme")
            .detail(Field::AddressDetail, Some("   "))
            .detail(Field::Email, None)
            .detail(Field::ShortName, Some("ACM"));
        assert_eq!(record.details.len(), 1);
        assert_eq!(
            record.details[0],
            (Field::ShortName, DetailValue::Text("ACM".to_string()))
        );
    }

    #[test]
    fn test_scope_parent() {
        assert_eq!(Scope::Company(4).parent(), Some((EntityKind::Company, 4)));
        assert_eq!(Scope::All.parent(), None);
        assert_eq!(Scope::ManagedDepartment.parent(), None);
    }
}
