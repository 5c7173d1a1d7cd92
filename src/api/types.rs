//! Backend JSON shapes.
//!
//! The backend speaks camelCase and is loose about which fields it fills in,
//! so everything except `id` is optional. A half-filled record still decodes
//! and still shows up in a list.

use serde::{Deserialize, Serialize};

use crate::core::entity::{Field, FieldValue, Profile, Record};
use crate::core::role::Role;

/// `{id, name}` as embedded in other records.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NamedRef {
    pub id: i64,
    pub name: Option<String>,
}

impl NamedRef {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRef {
    pub id: i64,
    pub name: Option<String>,
    pub short_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TypeRef {
    pub id: i64,
    pub name: Option<String>,
    pub active: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i64,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub active: Option<bool>,
    pub address_detail: Option<String>,
    pub town: Option<Town>,
    pub company_type: Option<TypeRef>,
    pub created_at: Option<String>,
}

impl Company {
    /// Street address followed by town, city and region, skipping blanks.
    pub fn full_address(&self) -> Option<String> {
        let town = self.town.as_ref();
        let parts: Vec<&str> = [
            self.address_detail.as_deref(),
            town.and_then(|t| t.name.as_deref()),
            town.and_then(|t| t.city.as_ref()).and_then(|c| c.name.as_deref()),
            town.and_then(|t| t.region.as_ref()).and_then(|r| r.name.as_deref()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    /// The read-only card shown on the company info tab.
    pub fn to_info_record(&self) -> Record {
        Record::new(self.id, self.name.clone().unwrap_or_default())
            .subtitle(self.short_name.clone())
            .detail(Field::ShortName, self.short_name.as_deref())
            .detail(
                Field::CompanyType,
                self.company_type.as_ref().and_then(|t| t.name.as_deref()),
            )
            .detail(Field::AddressDetail, self.full_address().as_deref())
            .detail(Field::CreatedAt, self.created_at.as_deref().map(date_only))
            .flag(Field::Active, self.active.unwrap_or(true))
    }

    pub fn to_record(&self) -> Record {
        let town = self.town.as_ref();
        Record::new(self.id, self.name.clone().unwrap_or_default())
            .subtitle(self.short_name.clone())
            .detail(
                Field::CompanyType,
                self.company_type.as_ref().and_then(|t| t.name.as_deref()),
            )
            .detail(Field::Town, town.and_then(|t| t.name.as_deref()))
            .detail(
                Field::City,
                town.and_then(|t| t.city.as_ref()).and_then(|c| c.name.as_deref()),
            )
            .detail(Field::AddressDetail, self.address_detail.as_deref())
            .flag(Field::Active, self.active.unwrap_or(true))
            .text_value(Field::Name, self.name.as_deref())
            .text_value(Field::ShortName, self.short_name.as_deref())
            .text_value(Field::AddressDetail, self.address_detail.as_deref())
            .choice_value(Field::Town, town.map(|t| t.id))
            .choice_value(Field::CompanyType, self.company_type.as_ref().map(|t| t.id))
            .value(Field::Active, FieldValue::Flag(self.active.unwrap_or(true)))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: i64,
    pub name: Option<String>,
    pub active: Option<bool>,
    pub address_detail: Option<String>,
    pub company: Option<CompanyRef>,
    pub department_type: Option<NamedRef>,
    pub town: Option<Town>,
    pub company_id: Option<i64>,
    pub department_type_id: Option<i64>,
    pub town_id: Option<i64>,
    pub created_at: Option<String>,
}

impl Department {
    pub fn company_id(&self) -> Option<i64> {
        self.company_id.or(self.company.as_ref().map(|c| c.id))
    }

    pub fn to_record(&self) -> Record {
        let company_name = self.company.as_ref().and_then(|c| c.name.clone());
        Record::new(self.id, self.name.clone().unwrap_or_default())
            .subtitle(company_name.clone())
            .detail(Field::Company, company_name.as_deref())
            .detail(
                Field::DepartmentType,
                self.department_type.as_ref().map(NamedRef::name),
            )
            .detail(Field::Town, self.town.as_ref().and_then(|t| t.name.as_deref()))
            .detail(Field::AddressDetail, self.address_detail.as_deref())
            .text_value(Field::Name, self.name.as_deref())
            .text_value(Field::AddressDetail, self.address_detail.as_deref())
            .choice_value(Field::Company, self.company_id())
            .choice_value(
                Field::DepartmentType,
                self.department_type_id
                    .or(self.department_type.as_ref().map(|t| t.id)),
            )
            .choice_value(Field::Town, self.town_id.or(self.town.as_ref().map(|t| t.id)))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
    pub company: Option<CompanyRef>,
    pub department: Option<DepartmentRef>,
    pub department_name: Option<String>,
    pub department_id: Option<i64>,
    pub company_id: Option<i64>,
    pub role: Option<NamedRef>,
    pub created_at: Option<String>,
}

/// The department as embedded in a user record.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DepartmentRef {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub company: Option<CompanyRef>,
}

impl User {
    pub fn role(&self) -> Role {
        Role::from_name(self.role.as_ref().map(NamedRef::name).unwrap_or_default())
    }

    pub fn department_id(&self) -> Option<i64> {
        self.department_id
            .or(self.department.as_ref().and_then(|d| d.id))
    }

    pub fn department_name(&self) -> Option<&str> {
        self.department_name
            .as_deref()
            .or(self.department.as_ref().and_then(|d| d.name.as_deref()))
    }

    pub fn company_id(&self) -> Option<i64> {
        self.company_id
            .or(self.company.as_ref().map(|c| c.id))
            .or(self
                .department
                .as_ref()
                .and_then(|d| d.company.as_ref())
                .map(|c| c.id))
    }

    fn company_name(&self) -> Option<&str> {
        self.company
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .or(self
                .department
                .as_ref()
                .and_then(|d| d.company.as_ref())
                .and_then(|c| c.name.as_deref()))
    }

    pub fn display_name(&self) -> String {
        let name = format!(
            "{} {}",
            self.name.as_deref().unwrap_or_default(),
            self.surname.as_deref().unwrap_or_default()
        );
        let name = name.trim();
        if name.is_empty() {
            self.email.clone().unwrap_or_default()
        } else {
            name.to_string()
        }
    }

    pub fn to_profile(&self) -> Profile {
        Profile {
            id: self.id,
            name: self.name.clone().unwrap_or_default(),
            surname: self.surname.clone().unwrap_or_default(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            role: self.role(),
            department_id: self.department_id(),
            department_name: self.department_name().map(str::to_string),
            company_id: self.company_id(),
            company_name: self.company_name().map(str::to_string),
            created_at: self.created_at.clone(),
        }
    }

    pub fn to_record(&self) -> Record {
        Record::new(self.id, self.display_name())
            .subtitle(self.email.clone())
            .detail(Field::Role, self.role.as_ref().map(NamedRef::name))
            .detail(Field::Department, self.department_name())
            .detail(Field::Company, self.company_name())
            .detail(Field::Phone, self.phone.as_deref())
            .text_value(Field::Name, self.name.as_deref())
            .text_value(Field::Surname, self.surname.as_deref())
            .text_value(Field::Email, self.email.as_deref())
            .text_value(Field::Phone, self.phone.as_deref())
            .choice_value(Field::Department, self.department_id())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: i64,
    pub name: Option<String>,
    pub city_id: Option<i64>,
}

impl Region {
    pub fn to_record(&self) -> Record {
        Record::new(self.id, self.name.clone().unwrap_or_default())
            .text_value(Field::Name, self.name.as_deref())
            .choice_value(Field::City, self.city_id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct City {
    pub id: i64,
    pub name: Option<String>,
}

impl City {
    pub fn to_record(&self) -> Record {
        Record::new(self.id, self.name.clone().unwrap_or_default())
            .text_value(Field::Name, self.name.as_deref())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Town {
    pub id: i64,
    pub name: Option<String>,
    pub region: Option<NamedRef>,
    pub city: Option<NamedRef>,
    #[serde(default)]
    pub company_ids: Vec<i64>,
    #[serde(default)]
    pub department_ids: Vec<i64>,
}

impl Town {
    pub fn to_record(&self) -> Record {
        let region = self.region.as_ref().map(NamedRef::name);
        Record::new(self.id, self.name.clone().unwrap_or_default())
            .subtitle(region.map(str::to_string))
            .detail(Field::Region, region)
            .detail(Field::City, self.city.as_ref().map(NamedRef::name))
            .text_value(Field::Name, self.name.as_deref())
            .choice_value(Field::Region, self.region.as_ref().map(|r| r.id))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CompanyType {
    pub id: i64,
    pub name: Option<String>,
    pub active: Option<bool>,
}

impl CompanyType {
    pub fn to_record(&self) -> Record {
        let active = self.active.unwrap_or(true);
        Record::new(self.id, self.name.clone().unwrap_or_default())
            .flag(Field::Active, active)
            .text_value(Field::Name, self.name.as_deref())
            .value(Field::Active, FieldValue::Flag(active))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DepartmentType {
    pub id: i64,
    pub name: Option<String>,
}

impl DepartmentType {
    pub fn to_record(&self) -> Record {
        Record::new(self.id, self.name.clone().unwrap_or_default())
            .text_value(Field::Name, self.name.as_deref())
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

/// `2024-03-01T10:22:11` → `2024-03-01`.
fn date_only(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}
