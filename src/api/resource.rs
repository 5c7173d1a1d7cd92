//! # Resources
//!
//! One generic fetcher for every entity collection. `ListResource<T>` knows
//! the endpoint from `T::KIND`; the scope filters narrow the collection the
//! way each screen needs it.
//!
//! The backend has no filtered endpoints for scoped lists, so scopes are
//! applied client side on the full collection.

use std::marker::PhantomData;

use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::api::client::{ApiClient, ApiError};
use crate::api::types::{City, Company, CompanyType, Department, DepartmentType, Region, Town, User};
use crate::core::entity::{EntityKind, OWN_COMPANY_PATH, Record, Scope};
use crate::core::role::Role;

pub const SELF_PATH: &str = "/api/user/get-self";

/// A backend record type with a known kind.
pub trait Resource: DeserializeOwned + Send {
    const KIND: EntityKind;

    fn to_record(&self) -> Record;
}

macro_rules! resource {
    ($ty:ty, $kind:expr) => {
        impl Resource for $ty {
            const KIND: EntityKind = $kind;

            fn to_record(&self) -> Record {
                <$ty>::to_record(self)
            }
        }
    };
}

resource!(Company, EntityKind::Company);
resource!(Department, EntityKind::Department);
resource!(User, EntityKind::User);
resource!(Region, EntityKind::Region);
resource!(City, EntityKind::City);
resource!(Town, EntityKind::Town);
resource!(CompanyType, EntityKind::CompanyType);
resource!(DepartmentType, EntityKind::DepartmentType);

/// Reads one entity collection.
pub struct ListResource<'a, T> {
    client: &'a ApiClient,
    _kind: PhantomData<T>,
}

impl<'a, T: Resource> ListResource<'a, T> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            _kind: PhantomData,
        }
    }

    pub async fn fetch_all(&self) -> Result<Vec<T>, ApiError> {
        let items: Vec<T> = self.client.get(T::KIND.endpoints().list).await?;
        debug!("Fetched {} {:?} records", items.len(), T::KIND);
        Ok(items)
    }

    pub async fn fetch_one(&self, id: i64) -> Result<T, ApiError> {
        self.client.get(&T::KIND.endpoints().item_path(id)).await
    }

    pub async fn records(&self) -> Result<Vec<Record>, ApiError> {
        Ok(self.fetch_all().await?.iter().map(T::to_record).collect())
    }

    pub async fn record(&self, id: i64) -> Result<Record, ApiError> {
        Ok(self.fetch_one(id).await?.to_record())
    }
}

/// The full collection of `kind`, flattened to records.
pub async fn fetch_records(client: &ApiClient, kind: EntityKind) -> Result<Vec<Record>, ApiError> {
    match kind {
        EntityKind::Company => ListResource::<Company>::new(client).records().await,
        EntityKind::Department => ListResource::<Department>::new(client).records().await,
        EntityKind::User => ListResource::<User>::new(client).records().await,
        EntityKind::Region => ListResource::<Region>::new(client).records().await,
        EntityKind::City => ListResource::<City>::new(client).records().await,
        EntityKind::Town => ListResource::<Town>::new(client).records().await,
        EntityKind::CompanyType => ListResource::<CompanyType>::new(client).records().await,
        EntityKind::DepartmentType => ListResource::<DepartmentType>::new(client).records().await,
    }
}

pub async fn fetch_record(client: &ApiClient, kind: EntityKind, id: i64) -> Result<Record, ApiError> {
    match kind {
        EntityKind::Company => ListResource::<Company>::new(client).record(id).await,
        EntityKind::Department => ListResource::<Department>::new(client).record(id).await,
        EntityKind::User => ListResource::<User>::new(client).record(id).await,
        EntityKind::Region => ListResource::<Region>::new(client).record(id).await,
        EntityKind::City => ListResource::<City>::new(client).record(id).await,
        EntityKind::Town => ListResource::<Town>::new(client).record(id).await,
        EntityKind::CompanyType => ListResource::<CompanyType>::new(client).record(id).await,
        EntityKind::DepartmentType => {
            ListResource::<DepartmentType>::new(client).record(id).await
        }
    }
}

/// The caller's own user record.
pub async fn fetch_self(client: &ApiClient) -> Result<User, ApiError> {
    client.get(SELF_PATH).await
}

pub async fn fetch_own_company(client: &ApiClient, company_id: i64) -> Result<Company, ApiError> {
    client.get(&format!("{}/{}", OWN_COMPANY_PATH, company_id)).await
}

/// The slice of `kind` a list in `scope` shows.
pub async fn fetch_scoped(
    client: &ApiClient,
    kind: EntityKind,
    scope: Scope,
) -> Result<Vec<Record>, ApiError> {
    match (kind, scope) {
        (_, Scope::All) => fetch_records(client, kind).await,
        (EntityKind::Department, Scope::Company(company_id)) => {
            let departments = ListResource::<Department>::new(client).fetch_all().await?;
            Ok(departments_of_company(&departments, company_id))
        }
        (EntityKind::User, Scope::Department(department_id)) => {
            let users = ListResource::<User>::new(client).fetch_all().await?;
            Ok(users_of_department(&users, department_id))
        }
        (EntityKind::User, Scope::ManagedDepartment) => {
            let users = ListResource::<User>::new(client);
            let (me, users) = futures::try_join!(fetch_self(client), users.fetch_all())?;
            Ok(managed_users(&users, me.department_name()))
        }
        (EntityKind::Company, Scope::OwnCompany) => {
            let me = fetch_self(client).await?;
            match me.company_id() {
                Some(company_id) => Ok(vec![fetch_own_company(client, company_id).await?.to_record()]),
                None => {
                    debug!("Caller has no company");
                    Ok(Vec::new())
                }
            }
        }
        (kind, scope) => {
            warn!("{:?} has no {:?} scope, listing everything", kind, scope);
            fetch_records(client, kind).await
        }
    }
}

pub fn departments_of_company(departments: &[Department], company_id: i64) -> Vec<Record> {
    departments
        .iter()
        .filter(|d| d.company_id() == Some(company_id))
        .map(Department::to_record)
        .collect()
}

/// Users of one department, managers first.
pub fn users_of_department(users: &[User], department_id: i64) -> Vec<Record> {
    let mut members: Vec<&User> = users
        .iter()
        .filter(|u| u.department_id() == Some(department_id))
        .collect();
    members.sort_by_key(|u| u.role() != Role::Manager);
    members.into_iter().map(User::to_record).collect()
}

/// Users sharing the manager's department, admins excluded.
pub fn managed_users(users: &[User], department_name: Option<&str>) -> Vec<Record> {
    let Some(department_name) = department_name else {
        return Vec::new();
    };
    users
        .iter()
        .filter(|u| u.department_name() == Some(department_name) && u.role() != Role::Admin)
        .map(User::to_record)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn users() -> Vec<User> {
        serde_json::from_value(json!([
            {"id": 1, "name": "Ali", "departmentId": 5, "departmentName": "Muhasebe", "role": {"id": 6, "name": "USER"}},
            {"id": 2, "name": "Bora", "departmentId": 5, "departmentName": "Muhasebe", "role": {"id": 5, "name": "MANAGER"}},
            {"id": 3, "name": "Cem", "departmentId": 5, "departmentName": "Muhasebe", "role": {"id": 4, "name": "ADMIN"}},
            {"id": 4, "name": "Deniz", "department": {"id": 8, "name": "IT"}, "role": {"id": 6, "name": "USER"}},
            {"id": 5, "name": "Ece", "departmentId": 5, "departmentName": "Muhasebe", "role": {"id": 6, "name": "USER"}}
        ]))
        .unwrap()
    }

    fn ids(records: &[Record]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_department_users_put_manager_first() {
        assert_eq!(ids(&users_of_department(&users(), 5)), vec![2, 1, 3, 5]);
        assert_eq!(ids(&users_of_department(&users(), 8)), vec![4]);
    }

    #[test]
    fn test_managed_users_exclude_admins() {
        assert_eq!(ids(&managed_users(&users(), Some("Muhasebe"))), vec![1, 2, 5]);
    }

    #[test]
    fn test_managed_users_without_department_is_empty() {
        assert!(managed_users(&users(), None).is_empty());
    }

    #[test]
    fn test_departments_filtered_by_company() {
        let departments: Vec<Department> = serde_json::from_value(json!([
            {"id": 1, "name": "IT", "company": {"id": 9}},
            {"id": 2, "name": "İK", "companyId": 9},
            {"id": 3, "name": "Satış", "company": {"id": 10}},
            {"id": 4, "name": "Orphan"}
        ]))
        .unwrap();
        assert_eq!(ids(&departments_of_company(&departments, 9)), vec![1, 2]);
    }
}
