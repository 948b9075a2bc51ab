use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use spendflow_core::{Employee, EmployeeId};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("employee `{employee_id}` does not exist")]
    EmployeeNotFound { employee_id: String },
}

/// Fields for a new directory record; the id is generated on insert.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    pub join_date: NaiveDate,
}

/// Partial update applied over an existing record; `None` fields are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub join_date: Option<NaiveDate>,
}

/// The employee list behind the admin user-management screen. Independent of
/// the bill collection: bills hold a point-in-time copy of submitter fields,
/// so deletions here never touch existing bills.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDirectory {
    employees: Vec<Employee>,
}

impl EmployeeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_employees(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    pub fn add(&mut self, draft: EmployeeDraft) -> Employee {
        let employee = Employee {
            id: EmployeeId(Uuid::new_v4().to_string()),
            name: draft.name,
            email: draft.email,
            role: draft.role,
            department: draft.department,
            join_date: draft.join_date,
        };
        self.employees.push(employee.clone());
        employee
    }

    pub fn update(
        &mut self,
        employee_id: &EmployeeId,
        update: EmployeeUpdate,
    ) -> Result<Employee, DirectoryError> {
        let employee = self
            .employees
            .iter_mut()
            .find(|employee| &employee.id == employee_id)
            .ok_or_else(|| DirectoryError::EmployeeNotFound {
                employee_id: employee_id.0.clone(),
            })?;

        if let Some(name) = update.name {
            employee.name = name;
        }
        if let Some(email) = update.email {
            employee.email = email;
        }
        if let Some(role) = update.role {
            employee.role = role;
        }
        if let Some(department) = update.department {
            employee.department = department;
        }
        if let Some(join_date) = update.join_date {
            employee.join_date = join_date;
        }
        Ok(employee.clone())
    }

    pub fn remove(&mut self, employee_id: &EmployeeId) -> Result<Employee, DirectoryError> {
        let index = self
            .employees
            .iter()
            .position(|employee| &employee.id == employee_id)
            .ok_or_else(|| DirectoryError::EmployeeNotFound {
                employee_id: employee_id.0.clone(),
            })?;
        Ok(self.employees.remove(index))
    }

    pub fn get(&self, employee_id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|employee| &employee.id == employee_id)
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}
