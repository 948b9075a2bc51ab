use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

/// Directory record for one staff member. Bills carry a point-in-time copy of
/// the submitter's id and name, so removing an employee never invalidates an
/// existing bill.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    pub join_date: NaiveDate,
}
