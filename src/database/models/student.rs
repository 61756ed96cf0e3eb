use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::database::repository::{Entity, SqlValue};

/// A row of the `students` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Student {
    pub id: i32,
    #[validate(length(min = 1, max = 150, message = "Student name is required and at most 150 characters"))]
    pub student_name: String,
    #[validate(
        email(message = "Enter Valid Email"),
        length(min = 1, max = 200, message = "Email is required and at most 200 characters")
    )]
    pub email: String,
    pub address: Option<String>,
    pub dob: NaiveDateTime,
    pub department_id: Option<i32>,
}

impl Entity for Student {
    const TABLE: &'static str = "students";
    const COLUMNS: &'static [&'static str] =
        &["id", "student_name", "email", "address", "dob", "department_id"];

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(Some(self.student_name.clone())),
            SqlValue::Text(Some(self.email.clone())),
            SqlValue::Text(self.address.clone()),
            SqlValue::Timestamp(self.dob),
            SqlValue::Int(self.department_id),
        ]
    }
}
