use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::database::repository::{Entity, SqlValue};

/// A row of the `departments` table. Students reference it through `department_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Department {
    pub id: i32,
    #[validate(length(min = 1, max = 150, message = "Department name is required and at most 150 characters"))]
    pub department_name: String,
    #[validate(length(max = 500, message = "Description is at most 500 characters"))]
    pub description: Option<String>,
}

impl Entity for Department {
    const TABLE: &'static str = "departments";
    const COLUMNS: &'static [&'static str] = &["id", "department_name", "description"];

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(Some(self.department_name.clone())),
            SqlValue::Text(self.description.clone()),
        ]
    }
}
