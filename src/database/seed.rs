//! Rows every fresh store starts with. `migrations/` inserts the same rows into Postgres.

use chrono::{NaiveDate, NaiveDateTime};

use crate::database::models::{Department, Student};

fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

pub fn departments() -> Vec<Department> {
    vec![
        Department {
            id: 1,
            department_name: "ECE".to_string(),
            description: Some("ECE Department".to_string()),
        },
        Department {
            id: 2,
            department_name: "CSE".to_string(),
            description: Some("CSE Department".to_string()),
        },
    ]
}

pub fn students() -> Vec<Student> {
    vec![
        Student {
            id: 1,
            student_name: "Waqas".to_string(),
            email: "waqas@gmail.com".to_string(),
            address: Some("Atd".to_string()),
            dob: midnight(2000, 12, 12),
            department_id: None,
        },
        Student {
            id: 2,
            student_name: "Sufiyan".to_string(),
            email: "sufi@gmail.com".to_string(),
            address: Some("Atd".to_string()),
            dob: midnight(2002, 12, 12),
            department_id: None,
        },
    ]
}
