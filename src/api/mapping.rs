//! Conversions between the stored `Student` row and the `StudentDto` wire shape.
//!
//! Shared fields copy one-to-one. `department_id` exists only on the row: it is dropped
//! on the way out and left empty on the way in; handlers that overwrite an existing row
//! carry it over themselves. A row without an address maps to an empty DTO address.

use crate::api::dto::StudentDto;
use crate::database::models::Student;

impl From<Student> for StudentDto {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            student_name: student.student_name,
            email: student.email,
            address: student.address.unwrap_or_default(),
            dob: student.dob,
        }
    }
}

impl From<StudentDto> for Student {
    fn from(dto: StudentDto) -> Self {
        Self {
            id: dto.id,
            student_name: dto.student_name,
            email: dto.email,
            address: Some(dto.address),
            dob: dto.dob,
            department_id: None,
        }
    }
}

/// Map a DTO onto the row it replaces, keeping the row's department.
pub fn replace_student(existing: &Student, dto: StudentDto) -> Student {
    Student {
        department_id: existing.department_id,
        ..Student::from(dto)
    }
}
