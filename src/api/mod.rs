pub mod dto;
pub mod mapping;
pub mod patch;

pub use dto::{LoginDto, LoginResponseDto, StudentDto};
pub use patch::{PatchOp, PatchOperation};
