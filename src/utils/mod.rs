pub mod file_info;
pub mod pdf;
pub mod text_extract;
