pub mod dialogs;
pub mod file_picker;
pub mod operations;
pub mod theme;
