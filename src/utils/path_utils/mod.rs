mod expansion;
mod file_checks;

pub use file_checks::{check_file_creatable, expand_path};
