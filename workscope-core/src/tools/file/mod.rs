pub mod get_project_structure;
pub mod read_file_content;
pub mod read_lines_from_file;
pub mod write_in_local_file;
