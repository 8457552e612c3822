pub mod analyze_python_file;
