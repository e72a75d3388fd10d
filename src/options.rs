use std::path::PathBuf;

/// Settings shared by every parser run.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Only convert the UML class with exactly this name.
    pub class_name: Option<String>,
    /// Encoding label for the input file (`latin-1` for XML, `utf-8` for JSON by default).
    pub encoding: Option<String>,
    /// README template rendered next to each schema.
    pub template: Option<PathBuf>,
    /// Suffix appended to output file names (`<title>-<postfix>.json`).
    pub postfix: Option<String>,
    /// Directory under which the per-schema directories are created.
    pub output_dir: PathBuf,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessOptions {
    pub fn new() -> Self {
        Self {
            class_name: None,
            encoding: None,
            template: None,
            postfix: None,
            output_dir: PathBuf::from("."),
        }
    }
}
