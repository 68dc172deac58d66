use std::fs;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unable to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Full-file overwrite. The caller serializes the complete document first,
/// so a prior artifact is only ever replaced wholesale, never appended to.
pub fn write(path: &Path, contents: &str) -> Result<(), Error> {
    return match fs::write(path, contents) {
        Ok(_) => Ok(()),
        Err(error) => Err(Error::Io {
            path: path.display().to_string(),
            source: error,
        }),
    };
}
