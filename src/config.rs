use serde::{Deserialize, Serialize};
use std::{fs, io, path::PathBuf};
use validator::{Validate, ValidationError};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("File {0} not found")]
    FileNotFound(String),

    #[error("Parsing error: {0}")]
    ParsingError(String),

    #[error("Validation errors: {0}")]
    ValidationError(String),

    #[error("Unknown error occurred: {0}")]
    Unknown(String),
}

/// Shape of the emitted configuration document. Both shapes are consumed by
/// real frontend builds; the extended one additionally carries the reverse
/// proxy endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    #[default]
    Minimal,
    Extended,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ConfigFile {
    pub location: PathBuf,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ConfigEntry {
    #[validate(required)]
    pub stack_name: Option<String>,

    pub region: Option<String>,

    #[validate(custom = "validate_json_file")]
    pub artifact: ConfigFile,

    #[serde(default)]
    pub schema: SchemaVariant,
}

impl ConfigEntry {
    /// Empty only if validation was skipped.
    pub fn stack_name(&self) -> &str {
        return self.stack_name.as_deref().unwrap_or_default();
    }
}

type Config = Vec<ConfigEntry>;
pub fn parse(path: &PathBuf) -> Result<Config, Error> {
    let contents = match fs::read_to_string(path) {
        Ok(raw_contents) => Ok(raw_contents),
        Err(error) => match error.kind() {
            io::ErrorKind::NotFound => Err(Error::FileNotFound(path.display().to_string())),
            _ => Err(Error::Unknown(error.to_string())),
        },
    }?;

    let config: Config = match serde_yaml::from_str(&contents) {
        Ok(data) => Ok(data),
        Err(error) => Err(Error::ParsingError(error.to_string())),
    }?;

    for config_entry in &config {
        match config_entry.validate() {
            Ok(_) => (),
            Err(error) => return Err(Error::ValidationError(error.to_string())),
        }
    }

    return Ok(config);
}

fn validate_json_file(artifact_file: &ConfigFile) -> Result<(), ValidationError> {
    let file_extension = match artifact_file.location.extension() {
        Some(extension) => extension,
        None => {
            return Err(ValidationError::new(
                "Unable to parse the extension of the artifact file location",
            ))
        }
    };
    if file_extension != "json" {
        return Err(ValidationError::new(
            "The artifact file location has to end with `.json`",
        ));
    }

    return Ok(());
}
