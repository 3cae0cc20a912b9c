use std::convert::From;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Error {
    UnknownCommand,
    MissingArgument(String),
    InvalidNumberFormat(String),
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    InvalidInput(String),
    Crs {
        message: String,
        hint: Option<String>,
    },
    FileFormat {
        message: String,
        hint: Option<String>,
    },
    Projection(String),
    IOError(String),
    JSONParseError(String),
    InvalidGeoJSON(String),
    ShapefileReaderError(String),
    TiffError(String),
}

impl Error {
    pub fn crs(message: impl Into<String>, hint: impl Into<String>) -> Error {
        Error::Crs {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn file_format(message: impl Into<String>, hint: Option<String>) -> Error {
        Error::FileFormat {
            message: message.into(),
            hint,
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            Error::Crs { hint, .. } | Error::FileFormat { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }

    fn message(&self) -> String {
        match self {
            Error::UnknownCommand => "Unknown command".to_string(),
            Error::MissingArgument(name) => format!("Missing argument: {}", name),
            Error::InvalidNumberFormat(msg) => format!("Invalid number: {}", msg),
            Error::OutOfRange {
                name,
                value,
                min,
                max,
            } => format!("{} {} out of range [{}, {}]", name, value, min, max),
            Error::InvalidInput(msg) => format!("Invalid input: {}", msg),
            Error::Crs { message, .. } => message.clone(),
            Error::FileFormat { message, .. } => message.clone(),
            Error::Projection(msg) => format!("Projection failed: {}", msg),
            Error::IOError(msg) => format!("I/O error: {}", msg),
            Error::JSONParseError(msg) => format!("Invalid JSON: {}", msg),
            Error::InvalidGeoJSON(msg) => format!("Invalid GeoJSON: {}", msg),
            Error::ShapefileReaderError(msg) => format!("Cannot read shapefile: {}", msg),
            Error::TiffError(msg) => format!("Cannot process GeoTIFF: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message())?;
        if let Some(hint) = self.hint() {
            write!(f, "\n  Hint: {}", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::IOError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JSONParseError(err.to_string())
    }
}

impl From<geojson::Error> for Error {
    fn from(err: geojson::Error) -> Self {
        Error::InvalidGeoJSON(err.to_string())
    }
}

impl From<shapefile::Error> for Error {
    fn from(err: shapefile::Error) -> Self {
        Error::ShapefileReaderError(err.to_string())
    }
}

impl From<tiff::TiffError> for Error {
    fn from(err: tiff::TiffError) -> Self {
        Error::TiffError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for Error {
    fn from(err: ndarray::ShapeError) -> Self {
        Error::InvalidInput(err.to_string())
    }
}
