use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;

pub type GenericError = Box<dyn Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path} as JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path} should contain a list of records, found {found}")]
    NotAList { path: PathBuf, found: &'static str },
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("{table} table is empty")]
    EmptyTable { table: String },
    #[error("could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not encode {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
