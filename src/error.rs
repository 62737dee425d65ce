use std::fmt;

use graphql_parser::schema::ParseError;
use graphql_parser::Pos;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Syntax(#[from] ParseError),

    #[error("{}", display_all(.0))]
    Schema(Vec<SchemaError>),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// A single validation failure found while building or extending a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    pub message: String,
    pub position: Option<Pos>,
}

impl SchemaError {
    pub fn new(message: impl Into<String>, position: Pos) -> SchemaError {
        SchemaError { message: message.into(), position: Some(position) }
    }

    pub fn without_position(message: impl Into<String>) -> SchemaError {
        SchemaError { message: message.into(), position: None }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.position {
            Some(pos) => write!(f, "{} ({}:{})", self.message, pos.line, pos.column),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for SchemaError {}

fn display_all(errors: &[SchemaError]) -> String {
    errors.iter().map(|it| it.to_string()).collect::<Vec<_>>().join("\n\n")
}

impl ConvertError {
    /// Messages of all validation errors, without positions.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ConvertError::Syntax(error) => vec![error.to_string()],
            ConvertError::Schema(errors) => errors.iter().map(|it| it.message.clone()).collect(),
        }
    }
}
