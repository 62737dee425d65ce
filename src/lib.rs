//! Converts GraphQL SDL written for a generic server into the dialect AWS AppSync accepts.
//!
//! Type extensions are merged into their base types, descriptions can be printed as legacy
//! `#` comments, directives on object types and fields can be kept, and the AppSync scalar
//! and directive declarations the service provides are stripped from the result.

pub mod convert;
pub mod error;
pub mod printer;
pub mod schema;
pub mod schema_sdl;

pub use convert::{convert_schema, convert_schemas, APPSYNC_DIRECTIVES, APPSYNC_SCALARS};
pub use error::{ConvertError, SchemaError};
pub use printer::{print_introspection_schema, print_schema, print_type, PrintOptions};
pub use schema::Schema;
pub use schema_sdl::from_sdl_string as build_schema;
