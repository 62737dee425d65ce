use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::printer::{print_schema, PrintOptions};
use crate::schema_sdl;

pub const APPSYNC_SCALARS: &'static [&'static str] = &[
    "scalar AWSDate",
    "scalar AWSTime",
    "scalar AWSDateTime",
    "scalar AWSTimestamp",
    "scalar AWSEmail",
    "scalar AWSJSON",
    "scalar AWSURL",
    "scalar AWSPhone",
    "scalar AWSIPAddress",
];

pub const APPSYNC_DIRECTIVES: &'static [&'static str] = &[
    "directive @aws_subscribe(mutations: [String!]!) on FIELD_DEFINITION",
    "directive @aws_api_key on OBJECT | FIELD_DEFINITION | INPUT_FIELD_DEFINITION",
    "directive @aws_iam on OBJECT | FIELD_DEFINITION | INPUT_FIELD_DEFINITION",
    "directive @aws_oidc on OBJECT | FIELD_DEFINITION | INPUT_FIELD_DEFINITION",
    "directive @aws_cognito_user_pools(cognito_groups: [String!]!) on OBJECT | FIELD_DEFINITION | INPUT_FIELD_DEFINITION",
    "directive @aws_auth(cognito_groups: [String!]!) on OBJECT | FIELD_DEFINITION | INPUT_FIELD_DEFINITION",
];

fn appsync_definitions() -> impl Iterator<Item = &'static str> {
    APPSYNC_SCALARS.iter().chain(APPSYNC_DIRECTIVES.iter()).copied()
}

/// Converts SDL documents into a single AppSync schema.
///
/// The documents are merged in order after the AppSync scalar and directive declarations,
/// type extensions are folded into their base types and the AppSync declarations are
/// removed again from the printed result.
pub fn convert_schemas<I, S>(documents: I, options: &PrintOptions) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>
{
    let documents: Vec<S> = documents.into_iter().collect();
    debug!(documents = documents.len(), ?options, "converting schema documents");

    let mut parts: Vec<&str> = appsync_definitions().collect();
    parts.extend(documents.iter().map(|it| it.as_ref()));
    let sdl = parts.join("\n");

    let schema = schema_sdl::from_sdl_string(&sdl)?;
    let printed = print_schema(&schema, options);
    Ok(strip_appsync_definitions(&printed))
}

pub fn convert_schema(document: &str, options: &PrintOptions) -> Result<String> {
    convert_schemas([document], options)
}

/// Removes the first occurrence of every AppSync declaration and tidies the blank lines left behind.
pub fn strip_appsync_definitions(printed: &str) -> String {
    let mut sdl = printed.to_string();
    for definition in appsync_definitions() {
        sdl = sdl.replacen(definition, "", 1);
    }
    collapse_first_blank_run(&sdl).trim().to_string()
}

static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Collapses the first run of three or more newlines into two.
fn collapse_first_blank_run(text: &str) -> String {
    BLANK_RUN.replacen(text, 1, "\n\n").into_owned()
}
