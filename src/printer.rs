use std::cmp::Ordering;

use serde::Deserialize;

use crate::schema::{
    format_float, quote_string, Directive, DirectiveDefinition, EnumType, Field, InputObjectType, InputValue,
    InterfaceType, NamedType, ObjectType, ScalarType, Schema, TypeRef, UnionType, Value,
    DEFAULT_DEPRECATION_REASON,
};

const INDENT: &'static str = "  ";
const MAX_LINE_LENGTH: usize = 120;
const MIN_WRAPPED_LENGTH: usize = 15;
const MULTI_LINE_DESCRIPTION_LENGTH: usize = 70;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrintOptions {
    /// Print descriptions as `#` comments instead of block strings.
    pub comment_descriptions: bool,
    /// Keep directives applied to object types and their fields.
    pub include_directives: bool
}

/// Prints every user defined directive and type of the schema.
pub fn print_schema(schema: &Schema, options: &PrintOptions) -> String {
    print_filtered_schema(
        schema,
        |directive| !directive.is_built_in(),
        |named_type| !named_type.is_built_in_scalar() && !named_type.is_introspection_type(),
        options
    )
}

/// Prints the specified directives and the introspection types.
pub fn print_introspection_schema(schema: &Schema, options: &PrintOptions) -> String {
    print_filtered_schema(
        schema,
        |directive| directive.is_built_in(),
        |named_type| named_type.is_introspection_type(),
        options
    )
}

pub fn print_type(schema: &Schema, named_type: &NamedType, options: &PrintOptions) -> String {
    SchemaPrinter { schema, options }.named_type(named_type)
}

fn print_filtered_schema(
    schema: &Schema,
    directive_filter: impl Fn(&DirectiveDefinition) -> bool,
    type_filter: impl Fn(&NamedType) -> bool,
    options: &PrintOptions
) -> String {
    let printer = SchemaPrinter { schema, options };

    let mut types: Vec<&NamedType> = schema.types.values().filter(|it| type_filter(*it)).collect();
    types.sort_by(|a, b| locale_compare(a.name(), b.name()));

    let blocks: Vec<String> = printer.schema_definition()
        .into_iter()
        .chain(schema.directives.iter().filter(|it| directive_filter(*it)).map(|it| printer.directive(it)))
        .chain(types.into_iter().map(|it| printer.named_type(it)))
        .filter(|block| !block.is_empty())
        .collect();
    blocks.join("\n\n") + "\n"
}

struct SchemaPrinter<'a> {
    schema: &'a Schema,
    options: &'a PrintOptions
}

impl<'a> SchemaPrinter<'a> {
    fn schema_definition(&self) -> Option<String> {
        if self.has_conventional_root_names() {
            return None;
        }
        let operations: Vec<String> = [
            ("query", &self.schema.query_type),
            ("mutation", &self.schema.mutation_type),
            ("subscription", &self.schema.subscription_type)
        ]
            .into_iter()
            .filter_map(|(operation, name)| name.as_ref().map(|name| format!("{}{}: {}", INDENT, operation, name)))
            .collect();
        Some(format!("schema {{\n{}\n}}", operations.join("\n")))
    }

    /// Root types named `Query`, `Mutation` and `Subscription` need no schema block.
    fn has_conventional_root_names(&self) -> bool {
        [
            (&self.schema.query_type, "Query"),
            (&self.schema.mutation_type, "Mutation"),
            (&self.schema.subscription_type, "Subscription")
        ]
            .into_iter()
            .all(|(name, conventional)| name.as_deref().map_or(true, |name| name == conventional))
    }

    fn named_type(&self, named_type: &NamedType) -> String {
        match named_type {
            NamedType::Scalar(scalar) => self.scalar(scalar),
            NamedType::Object(object) => self.object(object),
            NamedType::Interface(interface) => self.interface(interface),
            NamedType::Union(union) => self.union(union),
            NamedType::Enum(enum_type) => self.enum_type(enum_type),
            NamedType::InputObject(input) => self.input_object(input)
        }
    }

    fn scalar(&self, scalar: &ScalarType) -> String {
        format!("{}scalar {}", self.description(scalar.description.as_deref(), "", true), scalar.name)
    }

    fn object(&self, object: &ObjectType) -> String {
        let implemented_interfaces = if object.interfaces.is_empty() {
            String::new()
        } else {
            format!(" implements {}", object.interfaces.join(" & "))
        };
        format!(
            "{}type {}{}{}{}",
            self.description(object.description.as_deref(), "", true),
            object.name,
            implemented_interfaces,
            self.type_directives(&object.directives),
            self.fields(&object.fields)
        )
    }

    fn type_directives(&self, directives: &[Directive]) -> String {
        if self.options.include_directives && !directives.is_empty() {
            format!(" {}", join_directives(directives))
        } else {
            String::new()
        }
    }

    fn interface(&self, interface: &InterfaceType) -> String {
        format!(
            "{}interface {}{}",
            self.description(interface.description.as_deref(), "", true),
            interface.name,
            self.fields(&interface.fields)
        )
    }

    fn union(&self, union: &UnionType) -> String {
        let possible_types = if union.types.is_empty() {
            String::new()
        } else {
            format!(" = {}", union.types.join(" | "))
        };
        format!("{}union {}{}", self.description(union.description.as_deref(), "", true), union.name, possible_types)
    }

    fn enum_type(&self, enum_type: &EnumType) -> String {
        let values: Vec<String> = enum_type.values
            .iter()
            .map(|value| format!("{}{}{}", INDENT, value.name, print_deprecated(value.deprecation_reason.as_deref())))
            .collect();
        format!(
            "{}enum {}{}",
            self.description(enum_type.description.as_deref(), "", true),
            enum_type.name,
            print_block(&values)
        )
    }

    fn input_object(&self, input: &InputObjectType) -> String {
        let fields: Vec<String> = input.fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                format!(
                    "{}{}{}",
                    self.description(field.description.as_deref(), INDENT, i == 0),
                    INDENT,
                    self.input_value(field, false)
                )
            })
            .collect();
        format!("{}input {}{}", self.description(input.description.as_deref(), "", true), input.name, print_block(&fields))
    }

    fn fields(&self, fields: &[Field]) -> String {
        let fields: Vec<String> = fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let description = self.description(field.description.as_deref(), INDENT, i == 0);
                if self.options.include_directives && !field.directives.is_empty() {
                    format!(
                        "{}{}{}{}: {} {}",
                        description,
                        INDENT,
                        field.name,
                        self.arguments(&field.arguments, INDENT, true),
                        field.field_type,
                        join_directives(&field.directives)
                    )
                } else {
                    format!(
                        "{}{}{}{}: {}{}",
                        description,
                        INDENT,
                        field.name,
                        self.arguments(&field.arguments, INDENT, false),
                        field.field_type,
                        print_deprecated(field.deprecation_reason.as_deref())
                    )
                }
            })
            .collect();
        print_block(&fields)
    }

    fn arguments(&self, arguments: &[InputValue], indentation: &str, with_directives: bool) -> String {
        if arguments.is_empty() {
            return String::new();
        }

        // Without descriptions every argument fits on one line.
        if arguments.iter().all(|it| it.description.as_deref().map_or(true, str::is_empty)) {
            let arguments: Vec<String> = arguments.iter().map(|it| self.input_value(it, with_directives)).collect();
            return format!("({})", arguments.join(", "));
        }

        let argument_indentation = format!("{}{}", INDENT, indentation);
        let arguments: Vec<String> = arguments
            .iter()
            .enumerate()
            .map(|(i, argument)| {
                format!(
                    "{}{}{}",
                    self.description(argument.description.as_deref(), &argument_indentation, i == 0),
                    argument_indentation,
                    self.input_value(argument, with_directives)
                )
            })
            .collect();
        format!("(\n{}\n{})", arguments.join("\n"), indentation)
    }

    fn input_value(&self, value: &InputValue, with_directives: bool) -> String {
        let mut declaration = format!("{}: {}", value.name, value.value_type);
        if let Some(default) = value.default_value.as_ref().and_then(|it| self.ast_from_value(it, &value.value_type)) {
            declaration.push_str(" = ");
            declaration.push_str(&default);
        }
        if with_directives && !value.directives.is_empty() {
            declaration.push(' ');
            declaration.push_str(&join_directives(&value.directives));
        }
        declaration
    }

    fn directive(&self, directive: &DirectiveDefinition) -> String {
        let locations: Vec<&str> = directive.locations.iter().map(|it| it.as_str()).collect();
        format!(
            "{}directive @{}{}{} on {}",
            self.description(directive.description.as_deref(), "", true),
            directive.name,
            self.arguments(&directive.arguments, "", false),
            if directive.repeatable { " repeatable" } else { "" },
            locations.join(" | ")
        )
    }

    fn description(&self, description: Option<&str>, indentation: &str, first_in_block: bool) -> String {
        print_description(self.options, description, indentation, first_in_block)
    }

    /// Literal of a default value as the schema coerces it to its type, `None` when it does not coerce.
    fn ast_from_value(&self, value: &Value, value_type: &TypeRef) -> Option<String> {
        match value_type {
            TypeRef::NonNull(inner) => match value {
                Value::Null => None,
                value => self.ast_from_value(value, inner)
            },
            _ if *value == Value::Null => Some("null".to_string()),
            TypeRef::List(item_type) => match value {
                Value::List(items) => {
                    let items = items
                        .iter()
                        .map(|it| self.ast_from_value(it, item_type))
                        .collect::<Option<Vec<String>>>()?;
                    Some(format!("[{}]", items.join(", ")))
                }
                value => self.ast_from_value(value, item_type).map(|it| format!("[{}]", it))
            },
            TypeRef::Named(name) => match self.schema.type_named(name) {
                Some(NamedType::InputObject(input)) => {
                    if !matches!(value, Value::Object(_)) {
                        return None;
                    }
                    let mut fields = Vec::new();
                    for field in &input.fields {
                        let literal = match value.field(&field.name) {
                            Some(given) => self.ast_from_value(given, &field.value_type)?,
                            None => match field.default_value.as_ref().and_then(|it| self.ast_from_value(it, &field.value_type)) {
                                Some(default) => default,
                                None if matches!(field.value_type, TypeRef::NonNull(_)) => return None,
                                None => continue
                            }
                        };
                        fields.push(format!("{}: {}", field.name, literal));
                    }
                    Some(format!("{{{}}}", fields.join(", ")))
                }
                Some(NamedType::Enum(enum_type)) => match value {
                    Value::Enum(name) if enum_type.values.iter().any(|it| &it.name == name) => Some(name.clone()),
                    _ => None
                },
                _ => scalar_literal(name, value)
            }
        }
    }
}

fn scalar_literal(scalar: &str, value: &Value) -> Option<String> {
    match (scalar, value) {
        ("Int", Value::Int(n)) if i32::try_from(*n).is_ok() => Some(n.to_string()),
        ("Float", Value::Int(n)) => Some(n.to_string()),
        ("Float", Value::Float(n)) => Some(format_float(*n)),
        ("String", Value::String(text)) => Some(quote_string(text)),
        ("Boolean", Value::Boolean(flag)) => Some(flag.to_string()),
        ("ID", Value::Int(n)) => Some(n.to_string()),
        ("ID", Value::String(text)) if is_integer_string(text) => Some(text.clone()),
        ("ID", Value::String(text)) => Some(quote_string(text)),
        ("Int" | "Float" | "String" | "Boolean" | "ID", _) => None,
        (_, Value::Enum(name)) => Some(quote_string(name)),
        (_, value) => Some(value.to_string())
    }
}

fn is_integer_string(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) && (digits == "0" || !digits.starts_with('0'))
}

fn join_directives(directives: &[Directive]) -> String {
    directives.iter().map(|it| it.to_string()).collect::<Vec<_>>().join(" ")
}

fn print_block(items: &[String]) -> String {
    if items.is_empty() {
        String::new()
    } else {
        format!(" {{\n{}\n}}", items.join("\n"))
    }
}

fn print_deprecated(reason: Option<&str>) -> String {
    match reason {
        None => String::new(),
        Some(reason) if reason.is_empty() || reason == DEFAULT_DEPRECATION_REASON => " @deprecated".to_string(),
        Some(reason) => format!(" @deprecated(reason: {})", quote_string(reason))
    }
}

pub fn print_description(
    options: &PrintOptions,
    description: Option<&str>,
    indentation: &str,
    first_in_block: bool
) -> String {
    let description = match description {
        Some(description) if !description.is_empty() => description,
        _ => return String::new()
    };

    let lines = description_lines(description, MAX_LINE_LENGTH.saturating_sub(indentation.len()));
    if options.comment_descriptions {
        return print_description_with_comments(&lines, indentation, first_in_block);
    }

    let text = lines.join("\n");
    let prefer_multiple_lines = text.encode_utf16().count() > MULTI_LINE_DESCRIPTION_LENGTH;
    let block_string = print_block_string(&text, "", prefer_multiple_lines);
    let prefix = if !indentation.is_empty() && !first_in_block {
        format!("\n{}", indentation)
    } else {
        indentation.to_string()
    };
    format!("{}{}\n", prefix, block_string.replace('\n', &format!("\n{}", indentation)))
}

fn print_description_with_comments(lines: &[String], indentation: &str, first_in_block: bool) -> String {
    let mut description = if !indentation.is_empty() && !first_in_block {
        "\n".to_string()
    } else {
        String::new()
    };
    for line in lines {
        if line.is_empty() {
            description.push_str(&format!("{}#\n", indentation));
        } else {
            description.push_str(&format!("{}# {}\n", indentation, line));
        }
    }
    description
}

/// Block string literal for a description, escaping nested triple quotes.
pub fn print_block_string(value: &str, indentation: &str, prefer_multiple_lines: bool) -> String {
    let is_single_line = !value.contains('\n');
    let has_leading_space = value.starts_with(' ') || value.starts_with('\t');
    let has_trailing_quote = value.ends_with('"');
    let print_as_multiple_lines = !is_single_line || has_trailing_quote || prefer_multiple_lines;

    let mut result = String::new();
    // A single line starting with whitespace stays on the opening line.
    if print_as_multiple_lines && !(is_single_line && has_leading_space) {
        result.push('\n');
        result.push_str(indentation);
    }
    if indentation.is_empty() {
        result.push_str(value);
    } else {
        result.push_str(&value.replace('\n', &format!("\n{}", indentation)));
    }
    if print_as_multiple_lines {
        result.push('\n');
    }
    format!("\"\"\"{}\"\"\"", result.replace("\"\"\"", "\\\"\"\""))
}

fn description_lines(description: &str, max_len: usize) -> Vec<String> {
    description
        .split('\n')
        .flat_map(|line| {
            if line.encode_utf16().count() < max_len + 5 {
                vec![line.to_string()]
            } else {
                break_line(line, max_len)
            }
        })
        .collect()
}

/// Splits a long line at spaces into sublines of at most `max_len - 40` characters.
///
/// A line offering fewer than two break points is kept whole.
pub fn break_line(line: &str, max_len: usize) -> Vec<String> {
    let max_run = max_len.saturating_sub(40);
    if max_run < MIN_WRAPPED_LENGTH {
        return vec![line.to_string()];
    }

    let chars: Vec<char> = line.chars().collect();
    // Alternating text between segments and the segments themselves.
    let mut parts: Vec<String> = Vec::new();
    let mut last = 0;
    let mut position = 0;
    while position < chars.len() {
        match match_segment(&chars, position, max_run) {
            Some(end) => {
                parts.push(chars[last..position].iter().collect());
                parts.push(chars[position..end].iter().collect());
                last = end;
                position = end;
            }
            None => position += 1
        }
    }
    parts.push(chars[last..].iter().collect());

    if parts.len() < 4 {
        return vec![line.to_string()];
    }

    let mut sublines = vec![format!("{}{}{}", parts[0], parts[1], parts[2])];
    for i in (3..parts.len() - 1).step_by(2) {
        let segment: String = parts[i].chars().skip(1).collect();
        sublines.push(format!("{}{}", segment, parts[i + 1]));
    }
    sublines
}

/// End of the longest segment starting at `start`: a space (or the line start) followed by
/// 15 to `max_run` characters and then a space or the end of the line.
fn match_segment(chars: &[char], start: usize, max_run: usize) -> Option<usize> {
    let run_from = |from: usize| -> Option<usize> {
        let available = chars[from..]
            .iter()
            .take(max_run)
            .take_while(|c| !matches!(**c, '\n' | '\r' | '\u{2028}' | '\u{2029}'))
            .count();
        (MIN_WRAPPED_LENGTH..=available)
            .rev()
            .map(|run| from + run)
            .find(|&end| end == chars.len() || chars[end] == ' ')
    };

    if chars[start] == ' ' {
        if let Some(end) = run_from(start + 1) {
            return Some(end);
        }
    }
    if start == 0 {
        return run_from(0);
    }
    None
}

/// Orders names the way a locale-aware comparison does: letters case-insensitively first,
/// then lowercase before uppercase.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    fn primary(name: &str) -> Vec<(u8, char)> {
        name.chars()
            .map(|c| {
                let class = if c.is_alphabetic() {
                    2
                } else if c.is_numeric() {
                    1
                } else {
                    0
                };
                (class, c.to_lowercase().next().unwrap_or(c))
            })
            .collect()
    }
    fn tertiary(name: &str) -> Vec<bool> {
        name.chars().map(char::is_uppercase).collect()
    }

    primary(a).cmp(&primary(b))
        .then_with(|| tertiary(a).cmp(&tertiary(b)))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema_sdl::from_sdl_string;

    const COMMENTS: PrintOptions = PrintOptions { comment_descriptions: true, include_directives: false };
    const DIRECTIVES: PrintOptions = PrintOptions { comment_descriptions: false, include_directives: true };

    fn print(sdl: &str, options: &PrintOptions) -> String {
        match from_sdl_string(sdl) {
            Ok(schema) => print_schema(&schema, options),
            Err(error) => panic!("schema failed to build: {}", error)
        }
    }

    #[test]
    fn prints_types_sorted_with_blank_lines() {
        let printed = print(
            "type Query { b: String a(first: Int = 10, after: String): [String!]! }
             type author { name: String }
             scalar Date
             union Result = Query | author
             interface Node { id: ID! }",
            &PrintOptions::default()
        );
        assert_eq!(
            printed,
            "type author {\n  name: String\n}\n\n\
             scalar Date\n\n\
             interface Node {\n  id: ID!\n}\n\n\
             type Query {\n  b: String\n  a(first: Int = 10, after: String): [String!]!\n}\n\n\
             union Result = Query | author\n"
        );
    }

    #[test]
    fn prints_schema_block_for_renamed_roots() {
        let printed = print("schema { query: Root mutation: Mutation } type Root { a: String } type Mutation { b: String }", &PrintOptions::default());
        assert!(printed.starts_with("schema {\n  query: Root\n  mutation: Mutation\n}\n\n"));

        let printed = print("type Query { a: String } type Mutation { b: String }", &PrintOptions::default());
        assert!(!printed.contains("schema {"));
    }

    #[test]
    fn prints_directive_definitions_before_types() {
        let printed = print(
            "directive @cached(ttl: Int = 60) repeatable on FIELD_DEFINITION | OBJECT
             type Query { a: String }",
            &PrintOptions::default()
        );
        assert_eq!(
            printed,
            "directive @cached(ttl: Int = 60) repeatable on FIELD_DEFINITION | OBJECT\n\ntype Query {\n  a: String\n}\n"
        );
    }

    #[test]
    fn prints_enums_and_inputs() {
        let printed = print(
            "enum Sort { ASC DESC @deprecated(reason: \"Use ASC\") OLD @deprecated }
             input Page { \"page size\" size: Int = 20 sort: [Sort] = ASC after: ID = \"42\" }
             type Query { a(page: Page = {sort: DESC, size: 5}): String }",
            &PrintOptions::default()
        );
        assert!(printed.contains("enum Sort {\n  ASC\n  DESC @deprecated(reason: \"Use ASC\")\n  OLD @deprecated\n}"));
        assert!(printed.contains("input Page {\n  \"\"\"page size\"\"\"\n  size: Int = 20\n  sort: [Sort] = [ASC]\n  after: ID = 42\n}"));
        assert!(printed.contains("a(page: Page = {size: 5, sort: [DESC], after: 42}): String"));
    }

    #[test]
    fn defaults_that_do_not_coerce_are_dropped() {
        let printed = print(
            "input Page { size: Int = 20 sort: String }
             input Strict { size: Int! sort: String }
             type Query {
               list(x: [Int] = [1, \"two\"]): String
               filled(page: Page = {sort: \"x\"}): String
               missing(page: Strict = {sort: \"x\"}): String
               wide(n: Int = 3000000000): String
               narrow(n: Int = 2147483647): String
             }",
            &PrintOptions::default()
        );
        assert!(printed.contains("  list(x: [Int]): String\n"), "{}", printed);
        assert!(printed.contains("  filled(page: Page = {size: 20, sort: \"x\"}): String\n"), "{}", printed);
        assert!(printed.contains("  missing(page: Strict): String\n"), "{}", printed);
        assert!(printed.contains("  wide(n: Int): String\n"), "{}", printed);
        assert!(printed.contains("  narrow(n: Int = 2147483647): String\n"), "{}", printed);
    }

    #[test]
    fn prints_block_descriptions() {
        let printed = print(
            "\"\"\"type description\"\"\"
             type Query {
               \"first\" a: String
               \"second\" b: String
             }",
            &PrintOptions::default()
        );
        assert_eq!(
            printed,
            "\"\"\"type description\"\"\"\ntype Query {\n  \"\"\"first\"\"\"\n  a: String\n\n  \"\"\"second\"\"\"\n  b: String\n}\n"
        );
    }

    #[test]
    fn prints_comment_descriptions() {
        let printed = print(
            "\"\"\"\ntype description\n\nsecond paragraph\n\"\"\"
             type Query { \"first\" a: String \"second\" b: String }",
            &COMMENTS
        );
        assert_eq!(
            printed,
            "# type description\n#\n# second paragraph\ntype Query {\n  # first\n  a: String\n\n  # second\n  b: String\n}\n"
        );
    }

    #[test]
    fn prints_described_arguments_on_separate_lines() {
        let printed = print(
            "type Query { search(\"text to find\" text: String, limit: Int): [String] }",
            &PrintOptions::default()
        );
        assert!(printed.contains(
            "  search(\n    \"\"\"text to find\"\"\"\n    text: String\n    limit: Int\n  ): [String]"
        ));
    }

    #[test]
    fn includes_directives_only_when_asked() {
        let sdl = "directive @auth(groups: [String]) on OBJECT | FIELD_DEFINITION
                   type Query @auth(groups: [\"admin\"]) {
                     \"secret field\" secret: String @auth(groups: [\"root\"]) @deprecated(reason: \"gone\")
                     open: String
                   }";
        let printed = print(sdl, &DIRECTIVES);
        assert!(printed.contains("type Query @auth(groups: [\"admin\"]) {\n"));
        assert!(printed.contains(
            "  \"\"\"secret field\"\"\"\n  secret: String @auth(groups: [\"root\"]) @deprecated(reason: \"gone\")\n  open: String\n"
        ));

        let printed = print(sdl, &PrintOptions::default());
        assert!(printed.contains("type Query {\n"));
        assert!(printed.contains("  secret: String @deprecated(reason: \"gone\")\n"));
        assert!(!printed.contains("@auth(groups"));
    }

    #[test]
    fn printing_does_not_change_the_schema() {
        let schema = match from_sdl_string(
            "directive @auth on FIELD_DEFINITION type Query { \"described\" a: String @auth }"
        ) {
            Ok(schema) => schema,
            Err(error) => panic!("{}", error)
        };
        let first = print_schema(&schema, &PrintOptions::default());
        let with_directives = print_schema(&schema, &DIRECTIVES);
        let second = print_schema(&schema, &PrintOptions::default());
        assert_eq!(first, second);
        assert!(with_directives.contains("\"\"\"described\"\"\"\n  a: String @auth"));
    }

    #[test]
    fn prints_introspection_schema() {
        let schema = match from_sdl_string("type Query { a: String }") {
            Ok(schema) => schema,
            Err(error) => panic!("{}", error)
        };
        let printed = print_introspection_schema(&schema, &PrintOptions::default());
        assert!(printed.starts_with(
            "\"\"\"\nDirects the executor to skip this field or fragment when the `if` argument is true.\n\"\"\"\ndirective @skip(\n"
        ));
        assert!(printed.contains("directive @deprecated(\n"));
        assert!(printed.contains("type __Schema {\n"));
        assert!(printed.contains("enum __TypeKind {\n  SCALAR\n"));
        assert!(!printed.contains("type Query"));
    }

    #[test]
    fn prints_single_type() {
        let schema = match from_sdl_string("type Query { a: String }") {
            Ok(schema) => schema,
            Err(error) => panic!("{}", error)
        };
        let empty = NamedType::Union(UnionType {
            name: "Nothing".to_string(),
            description: Some("no members".to_string()),
            directives: Vec::new(),
            types: Vec::new()
        });
        assert_eq!(print_type(&schema, &empty, &COMMENTS), "# no members\nunion Nothing");

        let empty = NamedType::Enum(EnumType {
            name: "Empty".to_string(),
            description: None,
            directives: Vec::new(),
            values: Vec::new()
        });
        assert_eq!(print_type(&schema, &empty, &PrintOptions::default()), "enum Empty");

        let query = schema.type_named("Query").map(|it| print_type(&schema, it, &PrintOptions::default()));
        assert_eq!(query.as_deref(), Some("type Query {\n  a: String\n}"));
    }

    #[test]
    fn block_strings() {
        assert_eq!(print_block_string("short", "", false), "\"\"\"short\"\"\"");
        assert_eq!(print_block_string("short", "", true), "\"\"\"\nshort\n\"\"\"");
        assert_eq!(print_block_string("two\nlines", "", false), "\"\"\"\ntwo\nlines\n\"\"\"");
        assert_eq!(print_block_string("  indented", "", true), "\"\"\"  indented\n\"\"\"");
        assert_eq!(print_block_string("ends with \"", "", false), "\"\"\"\nends with \"\n\"\"\"");
        assert_eq!(print_block_string("has \"\"\" quotes", "", false), "\"\"\"has \\\"\"\" quotes\"\"\"");
    }

    #[test]
    fn long_descriptions_use_multi_line_blocks() {
        let text = "a".repeat(71);
        assert_eq!(
            print_description(&PrintOptions::default(), Some(&text), INDENT, false),
            format!("\n  \"\"\"\n  {}\n  \"\"\"\n", text)
        );
        assert_eq!(print_description(&PrintOptions::default(), Some(""), INDENT, false), "");
        assert_eq!(print_description(&PrintOptions::default(), None, "", true), "");
    }

    #[test]
    fn description_length_counts_utf16_units() {
        let text = "\u{1F600}".repeat(36);
        assert_eq!(
            print_description(&PrintOptions::default(), Some(&text), "", true),
            format!("\"\"\"\n{}\n\"\"\"\n", text)
        );
        let text = "\u{e9}".repeat(36);
        assert_eq!(
            print_description(&PrintOptions::default(), Some(&text), "", true),
            format!("\"\"\"{}\"\"\"\n", text)
        );
    }

    #[test]
    fn breaks_long_lines_at_word_boundaries() {
        let word = "abcdefghi";
        let line = vec![word; 30].join(" ");
        let lines = break_line(&line, 120);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines.concat().replace(' ', ""), line.replace(' ', ""));
        for subline in &lines {
            assert!(subline.chars().count() <= 80, "{} is too long", subline);
            assert!(!subline.starts_with(' '));
        }
    }

    #[test]
    fn keeps_lines_without_break_points() {
        let line = "x".repeat(200);
        assert_eq!(break_line(&line, 120), vec![line.clone()]);

        let line = format!("{} {}", "x".repeat(100), "y".repeat(100));
        assert_eq!(break_line(&line, 120), vec![line.clone()]);
    }

    #[test]
    fn comment_descriptions_wrap_long_lines() {
        let line = vec!["word"; 40].join(" ");
        let printed = print_description(&COMMENTS, Some(&line), "", true);
        assert!(printed.lines().count() > 1);
        assert!(printed.lines().all(|it| it.starts_with("# ")));
    }

    #[test]
    fn sorts_names_like_a_locale() {
        let mut names = vec!["Query", "AWSDate", "Address", "author", "Author", "_Hidden", "a1", "ab"];
        names.sort_by(|a, b| locale_compare(a, b));
        assert_eq!(names, vec!["_Hidden", "a1", "ab", "Address", "author", "Author", "AWSDate", "Query"]);
    }
}
