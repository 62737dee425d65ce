use std::collections::BTreeMap;
use std::fmt;

pub use graphql_parser::schema::DirectiveLocation;

pub const BUILT_IN_SCALARS: &'static [&'static str] = &[ "String", "Int", "Float", "Boolean", "ID" ];
pub const BUILT_IN_DIRECTIVES: &'static [&'static str] = &[ "skip", "include", "deprecated" ];
pub const DEFAULT_DEPRECATION_REASON: &'static str = "No longer supported";

pub struct Schema {
    pub query_type: Option<String>,
    pub mutation_type: Option<String>,
    pub subscription_type: Option<String>,
    pub types: BTreeMap<String, NamedType>,
    pub directives: Vec<DirectiveDefinition>
}

impl Schema {
    pub fn type_named(&self, name: &str) -> Option<&NamedType> {
        self.types.get(name)
    }
}

#[derive(Clone, Debug)]
pub enum NamedType {
    Scalar(ScalarType),
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType)
}

impl NamedType {
    pub fn name(&self) -> &str {
        match self {
            NamedType::Scalar(it) => &it.name,
            NamedType::Object(it) => &it.name,
            NamedType::Interface(it) => &it.name,
            NamedType::Union(it) => &it.name,
            NamedType::Enum(it) => &it.name,
            NamedType::InputObject(it) => &it.name
        }
    }

    pub fn is_built_in_scalar(&self) -> bool {
        matches!(self, NamedType::Scalar(_)) && BUILT_IN_SCALARS.contains(&self.name())
    }

    pub fn is_introspection_type(&self) -> bool {
        self.name().starts_with("__")
    }
}

#[derive(Clone, Debug)]
pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>
}

#[derive(Clone, Debug)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    pub interfaces: Vec<String>,
    pub directives: Vec<Directive>,
    pub fields: Vec<Field>
}

#[derive(Clone, Debug)]
pub struct InterfaceType {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub fields: Vec<Field>
}

#[derive(Clone, Debug)]
pub struct UnionType {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub types: Vec<String>
}

#[derive(Clone, Debug)]
pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub values: Vec<EnumValue>
}

#[derive(Clone, Debug)]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub fields: Vec<InputValue>
}

#[derive(Clone, Debug)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<InputValue>,
    pub field_type: TypeRef,
    pub directives: Vec<Directive>,
    /// Set only for deprecated fields, never empty.
    pub deprecation_reason: Option<String>
}

#[derive(Clone, Debug)]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    pub value_type: TypeRef,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>
}

#[derive(Clone, Debug)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub deprecation_reason: Option<String>
}

#[derive(Clone, Debug)]
pub struct DirectiveDefinition {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<InputValue>,
    pub repeatable: bool,
    pub locations: Vec<DirectiveLocation>
}

impl DirectiveDefinition {
    pub fn is_built_in(&self) -> bool {
        BUILT_IN_DIRECTIVES.contains(&self.name.as_str())
    }
}

/// A directive applied to a type, field, argument or enum value.
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<(String, Value)>
}

impl Directive {
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.iter().find(|(arg, _)| arg == name).map(|(_, value)| value)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("(")?;
            for (i, (name, value)) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}: {}", name, value)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>)
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::List(inner) => write!(f, "[{}]", inner),
            TypeRef::NonNull(inner) => write!(f, "{}!", inner)
        }
    }
}

/// Constant GraphQL literal.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Enum(String),
    List(Vec<Value>),
    Object(Vec<(String, Value)>)
}

impl Value {
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(fields) => fields.iter().find(|(key, _)| key == name).map(|(_, value)| value),
            _ => None
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => f.write_str(&format_float(*n)),
            Value::String(s) => f.write_str(&quote_string(s)),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Enum(name) => f.write_str(name),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Object(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Quotes a string literal with JSON escaping.
pub fn quote_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
}

/// Integral floats print without a fraction, like a JavaScript number.
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
