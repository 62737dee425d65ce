use std::collections::{BTreeMap, BTreeSet};

use graphql_parser::Pos;
use graphql_parser::schema as ast;
use graphql_parser::schema::{parse_schema, Definition, TypeDefinition, TypeExtension};
use tracing::debug;

use crate::error::{ConvertError, Result, SchemaError};
use crate::schema::{
    self, Directive, DirectiveDefinition, DirectiveLocation, EnumType, EnumValue, Field, InputObjectType,
    InputValue, InterfaceType, NamedType, ObjectType, ScalarType, Schema, TypeRef, UnionType, Value,
};

const INTROSPECTION_SDL: &'static str = include_str!("../resources/introspection.graphql");

/// Parses SDL text, builds a schema from its definitions and applies its type extensions.
pub fn from_sdl_string(sdl: &str) -> Result<Schema> {
    let document = parse_schema::<String>(sdl)?;
    let (definitions, extensions) = partition(document);
    debug!(definitions = definitions.len(), extensions = extensions.len(), "parsed schema document");

    let prelude = Prelude::load()?;
    let schema = build_ast_schema(definitions, &prelude)?;
    extend_schema(schema, extensions)
}

/// Splits top level definitions into base definitions and type extensions.
pub fn partition<'a>(
    document: ast::Document<'a, String>
) -> (Vec<Definition<'a, String>>, Vec<TypeExtension<'a, String>>) {
    let mut definitions = Vec::new();
    let mut extensions = Vec::new();
    for definition in document.definitions {
        match definition {
            Definition::TypeExtension(extension) => extensions.push(extension),
            definition => definitions.push(definition)
        }
    }
    (definitions, extensions)
}

/// Specified directives and introspection types every schema carries.
#[derive(Default)]
struct Prelude {
    types: BTreeMap<String, NamedType>,
    directives: Vec<DirectiveDefinition>
}

impl Prelude {
    fn load() -> Result<Prelude> {
        let document = parse_schema::<String>(INTROSPECTION_SDL)?;
        let (definitions, _) = partition(document);
        let schema = build_ast_schema(definitions, &Prelude::default())?;
        let types = schema.types
            .into_iter()
            .filter(|(_, named_type)| named_type.is_introspection_type())
            .collect();
        Ok(Prelude { types, directives: schema.directives })
    }
}

fn build_ast_schema(definitions: Vec<Definition<'_, String>>, prelude: &Prelude) -> Result<Schema> {
    let mut schema_definitions = Vec::new();
    let mut type_definitions = Vec::new();
    let mut directive_definitions = Vec::new();
    for definition in definitions {
        match definition {
            Definition::SchemaDefinition(definition) => schema_definitions.push(definition),
            Definition::TypeDefinition(definition) => type_definitions.push(definition),
            Definition::DirectiveDefinition(definition) => directive_definitions.push(definition),
            // applied by extend_schema
            Definition::TypeExtension(_) => ()
        }
    }

    let mut builder = SchemaBuilder::new();

    if let Some(extra) = schema_definitions.get(1) {
        builder.error("Must provide only one schema definition.", extra.position);
    }

    for name in schema::BUILT_IN_SCALARS.iter().map(|it| it.to_string()).chain(prelude.types.keys().cloned()) {
        builder.known_types.insert(name);
    }
    for definition in &type_definitions {
        let (name, _) = type_definition_header(definition);
        builder.known_types.insert(name.clone());
    }

    for directive in &prelude.directives {
        builder.signatures.insert(directive.name.clone(), DirectiveSignature::from(directive));
    }
    let mut defined_directives: BTreeSet<&str> = BTreeSet::new();
    for definition in &directive_definitions {
        if !defined_directives.insert(definition.name.as_str()) {
            builder.error(
                format!("There can be only one directive named \"{}\".", definition.name),
                definition.position
            );
        }
        builder.signatures.insert(definition.name.clone(), DirectiveSignature::from_ast(definition));
    }

    let mut directives: Vec<DirectiveDefinition> = directive_definitions
        .iter()
        .map(|definition| builder.directive_definition(definition))
        .collect();

    let mut types: BTreeMap<String, NamedType> = BTreeMap::new();
    for definition in &type_definitions {
        let (name, position) = type_definition_header(definition);
        if types.contains_key(name) {
            builder.error(format!("There can be only one type named \"{}\".", name), position);
            continue;
        }
        let named_type = builder.type_definition(definition);
        types.insert(name.clone(), named_type);
    }

    let (query_type, mutation_type, subscription_type) = match schema_definitions.first() {
        Some(definition) => builder.schema_definition(definition),
        None => {
            let root = |name: &str| types.contains_key(name).then(|| name.to_string());
            (root("Query"), root("Mutation"), root("Subscription"))
        }
    };

    builder.finish()?;

    for name in schema::BUILT_IN_SCALARS {
        types.entry(name.to_string()).or_insert_with(|| NamedType::Scalar(ScalarType {
            name: name.to_string(),
            description: None,
            directives: Vec::new()
        }));
    }
    for (name, named_type) in &prelude.types {
        types.entry(name.clone()).or_insert_with(|| named_type.clone());
    }
    for directive in &prelude.directives {
        if !directives.iter().any(|it| it.name == directive.name) {
            directives.push(directive.clone());
        }
    }

    debug!(types = types.len(), directives = directives.len(), "built schema");
    Ok(Schema { query_type, mutation_type, subscription_type, types, directives })
}

/// Applies type extensions to a built schema, appending to the extended types.
pub fn extend_schema(mut schema: Schema, extensions: Vec<TypeExtension<'_, String>>) -> Result<Schema> {
    if extensions.is_empty() {
        return Ok(schema);
    }

    let mut builder = SchemaBuilder::for_schema(&schema);
    for extension in &extensions {
        let (name, position) = type_extension_header(extension);
        match schema.types.get_mut(name) {
            Some(existing) => builder.extend_type(existing, extension),
            None => builder.error(format!("Cannot extend type \"{}\" because it is not defined.", name), position)
        }
    }
    builder.finish()?;

    debug!(extensions = extensions.len(), "applied type extensions");
    Ok(schema)
}

struct DirectiveSignature {
    locations: Vec<DirectiveLocation>,
    arguments: Vec<String>,
    repeatable: bool
}

impl DirectiveSignature {
    fn from_ast(definition: &ast::DirectiveDefinition<'_, String>) -> DirectiveSignature {
        DirectiveSignature {
            locations: definition.locations.clone(),
            arguments: definition.arguments.iter().map(|it| it.name.clone()).collect(),
            repeatable: definition.repeatable
        }
    }
}

impl From<&DirectiveDefinition> for DirectiveSignature {
    fn from(definition: &DirectiveDefinition) -> DirectiveSignature {
        DirectiveSignature {
            locations: definition.locations.clone(),
            arguments: definition.arguments.iter().map(|it| it.name.clone()).collect(),
            repeatable: definition.repeatable
        }
    }
}

/// Converts AST nodes into the schema model, collecting validation errors on the way.
struct SchemaBuilder {
    known_types: BTreeSet<String>,
    signatures: BTreeMap<String, DirectiveSignature>,
    errors: Vec<SchemaError>
}

impl SchemaBuilder {
    fn new() -> SchemaBuilder {
        SchemaBuilder {
            known_types: BTreeSet::new(),
            signatures: BTreeMap::new(),
            errors: Vec::new()
        }
    }

    fn for_schema(schema: &Schema) -> SchemaBuilder {
        let mut builder = SchemaBuilder::new();
        builder.known_types = schema.types.keys().cloned().collect();
        builder.signatures = schema.directives
            .iter()
            .map(|it| (it.name.clone(), DirectiveSignature::from(it)))
            .collect();
        builder
    }

    fn error(&mut self, message: impl Into<String>, position: Pos) {
        self.errors.push(SchemaError::new(message, position));
    }

    fn finish(&mut self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ConvertError::Schema(std::mem::take(&mut self.errors)))
        }
    }

    fn check_type_name(&mut self, name: &str, position: Pos) {
        if !self.known_types.contains(name) {
            self.error(format!("Unknown type \"{}\".", name), position);
        }
    }

    fn schema_definition(
        &mut self,
        definition: &ast::SchemaDefinition<'_, String>
    ) -> (Option<String>, Option<String>, Option<String>) {
        self.directives(&definition.directives, DirectiveLocation::Schema);
        for name in [&definition.query, &definition.mutation, &definition.subscription].into_iter().flatten() {
            self.check_type_name(name, definition.position);
        }
        (definition.query.clone(), definition.mutation.clone(), definition.subscription.clone())
    }

    fn directive_definition(&mut self, definition: &ast::DirectiveDefinition<'_, String>) -> DirectiveDefinition {
        DirectiveDefinition {
            name: definition.name.clone(),
            description: definition.description.clone(),
            arguments: self.arguments(&definition.arguments, definition.position),
            repeatable: definition.repeatable,
            locations: definition.locations.clone()
        }
    }

    fn type_definition(&mut self, definition: &TypeDefinition<'_, String>) -> NamedType {
        match definition {
            TypeDefinition::Scalar(definition) => {
                NamedType::Scalar(ScalarType {
                    name: definition.name.clone(),
                    description: definition.description.clone(),
                    directives: self.directives(&definition.directives, DirectiveLocation::Scalar)
                })
            }
            TypeDefinition::Object(definition) => {
                for interface in &definition.implements_interfaces {
                    self.check_type_name(interface, definition.position);
                }
                NamedType::Object(ObjectType {
                    name: definition.name.clone(),
                    description: definition.description.clone(),
                    interfaces: definition.implements_interfaces.clone(),
                    directives: self.directives(&definition.directives, DirectiveLocation::Object),
                    fields: self.fields(&definition.name, &[], &definition.fields)
                })
            }
            TypeDefinition::Interface(definition) => {
                for interface in &definition.implements_interfaces {
                    self.check_type_name(interface, definition.position);
                }
                NamedType::Interface(InterfaceType {
                    name: definition.name.clone(),
                    description: definition.description.clone(),
                    directives: self.directives(&definition.directives, DirectiveLocation::Interface),
                    fields: self.fields(&definition.name, &[], &definition.fields)
                })
            }
            TypeDefinition::Union(definition) => {
                for member in &definition.types {
                    self.check_type_name(member, definition.position);
                }
                NamedType::Union(UnionType {
                    name: definition.name.clone(),
                    description: definition.description.clone(),
                    directives: self.directives(&definition.directives, DirectiveLocation::Union),
                    types: definition.types.clone()
                })
            }
            TypeDefinition::Enum(definition) => {
                NamedType::Enum(EnumType {
                    name: definition.name.clone(),
                    description: definition.description.clone(),
                    directives: self.directives(&definition.directives, DirectiveLocation::Enum),
                    values: self.enum_values(&definition.name, &[], &definition.values)
                })
            }
            TypeDefinition::InputObject(definition) => {
                NamedType::InputObject(InputObjectType {
                    name: definition.name.clone(),
                    description: definition.description.clone(),
                    directives: self.directives(&definition.directives, DirectiveLocation::InputObject),
                    fields: self.input_fields(&definition.name, &[], &definition.fields)
                })
            }
        }
    }

    fn extend_type(&mut self, existing: &mut NamedType, extension: &TypeExtension<'_, String>) {
        match (existing, extension) {
            (NamedType::Scalar(_), TypeExtension::Scalar(extension)) => {
                self.directives(&extension.directives, DirectiveLocation::Scalar);
            }
            (NamedType::Object(object), TypeExtension::Object(extension)) => {
                for interface in &extension.implements_interfaces {
                    self.check_type_name(interface, extension.position);
                }
                self.directives(&extension.directives, DirectiveLocation::Object);
                let fields = self.fields(&object.name, &object.fields, &extension.fields);
                object.interfaces.extend(extension.implements_interfaces.iter().cloned());
                object.fields.extend(fields);
            }
            (NamedType::Interface(interface), TypeExtension::Interface(extension)) => {
                for name in &extension.implements_interfaces {
                    self.check_type_name(name, extension.position);
                }
                self.directives(&extension.directives, DirectiveLocation::Interface);
                let fields = self.fields(&interface.name, &interface.fields, &extension.fields);
                interface.fields.extend(fields);
            }
            (NamedType::Union(union), TypeExtension::Union(extension)) => {
                for member in &extension.types {
                    self.check_type_name(member, extension.position);
                }
                self.directives(&extension.directives, DirectiveLocation::Union);
                union.types.extend(extension.types.iter().cloned());
            }
            (NamedType::Enum(enum_type), TypeExtension::Enum(extension)) => {
                self.directives(&extension.directives, DirectiveLocation::Enum);
                let values = self.enum_values(&enum_type.name, &enum_type.values, &extension.values);
                enum_type.values.extend(values);
            }
            (NamedType::InputObject(input), TypeExtension::InputObject(extension)) => {
                self.directives(&extension.directives, DirectiveLocation::InputObject);
                let fields = self.input_fields(&input.name, &input.fields, &extension.fields);
                input.fields.extend(fields);
            }
            (_, extension) => {
                let (name, position) = type_extension_header(extension);
                self.error(
                    format!("Cannot extend non-{} type \"{}\".", extension_kind_name(extension), name),
                    position
                );
            }
        }
    }

    fn fields(&mut self, owner: &str, existing: &[Field], fields: &[ast::Field<'_, String>]) -> Vec<Field> {
        let mut converted: Vec<Field> = Vec::new();
        for field in fields {
            if existing.iter().any(|it| it.name == field.name) {
                self.error(
                    format!(
                        "Field \"{}.{}\" already exists in the schema. It cannot also be defined in this type extension.",
                        owner, field.name
                    ),
                    field.position
                );
                continue;
            }
            if converted.iter().any(|it| it.name == field.name) {
                self.error(format!("Field \"{}.{}\" can only be defined once.", owner, field.name), field.position);
                continue;
            }
            let directives = self.directives(&field.directives, DirectiveLocation::FieldDefinition);
            converted.push(Field {
                name: field.name.clone(),
                description: field.description.clone(),
                arguments: self.arguments(&field.arguments, field.position),
                field_type: self.type_ref(&field.field_type, field.position),
                deprecation_reason: deprecation_reason(&directives),
                directives
            });
        }
        converted
    }

    fn input_fields(
        &mut self,
        owner: &str,
        existing: &[InputValue],
        fields: &[ast::InputValue<'_, String>]
    ) -> Vec<InputValue> {
        let mut converted: Vec<InputValue> = Vec::new();
        for field in fields {
            if existing.iter().any(|it| it.name == field.name) {
                self.error(
                    format!(
                        "Field \"{}.{}\" already exists in the schema. It cannot also be defined in this type extension.",
                        owner, field.name
                    ),
                    field.position
                );
                continue;
            }
            if converted.iter().any(|it| it.name == field.name) {
                self.error(format!("Field \"{}.{}\" can only be defined once.", owner, field.name), field.position);
                continue;
            }
            let input_field = self.input_value(field, DirectiveLocation::InputFieldDefinition);
            converted.push(input_field);
        }
        converted
    }

    fn arguments(&mut self, arguments: &[ast::InputValue<'_, String>], position: Pos) -> Vec<InputValue> {
        self.check_unique_arguments(arguments.iter().map(|it| it.name.as_str()), position);
        arguments
            .iter()
            .map(|argument| self.input_value(argument, DirectiveLocation::ArgumentDefinition))
            .collect()
    }

    fn input_value(&mut self, value: &ast::InputValue<'_, String>, location: DirectiveLocation) -> InputValue {
        InputValue {
            name: value.name.clone(),
            description: value.description.clone(),
            value_type: self.type_ref(&value.value_type, value.position),
            default_value: value.default_value.as_ref().map(|it| self.value(it, value.position)),
            directives: self.directives(&value.directives, location)
        }
    }

    fn enum_values(
        &mut self,
        owner: &str,
        existing: &[EnumValue],
        values: &[ast::EnumValue<'_, String>]
    ) -> Vec<EnumValue> {
        let mut converted: Vec<EnumValue> = Vec::new();
        for value in values {
            if existing.iter().any(|it| it.name == value.name) {
                self.error(
                    format!(
                        "Enum value \"{}.{}\" already exists in the schema. It cannot also be defined in this type extension.",
                        owner, value.name
                    ),
                    value.position
                );
                continue;
            }
            if converted.iter().any(|it| it.name == value.name) {
                self.error(format!("Enum value \"{}.{}\" can only be defined once.", owner, value.name), value.position);
                continue;
            }
            let directives = self.directives(&value.directives, DirectiveLocation::EnumValue);
            converted.push(EnumValue {
                name: value.name.clone(),
                description: value.description.clone(),
                deprecation_reason: deprecation_reason(&directives),
                directives
            });
        }
        converted
    }

    fn directives(&mut self, directives: &[ast::Directive<'_, String>], location: DirectiveLocation) -> Vec<Directive> {
        let mut converted: Vec<Directive> = Vec::new();
        for directive in directives {
            let problems: Vec<String> = match self.signatures.get(&directive.name) {
                None => vec![format!("Unknown directive \"{}\".", directive.name)],
                Some(signature) => {
                    let mut problems = Vec::new();
                    if !signature.locations.contains(&location) {
                        problems.push(format!("Directive \"{}\" may not be used on {}.", directive.name, location.as_str()));
                    }
                    if !signature.repeatable && converted.iter().any(|it| it.name == directive.name) {
                        problems.push(format!(
                            "The directive \"{}\" can only be used once at this location.",
                            directive.name
                        ));
                    }
                    for (argument, _) in &directive.arguments {
                        if !signature.arguments.contains(argument) {
                            problems.push(format!("Unknown argument \"{}\" on directive \"@{}\".", argument, directive.name));
                        }
                    }
                    problems
                }
            };
            for problem in problems {
                self.error(problem, directive.position);
            }
            self.check_unique_arguments(directive.arguments.iter().map(|(name, _)| name.as_str()), directive.position);

            let arguments = directive.arguments
                .iter()
                .map(|(name, value)| (name.clone(), self.value(value, directive.position)))
                .collect();
            converted.push(Directive { name: directive.name.clone(), arguments });
        }
        converted
    }

    fn check_unique_arguments<'n>(&mut self, names: impl Iterator<Item = &'n str>, position: Pos) {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut duplicates: Vec<&str> = Vec::new();
        for name in names {
            if !seen.insert(name) && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }
        for name in duplicates {
            self.error(format!("There can be only one argument named \"{}\".", name), position);
        }
    }

    fn type_ref(&mut self, field_type: &ast::Type<'_, String>, position: Pos) -> TypeRef {
        match field_type {
            ast::Type::NamedType(name) => {
                self.check_type_name(name, position);
                TypeRef::Named(name.clone())
            }
            ast::Type::ListType(inner) => TypeRef::List(Box::new(self.type_ref(inner, position))),
            ast::Type::NonNullType(inner) => TypeRef::NonNull(Box::new(self.type_ref(inner, position)))
        }
    }

    fn value(&mut self, value: &ast::Value<'_, String>, position: Pos) -> Value {
        match value {
            ast::Value::Variable(name) => {
                self.error(format!("Unexpected variable \"${}\" in constant value.", name), position);
                Value::Null
            }
            ast::Value::Int(number) => Value::Int(number.as_i64().unwrap_or_default()),
            ast::Value::Float(number) => Value::Float(*number),
            ast::Value::String(text) => Value::String(text.clone()),
            ast::Value::Boolean(flag) => Value::Boolean(*flag),
            ast::Value::Null => Value::Null,
            ast::Value::Enum(name) => Value::Enum(name.clone()),
            ast::Value::List(items) => Value::List(items.iter().map(|it| self.value(it, position)).collect()),
            ast::Value::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), self.value(value, position)))
                    .collect()
            )
        }
    }
}

/// Reason of a `@deprecated` directive; an empty or null reason is not a deprecation.
fn deprecation_reason(directives: &[Directive]) -> Option<String> {
    let directive = directives.iter().find(|it| it.name == "deprecated")?;
    let reason = match directive.argument("reason") {
        None => schema::DEFAULT_DEPRECATION_REASON.to_string(),
        Some(Value::String(reason)) => reason.clone(),
        Some(Value::Null) => return None,
        Some(other) => other.to_string()
    };
    if reason.is_empty() {
        None
    } else {
        Some(reason)
    }
}

fn type_definition_header<'d>(definition: &'d TypeDefinition<'_, String>) -> (&'d String, Pos) {
    match definition {
        TypeDefinition::Scalar(it) => (&it.name, it.position),
        TypeDefinition::Object(it) => (&it.name, it.position),
        TypeDefinition::Interface(it) => (&it.name, it.position),
        TypeDefinition::Union(it) => (&it.name, it.position),
        TypeDefinition::Enum(it) => (&it.name, it.position),
        TypeDefinition::InputObject(it) => (&it.name, it.position)
    }
}

fn type_extension_header<'d>(extension: &'d TypeExtension<'_, String>) -> (&'d String, Pos) {
    match extension {
        TypeExtension::Scalar(it) => (&it.name, it.position),
        TypeExtension::Object(it) => (&it.name, it.position),
        TypeExtension::Interface(it) => (&it.name, it.position),
        TypeExtension::Union(it) => (&it.name, it.position),
        TypeExtension::Enum(it) => (&it.name, it.position),
        TypeExtension::InputObject(it) => (&it.name, it.position)
    }
}

fn extension_kind_name(extension: &TypeExtension<'_, String>) -> &'static str {
    match extension {
        TypeExtension::Scalar(_) => "scalar",
        TypeExtension::Object(_) => "object",
        TypeExtension::Interface(_) => "interface",
        TypeExtension::Union(_) => "union",
        TypeExtension::Enum(_) => "enum",
        TypeExtension::InputObject(_) => "input object"
    }
}
