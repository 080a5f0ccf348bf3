//! Building the schema of a whole file

use crate::context::LoweringContext;
use crate::diagnostics::{DiagnosticKind, DiagnosticSink};
use crate::error::LowerError;
use crate::stmt::lower_statements;
use crate::types::lower_declared_type;
use sl_schema::{Block, Class, Constructor, Enum, EnumValue, Field, Method, Parameter, SchemaFile, Visibility};
use sl_span::Span;
use sl_syntax::{
    self as syntax, ClassDecl, ClassMember, ConstructorDecl, EnumDecl, Item, MethodDecl, ParamDecl, PropertyDecl,
    SourceFile,
};

/// Lower every enum and class of `file` into a [`SchemaFile`]
///
/// Recoverable problems go to `sink`. Items other than enums and classes are
/// skipped, as are static members and accessors.
///
/// # Errors
///
/// Returns a [`LowerError`] when the tree is not fully resolved. Lowering
/// stops at the first such error.
#[tracing::instrument(level = "debug", skip_all, fields(path = %file.path))]
pub fn build_schema(file: &SourceFile, sink: &mut dyn DiagnosticSink) -> Result<SchemaFile, LowerError> {
    let mut ctx = LoweringContext::new(file, sink);
    let mut schema = SchemaFile::default();

    for item in &file.items {
        match item {
            Item::Enum(decl) => {
                let (name, lowered) = lower_enum(&mut ctx, decl);
                schema.enums.insert(name, lowered);
            }
            Item::Class(decl) => {
                let (name, lowered) = lower_class(&mut ctx, decl)?;
                schema.classes.insert(name, lowered);
            }
            Item::Other { construct, .. } => {
                tracing::trace!(construct, "skipping top-level item");
            }
        }
    }

    tracing::debug!(
        enums = schema.enums.len(),
        classes = schema.classes.len(),
        "built schema"
    );
    Ok(schema)
}

fn lower_enum(ctx: &mut LoweringContext<'_>, decl: &EnumDecl) -> (String, Enum) {
    let name = ctx.normalize(&decl.name.text, decl.name.span);
    let values = decl
        .members
        .iter()
        .map(|member| EnumValue {
            name: ctx.normalize(&member.name.text, member.name.span),
        })
        .collect();
    (name, Enum { values })
}

fn lower_class(ctx: &mut LoweringContext<'_>, decl: &ClassDecl) -> Result<(String, Class), LowerError> {
    let class_name = ctx.normalize(&decl.name.text, decl.name.span);
    let mut class = Class::default();

    for member in &decl.members {
        match member {
            ClassMember::Property(property) if !property.modifiers.is_static => {
                let (name, field) = lower_property(ctx, &class_name, property)?;
                class.fields.insert(name, field);
            }
            ClassMember::Method(method) if !method.modifiers.is_static => {
                let (name, lowered) = lower_method(ctx, &class_name, method)?;
                class.methods.insert(name, lowered);
            }
            ClassMember::Constructor(constructor) => {
                if class.constructor.is_some() {
                    ctx.report(
                        DiagnosticKind::MultipleConstructors,
                        format!("Multiple constructors in class `{}`; only the first is kept", decl.name.text),
                        constructor.span,
                    );
                    continue;
                }
                for parameter in constructor.parameters.iter().filter(|parameter| parameter.is_promoted()) {
                    let (name, field) = lower_promoted_parameter(ctx, &class_name, parameter)?;
                    class.fields.insert(name, field);
                }
                class.constructor = Some(lower_constructor(ctx, &class_name, constructor)?);
            }
            ClassMember::Property(_) | ClassMember::Method(_) | ClassMember::Other { .. } => {}
        }
    }

    tracing::trace!(
        class = %class_name,
        fields = class.fields.len(),
        methods = class.methods.len(),
        "lowered class"
    );
    Ok((class_name, class))
}

fn lower_property(
    ctx: &mut LoweringContext<'_>,
    class_name: &str,
    property: &PropertyDecl,
) -> Result<(String, Field), LowerError> {
    let name = ctx.normalize(&property.name.text, property.name.span);
    let ty = lower_declared_type(
        ctx,
        property.ty.as_ref(),
        || format!("field `{class_name}.{name}`"),
        property.span,
    )?;
    let default_value = match &property.initializer {
        Some(initializer) => Some(ctx.source_text(initializer.span)?),
        None => None,
    };

    Ok((
        name,
        Field {
            ty,
            visibility: lower_visibility(property.modifiers.visibility),
            default_value,
        },
    ))
}

fn lower_promoted_parameter(
    ctx: &mut LoweringContext<'_>,
    class_name: &str,
    parameter: &ParamDecl,
) -> Result<(String, Field), LowerError> {
    let Parameter { name, ty } = lower_parameter(ctx, class_name, parameter)?;
    Ok((
        name,
        Field {
            ty,
            visibility: lower_visibility(parameter.modifiers.visibility),
            default_value: None,
        },
    ))
}

fn lower_method(
    ctx: &mut LoweringContext<'_>,
    class_name: &str,
    method: &MethodDecl,
) -> Result<(String, Method), LowerError> {
    let name = ctx.normalize(&method.name.text, method.name.span);
    let owner = format!("method `{class_name}.{name}`");

    let returns = lower_declared_type(
        ctx,
        method.return_type.as_ref(),
        || format!("return type of {owner}"),
        method.span,
    )?;
    let parameters = lower_parameters(ctx, class_name, &method.parameters)?;
    let body = lower_body(ctx, method.body.as_ref(), owner, method.span)?;

    Ok((
        name,
        Method {
            parameters,
            returns,
            body,
        },
    ))
}

fn lower_constructor(
    ctx: &mut LoweringContext<'_>,
    class_name: &str,
    constructor: &ConstructorDecl,
) -> Result<Constructor, LowerError> {
    let parameters = lower_parameters(ctx, class_name, &constructor.parameters)?;
    let body = lower_body(
        ctx,
        constructor.body.as_ref(),
        format!("constructor of `{class_name}`"),
        constructor.span,
    )?;
    Ok(Constructor { parameters, body })
}

fn lower_parameters(
    ctx: &mut LoweringContext<'_>,
    class_name: &str,
    parameters: &[ParamDecl],
) -> Result<Vec<Parameter>, LowerError> {
    parameters
        .iter()
        .map(|parameter| lower_parameter(ctx, class_name, parameter))
        .collect()
}

fn lower_parameter(
    ctx: &mut LoweringContext<'_>,
    class_name: &str,
    parameter: &ParamDecl,
) -> Result<Parameter, LowerError> {
    let name = ctx.normalize(&parameter.name.text, parameter.name.span);
    let ty = lower_declared_type(
        ctx,
        parameter.ty.as_ref(),
        || format!("parameter `{name}` in `{class_name}`"),
        parameter.span,
    )?;
    Ok(Parameter { name, ty })
}

fn lower_body(
    ctx: &mut LoweringContext<'_>,
    body: Option<&syntax::Block>,
    owner: String,
    span: Span,
) -> Result<Block, LowerError> {
    let Some(body) = body else {
        return Err(LowerError::MissingBody {
            owner,
            span: ctx.file_span(span),
        });
    };
    lower_statements(ctx, body)
}

/// Unspecified accessibility is private
const fn lower_visibility(visibility: Option<syntax::Visibility>) -> Visibility {
    match visibility {
        Some(syntax::Visibility::Public) => Visibility::Public,
        Some(syntax::Visibility::Protected) => Visibility::Protected,
        Some(syntax::Visibility::Private) | None => Visibility::Private,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::test_support::{ident, stmt};
    use pretty_assertions::assert_eq;
    use sl_schema::{Expression, Statement, Type};
    use sl_span::{FileId, Span};
    use sl_syntax::{EnumMemberDecl, Expr, ExprKind, Ident, Modifiers, ResolvedType, StmtKind};

    fn class_item(name: &str, members: Vec<ClassMember>) -> Item {
        Item::Class(ClassDecl {
            name: Ident::new(name, Span::default()),
            members,
            span: Span::default(),
        })
    }

    fn visibility(visibility: syntax::Visibility) -> Modifiers {
        Modifiers {
            visibility: Some(visibility),
            ..Modifiers::default()
        }
    }

    fn property(name: &str, ty: &str, modifiers: Modifiers) -> PropertyDecl {
        PropertyDecl {
            name: Ident::new(name, Span::default()),
            ty: Some(ResolvedType::intrinsic(ty)),
            modifiers,
            initializer: None,
            span: Span::default(),
        }
    }

    fn parameter(name: &str, ty: &str, modifiers: Modifiers) -> ParamDecl {
        ParamDecl {
            name: Ident::new(name, Span::default()),
            ty: Some(ResolvedType::intrinsic(ty)),
            modifiers,
            span: Span::default(),
        }
    }

    fn constructor(parameters: Vec<ParamDecl>) -> ClassMember {
        ClassMember::Constructor(ConstructorDecl {
            parameters,
            body: Some(syntax::Block::default()),
            span: Span::default(),
        })
    }

    fn build(file: &SourceFile) -> (Result<SchemaFile, LowerError>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let schema = build_schema(file, &mut diagnostics);
        (schema, diagnostics)
    }

    #[test]
    fn test_enum_members_in_order() {
        let mut file = SourceFile::new(FileId(0), "color.ts", "");
        file.items.push(Item::Enum(EnumDecl {
            name: Ident::new("TrafficLight", Span::default()),
            members: ["Red", "Amber", "Green"]
                .into_iter()
                .map(|name| EnumMemberDecl {
                    name: Ident::new(name, Span::default()),
                    initializer: None,
                })
                .collect(),
            span: Span::default(),
        }));

        let (schema, diagnostics) = build(&file);
        let schema = schema.unwrap();
        assert!(diagnostics.is_empty());

        let names: Vec<_> = schema.enums["traffic_light"]
            .values
            .iter()
            .map(|value| value.name.as_str())
            .collect();
        assert_eq!(names, ["red", "amber", "green"]);
    }

    #[test]
    fn test_property_default_value_is_source_text() {
        let text = "class Counter { count: number = 5; }";
        let mut file = SourceFile::new(FileId(0), "counter.ts", text);
        let five = text.find('5').unwrap() as u32;

        let mut count = property("count", "number", Modifiers::default());
        count.initializer = Some(Expr::new(
            ExprKind::NumericLiteral { text: "5".to_string() },
            Span::new(five, five + 1),
        ));
        file.items.push(class_item("Counter", vec![ClassMember::Property(count)]));

        let (schema, _) = build(&file);
        let schema = schema.unwrap();
        let field = &schema.classes["counter"].fields["count"];
        assert_eq!(field.ty, Type::Int32);
        assert_eq!(field.visibility, Visibility::Private);
        assert_eq!(field.default_value.as_deref(), Some("5"));
    }

    #[test]
    fn test_initializer_span_out_of_range_is_fatal() {
        let mut file = SourceFile::new(FileId(0), "short.ts", "class A {}");
        let mut broken = property("value", "number", Modifiers::default());
        broken.initializer = Some(Expr::new(ExprKind::NullLiteral, Span::new(40, 44)));
        file.items.push(class_item("A", vec![ClassMember::Property(broken)]));

        let (schema, _) = build(&file);
        assert!(matches!(schema, Err(LowerError::SpanOutOfBounds { .. })));
    }

    #[test]
    fn test_promoted_parameters_and_static_members() {
        let mut file = SourceFile::new(FileId(0), "point.ts", "");
        let mut shared = property("Origin", "number", Modifiers::default());
        shared.modifiers.is_static = true;
        let readonly = Modifiers {
            readonly: true,
            ..Modifiers::default()
        };

        file.items.push(class_item(
            "Point",
            vec![
                ClassMember::Property(shared),
                ClassMember::Property(property("label", "string", visibility(syntax::Visibility::Public))),
                constructor(vec![
                    parameter("x", "number", visibility(syntax::Visibility::Protected)),
                    parameter("y", "number", readonly),
                    parameter("scale", "number", Modifiers::default()),
                ]),
                ClassMember::Other {
                    construct: "get_accessor".to_string(),
                    span: Span::default(),
                },
            ],
        ));

        let (schema, diagnostics) = build(&file);
        let schema = schema.unwrap();
        assert!(diagnostics.is_empty());

        let point = &schema.classes["point"];
        let fields: Vec<_> = point
            .fields
            .iter()
            .map(|(name, field)| (name.as_str(), field.visibility))
            .collect();
        assert_eq!(
            fields,
            [
                ("label", Visibility::Public),
                ("x", Visibility::Protected),
                ("y", Visibility::Private),
            ]
        );

        let constructor = point.constructor.as_ref().unwrap();
        assert_eq!(constructor.parameters.len(), 3);
        assert_eq!(constructor.parameters[2].name, "scale");
    }

    #[test]
    fn test_second_constructor_is_reported_and_ignored() {
        let mut file = SourceFile::new(FileId(0), "twice.ts", "");
        file.items.push(class_item(
            "Twice",
            vec![
                constructor(vec![parameter("first", "number", Modifiers::default())]),
                constructor(vec![parameter("second", "string", visibility(syntax::Visibility::Public))]),
            ],
        ));

        let (schema, diagnostics) = build(&file);
        let schema = schema.unwrap();
        assert_eq!(diagnostics.count(DiagnosticKind::MultipleConstructors), 1);

        let twice = &schema.classes["twice"];
        assert!(twice.fields.is_empty());
        assert_eq!(twice.constructor.as_ref().unwrap().parameters[0].name, "first");
    }

    #[test]
    fn test_method_body_and_signature() {
        let mut file = SourceFile::new(FileId(0), "greeter.ts", "");
        let body = syntax::Block::new(vec![stmt(StmtKind::Return {
            expression: Some(ident("greeting")),
        })]);
        file.items.push(class_item(
            "Greeter",
            vec![ClassMember::Method(MethodDecl {
                name: Ident::new("sayHello", Span::default()),
                parameters: vec![parameter("loud", "boolean", Modifiers::default())],
                return_type: Some(ResolvedType::intrinsic("string")),
                modifiers: Modifiers::default(),
                body: Some(body),
                span: Span::default(),
            })],
        ));

        let (schema, _) = build(&file);
        let schema = schema.unwrap();
        let method = &schema.classes["greeter"].methods["say_hello"];
        assert_eq!(method.returns, Type::String);
        assert_eq!(
            method.parameters,
            [Parameter {
                name: "loud".to_string(),
                ty: Type::Boolean,
            }]
        );
        assert_eq!(
            method.body.statements,
            [Statement::Return {
                expression: Some(Expression::identifier("greeting")),
            }]
        );
    }

    #[test]
    fn test_method_without_body_is_fatal() {
        let mut file = SourceFile::new(FileId(0), "shape.ts", "");
        file.items.push(class_item(
            "Shape",
            vec![ClassMember::Method(MethodDecl {
                name: Ident::new("area", Span::default()),
                parameters: vec![],
                return_type: Some(ResolvedType::intrinsic("number")),
                modifiers: Modifiers::default(),
                body: None,
                span: Span::new(10, 20),
            })],
        ));

        let (schema, _) = build(&file);
        let Err(LowerError::MissingBody { owner, .. }) = schema else {
            panic!("expected missing body error");
        };
        assert_eq!(owner, "method `shape.area`");
    }

    #[test]
    fn test_other_items_are_skipped() {
        let mut file = SourceFile::new(FileId(0), "misc.ts", "");
        file.items.push(Item::Other {
            construct: "function_declaration".to_string(),
            span: Span::default(),
        });
        let (schema, diagnostics) = build(&file);
        assert_eq!(schema.unwrap(), SchemaFile::default());
        assert!(diagnostics.is_empty());
    }
}
