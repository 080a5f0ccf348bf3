//! Resolved types → schema types

use crate::context::LoweringContext;
use crate::error::LowerError;
use sl_schema::Type;
use sl_span::Span;
use sl_syntax::ResolvedType;

/// Symbol name that lowers to [`Type::Array`]
pub const ARRAY_TYPE_NAME: &str = "Array";

/// Lower a resolved type
///
/// `span` locates the declaration the type belongs to and is used when a
/// class name has to be reported.
pub fn lower_type(ctx: &mut LoweringContext<'_>, ty: &ResolvedType, span: Span) -> Type {
    match ty.canonical_name() {
        "number" => Type::Int32,
        "string" => Type::String,
        "boolean" => Type::Boolean,
        "void" => Type::Void,
        ARRAY_TYPE_NAME => Type::Array {
            type_arguments: lower_type_arguments(ctx, ty, span),
        },
        name => {
            let class_name = ctx.normalize(name, span);
            Type::Class {
                class_name,
                type_arguments: lower_type_arguments(ctx, ty, span),
            }
        }
    }
}

fn lower_type_arguments(ctx: &mut LoweringContext<'_>, ty: &ResolvedType, span: Span) -> Vec<Type> {
    ty.type_arguments
        .iter()
        .map(|argument| lower_type(ctx, argument, span))
        .collect()
}

/// Lower the type of a declaration that must carry one
///
/// # Errors
///
/// Returns [`LowerError::MissingType`] when the front end attached no type.
pub fn lower_declared_type(
    ctx: &mut LoweringContext<'_>,
    ty: Option<&ResolvedType>,
    owner: impl FnOnce() -> String,
    span: Span,
) -> Result<Type, LowerError> {
    let Some(ty) = ty else {
        return Err(LowerError::MissingType {
            owner: owner(),
            span: ctx.file_span(span),
        });
    };
    Ok(lower_type(ctx, ty, span))
}
