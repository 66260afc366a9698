//! Canonical string forms of resolved types.
//!
//! The output matches the formatting of the reflective Java API: type names the way
//! `Type::getTypeName` prints them, type-parameter declarations the way
//! `Method::toGenericString` prints them, and bare class objects the way
//! `Class::toString` prints them.

use std::fmt::{self, Write};

use crate::metadata::typesystem::{
    ClassType, TypeNode, TypeParameterDeclaration, WildcardKind, WildcardType,
};

/// Render a type node in type-name form, e.g. `java.util.Map<K, V>` or `int[]`
///
/// ## Arguments
/// * 'node' - The node to render
#[must_use]
pub fn render(node: &TypeNode) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_node(&mut out, node);
    out
}

/// Render a type parameter declaration: `T`, or `T extends A & B`.
///
/// A lone `java.lang.Object` bound is implicit and not printed.
///
/// ## Arguments
/// * 'param' - The declaration to render
#[must_use]
pub fn render_generic(param: &TypeParameterDeclaration) -> String {
    let implicit = param.bounds.len() == 1 && param.bounds[0] == TypeNode::object();
    if param.bounds.is_empty() || implicit {
        return param.name.clone();
    }

    let bounds = param.bounds.iter().map(render).collect::<Vec<_>>();
    format!("{} extends {}", param.name, bounds.join(" & "))
}

/// Render a list in bracketed form, e.g. `[a, b]`
///
/// ## Arguments
/// * 'items' - The rendered elements
#[must_use]
pub fn render_list<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let mut out = String::from("[");
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        // writing into a String cannot fail
        let _ = write!(out, "{item}");
    }
    out.push(']');
    out
}

/// Render a node the way a reflective `Type` prints when it appears on its own.
///
/// Erased types are class objects and carry a `class ` or `interface ` prefix;
/// parameterized types, type variables, wildcards and generic arrays print their
/// type name. Erased arrays print their descriptor-style binary name.
///
/// ## Arguments
/// * 'node'         - The node to render
/// * 'is_interface' - Tells whether a binary class name denotes an interface
#[must_use]
pub fn render_class_object<F>(node: &TypeNode, is_interface: F) -> String
where
    F: Fn(&str) -> bool,
{
    match node {
        TypeNode::Primitive(kind) => kind.keyword().to_string(),
        TypeNode::Class(class) if class.args.is_empty() => {
            if is_interface(&class.name) {
                format!("interface {}", class.name)
            } else {
                format!("class {}", class.name)
            }
        }
        TypeNode::Array(_) if is_erased_array(node) => {
            let mut name = String::new();
            write_array_name(&mut name, node);
            format!("class {name}")
        }
        _ => render(node),
    }
}

fn is_erased_array(node: &TypeNode) -> bool {
    match node {
        TypeNode::Array(component) => is_erased_array(component),
        TypeNode::Primitive(_) => true,
        TypeNode::Class(class) => class.args.is_empty(),
        TypeNode::Variable(_) | TypeNode::Wildcard(_) | TypeNode::ParameterizedOuter { .. } => {
            false
        }
    }
}

fn write_array_name(out: &mut String, node: &TypeNode) {
    match node {
        TypeNode::Array(component) => {
            out.push('[');
            match component.as_ref() {
                TypeNode::Primitive(kind) => out.push(kind.code()),
                TypeNode::Class(class) => {
                    out.push('L');
                    out.push_str(&class.name);
                    out.push(';');
                }
                nested => write_array_name(out, nested),
            }
        }
        other => out.push_str(&render(other)),
    }
}

fn write_args<W: Write>(out: &mut W, args: &[TypeNode]) -> fmt::Result {
    if args.is_empty() {
        return Ok(());
    }

    out.write_char('<')?;
    for (index, arg) in args.iter().enumerate() {
        if index > 0 {
            out.write_str(", ")?;
        }
        write_node(out, arg)?;
    }
    out.write_char('>')
}

fn write_class<W: Write>(out: &mut W, class: &ClassType) -> fmt::Result {
    out.write_str(&class.name)?;
    write_args(out, &class.args)
}

fn write_wildcard<W: Write>(out: &mut W, wildcard: &WildcardType) -> fmt::Result {
    out.write_char('?')?;
    let Some(bound) = &wildcard.bound else {
        return Ok(());
    };

    match wildcard.kind {
        WildcardKind::Unbounded => Ok(()),
        WildcardKind::Extends => {
            // `? extends Object` is the unbounded wildcard
            if **bound == TypeNode::object() {
                return Ok(());
            }
            out.write_str(" extends ")?;
            write_node(out, bound)
        }
        WildcardKind::Super => {
            out.write_str(" super ")?;
            write_node(out, bound)
        }
    }
}

fn write_node<W: Write>(out: &mut W, node: &TypeNode) -> fmt::Result {
    match node {
        TypeNode::Primitive(kind) => out.write_str(kind.keyword()),
        TypeNode::Class(class) => write_class(out, class),
        TypeNode::Variable(variable) => out.write_str(&variable.name),
        TypeNode::Array(component) => {
            write_node(out, component)?;
            out.write_str("[]")
        }
        TypeNode::Wildcard(wildcard) => write_wildcard(out, wildcard),
        TypeNode::ParameterizedOuter { outer, inner } => {
            write_node(out, outer)?;
            out.write_char('$')?;
            out.write_str(inner.simple_name())?;
            write_args(out, &inner.args)
        }
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self)
    }
}

impl fmt::Display for TypeParameterDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_generic(self))
    }
}
