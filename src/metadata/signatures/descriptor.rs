//! Erased field and method descriptors (JVMS 4.3).
//!
//! Every field and method carries a descriptor whether or not it has a generic
//! signature. The types decoded here are the raw fallback the reflective API reports
//! when no usable generic signature exists.

use crate::{
    metadata::typesystem::{PrimitiveKind, TypeNode},
    Error, Expected, Parser, Result,
};

/// Maximum array dimensions allowed by the class file format
const MAX_ARRAY_DIMENSIONS: usize = 255;

/// The erased shape of a method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Erased parameter types in declaration order
    pub parameters: Vec<TypeNode>,
    /// Erased return type, `void` included
    pub return_type: TypeNode,
}

struct DescriptorParser<'a> {
    parser: Parser<'a>,
}

impl<'a> DescriptorParser<'a> {
    fn new(descriptor: &'a str) -> Self {
        DescriptorParser {
            parser: Parser::new(descriptor),
        }
    }

    fn parse_field_type(&mut self) -> Result<TypeNode> {
        let mut dimensions = 0;
        while self.parser.peek_is(b'[') {
            self.parser.advance()?;
            dimensions += 1;
            if dimensions > MAX_ARRAY_DIMENSIONS {
                return Err(syntax_error!(self.parser.pos(), Expected::TypeSignature));
            }
        }

        let start = self.parser.pos();
        let mut node = match self.parser.read_byte(Expected::TypeSignature)? {
            b'L' => {
                let name = self.parser.read_identifier(b";")?;
                self.parser.advance()?;
                TypeNode::raw(&name.replace('/', "."))
            }
            code => match PrimitiveKind::from_code(code) {
                Some(kind) => TypeNode::Primitive(kind),
                None => return Err(syntax_error!(start, Expected::TypeSignature)),
            },
        };

        for _ in 0..dimensions {
            node = TypeNode::Array(Box::new(node));
        }
        Ok(node)
    }

    fn parse_method(&mut self) -> Result<MethodDescriptor> {
        self.parser.expect(b'(', Expected::Char('('))?;

        let mut parameters = Vec::new();
        loop {
            match self.parser.peek_byte() {
                Some(b')') => {
                    self.parser.advance()?;
                    break;
                }
                Some(_) => parameters.push(self.parse_field_type()?),
                None => return Err(syntax_error!(self.parser.pos(), Expected::Char(')'))),
            }
        }

        let return_type = if self.parser.peek_is(b'V') {
            self.parser.advance()?;
            TypeNode::Primitive(PrimitiveKind::Void)
        } else {
            self.parse_field_type()?
        };

        self.parser.finish()?;
        Ok(MethodDescriptor {
            parameters,
            return_type,
        })
    }
}

fn descriptor_error(descriptor: &str, error: Error) -> Error {
    match error {
        Error::SignatureSyntax { offset, .. } => Error::MalformedDescriptor {
            descriptor: descriptor.to_string(),
            offset,
        },
        other => other,
    }
}

/// Parse an erased field descriptor such as `Ljava/lang/Object;` or `[[I`
///
/// ## Arguments
/// * 'descriptor' - The descriptor text
///
/// # Errors
/// Returns [`crate::Error::MalformedDescriptor`] if the descriptor is invalid.
pub fn parse_field_descriptor(descriptor: &str) -> Result<TypeNode> {
    let mut parser = DescriptorParser::new(descriptor);
    parser
        .parse_field_type()
        .and_then(|node| parser.parser.finish().map(|()| node))
        .map_err(|error| descriptor_error(descriptor, error))
}

/// Parse an erased method descriptor such as `(ILjava/lang/String;)V`
///
/// ## Arguments
/// * 'descriptor' - The descriptor text
///
/// # Errors
/// Returns [`crate::Error::MalformedDescriptor`] if the descriptor is invalid.
pub fn parse_method_descriptor(descriptor: &str) -> Result<MethodDescriptor> {
    DescriptorParser::new(descriptor)
        .parse_method()
        .map_err(|error| descriptor_error(descriptor, error))
}
