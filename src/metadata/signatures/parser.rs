use crate::{
    metadata::{
        signatures::{
            ClassTypeSignature, SignatureClass, SignatureField, SignatureMethod,
            SignatureTypeParameter, SimpleClassTypeSignature, TypeArgument, TypeSignature,
        },
        typesystem::PrimitiveKind,
    },
    Error::RecursionLimit,
    Expected, Parser, Result,
};

/// Maximum nesting depth for signature parsing
pub const MAX_RECURSION_DEPTH: usize = 64;

/// Ends the package-qualified name of the outermost class in `L...;`
const CLASS_NAME_DELIMITERS: &[u8] = b"<.;[:>";
/// Ends inner class names, type variable names and type parameter names
const IDENTIFIER_DELIMITERS: &[u8] = b"<.;[:>/";

/// Recursive-descent parser for the generic signature grammar (JVMS 4.7.9.1)
///
/// # Example
///
/// ```rust
/// use sigscope::metadata::signatures::SignatureParser;
/// let mut parser = SignatureParser::new("(TV;)TV;");
/// let sig = parser.parse_method_signature().unwrap();
/// assert_eq!(sig.params.len(), 1);
/// ```
///
/// ## Notes:
/// - One byte of lookahead is enough for every production.
/// - Do not re-use a parser instance for multiple signatures, use the wrapper
///   functions in [`crate::metadata::signatures`] instead.
pub struct SignatureParser<'a> {
    parser: Parser<'a>,
    depth: usize,
    max_depth: usize,
}

impl<'a> SignatureParser<'a> {
    /// Create a new `SignatureParser` over a raw signature string
    ///
    /// ## Arguments
    /// * 'data' - The signature attribute text
    #[must_use]
    pub fn new(data: &'a str) -> Self {
        SignatureParser {
            parser: Parser::new(data),
            depth: 0,
            max_depth: MAX_RECURSION_DEPTH,
        }
    }

    /// Override the nesting limit
    ///
    /// ## Arguments
    /// * 'max_depth' - Maximum nesting of arrays and type arguments
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(RecursionLimit(self.max_depth));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Parse any type signature, primitives included
    fn parse_type(&mut self, expected: Expected) -> Result<TypeSignature> {
        match self.parser.peek_byte() {
            Some(code) => match PrimitiveKind::from_code(code) {
                Some(kind) => {
                    self.parser.advance()?;
                    Ok(TypeSignature::Base(kind))
                }
                None => self.parse_reference_type(expected),
            },
            None => Err(syntax_error!(self.parser.pos(), expected)),
        }
    }

    /// Parse a class, type variable or array signature
    fn parse_reference_type(&mut self, expected: Expected) -> Result<TypeSignature> {
        self.enter()?;
        let result = match self.parser.peek_byte() {
            Some(b'L') => self.parse_class_type().map(TypeSignature::Class),
            Some(b'T') => self.parse_type_variable(),
            Some(b'[') => {
                self.parser.advance()?;
                self.parse_type(Expected::TypeSignature)
                    .map(|component| TypeSignature::Array(Box::new(component)))
            }
            _ => Err(syntax_error!(self.parser.pos(), expected)),
        };
        self.leave();
        result
    }

    /// `T` Identifier `;`
    fn parse_type_variable(&mut self) -> Result<TypeSignature> {
        self.parser.expect(b'T', Expected::ReferenceType)?;
        let name = self.parser.read_identifier(IDENTIFIER_DELIMITERS)?;
        self.parser.expect(b';', Expected::Char(';'))?;
        Ok(TypeSignature::TypeVariable(name.to_string()))
    }

    /// `L` pkg/Name [TypeArguments] (`.` Name [TypeArguments])* `;`
    fn parse_class_type(&mut self) -> Result<ClassTypeSignature> {
        self.parser.expect(b'L', Expected::ClassType)?;

        let start = self.parser.pos();
        let name = self.parser.read_identifier(CLASS_NAME_DELIMITERS)?;
        if name.split('/').any(str::is_empty) {
            return Err(syntax_error!(start, Expected::Identifier));
        }

        let mut segments = vec![SimpleClassTypeSignature {
            name: name.to_string(),
            args: self.parse_type_arguments()?,
        }];

        while self.parser.peek_is(b'.') {
            self.parser.advance()?;
            let inner = self.parser.read_identifier(IDENTIFIER_DELIMITERS)?;
            segments.push(SimpleClassTypeSignature {
                name: inner.to_string(),
                args: self.parse_type_arguments()?,
            });
        }

        self.parser.expect(b';', Expected::Char(';'))?;
        Ok(ClassTypeSignature { segments })
    }

    /// Optional `<` TypeArgument+ `>`
    fn parse_type_arguments(&mut self) -> Result<Vec<TypeArgument>> {
        if !self.parser.peek_is(b'<') {
            return Ok(Vec::new());
        }
        self.parser.advance()?;

        let mut args = Vec::new();
        loop {
            args.push(self.parse_type_argument()?);
            if self.parser.peek_is(b'>') {
                self.parser.advance()?;
                break;
            }
        }

        Ok(args)
    }

    fn parse_type_argument(&mut self) -> Result<TypeArgument> {
        match self.parser.peek_byte() {
            Some(b'*') => {
                self.parser.advance()?;
                Ok(TypeArgument::Unbounded)
            }
            Some(b'+') => {
                self.parser.advance()?;
                Ok(TypeArgument::Extends(
                    self.parse_reference_type(Expected::ReferenceType)?,
                ))
            }
            Some(b'-') => {
                self.parser.advance()?;
                Ok(TypeArgument::Super(
                    self.parse_reference_type(Expected::ReferenceType)?,
                ))
            }
            _ => Ok(TypeArgument::Exact(
                self.parse_reference_type(Expected::TypeArgument)?,
            )),
        }
    }

    /// Optional `<` TypeParameter+ `>`
    fn parse_type_parameters(&mut self) -> Result<Vec<SignatureTypeParameter>> {
        if !self.parser.peek_is(b'<') {
            return Ok(Vec::new());
        }
        self.parser.advance()?;

        let mut params = Vec::new();
        loop {
            params.push(self.parse_type_parameter()?);
            if self.parser.peek_is(b'>') {
                self.parser.advance()?;
                break;
            }
        }

        Ok(params)
    }

    /// Identifier `:` [ClassBound] (`:` InterfaceBound)*
    fn parse_type_parameter(&mut self) -> Result<SignatureTypeParameter> {
        let name = self.parser.read_identifier(IDENTIFIER_DELIMITERS)?.to_string();
        self.parser.expect(b':', Expected::Char(':'))?;

        let class_bound = match self.parser.peek_byte() {
            Some(b'L' | b'T' | b'[') => Some(self.parse_reference_type(Expected::ReferenceType)?),
            _ => None,
        };

        let mut interface_bounds = Vec::new();
        while self.parser.peek_is(b':') {
            self.parser.advance()?;
            interface_bounds.push(self.parse_reference_type(Expected::ReferenceType)?);
        }

        Ok(SignatureTypeParameter {
            name,
            class_bound,
            interface_bounds,
        })
    }

    /// Parse a class signature: `[TypeParameters] SuperclassSignature InterfaceSignature*`
    ///
    /// # Errors
    /// Returns [`crate::Error::SignatureSyntax`] if the signature is malformed.
    pub fn parse_class_signature(&mut self) -> Result<SignatureClass> {
        let type_params = self.parse_type_parameters()?;
        let superclass = self.parse_class_type()?;

        let mut interfaces = Vec::new();
        while self.parser.has_more_data() {
            interfaces.push(self.parse_class_type()?);
        }

        Ok(SignatureClass {
            type_params,
            superclass,
            interfaces,
        })
    }

    /// Parse a method signature:
    /// `[TypeParameters] ( TypeSignature* ) ReturnType ThrowsSignature*`
    ///
    /// # Errors
    /// Returns [`crate::Error::SignatureSyntax`] if the signature is malformed.
    pub fn parse_method_signature(&mut self) -> Result<SignatureMethod> {
        let type_params = self.parse_type_parameters()?;
        self.parser.expect(b'(', Expected::Char('('))?;

        let mut params = Vec::new();
        loop {
            match self.parser.peek_byte() {
                Some(b')') => {
                    self.parser.advance()?;
                    break;
                }
                Some(_) => params.push(self.parse_type(Expected::TypeSignature)?),
                None => return Err(syntax_error!(self.parser.pos(), Expected::Char(')'))),
            }
        }

        let return_type = if self.parser.peek_is(b'V') {
            self.parser.advance()?;
            TypeSignature::Base(PrimitiveKind::Void)
        } else {
            self.parse_type(Expected::ReturnType)?
        };

        let mut throws = Vec::new();
        while self.parser.peek_is(b'^') {
            self.parser.advance()?;
            let thrown = match self.parser.peek_byte() {
                Some(b'L') => TypeSignature::Class(self.parse_class_type()?),
                Some(b'T') => self.parse_type_variable()?,
                _ => return Err(syntax_error!(self.parser.pos(), Expected::ThrowsType)),
            };
            throws.push(thrown);
        }

        self.parser.finish()?;

        Ok(SignatureMethod {
            type_params,
            params,
            return_type,
            throws,
        })
    }

    /// Parse a field signature, a single reference type
    ///
    /// # Errors
    /// Returns [`crate::Error::SignatureSyntax`] if the signature is malformed.
    pub fn parse_field_signature(&mut self) -> Result<SignatureField> {
        let base = self.parse_reference_type(Expected::ReferenceType)?;
        self.parser.finish()?;
        Ok(SignatureField { base })
    }
}
