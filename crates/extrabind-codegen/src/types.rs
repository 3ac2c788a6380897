//! Java type descriptors
//!
//! Field types arrive as Java source type names. This module parses them into
//! a structured [`TypeDescriptor`] and knows the primitive/boxed pairs.
//!
//! # Primitive Mappings
//!
//! | Primitive | Boxed |
//! |-----------|-------|
//! | `boolean` | `java.lang.Boolean` |
//! | `byte` | `java.lang.Byte` |
//! | `char` | `java.lang.Character` |
//! | `short` | `java.lang.Short` |
//! | `int` | `java.lang.Integer` |
//! | `long` | `java.lang.Long` |
//! | `float` | `java.lang.Float` |
//! | `double` | `java.lang.Double` |

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Java primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

const PRIMITIVES: &[(Primitive, &str, &str)] = &[
    (Primitive::Boolean, "boolean", "java.lang.Boolean"),
    (Primitive::Byte, "byte", "java.lang.Byte"),
    (Primitive::Char, "char", "java.lang.Character"),
    (Primitive::Short, "short", "java.lang.Short"),
    (Primitive::Int, "int", "java.lang.Integer"),
    (Primitive::Long, "long", "java.lang.Long"),
    (Primitive::Float, "float", "java.lang.Float"),
    (Primitive::Double, "double", "java.lang.Double"),
];

impl Primitive {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        PRIMITIVES
            .iter()
            .find(|(_, kw, _)| *kw == keyword)
            .map(|(p, _, _)| *p)
    }

    /// The primitive a boxed class name unboxes to
    pub fn from_boxed(name: &str) -> Option<Self> {
        PRIMITIVES
            .iter()
            .find(|(_, _, boxed)| *boxed == name)
            .map(|(p, _, _)| *p)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
        }
    }

    pub fn boxed(&self) -> &'static str {
        match self {
            Primitive::Boolean => "java.lang.Boolean",
            Primitive::Byte => "java.lang.Byte",
            Primitive::Char => "java.lang.Character",
            Primitive::Short => "java.lang.Short",
            Primitive::Int => "java.lang.Integer",
            Primitive::Long => "java.lang.Long",
            Primitive::Float => "java.lang.Float",
            Primitive::Double => "java.lang.Double",
        }
    }
}

/// A parsed Java type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescriptor {
    Primitive { primitive: Primitive },
    Declared { name: String, args: Vec<TypeDescriptor> },
    Array { component: Box<TypeDescriptor> },
}

/// Why a type descriptor failed to parse
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeParseError {
    #[error("empty type")]
    Empty,

    #[error("unexpected '{found}' at offset {offset}")]
    Unexpected { found: char, offset: usize },

    #[error("unexpected end of type")]
    UnexpectedEnd,

    #[error("primitive {0} cannot be a type argument")]
    PrimitiveArgument(String),

    #[error("wildcard type arguments are not supported")]
    Wildcard,
}

impl TypeDescriptor {
    /// Parse a Java source type name
    pub fn parse(source: &str) -> Result<Self, TypeParseError> {
        let mut parser = Parser {
            chars: source.char_indices().collect(),
            pos: 0,
        };
        parser.skip_ws();
        if parser.peek().is_none() {
            return Err(TypeParseError::Empty);
        }
        let ty = parser.parse_type()?;
        parser.skip_ws();
        match parser.peek() {
            None => Ok(ty),
            Some((offset, found)) => Err(TypeParseError::Unexpected { found, offset }),
        }
    }

    pub fn primitive(primitive: Primitive) -> Self {
        TypeDescriptor::Primitive { primitive }
    }

    /// A declared type without type arguments
    pub fn declared(name: impl Into<String>) -> Self {
        TypeDescriptor::Declared {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Declared {
            name: name.into(),
            args,
        }
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            TypeDescriptor::Primitive { primitive } => Some(*primitive),
            _ => None,
        }
    }

    /// The primitive this type is or unboxes to
    pub fn unboxed_primitive(&self) -> Option<Primitive> {
        match self {
            TypeDescriptor::Primitive { primitive } => Some(*primitive),
            TypeDescriptor::Declared { name, args } if args.is_empty() => {
                Primitive::from_boxed(name)
            }
            _ => None,
        }
    }

    /// Primitives become their boxed class; everything else is unchanged
    pub fn boxed(&self) -> TypeDescriptor {
        match self {
            TypeDescriptor::Primitive { primitive } => TypeDescriptor::declared(primitive.boxed()),
            other => other.clone(),
        }
    }

    /// Erased class name (`java.util.List` for `java.util.List<X>`); arrays keep `[]`
    pub fn erasure(&self) -> String {
        match self {
            TypeDescriptor::Primitive { primitive } => primitive.keyword().to_string(),
            TypeDescriptor::Declared { name, .. } => name.clone(),
            TypeDescriptor::Array { component } => format!("{}[]", component.erasure()),
        }
    }

    pub fn type_args(&self) -> &[TypeDescriptor] {
        match self {
            TypeDescriptor::Declared { args, .. } => args,
            _ => &[],
        }
    }

    /// Java source spelling with `java.lang.` dropped from top-level classes
    pub fn java_source(&self) -> String {
        match self {
            TypeDescriptor::Primitive { primitive } => primitive.keyword().to_string(),
            TypeDescriptor::Declared { name, args } => {
                let name = match name.strip_prefix("java.lang.") {
                    Some(short) if !short.contains('.') => short,
                    _ => name.as_str(),
                };
                if args.is_empty() {
                    name.to_string()
                } else {
                    let args: Vec<String> = args.iter().map(TypeDescriptor::java_source).collect();
                    format!("{}<{}>", name, args.join(", "))
                }
            }
            TypeDescriptor::Array { component } => format!("{}[]", component.java_source()),
        }
    }
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeDescriptor::Primitive { primitive } => write!(f, "{}", primitive.keyword()),
            TypeDescriptor::Declared { name, args } => {
                write!(f, "{name}")?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeDescriptor::Array { component } => write!(f, "{component}[]"),
        }
    }
}

struct Parser {
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<(usize, char)> {
        self.chars.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some((_, c)) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), TypeParseError> {
        self.skip_ws();
        match self.peek() {
            Some((_, c)) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            Some((offset, found)) => Err(TypeParseError::Unexpected { found, offset }),
            None => Err(TypeParseError::UnexpectedEnd),
        }
    }

    fn parse_name(&mut self) -> Result<String, TypeParseError> {
        self.skip_ws();
        let mut name = String::new();
        while let Some((offset, c)) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '$' || c == '.' {
                if name.is_empty() && (c.is_ascii_digit() || c == '.') {
                    return Err(TypeParseError::Unexpected { found: c, offset });
                }
                name.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        if name.is_empty() {
            return match self.peek() {
                Some((_, '?')) => Err(TypeParseError::Wildcard),
                Some((offset, found)) => Err(TypeParseError::Unexpected { found, offset }),
                None => Err(TypeParseError::UnexpectedEnd),
            };
        }
        if name.ends_with('.') || name.contains("..") {
            return Err(TypeParseError::Unexpected {
                found: '.',
                offset: self.peek().map_or(0, |(o, _)| o),
            });
        }
        Ok(name)
    }

    fn parse_type(&mut self) -> Result<TypeDescriptor, TypeParseError> {
        let name = self.parse_name()?;
        let mut ty = match Primitive::from_keyword(&name) {
            Some(primitive) => TypeDescriptor::primitive(primitive),
            None => {
                let mut args = Vec::new();
                self.skip_ws();
                if matches!(self.peek(), Some((_, '<'))) {
                    self.pos += 1;
                    loop {
                        let arg = self.parse_type()?;
                        if let TypeDescriptor::Primitive { primitive } = &arg {
                            return Err(TypeParseError::PrimitiveArgument(
                                primitive.keyword().to_string(),
                            ));
                        }
                        args.push(arg);
                        self.skip_ws();
                        match self.peek() {
                            Some((_, ',')) => self.pos += 1,
                            Some((_, '>')) => {
                                self.pos += 1;
                                break;
                            }
                            Some((offset, found)) => {
                                return Err(TypeParseError::Unexpected { found, offset });
                            }
                            None => return Err(TypeParseError::UnexpectedEnd),
                        }
                    }
                }
                TypeDescriptor::Declared { name, args }
            }
        };

        loop {
            self.skip_ws();
            if matches!(self.peek(), Some((_, '['))) {
                self.pos += 1;
                self.expect(']')?;
                ty = TypeDescriptor::Array {
                    component: Box::new(ty),
                };
            } else {
                return Ok(ty);
            }
        }
    }
}
