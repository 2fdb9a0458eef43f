//! Structured types parsed from declared type texts.
//!
//! Stubs and trees both describe declared types as normalized text
//! (`Map<String,List<Integer>>[]`). [`PsiType::parse`] turns that text into
//! a [`PsiType`]; its `Display` gives the normalized text back. Nothing is
//! resolved here: a class type is only a (possibly dotted) name.

use std::fmt;

use jpsi_ir::ElementType;
use jpsi_lexer::{tokenize_significant, Token};

use ElementType as T;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveType {
    fn from_keyword(kind: ElementType) -> Option<Self> {
        Some(match kind {
            T::BooleanKeyword => PrimitiveType::Boolean,
            T::ByteKeyword => PrimitiveType::Byte,
            T::CharKeyword => PrimitiveType::Char,
            T::ShortKeyword => PrimitiveType::Short,
            T::IntKeyword => PrimitiveType::Int,
            T::LongKeyword => PrimitiveType::Long,
            T::FloatKeyword => PrimitiveType::Float,
            T::DoubleKeyword => PrimitiveType::Double,
            T::VoidKeyword => PrimitiveType::Void,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Void => "void",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Extends(Box<PsiType>),
    Super(Box<PsiType>),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PsiType {
    Primitive(PrimitiveType),
    /// A class type as written. `arguments` belong to the last segment of
    /// `name`; arguments of qualifying segments are dropped.
    Class {
        name: String,
        arguments: Vec<PsiType>,
    },
    Array(Box<PsiType>),
    /// Last parameter declared with `...`.
    Ellipsis(Box<PsiType>),
    Wildcard(Option<WildcardBound>),
    /// Text that is not a type; kept verbatim.
    Invalid(String),
}

impl PsiType {
    /// Parse a declared type. Never fails: text that is not a type gives
    /// [`PsiType::Invalid`]. Type annotations are skipped.
    pub fn parse(text: &str) -> PsiType {
        let mut parser = TypeParser {
            source: text,
            tokens: tokenize_significant(text),
            pos: 0,
        };
        match parser.parse_type() {
            Some(ty) if parser.pos == parser.tokens.len() => ty,
            _ => PsiType::Invalid(text.to_owned()),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            PsiType::Invalid(_) => false,
            PsiType::Primitive(_) => true,
            PsiType::Class { arguments, .. } => arguments.iter().all(PsiType::is_valid),
            PsiType::Array(component) | PsiType::Ellipsis(component) => component.is_valid(),
            PsiType::Wildcard(None) => true,
            PsiType::Wildcard(Some(WildcardBound::Extends(b) | WildcardBound::Super(b))) => {
                b.is_valid()
            }
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, PsiType::Primitive(_))
    }

    /// Array dimensions, counting `...` as one.
    pub fn array_dimensions(&self) -> usize {
        match self {
            PsiType::Array(component) | PsiType::Ellipsis(component) => {
                1 + component.array_dimensions()
            }
            _ => 0,
        }
    }

    /// Element type of an array or varargs type.
    pub fn component_type(&self) -> Option<&PsiType> {
        match self {
            PsiType::Array(component) | PsiType::Ellipsis(component) => Some(component),
            _ => None,
        }
    }

    /// Innermost non-array type.
    pub fn deep_component_type(&self) -> &PsiType {
        let mut ty = self;
        while let Some(component) = ty.component_type() {
            ty = component;
        }
        ty
    }

    /// Last segment of a class type's name.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            PsiType::Class { name, .. } => name.rsplit('.').next(),
            _ => None,
        }
    }
}

impl fmt::Display for PsiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PsiType::Primitive(p) => f.write_str(p.name()),
            PsiType::Class { name, arguments } => {
                f.write_str(name)?;
                if !arguments.is_empty() {
                    f.write_str("<")?;
                    for (i, argument) in arguments.iter().enumerate() {
                        if i > 0 {
                            f.write_str(",")?;
                        }
                        write!(f, "{argument}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            PsiType::Array(component) => write!(f, "{component}[]"),
            PsiType::Ellipsis(component) => write!(f, "{component}..."),
            PsiType::Wildcard(None) => f.write_str("?"),
            PsiType::Wildcard(Some(WildcardBound::Extends(bound))) => {
                write!(f, "? extends {bound}")
            }
            PsiType::Wildcard(Some(WildcardBound::Super(bound))) => write!(f, "? super {bound}"),
            PsiType::Invalid(text) => f.write_str(text),
        }
    }
}

struct TypeParser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl TypeParser<'_> {
    fn current(&self) -> Option<ElementType> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn nth(&self, n: usize) -> Option<ElementType> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn eat(&mut self, kind: ElementType) -> bool {
        let found = self.current() == Some(kind);
        if found {
            self.pos += 1;
        }
        found
    }

    fn identifier(&mut self) -> Option<&str> {
        let token = self.tokens.get(self.pos)?;
        if token.kind != T::Identifier {
            return None;
        }
        self.pos += 1;
        Some(token.text(self.source))
    }

    /// `@A`, `@a.B(...)` before a type or dimension.
    fn skip_annotations(&mut self) {
        while self.current() == Some(T::At) && self.nth(1) == Some(T::Identifier) {
            self.pos += 2;
            while self.current() == Some(T::Dot) && self.nth(1) == Some(T::Identifier) {
                self.pos += 2;
            }
            if self.current() == Some(T::LParenth) {
                let mut depth = 0usize;
                while let Some(kind) = self.current() {
                    self.pos += 1;
                    match kind {
                        T::LParenth => depth += 1,
                        T::RParenth => {
                            depth = depth.saturating_sub(1);
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    fn parse_type(&mut self) -> Option<PsiType> {
        jpsi_ir::ensure_sufficient_stack(|| self.parse_type_inner())
    }

    fn parse_type_inner(&mut self) -> Option<PsiType> {
        self.skip_annotations();
        let mut ty = match self.current()? {
            T::Quest => {
                self.pos += 1;
                let bound = if self.eat(T::ExtendsKeyword) {
                    Some(WildcardBound::Extends(Box::new(self.parse_type()?)))
                } else if self.eat(T::SuperKeyword) {
                    Some(WildcardBound::Super(Box::new(self.parse_type()?)))
                } else {
                    None
                };
                return Some(PsiType::Wildcard(bound));
            }
            T::Identifier => self.class_type()?,
            kind => {
                let primitive = PrimitiveType::from_keyword(kind)?;
                self.pos += 1;
                PsiType::Primitive(primitive)
            }
        };
        loop {
            self.skip_annotations();
            if self.current() == Some(T::LBracket) && self.nth(1) == Some(T::RBracket) {
                self.pos += 2;
                ty = PsiType::Array(Box::new(ty));
            } else {
                break;
            }
        }
        if self.eat(T::Ellipsis) {
            ty = PsiType::Ellipsis(Box::new(ty));
        }
        Some(ty)
    }

    fn class_type(&mut self) -> Option<PsiType> {
        let mut name = self.identifier()?.to_owned();
        let mut arguments = self.type_arguments()?;
        while self.current() == Some(T::Dot) {
            self.pos += 1;
            self.skip_annotations();
            name.push('.');
            name.push_str(self.identifier()?);
            arguments = self.type_arguments()?;
        }
        Some(PsiType::Class { name, arguments })
    }

    /// `<A,B>` if present; `<>` gives no arguments.
    fn type_arguments(&mut self) -> Option<Vec<PsiType>> {
        let mut arguments = Vec::new();
        if !self.eat(T::Lt) {
            return Some(arguments);
        }
        if self.eat(T::Gt) {
            return Some(arguments);
        }
        loop {
            arguments.push(self.parse_type()?);
            if !self.eat(T::Comma) {
                break;
            }
        }
        self.eat(T::Gt).then_some(arguments)
    }
}

#[cfg(test)]
mod tests;
