//! Type expression parser.
//!
//! Parses textual type references such as `int?`, `List<Tag>`,
//! `Lookup<string>[]` or `T` into [`TypeRef`] values.
//!
//! Grammar:
//!
//! ```text
//! type   := name ('<' type (',' type)* '>')? suffix*
//! suffix := '[]' | '?'
//! ```

use crate::error::ParseError;
use crate::types::{Builtin, TypeRef};

/// Parses a type expression with no generic parameters in scope.
///
/// # Errors
/// Returns `ParseError::InvalidTypeExpression` if the expression is malformed.
pub fn parse_type_ref(expr: &str) -> Result<TypeRef, ParseError> {
    parse_type_ref_in(expr, &[])
}

/// Parses a type expression, resolving bare names in `params` to generic
/// parameter references.
///
/// # Errors
/// Returns `ParseError::InvalidTypeExpression` if the expression is malformed.
pub fn parse_type_ref_in(expr: &str, params: &[String]) -> Result<TypeRef, ParseError> {
    let mut parser = TypeExprParser {
        src: expr,
        chars: expr.chars().collect(),
        pos: 0,
        params,
    };
    let ty = parser.parse_type()?;
    parser.skip_whitespace();
    if parser.pos < parser.chars.len() {
        return Err(parser.error(format!(
            "unexpected '{}' at position {}",
            parser.chars[parser.pos], parser.pos
        )));
    }
    Ok(ty)
}

struct TypeExprParser<'a> {
    src: &'a str,
    chars: Vec<char>,
    pos: usize,
    params: &'a [String],
}

impl TypeExprParser<'_> {
    fn parse_type(&mut self) -> Result<TypeRef, ParseError> {
        self.skip_whitespace();
        let name = self.parse_name()?;
        self.skip_whitespace();

        let mut ty = if self.peek() == Some('<') {
            self.pos += 1;
            let args = self.parse_args()?;
            if is_nullable_wrapper(&name) {
                if args.len() != 1 {
                    return Err(self.error("Nullable<> takes exactly one argument"));
                }
                args.into_iter()
                    .next()
                    .map(TypeRef::nullable)
                    .ok_or_else(|| self.error("Nullable<> takes exactly one argument"))?
            } else {
                TypeRef::Generic { name, args }
            }
        } else if self.params.iter().any(|p| *p == name) {
            TypeRef::Parameter(name)
        } else if let Some(builtin) = Builtin::from_name(&name) {
            TypeRef::Builtin(builtin)
        } else {
            TypeRef::Named(name)
        };

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('?') => {
                    self.pos += 1;
                    if ty.is_nullable() {
                        return Err(self.error("duplicate '?'"));
                    }
                    ty = TypeRef::nullable(ty);
                }
                Some('[') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    if self.peek() != Some(']') {
                        return Err(self.error("expected ']'"));
                    }
                    self.pos += 1;
                    ty = TypeRef::array(ty);
                }
                _ => break,
            }
        }

        Ok(ty)
    }

    fn parse_args(&mut self) -> Result<Vec<TypeRef>, ParseError> {
        let mut args = Vec::new();
        loop {
            args.push(self.parse_type()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some('>') => {
                    self.pos += 1;
                    return Ok(args);
                }
                Some(c) => return Err(self.error(format!("unexpected '{}' in argument list", c))),
                None => return Err(self.error("unexpected end of input")),
            }
        }
    }

    fn parse_name(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            let valid = if self.pos == start {
                c.is_alphabetic() || c == '_'
            } else {
                c.is_alphanumeric() || c == '_' || c == '.'
            };
            if !valid {
                break;
            }
            self.pos += 1;
        }

        if self.pos == start {
            return Err(match self.peek() {
                Some(c) => self.error(format!("expected type name, found '{}'", c)),
                None => self.error("unexpected end of input"),
            });
        }

        let name: String = self.chars[start..self.pos].iter().collect();
        if name.ends_with('.') {
            return Err(self.error(format!("incomplete qualified name '{}'", name)));
        }
        Ok(name)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::type_expr(self.src, message)
    }
}

fn is_nullable_wrapper(name: &str) -> bool {
    name == "Nullable" || name == "System.Nullable"
}
