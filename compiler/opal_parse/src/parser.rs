//! Recursive-descent schema parser.
//!
//! Grammar (whitespace insignificant):
//!
//! ```text
//! schema   := qualname ('.' ident)? '(' args? ')' '->' returns
//! args     := arg (',' arg)*
//! arg      := '*' | '...' | type ident ('=' default)?
//! returns  := '...' | '(' (ret (',' ret)*)? ')' | ret
//! ret      := type ident?
//! type     := base alias? postfix* alias?
//! postfix  := '?' | '[' number? ']'
//! alias    := '(' set ('|' set)* '!'? ('->' set)? ')'
//! ```

use opal_ir::{AliasInfo, Argument, FunctionSchema, Return, SchemaType, Symbol};
use smallvec::SmallVec;
use std::ops::Range;

use crate::lexer::{lex, RawToken, Token};
use crate::stack::ensure_sufficient_stack;
use crate::ParseError;

/// Deepest type accepted, counting each constructor and postfix as a level.
///
/// Types are rendered and dropped recursively, so the cap bounds every later
/// walk over a parsed schema, not just the parser.
const MAX_TYPE_DEPTH: usize = 64;

/// Parse a schema declaration such as
/// `aten::add.Tensor(Tensor self, Tensor other, *, Scalar alpha=1) -> Tensor`.
pub fn parse_schema(src: &str) -> Result<FunctionSchema, ParseError> {
    let tokens = lex(src)?;
    let mut parser = Parser {
        src,
        tokens,
        pos: 0,
        nesting: 0,
    };
    let schema = parser.schema()?;
    parser.expect_end()?;
    Ok(schema)
}

struct Parser<'src> {
    src: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    /// Constructors currently open around the type being parsed.
    nesting: usize,
}

impl<'src> Parser<'src> {
    // -- Cursor --

    #[inline]
    fn peek(&self) -> Option<RawToken> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    #[inline]
    fn peek_nth(&self, n: usize) -> Option<RawToken> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.src.len(), |t| t.span.start)
    }

    fn bump(&mut self) -> Range<usize> {
        let span = self.tokens[self.pos].span.clone();
        self.pos += 1;
        span
    }

    fn eat(&mut self, kind: RawToken) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let found = match self.tokens.get(self.pos) {
            Some(token) => format!("`{}`", &self.src[token.span.clone()]),
            None => "end of input".to_owned(),
        };
        ParseError::Unexpected {
            expected,
            found,
            offset: self.offset(),
        }
    }

    fn expect(&mut self, kind: RawToken) -> Result<Range<usize>, ParseError> {
        if self.peek() == Some(kind) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    fn expect_ident(&mut self) -> Result<&'src str, ParseError> {
        let span = self.expect(RawToken::Ident)?;
        Ok(&self.src[span])
    }

    fn expect_end(&self) -> Result<(), ParseError> {
        if self.pos == self.tokens.len() {
            Ok(())
        } else {
            Err(self.unexpected("end of schema"))
        }
    }

    // -- Grammar --

    fn schema(&mut self) -> Result<FunctionSchema, ParseError> {
        let ns = self.expect_ident()?;
        self.expect(RawToken::ColonColon)?;
        let base = self.expect_ident()?;
        let name = Symbol::from_qual_string(&format!("{ns}::{base}"))?;

        let overload = if self.eat(RawToken::Dot) {
            self.expect_ident()?
        } else {
            ""
        };

        self.expect(RawToken::LParen)?;
        let (arguments, is_vararg) = self.arguments()?;
        self.expect(RawToken::RParen)?;
        self.expect(RawToken::Arrow)?;

        if self.eat(RawToken::Ellipsis) {
            let schema = FunctionSchema::new(name, overload, arguments, vec![]).with_varret();
            return Ok(if is_vararg { schema.with_vararg() } else { schema });
        }

        let returns = self.returns()?;
        let schema = FunctionSchema::new(name, overload, arguments, returns);
        Ok(if is_vararg { schema.with_vararg() } else { schema })
    }

    fn arguments(&mut self) -> Result<(Vec<Argument>, bool), ParseError> {
        let mut arguments = Vec::new();
        if self.peek() == Some(RawToken::RParen) {
            return Ok((arguments, false));
        }

        let mut kwarg_only = false;
        loop {
            match self.peek() {
                Some(RawToken::Star) => {
                    if kwarg_only {
                        return Err(ParseError::DuplicateKwargMarker {
                            offset: self.offset(),
                        });
                    }
                    self.bump();
                    kwarg_only = true;
                }
                Some(RawToken::Ellipsis) => {
                    let offset = self.offset();
                    self.bump();
                    if self.peek() != Some(RawToken::RParen) {
                        return Err(ParseError::VarargNotLast { offset });
                    }
                    return Ok((arguments, true));
                }
                _ => {
                    let mut arg = self.argument()?;
                    arg.kwarg_only = kwarg_only;
                    arguments.push(arg);
                }
            }
            if !self.eat(RawToken::Comma) {
                return Ok((arguments, false));
            }
        }
    }

    fn argument(&mut self) -> Result<Argument, ParseError> {
        let (ty, alias) = self.annotated_type()?;
        let name = self.expect_ident()?;
        let mut arg = Argument::new(name, ty);
        arg.alias = alias;
        if self.eat(RawToken::Eq) {
            arg.default = Some(self.default_value()?.into());
        }
        Ok(arg)
    }

    /// Raw text of a default value, up to the next top-level `,` or `)`.
    fn default_value(&mut self) -> Result<&'src str, ParseError> {
        let start = self.offset();
        let mut end = start;
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => return Err(self.unexpected("`,` or `)`")),
                Some(RawToken::LParen | RawToken::LBracket) => depth += 1,
                Some(RawToken::RParen | RawToken::RBracket) if depth == 0 => break,
                Some(RawToken::RParen | RawToken::RBracket) => depth -= 1,
                Some(RawToken::Comma) if depth == 0 => break,
                Some(_) => {}
            }
            end = self.bump().end;
        }
        if end == start {
            return Err(self.unexpected("default value"));
        }
        Ok(&self.src[start..end])
    }

    fn returns(&mut self) -> Result<Vec<Return>, ParseError> {
        if !self.eat(RawToken::LParen) {
            return Ok(vec![self.return_value()?]);
        }
        let mut returns = Vec::new();
        if self.eat(RawToken::RParen) {
            return Ok(returns);
        }
        loop {
            returns.push(self.return_value()?);
            if !self.eat(RawToken::Comma) {
                break;
            }
        }
        self.expect(RawToken::RParen)?;
        Ok(returns)
    }

    fn return_value(&mut self) -> Result<Return, ParseError> {
        let (ty, alias) = self.annotated_type()?;
        let mut ret = Return::new(ty);
        ret.alias = alias;
        if self.peek() == Some(RawToken::Ident) {
            ret.name = Some(self.expect_ident()?.into());
        }
        Ok(ret)
    }

    /// A type with an optional alias annotation before or after its postfixes.
    fn annotated_type(&mut self) -> Result<(SchemaType, Option<AliasInfo>), ParseError> {
        let (ty, depth) = self.base_type()?;
        let mut alias = self.alias_annotation()?;
        let (ty, _) = self.type_postfix(ty, depth)?;
        if alias.is_none() {
            alias = self.alias_annotation()?;
        }
        Ok((ty, alias))
    }

    /// A type and its nesting depth (a bare name is depth 1).
    fn schema_type(&mut self) -> Result<(SchemaType, usize), ParseError> {
        let (ty, depth) = self.base_type()?;
        self.type_postfix(ty, depth)
    }

    /// Element type of a constructor, parsed one level further in.
    fn nested_type(&mut self) -> Result<(SchemaType, usize), ParseError> {
        if self.nesting >= MAX_TYPE_DEPTH {
            return Err(ParseError::NestingTooDeep {
                offset: self.offset(),
                limit: MAX_TYPE_DEPTH,
            });
        }
        self.nesting += 1;
        let result = ensure_sufficient_stack(|| self.schema_type());
        self.nesting -= 1;
        result
    }

    /// Depth of a type wrapping one of depth `inner`.
    fn wrap_depth(inner: usize, offset: usize) -> Result<usize, ParseError> {
        if inner >= MAX_TYPE_DEPTH {
            return Err(ParseError::NestingTooDeep {
                offset,
                limit: MAX_TYPE_DEPTH,
            });
        }
        Ok(inner + 1)
    }

    fn base_type(&mut self) -> Result<(SchemaType, usize), ParseError> {
        let offset = self.offset();
        let name = self.expect_ident()?;
        let is_constructor = self.peek() == Some(RawToken::LParen);
        match name {
            "Tuple" if is_constructor => {
                self.bump();
                let mut elems = Vec::new();
                let mut deepest = 0;
                if self.peek() != Some(RawToken::RParen) {
                    loop {
                        let (elem, depth) = self.nested_type()?;
                        deepest = deepest.max(depth);
                        elems.push(elem);
                        if !self.eat(RawToken::Comma) {
                            break;
                        }
                    }
                }
                self.expect(RawToken::RParen)?;
                Ok((SchemaType::Tuple(elems), Self::wrap_depth(deepest, offset)?))
            }
            "Dict" if is_constructor => {
                self.bump();
                let (key, key_depth) = self.nested_type()?;
                self.expect(RawToken::Comma)?;
                let (value, value_depth) = self.nested_type()?;
                self.expect(RawToken::RParen)?;
                let depth = Self::wrap_depth(key_depth.max(value_depth), offset)?;
                Ok((SchemaType::Dict(Box::new(key), Box::new(value)), depth))
            }
            "Future" if is_constructor => {
                self.bump();
                let (inner, depth) = self.nested_type()?;
                self.expect(RawToken::RParen)?;
                Ok((SchemaType::Future(Box::new(inner)), Self::wrap_depth(depth, offset)?))
            }
            _ => Ok((SchemaType::named(name), 1)),
        }
    }

    fn type_postfix(
        &mut self,
        mut ty: SchemaType,
        mut depth: usize,
    ) -> Result<(SchemaType, usize), ParseError> {
        loop {
            let offset = self.offset();
            match self.peek() {
                Some(RawToken::Question) => {
                    depth = Self::wrap_depth(depth, offset)?;
                    self.bump();
                    ty = ty.optional();
                }
                Some(RawToken::LBracket) => {
                    depth = Self::wrap_depth(depth, offset)?;
                    self.bump();
                    let len = if self.peek() == Some(RawToken::Number) {
                        let offset = self.offset();
                        let span = self.bump();
                        let text = &self.src[span];
                        Some(text.parse::<u32>().map_err(|_| {
                            ParseError::InvalidListLength {
                                offset,
                                text: text.to_owned(),
                            }
                        })?)
                    } else {
                        None
                    };
                    self.expect(RawToken::RBracket)?;
                    ty = SchemaType::List {
                        elem: Box::new(ty),
                        len,
                    };
                }
                _ => return Ok((ty, depth)),
            }
        }
    }

    fn alias_annotation(&mut self) -> Result<Option<AliasInfo>, ParseError> {
        if self.peek() != Some(RawToken::LParen) {
            return Ok(None);
        }
        // `(` followed by `)` is never an annotation; leave it to the caller
        if self.peek_nth(1) == Some(RawToken::RParen) {
            return Ok(None);
        }
        self.bump();
        let mut sets = SmallVec::new();
        loop {
            sets.push(self.alias_set()?);
            if !self.eat(RawToken::Pipe) {
                break;
            }
        }
        let is_write = self.eat(RawToken::Bang);
        let after = if self.eat(RawToken::Arrow) {
            Some(self.alias_set()?)
        } else {
            None
        };
        self.expect(RawToken::RParen)?;
        Ok(Some(AliasInfo {
            sets,
            is_write,
            after,
        }))
    }

    fn alias_set(&mut self) -> Result<Box<str>, ParseError> {
        match self.peek() {
            Some(RawToken::Ident | RawToken::Star) => {
                let span = self.bump();
                Ok(self.src[span].into())
            }
            _ => Err(self.unexpected("alias set")),
        }
    }
}
