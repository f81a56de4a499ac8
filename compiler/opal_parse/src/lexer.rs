//! Schema tokenizer.
//!
//! `RawToken` is the logos-derived token set for schema declarations.
//! Tokens carry byte spans into the source; the parser slices text back out
//! of the source instead of copying it into tokens.

use logos::Logos;
use std::ops::Range;

use crate::ParseError;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    #[regex(r"-?[0-9]+(\.[0-9]+)?([eE][-+]?[0-9]+)?")]
    Number,
    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    Str,

    #[token("::")]
    ColonColon,
    #[token("...")]
    Ellipsis,
    #[token(".")]
    Dot,
    #[token("->")]
    Arrow,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,
    #[token("*")]
    Star,
    #[token("?")]
    Question,
    #[token("!")]
    Bang,
    #[token("|")]
    Pipe,
}

impl RawToken {
    /// How the token reads in "expected X" messages.
    pub(crate) fn describe(self) -> &'static str {
        match self {
            RawToken::Ident => "identifier",
            RawToken::Number => "number",
            RawToken::Str => "string literal",
            RawToken::ColonColon => "`::`",
            RawToken::Ellipsis => "`...`",
            RawToken::Dot => "`.`",
            RawToken::Arrow => "`->`",
            RawToken::LParen => "`(`",
            RawToken::RParen => "`)`",
            RawToken::LBracket => "`[`",
            RawToken::RBracket => "`]`",
            RawToken::Comma => "`,`",
            RawToken::Eq => "`=`",
            RawToken::Star => "`*`",
            RawToken::Question => "`?`",
            RawToken::Bang => "`!`",
            RawToken::Pipe => "`|`",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: RawToken,
    pub span: Range<usize>,
}

/// Tokenize a whole schema declaration.
pub(crate) fn lex(src: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = RawToken::lexer(src);
    let mut tokens = Vec::with_capacity(src.len() / 3);
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token { kind, span }),
            Err(()) => {
                return Err(ParseError::InvalidToken {
                    offset: span.start,
                    text: lexer.slice().to_owned(),
                })
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests can panic")]

    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(src: &str) -> Vec<RawToken> {
        lex(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn qualified_name_with_overload() {
        assert_eq!(
            kinds("aten::add.Tensor"),
            vec![
                RawToken::Ident,
                RawToken::ColonColon,
                RawToken::Ident,
                RawToken::Dot,
                RawToken::Ident,
            ]
        );
    }

    #[test]
    fn arrow_and_ellipsis() {
        assert_eq!(
            kinds("(...) -> ..."),
            vec![
                RawToken::LParen,
                RawToken::Ellipsis,
                RawToken::RParen,
                RawToken::Arrow,
                RawToken::Ellipsis,
            ]
        );
    }

    #[test]
    fn default_literals() {
        assert_eq!(
            kinds(r#"-100 1e-05 "mean" 'x'"#),
            vec![
                RawToken::Number,
                RawToken::Number,
                RawToken::Str,
                RawToken::Str,
            ]
        );
    }

    #[test]
    fn spans_index_source() {
        let src = "Tensor  self";
        let tokens = lex(src).unwrap();
        assert_eq!(&src[tokens[1].span.clone()], "self");
    }

    #[test]
    fn invalid_character() {
        assert_eq!(
            lex("int @x"),
            Err(ParseError::InvalidToken {
                offset: 4,
                text: "@".to_owned(),
            })
        );
    }
}
