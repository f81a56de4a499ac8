//! Opal schema parser
//!
//! Turns operator declaration text into an [`opal_ir::FunctionSchema`]:
//!
//! ```text
//! aten::add.Tensor(Tensor self, Tensor other, *, Scalar alpha=1) -> Tensor
//! prim::Print(...) -> ...
//! ```
//!
//! Lexing is done by a `logos` tokenizer; parsing is a small hand-written
//! recursive descent over the token list. Malformed input yields a
//! [`ParseError`], never a panic. Type nesting is capped, so deeply nested
//! or unterminated constructors are rejected rather than exhausting the
//! stack.

mod error;
mod lexer;
mod parser;
mod stack;

pub use error::ParseError;
pub use parser::parse_schema;
