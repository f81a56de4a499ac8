//! Opal IR - operator schema data model
//!
//! Types shared by every stage that builds, prints or analyzes IR nodes:
//! - `Name` and the sharded `StringInterner`
//! - `Symbol`: interned `namespace::name` operator names
//! - `FunctionSchema` and its arguments, returns and types
//! - `Operator`: a schema plus its alias-analysis kind
//!
//! All of these are immutable once built and are `Send + Sync`, so the
//! registry can hand out shared references freely.

mod interner;
mod operator;
mod schema;
mod symbol;

pub use interner::{InternError, Name, StringInterner};
pub use operator::{AliasAnalysisKind, Operator};
pub use schema::{AliasInfo, Argument, FunctionSchema, Return, SchemaType};
pub use symbol::{OperatorName, Symbol, SymbolError};
