//! Registered operator records.

use std::fmt;

use crate::{FunctionSchema, OperatorName, Symbol};

/// How alias analysis treats an operator's inputs and outputs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AliasAnalysisKind {
    /// Alias analysis has a hand-written case for this operator.
    InternalSpecialCase,
    /// Assume any input may alias any output and be written.
    #[default]
    Conservative,
    /// Derive aliasing from the schema's alias annotations.
    FromSchema,
    /// No side effects, outputs never alias inputs.
    PureFunction,
}

impl fmt::Display for AliasAnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AliasAnalysisKind::InternalSpecialCase => "INTERNAL_SPECIAL_CASE",
            AliasAnalysisKind::Conservative => "CONSERVATIVE",
            AliasAnalysisKind::FromSchema => "FROM_SCHEMA",
            AliasAnalysisKind::PureFunction => "PURE_FUNCTION",
        })
    }
}

/// An operator as the registry stores it. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operator {
    schema: FunctionSchema,
    alias_analysis_kind: AliasAnalysisKind,
}

impl Operator {
    pub fn new(schema: FunctionSchema, alias_analysis_kind: AliasAnalysisKind) -> Self {
        Operator {
            schema,
            alias_analysis_kind,
        }
    }

    pub fn schema(&self) -> &FunctionSchema {
        &self.schema
    }

    pub fn symbol(&self) -> Symbol {
        self.schema.name()
    }

    pub fn overload_name(&self) -> &str {
        self.schema.overload_name()
    }

    pub fn operator_name(&self) -> OperatorName {
        OperatorName::new(self.schema.name(), self.schema.overload_name())
    }

    pub fn alias_analysis_kind(&self) -> AliasAnalysisKind {
        self.alias_analysis_kind
    }
}

impl From<FunctionSchema> for Operator {
    fn from(schema: FunctionSchema) -> Self {
        Operator::new(schema, AliasAnalysisKind::default())
    }
}
