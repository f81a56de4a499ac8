//! Registry error types.

use opal_ir::Symbol;
use opal_parse::ParseError;

/// A non-schematized operator's registration contradicts the policy tables.
///
/// These are programming errors in whoever declared the operator; callers
/// are expected to abort startup rather than recover.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error(
        "missing special case in printer for non-schematized operator `{name}`; \
         add a case for this operator"
    )]
    MissingPrinterSpecialCase { name: Symbol },

    #[error(
        "missing special case in alias analysis for non-schematized operator `{name}`; \
         add a case for this operator"
    )]
    MissingAliasAnalysisSpecialCase { name: Symbol },

    #[error("operator `{name}` is special-cased and cannot use schema-derived alias analysis")]
    SpecialCasedWithSchemaAliasAnalysis { name: Symbol },
}

/// A literal signature could not be resolved to a registered operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("malformed operator signature `{signature}`: {source}")]
    InvalidSignature {
        signature: &'static str,
        #[source]
        source: ParseError,
    },

    #[error(
        "couldn't find an operator for `{signature}` (canonical form `{canonical}`); \
         does a hardcoded signature need updating?{}",
        did_you_mean(.suggestions)
    )]
    UnknownSignature {
        signature: &'static str,
        canonical: String,
        suggestions: Vec<Symbol>,
    },
}

fn did_you_mean(suggestions: &[Symbol]) -> String {
    if suggestions.is_empty() {
        return String::new();
    }
    let names: Vec<String> = suggestions.iter().map(|s| format!("`{s}`")).collect();
    format!(" did you mean {}?", names.join(", "))
}
