//! Registration-time checks for non-schematized operators.

use opal_ir::{AliasAnalysisKind, Operator};

use crate::policy::{alias_analysis_has_special_case_for, printer_has_special_case_for};
use crate::RegistrationError;

/// Check a var-return operator against the policy tables.
///
/// Schematized operators always pass. The printer check runs first.
pub fn validate_registration(op: &Operator) -> Result<(), RegistrationError> {
    if !op.schema().is_varret() {
        return Ok(());
    }

    let name = op.symbol();
    if !printer_has_special_case_for(name) {
        return Err(RegistrationError::MissingPrinterSpecialCase { name });
    }

    // CONSERVATIVE is the schema-driven default, meaningless without a schema;
    // FROM_SCHEMA contradicts a hand-written special case.
    match (
        alias_analysis_has_special_case_for(name),
        op.alias_analysis_kind(),
    ) {
        (false, AliasAnalysisKind::Conservative) => {
            Err(RegistrationError::MissingAliasAnalysisSpecialCase { name })
        }
        (true, AliasAnalysisKind::FromSchema) => {
            Err(RegistrationError::SpecialCasedWithSchemaAliasAnalysis { name })
        }
        _ => Ok(()),
    }
}
