//! The process-wide registry.
//!
//! Built on first use and never torn down. These functions are the entry
//! points the IR builder, printer and passes use; tests that need isolation
//! construct their own [`OperatorRegistry`] instead.

use std::sync::{Arc, LazyLock};

use opal_ir::{Operator, OperatorName, Symbol};

use crate::{LookupError, OperatorRegistry, RegistrationError};

static REGISTRY: LazyLock<OperatorRegistry> = LazyLock::new(|| {
    crate::init_tracing();
    OperatorRegistry::new()
});

pub fn global_registry() -> &'static OperatorRegistry {
    &REGISTRY
}

pub fn register_operator(op: Operator) -> Result<(), RegistrationError> {
    REGISTRY.register(op)
}

pub fn operators_for(name: Symbol) -> Vec<Arc<Operator>> {
    REGISTRY.operators_for(name)
}

pub fn find_operator_for(full_name: &OperatorName) -> Option<Arc<Operator>> {
    REGISTRY.find_operator_for(full_name)
}

pub fn operator_for_literal(signature: &'static str) -> Result<Arc<Operator>, LookupError> {
    REGISTRY.operator_for_literal(signature)
}

pub fn find_similar_operators(name: Symbol) -> Vec<Symbol> {
    REGISTRY.find_similar_operators(name)
}

pub fn all_operators() -> Vec<Arc<Operator>> {
    REGISTRY.all_operators()
}
