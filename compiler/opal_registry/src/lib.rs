//! Opal operator registry
//!
//! The catalog of every operator the IR can contain, keyed by interned
//! [`Symbol`](opal_ir::Symbol). The IR builder, printer and alias analysis
//! use it to validate and dispatch nodes.
//!
//! # Queries
//!
//! - [`operators_for`]: every overload registered under a name
//! - [`find_operator_for`]: one overload by full name
//! - [`operator_for_literal`]: resolve a signature literal such as
//!   `"aten::add(Tensor self, Tensor other) -> Tensor"`, memoized per literal
//! - [`find_similar_operators`]: "did you mean" candidates
//! - [`all_operators`]
//!
//! Registration of non-schematized (`-> ...`) operators is checked against
//! the hand-maintained tables in [`policy`].
//!
//! # Debugging
//!
//! - `RUST_LOG=opal_registry=debug`: flushes, literal resolutions and misses
//! - `RUST_LOG=opal_registry=trace`: also every queued operator and, on a
//!   literal miss, every known canonical signature

pub mod canonical;
mod error;
mod global;
pub mod policy;
mod registry;
pub mod similarity;
mod validate;

pub use canonical::canonical_schema_string;
pub use error::{LookupError, RegistrationError};
pub use global::{
    all_operators, find_operator_for, find_similar_operators, global_registry, operator_for_literal,
    operators_for, register_operator,
};
pub use policy::{alias_analysis_has_special_case_for, printer_has_special_case_for};
pub use registry::{DefaultSchemaParser, OperatorRegistry, RegistryConfig, SchemaParser};
pub use validate::validate_registration;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for registry diagnostics.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host binary
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
