//! The operator registry.
//!
//! Operators are queued on registration and only indexed when the next
//! query runs, so startup code can register thousands of operators without
//! paying for canonicalization until something actually looks one up.
//!
//! # Locking
//!
//! One `Mutex` guards the pending queue and both indices. Every query takes
//! it, flushes the queue, then reads. The literal-signature cache is the
//! exception: it is a `DashMap` read without the main lock, but it is only
//! written while the main lock is held, and entries are never removed.

use std::sync::Arc;

use dashmap::DashMap;
use opal_ir::{FunctionSchema, Operator, OperatorName, Symbol};
use opal_parse::ParseError;
use parking_lot::Mutex;
use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::canonical::canonical_schema_string;
use crate::similarity::{rank_similar, DEFAULT_MAX_EDIT_DISTANCE};
use crate::validate::validate_registration;
use crate::{LookupError, RegistrationError};

/// Turns signature text into a schema for literal lookups.
pub trait SchemaParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<FunctionSchema, ParseError>;
}

/// [`SchemaParser`] backed by `opal_parse`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultSchemaParser;

impl SchemaParser for DefaultSchemaParser {
    fn parse(&self, text: &str) -> Result<FunctionSchema, ParseError> {
        opal_parse::parse_schema(text)
    }
}

/// Registry tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Maximum edit distance for similar-name suggestions.
    pub similarity_cutoff: usize,
    /// Suggestions attached to an unknown-signature error.
    pub max_suggestions: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            similarity_cutoff: DEFAULT_MAX_EDIT_DISTANCE,
            max_suggestions: 3,
        }
    }
}

/// Identity of a `'static` signature literal.
///
/// `'static` text is never freed or mutated, so its address and length
/// identify it for the rest of the process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct LiteralKey {
    addr: usize,
    len: usize,
}

impl LiteralKey {
    fn of(text: &'static str) -> Self {
        LiteralKey {
            addr: text.as_ptr() as usize,
            len: text.len(),
        }
    }
}

#[derive(Default)]
struct RegistryState {
    /// Operators registered since the last query.
    pending: Vec<Arc<Operator>>,
    by_symbol: FxHashMap<Symbol, Vec<Arc<Operator>>>,
    /// Canonical signature to operator; the last registration wins.
    by_signature: FxHashMap<String, Arc<Operator>>,
}

impl RegistryState {
    /// Index everything in the pending queue. Runs before every read.
    fn register_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        tracing::debug!(count = self.pending.len(), "indexing pending operators");
        for op in self.pending.drain(..) {
            let canonical = canonical_schema_string(op.schema());
            if let Some(previous) = self.by_signature.insert(canonical, Arc::clone(&op)) {
                tracing::debug!(
                    replaced = %previous.schema(),
                    by = %op.schema(),
                    "canonical signature collision"
                );
            }
            self.by_symbol.entry(op.symbol()).or_default().push(op);
        }
    }

    fn similar(&self, target: Symbol, cutoff: usize) -> Vec<Symbol> {
        rank_similar(target, self.by_symbol.keys().copied(), cutoff)
    }
}

/// Catalog of every operator the IR knows about.
pub struct OperatorRegistry {
    state: Mutex<RegistryState>,
    by_literal: DashMap<LiteralKey, Arc<Operator>, FxBuildHasher>,
    parser: Box<dyn SchemaParser>,
    config: RegistryConfig,
}

impl OperatorRegistry {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        OperatorRegistry {
            state: Mutex::new(RegistryState::default()),
            by_literal: DashMap::with_hasher(FxBuildHasher),
            parser: Box::new(DefaultSchemaParser),
            config,
        }
    }

    /// Replace the parser used by [`operator_for_literal`](Self::operator_for_literal).
    #[must_use]
    pub fn with_parser(mut self, parser: impl SchemaParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Validate `op` and queue it for indexing.
    ///
    /// Only non-schematized operators can fail, and only on a policy
    /// violation; queueing itself never fails.
    pub fn register(&self, op: Operator) -> Result<(), RegistrationError> {
        validate_registration(&op)?;
        tracing::trace!(operator = %op.schema(), "queueing operator");
        self.state.lock().pending.push(Arc::new(op));
        Ok(())
    }

    /// Every overload registered under `name`, in registration order.
    pub fn operators_for(&self, name: Symbol) -> Vec<Arc<Operator>> {
        let mut state = self.state.lock();
        state.register_pending();
        state.by_symbol.get(&name).cloned().unwrap_or_default()
    }

    /// The overload of `full_name.name` whose overload name matches exactly.
    pub fn find_operator_for(&self, full_name: &OperatorName) -> Option<Arc<Operator>> {
        let mut state = self.state.lock();
        state.register_pending();
        state
            .by_symbol
            .get(&full_name.name)?
            .iter()
            .find(|op| op.overload_name() == &*full_name.overload_name)
            .cloned()
    }

    /// Resolve a signature literal written at a call site.
    ///
    /// The first resolution of each literal parses and canonicalizes it; every
    /// later call with the same literal is a cache hit. Failure means the
    /// literal has drifted from the registered schemas.
    pub fn operator_for_literal(
        &self,
        signature: &'static str,
    ) -> Result<Arc<Operator>, LookupError> {
        let key = LiteralKey::of(signature);
        if let Some(op) = self.by_literal.get(&key) {
            return Ok(Arc::clone(op.value()));
        }

        let mut state = self.state.lock();
        state.register_pending();

        // Another thread may have resolved it while we waited for the lock
        if let Some(op) = self.by_literal.get(&key) {
            return Ok(Arc::clone(op.value()));
        }

        let schema = self
            .parser
            .parse(signature)
            .map_err(|source| LookupError::InvalidSignature { signature, source })?;
        let canonical = canonical_schema_string(&schema);

        let Some(op) = state.by_signature.get(&canonical).cloned() else {
            tracing::debug!(signature, %canonical, "no operator matches signature literal");
            for known in state.by_signature.keys() {
                tracing::trace!(%known, "known signature");
            }
            let mut suggestions = state.similar(schema.name(), self.config.similarity_cutoff);
            suggestions.truncate(self.config.max_suggestions);
            return Err(LookupError::UnknownSignature {
                signature,
                canonical,
                suggestions,
            });
        };

        tracing::debug!(signature, "resolved signature literal");
        self.by_literal.insert(key, Arc::clone(&op));
        Ok(op)
    }

    /// Registered names within the similarity cutoff of `name`, closest first.
    pub fn find_similar_operators(&self, name: Symbol) -> Vec<Symbol> {
        let mut state = self.state.lock();
        state.register_pending();
        state.similar(name, self.config.similarity_cutoff)
    }

    /// Every registered operator, grouped by name.
    pub fn all_operators(&self) -> Vec<Arc<Operator>> {
        let mut state = self.state.lock();
        state.register_pending();
        state.by_symbol.values().flatten().cloned().collect()
    }

    /// Number of registered operators, including ones still queued.
    pub fn len(&self) -> usize {
        let state = self.state.lock();
        state.pending.len() + state.by_symbol.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
