//! Canonical schema signatures.
//!
//! The canonical signature is the registry's equivalence key for schemas:
//! `name(type arg, ..., *, type kwarg) -> ret`. It drops everything that
//! does not change how a call site binds: the overload name, defaults,
//! alias annotations and the `...` markers.

use std::fmt::Write;

use opal_ir::FunctionSchema;

/// Render the canonical signature of `schema`.
pub fn canonical_schema_string(schema: &FunctionSchema) -> String {
    let mut out = String::with_capacity(64);
    out.push_str(schema.name().qual_str());
    out.push('(');

    let mut seen_kwarg_only = false;
    for (i, arg) in schema.arguments().iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if arg.kwarg_only && !seen_kwarg_only {
            out.push_str("*, ");
            seen_kwarg_only = true;
        }
        // Writing into a String cannot fail
        let _ = write!(out, "{} {}", arg.ty, arg.name);
    }

    out.push_str(") -> ");
    match schema.returns() {
        [] => {}
        [single] => {
            let _ = write!(out, "{}", single.ty);
        }
        returns => {
            out.push('(');
            for (i, ret) in returns.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{}", ret.ty);
            }
            out.push(')');
        }
    }
    out
}
