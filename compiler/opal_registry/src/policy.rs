//! Special-case policy tables for non-schematized operators.
//!
//! An operator whose schema is var-return cannot be printed or alias-analyzed
//! from its schema, so the printer and alias analysis must each handle it by
//! name. These tables are the hand-maintained list of names they handle.
//! They are asserted, not derived: adding a name here is a promise that the
//! corresponding component has a case for it.

use std::sync::LazyLock;

use opal_ir::Symbol;
use rustc_hash::FxHashSet;

/// Non-schematized operators the printer has bespoke handling for.
///
/// WARNING: adding a name here asserts the printer has a case for it.
/// Without one, export of IR containing the operator fails.
pub const PRINTER_HANDLED: &[&str] = &[
    "prim::Constant",
    "prim::Uninitialized",
    "prim::fork",
    "prim::ListConstruct",
    "prim::DictConstruct",
    "prim::ListUnpack",
    "prim::Print",
    "prim::PythonOp",
    "prim::TupleConstruct",
    "prim::TupleIndex",
    "prim::TupleSlice",
    "prim::TupleUnpack",
    "prim::CreateObject",
    "prim::GetAttr",
    "prim::SetAttr",
    "prim::CallFunction",
    "prim::isinstance",
    "prim::unchecked_cast",
];

/// Operators that never reach the printer: export-target specific, or only
/// introduced by optimization passes after the export boundary.
pub const PRINTER_UNNEEDED: &[&str] = &[
    "onnx::Reshape",            // onnx export only
    "onnx::Shape",              // onnx export only
    "prim::AutogradZero",       // inserted temporarily by autograd
    "prim::AutogradAnyNonZero", // inserted temporarily by autograd
    "prim::AutogradAdd",        // inserted temporarily by autograd
    "prim::ConstantChunk",
    "prim::DifferentiableGraph",
    "prim::BroadcastSizes", // fuser
    "prim::ChunkSizes",     // fuser
    "prim::Drop",           // interpreter only
    "prim::FusedConcat",
    "prim::FusionGroup",
    "prim::Load", // interpreter only
    "prim::MMTreeReduce",
    "prim::MMBatchSide",
    "prim::Store",   // interpreter only
    "prim::profile", // interpreter only
];

/// Namespaces whose operators must be printable unless listed in
/// [`PRINTER_UNNEEDED`]. Operators elsewhere are not the printer's concern.
///
/// `test` is held to the same rule so registration checks can be exercised
/// without touching the IR's own namespaces.
pub const PRINTER_REQUIRED_NAMESPACES: &[&str] = &["prim", "aten", "onnx", "test"];

/// Non-schematized operators alias analysis has bespoke handling for.
///
/// WARNING: adding a name here asserts alias analysis has a case for it.
pub const ALIAS_ANALYSIS_HANDLED: &[&str] = &[
    "prim::If",
    "prim::Loop",
    "prim::FusionGroup",
    "prim::DifferentiableGraph",
    "prim::Constant",
    "prim::Uninitialized",
    "prim::DictConstruct",
    "prim::ListConstruct",
    "prim::TupleConstruct",
    "prim::AutogradZero",
    "prim::FusedConcat",
    "prim::GradOf",
    "prim::MMTreeReduce",
    "prim::MMBatchSide",
    "prim::BroadcastSizes",
    "prim::ChunkSizes",
    "prim::Function",
    "prim::TupleUnpack",
    "prim::TupleIndex",
    "prim::TupleSlice",
    "prim::ListUnpack",
    "prim::PythonOp",
    "prim::ConstantChunk",
    "prim::BroadcastingChunk",
    "prim::fork",
    "prim::CreateObject",
    "prim::AutogradAdd",
    "prim::GetAttr",
    "prim::SetAttr",
    "prim::profile",
    "prim::Print",
    "prim::CallFunction",
    "prim::CallMethod",
    "aten::wait",
    "prim::isinstance",
    "prim::unchecked_cast",
];

/// Operators alias analysis must never see.
pub const ALIAS_ANALYSIS_UNHANDLED: &[&str] = &[
    "prim::Load",
    "prim::Store",
    "prim::Drop",
    "onnx::Reshape",
    "onnx::Shape",
    "prim::AutogradAdd",
];

struct PolicySets {
    printer_handled: FxHashSet<&'static str>,
    printer_unneeded: FxHashSet<&'static str>,
    printer_required_namespaces: FxHashSet<&'static str>,
    alias_analysis: FxHashSet<&'static str>,
}

static POLICY: LazyLock<PolicySets> = LazyLock::new(|| PolicySets {
    printer_handled: PRINTER_HANDLED.iter().copied().collect(),
    printer_unneeded: PRINTER_UNNEEDED.iter().copied().collect(),
    printer_required_namespaces: PRINTER_REQUIRED_NAMESPACES.iter().copied().collect(),
    alias_analysis: ALIAS_ANALYSIS_HANDLED
        .iter()
        .chain(ALIAS_ANALYSIS_UNHANDLED)
        .copied()
        .collect(),
});

/// Does the printer cope with `symbol` without a schema?
pub fn printer_has_special_case_for(symbol: Symbol) -> bool {
    let policy = &*POLICY;
    let qual = symbol.qual_str();
    policy.printer_handled.contains(qual)
        || policy.printer_unneeded.contains(qual)
        || !policy
            .printer_required_namespaces
            .contains(symbol.namespace())
}

/// Does alias analysis handle `symbol` by name (or deliberately skip it)?
pub fn alias_analysis_has_special_case_for(symbol: Symbol) -> bool {
    POLICY.alias_analysis.contains(symbol.qual_str())
}
