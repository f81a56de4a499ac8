//! Property tests for canonical signatures.
//!
//! Schemas are generated structurally and checked for:
//! 1. Determinism: canonicalizing twice gives the same string
//! 2. Keyword marker: `*, ` appears exactly once iff some argument is
//!    keyword-only, immediately before the first such argument
//! 3. Parser agreement: re-parsing the declaration yields the same canonical
//!    signature, which is what literal lookups rely on

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use opal_ir::{Argument, FunctionSchema, Return, SchemaType, Symbol};
use opal_parse::parse_schema;
use opal_registry::canonical_schema_string;
use proptest::prelude::*;

fn leaf_type() -> impl Strategy<Value = SchemaType> {
    prop::sample::select(vec!["Tensor", "int", "float", "Scalar", "str", "bool"])
        .prop_map(SchemaType::named)
}

fn schema_type() -> impl Strategy<Value = SchemaType> {
    (leaf_type(), 0u8..4).prop_map(|(ty, shape)| match shape {
        0 => ty,
        1 => ty.optional(),
        2 => ty.list(),
        _ => ty.list().optional(),
    })
}

fn argument() -> impl Strategy<Value = Argument> {
    (
        schema_type(),
        prop::string::string_regex("[a-z][a-z0-9_]{0,6}").expect("valid regex"),
        any::<bool>(),
    )
        .prop_map(|(ty, name, kwarg_only)| {
            let arg = Argument::new(name, ty);
            if kwarg_only {
                arg.kwarg_only()
            } else {
                arg
            }
        })
}

fn schema() -> impl Strategy<Value = FunctionSchema> {
    (
        prop::collection::vec(argument(), 0..6),
        prop::collection::vec(schema_type().prop_map(Return::new), 0..4),
    )
        .prop_map(|(mut arguments, returns)| {
            // Keyword-only arguments follow positional ones in a declaration
            arguments.sort_by_key(|arg| arg.kwarg_only);
            FunctionSchema::new(
                Symbol::from_qual_string("prop::op").unwrap(),
                "",
                arguments,
                returns,
            )
        })
}

proptest! {
    #[test]
    fn canonicalization_is_deterministic(schema in schema()) {
        prop_assert_eq!(canonical_schema_string(&schema), canonical_schema_string(&schema.clone()));
    }

    #[test]
    fn kwarg_marker_placement(schema in schema()) {
        let canonical = canonical_schema_string(&schema);
        let markers = canonical.matches("*, ").count();
        let first_kwarg = schema.arguments().iter().find(|arg| arg.kwarg_only);

        match first_kwarg {
            None => prop_assert_eq!(markers, 0),
            Some(arg) => {
                prop_assert_eq!(markers, 1);
                let rendered = format!("*, {} {}", arg.ty, arg.name);
                prop_assert!(canonical.contains(&rendered), "{} lacks {}", canonical, rendered);
            }
        }
    }

    #[test]
    fn parsed_declaration_has_same_canonical_form(schema in schema()) {
        let reparsed = parse_schema(&schema.to_string()).unwrap();
        prop_assert_eq!(canonical_schema_string(&reparsed), canonical_schema_string(&schema));
    }
}
