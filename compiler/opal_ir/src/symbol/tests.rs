#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn same_string_same_symbol() {
    let a = Symbol::from_qual_string("aten::mul").unwrap();
    let b = Symbol::from_qual_string("aten::mul").unwrap();
    let c = Symbol::from_qual_string("aten::div").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn components() {
    let sym = Symbol::from_qual_string("prim::TupleUnpack").unwrap();
    assert_eq!(sym.qual_str(), "prim::TupleUnpack");
    assert_eq!(sym.namespace(), "prim");
    assert_eq!(sym.base(), "TupleUnpack");
    assert_eq!(sym.to_string(), "prim::TupleUnpack");
}

#[test]
fn rejects_unqualified() {
    assert_eq!(
        Symbol::from_qual_string("add"),
        Err(SymbolError::NotQualified("add".to_owned()))
    );
    assert!(matches!(
        Symbol::from_qual_string("::add"),
        Err(SymbolError::EmptyComponent(_))
    ));
    assert!(matches!(
        Symbol::from_qual_string("aten::"),
        Err(SymbolError::EmptyComponent(_))
    ));
    assert!(matches!(
        Symbol::from_qual_string("a::b::c"),
        Err(SymbolError::NestedSeparator(_))
    ));
}

#[test]
fn operator_name_parse() {
    let plain = OperatorName::parse("foo::bar").unwrap();
    assert_eq!(plain.name.qual_str(), "foo::bar");
    assert_eq!(&*plain.overload_name, "");
    assert_eq!(plain.to_string(), "foo::bar");

    let overloaded = OperatorName::parse("foo::bar.other").unwrap();
    assert_eq!(overloaded.name, plain.name);
    assert_eq!(&*overloaded.overload_name, "other");
    assert_eq!(overloaded.to_string(), "foo::bar.other");
}

#[test]
fn operator_name_parse_rejects_bad_symbol() {
    assert!(OperatorName::parse("bar.other").is_err());
}

#[test]
fn nested_separator_message_names_the_problem() {
    let err = Symbol::from_qual_string("aten::linalg::norm").unwrap_err();
    assert_eq!(err.to_string(), "`aten::linalg::norm` has more than one `::` separator");
}
