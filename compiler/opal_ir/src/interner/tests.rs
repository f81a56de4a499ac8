#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;

#[test]
fn intern_and_lookup() {
    let interner = StringInterner::new();

    let add = interner.try_intern("aten::add").unwrap();
    let sub = interner.try_intern("aten::sub").unwrap();
    let add2 = interner.try_intern("aten::add").unwrap();

    assert_eq!(add, add2);
    assert_ne!(add, sub);
    assert_eq!(interner.lookup(add), "aten::add");
    assert_eq!(interner.lookup(sub), "aten::sub");
}

#[test]
fn empty_string_is_name_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.try_intern("").unwrap(), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn namespaces_are_pre_interned() {
    let interner = StringInterner::new();
    assert_eq!(interner.len(), 4);
    for ns in ["prim", "aten", "onnx"] {
        interner.try_intern(ns).unwrap();
    }
    assert_eq!(interner.len(), 4);
}

#[test]
fn reinterning_does_not_grow() {
    let interner = StringInterner::new();
    let before = interner.len();
    let first = interner.try_intern("foo::bar").unwrap();
    let second = interner.try_intern("foo::bar").unwrap();
    assert_eq!(first, second);
    assert_eq!(interner.len(), before + 1);
}

#[test]
fn name_layout_splits_shard_and_local() {
    let name = Name::new(5, 1000);
    assert_eq!(name.shard(), 5);
    assert_eq!(name.local(), 1000);
    assert_eq!(format!("{name:?}"), "Name(5:1000)");
    assert_eq!(Name::EMPTY.shard(), 0);
    assert_eq!(Name::EMPTY.local(), 0);
}

#[test]
fn interned_names_land_in_their_shard() {
    let interner = StringInterner::new();
    let name = interner.try_intern("aten::relu").unwrap();
    assert_eq!(name.shard(), StringInterner::shard_for("aten::relu"));
}

#[test]
fn concurrent_interning_agrees() {
    let interner = StringInterner::new();
    let names: Vec<Vec<Name>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    (0..64)
                        .map(|i| interner.try_intern(&format!("ns::op{i}")).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for other in &names[1..] {
        assert_eq!(&names[0], other);
    }
    // 64 ops + empty + 3 namespaces
    assert_eq!(interner.len(), 68);
}
