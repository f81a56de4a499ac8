#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;

fn sym(s: &str) -> Symbol {
    Symbol::from_qual_string(s).unwrap()
}

#[test]
fn exact_within_cutoff() {
    assert_eq!(edit_distance_bounded("", "", 2), 0);
    assert_eq!(edit_distance_bounded("add", "add", 2), 0);
    assert_eq!(edit_distance_bounded("add", "adx", 2), 1);
    assert_eq!(edit_distance_bounded("add", "ad", 2), 1);
    assert_eq!(edit_distance_bounded("ad", "add", 2), 1);
    assert_eq!(edit_distance_bounded("", "ab", 2), 2);
    assert_eq!(edit_distance_bounded("kitten", "sitting", 3), 3);
}

#[test]
fn beyond_cutoff_reports_more_than_cutoff() {
    assert!(edit_distance_bounded("kitten", "sitting", 2) > 2);
    assert!(edit_distance_bounded("foo::adx", "foo::multiply", 2) > 2);
    assert!(edit_distance_bounded("abc", "xyz", 0) > 0);
}

#[test]
fn counts_chars_not_bytes() {
    assert_eq!(edit_distance_bounded("héllo", "hello", 2), 1);
    assert_eq!(edit_distance_bounded("日本語", "日本", 2), 1);
}

#[test]
fn rank_filters_by_cutoff() {
    let ranked = rank_similar(
        sym("foo::adx"),
        [sym("foo::add"), sym("foo::sub"), sym("foo::multiply")],
        DEFAULT_MAX_EDIT_DISTANCE,
    );
    assert_eq!(ranked, vec![sym("foo::add")]);
}

#[test]
fn rank_orders_by_distance_then_input_order() {
    let ranked = rank_similar(
        sym("foo::abc"),
        [sym("foo::xbx"), sym("foo::abd"), sym("foo::abc"), sym("foo::abe")],
        2,
    );
    assert_eq!(
        ranked,
        vec![sym("foo::abc"), sym("foo::abd"), sym("foo::abe"), sym("foo::xbx")]
    );
}

#[test]
fn rank_empty_when_nothing_close() {
    assert!(rank_similar(sym("foo::zzzzzz"), [sym("bar::add")], 2).is_empty());
    assert!(rank_similar(sym("foo::add"), Vec::new(), 2).is_empty());
}
