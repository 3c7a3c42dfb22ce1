// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Soundness check for the stats evaluation substrate: a predicate's
//! `test_stats` must never reject a batch that actually contains a
//! matching row. Stats pruning may be conservative (false positives are
//! fine, that's why it's a "could match"), but a false negative would
//! silently drop real rows from a scan.

use strata_query::{ColumnStats, Leaf, Literal, Op, Predicate};
use strata_row::BinaryRowWriter;
use strata_type::PhysicalType;

fn stats_over(values: &[i32]) -> strata_query::StatsSummary {
    let mut s = ColumnStats::new(PhysicalType::Int);
    for v in values {
        s.collect(Some(&Literal::I32(*v)));
    }
    s.summary()
}

fn row_with(value: i32) -> strata_row::BinaryRow {
    let mut w = BinaryRowWriter::new(1);
    w.write_i32(0, value);
    w.complete()
}

fn leaf(op: Op, literals: Vec<Literal>) -> Predicate {
    Predicate::Leaf(Leaf::new(0, PhysicalType::Int, op, literals))
}

#[test]
fn every_matching_row_implies_the_column_stats_say_could_match() {
    let values = [5, 1, 9, 3, 7, 2, 8];
    let stats = stats_over(&values);

    let predicates = [
        leaf(Op::Equal, vec![Literal::I32(7)]),
        leaf(Op::NotEqual, vec![Literal::I32(7)]),
        leaf(Op::LessThan, vec![Literal::I32(3)]),
        leaf(Op::LessOrEqual, vec![Literal::I32(3)]),
        leaf(Op::GreaterThan, vec![Literal::I32(7)]),
        leaf(Op::GreaterOrEqual, vec![Literal::I32(7)]),
        leaf(Op::In, vec![Literal::I32(2), Literal::I32(40)]),
        leaf(Op::NotIn, vec![Literal::I32(5), Literal::I32(1)]),
        leaf(Op::Between, vec![Literal::I32(2), Literal::I32(4)]),
    ];

    for p in predicates {
        let any_row_matches = values.iter().any(|&v| p.test_row(&row_with(v)).unwrap());
        let could_match = p.test_stats(std::slice::from_ref(&stats), values.len() as u64).unwrap();
        assert!(
            !any_row_matches || could_match,
            "predicate had a matching row but stats said it could not match: {p:?}"
        );
    }
}

#[test]
fn single_value_column_is_sound_for_equality_and_not_equal() {
    let stats = stats_over(&[42]);

    let eq = leaf(Op::Equal, vec![Literal::I32(42)]);
    assert!(eq.test_stats(std::slice::from_ref(&stats), 1).unwrap());

    let eq_miss = leaf(Op::Equal, vec![Literal::I32(7)]);
    assert!(!eq_miss.test_stats(std::slice::from_ref(&stats), 1).unwrap());
}

#[test]
fn and_of_sound_leaves_is_itself_sound() {
    let values = [5, 1, 9, 3, 7];
    let stats = stats_over(&values);
    let p = Predicate::and(vec![
        leaf(Op::GreaterOrEqual, vec![Literal::I32(3)]),
        leaf(Op::LessOrEqual, vec![Literal::I32(7)]),
    ])
    .unwrap();

    let any_row_matches = values.iter().any(|&v| p.test_row(&row_with(v)).unwrap());
    let could_match = p.test_stats(std::slice::from_ref(&stats), values.len() as u64).unwrap();
    assert!(!any_row_matches || could_match);
}
