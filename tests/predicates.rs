mod common;

use common::init_logger;
use dllist::DLList;

type Predicate = Box<dyn Fn(i32) -> bool>;

fn divisibility_chain() -> DLList<Predicate> {
	let mut preds: DLList<Predicate> = DLList::new();

	preds.emplace_back(Box::new(|x| x % 2 == 0));
	preds.emplace_back(Box::new(|x| x % 3 == 0));
	preds.emplace_back(Box::new(|x| x % 5 == 0));
	preds
}

/// Evaluate in insertion order, stopping at the first predicate that holds.
fn first_match(preds: &DLList<Predicate>, input: i32) -> bool {
	let mut result = false;

	for pred in preds {
		result = pred(input);
		if result { break; }
	}

	result
}

#[test]
fn first_match_agrees_with_direct_evaluation() {
	init_logger();
	let preds = divisibility_chain();

	for i in 0..32 {
		assert_eq!(first_match(&preds, i), i % 2 == 0 || i % 3 == 0 || i % 5 == 0, "input {i}");
	}
}

#[test]
fn cursor_walk_agrees_with_iteration() {
	let preds = divisibility_chain();

	for i in 0..32 {
		let mut cursor = preds.cursor_front();
		let mut result = cursor(i);

		while !result && cursor.advance() {
			result = cursor(i);
		}

		assert_eq!(result, first_match(&preds, i));
	}
}

#[test]
fn middle_predicate_survives_both_pops() {
	init_logger();
	let mut preds = divisibility_chain();

	assert!(preds.pop_back().is_some());
	assert!(preds.pop_front().is_some());
	assert_eq!(preds.len(), 1);

	let survivor = preds.pop_back().unwrap();
	assert!(preds.is_empty());

	assert!(survivor(3));
	assert!(!survivor(2));
	assert!(!survivor(5));
}
