mod common;

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};

use common::{init_logger, Counter};
use dllist::{DLList, Error};

struct Dropper(Counter);

impl Drop for Dropper {
	fn drop(&mut self) {
		self.0.bump();
	}
}

/// Panics on drop when armed, counting every drop either way.
struct Bomb {
	armed: bool,
	drops: Counter,
}

impl Drop for Bomb {
	fn drop(&mut self) {
		self.drops.bump();
		if self.armed { panic!("bomb went off"); }
	}
}

#[test]
fn new_list_is_empty() {
	init_logger();
	let list: DLList<i32> = DLList::new();

	assert!(list.is_empty());
	assert_eq!(list.len(), 0);
	assert_eq!(list.front(), None);
	assert_eq!(list.back(), None);
	assert_eq!(list.iter().next(), None);
}

#[test]
fn from_sequence_keeps_order() {
	init_logger();
	let mut list = DLList::from([1, 2, 3, 4]);

	assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
	assert_eq!(list.pop_back(), Some(4));
	assert_eq!(list.pop_back(), Some(3));
	assert_eq!(list.pop_back(), Some(2));
	assert_eq!(list.pop_back(), Some(1));
	assert_eq!(list.pop_back(), None);
}

#[test]
fn pop_on_empty_never_yields_a_value() {
	init_logger();
	let mut list: DLList<String> = DLList::new();

	for _ in 0..3 {
		assert_eq!(list.pop_back(), None);
		assert_eq!(list.pop_front(), None);
		assert_eq!(list.try_pop_back(), Err(Error::EmptyContainer));
		assert_eq!(list.try_pop_front(), Err(Error::EmptyContainer));
	}

	list.emplace_back("one".to_owned());
	assert_eq!(list.try_pop_front().as_deref(), Ok("one"));
	assert_eq!(list.try_pop_front(), Err(Error::EmptyContainer));
	assert_eq!(list.len(), 0);
}

#[test]
fn mixed_operations_match_a_deque() {
	init_logger();
	let mut list  = DLList::new();
	let mut model = VecDeque::new();
	let mut seed  = 0x2545_f491_u32;
	let mut pushes = 0_usize;
	let mut pops   = 0_usize;

	for i in 0..2_000 {
		seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);

		match (seed >> 16) % 4 {
			0 => { list.emplace_back(i);  model.push_back(i);  pushes += 1; },
			1 => { list.emplace_front(i); model.push_front(i); pushes += 1; },
			2 => {
				let popped = list.pop_back();
				assert_eq!(popped, model.pop_back());
				pops += popped.is_some() as usize;
			},
			_ => {
				let popped = list.pop_front();
				assert_eq!(popped, model.pop_front());
				pops += popped.is_some() as usize;
			},
		}

		assert_eq!(list.len(), pushes - pops);
		assert_eq!(list.front(), model.front());
		assert_eq!(list.back(), model.back());
	}

	assert!(list.iter().eq(model.iter()));
	assert!(list.iter().rev().eq(model.iter().rev()));
}

#[test]
fn both_directions_agree() {
	init_logger();
	let mut list = DLList::new();
	list.emplace_front(2);
	list.emplace_back(3);
	list.emplace_front(1);
	list.emplace_back(4);

	let forward  = list.iter().copied().collect::<Vec<_>>();
	let mut back = list.iter().rev().copied().collect::<Vec<_>>();
	back.reverse();

	assert_eq!(forward, vec![1, 2, 3, 4]);
	assert_eq!(forward, back);

	let mut iter = list.iter();
	assert_eq!(iter.len(), 4);
	assert_eq!(iter.next(), Some(&1));
	assert_eq!(iter.next_back(), Some(&4));
	assert_eq!(iter.next(), Some(&2));
	assert_eq!(iter.next_back(), Some(&3));
	assert_eq!(iter.next(), None);
	assert_eq!(iter.next_back(), None);
}

#[test]
fn iteration_is_restartable() {
	let list = DLList::from(vec!['a', 'b', 'c']);
	let iter = list.iter();

	assert_eq!(iter.clone().collect::<String>(), "abc");
	assert_eq!(iter.collect::<String>(), "abc");
	assert_eq!(list.iter().collect::<String>(), "abc");
}

#[test]
fn elements_are_mutated_in_place() {
	init_logger();
	let mut list = DLList::from([1, 2, 3]);

	for elem in &mut list {
		*elem *= 2;
	}
	*list.front_mut().unwrap() += 100;

	assert_eq!(format!("{list:?}"), "[102, 4, 6]");
}

#[test]
fn cursor_walks_both_ways() {
	let list = DLList::from([10, 20, 30]);
	let mut cursor = list.cursor_front();

	assert_eq!(*cursor, 10);
	assert!(cursor.advance());
	assert!(cursor.advance());
	assert!(!cursor.advance());
	assert_eq!(cursor.index(), 2);
	assert_eq!(cursor.current(), Some(&30));

	assert!(cursor.retreat());
	assert_eq!(cursor.peek_prev(), Some(&10));
	assert_eq!(cursor.peek_next(), Some(&30));

	let back = list.cursor_back();
	assert_eq!(back.current(), list.back());

	let empty: DLList<u8> = DLList::new();
	let mut cursor = empty.cursor_back();
	assert_eq!(cursor.current(), None);
	assert!(!cursor.advance());
	assert!(!cursor.retreat());
}

#[test]
fn owned_iteration_moves_elements_out() {
	let list = DLList::from(vec![String::from("x"), String::from("y"), String::from("z")]);
	let mut iter = list.into_iter();

	assert_eq!(iter.len(), 3);
	assert_eq!(iter.next_back().as_deref(), Some("z"));
	assert_eq!(iter.collect::<Vec<_>>(), vec!["x", "y"]);
}

#[test]
fn move_only_elements() {
	init_logger();
	let mut list: DLList<Box<dyn FnMut() -> u32>> = DLList::new();
	list.emplace_back_with(|| -> Box<dyn FnMut() -> u32> {
		let mut calls = 0;
		Box::new(move || { calls += 1; calls })
	});
	list.emplace_front(Box::new(|| 0));

	let counter = &mut **list.back_mut().unwrap();
	assert_eq!(counter(), 1);
	assert_eq!(counter(), 2);

	let mut taken = list.pop_back().unwrap();
	assert_eq!(taken(), 3);
	assert_eq!(list.len(), 1);
}

#[test]
fn every_node_is_dropped_once() {
	init_logger();
	let drops = Counter::default();

	{
		let mut list = DLList::new();
		for _ in 0..5 {
			list.emplace_back(Dropper(drops.clone()));
		}
		list.emplace_front(Dropper(drops.clone()));

		drop(list.pop_front());
		assert_eq!(drops.get(), 1);
		assert_eq!(list.len(), 5);
	}

	assert_eq!(drops.get(), 6);
}

#[test]
fn clear_drops_everything_and_list_stays_usable() {
	let drops = Counter::default();
	let mut list = (0..4).map(|_| Dropper(drops.clone())).collect::<DLList<_>>();

	list.clear();
	assert_eq!(drops.get(), 4);
	assert!(list.is_empty());

	list.emplace_back(Dropper(drops.clone()));
	assert_eq!(list.len(), 1);
	drop(list);
	assert_eq!(drops.get(), 5);
}

#[test]
fn clone_and_compare() {
	let list: DLList<_> = "dllist".chars().collect();
	let mut other = list.clone();

	assert_eq!(list, other);
	other.pop_back();
	assert_ne!(list, other);

	let mut extended = other.clone();
	extended.extend(['t']);
	assert_eq!(extended, list);
}

#[test]
fn panicking_element_does_not_leak_the_rest() {
	init_logger();
	let drops = Counter::default();

	let mut list = DLList::new();
	list.emplace_back(Bomb { armed: true,  drops: drops.clone() });
	list.emplace_back(Bomb { armed: false, drops: drops.clone() });
	list.emplace_back(Bomb { armed: false, drops: drops.clone() });

	let result = panic::catch_unwind(AssertUnwindSafe(move || drop(list)));

	assert!(result.is_err());
	assert_eq!(drops.get(), 3);
}

#[test]
fn panicking_element_in_the_middle_does_not_leak_the_rest() {
	let drops = Counter::default();

	let list = (0..5)
		.map(|i| Bomb { armed: i == 2, drops: drops.clone() })
		.collect::<DLList<_>>();

	let result = panic::catch_unwind(AssertUnwindSafe(move || drop(list)));

	assert!(result.is_err());
	assert_eq!(drops.get(), 5);
}
