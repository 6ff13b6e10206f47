#![allow(dead_code)]

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Route `log` records through the test harness' captured output.
pub fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}

/// A shared counter for counting drops and cleanup calls.
#[derive(Clone, Default)]
pub struct Counter(Rc<Cell<usize>>);

impl Counter {
	pub fn bump(&self) {
		self.0.set(self.0.get() + 1);
	}

	pub fn get(&self) -> usize {
		self.0.get()
	}
}

impl fmt::Debug for Counter {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.get())
	}
}
