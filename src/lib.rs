//! A doubly linked list, and move-only holders that run a cleanup hook exactly once.
//!
//! `DLList` is `O(1)` at both ends, and iterates in either direction.
//! `UniqueHolder` owns one heap value and calls [`Destroy::destroy`] on it when ownership ends;
//! `VirtualUniqueHolder` does the same behind a trait object.
//!
//! ## Example
//!
//! ```rust
//! use dllist::{DLList, Destroy, UniqueHolder};
//!
//! let mut preds: DLList<Box<dyn Fn(i32) -> bool>> = DLList::new();
//!
//! preds.emplace_back(Box::new(|x| x % 2 == 0));
//! preds.emplace_back(Box::new(|x| x % 3 == 0));
//! preds.emplace_back(Box::new(|x| x % 5 == 0));
//!
//! assert!(preds.iter().any(|p| p(9)));
//! assert!(!preds.iter().any(|p| p(7)));
//!
//! preds.pop_back();
//! preds.pop_front();
//!
//! let last = preds.pop_back().unwrap();
//! assert!(last(3));
//! assert!(preds.is_empty());
//!
//! struct Conn(bool);
//! impl Destroy for Conn {
//! 	fn destroy(&mut self) { self.0 = false; }
//! }
//!
//! let mut conn = UniqueHolder::make(Conn(true));
//! let moved = conn.take();
//!
//! assert!(conn.is_empty());
//! assert!(moved.0);
//! ```

#![allow(forbidden_lint_groups)]
#![forbid(clippy::all)]

macro_rules! trace {
	($($arg:tt)*) => {{
		#[cfg(feature = "log")]
		log::trace!($($arg)*);
	}};
}

mod error;
pub use error::{Error, Result};

mod list;
pub use list::{DLList, Cursor, Iter, IterMut, IntoIter};

mod holder;
pub use holder::{Destroy, Resource, Upcast, UniqueHolder, VirtualUniqueHolder};
