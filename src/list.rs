use std::fmt::{self, Debug};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::mem;

use crate::{Error, Result};

/// A doubly linked list. The `DLList` owns every node; `head` and `tail` are kept alongside the length,
/// so the stack size is 3 words and each element is 2 words + element size.
pub struct DLList<T> {
	head: Option<NonNull<Node<T>>>,
	tail: Option<NonNull<Node<T>>>,
	len:  usize,
	_boo: PhantomData<Box<Node<T>>>,
}

struct Node<T> {
	next: Option<NonNull<Node<T>>>,
	prev: Option<NonNull<Node<T>>>,
	elem: T,
}

impl<T> Node<T> {
	fn new_nonnull(elem: T) -> NonNull<Self> {
		NonNull::from(Box::leak(Box::new(Self {
			next: None,
			prev: None,
			elem,
		})))
	}
}

unsafe impl<T: Send> Send for DLList<T> {}
unsafe impl<T: Sync> Sync for DLList<T> {}

impl<T> DLList<T> {
	/// Create a new empty list. `O(1)`.
	/// Does not allocate any memory.
	/// ```
	/// # use dllist::DLList;
	/// let list: DLList<u8> = DLList::new();
	/// assert_eq!(list.len(), 0);
	/// ```
	#[inline]
	pub const fn new() -> Self {
		Self {
			head: None,
			tail: None,
			len:  0,
			_boo: PhantomData,
		}
	}

	/// Link an element in as the new tail. `O(1)`.
	/// Returns a mut ref to the element in its new home.
	/// ```
	/// # use dllist::DLList;
	/// let mut list = DLList::new();
	/// list.emplace_back(1);
	/// list.emplace_back(2);
	/// *list.emplace_back(3) += 10;
	///
	/// assert_eq!(format!("{:?}", list), "[1, 2, 13]");
	/// ```
	pub fn emplace_back(&mut self, elem: T) -> &mut T {
		let mut new = Node::new_nonnull(elem);

		unsafe {
			match self.tail {
				Some(mut tail) => {
					tail.as_mut().next = Some(new);
					new.as_mut().prev  = Some(tail);
				},
				None => self.head = Some(new),
			}
		}

		self.tail = Some(new);
		self.len += 1;
		trace!("dllist: linked tail, len {}", self.len);

		unsafe { &mut (*new.as_ptr()).elem }
	}

	/// Link an element in as the new head. `O(1)`.
	/// Returns a mut ref to the element in its new home.
	/// ```
	/// # use dllist::DLList;
	/// let mut list = DLList::new();
	/// list.emplace_front(1);
	/// list.emplace_front(2);
	/// list.emplace_front(3);
	///
	/// assert_eq!(format!("{:?}", list), "[3, 2, 1]");
	/// ```
	pub fn emplace_front(&mut self, elem: T) -> &mut T {
		let mut new = Node::new_nonnull(elem);

		unsafe {
			match self.head {
				Some(mut head) => {
					head.as_mut().prev = Some(new);
					new.as_mut().next  = Some(head);
				},
				None => self.tail = Some(new),
			}
		}

		self.head = Some(new);
		self.len += 1;
		trace!("dllist: linked head, len {}", self.len);

		unsafe { &mut (*new.as_ptr()).elem }
	}

	/// Build the element with `f` and link it in as the new tail. `O(1)`.
	/// ```
	/// # use dllist::DLList;
	/// let mut list = DLList::new();
	/// list.emplace_back_with(|| String::from("tail"));
	/// assert_eq!(list.back().map(String::as_str), Some("tail"));
	/// ```
	#[inline]
	pub fn emplace_back_with<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
		self.emplace_back(f())
	}

	/// Build the element with `f` and link it in as the new head. `O(1)`.
	/// ```
	/// # use dllist::DLList;
	/// let mut list = DLList::from([String::from("tail")]);
	/// list.emplace_front_with(|| String::from("head"));
	/// assert_eq!(list.front().map(String::as_str), Some("head"));
	/// assert_eq!(list.len(), 2);
	/// ```
	#[inline]
	pub fn emplace_front_with<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
		self.emplace_front(f())
	}

	/// Unlink the tail and return its element. `O(1)`.
	/// Returns `None` if the list is empty.
	/// ```
	/// # use dllist::DLList;
	/// let mut list = DLList::from([1, 2]);
	/// assert_eq!(list.pop_back(), Some(2));
	/// assert_eq!(list.pop_back(), Some(1));
	/// assert_eq!(list.pop_back(), None);
	/// ```
	pub fn pop_back(&mut self) -> Option<T> {
		self.tail.map(|tail| {
			let node = unsafe { Box::from_raw(tail.as_ptr()) };

			self.tail = node.prev;
			match self.tail {
				Some(mut prev) => unsafe { prev.as_mut().next = None },
				None => self.head = None,
			}

			self.len -= 1;
			trace!("dllist: unlinked tail, len {}", self.len);
			node.elem
		})
	}

	/// Unlink the head and return its element. `O(1)`.
	/// Returns `None` if the list is empty.
	/// ```
	/// # use dllist::DLList;
	/// let mut list = DLList::from([1, 2]);
	/// assert_eq!(list.pop_front(), Some(1));
	/// assert_eq!(list.pop_front(), Some(2));
	/// assert_eq!(list.pop_front(), None);
	/// ```
	pub fn pop_front(&mut self) -> Option<T> {
		self.head.map(|head| {
			let node = unsafe { Box::from_raw(head.as_ptr()) };

			self.head = node.next;
			match self.head {
				Some(mut next) => unsafe { next.as_mut().prev = None },
				None => self.tail = None,
			}

			self.len -= 1;
			trace!("dllist: unlinked head, len {}", self.len);
			node.elem
		})
	}

	/// Like [`pop_back`](Self::pop_back), but an empty list is an [`Error::EmptyContainer`].
	/// ```
	/// # use dllist::{DLList, Error};
	/// let mut list = DLList::from([7]);
	/// assert_eq!(list.try_pop_back(), Ok(7));
	/// assert_eq!(list.try_pop_back(), Err(Error::EmptyContainer));
	/// ```
	#[inline]
	pub fn try_pop_back(&mut self) -> Result<T> {
		self.pop_back().ok_or(Error::EmptyContainer)
	}

	/// Like [`pop_front`](Self::pop_front), but an empty list is an [`Error::EmptyContainer`].
	#[inline]
	pub fn try_pop_front(&mut self) -> Result<T> {
		self.pop_front().ok_or(Error::EmptyContainer)
	}

	/// Get a ref to the first element. `O(1)`.
	/// ```
	/// # use dllist::DLList;
	/// let list = DLList::from([1, 2, 3]);
	/// assert_eq!(list.front(), Some(&1));
	/// ```
	#[inline]
	pub fn front(&self) -> Option<&T> {
		self.head.map(|head| unsafe { &(*head.as_ptr()).elem })
	}

	/// Get a ref to the last element. `O(1)`.
	/// ```
	/// # use dllist::DLList;
	/// let list = DLList::from([1, 2, 3]);
	/// assert_eq!(list.back(), Some(&3));
	/// ```
	#[inline]
	pub fn back(&self) -> Option<&T> {
		self.tail.map(|tail| unsafe { &(*tail.as_ptr()).elem })
	}

	/// Get a mut ref to the first element. `O(1)`.
	#[inline]
	pub fn front_mut(&mut self) -> Option<&mut T> {
		self.head.map(|head| unsafe { &mut (*head.as_ptr()).elem })
	}

	/// Get a mut ref to the last element. `O(1)`.
	/// ```
	/// # use dllist::DLList;
	/// let mut list = DLList::from([1, 2, 3]);
	/// *list.back_mut().unwrap() = 4;
	/// assert_eq!(format!("{:?}", list), "[1, 2, 4]");
	/// ```
	#[inline]
	pub fn back_mut(&mut self) -> Option<&mut T> {
		self.tail.map(|tail| unsafe { &mut (*tail.as_ptr()).elem })
	}

	/// Get the number of elements in the list. `O(1)`.
	/// ```
	/// # use dllist::DLList;
	/// let list = DLList::from([1, 2, 3]);
	/// assert_eq!(list.len(), 3);
	/// ```
	#[inline]
	pub const fn len(&self) -> usize {
		self.len
	}

	/// Check if the list is empty. `O(1)`.
	/// ```
	/// # use dllist::DLList;
	/// let list: DLList<u8> = DLList::new();
	/// assert!(list.is_empty());
	/// ```
	#[inline]
	pub const fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Drop every element. `O(n)`.
	/// ```
	/// # use dllist::DLList;
	/// let mut list = DLList::from([1, 2, 3]);
	/// list.clear();
	/// assert!(list.is_empty());
	/// assert_eq!(list.front(), None);
	/// ```
	#[inline]
	pub fn clear(&mut self) {
		mem::drop(mem::take(self));
	}

	/// Iterate over refs to the elements, front to back (or back to front with `.rev()`).
	/// ```
	/// # use dllist::DLList;
	/// let list = DLList::from([1, 2, 3]);
	/// assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
	/// ```
	#[inline]
	pub fn iter(&self) -> Iter<'_, T> {
		Iter {
			head:  self.head,
			tail:  self.tail,
			len:   self.len,
			_list: PhantomData,
		}
	}

	/// Iterate over mut refs to the elements, in place.
	/// ```
	/// # use dllist::DLList;
	/// let mut list = DLList::from([1, 2, 3]);
	/// list.iter_mut().for_each(|elem| *elem *= 10);
	/// assert_eq!(format!("{:?}", list), "[10, 20, 30]");
	/// ```
	#[inline]
	pub fn iter_mut(&mut self) -> IterMut<'_, T> {
		IterMut {
			head:  self.head,
			tail:  self.tail,
			len:   self.len,
			_list: PhantomData,
		}
	}

	/// A cursor resting on the first element. `O(1)`.
	/// On an empty list the cursor points at nothing.
	/// ```
	/// # use dllist::DLList;
	/// let list = DLList::from([1, 2, 3]);
	/// let mut cursor = list.cursor_front();
	///
	/// assert_eq!(cursor.current(), Some(&1));
	/// assert!(cursor.advance());
	/// assert_eq!(cursor.current(), Some(&2));
	/// ```
	#[inline]
	pub fn cursor_front(&self) -> Cursor<'_, T> {
		Cursor {
			current: self.head,
			index:   0,
			_list:   PhantomData,
		}
	}

	/// A cursor resting on the last element. `O(1)`.
	/// ```
	/// # use dllist::DLList;
	/// let list = DLList::from([1, 2, 3]);
	/// let mut cursor = list.cursor_back();
	///
	/// assert_eq!(cursor.index(), 2);
	/// assert!(cursor.retreat());
	/// assert_eq!(cursor.current(), Some(&2));
	/// ```
	#[inline]
	pub fn cursor_back(&self) -> Cursor<'_, T> {
		Cursor {
			current: self.tail,
			index:   self.len.saturating_sub(1),
			_list:   PhantomData,
		}
	}
}

impl<T> Default for DLList<T> {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Clone> Clone for DLList<T> {
	/// Clone the list. `O(n)`.
	/// ```
	/// # use dllist::DLList;
	/// let list = DLList::from([1, 2, 3]);
	/// let cloned = list.clone();
	/// assert_eq!(cloned, list);
	/// ```
	fn clone(&self) -> Self {
		self.iter().cloned().collect()
	}
}

impl<T: PartialEq> PartialEq for DLList<T> {
	fn eq(&self, other: &Self) -> bool {
		self.len == other.len && self.iter().eq(other.iter())
	}
}

impl<T: Eq> Eq for DLList<T> {}

impl<T: Debug> Debug for DLList<T> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

impl<T> Drop for DLList<T> {
	/// Drop the list. `O(n)`.
	/// A panicking element does not stop the rest from being dropped.
	fn drop(&mut self) {
		struct DropGuard<'a, T>(&'a mut DLList<T>);

		impl<T> Drop for DropGuard<'_, T> {
			fn drop(&mut self) {
				while self.0.pop_front().is_some() {}
			}
		}

		trace!("dllist: dropping {} nodes", self.len);

		while let Some(elem) = self.pop_front() {
			let guard = DropGuard(self);
			mem::drop(elem);
			mem::forget(guard);
		}
	}
}

impl<T> From<Vec<T>> for DLList<T> {
	/// Create a new list from a Vec. `O(n)`.
	/// ```
	/// # use dllist::DLList;
	/// let list = DLList::from(vec![1, 2, 3]);
	/// assert_eq!(format!("{:?}", list), "[1, 2, 3]");
	/// ```
	#[inline]
	fn from(vec: Vec<T>) -> Self {
		vec.into_iter().collect()
	}
}

impl<T, const N: usize> From<[T; N]> for DLList<T> {
	/// Create a new list from an array. `O(n)`.
	#[inline]
	fn from(array: [T; N]) -> Self {
		array.into_iter().collect()
	}
}

impl<T: Clone> From<&[T]> for DLList<T> {
	/// Create a new list from a slice. `O(n)`.
	/// ```
	/// # use dllist::DLList;
	/// let array: &[u8] = &[1, 2, 3];
	/// let list = DLList::from(array);
	/// assert_eq!(format!("{:?}", list), "[1, 2, 3]");
	/// ```
	#[inline]
	fn from(slice: &[T]) -> Self {
		slice.iter().cloned().collect()
	}
}

impl<T> FromIterator<T> for DLList<T> {
	/// Create a new list from an iterator, preserving order. `O(n)`.
	/// ```
	/// # use dllist::DLList;
	/// let list = (1..=3).collect::<DLList<_>>();
	/// assert_eq!(format!("{:?}", list), "[1, 2, 3]");
	/// ```
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut list = Self::new();
		list.extend(iter);
		list
	}
}

impl<T> Extend<T> for DLList<T> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		iter.into_iter().for_each(|elem| { self.emplace_back(elem); });
	}
}


/*
* ==========================
* ===== Iteratory bits =====
* ==========================
*/

/// Iterator over refs to the elements of a `DLList`.
/// Cloning it copies the current position; `DLList::iter` always starts over at the ends.
pub struct Iter<'i, T> {
	head:  Option<NonNull<Node<T>>>,
	tail:  Option<NonNull<Node<T>>>,
	len:   usize,
	_list: PhantomData<&'i Node<T>>,
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
	#[inline]
	fn clone(&self) -> Self {
		Self { ..*self }
	}
}

impl<'i, T> Iterator for Iter<'i, T> {
	type Item = &'i T;

	#[inline]
	fn next(&mut self) -> Option<Self::Item> {
		if self.len == 0 { return None; }

		self.head.map(|head| unsafe {
			let node = &*head.as_ptr();
			self.head = node.next;
			self.len -= 1;
			&node.elem
		})
	}

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>)
		{ (self.len, Some(self.len)) }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
	#[inline]
	fn next_back(&mut self) -> Option<Self::Item> {
		if self.len == 0 { return None; }

		self.tail.map(|tail| unsafe {
			let node = &*tail.as_ptr();
			self.tail = node.prev;
			self.len -= 1;
			&node.elem
		})
	}
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over mut refs to the elements of a `DLList`.
pub struct IterMut<'i, T> {
	head:  Option<NonNull<Node<T>>>,
	tail:  Option<NonNull<Node<T>>>,
	len:   usize,
	_list: PhantomData<&'i mut Node<T>>,
}

unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'i, T> Iterator for IterMut<'i, T> {
	type Item = &'i mut T;

	#[inline]
	fn next(&mut self) -> Option<Self::Item> {
		if self.len == 0 { return None; }

		self.head.map(|head| unsafe {
			let node = &mut *head.as_ptr();
			self.head = node.next;
			self.len -= 1;
			&mut node.elem
		})
	}

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>)
		{ (self.len, Some(self.len)) }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
	#[inline]
	fn next_back(&mut self) -> Option<Self::Item> {
		if self.len == 0 { return None; }

		self.tail.map(|tail| unsafe {
			let node = &mut *tail.as_ptr();
			self.tail = node.prev;
			self.len -= 1;
			&mut node.elem
		})
	}
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator, internally just `pop_front`/`pop_back`.
/// ```
/// # use dllist::DLList;
/// let list = DLList::from([1, 2, 3]);
///
/// // list moved
/// let num = list.into_iter().fold(0, |acc, elem| acc + elem);
/// assert_eq!(num, 6);
/// ```
pub struct IntoIter<T> {
	list: DLList<T>,
}

impl<T> Iterator for IntoIter<T> {
	type Item = T;

	#[inline]
	fn next(&mut self) -> Option<Self::Item> {
		self.list.pop_front()
	}

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>)
		{ (self.list.len, Some(self.list.len)) }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
	#[inline]
	fn next_back(&mut self) -> Option<Self::Item> {
		self.list.pop_back()
	}
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for DLList<T> {
	type Item = T;
	type IntoIter = IntoIter<T>;

	#[inline]
	fn into_iter(self) -> Self::IntoIter {
		IntoIter { list: self }
	}
}

impl<'i, T> IntoIterator for &'i DLList<T> {
	type Item = &'i T;
	type IntoIter = Iter<'i, T>;

	#[inline]
	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'i, T> IntoIterator for &'i mut DLList<T> {
	type Item = &'i mut T;
	type IntoIter = IterMut<'i, T>;

	#[inline]
	fn into_iter(self) -> Self::IntoIter {
		self.iter_mut()
	}
}


/*
* =======================
* ===== Cursor bits =====
* =======================
*/

/// A position inside a `DLList`.
/// Steps in either direction without touching the list.
///
/// The cursor borrows the list, so the node it rests on cannot be unlinked while it is alive.
/// ```
/// # use dllist::DLList;
/// let list = DLList::from([1, 2, 3]);
/// let mut cursor = list.cursor_front();
///
/// assert_eq!(cursor.next(), Some(&1));
/// assert_eq!(cursor.next(), Some(&2));
/// assert_eq!(cursor.current(), Some(&3));
/// ```
pub struct Cursor<'i, T> {
	current: Option<NonNull<Node<T>>>,
	index:   usize,
	_list:   PhantomData<&'i T>,
}

unsafe impl<T: Sync> Send for Cursor<'_, T> {}
unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

impl<T> Clone for Cursor<'_, T> {
	#[inline]
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for Cursor<'_, T> {}

impl<'i, T> Iterator for Cursor<'i, T> {
	type Item = &'i T;

	/// Yield the current element and step past it.
	/// Once past the back, the cursor points at nothing.
	#[inline]
	fn next(&mut self) -> Option<Self::Item> {
		self.current.map(|c| unsafe {
			let node = &*c.as_ptr();
			self.current = node.next;
			self.index += 1;
			&node.elem
		})
	}
}

impl<'i, T> Cursor<'i, T> {
	/// Get a ref to the current element. `O(1)`.
	/// ```
	/// # use dllist::DLList;
	/// let list: DLList<u8> = DLList::new();
	/// assert_eq!(list.cursor_front().current(), None);
	/// ```
	#[inline]
	pub fn current(&self) -> Option<&'i T> {
		self.current.map(|c| unsafe { &(*c.as_ptr()).elem })
	}

	/// Get the index of the cursor. `O(1)`.
	#[inline]
	pub const fn index(&self) -> usize {
		self.index
	}

	/// Move the cursor one step forward. `O(1)`.
	/// Returns `false` if the cursor could not be moved.
	/// ```
	/// # use dllist::DLList;
	/// let list = DLList::from([1, 2]);
	/// let mut cursor = list.cursor_front();
	///
	/// assert!(cursor.advance());
	/// assert!(!cursor.advance());
	/// assert_eq!(cursor.current(), Some(&2));
	/// ```
	#[inline]
	#[must_use]
	pub fn advance(&mut self) -> bool {
		self.current.and_then(|c| unsafe { c.as_ref().next }).map(|next| {
				self.current = Some(next);
				self.index += 1; })
			.is_some()
	}

	/// Move the cursor one step backward. `O(1)`.
	/// Returns `false` if the cursor could not be moved.
	#[inline]
	#[must_use]
	pub fn retreat(&mut self) -> bool {
		self.current.and_then(|c| unsafe { c.as_ref().prev }).map(|prev| {
				self.current = Some(prev);
				self.index -= 1; })
			.is_some()
	}

	/// Peek at the element after the cursor. `O(1)`.
	/// ```
	/// # use dllist::DLList;
	/// let list = DLList::from([1, 2]);
	/// let cursor = list.cursor_front();
	/// assert_eq!(cursor.peek_next(), Some(&2));
	/// assert_eq!(cursor.peek_prev(), None);
	/// ```
	#[inline]
	pub fn peek_next(&self) -> Option<&'i T> {
		self.current
			.and_then(|c| unsafe { c.as_ref().next })
			.map(|n| unsafe { &(*n.as_ptr()).elem })
	}

	/// Peek at the element before the cursor. `O(1)`.
	#[inline]
	pub fn peek_prev(&self) -> Option<&'i T> {
		self.current
			.and_then(|c| unsafe { c.as_ref().prev })
			.map(|p| unsafe { &(*p.as_ptr()).elem })
	}
}

impl<T> std::ops::Deref for Cursor<'_, T> {
	type Target = T;

	/// # Panics
	/// Panics if the cursor points at nothing.
	#[inline]
	fn deref(&self) -> &Self::Target {
		self.current().unwrap_or_else(|| panic!("cursor does not point at an element"))
	}
}

impl<T: Debug> Debug for Cursor<'_, T> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}: {:?}", self.index, self.current())
	}
}
