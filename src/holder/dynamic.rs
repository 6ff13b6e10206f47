use std::fmt::{self, Debug};

use super::{Destroy, UniqueHolder};
use crate::Result;

/// The capability set a value needs to live behind a [`VirtualUniqueHolder`].
/// Both hooks dispatch to the concrete type, whatever the holder is declared over.
pub trait Resource: Destroy {
	/// Read-only check of the value's state.
	fn is_valid(&self) -> bool;
}

/// Turn a boxed concrete type into a boxed `B`.
///
/// Every `Resource + 'static` type already converts into `dyn Resource`.
/// For a base trait of your own, implement this for each concrete type:
/// ```
/// # use dllist::{Destroy, Resource, Upcast, VirtualUniqueHolder};
/// trait Shape: Resource { fn area(&self) -> f64; }
///
/// struct Square(f64);
/// impl Destroy for Square { fn destroy(&mut self) {} }
/// impl Resource for Square { fn is_valid(&self) -> bool { self.0 >= 0.0 } }
/// impl Shape for Square { fn area(&self) -> f64 { self.0 * self.0 } }
///
/// impl Upcast<dyn Shape> for Square {
/// 	fn upcast(self: Box<Self>) -> Box<dyn Shape> { self }
/// }
///
/// let shape = VirtualUniqueHolder::<dyn Shape>::make(Square(3.0));
/// assert_eq!(shape.area(), 9.0);
/// ```
pub trait Upcast<B: ?Sized> {
	fn upcast(self: Box<Self>) -> Box<B>;
}

impl<D: Resource + 'static> Upcast<dyn Resource> for D {
	#[inline]
	fn upcast(self: Box<Self>) -> Box<dyn Resource> {
		self
	}
}

/// A [`UniqueHolder`] over a trait object.
///
/// The stored value may be any type that upcasts into `B`; its own [`Destroy::destroy`]
/// and [`Resource::is_valid`] run, not those of `B`.
/// ```
/// # use dllist::{Destroy, Resource, VirtualUniqueHolder};
/// # use std::cell::Cell;
/// # use std::rc::Rc;
/// struct Derived { id: i32, log: Rc<Cell<&'static str>> }
///
/// impl Destroy for Derived {
/// 	fn destroy(&mut self) { self.log.set("Derived::destroy"); }
/// }
/// impl Resource for Derived {
/// 	fn is_valid(&self) -> bool { self.id == 0 }
/// }
///
/// let log = Rc::new(Cell::new(""));
/// let holder: VirtualUniqueHolder = VirtualUniqueHolder::make(Derived { id: 0, log: log.clone() });
///
/// assert!(holder.is_valid());
/// drop(holder);
/// assert_eq!(log.get(), "Derived::destroy");
/// ```
pub struct VirtualUniqueHolder<B: ?Sized + Resource = dyn Resource> {
	inner: UniqueHolder<B>,
}

impl<B: ?Sized + Resource> VirtualUniqueHolder<B> {
	/// Allocate a `D`, store it behind `B`, and own it.
	#[inline]
	pub fn make<D: Upcast<B>>(value: D) -> Self {
		Self::from_box(<D as Upcast<B>>::upcast(Box::new(value)))
	}

	/// Build a `D` with `f`, then allocate it behind `B` and own it.
	#[inline]
	pub fn make_with<D: Upcast<B>, F: FnOnce() -> D>(f: F) -> Self {
		Self::make(f())
	}

	/// A holder that owns nothing. Releasing or dropping it is a no-op.
	/// ```
	/// # use dllist::VirtualUniqueHolder;
	/// let holder: VirtualUniqueHolder = VirtualUniqueHolder::empty();
	/// assert!(holder.is_empty());
	/// ```
	#[inline]
	pub const fn empty() -> Self {
		Self { inner: UniqueHolder::empty() }
	}

	/// Take ownership of an already boxed trait object.
	/// ```
	/// # use dllist::{Destroy, Resource, VirtualUniqueHolder};
	/// struct Lease(u32);
	/// impl Destroy for Lease { fn destroy(&mut self) {} }
	/// impl Resource for Lease { fn is_valid(&self) -> bool { self.0 > 0 } }
	///
	/// let holder: VirtualUniqueHolder = VirtualUniqueHolder::from_box(Box::new(Lease(30)));
	/// assert!(holder.is_valid());
	/// ```
	#[inline]
	pub fn from_box(boxed: Box<B>) -> Self {
		Self { inner: UniqueHolder::from_box(boxed) }
	}

	/// Ask the owned value whether it is valid.
	/// An empty holder is never valid.
	/// ```
	/// # use dllist::VirtualUniqueHolder;
	/// let holder: VirtualUniqueHolder = VirtualUniqueHolder::empty();
	/// assert!(!holder.is_valid());
	/// ```
	#[inline]
	pub fn is_valid(&self) -> bool {
		self.inner.get().is_ok_and(|value| value.is_valid())
	}

	/// Run the concrete type's cleanup hook and free the value.
	/// Does nothing on an empty holder.
	#[inline]
	pub fn release(&mut self) {
		self.inner.release();
	}

	/// Move the value out into a new holder, leaving this one empty. `O(1)`.
	#[inline]
	pub fn take(&mut self) -> Self {
		Self { inner: self.inner.take() }
	}

	/// Release the current value, if any, then take over `other`'s.
	#[inline]
	pub fn replace(&mut self, other: Self) {
		self.inner.replace(other.inner);
	}

	/// Get a ref to the owned value.
	/// Fails with [`crate::Error::InvalidAccess`] if the holder is empty.
	/// ```
	/// # use dllist::{Destroy, Error, Resource, VirtualUniqueHolder};
	/// struct Lease(u32);
	/// impl Destroy for Lease { fn destroy(&mut self) {} }
	/// impl Resource for Lease { fn is_valid(&self) -> bool { self.0 > 0 } }
	///
	/// let mut holder: VirtualUniqueHolder = VirtualUniqueHolder::make(Lease(30));
	/// assert!(holder.get().is_ok_and(|lease| lease.is_valid()));
	///
	/// holder.release();
	/// assert!(matches!(holder.get(), Err(Error::InvalidAccess)));
	/// ```
	#[inline]
	pub fn get(&self) -> Result<&B> {
		self.inner.get()
	}

	/// Get a mut ref to the owned value.
	/// Fails with [`crate::Error::InvalidAccess`] if the holder is empty.
	/// ```
	/// # use dllist::{Destroy, Resource, VirtualUniqueHolder};
	/// struct Lease(u32);
	/// impl Destroy for Lease { fn destroy(&mut self) {} }
	/// impl Resource for Lease { fn is_valid(&self) -> bool { self.0 > 0 } }
	///
	/// let mut holder: VirtualUniqueHolder = VirtualUniqueHolder::make(Lease(30));
	/// assert!(holder.get_mut().is_ok());
	///
	/// holder.release();
	/// assert!(holder.get_mut().is_err());
	/// ```
	#[inline]
	pub fn get_mut(&mut self) -> Result<&mut B> {
		self.inner.get_mut()
	}

	/// Check if the holder owns nothing. `O(1)`.
	/// ```
	/// # use dllist::{Destroy, Resource, VirtualUniqueHolder};
	/// struct Lease(u32);
	/// impl Destroy for Lease { fn destroy(&mut self) {} }
	/// impl Resource for Lease { fn is_valid(&self) -> bool { self.0 > 0 } }
	///
	/// let mut holder: VirtualUniqueHolder = VirtualUniqueHolder::make(Lease(30));
	/// let moved = holder.take();
	/// assert!(holder.is_empty());
	/// assert!(!moved.is_empty());
	/// ```
	#[inline]
	pub const fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Check if the holder owns a value. The opposite of [`is_empty`](Self::is_empty).
	/// ```
	/// # use dllist::VirtualUniqueHolder;
	/// let holder: VirtualUniqueHolder = VirtualUniqueHolder::default();
	/// assert!(!holder.owns());
	/// ```
	#[inline]
	pub const fn owns(&self) -> bool {
		self.inner.owns()
	}

	/// Hand the value over to a plain [`UniqueHolder<B>`]. The cleanup hook is still pending.
	#[inline]
	pub fn into_holder(self) -> UniqueHolder<B> {
		self.inner
	}
}

impl<B: ?Sized + Resource> Default for VirtualUniqueHolder<B> {
	#[inline]
	fn default() -> Self {
		Self::empty()
	}
}

impl<B: ?Sized + Resource> From<UniqueHolder<B>> for VirtualUniqueHolder<B> {
	#[inline]
	fn from(inner: UniqueHolder<B>) -> Self {
		Self { inner }
	}
}

impl<B: ?Sized + Resource> std::ops::Deref for VirtualUniqueHolder<B> {
	type Target = B;

	/// # Panics
	/// Panics with [`crate::Error::InvalidAccess`] if the holder is empty.
	#[inline]
	fn deref(&self) -> &Self::Target {
		&self.inner
	}
}

impl<B: ?Sized + Resource> std::ops::DerefMut for VirtualUniqueHolder<B> {
	#[inline]
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.inner
	}
}

impl<B: ?Sized + Resource> Debug for VirtualUniqueHolder<B> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("VirtualUniqueHolder")
			.field("owns",  &self.owns())
			.field("valid", &self.is_valid())
			.finish()
	}
}
