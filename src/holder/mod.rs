use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::{Error, Result};

mod dynamic;
pub use dynamic::{Resource, Upcast, VirtualUniqueHolder};

/// The cleanup hook a holder runs when it gives up its value.
///
/// `destroy` is called exactly once per allocation, right before the value is dropped
/// and its storage freed.
/// ```
/// # use dllist::{Destroy, UniqueHolder};
/// # use std::cell::Cell;
/// # use std::rc::Rc;
/// struct Counted(Rc<Cell<u32>>);
///
/// impl Destroy for Counted {
/// 	fn destroy(&mut self) { self.0.set(self.0.get() + 1); }
/// }
///
/// let calls = Rc::new(Cell::new(0));
/// drop(UniqueHolder::make(Counted(calls.clone())));
/// assert_eq!(calls.get(), 1);
/// ```
pub trait Destroy {
	fn destroy(&mut self);
}

/// A move-only owner of one heap allocated `T`.
///
/// There is no `Clone`; ownership moves with the holder, or explicitly through
/// [`take`](Self::take) and [`replace`](Self::replace), which leave the source empty.
/// When ownership ends the value's [`Destroy::destroy`] runs once, then the storage is freed.
pub struct UniqueHolder<T: ?Sized + Destroy> {
	value: Option<NonNull<T>>,
	_boo:  PhantomData<Box<T>>,
}

unsafe impl<T: ?Sized + Destroy + Send> Send for UniqueHolder<T> {}
unsafe impl<T: ?Sized + Destroy + Sync> Sync for UniqueHolder<T> {}

impl<T: Destroy> UniqueHolder<T> {
	/// Allocate `value` on the heap and own it.
	/// ```
	/// # use dllist::{Destroy, UniqueHolder};
	/// struct Port(u16);
	/// impl Destroy for Port { fn destroy(&mut self) {} }
	///
	/// let port = UniqueHolder::make(Port(8080));
	/// assert_eq!(port.0, 8080);
	/// ```
	#[inline]
	pub fn make(value: T) -> Self {
		Self::from_box(Box::new(value))
	}

	/// Build the value with `f`, then allocate and own it.
	#[inline]
	pub fn make_with<F: FnOnce() -> T>(f: F) -> Self {
		Self::make(f())
	}
}

impl<T: ?Sized + Destroy> UniqueHolder<T> {
	/// A holder that owns nothing. Releasing or dropping it is a no-op.
	/// ```
	/// # use dllist::{Destroy, UniqueHolder};
	/// struct Port(u16);
	/// impl Destroy for Port { fn destroy(&mut self) {} }
	///
	/// let holder: UniqueHolder<Port> = UniqueHolder::empty();
	/// assert!(holder.is_empty());
	/// ```
	#[inline]
	pub const fn empty() -> Self {
		Self {
			value: None,
			_boo:  PhantomData,
		}
	}

	/// Take ownership of an already boxed value. Works for unsized `T`.
	/// ```
	/// # use dllist::{Destroy, UniqueHolder};
	/// struct Port(u16);
	/// impl Destroy for Port { fn destroy(&mut self) {} }
	///
	/// let holder = UniqueHolder::from_box(Box::new(Port(22)));
	/// assert_eq!(holder.0, 22);
	/// ```
	pub fn from_box(boxed: Box<T>) -> Self {
		trace!("holder: acquired {}", std::any::type_name::<T>());

		Self {
			value: Some(NonNull::from(Box::leak(boxed))),
			_boo:  PhantomData,
		}
	}

	/// Run the cleanup hook and free the value, leaving the holder empty.
	/// Does nothing on an empty holder.
	/// ```
	/// # use dllist::{Destroy, UniqueHolder};
	/// # use std::cell::Cell;
	/// # use std::rc::Rc;
	/// struct Counted(Rc<Cell<u32>>);
	/// impl Destroy for Counted {
	/// 	fn destroy(&mut self) { self.0.set(self.0.get() + 1); }
	/// }
	///
	/// let calls = Rc::new(Cell::new(0));
	/// let mut holder = UniqueHolder::make(Counted(calls.clone()));
	///
	/// holder.release();
	/// holder.release();
	/// drop(holder);
	///
	/// assert_eq!(calls.get(), 1);
	/// ```
	pub fn release(&mut self) {
		if let Some(ptr) = self.value.take() {
			trace!("holder: releasing {}", std::any::type_name::<T>());

			// the slot is cleared first, so a panicking hook still frees the box exactly once
			let mut boxed = unsafe { Box::from_raw(ptr.as_ptr()) };
			boxed.destroy();
		}
	}

	/// Move the value out into a new holder, leaving this one empty. `O(1)`.
	/// ```
	/// # use dllist::{Destroy, UniqueHolder};
	/// struct Port(u16);
	/// impl Destroy for Port { fn destroy(&mut self) {} }
	///
	/// let mut a = UniqueHolder::make(Port(80));
	/// let b = a.take();
	///
	/// assert!(a.is_empty());
	/// assert_eq!(b.get().map(|p| p.0), Ok(80));
	/// ```
	#[inline]
	pub fn take(&mut self) -> Self {
		Self {
			value: self.value.take(),
			_boo:  PhantomData,
		}
	}

	/// Release the current value, if any, then take over `other`'s.
	#[inline]
	pub fn replace(&mut self, other: Self) {
		self.release();
		*self = other;
	}

	/// Get a ref to the owned value.
	/// Fails with [`Error::InvalidAccess`] if the holder is empty.
	/// ```
	/// # use dllist::{Destroy, Error, UniqueHolder};
	/// struct Port(u16);
	/// impl Destroy for Port { fn destroy(&mut self) {} }
	///
	/// let mut holder = UniqueHolder::make(Port(80));
	/// assert_eq!(holder.get().map(|p| p.0), Ok(80));
	///
	/// let _moved = holder.take();
	/// assert!(matches!(holder.get(), Err(Error::InvalidAccess)));
	/// ```
	#[inline]
	pub fn get(&self) -> Result<&T> {
		self.value
			.map(|ptr| unsafe { &*ptr.as_ptr() })
			.ok_or(Error::InvalidAccess)
	}

	/// Get a mut ref to the owned value.
	/// Fails with [`Error::InvalidAccess`] if the holder is empty.
	/// ```
	/// # use dllist::{Destroy, Error, UniqueHolder};
	/// struct Port(u16);
	/// impl Destroy for Port { fn destroy(&mut self) {} }
	///
	/// let mut holder = UniqueHolder::make(Port(80));
	/// holder.get_mut().unwrap().0 = 443;
	/// assert_eq!(holder.0, 443);
	///
	/// holder.release();
	/// assert!(matches!(holder.get_mut(), Err(Error::InvalidAccess)));
	/// ```
	#[inline]
	pub fn get_mut(&mut self) -> Result<&mut T> {
		self.value
			.map(|ptr| unsafe { &mut *ptr.as_ptr() })
			.ok_or(Error::InvalidAccess)
	}

	/// Check if the holder owns nothing. `O(1)`.
	/// ```
	/// # use dllist::{Destroy, UniqueHolder};
	/// struct Port(u16);
	/// impl Destroy for Port { fn destroy(&mut self) {} }
	///
	/// let mut holder = UniqueHolder::make(Port(80));
	/// assert!(!holder.is_empty());
	/// holder.release();
	/// assert!(holder.is_empty());
	/// ```
	#[inline]
	pub const fn is_empty(&self) -> bool {
		self.value.is_none()
	}

	/// Check if the holder owns a value. The opposite of [`is_empty`](Self::is_empty).
	/// ```
	/// # use dllist::{Destroy, UniqueHolder};
	/// struct Port(u16);
	/// impl Destroy for Port { fn destroy(&mut self) {} }
	///
	/// let mut a = UniqueHolder::make(Port(80));
	/// let b = a.take();
	/// assert!(!a.owns());
	/// assert!(b.owns());
	/// ```
	#[inline]
	pub const fn owns(&self) -> bool {
		self.value.is_some()
	}
}

impl<T: ?Sized + Destroy> Default for UniqueHolder<T> {
	#[inline]
	fn default() -> Self {
		Self::empty()
	}
}

impl<T: ?Sized + Destroy> From<Box<T>> for UniqueHolder<T> {
	#[inline]
	fn from(boxed: Box<T>) -> Self {
		Self::from_box(boxed)
	}
}

impl<T: ?Sized + Destroy> std::ops::Deref for UniqueHolder<T> {
	type Target = T;

	/// # Panics
	/// Panics with [`Error::InvalidAccess`] if the holder is empty.
	#[inline]
	fn deref(&self) -> &Self::Target {
		self.get().unwrap_or_else(|err| panic!("{err}"))
	}
}

impl<T: ?Sized + Destroy> std::ops::DerefMut for UniqueHolder<T> {
	#[inline]
	fn deref_mut(&mut self) -> &mut Self::Target {
		self.get_mut().unwrap_or_else(|err| panic!("{err}"))
	}
}

impl<T: ?Sized + Destroy + Debug> Debug for UniqueHolder<T> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self.get() {
			Ok(value) => f.debug_tuple("UniqueHolder").field(&value).finish(),
			Err(_)    => write!(f, "UniqueHolder(<empty>)"),
		}
	}
}

impl<T: ?Sized + Destroy> Drop for UniqueHolder<T> {
	#[inline]
	fn drop(&mut self) {
		self.release();
	}
}
