//! Ownership of mounted instances
//!
//! Host pages often ignore the handle `mount` returns. The state of every
//! mounted instance is therefore owned here until `unmount` releases it, and
//! handles only point at it.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Key of one retained instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceKey(u64);

thread_local! {
	static NEXT_KEY: Cell<u64> = const { Cell::new(1) };
	static LIVE: RefCell<HashMap<InstanceKey, Rc<dyn Any>>> = RefCell::new(HashMap::new());
}

/// Keeps `state` alive until [`release`] is called with the returned key.
pub fn retain(state: Rc<dyn Any>) -> InstanceKey {
	let key = NEXT_KEY.with(|next| {
		let key = next.get();
		next.set(key + 1);
		InstanceKey(key)
	});
	LIVE.with(|live| live.borrow_mut().insert(key, state));
	key
}

/// Drops the retained state. Releasing twice is a no-op.
pub fn release(key: InstanceKey) -> bool {
	LIVE.with(|live| live.borrow_mut().remove(&key).is_some())
}

/// Number of instances currently mounted on this page.
pub fn count() -> usize {
	LIVE.with(|live| live.borrow().len())
}
