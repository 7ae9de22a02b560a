//! Navigation context.
//!
//! Route operations that read "the current location" take a [`Navigator`]
//! explicitly instead of reaching for ambient router state. Applications
//! implement the trait on top of their router; [`MemoryNavigator`] is an
//! in-memory implementation for tests and non-browser hosts.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use routelink_urls::Location;

use crate::error::RouteError;

/// How a navigation affects the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigateMode {
	/// Add a new history entry.
	Push,
	/// Replace the current history entry.
	Replace,
}

/// Access to the current location and the ability to move to a new one.
pub trait Navigator {
	/// Returns the current location.
	fn location(&self) -> Location;

	/// Navigates to `to`, an absolute href or one starting with `?` or `#`.
	///
	/// # Errors
	///
	/// Returns [`RouteError::NavigationFailed`] if the host router rejects
	/// the navigation.
	fn navigate(&self, to: &str, mode: NavigateMode) -> Result<(), RouteError>;
}

impl<N: Navigator + ?Sized> Navigator for &N {
	fn location(&self) -> Location {
		(**self).location()
	}

	fn navigate(&self, to: &str, mode: NavigateMode) -> Result<(), RouteError> {
		(**self).navigate(to, mode)
	}
}

impl<N: Navigator + ?Sized> Navigator for Rc<N> {
	fn location(&self) -> Location {
		(**self).location()
	}

	fn navigate(&self, to: &str, mode: NavigateMode) -> Result<(), RouteError> {
		(**self).navigate(to, mode)
	}
}

/// Handle returned by [`MemoryNavigator::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(usize);

type Listener = Rc<dyn Fn(&Location, NavigateMode)>;

struct NavigatorState {
	location: Location,
	pushes: usize,
	replaces: usize,
	next_id: usize,
	listeners: Vec<(usize, Listener)>,
}

/// A navigator that keeps the location in memory.
///
/// Clones share the same state. There is no history stack; the push and
/// replace counters record how the location was reached.
///
/// # Example
///
/// ```
/// use routelink_pages::navigator::{MemoryNavigator, NavigateMode, Navigator};
///
/// let navigator = MemoryNavigator::new("/items/1?tab=info");
/// navigator.navigate("?tab=history", NavigateMode::Replace).unwrap();
///
/// assert_eq!(navigator.location().href(), "/items/1?tab=history");
/// assert_eq!(navigator.replace_count(), 1);
/// ```
#[derive(Clone)]
pub struct MemoryNavigator {
	state: Rc<RefCell<NavigatorState>>,
}

impl MemoryNavigator {
	/// Creates a navigator positioned at `href`.
	pub fn new(href: &str) -> Self {
		Self {
			state: Rc::new(RefCell::new(NavigatorState {
				location: Location::parse(href),
				pushes: 0,
				replaces: 0,
				next_id: 0,
				listeners: Vec::new(),
			})),
		}
	}

	/// Returns the current href.
	pub fn href(&self) -> String {
		self.state.borrow().location.href()
	}

	/// Returns how many push navigations happened.
	pub fn push_count(&self) -> usize {
		self.state.borrow().pushes
	}

	/// Returns how many replace navigations happened.
	pub fn replace_count(&self) -> usize {
		self.state.borrow().replaces
	}

	/// Registers a listener called after every navigation.
	///
	/// Listeners run synchronously inside [`Navigator::navigate`] and may
	/// read the navigator.
	pub fn subscribe<F>(&self, listener: F) -> Subscription
	where
		F: Fn(&Location, NavigateMode) + 'static,
	{
		let mut state = self.state.borrow_mut();
		let id = state.next_id;
		state.next_id += 1;
		state.listeners.push((id, Rc::new(listener)));
		Subscription(id)
	}

	/// Removes a listener. Returns whether it was registered.
	pub fn unsubscribe(&self, subscription: Subscription) -> bool {
		let mut state = self.state.borrow_mut();
		let before = state.listeners.len();
		state.listeners.retain(|(id, _)| *id != subscription.0);
		state.listeners.len() != before
	}

	fn resolve(current: &Location, to: &str) -> Location {
		if let Some(hash) = to.strip_prefix('#') {
			let mut next = current.clone();
			next.hash = hash.to_string();
			next
		} else if to.starts_with('?') {
			let mut next = Location::parse(to);
			next.pathname = current.pathname.clone();
			next
		} else {
			Location::parse(to)
		}
	}
}

impl Default for MemoryNavigator {
	fn default() -> Self {
		Self::new("/")
	}
}

impl Navigator for MemoryNavigator {
	fn location(&self) -> Location {
		self.state.borrow().location.clone()
	}

	fn navigate(&self, to: &str, mode: NavigateMode) -> Result<(), RouteError> {
		let (location, listeners) = {
			let mut state = self.state.borrow_mut();
			let next = Self::resolve(&state.location, to);
			tracing::debug!(from = %state.location, to = %next, ?mode, "navigate");
			state.location = next;
			match mode {
				NavigateMode::Push => state.pushes += 1,
				NavigateMode::Replace => state.replaces += 1,
			}
			let listeners: Vec<Listener> =
				state.listeners.iter().map(|(_, listener)| Rc::clone(listener)).collect();
			(state.location.clone(), listeners)
		};

		for listener in listeners {
			listener(&location, mode);
		}
		Ok(())
	}
}

impl fmt::Debug for MemoryNavigator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("MemoryNavigator")
			.field("location", &state.location)
			.field("pushes", &state.pushes)
			.field("replaces", &state.replaces)
			.field("listeners", &state.listeners.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	#[case("/b?x=1", "/b?x=1")]
	#[case("?x=2", "/a?x=2")]
	#[case("#top", "/a?q=1#top")]
	#[case("/", "/")]
	fn test_navigate_resolves_href(#[case] to: &str, #[case] expected: &str) {
		let navigator = MemoryNavigator::new("/a?q=1");

		navigator.navigate(to, NavigateMode::Push).unwrap();

		assert_eq!(navigator.href(), expected);
	}

	#[rstest]
	fn test_counts_modes() {
		let navigator = MemoryNavigator::default();

		navigator.navigate("/a", NavigateMode::Push).unwrap();
		navigator.navigate("/b", NavigateMode::Push).unwrap();
		navigator.navigate("/c", NavigateMode::Replace).unwrap();

		assert_eq!(navigator.push_count(), 2);
		assert_eq!(navigator.replace_count(), 1);
	}

	#[rstest]
	fn test_clones_share_state() {
		let navigator = MemoryNavigator::new("/");
		let other = navigator.clone();

		other.navigate("/moved", NavigateMode::Push).unwrap();

		assert_eq!(navigator.location().pathname, "/moved");
	}

	#[rstest]
	fn test_subscribe_and_unsubscribe() {
		// Arrange
		let navigator = MemoryNavigator::new("/");
		let calls = Rc::new(Cell::new(0));
		let seen = Rc::clone(&calls);
		let reader = navigator.clone();
		let subscription = navigator.subscribe(move |location, mode| {
			assert_eq!(mode, NavigateMode::Replace);
			assert_eq!(reader.location(), *location);
			seen.set(seen.get() + 1);
		});

		// Act
		navigator.navigate("/one", NavigateMode::Replace).unwrap();
		let removed = navigator.unsubscribe(subscription);
		navigator.navigate("/two", NavigateMode::Replace).unwrap();

		// Assert
		assert!(removed);
		assert_eq!(calls.get(), 1);
		assert!(!navigator.unsubscribe(subscription));
	}

	#[rstest]
	fn test_navigator_through_reference() {
		fn current<N: Navigator>(navigator: N) -> String {
			navigator.location().href()
		}

		let navigator = MemoryNavigator::new("/ref");

		assert_eq!(current(&navigator), "/ref");
		assert_eq!(current(Rc::new(navigator)), "/ref");
	}
}
