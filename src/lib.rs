//! `callspy` builds test doubles out of _spies_: per-object ledgers of expectations and calls.
//!
//! A test registers canned behavior for a named operation under argument conditions,
//! the double's methods forward their invocation into the spy, and the spy matches the
//! live call against what was registered, records it, optionally writes output
//! parameters, and hands back the canned results. At the end of the test every
//! expectation that was never exercised is reported.
//!
//! The [spy] attribute generates the forwarding boilerplate for a trait:
//!
//! ```rust
//! use callspy::*;
//! use callspy::matcher::*;
//!
//! #[spy]
//! trait Directory {
//!     fn lookup(&self, key: &str, found: &mut i32) -> bool;
//! }
//!
//! fn find(directory: &impl Directory, key: &str) -> Option<i32> {
//!     let mut found = 0;
//!     directory.lookup(key, &mut found).then_some(found)
//! }
//!
//! let directory = DirectorySpy::default();
//! directory
//!     .when("lookup", [string("answer"), anything()])
//!     .returns([true])
//!     .set(1, 42);
//!
//! assert_eq!(Some(42), find(&directory, "answer"));
//! directory.assert_verified();
//! ```
//!
//! Hand-written doubles call [Spy::called] directly, passing the method's own name:
//!
//! ```rust
//! use callspy::*;
//! use callspy::matcher::*;
//!
//! trait Greeter {
//!     fn greet(&self, who: &str) -> String;
//! }
//!
//! #[derive(Default)]
//! struct GreeterDouble {
//!     spy: Spy,
//! }
//!
//! impl Greeter for GreeterDouble {
//!     fn greet(&self, who: &str) -> String {
//!         self.spy.called("greet", &mut [Arg::value(who)]).string(0)
//!     }
//! }
//!
//! let double = GreeterDouble::default();
//! double.spy.when("greet", [string("world")]).returns(["hello world"]);
//! assert_eq!("hello world", double.greet("world"));
//! ```
//!
//! # Failure policy
//! An invocation that no expectation accepts panics immediately, naming the operation
//! and its arguments. So does a typed [Call] accessor used against a value of another
//! kind. Unmet expectations are collected and reported by [Spy::verify], so one test
//! run surfaces every missing interaction.

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

mod arg;
mod call;
mod error;
mod expectation;
mod lock;
mod mismatch;
mod output;
mod spy;
mod value;
mod verify;

pub mod matcher;

#[doc(hidden)]
pub mod macro_api;

pub use arg::{Arg, OutSlot};
pub use call::Call;
pub use error::{ActualCall, Slice, SpyError, SpyResult};
pub use expectation::Expect;
pub use matcher::{Match, Matcher};
pub use mismatch::Mismatches;
pub use output::FromReturns;
pub use spy::Spy;
pub use value::{ErrorValue, FromValue, Opaque, OutValue, RefValue, ToValue, Value};
pub use verify::{FailureSink, Failures};

/// Generate a spy-backed implementation of a trait.
///
/// The attribute emits the trait unchanged, plus a struct named `<Trait>Spy` that
/// dereferences to [Spy] and implements the trait. Every method forwards its
/// arguments to [Spy::called] under its own name. The method's return type is
/// produced from the matched call with [FromReturns].
///
/// Parameters are forwarded as follows:
/// * Types implementing [ToValue] become plain values.
/// * `&mut T` where `T:` [OutValue] becomes a writable output slot.
/// * Other `Clone + Send + Sync + 'static` types are recorded as an [Opaque] clone;
///   behind `&mut` they are read-only slots that [Expect::set] skips.
/// * Anything else is recorded as an [Opaque] carrying only its type name.
///
/// # Attributes
/// * `name = Ident`: name of the generated struct.
/// * `prefix = path`: path to this crate, when it is re-exported under another name.
///
/// ```rust
/// use callspy::*;
/// use callspy::matcher::*;
///
/// #[spy(name = FakeClock)]
/// trait Clock {
///     fn now(&self) -> u64;
/// }
///
/// let clock = FakeClock::default();
/// clock.when("now", []).returns([1_700_000_000_u64]);
/// assert_eq!(1_700_000_000, clock.now());
/// ```
pub use callspy_macros::spy;
