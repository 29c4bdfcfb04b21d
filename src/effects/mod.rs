//! Cosmetic page effects.
//!
//! - [`typewriter`]: reveals the profile name one character at a time
//! - [`observer`]: marks sections visible the first time they scroll into view
//! - [`runtime`]: the same two effects as a browser script embedded in the page
//!
//! The native state machines drive `folio preview`; the runtime script is
//! generated from the same `[effects]` config so both behave alike.

pub mod observer;
pub mod runtime;
pub mod typewriter;
