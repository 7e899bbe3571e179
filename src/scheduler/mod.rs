//! Cancellable periodic scheduling
//!
//! The dashboard loop owns a [`Ticker`] and awaits it inside `select!`.
//! Disarming drops the interval in place, so no tick can be observed after
//! the call returns.

mod ticker;

pub use ticker::Ticker;
