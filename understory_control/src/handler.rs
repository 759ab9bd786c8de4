// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handler composition: run several event handlers as one.
//!
//! ## Overview
//!
//! [`call_all`] merges optional handlers that share an argument type into a
//! single [`Handler`]. Each present handler runs in the order supplied with the
//! same argument; absent entries are skipped without affecting later ones.
//! The first handler that returns an error aborts the remaining ones and the
//! error is returned to whoever invoked the composed handler.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_control::handler::{call_all, handler};
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let (a, b) = (log.clone(), log.clone());
//! let composed = call_all([
//!     None,
//!     Some(handler(move |x: &u32| a.borrow_mut().push(("first", *x)))),
//!     Some(handler(move |x: &u32| b.borrow_mut().push(("second", *x)))),
//! ]);
//! composed(&7).unwrap();
//! assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);
//! ```

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::error::Error;

/// A shareable event handler.
///
/// Handlers return `Ok(())` on success; an `Err` propagates out of any
/// composed handler that contains this one.
pub type Handler<E> = Rc<dyn Fn(&E) -> Result<(), Error>>;

/// Wrap an infallible closure as a [`Handler`].
pub fn handler<E, F>(f: F) -> Handler<E>
where
    E: 'static,
    F: Fn(&E) + 'static,
{
    Rc::new(move |event: &E| -> Result<(), Error> {
        f(event);
        Ok(())
    })
}

/// Wrap a fallible closure as a [`Handler`].
pub fn fallible<E, F>(f: F) -> Handler<E>
where
    E: 'static,
    F: Fn(&E) -> Result<(), Error> + 'static,
{
    Rc::new(f)
}

/// Compose optional handlers into one that calls each present handler in order.
///
/// Return values are discarded; the first error short-circuits.
pub fn call_all<E, I>(handlers: I) -> Handler<E>
where
    E: 'static,
    I: IntoIterator<Item = Option<Handler<E>>>,
{
    let handlers: Vec<Handler<E>> = handlers.into_iter().flatten().collect();
    Rc::new(move |event: &E| -> Result<(), Error> {
        for h in &handlers {
            h(event)?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use core::cell::RefCell;

    fn recorder(log: &Rc<RefCell<Vec<(u8, u32)>>>, tag: u8) -> Handler<u32> {
        let log = log.clone();
        handler(move |x: &u32| log.borrow_mut().push((tag, *x)))
    }

    #[test]
    fn runs_in_supplied_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let composed = call_all([Some(recorder(&log, 1)), Some(recorder(&log, 2))]);
        composed(&5).unwrap();
        assert_eq!(*log.borrow(), vec![(1, 5), (2, 5)]);
    }

    #[test]
    fn absent_first_handler_does_not_skip_later_ones() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let composed = call_all([None, Some(recorder(&log, 2))]);
        composed(&9).unwrap();
        assert_eq!(*log.borrow(), vec![(2, 9)]);
    }

    #[test]
    fn empty_composition_is_a_no_op() {
        let composed = call_all::<u32, _>([]);
        assert_eq!(composed(&1), Ok(()));
    }

    #[test]
    fn error_aborts_remaining_handlers() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let failing: Handler<u32> = fallible(|_: &u32| Err(Error::handler("nope")));
        let composed = call_all([
            Some(recorder(&log, 1)),
            Some(failing),
            Some(recorder(&log, 3)),
        ]);
        assert_eq!(composed(&4), Err(Error::handler("nope")));
        assert_eq!(*log.borrow(), vec![(1, 4)]);
    }

    #[test]
    fn composed_handler_can_be_invoked_repeatedly() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let composed = call_all([Some(recorder(&log, 1))]);
        composed(&1).unwrap();
        composed(&2).unwrap();
        assert_eq!(*log.borrow(), vec![(1, 1), (1, 2)]);
    }
}
