//! Builder API for configuring histories.
//!
//! [`History::new`](crate::core::History::new) and
//! [`History::with_copier`](crate::core::History::with_copier) cover the
//! common cases; the builder is the configuration surface for hosts that
//! assemble a history from optional pieces.
//!
//! # Example
//!
//! ```
//! use checkpoint_undo::builder::HistoryBuilder;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let live = Rc::new(RefCell::new(String::from("draft")));
//! let history = HistoryBuilder::new()
//!     .initial(live.clone())
//!     .copier(|v: &Rc<RefCell<String>>| Rc::new(RefCell::new(v.borrow().clone())))
//!     .build()
//!     .unwrap();
//!
//! live.borrow_mut().push('!');
//! assert_eq!(*history.initial_value().borrow(), "draft");
//! ```

pub mod error;
pub mod history;

pub use error::BuildError;
pub use history::HistoryBuilder;
