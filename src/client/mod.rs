//! Client core
//!
//! UI-independent logic behind the workout tracker front end: the entry
//! form, the history list and transient notifications. Nothing here does
//! I/O; callers perform the HTTP requests and feed results back in.

pub mod form;
pub mod format;
pub mod list;
pub mod notification;

pub use form::{FormError, FormFields, FormMachine, FormState, Outcome, Submission};
pub use format::{format_timestamp, format_workout_date};
pub use list::ListView;
pub use notification::{Notice, NoticeKind, Notifier};
