//! # motivator-service
//!
//! Business logic layer for Motivator. The [`NotificationPreferenceManager`]
//! owns each user's notification schedule: it validates candidates, makes
//! sure a push registration exists before delivery is switched on,
//! persists the normalized document, and answers whether a notification
//! may fire at a given instant.
//!
//! Services follow constructor injection: every collaborator (store,
//! registrar, clock) is provided at construction time via `Arc` references,
//! and the caller's session is passed explicitly as a [`SessionContext`].

pub mod clock;
pub mod context;
pub mod notification;

pub use clock::{FixedClock, SystemClock};
pub use context::SessionContext;
pub use notification::{NotificationPreferenceManager, is_eligible_at, next_eligible_at};
