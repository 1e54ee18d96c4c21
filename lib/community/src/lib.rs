//! Shared campus content: the event calendar, the memory gallery, and the
//! notification feed.
//!
//! All state lives in memory and is owned by the caller. Adding, editing,
//! or removing events and images requires a session whose role can manage
//! content; reading never does.

pub mod error;
pub mod events;
pub mod gallery;
pub mod notifications;

pub use error::ContentError;
pub use events::{CampusEvent, EventCalendar, EventDraft, EventKind};
pub use gallery::{Gallery, ImageUpload, MemoryImage, parse_tags};
pub use notifications::{Notification, NotificationFeed, NotificationKind};
