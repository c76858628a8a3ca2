//! Document collections for the trading community.
//!
//! Typed record shapes, the collection registry and the schema-validated
//! document store.

mod store;
mod types;

pub use store::{DocumentStore, StoreError, StoredDocument};
pub use types::{
    collection_names, Article, CalendarEvent, Earning, Indicator, LibraryItem, Message,
    RecordError, RecordKind, SupportTicket,
};
