

pub mod filter;
pub mod memory;
pub mod models;
pub mod store;

pub use filter::{Collection, Condition, Field, FilterSpec};
pub use memory::{Dataset, MemoryStore};
pub use models::{Contact, Establishment, Organism, Record};
pub use store::{RecordStore, StoreError};
