//! Alert ledger and its durable mirror.

mod ledger;
mod persistence;

pub use ledger::AlertLedger;
pub use persistence::PersistenceQueue;
