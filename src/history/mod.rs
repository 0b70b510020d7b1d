mod store;
mod types;

pub use store::HistoryStore;
pub use types::Message;
