pub mod codec;
pub mod file;
pub mod legacy;
mod persistent;

pub use codec::{decode_store, encode_store, StoredRecord};
pub use file::{load_or_empty, load_user_store, save_user_store, LoadSource};
pub use legacy::parse_legacy_file;
pub use persistent::PersistentStore;
