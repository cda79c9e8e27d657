mod store;

pub use store::{RecordStore, RECORDS_FILE};
