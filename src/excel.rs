pub mod excel_ops;
pub mod record_store;
