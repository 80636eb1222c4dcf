pub mod record;
pub mod user_sheet;
