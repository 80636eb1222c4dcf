pub mod ordering;
pub mod pagination;
pub mod session;
