pub mod ean;
pub mod sale_rate;
