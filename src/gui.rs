pub mod ice;
pub mod templates_n_methods;
