//! Catalog entities.
//!
//! Contains the product and category shapes decoded from catalog responses.

mod category;
mod product;

pub use category::{CategoryInterface, CategoryProducts};
pub use product::{ConfigurableVariant, ProductInterface};
