mod persistence;
mod portions;
mod store;

pub use persistence::{builtin_catalog, load_catalog, parse_dishes_csv, save_catalog_json};
pub use portions::PORTION_VARIANTS;
pub use store::Catalog;
