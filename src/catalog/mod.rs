mod catalog;
mod load;
mod song;

pub use catalog::Catalog;
pub use load::{load_catalog, save_catalog};
pub use song::{Song, SongKey};
