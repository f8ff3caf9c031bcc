mod builder;
mod encoding;
mod event;
mod matrix;

pub use builder::{build_interaction_matrix, build_interaction_matrix_with_shards};
pub use encoding::Categories;
pub use event::{load_listening_history, ListeningEvent};
pub use matrix::InteractionMatrix;
