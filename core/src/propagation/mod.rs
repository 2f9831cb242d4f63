pub mod model;
pub mod params;

pub use model::CloseInModel;
pub use params::PropagationParameters;
