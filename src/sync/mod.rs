pub use adapter::GameSync;
pub use documents::GameDocument;

pub mod adapter;
pub mod documents;
