pub mod event;
pub mod instance;
pub mod tag;
