pub mod cursor;
pub mod queue;
pub mod recorder;
pub mod session;
