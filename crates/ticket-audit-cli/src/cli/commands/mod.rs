pub(crate) mod check;
mod dispatch;
pub(crate) mod prompt;

pub use dispatch::dispatch;
