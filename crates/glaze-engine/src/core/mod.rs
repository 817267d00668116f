//! Contracts between the runtime loop and the host application.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
