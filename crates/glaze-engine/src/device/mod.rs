//! GPU device, surface and depth target management.
//!
//! - `init`: configuration consumed at startup
//! - `context`: `Gpu`, owner of instance/adapter/device/queue and the surface
//! - `frame`: one acquired frame (color view, depth view, encoder)
//! - `surface`: format/alpha selection, resize, surface error mapping

mod context;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use frame::GpuFrame;
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
