//! Logging: global `env_logger` setup and the scene event sink.

mod init;
mod sink;

pub use init::{LoggingConfig, init_logging};
#[cfg(test)]
pub(crate) use sink::RecordingSink;
pub use sink::{LogSink, SCENE_TARGET, SceneSink};
