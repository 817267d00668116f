use crate::error::SetupError;

/// Log target for scene lifecycle events.
pub const SCENE_TARGET: &str = "scene-loading";

/// Receiver of scene lifecycle events, injected into the frame orchestrator.
///
/// `node_failed` is the notification path for per-node setup failures; the
/// orchestrator itself only skips the node.
pub trait SceneSink {
    fn resized(&mut self, width: u32, height: u32);
    fn node_added(&mut self, id: &str);
    fn node_updated(&mut self, id: &str);
    fn node_removed(&mut self, id: &str);
    fn node_failed(&mut self, id: &str, error: &SetupError);
}

/// Forwards every event to `log` under [`SCENE_TARGET`].
#[derive(Debug, Default, Copy, Clone)]
pub struct LogSink;

impl SceneSink for LogSink {
    fn resized(&mut self, width: u32, height: u32) {
        log::info!(target: SCENE_TARGET, "resized to {width}x{height}");
    }

    fn node_added(&mut self, id: &str) {
        log::info!(target: SCENE_TARGET, "added node {id}");
    }

    fn node_updated(&mut self, id: &str) {
        log::trace!(target: SCENE_TARGET, "updated node {id}");
    }

    fn node_removed(&mut self, id: &str) {
        log::info!(target: SCENE_TARGET, "removed node {id}");
    }

    fn node_failed(&mut self, id: &str, error: &SetupError) {
        log::error!(target: SCENE_TARGET, "failed to set up node {id}: {error}");
    }
}

/// Records events as strings, for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub events: Vec<String>,
}

#[cfg(test)]
impl SceneSink for RecordingSink {
    fn resized(&mut self, width: u32, height: u32) {
        self.events.push(format!("resized {width}x{height}"));
    }

    fn node_added(&mut self, id: &str) {
        self.events.push(format!("added {id}"));
    }

    fn node_updated(&mut self, id: &str) {
        self.events.push(format!("updated {id}"));
    }

    fn node_removed(&mut self, id: &str) {
        self.events.push(format!("removed {id}"));
    }

    fn node_failed(&mut self, id: &str, _error: &SetupError) {
        self.events.push(format!("failed {id}"));
    }
}
