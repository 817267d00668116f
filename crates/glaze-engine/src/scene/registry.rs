use std::collections::{BTreeMap, HashSet};

use crate::error::{SceneError, SetupError};
use crate::logging::SceneSink;

/// Outcome of one [`NodeRegistry::sync`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub added: Vec<String>,
    pub updated: Vec<String>,
    pub removed: Vec<String>,
    pub failed: Vec<String>,
}

/// Nodes keyed by mesh identity, iterated in identity order.
#[derive(Debug)]
pub struct NodeRegistry<N> {
    nodes: BTreeMap<String, N>,
}

impl<N> Default for NodeRegistry<N> {
    fn default() -> Self {
        Self {
            nodes: BTreeMap::new(),
        }
    }
}

impl<N> NodeRegistry<N> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&N> {
        self.nodes.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &N)> {
        self.nodes.iter().map(|(id, node)| (id.as_str(), node))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.values()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Brings the registry in line with `descriptors`.
    ///
    /// - duplicate identities reject the whole list before anything changes
    /// - nodes whose identity is gone are dropped
    /// - known identities are updated; new ones are set up, then updated
    ///
    /// A failing node is dropped and reported to `sink`; it is set up from
    /// scratch the next time its identity is supplied. Link failures are not
    /// per-node and abort the sync.
    pub fn sync<D>(
        &mut self,
        descriptors: &[D],
        id_of: impl Fn(&D) -> &str,
        mut setup: impl FnMut(&D) -> Result<N, SetupError>,
        mut update: impl FnMut(&mut N, &D) -> Result<(), SetupError>,
        sink: &mut dyn SceneSink,
    ) -> Result<SyncReport, SceneError> {
        let mut seen = HashSet::with_capacity(descriptors.len());
        for d in descriptors {
            let id = id_of(d);
            if !seen.insert(id) {
                return Err(SceneError::DuplicateIdentity(id.to_string()));
            }
        }

        let mut report = SyncReport::default();

        self.nodes.retain(|id, _| {
            let keep = seen.contains(id.as_str());
            if !keep {
                sink.node_removed(id);
                report.removed.push(id.clone());
            }
            keep
        });

        for d in descriptors {
            let id = id_of(d);

            let outcome = match self.nodes.get_mut(id) {
                Some(node) => update(node, d).map(|()| None),
                None => setup(d).and_then(|mut node| update(&mut node, d).map(|()| Some(node))),
            };

            match outcome {
                Ok(Some(node)) => {
                    self.nodes.insert(id.to_string(), node);
                    sink.node_added(id);
                    report.added.push(id.to_string());
                }
                Ok(None) => {
                    sink.node_updated(id);
                    report.updated.push(id.to_string());
                }
                Err(SetupError::Link(source)) => {
                    return Err(SceneError::PipelineLink {
                        id: id.to_string(),
                        source,
                    });
                }
                Err(err) => {
                    self.nodes.remove(id);
                    sink.node_failed(id, &err);
                    report.failed.push(id.to_string());
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LinkError, ResourceError};
    use crate::logging::RecordingSink;

    #[derive(Debug)]
    struct FakeNode {
        generation: u32,
        updates: u32,
    }

    struct Desc {
        id: &'static str,
        fail: Option<SetupError>,
        reject_update: bool,
    }

    fn ok(id: &'static str) -> Desc {
        Desc {
            id,
            fail: None,
            reject_update: false,
        }
    }

    fn run(
        registry: &mut NodeRegistry<FakeNode>,
        descs: &[Desc],
        generation: &mut u32,
        sink: &mut RecordingSink,
    ) -> Result<SyncReport, SceneError> {
        registry.sync(
            descs,
            |d| d.id,
            |d| {
                if let Some(err) = &d.fail {
                    return Err(clone_error(err));
                }
                *generation += 1;
                Ok(FakeNode {
                    generation: *generation,
                    updates: 0,
                })
            },
            |node, d| {
                if d.reject_update {
                    return Err(SetupError::CompositionChanged {
                        expected: vec!["color_material".into()],
                        found: vec!["normal_material".into()],
                    });
                }
                node.updates += 1;
                Ok(())
            },
            sink,
        )
    }

    fn clone_error(err: &SetupError) -> SetupError {
        match err {
            SetupError::Resource(e) => SetupError::Resource(e.clone()),
            SetupError::Link(e) => SetupError::Link(LinkError {
                functions: e.functions.clone(),
                reason: e.reason.clone(),
            }),
            other => SetupError::Resource(ResourceError::NotFound(other.to_string())),
        }
    }

    #[test]
    fn new_ids_are_set_up_and_updated() {
        let mut registry = NodeRegistry::new();
        let mut sink = RecordingSink::default();
        let mut generation = 0;

        let report = run(&mut registry, &[ok("a"), ok("b")], &mut generation, &mut sink).unwrap();
        assert_eq!(report.added, vec!["a", "b"]);
        assert_eq!(registry.get("a").map(|n| n.updates), Some(1));

        let report = run(&mut registry, &[ok("a"), ok("b")], &mut generation, &mut sink).unwrap();
        assert_eq!(report.updated, vec!["a", "b"]);
        assert_eq!(registry.get("a").map(|n| n.updates), Some(2));
        assert_eq!(generation, 2);
    }

    #[test]
    fn removed_id_is_set_up_fresh_when_resupplied() {
        let mut registry = NodeRegistry::new();
        let mut sink = RecordingSink::default();
        let mut generation = 0;

        run(&mut registry, &[ok("a"), ok("b")], &mut generation, &mut sink).unwrap();
        let first = registry.get("b").map(|n| n.generation);

        let report = run(&mut registry, &[ok("a")], &mut generation, &mut sink).unwrap();
        assert_eq!(report.removed, vec!["b"]);
        assert!(!registry.contains("b"));

        run(&mut registry, &[ok("a"), ok("b")], &mut generation, &mut sink).unwrap();
        let second = registry.get("b").map(|n| n.generation);
        assert_ne!(first, second);
        assert_eq!(registry.get("b").map(|n| n.updates), Some(1));
    }

    #[test]
    fn duplicate_ids_reject_the_tick_untouched() {
        let mut registry = NodeRegistry::new();
        let mut sink = RecordingSink::default();
        let mut generation = 0;

        run(&mut registry, &[ok("a")], &mut generation, &mut sink).unwrap();
        let err = run(&mut registry, &[ok("b"), ok("b")], &mut generation, &mut sink).unwrap_err();
        assert!(matches!(err, SceneError::DuplicateIdentity(ref id) if id == "b"));
        assert!(registry.contains("a"));
        assert!(!registry.contains("b"));
    }

    #[test]
    fn resource_failure_skips_only_that_node() {
        let mut registry = NodeRegistry::new();
        let mut sink = RecordingSink::default();
        let mut generation = 0;

        let descs = [
            Desc {
                id: "broken",
                fail: Some(SetupError::Resource(ResourceError::NotFound("wood".into()))),
                reject_update: false,
            },
            ok("fine"),
        ];
        let report = run(&mut registry, &descs, &mut generation, &mut sink).unwrap();
        assert_eq!(report.failed, vec!["broken"]);
        assert_eq!(report.added, vec!["fine"]);
        assert!(!registry.contains("broken"));
        assert!(sink.events.contains(&"failed broken".to_string()));
    }

    #[test]
    fn link_failure_is_fatal() {
        let mut registry = NodeRegistry::new();
        let mut sink = RecordingSink::default();
        let mut generation = 0;

        let descs = [Desc {
            id: "x",
            fail: Some(SetupError::Link(LinkError {
                functions: vec!["color_material".into()],
                reason: "stage mismatch".into(),
            })),
            reject_update: false,
        }];
        let err = run(&mut registry, &descs, &mut generation, &mut sink).unwrap_err();
        assert!(matches!(err, SceneError::PipelineLink { ref id, .. } if id == "x"));
    }

    #[test]
    fn failed_update_drops_the_node_until_resupplied() {
        let mut registry = NodeRegistry::new();
        let mut sink = RecordingSink::default();
        let mut generation = 0;

        run(&mut registry, &[ok("a"), ok("b")], &mut generation, &mut sink).unwrap();
        let first = registry.get("a").map(|n| n.generation);

        let rejected = Desc {
            reject_update: true,
            ..ok("a")
        };
        let report = run(&mut registry, &[rejected, ok("b")], &mut generation, &mut sink).unwrap();
        assert_eq!(report.failed, vec!["a"]);
        assert_eq!(report.updated, vec!["b"]);
        assert!(!registry.contains("a"));
        assert!(sink.events.contains(&"failed a".to_string()));
        assert_eq!(generation, 2);

        let report = run(&mut registry, &[ok("a"), ok("b")], &mut generation, &mut sink).unwrap();
        assert_eq!(report.added, vec!["a"]);
        let second = registry.get("a").map(|n| n.generation);
        assert_eq!(second, Some(3));
        assert_ne!(first, second);
        assert_eq!(registry.get("a").map(|n| n.updates), Some(1));
    }

    #[test]
    fn iteration_is_ordered_by_id() {
        let mut registry = NodeRegistry::new();
        let mut sink = RecordingSink::default();
        let mut generation = 0;

        run(&mut registry, &[ok("c"), ok("a"), ok("b")], &mut generation, &mut sink).unwrap();
        let ids: Vec<&str> = registry.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
