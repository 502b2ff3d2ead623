//! Dependency graph construction from addon manifests

use crate::models::dependency_graph::ModuleGraph;
use crate::models::module::AddonModule;
use crate::parsers::ManifestReader;
use crate::utils::AddonResolver;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, warn};

/// Builds module dependency graphs by walking manifests breadth-first
///
/// Traversal starts from a set of seed module names at depth 0. Each module
/// is processed exactly once, at whichever depth it is first dequeued; since
/// the queue is FIFO that is always its shallowest occurrence. A module that
/// cannot be resolved stays in the graph as a leaf and produces a warning
/// instead of aborting the build.
pub struct GraphBuilder<'a> {
    resolver: &'a AddonResolver,
}

impl<'a> GraphBuilder<'a> {
    /// Create a builder over the given resolver
    pub fn new(resolver: &'a AddonResolver) -> Self {
        Self { resolver }
    }

    /// Build the dependency graph for a set of seed modules
    ///
    /// `max_depth` bounds the traversal: modules dequeued at that depth are
    /// added as nodes but their own dependencies are not expanded. They may
    /// still gain edges from branches processed before the cutoff. Pass None
    /// for an unbounded traversal.
    pub fn build(&self, seeds: &[String], max_depth: Option<usize>) -> GraphBuildResult {
        let mut graph = ModuleGraph::new();
        let mut modules: HashMap<String, AddonModule> = HashMap::new();
        let mut processed: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<(String, usize)> =
            seeds.iter().map(|name| (name.clone(), 0)).collect();

        while let Some((name, depth)) = queue.pop_front() {
            if processed.contains(&name) {
                continue;
            }
            processed.insert(name.clone());
            graph.add_module(&name);

            if let Some(limit) = max_depth {
                if depth >= limit {
                    debug!("Depth limit reached at '{}' (depth {})", name, depth);
                    modules.entry(name).or_insert_with_key(|n| AddonModule::new(n.clone()));
                    continue;
                }
            }

            let Some(path) = self.resolver.resolve(&name) else {
                warn!("Module '{}' not found in any addons path", name);
                modules.insert(name.clone(), AddonModule::new(&name));
                continue;
            };

            let manifest = AddonResolver::manifest_path(&path)
                .and_then(|manifest_path| ManifestReader::read(&manifest_path));
            let module = AddonModule::resolved(&name, path, manifest);

            for dependency in &module.depends {
                graph.add_dependency(dependency, &name);
                if !processed.contains(dependency) {
                    queue.push_back((dependency.clone(), depth + 1));
                }
            }

            modules.insert(name, module);
        }

        GraphBuildResult { graph, modules }
    }
}

/// Outcome of a graph build: the graph plus everything learned per module
#[derive(Debug, Clone)]
pub struct GraphBuildResult {
    pub graph: ModuleGraph,
    /// Modules keyed by name; includes unresolved and depth-cut entries
    pub modules: HashMap<String, AddonModule>,
}

impl GraphBuildResult {
    /// Resolved filesystem paths per module name
    pub fn resolved_paths(&self) -> HashMap<String, std::path::PathBuf> {
        self.modules
            .iter()
            .filter_map(|(name, module)| {
                module.path.as_ref().map(|path| (name.clone(), path.clone()))
            })
            .collect()
    }

}
