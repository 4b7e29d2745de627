//! Renderers remembered per node across passes.

use std::collections::HashMap;

use crate::converter::renderer::Renderer;
use crate::dom::NodeId;

/// Side map from node identity to the renderer created for it.
///
/// A renderer is created the first time its node is visited and reused on
/// every later visit, which is what lets a table's second pass see the
/// row and column positions assigned during the first.
#[derive(Debug, Default)]
pub struct RenderCache {
    renderers: HashMap<NodeId, Renderer>,
}

impl RenderCache {
    /// Renderer created for `id`, if the node has been rendered.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Renderer> {
        self.renderers.get(&id)
    }

    /// Number of cached renderers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    /// Whether no renderer has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Move a renderer out while it renders.
    pub(crate) fn take(&mut self, id: NodeId) -> Option<Renderer> {
        self.renderers.remove(&id)
    }

    /// Put a renderer back after it rendered.
    pub(crate) fn put(&mut self, id: NodeId, renderer: Renderer) {
        self.renderers.insert(id, renderer);
    }
}
