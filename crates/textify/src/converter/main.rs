//! Recursive render pipeline.
//!
//! The walker visits the element tree depth first. Each element gets a
//! [`Renderer`] (created on first visit, reused afterwards) that collects its
//! children's output in a line buffer and then lays it out: before/after
//! hooks, then the padding, border and margin layers.

use crate::converter::box_model::{BoxLayer, Layer};
use crate::converter::cache::RenderCache;
use crate::converter::renderer::Renderer;
use crate::converter::table::{TableId, TablePhase, TableRegistry, TableState};
use crate::converter::tag::TagKind;
use crate::dom::{Document, NodeId, NodeKind};
use crate::error::{ConversionError, Result};
use crate::options::TextifyOptions;

/// Context handed down the walk: the innermost enclosing table, so rows can
/// register with it without searching for it.
#[derive(Debug, Clone, Copy, Default)]
struct Scope {
    table: Option<TableId>,
}

/// Renders a [`Document`] as Markdown-style text.
///
/// The renderer cache and table state outlive a single call, so rendering
/// the same document twice yields the same text.
#[derive(Debug)]
pub struct Textify<'a> {
    document: &'a Document,
    options: TextifyOptions,
    cache: RenderCache,
    tables: TableRegistry,
}

impl<'a> Textify<'a> {
    /// Prepare to render `document`.
    #[must_use]
    pub fn new(document: &'a Document, options: TextifyOptions) -> Self {
        Self {
            document,
            options,
            cache: RenderCache::default(),
            tables: TableRegistry::default(),
        }
    }

    /// Render the whole document from its root element.
    ///
    /// Returns the raw layout, including box padding and margin lines.
    pub fn render(&mut self) -> String {
        match self.document.root() {
            Some(root) => self.render_node(root).unwrap_or_default(),
            None => String::new(),
        }
    }

    /// Render the subtree rooted at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidNode`] if `id` is not an element of
    /// the document.
    pub fn render_node(&mut self, id: NodeId) -> Result<String> {
        if self.document.tag_name(id).is_none() {
            return Err(ConversionError::InvalidNode(id.index()));
        }
        let Some(mut renderer) = self.obtain(id, None, Scope::default()) else {
            return Err(ConversionError::InvalidNode(id.index()));
        };
        let output = self.render_with(id, &mut renderer, Scope::default());
        self.cache.put(id, renderer);
        Ok(output)
    }

    /// Renderers created so far.
    #[must_use]
    pub const fn cache(&self) -> &RenderCache {
        &self.cache
    }

    /// Column and row state of a rendered `<table>` element.
    #[must_use]
    pub fn table_state(&self, id: NodeId) -> Option<&TableState> {
        match self.cache.get(id)?.kind() {
            TagKind::Table { table } => self.tables.get(*table),
            _ => None,
        }
    }

    /// Fetch the cached renderer for `id` with its content cleared, or create
    /// one. Creation is where list items take their number and table parts
    /// register their row and column.
    fn obtain(&mut self, id: NodeId, parent: Option<&mut Renderer>, scope: Scope) -> Option<Renderer> {
        if let Some(mut renderer) = self.cache.take(id) {
            log::trace!("reusing renderer for <{}>", renderer.tag());
            renderer.clear();
            return Some(renderer);
        }

        let document = self.document;
        let NodeKind::Element { tag, attrs } = &document.get(id)?.kind else {
            return None;
        };
        let kind = TagKind::resolve(tag, parent, scope.table, &mut self.tables);
        log::trace!("creating renderer for <{tag}> as {kind:?}");
        Some(Renderer::new(tag, kind, attrs, &self.options))
    }

    fn render_with(&mut self, id: NodeId, renderer: &mut Renderer, scope: Scope) -> String {
        match renderer.kind() {
            TagKind::Ignored => return String::new(),
            TagKind::Table { table } => {
                let table = *table;
                self.render_table(id, table, renderer, Scope { table: Some(table) });
            }
            _ => self.render_children(id, renderer, scope),
        }
        self.layout(renderer)
    }

    /// Measuring pass, then aligning pass over the same renderers.
    fn render_table(&mut self, id: NodeId, table: TableId, renderer: &mut Renderer, scope: Scope) {
        for phase in [TablePhase::Measuring, TablePhase::Aligning] {
            renderer.clear();
            if let Some(state) = self.tables.get_mut(table) {
                state.begin_pass(phase);
            }
            self.render_children(id, renderer, scope);
        }
        if let Some(state) = self.tables.get_mut(table) {
            state.finish();
        }
    }

    fn render_children(&mut self, id: NodeId, renderer: &mut Renderer, scope: Scope) {
        let document = self.document;
        for &child in document.children(id) {
            let Some(node) = document.get(child) else { continue };
            match &node.kind {
                NodeKind::Text(text) | NodeKind::CData(text) => {
                    if let Some(text) = renderer.format(text) {
                        renderer.append_text(&text);
                    }
                }
                NodeKind::Element { .. } => {
                    let Some(mut child_renderer) = self.obtain(child, Some(&mut *renderer), scope) else {
                        continue;
                    };
                    let output = self.render_with(child, &mut child_renderer, scope);
                    if !renderer.absorb_legend(&child_renderer) {
                        renderer.append_child(&output, child_renderer.is_block());
                    }
                    self.cache.put(child, child_renderer);
                }
            }
        }
    }

    /// Assemble the final text of an element.
    fn layout(&mut self, renderer: &mut Renderer) -> String {
        if matches!(renderer.kind(), TagKind::Row { .. }) {
            return renderer.zip_row();
        }

        renderer.prepare(self.options.rule_width);

        let before = renderer.before();
        renderer.buffer_mut().prepend(&before);
        let after = renderer.after();
        renderer.buffer_mut().append(&after, false);
        renderer.underline();

        self.report_cell_width(renderer);

        if renderer.is_block() {
            self.draw_layer(renderer, Layer::Padding);
            renderer.buffer_mut().measure();
            self.draw_layer(renderer, Layer::Border);
            self.draw_layer(renderer, Layer::Margin);
        }

        renderer.text()
    }

    /// Cells publish their content width to the column registry once per
    /// table pass, before any padding is drawn.
    fn report_cell_width(&mut self, renderer: &mut Renderer) {
        let width = renderer.width().max;
        if let TagKind::Cell { link, .. } = renderer.kind_mut() {
            link.report(&mut self.tables, width);
        }
    }

    /// Width every line is padded to: the registered column width for table
    /// cells, the widest content line otherwise.
    fn box_width(&self, renderer: &Renderer) -> usize {
        match renderer.kind() {
            TagKind::Cell { link, .. } => self.tables.column_width(link.table, link.column),
            _ => renderer.width().max,
        }
    }

    fn draw_layer(&self, renderer: &mut Renderer, layer: Layer) {
        if !renderer.kind().draws(layer) {
            return;
        }
        let width = self.box_width(renderer);
        let sides = renderer.decoration().sides(layer);
        let marks = renderer.marks().edges(layer).clone();
        let corner = renderer.marks().corner.clone();
        let legend = renderer.border_legend(self.options.debug).map(str::to_string);

        BoxLayer {
            layer,
            sides,
            marks: &marks,
            corner: corner.as_deref(),
            width,
            legend: legend.as_deref(),
        }
        .apply(renderer.buffer_mut().lines_mut());
    }
}
