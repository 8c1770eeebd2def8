//! Retained-mode node tree standing in for a browser document.
//!
//! A [`Scene`] owns every node in an arena and always contains a `body`
//! element. Nodes created by [`Scene::parse`] or [`Scene::create_element`]
//! start detached; a node is *attached* once `body` is among its ancestors.
//!
//! Layout is supplied by the host through [`Scene::set_layout`]. Nodes
//! without an explicit box report a width measured from their text with the
//! scene's [`TextMetrics`].

use crate::geometry::Rect;
use crate::number::js_number_string;
use crate::selector::{Selector, SelectorError};
use crate::template::{self, TemplateError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a node in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of this node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A CSS-like length used by transforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Length {
    /// Absolute pixels
    Px(f64),
    /// Percentage of the node's own size
    Percent(f64),
}

impl Length {
    /// Numeric part of the length.
    #[must_use]
    pub const fn value(&self) -> f64 {
        match self {
            Self::Px(v) | Self::Percent(v) => *v,
        }
    }
}

impl From<f64> for Length {
    fn from(px: f64) -> Self {
        Self::Px(px)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{}px", js_number_string(*v)),
            Self::Percent(v) => write!(f, "{}%", js_number_string(*v)),
        }
    }
}

/// A 2D translation applied to a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Translate {
    /// Horizontal offset
    pub x: Length,
    /// Vertical offset
    pub y: Length,
}

impl Translate {
    /// Create a translation.
    #[must_use]
    pub const fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }

    /// CSS `transform` value for this translation.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("translate3d({}, {}, 0)", self.x, self.y)
    }
}

/// Text measurement used for nodes without a host-assigned box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    /// Advance width of one character
    pub glyph_width: f64,
    /// Padding added on each side of non-empty text
    pub horizontal_padding: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            glyph_width: 8.0,
            horizontal_padding: 4.0,
        }
    }
}

impl TextMetrics {
    /// Width of `text` rendered on a single line.
    #[must_use]
    pub fn measure(&self, text: &str) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let chars = text.chars().count() as f64;
        chars.mul_add(self.glyph_width, 2.0 * self.horizontal_padding)
    }
}

/// A single element in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    layout: Option<Rect>,
    transform: Option<Translate>,
}

impl Node {
    fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            classes: Vec::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
            layout: None,
            transform: None,
        }
    }

    /// Element tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Value of the `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Value of an attribute. `class` is exposed through [`Self::classes`].
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Class list in insertion order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Check for a class.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Text content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parent node, if attached to one.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Current transform.
    #[must_use]
    pub const fn transform(&self) -> Option<Translate> {
        self.transform
    }
}

/// Arena of nodes rooted at a `body` element.
///
/// Node ids are allocated sequentially and never recycled.
#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<Option<Node>>,
    body: NodeId,
    metrics: TextMetrics,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a scene with an empty `body` and default text metrics.
    #[must_use]
    pub fn new() -> Self {
        Self::with_metrics(TextMetrics::default())
    }

    /// Create a scene measuring text with `metrics`.
    #[must_use]
    pub fn with_metrics(metrics: TextMetrics) -> Self {
        Self {
            nodes: vec![Some(Node::new("body"))],
            body: NodeId(0),
            metrics,
        }
    }

    /// The document body.
    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.body
    }

    /// Text metrics used for measuring unsized nodes.
    #[must_use]
    pub const fn metrics(&self) -> TextMetrics {
        self.metrics
    }

    /// Number of live nodes, `body` included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// A scene always holds at least its body.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Look up a live node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Whether `id` refers to a live node.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node::new(tag)));
        id
    }

    /// Parse a markup fragment into a detached subtree and return its root.
    ///
    /// # Errors
    ///
    /// Returns an error if the fragment is malformed or does not have
    /// exactly one root element.
    pub fn parse(&mut self, markup: &str) -> Result<NodeId, TemplateError> {
        let element = template::parse_fragment(markup)?;
        Ok(self.instantiate(&element, None))
    }

    fn instantiate(&mut self, element: &template::Element, parent: Option<NodeId>) -> NodeId {
        let id = self.create_element(&element.tag);
        if let Some(node) = self.node_mut(id) {
            for (name, value) in &element.attributes {
                if name == "class" {
                    node.classes
                        .extend(value.split_whitespace().map(ToString::to_string));
                } else {
                    node.attributes.push((name.clone(), value.clone()));
                }
            }
            node.text.clone_from(&element.text);
            node.parent = parent;
        }
        for child in &element.children {
            let child_id = self.instantiate(child, Some(id));
            if let Some(node) = self.node_mut(id) {
                node.children.push(child_id);
            }
        }
        id
    }

    /// First descendant of `root` matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns an error if `selector` does not parse.
    pub fn find(&self, selector: &str, root: NodeId) -> Result<Option<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.find_matching(&selector, root))
    }

    /// First descendant of `root` matching an already parsed selector.
    #[must_use]
    pub fn find_matching(&self, selector: &Selector, root: NodeId) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|&id| selector.matches(self, id))
    }

    /// All descendants of `root` matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns an error if `selector` does not parse.
    pub fn find_all(&self, selector: &str, root: NodeId) -> Result<Vec<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(root)
            .into_iter()
            .filter(|&id| selector.matches(self, id))
            .collect())
    }

    /// Descendants of `root` in pre-order, excluding `root`.
    #[must_use]
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .node(root)
            .map(|n| n.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.node(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Parent of `id`.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    #[must_use]
    pub fn contains_node(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return self.contains(id);
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether `id` is `body` or one of its descendants.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.contains_node(self.body, id)
    }

    /// Append `child` to `parent`, moving it from any previous parent.
    ///
    /// Returns `false` when either node is dead or the move would create a
    /// cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.contains(parent) || !self.contains(child) || self.contains_node(child, parent) {
            return false;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        true
    }

    /// Remove `id` from its parent. Returns whether it had one.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|&c| c != id);
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = None;
        }
        true
    }

    /// Detach `id` and free it together with all of its descendants.
    ///
    /// The body cannot be removed. Returns the number of nodes freed.
    /// Freed slots are never reused, so a stale [`NodeId`] stays dead
    /// instead of aliasing a newer node. The arena only grows.
    pub fn remove_subtree(&mut self, id: NodeId) -> usize {
        if id == self.body || !self.contains(id) {
            return 0;
        }
        self.detach(id);
        let mut doomed = self.descendants(id);
        doomed.push(id);
        for &node in &doomed {
            if let Some(slot) = self.nodes.get_mut(node.0) {
                *slot = None;
            }
        }
        tracing::trace!(root = id.index(), freed = doomed.len(), "removed subtree");
        doomed.len()
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            if !node.has_class(class) {
                node.classes.push(class.to_string());
            }
        }
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            node.classes.retain(|c| c != class);
        }
    }

    /// Check for a class on a live node.
    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).is_some_and(|n| n.has_class(class))
    }

    /// Replace the text content of a node.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.text = text.into();
        }
    }

    /// Text content of a node, empty for dead nodes.
    #[must_use]
    pub fn text(&self, id: NodeId) -> &str {
        self.node(id).map_or("", Node::text)
    }

    /// Assign the layout box the host computed for a node.
    pub fn set_layout(&mut self, id: NodeId, bounds: Rect) {
        if let Some(node) = self.node_mut(id) {
            node.layout = Some(bounds);
        }
    }

    /// Host-assigned layout box, if any.
    #[must_use]
    pub fn layout(&self, id: NodeId) -> Option<Rect> {
        self.node(id).and_then(|n| n.layout)
    }

    /// Rendered width: the layout width if assigned, else the measured text.
    #[must_use]
    pub fn client_width(&self, id: NodeId) -> f64 {
        self.node(id).map_or(0.0, |node| {
            node.layout
                .map_or_else(|| self.metrics.measure(&node.text), |bounds| bounds.width)
        })
    }

    /// Left offset of a node on the page.
    #[must_use]
    pub fn offset_left(&self, id: NodeId) -> f64 {
        self.layout(id).map_or(0.0, |bounds| bounds.x)
    }

    /// Translate a node by `(x, y)`.
    pub fn translate(&mut self, id: NodeId, x: impl Into<Length>, y: impl Into<Length>) {
        if let Some(node) = self.node_mut(id) {
            node.transform = Some(Translate::new(x.into(), y.into()));
        }
    }

    /// Current transform of a node.
    #[must_use]
    pub fn transform(&self, id: NodeId) -> Option<Translate> {
        self.node(id).and_then(Node::transform)
    }
}
