//! Host document model.
//!
//! The page markup belongs to the host; the cart runtime only looks elements
//! up by id or class, reads their `data-*` attributes, and updates text,
//! inner HTML, classes, and inline `display`. [`Document`] is that surface:
//! an arena of elements addressed by [`NodeId`], rooted at `<body>`.
//!
//! The only elements the runtime creates itself are the toast host and its
//! messages.

use std::collections::BTreeMap;

/// Handle to an element in a [`Document`].
///
/// Slots of removed elements are reused; the generation makes a handle to a
/// removed element stay dead instead of pointing at its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// A single element.
///
/// `dataset` keys are attribute names without the `data-` prefix, so
/// `data-product-id` is stored as `product-id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub dataset: BTreeMap<String, String>,
    pub text: String,
    pub inner_html: Option<String>,
    pub display: Option<String>,
}

impl Element {
    /// Create an element with the given tag name.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set the `id` attribute.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    /// Set a `data-*` attribute.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dataset.insert(key.into(), value.into());
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Whether the element carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Read a `data-*` attribute.
    #[must_use]
    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }
}

/// The element a click landed on, as seen by a delegated listener.
///
/// Only the class list and `data-*` attributes matter for dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTarget {
    pub classes: Vec<String>,
    pub dataset: BTreeMap<String, String>,
}

impl EventTarget {
    /// Target carrying a single class.
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            classes: vec![class.into()],
            dataset: BTreeMap::new(),
        }
    }

    /// Set a `data-*` attribute.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dataset.insert(key.into(), value.into());
        self
    }

    /// Whether the target carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Read a `data-*` attribute.
    #[must_use]
    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }
}

impl From<&Element> for EventTarget {
    fn from(element: &Element) -> Self {
        Self {
            classes: element.classes.clone(),
            dataset: element.dataset.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    generation: u32,
    live: bool,
}

/// The host page.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    free: Vec<usize>,
    alerts: Vec<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only `<body>`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                element: Element::new("body"),
                parent: None,
                children: Vec::new(),
                generation: 0,
                live: true,
            }],
            free: Vec::new(),
            alerts: Vec::new(),
        }
    }

    /// The `<body>` element.
    #[must_use]
    pub const fn body(&self) -> NodeId {
        NodeId {
            index: 0,
            generation: 0,
        }
    }

    /// Append an element to `<body>`.
    pub fn append(&mut self, element: Element) -> NodeId {
        self.append_child(self.body(), element)
    }

    /// Append an element under `parent`.
    ///
    /// Appending under a removed parent yields a handle that never resolves.
    pub fn append_child(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = self.allocate(element, parent);
        match self.node_mut(parent) {
            Some(parent_node) => parent_node.children.push(id),
            None => self.release(id.index),
        }
        id
    }

    /// Whether `id` is still part of the page.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Borrow an attached element.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.node(id).map(|node| &node.element)
    }

    /// Mutably borrow an attached element.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.node_mut(id).map(|node| &mut node.element)
    }

    /// Number of element slots held, live or free for reuse.
    #[must_use]
    pub fn slots(&self) -> usize {
        self.nodes.len()
    }

    /// Find the first attached element with the given `id` attribute.
    #[must_use]
    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.walk()
            .into_iter()
            .find(|&id| self.get(id).is_some_and(|el| el.id.as_deref() == Some(element_id)))
    }

    /// All attached elements carrying `class`, in document order.
    #[must_use]
    pub fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.walk()
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(|el| el.has_class(class)))
            .collect()
    }

    /// Whether any attached element carries `class`.
    #[must_use]
    pub fn contains_class(&self, class: &str) -> bool {
        !self.elements_by_class(class).is_empty()
    }

    /// Attached children of `id`, in order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    /// Set an element's text content. Returns `false` if it is gone.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> bool {
        self.get_mut(id).map(|el| el.text = text.into()).is_some()
    }

    /// Replace an element's content with markup, dropping its children.
    pub fn set_inner_html(&mut self, id: NodeId, html: impl Into<String>) -> bool {
        if !self.is_attached(id) {
            return false;
        }
        for child in self.children(id) {
            self.remove(child);
        }
        self.get_mut(id)
            .map(|el| el.inner_html = Some(html.into()))
            .is_some()
    }

    /// Set an element's inline `display` style.
    pub fn set_display(&mut self, id: NodeId, display: impl Into<String>) -> bool {
        self.get_mut(id)
            .map(|el| el.display = Some(display.into()))
            .is_some()
    }

    /// Remove an element and everything under it, freeing their slots.
    ///
    /// Returns `false` if it was already gone. `<body>` cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.body() {
            return false;
        }
        let Some(parent) = self.node(id).and_then(|node| node.parent) else {
            return false;
        };
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.retain(|&child| child != id);
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.node_mut(current) {
                stack.append(&mut node.children);
            }
            self.release(current.index);
        }
        true
    }

    /// Parent of an attached element.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// Show a blocking dialog. The host records the message.
    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    /// Drain recorded dialog messages.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Attached elements in document (pre-)order.
    fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![self.body()];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            order.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.index)
            .filter(|node| node.live && node.generation == id.generation)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.index)
            .filter(|node| node.live && node.generation == id.generation)
    }

    fn allocate(&mut self, element: Element, parent: NodeId) -> NodeId {
        if let Some(index) = self.free.pop() {
            if let Some(node) = self.nodes.get_mut(index) {
                node.element = element;
                node.parent = Some(parent);
                node.children.clear();
                node.live = true;
                return NodeId {
                    index,
                    generation: node.generation,
                };
            }
        }
        let index = self.nodes.len();
        self.nodes.push(Node {
            element,
            parent: Some(parent),
            children: Vec::new(),
            generation: 0,
            live: true,
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Free a slot; handles to it stop resolving.
    fn release(&mut self, index: usize) {
        let Some(node) = self.nodes.get_mut(index) else {
            return;
        };
        if !node.live {
            return;
        }
        node.live = false;
        node.generation = node.generation.wrapping_add(1);
        node.element = Element::default();
        node.parent = None;
        node.children.clear();
        self.free.push(index);
    }
}
