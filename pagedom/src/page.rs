use crate::element::{find_element, find_element_mut, path_to, Content, Display, Element};
use crate::selector::Selector;

/// An owned document: a root element plus id-addressed traversal and
/// mutation.
///
/// Every operation takes element IDs rather than references so callers can
/// hold on to handles across mutations. Operations on unknown IDs are no-ops
/// that report `false`/`None`.
#[derive(Debug, Clone)]
pub struct Page {
    root: Element,
}

impl Page {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_element_mut(&mut self.root, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    pub fn parent_id(&self, id: &str) -> Option<String> {
        let mut path = path_to(&self.root, id)?;
        path.pop();
        path.pop()
    }

    /// IDs of all ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: &str) -> Vec<String> {
        let Some(mut path) = path_to(&self.root, id) else {
            return Vec::new();
        };
        path.pop();
        path.reverse();
        path
    }

    /// True if `id` is a strict descendant of `ancestor`.
    pub fn is_descendant(&self, id: &str, ancestor: &str) -> bool {
        self.ancestors(id).iter().any(|a| a == ancestor)
    }

    /// The next sibling element, skipping text nodes.
    pub fn next_sibling_id(&self, id: &str) -> Option<String> {
        self.following_sibling_ids(id).into_iter().next()
    }

    /// All following sibling elements in document order, skipping text nodes.
    pub fn following_sibling_ids(&self, id: &str) -> Vec<String> {
        let Some(parent) = find_parent(&self.root, id) else {
            return Vec::new();
        };
        parent
            .child_elements()
            .iter()
            .skip_while(|c| c.id != id)
            .skip(1)
            .filter(|c| !c.is_text_node())
            .map(|c| c.id.clone())
            .collect()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn matches(&self, id: &str, selector: &Selector) -> bool {
        self.get(id).is_some_and(|el| selector.matches(el))
    }

    /// All descendants of `scope` (excluding `scope` itself) matching
    /// `selector`, in document order.
    pub fn query_all(&self, scope: &str, selector: &Selector) -> Vec<String> {
        let mut found = Vec::new();
        if let Some(scope) = self.get(scope) {
            for child in scope.child_elements() {
                collect_matching(child, selector, &mut found);
            }
        }
        found
    }

    /// All elements in the page (root included) matching `selector`.
    pub fn query_page(&self, selector: &Selector) -> Vec<String> {
        let mut found = Vec::new();
        collect_matching(&self.root, selector, &mut found);
        found
    }

    // =========================================================================
    // Class list
    // =========================================================================

    /// Returns true if the class was added.
    pub fn add_class(&mut self, id: &str, class: &str) -> bool {
        match self.get_mut(id) {
            Some(el) if !el.has_class(class) => {
                el.classes.push(class.to_string());
                true
            }
            _ => false,
        }
    }

    /// Returns true if the class was present and removed.
    pub fn remove_class(&mut self, id: &str, class: &str) -> bool {
        let Some(el) = self.get_mut(id) else {
            return false;
        };
        let before = el.classes.len();
        el.classes.retain(|c| c != class);
        el.classes.len() != before
    }

    /// Flip membership of `class`. Returns whether the class is now present,
    /// or `None` if the element does not exist.
    pub fn toggle_class(&mut self, id: &str, class: &str) -> Option<bool> {
        if !self.contains(id) {
            return None;
        }
        if self.remove_class(id, class) {
            Some(false)
        } else {
            self.add_class(id, class);
            Some(true)
        }
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.get(id).is_some_and(|el| el.has_class(class))
    }

    // =========================================================================
    // Content and display
    // =========================================================================

    /// Replace the element's content with `text`.
    pub fn set_text(&mut self, id: &str, text: &str) -> bool {
        match self.get_mut(id) {
            Some(el) => {
                el.content = Content::Text(text.to_string());
                true
            }
            None => false,
        }
    }

    pub fn set_display(&mut self, id: &str, display: Display) -> bool {
        match self.get_mut(id) {
            Some(el) => {
                el.display = display;
                true
            }
            None => false,
        }
    }

    pub fn display(&self, id: &str) -> Option<Display> {
        self.get(id).map(|el| el.display)
    }

    /// Unknown elements are reported as not hidden.
    pub fn is_hidden(&self, id: &str) -> bool {
        self.get(id).is_some_and(Element::is_hidden)
    }

    pub fn set_data(&mut self, id: &str, key: &str, value: &str) -> bool {
        match self.get_mut(id) {
            Some(el) => {
                el.data.insert(key.to_string(), value.to_string());
                true
            }
            None => false,
        }
    }

    pub fn remove_data(&mut self, id: &str, key: &str) -> Option<String> {
        self.get_mut(id)?.data.remove(key)
    }

    // =========================================================================
    // Tree edits
    // =========================================================================

    pub fn append_child(&mut self, parent: &str, child: Element) -> bool {
        match self.get_mut(parent) {
            Some(el) => {
                log::trace!("append {} to {}", child.id, parent);
                el.push_child(child);
                true
            }
            None => false,
        }
    }

    /// Detach an element (and its subtree) from the page. The root cannot be
    /// removed.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let parent = find_parent_mut(&mut self.root, id)?;
        let Content::Children(children) = &mut parent.content else {
            return None;
        };
        let index = children.iter().position(|c| c.id == id)?;
        log::trace!("remove {id}");
        Some(children.remove(index))
    }

    /// Move the siblings from `first` through `last` (inclusive) into
    /// `wrapper`, which takes their place. Returns the wrapper's ID, or `None`
    /// if the two are not siblings in that order.
    pub fn wrap_range(&mut self, first: &str, last: &str, mut wrapper: Element) -> Option<String> {
        let parent = find_parent_mut(&mut self.root, first)?;
        let Content::Children(children) = &mut parent.content else {
            return None;
        };
        let start = children.iter().position(|c| c.id == first)?;
        let end = start + children[start..].iter().position(|c| c.id == last)?;

        let run: Vec<Element> = children.drain(start..=end).collect();
        log::trace!("wrap {} element(s) from {} in {}", run.len(), first, wrapper.id);
        wrapper.content = Content::Children(run);
        let wrapper_id = wrapper.id.clone();
        children.insert(start, wrapper);
        Some(wrapper_id)
    }

    /// Replace an element by its children. Returns false for unknown IDs and
    /// for the root.
    pub fn unwrap(&mut self, id: &str) -> bool {
        let Some(parent) = find_parent_mut(&mut self.root, id) else {
            return false;
        };
        let Content::Children(children) = &mut parent.content else {
            return false;
        };
        let Some(index) = children.iter().position(|c| c.id == id) else {
            return false;
        };

        let element = children.remove(index);
        let inner = match element.content {
            Content::None => Vec::new(),
            Content::Text(text) => vec![Element::text_node(text)],
            Content::Children(inner) => inner,
        };
        log::trace!("unwrap {id}");
        children.splice(index..index, inner);
        true
    }
}

fn collect_matching(element: &Element, selector: &Selector, found: &mut Vec<String>) {
    if selector.matches(element) {
        found.push(element.id.clone());
    }
    for child in element.child_elements() {
        collect_matching(child, selector, found);
    }
}

fn find_parent<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.child_elements().iter().any(|c| c.id == id) {
        return Some(root);
    }
    root.child_elements()
        .iter()
        .find_map(|child| find_parent(child, id))
}

fn find_parent_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.child_elements().iter().any(|c| c.id == id) {
        return Some(root);
    }
    match &mut root.content {
        Content::Children(children) => children
            .iter_mut()
            .find_map(|child| find_parent_mut(child, id)),
        _ => None,
    }
}
