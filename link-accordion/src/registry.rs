//! Registry of attached accordions and delegated click handling.

use std::collections::HashMap;

use pagedom::{AnimationState, Animator, Event, EventContext, MouseButton, Page, Selector};

use crate::error::AccordionError;
use crate::instance::{ATTACHED_MARKER, AccordionInstance};
use crate::settings::Settings;

/// Result of an attach call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// A new accordion was attached with this many sections.
    Attached { sections: usize },
    /// The container already had an accordion; nothing was changed.
    AlreadyAttached,
}

/// All accordions attached to a page, keyed by container ID.
///
/// The registry is the single owner of accordion state: it decides where a
/// click lands, updates the owning instance, and drives the animator.
/// Attaching to a container twice is a no-op; use [`Accordions::reattach`]
/// to replace an accordion with new settings.
#[derive(Debug)]
pub struct Accordions<A: Animator = AnimationState> {
    instances: HashMap<String, AccordionInstance>,
    animator: A,
}

impl Accordions {
    /// Create a registry that animates with [`AnimationState`].
    pub fn new() -> Self {
        Self::with_animator(AnimationState::new())
    }
}

impl Default for Accordions {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Animator> Accordions<A> {
    pub fn with_animator(animator: A) -> Self {
        Self {
            instances: HashMap::new(),
            animator,
        }
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    pub fn instance(&self, container: &str) -> Option<&AccordionInstance> {
        self.instances.get(container)
    }

    pub fn is_attached(&self, container: &str) -> bool {
        self.instances.contains_key(container)
    }

    /// Containers with an accordion attached, in no particular order.
    pub fn containers(&self) -> impl Iterator<Item = &str> {
        self.instances.keys().map(String::as_str)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attach an accordion to `container`.
    ///
    /// Headings are discovered once, now; later page changes are not
    /// observed. A heading selector that does not parse attaches an accordion
    /// with no sections.
    pub fn attach(
        &mut self,
        page: &mut Page,
        container: &str,
        settings: Settings,
    ) -> Result<AttachOutcome, AccordionError> {
        let Some(element) = page.get(container) else {
            return Err(AccordionError::ContainerNotFound(container.to_string()));
        };

        if self.instances.contains_key(container) || element.get_data(ATTACHED_MARKER).is_some() {
            log::debug!("accordion already attached to '{container}'");
            return Ok(AttachOutcome::AlreadyAttached);
        }

        let instance = AccordionInstance::build(page, container, settings);
        let sections = instance.len();
        log::debug!(
            "attached accordion to '{container}': {sections} section(s), open: {:?}",
            instance.open_index()
        );
        self.instances.insert(container.to_string(), instance);
        Ok(AttachOutcome::Attached { sections })
    }

    /// Attach independently to every element in the page matching
    /// `selector`. Returns the containers that got a new accordion, in
    /// document order.
    ///
    /// Nested matches are attached innermost first, so each heading goes to
    /// the closest matching container around it.
    pub fn attach_all(
        &mut self,
        page: &mut Page,
        selector: &str,
        settings: &Settings,
    ) -> Vec<String> {
        let selector = match Selector::parse(selector) {
            Ok(selector) => selector,
            Err(err) => {
                log::warn!("container selector ignored: {err}");
                return Vec::new();
            }
        };

        let mut attached = Vec::new();
        for container in page.query_page(&selector).into_iter().rev() {
            match self.attach(page, &container, settings.clone()) {
                Ok(AttachOutcome::Attached { .. }) => attached.push(container),
                Ok(AttachOutcome::AlreadyAttached) => {}
                Err(err) => log::warn!("attach to '{container}' failed: {err}"),
            }
        }
        attached.reverse();
        attached
    }

    /// Remove the accordion from `container`: toggle links are removed,
    /// content wrappers are unwrapped and state classes are cleared.
    /// Returns false if nothing was attached.
    pub fn detach(&mut self, page: &mut Page, container: &str) -> bool {
        let Some(instance) = self.instances.remove(container) else {
            return false;
        };
        for section in instance.sections() {
            self.animator.cancel(&section.content);
        }
        instance.teardown(page);
        log::debug!("detached accordion from '{container}'");
        true
    }

    /// Detach any existing accordion from `container`, then attach a new one
    /// with `settings`.
    pub fn reattach(
        &mut self,
        page: &mut Page,
        container: &str,
        settings: Settings,
    ) -> Result<AttachOutcome, AccordionError> {
        self.detach(page, container);
        self.attach(page, container, settings)
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Handle an event delegated from the page.
    ///
    /// A primary-button click on a section's control, or on anything inside
    /// it, toggles that section. When several accordions are nested the
    /// innermost control wins. The default action is prevented whenever a
    /// navigable link lies between the click target and the control
    /// (inclusive). Returns true if a section was toggled.
    pub fn dispatch(&mut self, page: &mut Page, event: &Event, cx: &mut EventContext) -> bool {
        let Event::Click { target, button } = event;
        if *button != MouseButton::Left {
            return false;
        }

        let mut chain = vec![target.clone()];
        chain.extend(page.ancestors(target));

        let Some((depth, container, index)) = self.find_control(&chain) else {
            return false;
        };

        if chain[..=depth]
            .iter()
            .any(|id| page.get(id).is_some_and(|el| el.is_navigable_link()))
        {
            cx.prevent_default();
        }

        log::debug!("click on '{target}' toggles section {index} of '{container}'");
        self.toggle(page, &container, index).unwrap_or(false)
    }

    /// Innermost control on `chain` whose container is further up the chain.
    fn find_control(&self, chain: &[String]) -> Option<(usize, String, usize)> {
        chain.iter().enumerate().find_map(|(depth, id)| {
            self.instances.values().find_map(|instance| {
                let index = instance.control_index(id)?;
                chain[depth + 1..]
                    .iter()
                    .any(|a| a == instance.container())
                    .then(|| (depth, instance.container().to_string(), index))
            })
        })
    }

    /// Toggle section `index` exactly as a click on its control would.
    pub fn toggle(
        &mut self,
        page: &mut Page,
        container: &str,
        index: usize,
    ) -> Result<bool, AccordionError> {
        let instance = lookup(&mut self.instances, container, index)?;
        Ok(instance.toggle(page, &mut self.animator, index))
    }

    /// Open section `index` if it is closed. Returns true if it changed.
    pub fn open(
        &mut self,
        page: &mut Page,
        container: &str,
        index: usize,
    ) -> Result<bool, AccordionError> {
        if lookup(&mut self.instances, container, index)?.is_open(index) {
            return Ok(false);
        }
        self.toggle(page, container, index)
    }

    /// Close section `index` if it is open. Returns true if it changed.
    pub fn close(
        &mut self,
        page: &mut Page,
        container: &str,
        index: usize,
    ) -> Result<bool, AccordionError> {
        if !lookup(&mut self.instances, container, index)?.is_open(index) {
            return Ok(false);
        }
        self.toggle(page, container, index)
    }
}

/// The instance attached to `container`, checked to have a section `index`.
fn lookup<'a>(
    instances: &'a mut HashMap<String, AccordionInstance>,
    container: &str,
    index: usize,
) -> Result<&'a mut AccordionInstance, AccordionError> {
    let instance = instances
        .get_mut(container)
        .ok_or_else(|| AccordionError::NotAttached(container.to_string()))?;
    if index >= instance.len() {
        return Err(AccordionError::SectionOutOfRange {
            container: container.to_string(),
            index,
            len: instance.len(),
        });
    }
    Ok(instance)
}
