//! Per-container accordion state.

use pagedom::{Animator, Display, Element, Page, TransitionConfig};

use crate::index::resolve_default_index;
use crate::section::{self, Section};
use crate::settings::Settings;

/// Data key set on every container with an accordion attached.
pub const ATTACHED_MARKER: &str = "link-accordion";

/// Data key set on every heading an accordion has claimed, holding the
/// owning container's ID. A claimed heading is never bound a second time.
pub const SECTION_MARKER: &str = "link-accordion-section";

/// The accordion attached to one container.
///
/// Owns the sections discovered at attach time and their open/closed state.
/// The page is a projection of this state: heading and link classes, link
/// labels and content display are rewritten from it on every change.
#[derive(Debug, Clone)]
pub struct AccordionInstance {
    container: String,
    settings: Settings,
    transition: TransitionConfig,
    sections: Vec<Section>,
    open: Vec<bool>,
}

impl AccordionInstance {
    /// Discover sections under `container`, wrap their content, apply the
    /// initial state and insert toggle links.
    pub(crate) fn build(page: &mut Page, container: &str, settings: Settings) -> Self {
        let (runs, total) = match settings.heading_selector() {
            Ok(selector) => section::discover(page, container, &selector),
            Err(err) => {
                log::warn!("heading selector ignored for '{container}': {err}");
                (Vec::new(), 0)
            }
        };
        let default_heading = resolve_default_index(settings.default_content, total);

        let mut sections = Vec::with_capacity(runs.len());
        let mut open = Vec::with_capacity(runs.len());
        for run in runs {
            let (Some(first), Some(last)) = (run.run.first(), run.run.last()) else {
                continue;
            };
            let heading = run.heading;
            let is_open = default_heading == Some(run.heading_index);

            let wrapper = Element::div()
                .id(unique_id(page, &format!("{heading}-content")))
                .class(settings.toggle_section_class.as_str());
            let Some(content) = page.wrap_range(first, last, wrapper) else {
                log::warn!("content of heading '{heading}' could not be wrapped");
                continue;
            };
            page.set_display(&content, display_for(is_open));

            page.remove_class(&heading, settings.state_class(!is_open));
            page.add_class(&heading, settings.state_class(is_open));
            page.set_data(&heading, SECTION_MARKER, container);

            let toggle_link = if settings.link_headings {
                None
            } else {
                let link = Element::link("#")
                    .id(unique_id(page, &format!("{heading}-toggle")))
                    .class(settings.toggle_link_class.as_str())
                    .class(settings.state_class(is_open))
                    .text(settings.label(is_open));
                let link_id = link.id.clone();
                page.append_child(&heading, link);
                Some(link_id)
            };

            log::trace!("section {heading} -> {content} (open: {is_open})");
            sections.push(Section {
                heading_index: run.heading_index,
                heading,
                content,
                toggle_link,
            });
            open.push(is_open);
        }

        if default_heading.is_some() && !open.contains(&true) {
            log::debug!("default heading of '{container}' has no content; all sections closed");
        }

        page.set_data(container, ATTACHED_MARKER, "true");

        Self {
            container: container.to_string(),
            transition: settings.transition(),
            settings,
            sections,
            open,
        }
    }

    /// Undo everything `build` did to the page.
    pub(crate) fn teardown(self, page: &mut Page) {
        for section in &self.sections {
            if let Some(link) = &section.toggle_link {
                page.remove(link);
            }
            page.remove_class(&section.heading, &self.settings.opened_class);
            page.remove_class(&section.heading, &self.settings.closed_class);
            page.remove_data(&section.heading, SECTION_MARKER);
            page.unwrap(&section.content);
        }
        page.remove_data(&self.container, ATTACHED_MARKER);
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.get(index).copied().unwrap_or(false)
    }

    /// The first open section, if any. With `toggle_all` this is the only one.
    pub fn open_index(&self) -> Option<usize> {
        self.open.iter().position(|&o| o)
    }

    pub fn open_indices(&self) -> Vec<usize> {
        self.open
            .iter()
            .enumerate()
            .filter_map(|(i, &o)| o.then_some(i))
            .collect()
    }

    /// Index of the section controlled by element `id`.
    pub fn control_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.control() == id)
    }

    /// Flip section `index`, then close every other section when
    /// `toggle_all` is set. Returns false for an unknown index.
    pub(crate) fn toggle<A: Animator + ?Sized>(
        &mut self,
        page: &mut Page,
        animator: &mut A,
        index: usize,
    ) -> bool {
        let Some(&was_open) = self.open.get(index) else {
            return false;
        };
        self.apply(page, animator, index, !was_open);

        if self.settings.toggle_all {
            for other in (0..self.sections.len()).filter(|&i| i != index) {
                self.apply(page, animator, other, false);
            }
        }
        true
    }

    fn apply<A: Animator + ?Sized>(
        &mut self,
        page: &mut Page,
        animator: &mut A,
        index: usize,
        open: bool,
    ) {
        let Some(section) = self.sections.get(index) else {
            return;
        };
        let stale = self.settings.state_class(!open);
        let current = self.settings.state_class(open);

        page.remove_class(&section.heading, stale);
        page.add_class(&section.heading, current);
        if let Some(link) = &section.toggle_link {
            page.remove_class(link, stale);
            page.add_class(link, current);
            page.set_text(link, self.settings.label(open));
        }
        animator.animate(page, &section.content, display_for(open), &self.transition);

        self.open[index] = open;
    }
}

/// `base`, or `base-2`, `base-3`, ... if that ID is already in the page.
fn unique_id(page: &Page, base: &str) -> String {
    if !page.contains(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|id| !page.contains(id))
        .unwrap_or_else(|| base.to_string())
}

fn display_for(open: bool) -> Display {
    if open { Display::Shown } else { Display::Hidden }
}
