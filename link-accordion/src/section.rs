//! Heading/content discovery.

use pagedom::{Page, Selector};

use crate::instance::SECTION_MARKER;

/// One collapsible section after attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Position of the heading among all headings the selector matched,
    /// including headings skipped for having no content.
    pub heading_index: usize,

    /// The heading element.
    pub heading: String,

    /// The generated wrapper holding the section's content siblings.
    pub content: String,

    /// The generated toggle link, unless headings are clicked directly.
    pub toggle_link: Option<String>,
}

impl Section {
    /// The element whose clicks toggle this section.
    pub fn control(&self) -> &str {
        self.toggle_link.as_deref().unwrap_or(&self.heading)
    }
}

/// A heading with the run of sibling elements that form its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeadingRun {
    pub heading_index: usize,
    pub heading: String,
    pub run: Vec<String>,
}

/// Find every heading under `container` and the siblings following it up to
/// (excluding) the next heading. Headings already claimed by another
/// accordion are left out. Returns the runs of headings that have content,
/// and the total number of headings matched.
pub(crate) fn discover(
    page: &Page,
    container: &str,
    selector: &Selector,
) -> (Vec<HeadingRun>, usize) {
    let headings: Vec<String> = page
        .query_all(container, selector)
        .into_iter()
        .filter(|heading| match claimed_by(page, heading) {
            Some(owner) => {
                log::trace!("heading {heading} already belongs to '{owner}', skipping");
                false
            }
            None => true,
        })
        .collect();
    let total = headings.len();

    let runs = headings
        .into_iter()
        .enumerate()
        .filter_map(|(heading_index, heading)| {
            let run: Vec<String> = page
                .following_sibling_ids(&heading)
                .into_iter()
                .take_while(|id| !page.matches(id, selector))
                .collect();
            if run.is_empty() {
                log::trace!("heading {heading} has no content, skipping");
                return None;
            }
            Some(HeadingRun {
                heading_index,
                heading,
                run,
            })
        })
        .collect();

    (runs, total)
}

fn claimed_by<'a>(page: &'a Page, heading: &str) -> Option<&'a String> {
    page.get(heading)?.get_data(SECTION_MARKER)
}
