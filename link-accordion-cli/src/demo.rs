use pagedom::{Element, Page};

/// ID of the container holding the demo sections.
pub const CONTAINER_ID: &str = "faq";

/// A page with `sections` heading/paragraph pairs inside one container.
/// Headings are `section-{i}`; paragraphs are `section-{i}-body`.
pub fn demo_page(sections: usize) -> Page {
    let container = Element::div().id(CONTAINER_ID).children((0..sections).flat_map(|i| {
        [
            Element::heading(2, format!("Section {}", i + 1)).id(format!("section-{i}")),
            Element::p(format!("Body of section {}", i + 1)).id(format!("section-{i}-body")),
        ]
    }));
    Page::new(Element::new("body").id("page").child(container))
}
