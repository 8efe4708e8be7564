use link_accordion::{
    ATTACHED_MARKER, AccordionError, Accordions, AttachOutcome, SECTION_MARKER, Settings,
};
use pagedom::{Element, NoAnimation, Page};

fn three_sections() -> Page {
    Page::new(
        Element::div().id("root").child(
            Element::div()
                .id("faq")
                .child(Element::heading(2, "Zero").id("h0"))
                .child(Element::p("zero").id("c0"))
                .child(Element::heading(2, "One").id("h1"))
                .child(Element::p("one").id("c1"))
                .child(Element::heading(2, "Two").id("h2"))
                .child(Element::p("two").id("c2")),
        ),
    )
}

fn attach(page: &mut Page, settings: Settings) -> Accordions<NoAnimation> {
    let mut accordions = Accordions::with_animator(NoAnimation);
    accordions.attach(page, "faq", settings).unwrap();
    accordions
}

fn visible(page: &Page) -> Vec<usize> {
    (0..3)
        .filter(|i| !page.is_hidden(&format!("h{i}-content")))
        .collect()
}

// ============================================================================
// Initial state
// ============================================================================

#[test]
fn test_default_content_opens_one_section() {
    let mut page = three_sections();
    let accordions = attach(&mut page, Settings::default().default_content(Some(1)));

    assert_eq!(visible(&page), vec![1]);
    assert!(page.has_class("h1", "toggled-open"));
    assert!(!page.has_class("h1", "toggled-closed"));
    for closed in ["h0", "h2"] {
        assert!(page.has_class(closed, "toggled-closed"));
        assert!(!page.has_class(closed, "toggled-open"));
    }
    assert_eq!(accordions.instance("faq").unwrap().open_index(), Some(1));
}

#[test]
fn test_negative_default_counts_from_end() {
    let mut page = three_sections();
    attach(&mut page, Settings::default().default_content(Some(-1)));

    assert_eq!(visible(&page), vec![2]);
    assert!(page.has_class("h2", "toggled-open"));
}

#[test]
fn test_out_of_range_default_opens_nothing() {
    for index in [Some(99), Some(-4), None] {
        let mut page = three_sections();
        let accordions = attach(&mut page, Settings::default().default_content(index));

        assert!(visible(&page).is_empty(), "default {index:?}");
        assert_eq!(accordions.instance("faq").unwrap().open_index(), None);
    }
}

#[test]
fn test_toggle_link_labels_after_attach() {
    let mut page = three_sections();
    attach(&mut page, Settings::default().default_content(Some(0)));

    let open = page.get("h0-toggle").unwrap();
    assert_eq!(open.text_content(), "Close");
    assert!(open.is_navigable_link());
    assert_eq!(open.classes, vec!["section-toggle", "toggled-open"]);

    let closed = page.get("h1-toggle").unwrap();
    assert_eq!(closed.text_content(), "Open");
    assert_eq!(closed.classes, vec!["section-toggle", "toggled-closed"]);
    assert_eq!(page.parent_id("h1-toggle"), Some("h1".to_string()));
}

#[test]
fn test_custom_labels_and_classes() {
    let mut page = three_sections();
    let settings = Settings::default()
        .open_text("Show")
        .close_text("Hide")
        .opened_class("is-open")
        .closed_class("is-closed")
        .toggle_link_class("toggler")
        .default_content(Some(2));
    attach(&mut page, settings);

    assert_eq!(page.get("h2-toggle").unwrap().text_content(), "Hide");
    assert_eq!(page.get("h0-toggle").unwrap().text_content(), "Show");
    assert!(page.has_class("h0-toggle", "toggler"));
    assert!(page.has_class("h2", "is-open"));
    assert!(page.has_class("h0", "is-closed"));
}

#[test]
fn test_link_headings_appends_no_links() {
    let mut page = three_sections();
    let accordions = attach(&mut page, Settings::default().link_headings(true));

    for i in 0..3 {
        assert!(!page.contains(&format!("h{i}-toggle")));
    }
    let instance = accordions.instance("faq").unwrap();
    assert_eq!(instance.sections()[1].control(), "h1");
    assert_eq!(page.get("h1").unwrap().text_content(), "One");
}

// ============================================================================
// Section discovery
// ============================================================================

#[test]
fn test_content_groups_siblings_until_next_heading() {
    let mut page = Page::new(
        Element::div()
            .id("faq")
            .child(Element::heading(2, "A").id("a"))
            .child(Element::p("a1").id("a1"))
            .child(Element::new("ul").id("a2"))
            .child(Element::heading(2, "B").id("b"))
            .child(Element::p("b1").id("b1")),
    );
    let accordions = attach(&mut page, Settings::default());

    let wrapper = page.get("a-content").unwrap();
    assert!(wrapper.has_class("toggle-section"));
    assert!(wrapper.is_hidden());
    let grouped: Vec<&str> = wrapper.child_elements().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(grouped, vec!["a1", "a2"]);
    assert_eq!(page.next_sibling_id("a"), Some("a-content".to_string()));
    assert_eq!(accordions.instance("faq").unwrap().len(), 2);
}

#[test]
fn test_heading_without_content_is_skipped() {
    let mut page = Page::new(
        Element::div()
            .id("faq")
            .child(Element::heading(2, "Empty").id("e"))
            .child(Element::heading(2, "Full").id("f"))
            .child(Element::p("body").id("f1"))
            .child(Element::heading(2, "Last").id("l")),
    );
    let accordions = attach(&mut page, Settings::default().default_content(Some(1)));

    let instance = accordions.instance("faq").unwrap();
    assert_eq!(instance.len(), 1);
    assert_eq!(instance.sections()[0].heading, "f");
    assert_eq!(instance.sections()[0].heading_index, 1);
    assert_eq!(instance.open_index(), Some(0));

    for skipped in ["e", "l"] {
        assert!(!page.contains(&format!("{skipped}-toggle")));
        assert!(page.get(skipped).unwrap().classes.is_empty());
    }
}

#[test]
fn test_generated_ids_avoid_existing_ones() {
    let mut page = Page::new(
        Element::div()
            .id("root")
            .child(
                Element::div()
                    .id("faq")
                    .child(Element::heading(2, "Zero").id("h0"))
                    .child(Element::p("zero").id("h0-content")),
            )
            .child(Element::p("elsewhere").id("h0-toggle")),
    );
    let mut accordions = attach(&mut page, Settings::default());

    let section = accordions.instance("faq").unwrap().sections()[0].clone();
    assert_eq!(section.content, "h0-content-2");
    assert_eq!(section.toggle_link.as_deref(), Some("h0-toggle-2"));
    let wrapped: Vec<&str> = page
        .get("h0-content-2")
        .unwrap()
        .child_elements()
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(wrapped, vec!["h0-content"]);

    assert!(accordions.toggle(&mut page, "faq", 0).unwrap());
    assert!(!page.is_hidden("h0-content-2"));
    assert_eq!(page.get("h0-toggle").unwrap().text_content(), "elsewhere");
}

#[test]
fn test_headings_claimed_until_detach() {
    let mut page = three_sections();
    let mut accordions = attach(&mut page, Settings::default());
    assert_eq!(
        page.get("h0").unwrap().get_data(SECTION_MARKER).map(String::as_str),
        Some("faq")
    );

    accordions.detach(&mut page, "faq");
    assert!(page.get("h0").unwrap().get_data(SECTION_MARKER).is_none());
}

#[test]
fn test_default_on_contentless_heading_opens_nothing() {
    let mut page = Page::new(
        Element::div()
            .id("faq")
            .child(Element::heading(2, "Empty").id("e"))
            .child(Element::heading(2, "Full").id("f"))
            .child(Element::p("body")),
    );
    let accordions = attach(&mut page, Settings::default().default_content(Some(0)));

    assert_eq!(accordions.instance("faq").unwrap().open_index(), None);
    assert!(page.is_hidden("f-content"));
}

#[test]
fn test_custom_heading_selector() {
    let mut page = Page::new(
        Element::div()
            .id("faq")
            .child(Element::new("dt").class("q").id("q0"))
            .child(Element::new("dd").id("a0"))
            .child(Element::new("dt").id("not-a-question"))
            .child(Element::new("dt").class("q").id("q1"))
            .child(Element::new("dd").id("a1")),
    );
    let accordions = attach(&mut page, Settings::default().heading_element("dt.q"));

    let instance = accordions.instance("faq").unwrap();
    assert_eq!(instance.len(), 2);
    let first: Vec<&str> = page
        .get("q0-content")
        .unwrap()
        .child_elements()
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(first, vec!["a0", "not-a-question"]);
}

// ============================================================================
// Misuse
// ============================================================================

#[test]
fn test_selector_matching_nothing_is_noop() {
    let mut page = three_sections();
    let mut accordions = Accordions::with_animator(NoAnimation);

    let outcome = accordions
        .attach(&mut page, "faq", Settings::default().heading_element("h5"))
        .unwrap();
    assert_eq!(outcome, AttachOutcome::Attached { sections: 0 });
    assert!(!page.contains("h0-toggle"));
    assert!(!page.is_hidden("c0"));
}

#[test]
fn test_malformed_selector_is_noop() {
    let mut page = three_sections();
    let mut accordions = Accordions::with_animator(NoAnimation);

    let outcome = accordions
        .attach(&mut page, "faq", Settings::default().heading_element("h2 >"))
        .unwrap();
    assert_eq!(outcome, AttachOutcome::Attached { sections: 0 });
    assert!(page.get("h0").unwrap().classes.is_empty());
}

#[test]
fn test_missing_container() {
    let mut page = three_sections();
    let mut accordions = Accordions::with_animator(NoAnimation);

    assert_eq!(
        accordions.attach(&mut page, "nope", Settings::default()),
        Err(AccordionError::ContainerNotFound("nope".to_string()))
    );
}

#[test]
fn test_double_attach_is_noop() {
    let mut page = three_sections();
    let mut accordions = attach(&mut page, Settings::default());

    let outcome = accordions
        .attach(&mut page, "faq", Settings::default().default_content(Some(0)))
        .unwrap();
    assert_eq!(outcome, AttachOutcome::AlreadyAttached);

    let links = page.get("h0").unwrap().child_elements().len();
    assert_eq!(links, 2); // text node + one toggle link
    assert!(page.is_hidden("h0-content"));
    assert_eq!(
        page.get("faq").unwrap().get_data(ATTACHED_MARKER),
        Some(&"true".to_string())
    );
}

#[test]
fn test_marker_blocks_second_registry() {
    let mut page = three_sections();
    attach(&mut page, Settings::default());

    let mut other = Accordions::with_animator(NoAnimation);
    assert_eq!(
        other.attach(&mut page, "faq", Settings::default()),
        Ok(AttachOutcome::AlreadyAttached)
    );
    assert!(!other.is_attached("faq"));
}

#[test]
fn test_attach_all_attaches_each_container() {
    let mut page = Page::new(
        Element::div()
            .id("root")
            .child(
                Element::div()
                    .id("one")
                    .class("accordion")
                    .child(Element::heading(2, "A").id("a"))
                    .child(Element::p("a")),
            )
            .child(
                Element::div()
                    .id("two")
                    .class("accordion")
                    .child(Element::heading(2, "B").id("b"))
                    .child(Element::p("b")),
            ),
    );
    let mut accordions = Accordions::with_animator(NoAnimation);

    let attached = accordions.attach_all(&mut page, ".accordion", &Settings::default());
    assert_eq!(attached, vec!["one".to_string(), "two".to_string()]);
    assert!(page.contains("a-toggle"));
    assert!(page.contains("b-toggle"));

    assert!(accordions.attach_all(&mut page, ".accordion", &Settings::default()).is_empty());
    assert!(accordions.attach_all(&mut page, "..", &Settings::default()).is_empty());
}
