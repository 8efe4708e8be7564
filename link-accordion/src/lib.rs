//! Collapsible "link accordion" behavior for heading/content pages.
//!
//! Attach to a container and every heading inside it becomes the toggle for
//! the sibling elements that follow it, up to the next heading. Clicks are
//! delivered through [`Accordions::dispatch`]; each container's state lives in
//! an [`AccordionInstance`] owned by the registry.
//!
//! ```
//! use link_accordion::{Accordions, Settings};
//! use pagedom::{Element, Event, EventContext, NoAnimation, Page};
//!
//! let mut page = Page::new(
//!     Element::div()
//!         .id("faq")
//!         .child(Element::heading(2, "Shipping").id("q0"))
//!         .child(Element::p("Two to five days."))
//!         .child(Element::heading(2, "Returns").id("q1"))
//!         .child(Element::p("Within thirty days.")),
//! );
//!
//! let mut accordions = Accordions::with_animator(NoAnimation);
//! accordions
//!     .attach(&mut page, "faq", Settings::default().default_content(Some(0)))
//!     .unwrap();
//!
//! let mut cx = EventContext::new();
//! accordions.dispatch(&mut page, &Event::click("q1-toggle"), &mut cx);
//!
//! assert!(cx.default_prevented());
//! assert_eq!(accordions.instance("faq").unwrap().open_index(), Some(1));
//! ```

pub mod error;
pub mod index;
pub mod instance;
pub mod registry;
pub mod section;
pub mod settings;

pub use error::AccordionError;
pub use index::resolve_default_index;
pub use instance::{AccordionInstance, ATTACHED_MARKER, SECTION_MARKER};
pub use registry::{Accordions, AttachOutcome};
pub use section::Section;
pub use settings::{NamedSpeed, Settings, SettingsError, SettingsOverrides, SlideSpeed};
