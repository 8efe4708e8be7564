//! A minimal owned page model: an element tree addressed by string IDs,
//! with selectors, class lists, click events and animated visibility.

pub mod animation;
pub mod element;
pub mod event;
pub mod page;
pub mod selector;
pub mod transitions;

pub use animation::{AnimationState, Animator, NoAnimation};
pub use element::{Content, Display, Element};
pub use event::{Event, EventContext, MouseButton};
pub use page::Page;
pub use selector::{Selector, SelectorError};
pub use transitions::{Easing, TransitionConfig};
