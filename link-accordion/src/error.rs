use thiserror::Error;

/// Errors returned by [`Accordions`](crate::Accordions) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccordionError {
    /// No element with this ID exists in the page.
    #[error("container '{0}' not found")]
    ContainerNotFound(String),

    /// The container has no accordion attached.
    #[error("no accordion attached to '{0}'")]
    NotAttached(String),

    /// A section index beyond the attached sections.
    #[error("section {index} out of range for '{container}' ({len} sections)")]
    SectionOutOfRange {
        container: String,
        index: usize,
        len: usize,
    },
}
