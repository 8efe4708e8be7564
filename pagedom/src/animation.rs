use std::collections::{HashMap, HashSet};
use std::time::Instant;

use crate::element::Display;
use crate::page::Page;
use crate::transitions::TransitionConfig;

/// Show/hide capability used by behaviors that reveal and collapse content.
///
/// Contract: `animate` moves the element's logical display state to `target`
/// immediately; only the visual transition takes time. Calling it again on
/// an element that is still transitioning replaces the in-flight transition
/// (last call wins). A call whose target equals the current display state is
/// a no-op. Returns true if the display state changed.
pub trait Animator {
    fn animate(
        &mut self,
        page: &mut Page,
        element_id: &str,
        target: Display,
        config: &TransitionConfig,
    ) -> bool;

    /// Drop any in-flight transition for `element_id`, leaving its display
    /// state as is.
    fn cancel(&mut self, _element_id: &str) {}
}

/// Applies the target state with no transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAnimation;

impl Animator for NoAnimation {
    fn animate(
        &mut self,
        page: &mut Page,
        element_id: &str,
        target: Display,
        _config: &TransitionConfig,
    ) -> bool {
        match page.display(element_id) {
            Some(current) if current != target => page.set_display(element_id, target),
            _ => false,
        }
    }
}

/// A single active transition. Openness runs from 0.0 (collapsed) to 1.0
/// (fully revealed).
#[derive(Debug, Clone)]
struct ActiveTransition {
    from: f32,
    to: f32,
    start: Instant,
    config: TransitionConfig,
}

impl ActiveTransition {
    fn openness_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start);
        let progress = if self.config.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.config.duration.as_secs_f32()).min(1.0)
        };
        let eased = self.config.easing.apply(progress);
        self.from + (self.to - self.from) * eased
    }

    fn finished_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.config.duration
    }
}

fn openness(display: Display) -> f32 {
    match display {
        Display::Shown => 1.0,
        Display::Hidden => 0.0,
    }
}

/// Timed slide transitions for element visibility.
#[derive(Debug, Default)]
pub struct AnimationState {
    /// Currently active transitions keyed by element id.
    active: HashMap<String, ActiveTransition>,
    /// Reduced motion flag - when true, transitions complete instantly.
    reduced_motion: bool,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable reduced motion (accessibility).
    /// When enabled, all transitions complete instantly.
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
        if enabled {
            self.active.clear();
        }
    }

    /// Returns true if any transition is still running.
    pub fn has_active_transitions(&self) -> bool {
        let now = Instant::now();
        self.active.values().any(|t| !t.finished_at(now))
    }

    pub fn is_animating(&self, element_id: &str) -> bool {
        self.is_animating_at(element_id, Instant::now())
    }

    pub fn is_animating_at(&self, element_id: &str, now: Instant) -> bool {
        self.active
            .get(element_id)
            .is_some_and(|t| !t.finished_at(now))
    }

    /// Current openness of an element that is transitioning.
    /// Returns None if no transition is active for it.
    pub fn progress(&self, element_id: &str) -> Option<f32> {
        self.progress_at(element_id, Instant::now())
    }

    pub fn progress_at(&self, element_id: &str, now: Instant) -> Option<f32> {
        self.active.get(element_id).map(|t| t.openness_at(now))
    }

    /// Like [`Animator::animate`], with an explicit clock.
    pub fn animate_at(
        &mut self,
        page: &mut Page,
        element_id: &str,
        target: Display,
        config: &TransitionConfig,
        now: Instant,
    ) -> bool {
        self.prune_at(now);

        let Some(current) = page.display(element_id) else {
            return false;
        };
        if current == target {
            return false;
        }

        // Retarget from the interpolated position if one is in flight
        let from = self
            .progress_at(element_id, now)
            .unwrap_or_else(|| openness(current));
        page.set_display(element_id, target);

        if self.reduced_motion || config.duration.is_zero() {
            self.active.remove(element_id);
            return true;
        }

        log::trace!("slide {element_id} to {target:?} over {:?}", config.duration);
        self.active.insert(
            element_id.to_string(),
            ActiveTransition {
                from,
                to: openness(target),
                start: now,
                config: *config,
            },
        );
        true
    }

    /// Drop transitions that have run to completion.
    pub fn prune(&mut self) {
        self.prune_at(Instant::now());
    }

    pub fn prune_at(&mut self, now: Instant) {
        self.active.retain(|_, t| !t.finished_at(now));
    }

    /// Remove transitions for elements no longer in the page.
    pub fn cleanup(&mut self, current_ids: &HashSet<String>) {
        self.active.retain(|id, _| current_ids.contains(id));
    }
}

impl Animator for AnimationState {
    fn animate(
        &mut self,
        page: &mut Page,
        element_id: &str,
        target: Display,
        config: &TransitionConfig,
    ) -> bool {
        self.animate_at(page, element_id, target, config, Instant::now())
    }

    fn cancel(&mut self, element_id: &str) {
        self.active.remove(element_id);
    }
}

/// Collect all element IDs from the page.
pub fn collect_element_ids(page: &Page) -> HashSet<String> {
    let mut ids = HashSet::new();
    collect_ids_recursive(page.root(), &mut ids);
    ids
}

fn collect_ids_recursive(element: &crate::Element, ids: &mut HashSet<String>) {
    ids.insert(element.id.clone());
    for child in element.child_elements() {
        collect_ids_recursive(child, ids);
    }
}
