use crate::dom::{Bounds, Document};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TweenId(pub(crate) usize);

#[derive(Clone, Debug, PartialEq)]
pub enum Trigger<N> {
    Immediate,
    /// Start once `element`'s top edge reaches `start` of the viewport height.
    OnEnter { element: N, start: f64 },
    Scrub { element: N },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollSignal {
    Start(TweenId),
    Scrub(TweenId, f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Watch {
    Enter { start: f64, fired: bool },
    Scrub,
}

struct Registration<N> {
    element: N,
    tween: TweenId,
    watch: Watch,
}

pub struct ScrollObserver<N> {
    registrations: Vec<Registration<N>>,
}

impl<N: Clone + PartialEq> ScrollObserver<N> {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    pub fn observe_enter(&mut self, element: N, start: f64, tween: TweenId) {
        self.registrations.push(Registration {
            element,
            tween,
            watch: Watch::Enter { start, fired: false },
        });
    }

    pub fn observe_scrub(&mut self, element: N, tween: TweenId) {
        self.registrations.push(Registration {
            element,
            tween,
            watch: Watch::Scrub,
        });
    }

    pub(crate) fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn evaluate<D: Document<Node = N>>(&mut self, document: &D) -> Vec<ScrollSignal> {
        let viewport_height = document.viewport_height();
        let mut signals = Vec::new();

        for registration in &mut self.registrations {
            match &mut registration.watch {
                Watch::Enter { fired: true, .. } => {}
                Watch::Enter { start, fired } => {
                    if has_entered(document.bounds(&registration.element), viewport_height, *start)
                    {
                        *fired = true;
                        signals.push(ScrollSignal::Start(registration.tween));
                    }
                }
                Watch::Scrub => {
                    let progress =
                        scrub_progress(document.bounds(&registration.element), viewport_height);
                    signals.push(ScrollSignal::Scrub(registration.tween, progress));
                }
            }
        }

        signals
    }
}

impl<N: Clone + PartialEq> Default for ScrollObserver<N> {
    fn default() -> Self {
        Self::new()
    }
}

pub fn has_entered(bounds: Bounds, viewport_height: f64, start: f64) -> bool {
    bounds.top <= viewport_height * start
}

/// 0 while the element's top is at the viewport bottom, 1 once its bottom
/// has left through the viewport top.
pub fn scrub_progress(bounds: Bounds, viewport_height: f64) -> f64 {
    let span = viewport_height + bounds.height;
    if span <= 0.0 {
        return 0.0;
    }

    ((viewport_height - bounds.top) / span).clamp(0.0, 1.0)
}
