use crate::dom::Document;
use crate::motion::{Channel, Direction, Ease, MotionProps, Repeat, StyleState, TweenSpec};
use crate::scroll::{ScrollObserver, ScrollSignal, Trigger, TweenId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Waiting,
    Playing,
    Scrubbed,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ScaleRamp {
    from: f64,
    to: f64,
    started_at: f64,
    duration: f64,
}

impl ScaleRamp {
    fn value_at(&self, now: f64) -> Option<f64> {
        if self.duration <= 0.0 || now >= self.started_at + self.duration {
            return None;
        }

        let t = ((now - self.started_at) / self.duration).max(0.0);
        Some(self.from + (self.to - self.from) * Ease::Power1Out.apply(t))
    }
}

struct Tween<N> {
    targets: Vec<N>,
    spec: TweenSpec,
    from_states: Vec<StyleState>,
    to_states: Vec<StyleState>,
    channels: Vec<Channel>,
    phase: Phase,
    clock: f64,
    last_tick: Option<f64>,
    time_scale: f64,
    ramp: Option<ScaleRamp>,
}

impl<N> Tween<N> {
    fn advance(&mut self, now: f64) {
        let elapsed = self.last_tick.map_or(0.0, |previous| (now - previous).max(0.0));
        self.last_tick = Some(now);

        if let Some(ramp) = self.ramp {
            match ramp.value_at(now) {
                Some(scale) => self.time_scale = scale,
                None => {
                    self.time_scale = ramp.to;
                    self.ramp = None;
                }
            }
        }

        self.clock += elapsed * self.time_scale;
    }

    fn is_complete(&self) -> bool {
        self.spec.repeat == Repeat::Once
            && self.clock >= self.spec.total_duration(self.targets.len())
    }
}

pub struct Scheduler<N> {
    tweens: Vec<Tween<N>>,
    observer: ScrollObserver<N>,
    styles: Vec<(N, StyleState)>,
}

impl<N: Clone + PartialEq> Scheduler<N> {
    pub fn new() -> Self {
        Self {
            tweens: Vec::new(),
            observer: ScrollObserver::new(),
            styles: Vec::new(),
        }
    }

    /// Registers a tween. Nothing is registered for an empty target list.
    ///
    /// `From` tweens paint their offset state right away, trigger or not.
    pub fn schedule<D: Document<Node = N>>(
        &mut self,
        document: &D,
        targets: Vec<N>,
        spec: TweenSpec,
        trigger: Trigger<N>,
    ) -> Option<TweenId> {
        if targets.is_empty() {
            return None;
        }

        let (from_states, to_states): (Vec<_>, Vec<_>) = targets
            .iter()
            .map(|target| spec.endpoints(self.current(target)))
            .unzip();
        let channels = spec.props.channels();

        if spec.direction == Direction::From {
            for (target, state) in targets.iter().zip(&from_states) {
                self.write(document, target, *state, &channels);
            }
        }

        let id = TweenId(self.tweens.len());
        let phase = match trigger {
            Trigger::Immediate => Phase::Playing,
            Trigger::OnEnter { element, start } => {
                self.observer.observe_enter(element, start, id);
                Phase::Waiting
            }
            Trigger::Scrub { element } => {
                self.observer.observe_scrub(element, id);
                Phase::Scrubbed
            }
        };

        self.tweens.push(Tween {
            targets,
            spec,
            from_states,
            to_states,
            channels,
            phase,
            clock: 0.0,
            last_tick: None,
            time_scale: 1.0,
            ramp: None,
        });

        Some(id)
    }

    pub fn set<D: Document<Node = N>>(&mut self, document: &D, targets: &[N], props: MotionProps) {
        let channels = props.channels();
        for target in targets {
            let state = self.current(target).with(&props);
            self.write(document, target, state, &channels);
        }
    }

    pub fn ramp_time_scale(&mut self, ids: &[TweenId], to: f64, duration: f64, now: f64) {
        for id in ids {
            let Some(tween) = self.tweens.get_mut(id.0) else {
                continue;
            };

            if duration <= 0.0 {
                tween.time_scale = to;
                tween.ramp = None;
                continue;
            }

            tween.ramp = Some(ScaleRamp {
                from: tween.time_scale,
                to,
                started_at: now,
                duration,
            });
        }
    }

    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn observed_count(&self) -> usize {
        self.observer.len()
    }

    /// Call on every scroll and resize.
    pub fn on_scroll<D: Document<Node = N>>(&mut self, document: &D) {
        for signal in self.observer.evaluate(document) {
            match signal {
                ScrollSignal::Start(id) => {
                    if let Some(tween) = self.tweens.get_mut(id.0) {
                        if tween.phase == Phase::Waiting {
                            tween.phase = Phase::Playing;
                            tween.clock = 0.0;
                            tween.last_tick = None;
                        }
                    }
                }
                ScrollSignal::Scrub(id, progress) => self.render(document, id.0, Some(progress)),
            }
        }
    }

    pub fn tick<D: Document<Node = N>>(&mut self, document: &D, now: f64) {
        for index in 0..self.tweens.len() {
            if self.tweens[index].phase != Phase::Playing {
                continue;
            }

            self.tweens[index].advance(now);
            self.render(document, index, None);

            if self.tweens[index].is_complete() {
                self.finish(document, index);
            }
        }
    }

    fn render<D: Document<Node = N>>(&mut self, document: &D, index: usize, progress: Option<f64>) {
        let tween = &self.tweens[index];
        let frames: Vec<(N, StyleState)> = tween
            .targets
            .iter()
            .enumerate()
            .map(|(position, target)| {
                let linear = progress.unwrap_or_else(|| tween.spec.progress_at(tween.clock, position));
                let eased = tween.spec.ease.apply(linear);
                let state = tween.from_states[position].blend(&tween.to_states[position], eased);
                (target.clone(), state)
            })
            .collect();
        let channels = tween.channels.clone();

        for (target, state) in frames {
            self.write(document, &target, state, &channels);
        }
    }

    fn finish<D: Document<Node = N>>(&mut self, document: &D, index: usize) {
        let tween = &mut self.tweens[index];
        tween.phase = Phase::Finished;
        let cleared = tween.spec.clear.channels();
        if cleared.is_empty() {
            return;
        }

        let targets = tween.targets.clone();
        for target in &targets {
            for channel in cleared {
                document.remove_style(target, channel.property());
            }
            if let Some((_, state)) = self.styles.iter_mut().find(|(node, _)| node == target) {
                for channel in cleared {
                    state.reset(*channel);
                }
            }
        }
    }

    fn current(&self, target: &N) -> StyleState {
        self.styles
            .iter()
            .find(|(node, _)| node == target)
            .map(|(_, state)| *state)
            .unwrap_or_default()
    }

    fn write<D: Document<Node = N>>(
        &mut self,
        document: &D,
        target: &N,
        state: StyleState,
        channels: &[Channel],
    ) {
        for channel in channels {
            if let Some(value) = channel.css_value(&state) {
                document.set_style(target, channel.property(), &value);
            }
        }

        match self.styles.iter_mut().find(|(node, _)| node == target) {
            Some((_, cached)) => *cached = state,
            None => self.styles.push((target.clone(), state)),
        }
    }
}

impl<N: Clone + PartialEq> Default for Scheduler<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl<N> Scheduler<N> {
    pub(crate) fn time_scale(&self, id: TweenId) -> Option<f64> {
        self.tweens.get(id.0).map(|tween| tween.time_scale)
    }

    pub(crate) fn target_time_scale(&self, id: TweenId) -> Option<f64> {
        self.tweens
            .get(id.0)
            .map(|tween| tween.ramp.map_or(tween.time_scale, |ramp| ramp.to))
    }

    pub(crate) fn looping_count(&self) -> usize {
        self.tweens
            .iter()
            .filter(|tween| tween.spec.repeat == Repeat::Forever)
            .count()
    }

    pub(crate) fn is_finished(&self, id: TweenId) -> bool {
        self.tweens
            .get(id.0)
            .is_some_and(|tween| tween.phase == Phase::Finished)
    }

    pub(crate) fn is_waiting(&self, id: TweenId) -> bool {
        self.tweens
            .get(id.0)
            .is_some_and(|tween| tween.phase == Phase::Waiting)
    }
}
