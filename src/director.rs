use log::Level;
use serde_json::json;

use crate::config::{selectors, PageConfig};
use crate::dom::{safe_query, safe_select, safe_select_within, Document};
use crate::motion::{Channel, ClearProps, Ease, Length, MotionProps, TweenSpec};
use crate::scheduler::Scheduler;
use crate::scroll::{Trigger, TweenId};
use crate::telemetry::log_event;

const SECTION_START: f64 = 0.85;
const METER_START: f64 = 0.9;
const TIMELINE_START: f64 = 0.8;
const METER_WIDTH_ATTRIBUTE: &str = "width";
const MARQUEE_SHIFT_PERCENT: f64 = -50.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Marquee<N> {
    pub rows: [TweenId; 2],
    pub wrapper: Option<N>,
}

impl<N: Clone + PartialEq> Marquee<N> {
    pub fn hover_start(&self, scheduler: &mut Scheduler<N>, config: &PageConfig, now: f64) {
        self.retime(scheduler, config.hover_time_scale, config, now);
    }

    pub fn hover_end(&self, scheduler: &mut Scheduler<N>, config: &PageConfig, now: f64) {
        self.retime(scheduler, 1.0, config, now);
    }

    fn retime(&self, scheduler: &mut Scheduler<N>, time_scale: f64, config: &PageConfig, now: f64) {
        if self.wrapper.is_none() {
            return;
        }

        scheduler.ramp_time_scale(&self.rows, time_scale, config.hover_ramp_secs, now);
        log_event(
            Level::Debug,
            "marquee_hover",
            json!({ "timeScale": time_scale }),
        );
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Installed<N> {
    pub marquee: Option<Marquee<N>>,
    pub tweens: usize,
}

pub struct AnimationDirector<'a, D> {
    document: &'a D,
    config: &'a PageConfig,
}

impl<'a, D: Document> AnimationDirector<'a, D> {
    pub fn new(document: &'a D, config: &'a PageConfig) -> Self {
        Self { document, config }
    }

    pub fn install(&self, scheduler: &mut Scheduler<D::Node>) -> Installed<D::Node> {
        self.navbar_intro(scheduler);
        self.hero_intro(scheduler);
        self.call_to_action(scheduler);
        self.section_reveal(scheduler);
        self.skill_meters(scheduler);
        self.parallax_background(scheduler);
        self.timeline(scheduler);
        let marquee = self.marquee(scheduler);

        let installed = Installed {
            marquee,
            tweens: scheduler.tween_count(),
        };
        log_event(
            Level::Info,
            "animations_installed",
            json!({
                "tweens": installed.tweens,
                "scrollTriggers": scheduler.observed_count(),
                "marquee": installed.marquee.is_some(),
            }),
        );
        installed
    }

    fn navbar_intro(&self, scheduler: &mut Scheduler<D::Node>) {
        let Some(navbar) = safe_query(self.document, selectors::NAVBAR) else {
            return;
        };

        scheduler.schedule(
            self.document,
            vec![navbar],
            TweenSpec::from_offset(MotionProps::new().y(-80.0).opacity(0.0), 1.0)
                .clear(ClearProps::All),
            Trigger::Immediate,
        );
    }

    fn hero_intro(&self, scheduler: &mut Scheduler<D::Node>) {
        let lines = [
            (selectors::HERO_TITLE, 100.0, 20.0, 1.5, 0.0, Ease::Power4Out),
            (selectors::HERO_SUBTITLE, 50.0, 10.0, 1.2, 0.3, Ease::Power3Out),
            (selectors::HERO_DESCRIPTION, 40.0, 10.0, 1.2, 0.5, Ease::Power3Out),
        ];

        for (selector, y, blur, duration, delay, ease) in lines {
            scheduler.schedule(
                self.document,
                safe_select(self.document, selector),
                TweenSpec::from_offset(MotionProps::new().y(y).opacity(0.0).blur(blur), duration)
                    .delay(delay)
                    .ease(ease)
                    .clear(ClearProps::All),
                Trigger::Immediate,
            );
        }
    }

    fn call_to_action(&self, scheduler: &mut Scheduler<D::Node>) {
        let links = safe_select(self.document, selectors::HERO_CTA_LINKS);
        if links.is_empty() {
            return;
        }

        scheduler.schedule(
            self.document,
            links,
            TweenSpec::from_offset(MotionProps::new().y(30.0).opacity(0.0).blur(5.0), 1.0)
                .stagger(0.2)
                .delay(0.7)
                .ease(Ease::Power3Out)
                .clear(ClearProps::All),
            Trigger::Immediate,
        );
    }

    fn section_reveal(&self, scheduler: &mut Scheduler<D::Node>) {
        for section in safe_select(self.document, selectors::SECTION) {
            let children = safe_select_within(self.document, &section, selectors::SECTION_CHILDREN);
            if children.is_empty() {
                continue;
            }

            scheduler.schedule(
                self.document,
                children,
                TweenSpec::from_offset(MotionProps::new().y(60.0).opacity(0.0), 0.8)
                    .stagger(0.15)
                    .clear(ClearProps::Only(&[Channel::Transform, Channel::Opacity])),
                Trigger::OnEnter {
                    element: section,
                    start: SECTION_START,
                },
            );
        }
    }

    fn skill_meters(&self, scheduler: &mut Scheduler<D::Node>) {
        for bar in safe_select(self.document, selectors::METER_BAR) {
            let raw = self.document.data_attribute(&bar, METER_WIDTH_ATTRIBUTE);
            let Some(width) = raw.as_deref().and_then(Length::parse) else {
                log_event(Level::Warn, "meter_skipped", json!({ "dataWidth": raw }));
                continue;
            };

            scheduler.schedule(
                self.document,
                vec![bar.clone()],
                TweenSpec::to_target(MotionProps::new().width(width), 1.4),
                Trigger::OnEnter {
                    element: bar,
                    start: METER_START,
                },
            );
        }
    }

    fn parallax_background(&self, scheduler: &mut Scheduler<D::Node>) {
        let Some(hero) = safe_query(self.document, selectors::HERO) else {
            return;
        };

        scheduler.schedule(
            self.document,
            safe_select(self.document, selectors::HERO_BACKGROUND),
            TweenSpec::to_target(MotionProps::new().y(self.config.parallax_distance_px), 1.0)
                .ease(Ease::Linear),
            Trigger::Scrub { element: hero },
        );
    }

    fn timeline(&self, scheduler: &mut Scheduler<D::Node>) {
        let items = safe_select(self.document, selectors::TIMELINE_ITEM);
        if items.is_empty() {
            return;
        }

        let trigger = match safe_query(self.document, selectors::TIMELINE) {
            Some(element) => Trigger::OnEnter {
                element,
                start: TIMELINE_START,
            },
            None => Trigger::Immediate,
        };

        scheduler.schedule(
            self.document,
            items,
            TweenSpec::from_offset(MotionProps::new().y(50.0).opacity(0.0), 1.0)
                .stagger(0.3)
                .clear(ClearProps::All),
            trigger,
        );
    }

    fn marquee(&self, scheduler: &mut Scheduler<D::Node>) -> Option<Marquee<D::Node>> {
        let left = safe_query(self.document, selectors::MARQUEE_LEFT_TRACK)?;
        let right = safe_query(self.document, selectors::MARQUEE_RIGHT_TRACK)?;
        let loop_spec = |x_percent: f64| {
            TweenSpec::to_target(
                MotionProps::new().x_percent(x_percent),
                self.config.marquee_duration_secs,
            )
            .ease(Ease::Linear)
            .repeat_forever()
        };

        let first = scheduler.schedule(
            self.document,
            vec![left],
            loop_spec(MARQUEE_SHIFT_PERCENT),
            Trigger::Immediate,
        )?;

        scheduler.set(
            self.document,
            &[right.clone()],
            MotionProps::new().x_percent(MARQUEE_SHIFT_PERCENT),
        );
        let second =
            scheduler.schedule(self.document, vec![right], loop_spec(0.0), Trigger::Immediate)?;

        Some(Marquee {
            rows: [first, second],
            wrapper: safe_query(self.document, selectors::MARQUEE_WRAPPER),
        })
    }
}
