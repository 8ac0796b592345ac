#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power1Out,
    Power2Out,
    Power3Out,
    Power4Out,
}

impl Ease {
    pub fn apply(self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power1Out => power_out(t, 2),
            Self::Power2Out => power_out(t, 3),
            Self::Power3Out => power_out(t, 4),
            Self::Power4Out => power_out(t, 5),
        }
    }
}

fn power_out(t: f64, exponent: i32) -> f64 {
    1.0 - (1.0 - t).powi(exponent)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Px,
    Percent,
    Rem,
    Em,
    Vw,
    Vh,
    Ch,
}

impl Unit {
    // `rem` has to be tried before `em`.
    const PARSE_ORDER: [Self; 7] = [
        Self::Percent,
        Self::Px,
        Self::Rem,
        Self::Em,
        Self::Vw,
        Self::Vh,
        Self::Ch,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Percent => "%",
            Self::Rem => "rem",
            Self::Em => "em",
            Self::Vw => "vw",
            Self::Vh => "vh",
            Self::Ch => "ch",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: Unit,
}

impl Length {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn px(value: f64) -> Self {
        Self::new(value, Unit::Px)
    }

    pub fn percent(value: f64) -> Self {
        Self::new(value, Unit::Percent)
    }

    /// A bare number is read as pixels.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        for unit in Unit::PARSE_ORDER {
            if let Some(number) = raw.strip_suffix(unit.suffix()) {
                return parse_finite(number).map(|value| Self::new(value, unit));
            }
        }

        parse_finite(raw).map(Self::px)
    }

    pub fn css(self) -> String {
        format!("{}{}", self.value, self.unit.suffix())
    }

    // Mixed units start from zero in the target's unit.
    fn lerp(self, to: Self, t: f64) -> Self {
        let from = if self.unit == to.unit { self.value } else { 0.0 };
        Self::new(from + (to.value - from) * t, to.unit)
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionProps {
    pub x_percent: Option<f64>,
    pub y: Option<f64>,
    pub opacity: Option<f64>,
    pub blur: Option<f64>,
    pub width: Option<Length>,
}

impl MotionProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x_percent(mut self, value: f64) -> Self {
        self.x_percent = Some(value);
        self
    }

    pub fn y(mut self, value: f64) -> Self {
        self.y = Some(value);
        self
    }

    pub fn opacity(mut self, value: f64) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn blur(mut self, value: f64) -> Self {
        self.blur = Some(value);
        self
    }

    pub fn width(mut self, value: Length) -> Self {
        self.width = Some(value);
        self
    }

    pub fn channels(&self) -> Vec<Channel> {
        let mut channels = Vec::new();
        if self.x_percent.is_some() || self.y.is_some() {
            channels.push(Channel::Transform);
        }
        if self.opacity.is_some() {
            channels.push(Channel::Opacity);
        }
        if self.blur.is_some() {
            channels.push(Channel::Filter);
        }
        if self.width.is_some() {
            channels.push(Channel::Width);
        }
        channels
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleState {
    pub x_percent: f64,
    pub y: f64,
    pub opacity: f64,
    pub blur: f64,
    pub width: Option<Length>,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            x_percent: 0.0,
            y: 0.0,
            opacity: 1.0,
            blur: 0.0,
            width: None,
        }
    }
}

impl StyleState {
    pub fn with(self, props: &MotionProps) -> Self {
        Self {
            x_percent: props.x_percent.unwrap_or(self.x_percent),
            y: props.y.unwrap_or(self.y),
            opacity: props.opacity.unwrap_or(self.opacity),
            blur: props.blur.unwrap_or(self.blur),
            width: props.width.or(self.width),
        }
    }

    pub fn blend(&self, to: &Self, t: f64) -> Self {
        let mix = |from: f64, to: f64| from + (to - from) * t;
        let width = match (self.width, to.width) {
            (Some(from), Some(to)) => Some(from.lerp(to, t)),
            (None, Some(to)) => Some(Length::new(0.0, to.unit).lerp(to, t)),
            (from, None) => from,
        };

        Self {
            x_percent: mix(self.x_percent, to.x_percent),
            y: mix(self.y, to.y),
            opacity: mix(self.opacity, to.opacity),
            blur: mix(self.blur, to.blur),
            width,
        }
    }

    pub fn reset(&mut self, channel: Channel) {
        let rest = Self::default();
        match channel {
            Channel::Transform => {
                self.x_percent = rest.x_percent;
                self.y = rest.y;
            }
            Channel::Opacity => self.opacity = rest.opacity,
            Channel::Filter => self.blur = rest.blur,
            Channel::Width => self.width = rest.width,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Transform,
    Opacity,
    Filter,
    Width,
}

impl Channel {
    pub const ALL: [Self; 4] = [Self::Transform, Self::Opacity, Self::Filter, Self::Width];

    pub fn property(self) -> &'static str {
        match self {
            Self::Transform => "transform",
            Self::Opacity => "opacity",
            Self::Filter => "filter",
            Self::Width => "width",
        }
    }

    pub fn css_value(self, state: &StyleState) -> Option<String> {
        match self {
            Self::Transform => Some(format!(
                "translate({}%, {}px)",
                state.x_percent, state.y
            )),
            Self::Opacity => Some(state.opacity.to_string()),
            Self::Filter => Some(format!("blur({}px)", state.blur)),
            Self::Width => state.width.map(Length::css),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearProps {
    None,
    All,
    Only(&'static [Channel]),
}

impl ClearProps {
    pub fn channels(self) -> &'static [Channel] {
        match self {
            Self::None => &[],
            Self::All => &Channel::ALL,
            Self::Only(channels) => channels,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    From,
    To,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Once,
    Forever,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    pub direction: Direction,
    pub props: MotionProps,
    pub duration: f64,
    pub delay: f64,
    pub stagger: f64,
    pub ease: Ease,
    pub repeat: Repeat,
    pub clear: ClearProps,
}

impl TweenSpec {
    pub fn from_offset(props: MotionProps, duration: f64) -> Self {
        Self::new(Direction::From, props, duration)
    }

    pub fn to_target(props: MotionProps, duration: f64) -> Self {
        Self::new(Direction::To, props, duration)
    }

    fn new(direction: Direction, props: MotionProps, duration: f64) -> Self {
        Self {
            direction,
            props,
            duration,
            delay: 0.0,
            stagger: 0.0,
            ease: Ease::Power1Out,
            repeat: Repeat::Once,
            clear: ClearProps::None,
        }
    }

    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = seconds;
        self
    }

    pub fn stagger(mut self, seconds: f64) -> Self {
        self.stagger = seconds;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn repeat_forever(mut self) -> Self {
        self.repeat = Repeat::Forever;
        self
    }

    pub fn clear(mut self, clear: ClearProps) -> Self {
        self.clear = clear;
        self
    }

    pub fn endpoints(&self, current: StyleState) -> (StyleState, StyleState) {
        let offset = current.with(&self.props);
        match self.direction {
            Direction::From => (offset, current),
            Direction::To => (current, offset),
        }
    }

    pub fn total_duration(&self, targets: usize) -> f64 {
        let last = targets.saturating_sub(1) as f64;
        self.delay + self.stagger * last + self.duration
    }

    pub fn progress_at(&self, clock: f64, index: usize) -> f64 {
        let local = clock - self.delay - self.stagger * index as f64;
        if local < 0.0 {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }

        match self.repeat {
            Repeat::Once => (local / self.duration).min(1.0),
            Repeat::Forever => (local % self.duration) / self.duration,
        }
    }
}
