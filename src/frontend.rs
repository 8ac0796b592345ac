use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use log::Level;
use portfolio_motion::config::{PageConfig, CONFIG_ELEMENT_ID, MOUNT_POINT_ID, PROGRESS_BAR_ID};
use portfolio_motion::controller::{after_view_init, PageState, RenderTarget};
use portfolio_motion::director::Marquee;
use portfolio_motion::error::PageError;
use portfolio_motion::progress::update_progress_bar;
use portfolio_motion::scheduler::Scheduler;
use portfolio_motion::telemetry::log_event;
use serde_json::json;
use web_sys::{window, HtmlElement, HtmlInputElement, Window};
use yew::prelude::*;

use crate::web::{now_seconds, LocalStore, WebDocument};

const OWNER_NAME: &str = "Avery Lin";
const OWNER_ROLE: &str = "Systems & Web Engineer";
const OWNER_PITCH: &str =
    "I build fast, dependable software: from storage engines and network services to interfaces people enjoy using.";

struct Project {
    title: &'static str,
    summary: &'static str,
    stack: &'static str,
    href: &'static str,
}

const PROJECTS: &[Project] = &[
    Project {
        title: "Tidewater",
        summary: "Append-only log store with segment compaction and crash-safe recovery.",
        stack: "Rust · tokio · io_uring",
        href: "https://github.com/",
    },
    Project {
        title: "Lanternfish",
        summary: "Realtime collaborative whiteboard over WebSockets with CRDT sync.",
        stack: "TypeScript · Rust · Postgres",
        href: "https://github.com/",
    },
    Project {
        title: "Quill",
        summary: "Static site generator with incremental rebuilds and live reload.",
        stack: "Rust · notify · pulldown-cmark",
        href: "https://github.com/",
    },
];

const ABOUT_CARDS: &[(&str, &str)] = &[
    ("Performance", "Profiling first, then the smallest change that moves the number."),
    ("Reliability", "Failure paths get the same care and tests as the happy path."),
    ("Craft", "Readable code, honest commit history, and docs that stay current."),
];

const SKILLS: &[(&str, &str)] = &[
    ("Rust", "92%"),
    ("TypeScript", "85%"),
    ("PostgreSQL", "78%"),
    ("Distributed systems", "70%"),
];

const EXPERIENCE: &[(&str, &str, &str)] = &[
    ("2024–now", "Senior Engineer, Northwind Labs", "Own the ingestion pipeline serving 40k events/s."),
    ("2021–2024", "Software Engineer, Brightline", "Built the billing service and its reconciliation jobs."),
    ("2019–2021", "Developer, Studio Nine", "Shipped client sites and an internal design system."),
];

const TECH_LEFT: &[&str] = &["Rust", "Tokio", "Axum", "WebAssembly", "Yew", "Postgres", "Redis"];
const TECH_RIGHT: &[&str] = &["TypeScript", "React", "Docker", "Kubernetes", "gRPC", "Linux", "Nix"];

struct Motion {
    scheduler: Scheduler<HtmlElement>,
    marquee: Option<Marquee<HtmlElement>>,
}

type SharedMotion = Rc<RefCell<Option<Motion>>>;
type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

/// Ticks the scheduler once per animation frame until dropped.
struct FrameLoop {
    slot: FrameSlot,
}

impl FrameLoop {
    fn start(motion: SharedMotion, document: WebDocument) -> Self {
        let slot: FrameSlot = Rc::new(RefCell::new(None));
        schedule_frame(motion, document, Rc::clone(&slot));
        Self { slot }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.slot.borrow_mut().take();
    }
}

fn schedule_frame(motion: SharedMotion, document: WebDocument, slot: FrameSlot) {
    let next_slot = Rc::clone(&slot);
    let handle = request_animation_frame(move |timestamp| {
        if let Some(active) = motion.borrow_mut().as_mut() {
            active.scheduler.tick(&document, timestamp / 1_000.0);
        }
        schedule_frame(motion, document, next_slot);
    });
    *slot.borrow_mut() = Some(handle);
}

/// Everything registered after mount; dropping it detaches listeners and
/// stops the frame loop.
struct Behaviour {
    _progress: EventListener,
    _scroll: EventListener,
    _resize: EventListener,
    _frames: FrameLoop,
}

fn watch_viewport(
    window: &Window,
    event: &'static str,
    motion: &SharedMotion,
    document: &WebDocument,
) -> EventListener {
    let motion = Rc::clone(motion);
    let document = document.clone();
    EventListener::new(window, event, move |_| {
        if let Some(active) = motion.borrow_mut().as_mut() {
            active.scheduler.on_scroll(&document);
        }
    })
}

fn after_mount(
    page: &UseStateHandle<PageState>,
    motion: &SharedMotion,
    config: &PageConfig,
) -> Option<Behaviour> {
    let document = WebDocument::current()?;
    let window = window()?;

    let mut state = **page;
    let mut scheduler = Scheduler::new();
    let installed = after_view_init(
        RenderTarget::Browser,
        &mut state,
        &document,
        &LocalStore,
        &mut scheduler,
        config,
    )?;
    page.set(state);
    *motion.borrow_mut() = Some(Motion {
        scheduler,
        marquee: installed.marquee,
    });

    let progress = {
        let document = document.clone();
        EventListener::new(&window, "scroll", move |_| {
            update_progress_bar(&document);
        })
    };

    Some(Behaviour {
        _progress: progress,
        _scroll: watch_viewport(&window, "scroll", motion, &document),
        _resize: watch_viewport(&window, "resize", motion, &document),
        _frames: FrameLoop::start(Rc::clone(motion), document),
    })
}

fn marquee_hover(motion: &SharedMotion, config: &PageConfig, entering: bool) -> Callback<MouseEvent> {
    let motion = Rc::clone(motion);
    let config = config.clone();
    Callback::from(move |_: MouseEvent| {
        let mut guard = motion.borrow_mut();
        let Some(active) = guard.as_mut() else {
            return;
        };
        let Some(marquee) = active.marquee.as_ref() else {
            return;
        };

        let now = now_seconds();
        if entering {
            marquee.hover_start(&mut active.scheduler, &config, now);
        } else {
            marquee.hover_end(&mut active.scheduler, &config, now);
        }
    })
}

fn tech_track(items: &[&'static str]) -> Html {
    // Content is doubled so a -50% shift lands on an identical frame.
    html! {
        <div class="tech-track">
            { for items.iter().chain(items.iter()).map(|item| html! { <span class="tech-chip">{*item}</span> }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: PageConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let page = use_state(PageState::default);
    let motion = use_mut_ref(|| None::<Motion>);

    {
        let page = page.clone();
        let motion = motion.clone();
        let config = props.config.clone();
        use_effect_with((), move |_| {
            let behaviour = after_mount(&page, &motion, &config);
            move || drop(behaviour)
        });
    }

    let on_theme_change = {
        let page = page.clone();
        Callback::from(move |event: Event| {
            let Some(input) = event.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let Some(document) = WebDocument::current() else {
                return;
            };

            let mut next = *page;
            next.toggle_theme(input.checked(), &document, &LocalStore);
            page.set(next);
        })
    };

    let on_menu_toggle = {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = *page;
            next.toggle_menu();
            page.set(next);
        })
    };

    let on_marquee_enter = marquee_hover(&motion, &props.config, true);
    let on_marquee_leave = marquee_hover(&motion, &props.config, false);

    html! {
        <>
            <div class="progress-track" aria-hidden="true">
                <div id={PROGRESS_BAR_ID} class="progress-bar"></div>
            </div>

            <nav class="navbar">
                <a class="brand" href="#top">{OWNER_NAME}</a>
                <button
                    class="menu-toggle"
                    type="button"
                    aria-label="Toggle navigation"
                    aria-expanded={page.is_mobile_menu_open.to_string()}
                    onclick={on_menu_toggle}
                >
                    <span aria-hidden="true">{if page.is_mobile_menu_open { "✕" } else { "☰" }}</span>
                </button>
                <ul class={classes!("nav-links", page.is_mobile_menu_open.then_some("open"))}>
                    <li><a href="#about">{"About"}</a></li>
                    <li><a href="#projects">{"Projects"}</a></li>
                    <li><a href="#skills">{"Skills"}</a></li>
                    <li><a href="#experience">{"Experience"}</a></li>
                </ul>
                <label class="theme-switch">
                    <input
                        type="checkbox"
                        checked={page.is_dark_mode}
                        aria-label={page.theme().toggle_label()}
                        onchange={on_theme_change}
                    />
                    <span class="theme-slider" aria-hidden="true"></span>
                </label>
            </nav>

            <header class="hero" id="top">
                <div class="hero-bg" aria-hidden="true"></div>
                <h1 class="hero-title">{OWNER_NAME}</h1>
                <p class="hero-sub">{OWNER_ROLE}</p>
                <p class="hero-desc">{OWNER_PITCH}</p>
                <div class="hero-cta">
                    <a class="button primary" href="#projects">{"See my work"}</a>
                    <a class="button" href="mailto:hello@example.com">{"Get in touch"}</a>
                </div>
            </header>

            <main>
                <section class="section" id="about">
                    <h2>{"About"}</h2>
                    <div class="card-grid">
                        { for ABOUT_CARDS.iter().map(|(title, body)| html! {
                            <article class="card">
                                <h3>{*title}</h3>
                                <p>{*body}</p>
                            </article>
                        }) }
                    </div>
                </section>

                <section class="section" id="projects">
                    <h2>{"Projects"}</h2>
                    <div class="card-grid">
                        { for PROJECTS.iter().map(|project| html! {
                            <article class="project-card">
                                <h3>
                                    <a href={project.href} target="_blank" rel="noopener noreferrer">{project.title}</a>
                                </h3>
                                <p>{project.summary}</p>
                                <p class="muted">{project.stack}</p>
                            </article>
                        }) }
                    </div>
                </section>

                <section class="section" id="skills">
                    <h2>{"Skills"}</h2>
                    { for SKILLS.iter().map(|(name, level)| html! {
                        <div class="skill">
                            <span class="skill-name">{*name}</span>
                            <div class="meter"><div data-width={*level}></div></div>
                        </div>
                    }) }
                </section>

                <section class="section" id="experience">
                    <h2>{"Experience"}</h2>
                    <ol class="timeline">
                        { for EXPERIENCE.iter().map(|(period, role, detail)| html! {
                            <li class="timeline-item">
                                <span class="muted">{*period}</span>
                                <h3>{*role}</h3>
                                <p>{*detail}</p>
                            </li>
                        }) }
                    </ol>
                </section>

                <section class="tech-marquee-wrapper" onmouseenter={on_marquee_enter} onmouseleave={on_marquee_leave}>
                    <div id="marquee-left" class="tech-row">{tech_track(TECH_LEFT)}</div>
                    <div id="marquee-right" class="tech-row">{tech_track(TECH_RIGHT)}</div>
                </section>
            </main>

            <footer class="footer" id="contact">
                <p class="muted">{format!("© {OWNER_NAME}")}</p>
            </footer>
        </>
    }
}

pub fn run() -> Result<(), PageError> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(Level::Debug).map_err(|error| PageError::Logger(error.to_string()))?;

    let document = WebDocument::current().ok_or(PageError::MissingMountPoint(MOUNT_POINT_ID))?;
    let config = PageConfig::resolve(document.text_of(CONFIG_ELEMENT_ID).as_deref());
    log::set_max_level(config.log_level.to_filter());

    let root = document.mount_point(MOUNT_POINT_ID)?;
    log_event(
        Level::Info,
        "page_booted",
        json!({ "logLevel": config.log_level.as_str() }),
    );

    yew::Renderer::<App>::with_root_and_props(root, AppProps { config }).render();
    Ok(())
}
