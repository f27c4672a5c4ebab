use folio_core::choreography::{self, Choreography};
use folio_core::content::{About, Footer, Profile, Project, ProjectArt, Skills, Social};
use folio_core::{Action, NavController, Portfolio, ScrollTracker, Sections};
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use leptos::prelude::*;
use leptos_meta::*;
use tracing::error;

use crate::contact::ContactSection;
use crate::dom;
use crate::motion::{MotionHandle, use_motion};
use crate::nav::{Navbar, Navigation, use_navigation};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    match Portfolio::builtin() {
        Ok(portfolio) => view! { <Site portfolio/> }.into_any(),
        Err(e) => {
            error!("{:#}", e);
            view! { <p class="load-error">"This page could not be loaded."</p> }.into_any()
        }
    }
}

/// The whole page, wired to the frame loop and the scroll listener
#[component]
fn Site(portfolio: Portfolio) -> impl IntoView {
    let settings = portfolio.motion.clone();
    let choreography = Choreography::for_portfolio(&portfolio);
    let motion = MotionHandle::new(&choreography);
    let tracker = ScrollTracker::new(
        Sections::portfolio(),
        settings.header_offset,
        settings.scroll_threshold,
    );
    let nav = Navigation::new(
        NavController::new(tracker).scroll_duration(settings.nav_scroll_seconds),
        motion,
    );
    provide_context(motion);
    provide_context(nav);

    let scroll_listener = StoredValue::new_local(None::<EventListener>);

    Effect::new(move |_| {
        if scroll_listener.with_value(Option::is_some) {
            return;
        }
        motion.mount();
        nav.on_scroll();
        if let Some(hash) = dom::location_hash() {
            nav.go_to_fragment(&hash);
        }

        let Some(window) = web_sys::window() else {
            return;
        };
        let options = EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: true,
        };
        let listener = EventListener::new_with_options(&window, "scroll", options, move |_| {
            nav.on_scroll();
            motion.observe();
        });
        scroll_listener.set_value(Some(listener));
    });

    on_cleanup(move || {
        scroll_listener.try_update_value(|listener| listener.take());
        motion.shutdown();
    });

    let title = format!("{} | {}", portfolio.profile.name, portfolio.profile.role);
    let description = portfolio.profile.tagline.clone();
    let brand = portfolio.footer.brand.clone();
    let Portfolio {
        profile,
        about,
        projects,
        skills,
        contact,
        footer,
        ..
    } = portfolio;
    let socials = contact.socials.clone();
    let portrait = profile.portrait.clone();

    view! {
        <Title text=title/>
        <Meta name="description" content=description/>

        <Navbar brand=brand/>
        <main>
            <Hero profile=profile cta_seconds=settings.cta_scroll_seconds/>
            <AboutSection about=about portrait=portrait/>
            <ProjectsSection projects=projects/>
            <SkillsSection skills=skills/>
            <ContactSection contact=contact submit_delay=settings.submit_delay()/>
        </main>
        <SiteFooter footer=footer socials=socials/>
    }
}

#[component]
fn Hero(profile: Profile, cta_seconds: f64) -> impl IntoView {
    let nav = use_navigation();

    view! {
        <section id="hero" class="hero">
            <div class="section-inner hero-grid">
                <div class="hero-text">
                    <h1 id=choreography::HERO_TITLE class="hero-title">
                        "Hi, I'm " <span class="text-gradient">{profile.name}</span>
                    </h1>
                    <p id=choreography::HERO_SUBTITLE class="hero-subtitle">
                        "A passionate " <span class="hero-role">{profile.role}</span> " "
                        {profile.tagline}
                    </p>
                    <div id=choreography::HERO_CTA class="hero-cta">
                        <button
                            class="btn btn-primary"
                            on:click=move |_| nav.go_with("projects", Some(cta_seconds))
                        >
                            "View My Work"
                        </button>
                        {profile.cv.map(|cv| view! {
                            <a class="btn btn-secondary" href=cv download="">"Download CV"</a>
                        })}
                    </div>
                </div>
                <div id=choreography::HERO_IMAGE class="hero-image">
                    <div class="hero-blob"></div>
                    <div class="hero-card">
                        <div class="hero-card-icon">"</>"</div>
                        <p>"Developer"</p>
                    </div>
                </div>
            </div>
            <div class="scroll-indicator"></div>
        </section>
    }
}

#[component]
fn AboutSection(about: About, portrait: String) -> impl IntoView {
    view! {
        <section id="about" class="about">
            <div class="section-inner about-grid">
                <div id=choreography::ABOUT_IMAGE class="about-image">
                    <img src=portrait alt="Portrait"/>
                </div>
                <div id=choreography::ABOUT_TEXT class="about-text">
                    <h2 class="section-title">"About " <span class="text-gradient">"Me"</span></h2>
                    {about.paragraphs.into_iter().map(|p| view! { <p>{p}</p> }).collect_view()}
                    <div class="highlights">
                        {about
                            .highlights
                            .into_iter()
                            .map(|h| view! {
                                <div class="card highlight">
                                    <h3>{h.title}</h3>
                                    <p>{h.summary}</p>
                                </div>
                            })
                            .collect_view()}
                    </div>
                </div>
            </div>
        </section>
    }
}

#[component]
fn ProjectsSection(projects: Vec<Project>) -> impl IntoView {
    view! {
        <section id="projects" class="projects">
            <div class="section-inner">
                <h2 id=choreography::PROJECTS_HEADING class="section-title">
                    "Featured " <span class="text-gradient">"Projects"</span>
                </h2>
                <div class="project-grid">
                    {projects
                        .into_iter()
                        .enumerate()
                        .map(|(index, project)| view! { <ProjectCard index project/> })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn ProjectCard(index: usize, project: Project) -> impl IntoView {
    let motion = use_motion();
    let image_failed = RwSignal::new(false);
    let initial = project.initial();

    let art = match project.art() {
        ProjectArt::Image(src) => {
            let src = src.to_string();
            let alt = project.title.clone();
            view! {
                <Show
                    when=move || !image_failed.get()
                    fallback=move || view! { <span class="project-initial">{initial.to_string()}</span> }
                >
                    <img src=src.clone() alt=alt.clone() on:error=move |_| image_failed.set(true)/>
                </Show>
            }
            .into_any()
        }
        ProjectArt::Emoji(emoji) => {
            view! { <span class="project-emoji">{emoji.to_string()}</span> }.into_any()
        }
        ProjectArt::Initial(letter) => {
            view! { <span class="project-initial">{letter.to_string()}</span> }.into_any()
        }
    };

    view! {
        <div
            id=choreography::project_card(index)
            class="project-card"
            on:mouseenter=move |_| motion.play(|r| r.project_hover.get(index).copied(), Action::Play)
            on:mouseleave=move |_| motion.play(|r| r.project_hover.get(index).copied(), Action::Reverse)
        >
            <div id=choreography::project_card_body(index) class="card">
                <div class=format!("project-art bg-gradient-to-br {}", project.accent)>{art}</div>
                <h3>{project.title.clone()}</h3>
                <p>{project.description.clone()}</p>
                <ul class="tech-list">
                    {project
                        .technologies
                        .iter()
                        .map(|t| view! { <li class="tech">{t.clone()}</li> })
                        .collect_view()}
                </ul>
                <div class="project-links">
                    {project.demo_url.clone().map(|url| view! {
                        <a href=url target="_blank" rel="noopener noreferrer">"Live Demo"</a>
                    })}
                    {project.code_url.clone().map(|url| view! {
                        <a href=url target="_blank" rel="noopener noreferrer">"Code"</a>
                    })}
                </div>
            </div>
        </div>
    }
}

#[component]
fn SkillsSection(skills: Skills) -> impl IntoView {
    let mut next_index = 0;
    let categories = skills
        .categories
        .into_iter()
        .map(|category| {
            let first = next_index;
            next_index += category.skills.len();
            let cards = category
                .skills
                .into_iter()
                .enumerate()
                .map(|(offset, skill)| {
                    let index = first + offset;
                    view! {
                        <div id=choreography::skill_card(index) class="card skill-card">
                            <div class="skill-head">
                                <span class="skill-icon">{skill.icon}</span>
                                <span class="skill-name">{skill.name}</span>
                                <span class="skill-level">{format!("{}%", skill.level)}</span>
                            </div>
                            <div class="skill-track">
                                <div id=choreography::skill_bar(index) class="skill-bar"></div>
                            </div>
                        </div>
                    }
                })
                .collect_view();
            view! {
                <div class="skill-category">
                    <h3>{category.title}</h3>
                    <div class="skill-grid">{cards}</div>
                </div>
            }
        })
        .collect_view();

    view! {
        <section id="skills" class="skills">
            <div class="section-inner">
                <h2 id=choreography::SKILLS_HEADING class="section-title">
                    "Skills & " <span class="text-gradient">"Technologies"</span>
                </h2>
                <p class="section-intro">{skills.intro}</p>
                {categories}
                <div class="extra-skills">
                    <h3>"Other Technologies"</h3>
                    <ul class="tech-list">
                        {skills
                            .extra
                            .into_iter()
                            .map(|t| view! { <li class="tech">{t}</li> })
                            .collect_view()}
                    </ul>
                </div>
            </div>
        </section>
    }
}

#[component]
fn SiteFooter(footer: Footer, socials: Vec<Social>) -> impl IntoView {
    let nav = use_navigation();
    let brand = footer.brand.clone();

    view! {
        <footer class="footer">
            <div class="section-inner footer-grid">
                <div class="footer-brand">
                    <div class="text-gradient">{footer.brand}</div>
                    <p>{footer.tagline}</p>
                </div>
                <div class="footer-links">
                    {nav
                        .sections()
                        .into_iter()
                        .map(|section| {
                            let id = section.id.clone();
                            view! {
                                <button class="footer-link" on:click=move |_| nav.go(&id)>
                                    {section.label}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                <div class="footer-socials">
                    {socials
                        .into_iter()
                        .map(|social| view! {
                            <a
                                class="social-link"
                                href=social.url
                                target="_blank"
                                rel="noopener noreferrer"
                                title=social.name
                            >
                                {social.icon}
                            </a>
                        })
                        .collect_view()}
                </div>
            </div>
            <p class="copyright">{format!("© {}. All rights reserved.", brand)}</p>
        </footer>
    }
}
