use folio_core::{NavController, ScrollState, Section};
use leptos::prelude::*;

use crate::dom::{self, DomViewport};
use crate::motion::MotionHandle;

/// Navigation state shared by the navbar and every in-page link
#[derive(Clone, Copy)]
pub struct Navigation {
    controller: StoredValue<NavController, LocalStorage>,
    state: RwSignal<ScrollState>,
    motion: MotionHandle,
}

impl Navigation {
    pub fn new(controller: NavController, motion: MotionHandle) -> Self {
        let state = RwSignal::new(controller.state().clone());
        Self {
            controller: StoredValue::new_local(controller),
            state,
            motion,
        }
    }

    /// Recompute from the live scroll position
    pub fn on_scroll(self) {
        let Some(viewport) = DomViewport::current() else {
            return;
        };
        let now = dom::now();
        if let Some(state) = self
            .controller
            .try_update_value(|c| c.on_scroll(&viewport, now))
            .flatten()
        {
            self.state.set(state);
        }
    }

    /// Highlight `id` now and scroll it under the header
    pub fn go(self, id: &str) {
        self.go_with(id, None);
    }

    /// [`Navigation::go`] with a scroll length other than the navbar's
    pub fn go_with(self, id: &str, seconds: Option<f64>) {
        let Some(viewport) = DomViewport::current() else {
            return;
        };
        let now = dom::now();
        let scroll = self
            .controller
            .try_update_value(|c| c.navigate(id, &viewport, now))
            .flatten();
        if let Some(mut scroll) = scroll {
            if let Some(seconds) = seconds {
                scroll = scroll.with_duration(seconds);
            }
            self.sync();
            self.motion.scroll(scroll);
        }
    }

    /// Follow the URL fragment the page was opened with
    pub fn go_to_fragment(self, fragment: &str) {
        let target = self
            .controller
            .try_with_value(|c| c.sections().parse_fragment(fragment).map(str::to_string))
            .flatten();
        if let Some(id) = target {
            self.go(&id);
        }
    }

    pub fn is_active(self, id: &str) -> bool {
        self.state.with(|s| s.active == id)
    }

    pub fn scrolled(self) -> bool {
        self.state.with(|s| s.scrolled)
    }

    pub fn sections(self) -> Vec<Section> {
        self.controller
            .try_with_value(|c| c.sections().iter().cloned().collect())
            .unwrap_or_default()
    }

    fn sync(self) {
        if let Some(state) = self.controller.try_with_value(|c| c.state().clone()) {
            self.state.set(state);
        }
    }
}

pub fn use_navigation() -> Navigation {
    expect_context::<Navigation>()
}

#[component]
pub fn Navbar(brand: String) -> impl IntoView {
    let nav = use_navigation();
    let (menu_open, set_menu_open) = signal(false);

    let links = nav
        .sections()
        .into_iter()
        .map(|section| {
            let id = section.id.clone();
            let active_id = section.id.clone();
            view! {
                <li>
                    <button
                        class=move || if nav.is_active(&active_id) { "nav-link active" } else { "nav-link" }
                        on:click=move |_| {
                            set_menu_open.set(false);
                            nav.go(&id);
                        }
                    >
                        {section.label}
                    </button>
                </li>
            }
        })
        .collect_view();

    view! {
        <nav class=move || if nav.scrolled() { "navbar scrolled" } else { "navbar" }>
            <div class="nav-inner">
                <button class="nav-brand" on:click=move |_| nav.go("hero")>
                    {brand}
                </button>
                <button
                    class="nav-toggle"
                    aria-label="Toggle navigation"
                    on:click=move |_| set_menu_open.update(|open| *open = !*open)
                >
                    {move || if menu_open.get() { "✕" } else { "☰" }}
                </button>
                <ul class=move || if menu_open.get() { "nav-links open" } else { "nav-links" }>
                    {links}
                </ul>
            </div>
        </nav>
    }
}
