use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::session::Session;
use ui::views::{CaseStudyPage, Home, SiteFrame};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(SiteShell)]
    #[route("/")]
    Landing {},
    #[route("/case-studies/:slug")]
    CaseStudy { slug: String },
}

/// Shared theme, inlined so the bundle needs no separate stylesheet request.
const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger already installed: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();
    use_context_provider(Session::start);

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        Router::<Route> {}
    }
}

#[component]
fn Landing() -> Element {
    let navigator = use_navigator();
    rsx! {
        Home {
            on_open: move |slug: String| {
                tracing::debug!(%slug, "opening case study");
                navigator.push(Route::CaseStudy { slug });
            },
        }
    }
}

#[component]
fn CaseStudy(slug: String) -> Element {
    let navigator = use_navigator();
    rsx! {
        // Keyed so moving between studies remounts and re-tracks the page.
        CaseStudyPage {
            key: "{slug}",
            slug: slug.clone(),
            on_home: move |_| {
                navigator.push(Route::Landing {});
            },
        }
    }
}

#[component]
fn SiteShell() -> Element {
    let navigator = use_navigator();
    rsx! {
        SiteFrame {
            on_home: move |_| {
                navigator.push(Route::Landing {});
            },
            Outlet::<Route> {}
        }
    }
}
