use dioxus::prelude::*;

use crate::catalog::Catalog;
use crate::session::Session;

/// Landing page listing every published case study.
#[component]
pub fn Home(on_open: EventHandler<String>) -> Element {
    let session = use_context::<Session>();
    use_hook(move || session.analytics().track_page_view(None, Some("home")));

    let studies = &Catalog::embedded().studies;

    rsx! {
        section { class: "page page-home",
            h1 { {crate::t!("home-title")} }
            p { class: "page-home__intro", {crate::t!("home-intro")} }

            if studies.is_empty() {
                p { class: "page-home__empty", {crate::t!("home-empty")} }
            }

            ul { class: "study-list",
                for study in studies.iter() {
                    li { key: "{study.slug}", class: "study-list__item",
                        h2 { "{study.name}" }
                        p { class: "study-list__industry",
                            {crate::t!("study-industry", industry = study.industry.as_str())}
                        }
                        p { "{study.summary}" }
                        button {
                            class: "button button--ghost",
                            onclick: {
                                let slug = study.slug.clone();
                                move |_| on_open.call(slug.clone())
                            },
                            {crate::t!("home-read-more")}
                        }
                    }
                }
            }
        }
    }
}
