use dioxus::prelude::*;
use futures_util::StreamExt;

use crate::catalog::{CaseStudy, Catalog, StudyVideo};
use crate::core::platform;
use crate::results::{results_container_id, ResultChartRenderer, VideoResults};
use crate::session::{layout_class, Session};

#[cfg(target_arch = "wasm32")]
type PageDom = crate::core::dom::WebDom;
#[cfg(not(target_arch = "wasm32"))]
type PageDom = crate::core::dom::MemoryDom;

#[cfg(target_arch = "wasm32")]
type PageScheduler = crate::core::timing::BrowserScheduler;
#[cfg(not(target_arch = "wasm32"))]
type PageScheduler = crate::core::timing::ManualScheduler;

/// Share of a case study that must be on screen before it counts as viewed.
pub const VIEW_THRESHOLD: f64 = 0.5;

const CTA_LOCATION: &str = "cta";

/// Chart renderer bound to the live document. Off the web there is no
/// document to draw into.
fn page_renderer() -> Option<ResultChartRenderer<PageDom, PageScheduler>> {
    #[cfg(target_arch = "wasm32")]
    {
        PageDom::from_window().map(|dom| ResultChartRenderer::new(dom, PageScheduler::default()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VideoEvent {
    Attach,
    Play,
    Pause,
    TimeUpdate,
    Ended,
}

#[component]
pub fn CaseStudyPage(slug: String, on_home: EventHandler<()>) -> Element {
    let session = use_context::<Session>();
    let study = Catalog::embedded().find(&slug).cloned();

    let layout = use_hook({
        let session = session.clone();
        let page_name = study.as_ref().map(|study| study.name.clone());
        move || {
            session.analytics().track_page_view(page_name.as_deref(), None);
            session.assign_layout()
        }
    });

    let Some(study) = study else {
        return rsx! {
            section { class: "page case-study-page case-study-page--missing",
                p { {crate::t!("study-not-found")} }
                button { class: "button button--ghost", onclick: move |_| on_home.call(()),
                    {crate::t!("study-back")}
                }
            }
        };
    };

    let layout_css = layout.as_deref().map(layout_class).unwrap_or_default();

    rsx! {
        article { class: "page case-study-page {layout_css}",
            button { class: "button button--ghost case-study-page__back", onclick: move |_| on_home.call(()),
                {crate::t!("study-back")}
            }
            StudyOverview { study: study.clone() }
            if let Some(video) = study.video.clone() {
                StudyVideoSection { video }
            }
            if let Some(cta) = study.cta.clone() {
                section { id: CTA_LOCATION, class: "case-study-page__cta",
                    a {
                        class: "button button--primary cta-button",
                        href: "{cta.href}",
                        onclick: {
                            let session = session.clone();
                            let text = cta.text.clone();
                            move |_| session.cta_clicked(&text, CTA_LOCATION)
                        },
                        "{cta.text}"
                    }
                }
            }
            if !study.downloads.is_empty() {
                section { id: "downloads", class: "case-study-page__downloads",
                    h2 { {crate::t!("study-downloads")} }
                    ul {
                        for download in study.downloads.iter() {
                            li { key: "{download.href}",
                                a {
                                    href: "{download.href}",
                                    download: download.file_name.clone().unwrap_or_default(),
                                    onclick: {
                                        let session = session.clone();
                                        let href = download.href.clone();
                                        let file_name = download.file_name.clone();
                                        move |_| session.download_clicked(&href, file_name.as_deref())
                                    },
                                    "{download.label}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Study header; reports `case_study_view` the first time it is half visible.
#[component]
fn StudyOverview(study: CaseStudy) -> Element {
    let session = use_context::<Session>();

    rsx! {
        section {
            id: "overview",
            class: "case-study",
            "data-study-name": "{study.name}",
            "data-study-industry": "{study.industry}",
            onmounted: {
                let name = study.name.clone();
                let industry = study.industry.clone();
                move |event: MountedEvent| {
                    track_when_visible(&event, session.clone(), name.clone(), industry.clone())
                }
            },
            h1 { "{study.name}" }
            p { class: "case-study__industry",
                {crate::t!("study-industry", industry = study.industry.as_str())}
            }
            p { class: "case-study__summary", "{study.summary}" }
        }
    }
}

fn track_when_visible(event: &MountedEvent, session: Session, name: String, industry: String) {
    #[cfg(target_arch = "wasm32")]
    {
        let data = event.data();
        if let Some(element) = data.downcast::<web_sys::Element>() {
            platform::observe_first_visibility(element, VIEW_THRESHOLD, move || {
                session.analytics().track_case_study_view(&name, &industry);
            });
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (event, session, name, industry);
    }
}

/// The video plus the container its results are revealed in once it ends.
#[component]
fn StudyVideoSection(video: StudyVideo) -> Element {
    let session = use_context::<Session>();

    let events = use_coroutine({
        let video = video.clone();
        move |mut rx: UnboundedReceiver<VideoEvent>| {
            let video = video.clone();
            let analytics = session.analytics().clone();
            async move {
                let Some(renderer) = page_renderer() else {
                    tracing::debug!(video_id = %video.id, "no document, video results disabled");
                    return;
                };
                let mut controller = VideoResults::new(
                    video.id.clone(),
                    video.results.clone(),
                    video.settings(),
                    analytics,
                    renderer,
                );

                while let Some(event) = rx.next().await {
                    let progress = platform::media_progress(&video.id);
                    match event {
                        VideoEvent::Attach => {
                            controller.attach();
                        }
                        VideoEvent::Play => controller.on_play(progress),
                        VideoEvent::Pause => controller.on_pause(progress),
                        VideoEvent::TimeUpdate => controller.on_time_update(progress),
                        VideoEvent::Ended => {
                            controller.on_ended();
                        }
                    }
                }
            }
        }
    });

    let results_id = results_container_id(&video.id);

    rsx! {
        section { id: "video", class: "case-study-page__video",
            h2 { {crate::t!("study-watch")} }
            video {
                id: "{video.id}",
                class: "case-study-video",
                src: "{video.src}",
                poster: video.poster.clone().unwrap_or_default(),
                controls: true,
                preload: "metadata",
                onmounted: move |_| events.send(VideoEvent::Attach),
                onplay: move |_| events.send(VideoEvent::Play),
                onpause: move |_| events.send(VideoEvent::Pause),
                ontimeupdate: move |_| events.send(VideoEvent::TimeUpdate),
                onended: move |_| events.send(VideoEvent::Ended),
            }
            div { id: "{results_id}", class: "video-results-container" }
            p { class: "case-study-page__hint", {crate::t!("study-results-hint")} }
        }
    }
}
