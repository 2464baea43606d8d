//! Small browser lookups.
//!
//! Helpers used from shared code have a native fallback so callers need no
//! `cfg` attributes of their own.

/// `window.location.pathname`, or `/` off the web.
pub fn page_path() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|window| window.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        "/".to_string()
    }
}

/// `document.title`, or an empty string off the web.
pub fn document_title() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|window| window.document())
            .map(|document| document.title())
            .unwrap_or_default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        String::new()
    }
}

/// Adds `class` to `<body>`; no-op off the web.
pub fn add_body_class(class: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let body = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.body());
        if let Some(body) = body {
            if body.class_list().add_1(class).is_err() {
                tracing::warn!(class, "unable to tag body");
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = class;
    }
}

/// Playback position of the `<video>`/`<audio>` element with `id` as a
/// rounded percentage. Zero when the element or its duration is unknown.
pub fn media_progress(id: &str) -> u8 {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast as _;

        web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(id))
            .and_then(|element| element.dyn_into::<web_sys::HtmlMediaElement>().ok())
            .map(|media| crate::results::progress_percent(media.current_time(), media.duration()))
            .unwrap_or(0)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = id;
        0
    }
}

/// Calls `on_visible` once, the first time `element` is at least
/// `threshold` visible in the viewport.
#[cfg(target_arch = "wasm32")]
pub fn observe_first_visibility(
    element: &web_sys::Element,
    threshold: f64,
    on_visible: impl FnOnce() + 'static,
) {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast as _, JsValue};
    use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

    let mut on_visible = Some(on_visible);
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    if let Some(notify) = on_visible.take() {
                        notify();
                    }
                    observer.unobserve(&entry.target());
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));

    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            observer.observe(element);
            callback.forget();
        }
        Err(_) => tracing::warn!("IntersectionObserver unavailable"),
    }
}
