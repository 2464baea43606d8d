//! Browser scheduler: `setTimeout` through `gloo-timers`, frames through
//! `requestAnimationFrame`.

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast as _;

use super::Scheduler;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn now(&self) -> f64 {
        web_sys::window()
            .and_then(|window| window.performance())
            .map(|performance| performance.now())
            .unwrap_or(0.0)
    }

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }

    fn next_frame(&self, task: Box<dyn FnOnce(f64)>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::once_into_js(move |timestamp: f64| task(timestamp));
        if window
            .request_animation_frame(callback.unchecked_ref())
            .is_err()
        {
            tracing::warn!("requestAnimationFrame rejected callback");
        }
    }
}
