//! Browser region observation: `ResizeObserver` plus window resizes

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, ResizeObserver};

use crate::viewport::{RegionObserver, RegionSize, ResizeCallback, Subscription};

/// Observes the size of the element hosting the preview
pub struct BrowserRegion {
    element: Element,
}

impl BrowserRegion {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn measure(&self) -> RegionSize {
        measure(&self.element)
    }
}

fn measure(element: &Element) -> RegionSize {
    RegionSize::new(element.client_width() as f64, element.client_height() as f64)
}

impl RegionObserver for BrowserRegion {
    fn observe(&self, callback: ResizeCallback) -> Subscription {
        let Some(window) = web_sys::window() else {
            log::warn!("No window; region resizes will not be observed");
            return Subscription::empty();
        };

        let element = self.element.clone();
        let notify = {
            let callback = Rc::clone(&callback);
            move || callback(measure(&element))
        };

        let on_observe = Closure::<dyn FnMut()>::new(notify.clone());
        let on_window = Closure::<dyn FnMut()>::new(notify);

        let observer = match ResizeObserver::new(on_observe.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&self.element);
                Some(observer)
            }
            Err(err) => {
                log::warn!("ResizeObserver unavailable: {:?}", err);
                None
            }
        };
        if let Err(err) =
            window.add_event_listener_with_callback("resize", on_window.as_ref().unchecked_ref())
        {
            log::warn!("Failed to listen for window resize: {:?}", err);
        }

        callback(self.measure());

        Subscription::new(move || {
            if let Some(observer) = observer {
                observer.disconnect();
            }
            let _ = window
                .remove_event_listener_with_callback("resize", on_window.as_ref().unchecked_ref());
            // Closures are dropped only after both registrations are gone
            drop(on_observe);
            drop(on_window);
        })
    }
}
