//! Menu navigator: button clicks to page redirects.

use std::cell::RefCell;
use std::rc::Rc;

use viewer_common::nav::{self, Navigate, Route};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, MouseEvent};

use crate::dom::LocationNavigator;

struct ButtonBinding {
    route: Route,
    element: Element,
    onclick: Closure<dyn FnMut(MouseEvent)>,
}

impl Drop for ButtonBinding {
    fn drop(&mut self) {
        let _ = self
            .element
            .remove_event_listener_with_callback("click", self.onclick.as_ref().unchecked_ref());
    }
}

#[wasm_bindgen]
pub struct MenuNavigator {
    document: Document,
    bindings: Rc<RefCell<Vec<ButtonBinding>>>,
    onready: Option<Closure<dyn FnMut(Event)>>,
}

#[wasm_bindgen]
impl MenuNavigator {
    /// Bind the menu buttons, waiting for `DOMContentLoaded` if the document
    /// is still loading.
    ///
    /// The page must keep the returned object alive. Once it is freed, or
    /// collected by the JS garbage collector, the click handlers are removed.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<MenuNavigator, JsValue> {
        crate::init_runtime();

        let document = crate::dom::document()?;
        let defer = document.ready_state() == "loading";
        Self::attach(document, Rc::new(LocationNavigator), defer)
    }

    /// Number of buttons that currently have a click handler.
    pub fn bound_count(&self) -> usize {
        self.bindings.borrow().len()
    }
}

impl MenuNavigator {
    /// Bind now, or on the next `DOMContentLoaded` when `defer` is set.
    #[doc(hidden)]
    pub fn attach(
        document: Document,
        navigator: Rc<dyn Navigate>,
        defer: bool,
    ) -> Result<MenuNavigator, JsValue> {
        let bindings: Rc<RefCell<Vec<ButtonBinding>>> = Rc::new(RefCell::new(Vec::new()));

        let onready = if defer {
            let doc = document.clone();
            let slot = Rc::clone(&bindings);
            let onready = Closure::wrap(Box::new(move |_e: Event| {
                match bind_routes(&doc, &navigator) {
                    Ok(bound) => *slot.borrow_mut() = bound,
                    Err(e) => log::error!("failed to bind menu buttons: {:?}", e),
                }
            }) as Box<dyn FnMut(Event)>);
            document.add_event_listener_with_callback(
                "DOMContentLoaded",
                onready.as_ref().unchecked_ref(),
            )?;
            Some(onready)
        } else {
            *bindings.borrow_mut() = bind_routes(&document, &navigator)?;
            None
        };

        Ok(MenuNavigator {
            document,
            bindings,
            onready,
        })
    }

    pub fn bound_routes(&self) -> Vec<Route> {
        self.bindings.borrow().iter().map(|b| b.route).collect()
    }
}

impl Drop for MenuNavigator {
    fn drop(&mut self) {
        if let Some(onready) = &self.onready {
            let _ = self.document.remove_event_listener_with_callback(
                "DOMContentLoaded",
                onready.as_ref().unchecked_ref(),
            );
        }
    }
}

fn bind_routes(
    document: &Document,
    navigator: &Rc<dyn Navigate>,
) -> Result<Vec<ButtonBinding>, JsValue> {
    let mut bindings = Vec::new();
    for (route, element) in nav::resolve(|id| document.get_element_by_id(id)) {
        let navigator = Rc::clone(navigator);
        let onclick = Closure::wrap(Box::new(move |_e: MouseEvent| {
            if let Err(err) = route.follow(navigator.as_ref()) {
                log::error!("{:#}", err);
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        element.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        bindings.push(ButtonBinding {
            route,
            element,
            onclick,
        });
    }
    log::debug!(
        "menu navigator bound {} of {} buttons",
        bindings.len(),
        nav::ROUTES.len()
    );
    Ok(bindings)
}
