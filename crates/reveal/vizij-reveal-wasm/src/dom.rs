//! DOM driver: runs a `RevealController` directly against a page element.
//!
//! Reads the element's class list, `data-intro` and document offset, applies
//! marker changes to the live DOM, arms `setTimeout` for phase B, observes
//! window scroll until the first crossing and dispatches the displayed
//! `CustomEvent` on `document` with the element as `detail`.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, CustomEventInit, Document, Element, HtmlElement, Window};

use vizij_reveal_core::{
    has_class, Change, Config, Outputs, Part, RevealController, RevealEvent, RevealState,
    ScrollOutcome, TargetId, TargetSpec, Viewport, INTRO_ATTRIBUTE,
};

struct DomReveal {
    window: Window,
    document: Document,
    element: Element,
    content: Option<Element>,
    cfg: Config,
    controller: RevealController,
    /// Live scroll listener; cleared once the reveal completes.
    on_scroll: Option<Closure<dyn FnMut()>>,
}

type Shared = Rc<RefCell<DomReveal>>;

impl DomReveal {
    fn part(&self, part: Part) -> Option<&Element> {
        match part {
            Part::Root => Some(&self.element),
            Part::Content => self.content.as_ref(),
        }
    }

    /// Best effort: a marker the DOM rejects is logged and skipped, and the
    /// displayed event is dispatched regardless.
    fn apply(&self, out: &Outputs) {
        for change in &out.changes {
            let result = match change {
                Change::SetOpacity { opacity, .. } => match self.element.dyn_ref::<HtmlElement>() {
                    Some(el) => el.style().set_property("opacity", &opacity.to_string()),
                    None => Ok(()),
                },
                Change::AddClass { part, class, .. } => match self.part(*part) {
                    Some(el) => el.class_list().add_1(class),
                    None => Ok(()),
                },
                Change::RemoveClass { part, class, .. } => match self.part(*part) {
                    Some(el) => el.class_list().remove_1(class),
                    None => Ok(()),
                },
            };
            if let Err(e) = result {
                warn!("reveal marker {change:?} rejected: {e:?}");
            }
        }
        for event in &out.events {
            if let RevealEvent::Displayed { .. } = event {
                if let Err(e) = self.dispatch_displayed() {
                    error!("reveal displayed event failed: {e:?}");
                }
            }
        }
    }

    fn dispatch_displayed(&self) -> Result<(), JsValue> {
        let init = CustomEventInit::new();
        init.set_bubbles(true);
        init.set_detail(&self.element);
        let event = CustomEvent::new_with_event_init_dict(&self.cfg.displayed_event, &init)?;
        self.document.dispatch_event(&event)?;
        Ok(())
    }

    fn now_ms(&self) -> u64 {
        self.window
            .performance()
            .map(|p| p.now().max(0.0) as u64)
            .unwrap_or(0)
    }
}

fn viewport_of(window: &Window) -> Result<Viewport, JsValue> {
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    let scroll_top = window.scroll_y()?;
    Ok(Viewport::new(height as f32, scroll_top as f32))
}

/// Distance from the document top, matching jQuery's `offset().top`.
fn document_offset_top(element: &Element, window: &Window) -> f32 {
    let rect = element.get_bounding_client_rect();
    (rect.top() + window.scroll_y().unwrap_or(0.0)) as f32
}

fn js_error(context: &'static str) -> impl Fn(JsValue) -> JsError {
    move |e| JsError::new(&format!("{context}: {e:?}"))
}

/// Drive the reveal sequence for one element. Elements without the inline
/// marker class are left untouched. Pass a config object or undefined/null.
#[wasm_bindgen(js_name = inlineLoad)]
pub fn inline_load(element: Element, config: JsValue) -> Result<(), JsError> {
    let cfg = crate::config_from_js(config)?;

    let class_attr = element.get_attribute("class").unwrap_or_default();
    if !has_class(&class_attr, &cfg.classes.inline) {
        return Ok(());
    }

    let window = web_sys::window().ok_or_else(|| JsError::new("inlineLoad: no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsError::new("inlineLoad: no document"))?;
    let viewport = viewport_of(&window).map_err(js_error("inlineLoad viewport"))?;

    let intro = element.get_attribute(INTRO_ATTRIBUTE);
    let offset_top = document_offset_top(&element, &window);
    let spec = TargetSpec::from_attributes(&class_attr, intro.as_deref(), offset_top, &cfg);

    let content = element
        .query_selector(&format!(".{}", cfg.classes.content))
        .map_err(js_error("inlineLoad content lookup"))?;
    if content.is_none() {
        warn!(
            "inline target has no .{} child; animate markers will be skipped",
            cfg.classes.content
        );
    }

    let controller = RevealController::new(TargetId(0), spec, &cfg);
    let shared: Shared = Rc::new(RefCell::new(DomReveal {
        window,
        document,
        element,
        content,
        cfg,
        controller,
        on_scroll: None,
    }));

    let mut out = Outputs::default();
    let (delay, waiting) = {
        let mut guard = shared.borrow_mut();
        let state = &mut *guard;
        let delay = state.controller.invoke(&viewport, &state.cfg, &mut out);
        state.apply(&out);
        let waiting = state.controller.state() == RevealState::WaitingForScroll;
        (delay, waiting)
    };

    if let Some(delay_ms) = delay {
        schedule_complete(&shared, delay_ms).map_err(js_error("inlineLoad timer"))?;
    } else if waiting {
        attach_scroll(&shared).map_err(js_error("inlineLoad scroll"))?;
    }
    Ok(())
}

fn attach_scroll(shared: &Shared) -> Result<(), JsValue> {
    let handle = Rc::clone(shared);
    let listener = Closure::<dyn FnMut()>::new(move || {
        if let Err(e) = handle_scroll(&handle) {
            error!("reveal scroll handler failed: {e:?}");
        }
    });
    let mut state = shared.borrow_mut();
    state
        .window
        .add_event_listener_with_callback("scroll", listener.as_ref().unchecked_ref())?;
    state.on_scroll = Some(listener);
    Ok(())
}

fn handle_scroll(shared: &Shared) -> Result<(), JsValue> {
    let mut out = Outputs::default();
    let delay_ms = {
        let mut guard = shared.borrow_mut();
        let state = &mut *guard;
        let viewport = viewport_of(&state.window)?;
        let ScrollOutcome::Triggered { delay_ms } =
            state.controller.on_scroll(&viewport, &state.cfg, &mut out)
        else {
            return Ok(());
        };
        // Detach now; the closure itself is dropped by the timer below since
        // it is still executing here.
        if let Some(listener) = state.on_scroll.as_ref() {
            state
                .window
                .remove_event_listener_with_callback("scroll", listener.as_ref().unchecked_ref())?;
        }
        debug!("reveal crossed at scroll {}, detached", viewport.scroll_top);
        state.apply(&out);
        delay_ms
    };
    schedule_complete(shared, delay_ms)
}

fn schedule_complete(shared: &Shared, delay_ms: u64) -> Result<(), JsValue> {
    let handle = Rc::clone(shared);
    let callback: js_sys::Function = Closure::once_into_js(move || {
        let mut out = Outputs::default();
        let mut guard = handle.borrow_mut();
        let state = &mut *guard;
        let now = state.now_ms();
        state.controller.complete(now, &state.cfg, &mut out);
        state.on_scroll = None;
        state.apply(&out);
    })
    .unchecked_into();
    let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    let window = shared.borrow().window.clone();
    window.set_timeout_with_callback_and_timeout_and_arguments_0(&callback, timeout)?;
    Ok(())
}
