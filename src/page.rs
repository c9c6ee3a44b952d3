//! Browser glue: element lookup, class toggling, and the timer chain that
//! drives the intro controller. Every DOM element here is optional; a missing
//! element skips its feature instead of failing the load.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window, window};

use crate::intro::{FADE_OUT_MS, IntroController, IntroPhase, TypeEvent, key_delay_ms};
use crate::store::{BrowserStore, KeyValueStore, MemoryStore};
use crate::visited::VisitedProjects;

/// Full page-load routine: visited-project pass first, then the intro.
pub fn run() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;

    if let Some(mut local) = BrowserStore::local() {
        let mut visited = VisitedProjects::load(&local);
        mark_visited_entries(&doc, &visited)?;
        if let Some(key) = current_project_key(&doc) {
            visited.record(&key, &mut local)?;
        }
    }

    run_intro(&win, &doc);
    Ok(())
}

/// Style every project list entry whose key is already in the map.
/// Runs before the current page's key is recorded, so a project page does
/// not mark its own entry on the visit that records it.
fn mark_visited_entries(doc: &Document, visited: &VisitedProjects) -> Result<(), JsValue> {
    let items = doc.query_selector_all("#project-list li")?;
    for i in 0..items.length() {
        let Some(node) = items.item(i) else { continue };
        let Ok(el) = node.dyn_into::<Element>() else {
            continue;
        };
        if let Some(key) = el.get_attribute("data-key") {
            if visited.is_visited(&key) {
                el.class_list().add_1("visited")?;
            }
        }
    }
    Ok(())
}

/// Project pages declare their key as `<body data-project-key="…">`.
fn current_project_key(doc: &Document) -> Option<String> {
    doc.body()?.get_attribute("data-project-key")
}

fn html_by_id(doc: &Document, id: &str) -> Option<HtmlElement> {
    doc.get_element_by_id(id)?.dyn_into().ok()
}

fn run_intro(win: &Window, doc: &Document) {
    let overlay = html_by_id(doc, "overlay");
    let main = html_by_id(doc, "main-content");
    let begin = html_by_id(doc, "begin");
    let title = html_by_id(doc, "title-text");

    let session = BrowserStore::session();
    let seen = session
        .as_ref()
        .is_some_and(|s| s.get(crate::intro::INTRO_SEEN_KEY).is_some());

    let title_text = title.as_ref().map(|t| t.text_content().unwrap_or_default());
    let ctrl = Rc::new(RefCell::new(IntroController::new(
        seen,
        title_text.as_deref(),
    )));

    if ctrl.borrow().phase() == IntroPhase::Done {
        // Skip the intro entirely.
        if let Some(ov) = &overlay {
            let _ = ov.style().set_property("display", "none");
        }
        if let Some(m) = &main {
            reveal_main(m);
        }
        return;
    }

    if let Some(title_el) = title {
        title_el.set_text_content(Some(""));
        start_typewriter(win, ctrl.clone(), title_el, begin.clone());
    }

    if let (Some(begin_el), Some(overlay_el), Some(main_el)) = (begin, overlay, main) {
        wire_begin(win, ctrl, session, begin_el, overlay_el, main_el);
    }
}

fn reveal_main(main: &HtmlElement) {
    let _ = main.class_list().remove_1("hidden");
    let _ = main.class_list().add_1("visible");
}

/// One typewriter tick against the DOM. Returns the delay to the next tick,
/// or `None` when typing is over (blink + Begin shown).
fn type_tick(
    ctrl: &Rc<RefCell<IntroController>>,
    title: &HtmlElement,
    begin: &Option<HtmlElement>,
) -> Option<i32> {
    match ctrl.borrow_mut().type_step() {
        TypeEvent::Reveal { text } => {
            title.set_text_content(Some(&text));
            Some(key_delay_ms(js_sys::Math::random()) as i32)
        }
        TypeEvent::Complete => {
            let _ = title.class_list().add_1("blink");
            if let Some(b) = begin {
                let _ = b.class_list().add_1("show");
            }
            None
        }
        TypeEvent::Idle => None,
    }
}

/// Self-rescheduling setTimeout chain: each tick schedules the next with a
/// fresh random delay. The closure stays alive for the page lifetime via the
/// Rc cycle; there is no teardown.
fn start_typewriter(
    win: &Window,
    ctrl: Rc<RefCell<IntroController>>,
    title: HtmlElement,
    begin: Option<HtmlElement>,
) {
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    let ctrl_cb = ctrl.clone();
    let title_cb = title.clone();
    let begin_cb = begin.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Some(delay) = type_tick(&ctrl_cb, &title_cb, &begin_cb) {
            if let Some(w) = window() {
                if let Some(cb) = f.borrow().as_ref() {
                    let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
                        cb.as_ref().unchecked_ref(),
                        delay,
                    );
                }
            }
        }
    }) as Box<dyn FnMut()>));

    // First character is revealed synchronously, as the original page did.
    if let Some(delay) = type_tick(&ctrl, &title, &begin) {
        if let Some(cb) = g.borrow().as_ref() {
            let _ = win
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    cb.as_ref().unchecked_ref(),
                    delay,
                );
        }
    }
}

/// Clicking Begin starts the fade-out and schedules the single 900 ms
/// completion step: hide overlay, show main, set the session flag.
fn wire_begin(
    win: &Window,
    ctrl: Rc<RefCell<IntroController>>,
    session: Option<BrowserStore>,
    begin: HtmlElement,
    overlay: HtmlElement,
    main: HtmlElement,
) {
    let win_cb = win.clone();
    let session = Rc::new(RefCell::new(session));
    let closure = Closure::wrap(Box::new(move || {
        if !ctrl.borrow_mut().begin_clicked() {
            return;
        }
        let _ = overlay.class_list().add_1("fade-out");

        let ctrl2 = ctrl.clone();
        let session2 = session.clone();
        let overlay2 = overlay.clone();
        let main2 = main.clone();
        let once = Closure::once(move || {
            let _ = overlay2.class_list().add_1("hidden");
            reveal_main(&main2);
            let res = match session2.borrow_mut().as_mut() {
                Some(store) => ctrl2.borrow_mut().fade_finished(store),
                // No session storage: complete the transition, flag is lost.
                None => ctrl2.borrow_mut().fade_finished(&mut MemoryStore::new()),
            };
            if let Err(e) = res {
                web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
            }
        });
        let _ = win_cb.set_timeout_with_callback_and_timeout_and_arguments_0(
            once.as_ref().unchecked_ref(),
            FADE_OUT_MS,
        );
        once.forget();
    }) as Box<dyn FnMut()>);

    let _ = begin.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
