//! KonnerVerse front-end crate.
//!
//! Compiled to wasm and loaded by every page of the portfolio site. On load
//! it marks previously visited projects in the landing-page list, records
//! the current project page in localStorage, and runs the one-time typewriter
//! intro overlay (skipped for the rest of the session once seen). The intro
//! and visit-tracking logic is plain Rust behind a storage seam, so the
//! interesting parts run under native `cargo test`.

use wasm_bindgen::prelude::*;

pub mod intro;
mod page;
pub mod store;
pub mod visited;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Keys of the project pages the site serves, matching the `data-key`
/// attributes in the landing-page list and the `data-project-key` each
/// project page declares.
pub const PROJECT_KEYS: &[&str] = &[
    "chatbot",
    "video-site",
    "simulation",
    "ai-programming-assistant",
    "spotify-nicheness-analyzer",
    "smart-mp3-player",
    "productivity-timer",
    "secret-santa",
    "fact-of-the-day",
    "hapax-analyzer",
];

/// Page-load entry point, called from each page's inline module script.
#[wasm_bindgen]
pub fn init_page() -> Result<(), JsValue> {
    page::run()
}
