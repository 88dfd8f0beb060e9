//! Page layout engine for the photobook editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser, and is also
//! linked natively by the `photobook` host tool. It owns the editing surface
//! of one album page: the element list and its wire format, translating raw
//! pointer and keyboard events into element mutations, hit-testing, zoom, and
//! the display list. The host is responsible only for wiring DOM events to the
//! engine and persisting the resulting [`engine::Action::Save`] snapshots.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`] and the [`engine::Action`] list it returns |
//! | [`doc`] | Element types, content string codec and the in-memory element store |
//! | [`geometry`] | Reference space, print formats and projections |
//! | [`viewport`] | Fit-to-screen and manual zoom |
//! | [`input`] | Input event types and the interaction state machine |
//! | [`hit`] | Hit-testing against elements and resize handles |
//! | [`layers`] | Layer panel projection |
//! | [`preview`] | Paginated read-only preview |
//! | [`pages`] | Album/page records, format catalog, page overview and removal guard |
//! | [`render`] | Editor display list |
//! | [`bindings`] | `wasm-bindgen` export of the editor |
//! | [`consts`] | Shared numeric constants (zoom limits, minimum sizes, etc.) |

pub mod bindings;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod layers;
pub mod pages;
pub mod preview;
pub mod render;
pub mod viewport;
