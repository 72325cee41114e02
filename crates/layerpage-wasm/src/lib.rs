//! WASM bindings for the layerpage compiler.
//!
//! Exposes `compile()` and `tokens()` to JavaScript via wasm-bindgen.
//! Both take the layout JSON as a string and throw on unreadable input.

use layerpage_codegen::CompileOptions;
use layerpage_model::{DesignTokens, Document, Loader};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Title used for pages built in the browser.
const PAGE_TITLE: &str = "Layer Page";

/// What `compile()` hands back to JavaScript.
#[derive(Debug, Serialize)]
struct CompiledPage {
    html: String,
    css: String,
    page: String,
    elements: usize,
}

/// Compile layout JSON to HTML + CSS.
///
/// Returns a JS object with `{ html, css, page, elements }`, where `page` is
/// the standalone document. Throws if the JSON cannot be read.
#[wasm_bindgen]
pub fn compile(source: &str) -> Result<JsValue, JsError> {
    let page = native_compile(source).map_err(|e| JsError::new(&e))?;
    serde_wasm_bindgen::to_value(&page).map_err(|e| JsError::new(&e.to_string()))
}

/// Collect the design tokens of layout JSON.
///
/// Returns `{ colors, fonts, font_sizes, spacings }`.
#[wasm_bindgen]
pub fn tokens(source: &str) -> Result<JsValue, JsError> {
    let doc = load(source).map_err(|e| JsError::new(&e))?;
    serde_wasm_bindgen::to_value(&DesignTokens::from_document(&doc))
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Get the compiler version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn load(source: &str) -> Result<Document, String> {
    Loader::load(source).map_err(|e| e.to_string())
}

fn native_compile(source: &str) -> Result<CompiledPage, String> {
    let doc = load(source)?;
    let output = layerpage_codegen::compile(&doc, &CompileOptions::default());
    Ok(CompiledPage {
        page: output.page(PAGE_TITLE),
        html: output.html,
        css: output.css,
        elements: output.elements,
    })
}
