//! Telemetry Dash
//!
//! Single-page CPU and memory telemetry dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - On-demand fetch of the latest readings
//! - Auto-refresh with a fixed period and optional backoff
//! - Per-reading cards and a batch summary
//! - Server location and polling settings kept in local storage
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All fetch, render and refresh logic lives in [`telemetry`]
//! and runs without a browser; the components only bind signals to it.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;
mod telemetry;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
