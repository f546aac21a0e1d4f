#![allow(warnings)]
//! Assistant Épicerie Frontend Entry Point

mod api;
mod app;
mod components;
mod context;
mod deals;
mod error;
mod layout;
mod markdown;
mod models;
mod prompts;
mod quantity;
mod storage;
mod store;
mod stores;
mod tutorial;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
