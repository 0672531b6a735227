//! Browser front end for the awareness dashboard demo, rendered client side
//! with Leptos and built with `trunk`.

use leptos::*;

mod app;
mod components;
mod pages;
mod state;
mod storage;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(|| view! { <app::App/> });
}
