use gloo_events::EventListener;
use log::info;
use yew::prelude::*;

mod config;
mod dom;
mod frame;
mod interactions;
mod visibility;
mod controllers {
    pub mod booking;
    pub mod cards;
    pub mod counter;
    pub mod cursor;
    pub mod gallery;
    pub mod hero;
    pub mod magnetic;
    pub mod marquee;
    pub mod motion;
    pub mod navigation;
    pub mod parallax;
    pub mod progress;
    pub mod relay;
    pub mod reveal;
}

use interactions::Interactions;

const MOUNT_ID: &str = "interactions-root";

/// Renders nothing; owns the page's interaction controllers for as long as
/// it stays mounted.
#[function_component]
fn App() -> Html {
    use_effect_with_deps(
        move |_| {
            let interactions = Interactions::install();
            info!("Attached {} interaction controllers", interactions.installed_count());
            move || drop(interactions)
        },
        (), // Attach once on mount
    );

    html! {}
}

fn mount() {
    let Some(document) = dom::document() else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let Ok(root) = document.create_element("div") else {
        return;
    };
    root.set_id(MOUNT_ID);
    let _ = root.set_attribute("hidden", "");
    if body.append_child(&root).is_err() {
        return;
    }

    info!("Mounting interactions");
    yew::Renderer::<App>::with_root(root).render();
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting chalyman site");
    let Some(document) = dom::document() else {
        return;
    };
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| mount()).forget();
    } else {
        mount();
    }
}
