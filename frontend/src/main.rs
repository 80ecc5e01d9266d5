use gloo::timers::future::TimeoutFuture;
use shared::UserSettings;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod components;
mod hooks;

use components::SettingsForm;

/// How long the success banner stays visible after a save.
const SUCCESS_BANNER_MS: u32 = 3_000;

#[function_component(App)]
fn app() -> Html {
    let show_success = use_state(|| false);

    let on_save = {
        let show_success = show_success.clone();
        Callback::from(move |settings: UserSettings| {
            match serde_json::to_string(&settings) {
                Ok(json) => gloo::console::log!("Saving settings:", json),
                Err(e) => gloo::console::error!("Failed to serialize settings:", e.to_string()),
            }

            show_success.set(true);

            // Auto-dismiss the banner
            let show_success = show_success.clone();
            spawn_local(async move {
                TimeoutFuture::new(SUCCESS_BANNER_MS).await;
                show_success.set(false);
            });
        })
    };

    html! {
        <div class="app">
            <header class="app-header">
                <div class="header-content">
                    <h1>{"🏋️ OctoFit Tracker"}</h1>
                    <p>{"Manage your fitness journey"}</p>
                </div>
            </header>

            {if *show_success {
                html! {
                    <div class="success-banner">
                        {"✓ Settings saved successfully!"}
                    </div>
                }
            } else { html! {} }}

            <main class="app-main">
                <SettingsForm {on_save} />
            </main>

            <footer class="app-footer">
                <p>{"© 2025 OctoFit Tracker - Built with ❤️ for Mergington High School"}</p>
            </footer>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
