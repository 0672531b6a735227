use leptos::*;
use std::time::Duration;

const FADE_IN_DELAY: Duration = Duration::from_millis(50);

/// Content pane that fades in shortly after it mounts.
#[component]
pub fn PageShell(children: Children) -> impl IntoView {
    let loaded = create_rw_signal(false);
    match set_timeout_with_handle(move || loaded.set(true), FADE_IN_DELAY) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(_) => loaded.set(true),
    }

    view! {
      <div class="page" class:loaded=move || loaded.get()>
        {children()}
      </div>
    }
}
