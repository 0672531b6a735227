use crate::components::text::RichText;
use dashboard_core::model::{ActionItem, Source};
use leptos::*;

fn metadata_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(metadata_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Detail view of one mock source record, optionally opened from an action
/// item.
#[component]
pub fn SourceModal(
    source: RwSignal<Option<Source>>,
    #[prop(optional)] action: Option<RwSignal<Option<ActionItem>>>,
) -> impl IntoView {
    let close = move || {
        source.set(None);
        if let Some(action) = action {
            action.set(None);
        }
    };
    let action_title = move || action.and_then(|a| a.get()).map(|a| a.title);

    move || {
        source.get().map(|src| {
            let app = src.app_type;
            let metadata = src
                .metadata
                .iter()
                .map(|(key, value)| (key.replace('_', " "), metadata_value(value)))
                .collect::<Vec<_>>();
            view! {
              <div class="modal-backdrop" on:click=move |_| close()>
                <div class="modal source" on:click=|ev| ev.stop_propagation()>
                  <header>
                    <img src=app.logo_path() alt=app.label()/>
                    <div>
                      <h2>{src.title.clone()}</h2>
                      <div class="meta">{src.subtitle.clone()}</div>
                    </div>
                    <button class="close" on:click=move |_| close()>"×"</button>
                  </header>
                  {action_title().map(|title| view! { <div class="action-context">{title}</div> })}
                  <dl class="metadata">
                    {metadata
                      .into_iter()
                      .map(|(key, value)| view! { <dt>{key}</dt><dd>{value}</dd> })
                      .collect_view()}
                  </dl>
                  <RichText text=src.content.clone()/>
                </div>
              </div>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn metadata_values_render_flat() {
        assert_eq!(metadata_value(&json!("Paid")), "Paid");
        assert_eq!(metadata_value(&json!(112500.5)), "112500.5");
        assert_eq!(metadata_value(&json!(["#sales", "#ops"])), "#sales, #ops");
    }
}
