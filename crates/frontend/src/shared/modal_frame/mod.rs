use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Modal overlay with a titled surface.
///
/// Closes on Escape, on the header button and on a click that both starts and
/// ends on the overlay (a text selection dragged out of the dialog does not
/// close it).
#[component]
pub fn ModalFrame(
    #[prop(into)] title: Signal<String>,
    on_close: Callback<()>,
    /// Extra class for the modal surface (`div.modal`)
    #[prop(optional, into)]
    modal_class: Option<String>,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Deferred to the next tick: the overlay must not be removed during its own
    // click dispatch.
    let close_deferred = move || {
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            on_close.run(());
        });
    };

    let escape = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || escape.remove());

    let modal_class = match modal_class {
        Some(cls) => format!("modal {}", cls),
        None => "modal".to_string(),
    };

    view! {
        <div
            class="modal-overlay"
            on:mousedown=move |ev| overlay_mouse_down.set(is_direct_overlay_event(&ev))
            on:click=move |ev| {
                let should_close = overlay_mouse_down.get() && is_direct_overlay_event(&ev);
                overlay_mouse_down.set(false);
                if should_close {
                    close_deferred();
                }
            }
        >
            <div
                class=modal_class
                role="dialog"
                aria-modal="true"
                on:click=move |ev: ev::MouseEvent| ev.stop_propagation()
            >
                <div class="modal__header">
                    <h2 class="modal__title">{move || title.get()}</h2>
                    <button class="modal__close" title="Fechar" on:click=move |_| close_deferred()>
                        {icon("x")}
                    </button>
                </div>
                <div class="modal__body">{children()}</div>
            </div>
        </div>
    }
}
