//! Create Point Component
//!
//! Registration page for a new collection point. Owns its store, so leaving
//! the page discards everything entered.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dropzone::{DroppedFile, Dropzone};
use reactive_stores::Store;

use crate::api;
use crate::components::{ItemGrid, LocationSelect, MapPicker, PageHeader};
use crate::context::{AppContext, Page};
use crate::form::FormField;
use crate::geolocation;
use crate::geo::LatLng;
use crate::store::{
    store_field, store_form_snapshot, store_initial_position, store_position, store_reset,
    store_set_field, store_set_image, store_set_initial_position, store_set_items,
    store_set_position, store_set_ufs, CreatePointState, CreatePointStore,
};

#[component]
pub fn CreatePoint() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store: CreatePointStore = Store::new(CreatePointState::default());
    provide_context(store);

    let (submitting, set_submitting) = signal(false);

    // Browser position centers the map
    geolocation::current_position(move |position| store_set_initial_position(&store, position));

    // Catalog
    spawn_local(async move {
        match api::list_items().await {
            Ok(items) => {
                web_sys::console::log_1(&format!("[CREATE] Loaded {} items", items.len()).into());
                store_set_items(&store, items);
            }
            Err(e) => web_sys::console::error_1(&format!("[CREATE] Failed to load items: {}", e).into()),
        }
    });

    // Regions
    spawn_local(async move {
        match api::list_ufs().await {
            Ok(ufs) => {
                web_sys::console::log_1(&format!("[IBGE] Loaded {} UFs", ufs.len()).into());
                store_set_ufs(&store, ufs);
            }
            Err(e) => web_sys::console::error_1(&format!("[IBGE] Failed to load UFs: {}", e).into()),
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        set_submitting.set(true);
        let form = store_form_snapshot(&store);

        spawn_local(async move {
            match api::create_point(&form).await {
                Ok(status) => {
                    web_sys::console::log_1(&format!("[CREATE] Server answered {}", status).into());
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message("Cadastrou");
                    }
                    store_reset(&store);
                    ctx.navigate(Page::Home);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[CREATE] Failed to submit point: {}", e).into());
                    set_submitting.set(false);
                }
            }
        });
    };

    let text_input = move |field: FormField, label: &'static str, input_type: &'static str| {
        view! {
            <div class="field">
                <label for=field.key()>{label}</label>
                <input
                    type=input_type
                    name=field.key()
                    id=field.key()
                    prop:value=move || store_field(&store, field)
                    on:input=move |ev| store_set_field(&store, field, event_target_value(&ev))
                />
            </div>
        }
    };

    view! {
        <div class="create-point">
            <PageHeader />

            <form on:submit=on_submit>
                <h1>"Cadastro do novo ponto de coleta"</h1>

                <Dropzone on_file_uploaded=move |file: DroppedFile| store_set_image(&store, Some(file)) />

                <fieldset>
                    <legend><h2>"Dados"</h2></legend>
                    {text_input(FormField::Name, "Nome da entidade", "text")}
                    <div class="field-group">
                        {text_input(FormField::Email, "E-mail", "email")}
                        {text_input(FormField::Whatsapp, "Whatsapp", "text")}
                    </div>
                </fieldset>

                <fieldset>
                    <legend>
                        <h2>"Endereço"</h2>
                        <span>"Selecione o endereço no mapa"</span>
                    </legend>
                    <MapPicker
                        center=Signal::derive(move || store_initial_position(&store))
                        selected=Signal::derive(move || store_position(&store))
                        on_select=move |position: LatLng| store_set_position(&store, position)
                    />
                    <LocationSelect />
                </fieldset>

                <fieldset>
                    <legend>
                        <h2>"Ítens de coleta"</h2>
                        <span>"Selecione um ou mais itens abaixo"</span>
                    </legend>
                    <ItemGrid />
                </fieldset>

                <button type="submit" disabled=move || submitting.get()>
                    "Cadastrar ponto de coleta"
                </button>
            </form>
        </div>
    }
}
