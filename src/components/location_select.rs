//! Location Select Component
//!
//! Region and locality dropdowns. Picking a region fetches its localities;
//! answers for a region that is no longer selected are dropped.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::form::UNSELECTED;
use crate::store::{
    store_apply_cities, store_cities, store_city, store_select_city, store_select_uf, store_uf,
    store_ufs, use_create_point_store,
};

#[component]
pub fn LocationSelect() -> impl IntoView {
    let store = use_create_point_store();

    let on_uf_change = move |ev: web_sys::Event| {
        let uf = event_target_value(&ev);
        let Some(query) = store_select_uf(&store, &uf) else {
            return;
        };
        spawn_local(async move {
            match api::list_cities(&query.uf).await {
                Ok(cities) => {
                    let count = cities.len();
                    if store_apply_cities(&store, &query, cities) {
                        web_sys::console::log_1(&format!("[IBGE] Loaded {} cities for {}", count, query.uf).into());
                    } else {
                        web_sys::console::log_1(&format!("[IBGE] Dropped stale cities for {}", query.uf).into());
                    }
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[IBGE] Failed to load cities for {}: {}", query.uf, e).into());
                }
            }
        });
    };

    let on_city_change = move |ev: web_sys::Event| {
        store_select_city(&store, &event_target_value(&ev));
    };

    view! {
        <div class="field-group">
            <div class="field">
                <label for="uf">"Estado (UF)"</label>
                <select name="uf" id="uf" prop:value=move || store_uf(&store) on:change=on_uf_change>
                    <option value=UNSELECTED>"Selecione uma UF"</option>
                    {move || store_ufs(&store).into_iter().map(|uf| view! {
                        <option value=uf.clone()>{uf.clone()}</option>
                    }).collect_view()}
                </select>
            </div>
            <div class="field">
                <label for="city">"Cidade"</label>
                <select name="city" id="city" prop:value=move || store_city(&store) on:change=on_city_change>
                    <option value=UNSELECTED>"Selecione uma cidade"</option>
                    {move || store_cities(&store).into_iter().map(|city| view! {
                        <option value=city.clone()>{city.clone()}</option>
                    }).collect_view()}
                </select>
            </div>
        </div>
    }
}
