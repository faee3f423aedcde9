use crate::i18n::{t, tr1};
use crate::scoreboard::ScoreAction;
use std::collections::BTreeMap;
use web_sys::HtmlInputElement;
use yazboz_core::{DrinkCatalog, drink_bill, format_bill};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct DrinkPanelProps {
    pub catalog: DrinkCatalog,
    pub counts: BTreeMap<String, u32>,
    pub prices: BTreeMap<String, f64>,
    /// Prices may carry kuruş.
    pub fractional: bool,
    pub on_action: Callback<ScoreAction>,
}

#[function_component(DrinkPanel)]
pub fn drink_panel(props: &DrinkPanelProps) -> Html {
    let rows = props.catalog.drinks.iter().map(|drink| {
        let count = props.counts.get(&drink.id).copied().unwrap_or(0);
        let price = props
            .prices
            .get(&drink.id)
            .filter(|price| **price > 0.0)
            .map(|price| format_bill(*price, props.fractional))
            .unwrap_or_default();
        let on_minus = {
            let cb = props.on_action.clone();
            let id = drink.id.clone();
            Callback::from(move |_| cb.emit(ScoreAction::RemoveDrink(id.clone())))
        };
        let on_plus = {
            let cb = props.on_action.clone();
            let id = drink.id.clone();
            Callback::from(move |_| cb.emit(ScoreAction::AddDrink(id.clone())))
        };
        let on_price = {
            let cb = props.on_action.clone();
            let id = drink.id.clone();
            Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                cb.emit(ScoreAction::SetPrice {
                    drink: id.clone(),
                    text: input.value(),
                });
            })
        };
        html! {
            <li class="drink-row">
                <span class="drink-name">{ format!("{} {}", drink.emoji, drink.name) }</span>
                <button type="button" onclick={on_minus} aria-label="-">{ "−" }</button>
                <span class="drink-count">{ count }</span>
                <button type="button" onclick={on_plus} aria-label="+">{ "+" }</button>
                <input type="text" inputmode="decimal" placeholder={t("drinks.price")}
                    value={price} onchange={on_price} />
            </li>
        }
    });

    let total = format_bill(drink_bill(&props.counts, &props.prices), props.fractional);

    html! {
        <section class="drink-panel">
            <h3>{ t("drinks.title") }</h3>
            <ul>{ for rows }</ul>
            <p class="drink-total">{ tr1("drinks.total", "amount", &total) }</p>
        </section>
    }
}
