use super::combinations::VariantsValue;
use crate::shared::form::{preview_src, read_image_file, FieldDispatch};
use crate::shared::icons::icon;
use crate::shared::notify::{Notifier, ToastService};
use contracts::domain::a002_product::aggregate::{ProductCombinationDto, VariationDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use thaw::*;
use wasm_bindgen::JsCast;

fn parse_amount(raw: &str) -> f64 {
    raw.trim().replace(',', ".").parse().unwrap_or(0.0)
}

/// Editor of the product's variation dimensions and per-combination prices.
///
/// Rendered inside the product form; every edit goes back through `dispatch`.
#[component]
pub fn VariantMatrix(
    value: Signal<Value>,
    dispatch: FieldDispatch,
    /// Dimensions available in the catalogue
    #[prop(into)]
    catalogue: Signal<Vec<VariationDto>>,
) -> impl IntoView {
    let current = Memo::new(move |_| value.with(VariantsValue::from_value));
    let dispatch = StoredValue::new(dispatch);

    let edit = move |change: Box<dyn FnOnce(&mut VariantsValue)>| {
        let mut next = current.get_untracked();
        change(&mut next);
        dispatch.with_value(|d| d.set(next.to_value()));
    };

    let edit_row = move |index: usize, change: fn(&mut ProductCombinationDto, String), raw: String| {
        edit(Box::new(move |v: &mut VariantsValue| v.update_row(index, |row| change(row, raw))));
    };

    let toasts = expect_context::<ToastService>();
    let set_image = move |index: usize, image: Option<String>| {
        edit(Box::new(move |v: &mut VariantsValue| v.set_row_image(index, image)));
    };
    let pick_image = move |index: usize, ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        input.set_value("");
        spawn_local(async move {
            match read_image_file(file).await {
                Ok(data_url) => set_image(index, Some(data_url)),
                Err(e) => toasts.error(&e.to_string()),
            }
        });
    };

    let unpicked = move || {
        let picked = current.with(|v| {
            v.variations
                .iter()
                .map(|s| s.variation_id.clone())
                .collect::<Vec<_>>()
        });
        catalogue.with(|all| {
            all.iter()
                .filter(|d| !picked.contains(&d.id))
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    let picked_dimensions = move || {
        let picked = current.with(|v| v.variations.clone());
        catalogue.with(|all| {
            picked
                .into_iter()
                .filter_map(|s| all.iter().find(|d| d.id == s.variation_id).cloned())
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="variant-matrix">
            <div class="variant-matrix__picker">
                <select
                    class="form__select"
                    prop:value=""
                    on:change=move |ev| {
                        let id = event_target_value(&ev);
                        let found = catalogue.with_untracked(|all| all.iter().find(|d| d.id == id).cloned());
                        if let Some(dimension) = found {
                            edit(Box::new(move |v: &mut VariantsValue| v.pick_dimension(&dimension)));
                        }
                    }
                >
                    <option value="">"Add variation..."</option>
                    {move || unpicked().into_iter().map(|d| view! {
                        <option value=d.id.clone()>{d.name.clone()}</option>
                    }).collect_view()}
                </select>
            </div>

            <For
                each=picked_dimensions
                key=|d| d.id.clone()
                children=move |dimension: VariationDto| {
                    let dimension = StoredValue::new(dimension);
                    view! {
                        <div class="variant-matrix__dimension">
                            <div class="variant-matrix__dimension-header">
                                <strong>{dimension.with_value(|d| d.name.clone())}</strong>
                                <Button
                                    size=ButtonSize::Small
                                    appearance=ButtonAppearance::Subtle
                                    on_click=move |_| {
                                        let id = dimension.with_value(|d| d.id.clone());
                                        edit(Box::new(move |v: &mut VariantsValue| v.drop_dimension(&id)));
                                    }
                                >
                                    {icon("x")}
                                </Button>
                            </div>
                            <div class="variant-matrix__options">
                                {dimension.with_value(|d| d.options.clone()).into_iter().map(|option| {
                                    let option_id = option.id.clone();
                                    let option = StoredValue::new(option);
                                    view! {
                                        <label class="variant-matrix__option">
                                            <input
                                                type="checkbox"
                                                prop:checked=move || current.with(|v| {
                                                    v.variations.iter().any(|s| {
                                                        dimension.with_value(|d| s.variation_id == d.id)
                                                            && s.options.iter().any(|o| o.id == option_id)
                                                    })
                                                })
                                                on:change=move |ev| {
                                                    let chosen = event_target_checked(&ev);
                                                    let d = dimension.get_value();
                                                    let o = option.get_value();
                                                    edit(Box::new(move |v: &mut VariantsValue| v.toggle_option(&d, &o, chosen)));
                                                }
                                            />
                                            {option.with_value(|o| o.name.clone())}
                                        </label>
                                    }
                                }).collect_view()}
                            </div>
                        </div>
                    }
                }
            />

            <Show when=move || current.with(|v| !v.combinations.is_empty())>
                <table class="variant-matrix__table">
                    <thead>
                        <tr>
                            <th>"Combination"</th>
                            <th>"Price"</th>
                            <th>"Cost"</th>
                            <th>"Code"</th>
                            <th>"Starting quantity"</th>
                            <th>"Image"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || current.with(|v| {
                                v.combinations.iter().enumerate().map(|(i, c)| (i, c.name.clone())).collect::<Vec<_>>()
                            })
                            key=|row| row.clone()
                            children=move |(index, name)| {
                                let field = move |read: fn(&ProductCombinationDto) -> String| {
                                    move || current.with(|v| v.combinations.get(index).map(read).unwrap_or_default())
                                };
                                view! {
                                    <tr>
                                        <td>{name}</td>
                                        <td>
                                            <input
                                                type="number"
                                                step="any"
                                                class="form__input"
                                                prop:value=field(|c| c.price.to_string())
                                                on:change=move |ev| edit_row(index, |c, raw| c.price = parse_amount(&raw), event_target_value(&ev))
                                            />
                                        </td>
                                        <td>
                                            <input
                                                type="number"
                                                step="any"
                                                class="form__input"
                                                prop:value=field(|c| c.cost.to_string())
                                                on:change=move |ev| edit_row(index, |c, raw| c.cost = parse_amount(&raw), event_target_value(&ev))
                                            />
                                        </td>
                                        <td>
                                            <input
                                                type="text"
                                                class="form__input"
                                                prop:value=field(|c| c.code.clone())
                                                on:change=move |ev| edit_row(index, |c, raw| c.code = raw, event_target_value(&ev))
                                            />
                                        </td>
                                        <td>
                                            <input
                                                type="number"
                                                step="any"
                                                class="form__input"
                                                prop:value=field(|c| c.starting_quantity.to_string())
                                                on:change=move |ev| {
                                                    edit_row(index, |c, raw| c.starting_quantity = parse_amount(&raw), event_target_value(&ev))
                                                }
                                            />
                                        </td>
                                        <td class="variant-matrix__image">
                                            {move || {
                                                let src = current.with(|v| {
                                                    v.combinations.get(index).and_then(|c| c.image.clone())
                                                });
                                                src.filter(|s| !s.is_empty()).map(|src| view! {
                                                    <div class="form__image-preview">
                                                        <img src=preview_src(&src) alt="" />
                                                        <Button
                                                            size=ButtonSize::Small
                                                            appearance=ButtonAppearance::Subtle
                                                            on_click=move |_| set_image(index, None)
                                                        >
                                                            {icon("x")}
                                                        </Button>
                                                    </div>
                                                })
                                            }}
                                            <input
                                                type="file"
                                                accept="image/jpeg,image/png,image/gif,image/webp"
                                                on:change=move |ev| pick_image(index, ev)
                                            />
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.5"), 12.5);
        assert_eq!(parse_amount(" 3,25 "), 3.25);
        assert_eq!(parse_amount(""), 0.0);
    }
}
