use super::view_model::ProductDetailsViewModel;
use crate::shared::components::PageHeader;
use crate::shared::form::AddPage;
use crate::shared::page_frame::{PageCategory, PageFrame};
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use thaw::*;

/// `/products/new` and `/products/:id`
#[component]
pub fn ProductDetails() -> impl IntoView {
    let params = use_params_map();
    let id = Memo::new(move |_| params.with(|p| p.get("id")));
    let vm = ProductDetailsViewModel::new(id);
    let navigate = StoredValue::new_local(use_navigate());

    let back_to_list = Callback::new(move |_: ()| {
        navigate.with_value(|nav| nav("/products", Default::default()));
    });

    let subtitle = {
        let vm = vm.clone();
        Signal::derive(move || Some(if vm.is_edit_mode() { "Edit product" } else { "New product" }.to_string()))
    };
    let submit_text = if vm.is_edit_mode() { "Save changes" } else { "Create product" };

    view! {
        <PageFrame page_id="a002_product--detail" category=PageCategory::Detail>
            <PageHeader title="Product" subtitle=subtitle>
                {()}
            </PageHeader>

            {
                let vm = vm.clone();
                move || vm.error().map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })
            }

            <div class="page__content">
                {
                    let vm = vm.clone();
                    move || {
                        if vm.loading() {
                            return view! { <Spinner label="Loading product..." /> }.into_any();
                        }
                        let save_vm = vm.clone();
                        view! {
                            <AddPage
                                form=vm.form
                                on_submit=Callback::new(move |values| save_vm.save_command(values, back_to_list))
                                on_cancel=back_to_list
                                loading=vm.saving()
                                submit_button_text=submit_text.to_string()
                            />
                        }
                        .into_any()
                    }
                }
            </div>
        </PageFrame>
    }
}
