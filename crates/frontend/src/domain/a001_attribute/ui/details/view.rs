use super::view_model::AttributeDetailsViewModel;
use crate::shared::components::PageHeader;
use crate::shared::form::AddPage;
use crate::shared::page_frame::{PageCategory, PageFrame};
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use thaw::*;

#[component]
pub fn AttributeDetails() -> impl IntoView {
    let params = use_params_map();
    let id = Memo::new(move |_| params.with(|p| p.get("id")));
    let vm = AttributeDetailsViewModel::new(id);
    let navigate = StoredValue::new_local(use_navigate());

    let back_to_list = Callback::new(move |_: ()| {
        navigate.with_value(|nav| nav("/attributes", Default::default()));
    });
    let title = if vm.is_edit_mode() { "Edit attribute" } else { "New attribute" };

    view! {
        <PageFrame page_id="a001_attribute--detail" category=PageCategory::Detail>
            <PageHeader title=title>
                {()}
            </PageHeader>

            {
                let attribute = vm.attribute.clone();
                move || attribute.error().map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })
            }

            <div class="page__content">
                {
                    let vm = vm.clone();
                    move || {
                        if vm.attribute.loading() {
                            return view! { <Spinner label="Loading attribute..." /> }.into_any();
                        }
                        let save_vm = vm.clone();
                        view! {
                            <AddPage
                                form=vm.form
                                on_submit=Callback::new(move |values| save_vm.save_command(values, back_to_list))
                                on_cancel=back_to_list
                                loading=vm.saving()
                            />
                        }
                        .into_any()
                    }
                }
            </div>
        </PageFrame>
    }
}
