use crate::domain::a001_attribute::{AttributeDetails, AttributeList};
use crate::domain::a002_product::{ProductDetails, ProductList};
use crate::layout::Shell;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
fn NotFound() -> impl IntoView {
    view! { <div class="page__empty">"Page not found"</div> }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=NotFound>
                    <Route path=path!("/") view=|| view! { <Redirect path="/products" /> } />
                    <Route path=path!("/attributes") view=AttributeList />
                    <Route path=path!("/attributes/new") view=AttributeDetails />
                    <Route path=path!("/attributes/:id") view=AttributeDetails />
                    <Route path=path!("/products") view=ProductList />
                    <Route path=path!("/products/new") view=ProductDetails />
                    <Route path=path!("/products/:id") view=ProductDetails />
                </Routes>
            </Shell>
        </Router>
    }
}
