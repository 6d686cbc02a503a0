use crate::layout::global_context::AppGlobalContext;
use crate::pages::transactions::TransactionsPage;
use crate::shared::config::PageConfig;
use leptos::prelude::*;

#[component]
pub fn App(config: PageConfig) -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    let ctx = AppGlobalContext::new();
    provide_context(ctx);

    let options = ctx.page_options_from_location();

    view! {
        <TransactionsPage config=config ctx=ctx options=options />
    }
}
