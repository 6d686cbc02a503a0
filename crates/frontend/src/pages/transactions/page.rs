use std::rc::Rc;

use contracts::domain::a002_transaction::TransactionId;
use leptos::prelude::*;

use crate::domain::a001_account::HttpAccountService;
use crate::domain::a002_transaction::HttpTransactionService;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::config::PageConfig;
use crate::shared::confirm::BrowserConfirm;
use crate::shared::locale::PageLocale;
use crate::shared::task::Spawner;

use super::controller::{Collaborators, TransactionsPageController};
use super::state::{PageOptions, SortField};
use super::view::TransactionsView;
use super::view_model::TransactionRow;

/// Реализация [`TransactionsView`] на сигналах Leptos
#[derive(Clone, Copy)]
pub struct SignalView {
    pub title: RwSignal<String>,
    pub rows: RwSignal<Vec<TransactionRow>>,
    pub active_sort: RwSignal<Option<(SortField, bool)>>,
}

impl SignalView {
    pub fn new(locale: PageLocale) -> Self {
        Self {
            title: RwSignal::new(locale.title_placeholder().to_string()),
            rows: RwSignal::new(Vec::new()),
            active_sort: RwSignal::new(None),
        }
    }
}

impl TransactionsView for SignalView {
    fn set_title(&self, title: &str) {
        self.title.set(title.to_string());
    }

    fn render_list(&self, rows: Vec<TransactionRow>) {
        self.rows.set(rows);
    }

    fn clear(&self) {
        self.rows.set(Vec::new());
    }

    fn mark_active_sort(&self, field: SortField, ascending: bool) {
        self.active_sort.set(Some((field, ascending)));
    }
}

#[component]
#[allow(non_snake_case)]
pub fn TransactionsPage(
    config: PageConfig,
    ctx: AppGlobalContext,
    options: PageOptions,
) -> impl IntoView {
    let locale = config.page.locale;
    let view_state = SignalView::new(locale);
    let base_url = config.api_base_url();

    let deps = Collaborators {
        accounts: Rc::new(HttpAccountService::new(base_url.clone())),
        transactions: Rc::new(HttpTransactionService::new(base_url)),
        app: Rc::new(ctx),
        confirm: Rc::new(BrowserConfirm),
        spawner: Spawner::local(),
    };
    let controller = StoredValue::new_local(TransactionsPageController::new(
        Some(Rc::new(view_state) as Rc<dyn TransactionsView>),
        deps,
        &config.page,
    ));

    controller.with_value(|c| c.render(options));

    // App.update(): перерисовать страницу с последними параметрами
    Effect::new(move |prev: Option<u64>| {
        let version = ctx.page_version.get();
        if prev.is_some() {
            controller.with_value(|c| c.update());
        }
        version
    });

    let sort_class = move |field: SortField| {
        let active = view_state
            .active_sort
            .with(|a| matches!(a, Some((f, _)) if *f == field));
        if active {
            format!("btn btn-link {} sort-color", field.control_class())
        } else {
            format!("btn btn-link {}", field.control_class())
        }
    };

    let icon_class = move |field: SortField| match view_state.active_sort.get() {
        Some((f, false)) if f == field => "fa fa-sort-amount-desc",
        _ => "fa fa-sort-amount-asc",
    };

    let type_label = move || {
        let ascending = matches!(
            view_state.active_sort.get(),
            Some((SortField::Type, true))
        );
        locale.type_sort_label(ascending)
    };

    let on_remove = Callback::new(move |id: String| {
        controller.with_value(|c| c.remove_transaction(TransactionId::new(id)));
    });

    view! {
        <section class="transactions-page">
            <div class="content-header">
                <h1 class="content-title">{move || view_state.title.get()}</h1>
                <button
                    class="btn btn-danger remove-account"
                    on:click=move |_| controller.with_value(|c| c.remove_account())
                >
                    <span class="fa fa-trash"></span>
                    " "
                    {locale.remove_account_label()}
                </button>
            </div>

            <div class="sort">
                <button
                    class=move || sort_class(SortField::Sum)
                    on:click=move |_| controller.with_value(|c| c.toggle_sort(SortField::Sum))
                >
                    <i class=move || icon_class(SortField::Sum)></i>
                    " "
                    {locale.sum_sort_label()}
                </button>
                <button
                    class=move || sort_class(SortField::CreatedAt)
                    on:click=move |_| controller.with_value(|c| c.toggle_sort(SortField::CreatedAt))
                >
                    <i class=move || icon_class(SortField::CreatedAt)></i>
                    " "
                    {locale.date_sort_label()}
                </button>
                <button
                    class=move || sort_class(SortField::Type)
                    on:click=move |_| controller.with_value(|c| c.toggle_sort(SortField::Type))
                >
                    {type_label}
                </button>
            </div>

            <div class="content">
                <For
                    each=move || view_state.rows.get()
                    key=|row| row.id.clone()
                    children=move |row| view! { <TransactionItem row=row on_remove=on_remove /> }
                />
            </div>
        </section>
    }
}

#[component]
#[allow(non_snake_case)]
fn TransactionItem(row: TransactionRow, on_remove: Callback<String>) -> impl IntoView {
    let data_id = row.id.clone();
    let id = row.id;

    view! {
        <div class=row.css_class>
            <div class="col-md-7 transaction__details">
                <div class="transaction__icon">
                    <span class="fa fa-money fa-2x"></span>
                </div>
                <div class="transaction__info">
                    <h4 class="transaction__title">{row.title}</h4>
                    <div class="transaction__date">{row.date}</div>
                </div>
            </div>
            <div class="col-md-3">
                <div class="transaction__summ">
                    {row.sum}
                    <span class="currency">" " {row.currency}</span>
                </div>
            </div>
            <div class="col-md-2 transaction__controls">
                <button
                    class="btn btn-danger transaction__remove"
                    data-id=data_id
                    on:click=move |_| on_remove.run(id.clone())
                >
                    <i class="fa fa-trash"></i>
                </button>
            </div>
        </div>
    }
}
