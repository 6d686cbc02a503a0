use std::cell::RefCell;
use std::rc::Rc;

use contracts::domain::a001_account::{Account, AccountId};
use contracts::domain::a002_transaction::{TransactionId, TransactionRecord};

use crate::domain::a001_account::AccountService;
use crate::domain::a002_transaction::TransactionService;
use crate::layout::global_context::AppRefresh;
use crate::shared::api_utils::check_response;
use crate::shared::config::PageSettings;
use crate::shared::confirm::Confirm;
use crate::shared::error::ServiceError;
use crate::shared::list_utils::sort_list;
use crate::shared::locale::PageLocale;
use crate::shared::task::Spawner;

use super::state::{PageOptions, PageState, SortField};
use super::view::TransactionsView;
use super::view_model::TransactionRow;

/// Внешние зависимости контроллера
#[derive(Clone)]
pub struct Collaborators {
    pub accounts: Rc<dyn AccountService>,
    pub transactions: Rc<dyn TransactionService>,
    pub app: Rc<dyn AppRefresh>,
    pub confirm: Rc<dyn Confirm>,
    pub spawner: Spawner,
}

/// Контроллер страницы доходов и расходов счёта.
///
/// Хранит параметры последней отрисовки, по запросу заново загружает
/// название счёта и список транзакций и перерисовывает страницу.
/// Каждая отрисовка получает номер; ответы, пришедшие после следующей
/// отрисовки или очистки, отбрасываются.
#[derive(Clone)]
pub struct TransactionsPageController {
    inner: Rc<Inner>,
}

struct Inner {
    view: Option<Rc<dyn TransactionsView>>,
    deps: Collaborators,
    locale: PageLocale,
    currency: String,
    state: RefCell<PageState>,
}

impl TransactionsPageController {
    /// Без `view` контроллер только сообщает об ошибке и дальше ничего не делает
    pub fn new(
        view: Option<Rc<dyn TransactionsView>>,
        deps: Collaborators,
        settings: &PageSettings,
    ) -> Self {
        if view.is_none() {
            log::error!("Transactions page container does not exist, the page stays inert");
        }

        Self {
            inner: Rc::new(Inner {
                view,
                deps,
                locale: settings.locale,
                currency: settings.currency.clone(),
                state: RefCell::new(PageState::default()),
            }),
        }
    }

    pub fn is_inert(&self) -> bool {
        self.inner.view.is_none()
    }

    pub fn state(&self) -> PageState {
        self.inner.state.borrow().clone()
    }

    pub fn last_options(&self) -> Option<PageOptions> {
        self.inner.state.borrow().last_options.clone()
    }

    /// Очистить страницу, запомнить `options` и загрузить название счёта
    /// и список его транзакций. Оба запроса независимы и могут завершиться
    /// в любом порядке.
    pub fn render(&self, options: PageOptions) {
        let Some(view) = self.inner.view.clone() else {
            return;
        };
        let Some(account_id) = options.account_id() else {
            return;
        };

        self.reset(&*view);
        let generation = {
            let mut state = self.inner.state.borrow_mut();
            state.generation += 1;
            state.last_options = Some(options.clone());
            state.generation
        };

        let this = self.clone();
        let accounts = Rc::clone(&self.inner.deps.accounts);
        let id = account_id.clone();
        self.inner.deps.spawner.spawn(Box::pin(async move {
            let result = check_response(accounts.get(&id).await);
            this.apply_account(generation, &id, result);
        }));

        let this = self.clone();
        let transactions = Rc::clone(&self.inner.deps.transactions);
        self.inner.deps.spawner.spawn(Box::pin(async move {
            let result = check_response(transactions.list(&account_id, &options.extra).await);
            this.apply_transactions(generation, &account_id, result);
        }));
    }

    /// Повторить отрисовку с последними параметрами
    pub fn update(&self) {
        if let Some(options) = self.last_options() {
            self.render(options);
        }
    }

    /// Пустой список, заголовок-заглушка, страница в состоянии «пусто»
    pub fn clear(&self) {
        if let Some(view) = self.inner.view.clone() {
            self.reset(&*view);
        }
        let mut state = self.inner.state.borrow_mut();
        state.last_options = None;
        state.generation += 1;
    }

    pub fn remove_account(&self) {
        let Some(account_id) = self.last_options().and_then(|o| o.account_id()) else {
            return;
        };
        if !self
            .inner
            .deps
            .confirm
            .confirm(self.inner.locale.confirm_remove_account())
        {
            return;
        }

        let this = self.clone();
        let accounts = Rc::clone(&self.inner.deps.accounts);
        self.inner.deps.spawner.spawn(Box::pin(async move {
            match check_response(accounts.remove(&account_id).await) {
                Ok(_) => {
                    log::info!("Account {} removed", account_id);
                    let app = &this.inner.deps.app;
                    app.update_widgets();
                    app.update_forms();
                    // пользователь мог уже открыть другой счёт
                    let still_shown = this.last_options().and_then(|o| o.account_id())
                        == Some(account_id.clone());
                    if still_shown {
                        this.clear();
                    }
                }
                Err(e) => log::error!("Failed to remove account {}: {}", account_id, e),
            }
        }));
    }

    pub fn remove_transaction(&self, id: TransactionId) {
        if self.is_inert() {
            return;
        }
        if !self
            .inner
            .deps
            .confirm
            .confirm(self.inner.locale.confirm_remove_transaction())
        {
            return;
        }

        let this = self.clone();
        let transactions = Rc::clone(&self.inner.deps.transactions);
        self.inner.deps.spawner.spawn(Box::pin(async move {
            match check_response(transactions.remove(&id).await) {
                Ok(_) => {
                    log::info!("Transaction {} removed", id);
                    this.inner.deps.app.update();
                }
                Err(e) => log::error!("Failed to remove transaction {}: {}", id, e),
            }
        }));
    }

    /// Нажатие на кнопку сортировки: меняет направление, запоминает поле
    /// и заново загружает список
    pub fn toggle_sort(&self, field: SortField) {
        let Some(view) = self.inner.view.clone() else {
            return;
        };
        let ascending = {
            let mut state = self.inner.state.borrow_mut();
            if !state.is_loaded() {
                return;
            }
            state.sort_field = Some(field);
            state.sort_ascending = !state.sort_ascending;
            state.sort_ascending
        };

        self.update();
        view.mark_active_sort(field, ascending);
    }

    fn reset(&self, view: &dyn TransactionsView) {
        view.clear();
        view.set_title(self.inner.locale.title_placeholder());
    }

    fn is_current(&self, generation: u64) -> bool {
        self.inner.state.borrow().generation == generation
    }

    fn apply_account(
        &self,
        generation: u64,
        id: &AccountId,
        result: Result<Option<Account>, ServiceError>,
    ) {
        if !self.is_current(generation) {
            log::debug!("Discarding stale account {} response", id);
            return;
        }
        let Some(view) = self.inner.view.as_ref() else {
            return;
        };
        match result {
            Ok(Some(account)) => view.set_title(&account.name),
            Ok(None) => log::error!("Account {} response has no data", id),
            Err(e) => log::error!("Failed to load account {}: {}", id, e),
        }
    }

    fn apply_transactions(
        &self,
        generation: u64,
        id: &AccountId,
        result: Result<Option<Vec<TransactionRecord>>, ServiceError>,
    ) {
        if !self.is_current(generation) {
            log::debug!("Discarding stale transactions response for account {}", id);
            return;
        }
        let Some(view) = self.inner.view.as_ref() else {
            return;
        };
        match result {
            Ok(records) => {
                let mut records = records.unwrap_or_default();
                let (field, ascending) = {
                    let state = self.inner.state.borrow();
                    (state.sort_field, state.sort_ascending)
                };
                if let Some(field) = field {
                    sort_list(&mut records, field, ascending);
                }
                let rows = records
                    .iter()
                    .map(|r| TransactionRow::from_record(r, self.inner.locale, &self.inner.currency))
                    .collect();
                view.render_list(rows);
            }
            Err(e) => log::error!("Failed to load transactions of account {}: {}", id, e),
        }
    }
}
