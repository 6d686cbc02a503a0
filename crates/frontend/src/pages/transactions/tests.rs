use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use contracts::domain::a001_account::{Account, AccountId};
use contracts::domain::a002_transaction::{TransactionId, TransactionRecord, TransactionType};
use contracts::shared::ApiResponse;
use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use serde_json::Value;

use super::*;
use crate::domain::a001_account::AccountService;
use crate::domain::a002_transaction::TransactionService;
use crate::layout::global_context::AppRefresh;
use crate::shared::config::PageSettings;
use crate::shared::confirm::Confirm;
use crate::shared::error::RequestError;
use crate::shared::task::Spawner;

// ----------------------------------------------------------------------------
// Fakes
// ----------------------------------------------------------------------------

/// Each call parks until the test resolves it, oldest call first
struct Gate<T> {
    pending: RefCell<VecDeque<oneshot::Sender<T>>>,
    calls: RefCell<Vec<String>>,
}

impl<T> Default for Gate<T> {
    fn default() -> Self {
        Self {
            pending: RefCell::new(VecDeque::new()),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl<T> Gate<T> {
    async fn wait(&self, call: String) -> T {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push_back(tx);
        self.calls.borrow_mut().push(call);
        rx.await.expect("gate sender dropped")
    }

    fn resolve(&self, value: T) {
        let tx = self
            .pending
            .borrow_mut()
            .pop_front()
            .expect("no pending call to resolve");
        assert!(tx.send(value).is_ok(), "caller went away");
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

type Reply<T> = Result<ApiResponse<T>, RequestError>;

#[derive(Default)]
struct FakeAccounts {
    get: Gate<Reply<Account>>,
    remove: Gate<Reply<Value>>,
}

#[async_trait(?Send)]
impl AccountService for FakeAccounts {
    async fn get(&self, id: &AccountId) -> Reply<Account> {
        self.get.wait(id.to_string()).await
    }

    async fn remove(&self, id: &AccountId) -> Reply<Value> {
        self.remove.wait(id.to_string()).await
    }
}

#[derive(Default)]
struct FakeTransactions {
    list: Gate<Reply<Vec<TransactionRecord>>>,
    remove: Gate<Reply<Value>>,
}

#[async_trait(?Send)]
impl TransactionService for FakeTransactions {
    async fn list(
        &self,
        account_id: &AccountId,
        filters: &BTreeMap<String, String>,
    ) -> Reply<Vec<TransactionRecord>> {
        let call = filters
            .iter()
            .fold(account_id.to_string(), |acc, (k, v)| format!("{acc}&{k}={v}"));
        self.list.wait(call).await
    }

    async fn remove(&self, id: &TransactionId) -> Reply<Value> {
        self.remove.wait(id.to_string()).await
    }
}

#[derive(Default)]
struct FakeApp {
    updates: Cell<u32>,
    widgets: Cell<u32>,
    forms: Cell<u32>,
}

impl AppRefresh for FakeApp {
    fn update(&self) {
        self.updates.set(self.updates.get() + 1);
    }

    fn update_widgets(&self) {
        self.widgets.set(self.widgets.get() + 1);
    }

    fn update_forms(&self) {
        self.forms.set(self.forms.get() + 1);
    }
}

struct FakeConfirm {
    answer: Cell<bool>,
    asked: RefCell<Vec<String>>,
}

impl Confirm for FakeConfirm {
    fn confirm(&self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        self.answer.get()
    }
}

#[derive(Default)]
struct RecordingView {
    title: RefCell<String>,
    rows: RefCell<Vec<TransactionRow>>,
    list_renders: Cell<u32>,
    clears: Cell<u32>,
    active_sort: Cell<Option<(SortField, bool)>>,
}

impl RecordingView {
    fn title(&self) -> String {
        self.title.borrow().clone()
    }

    fn titles(&self) -> Vec<String> {
        self.rows.borrow().iter().map(|r| r.title.clone()).collect()
    }

    fn sums(&self) -> Vec<String> {
        self.rows.borrow().iter().map(|r| r.sum.clone()).collect()
    }
}

impl TransactionsView for RecordingView {
    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
    }

    fn render_list(&self, rows: Vec<TransactionRow>) {
        self.list_renders.set(self.list_renders.get() + 1);
        *self.rows.borrow_mut() = rows;
    }

    fn clear(&self) {
        self.clears.set(self.clears.get() + 1);
        self.rows.borrow_mut().clear();
    }

    fn mark_active_sort(&self, field: SortField, ascending: bool) {
        self.active_sort.set(Some((field, ascending)));
    }
}

// ----------------------------------------------------------------------------
// Harness
// ----------------------------------------------------------------------------

const PLACEHOLDER: &str = "Account name";

struct Harness {
    pool: LocalPool,
    view: Rc<RecordingView>,
    accounts: Rc<FakeAccounts>,
    transactions: Rc<FakeTransactions>,
    app: Rc<FakeApp>,
    confirm: Rc<FakeConfirm>,
    controller: TransactionsPageController,
}

impl Harness {
    fn new() -> Self {
        Self::build(true)
    }

    fn inert() -> Self {
        Self::build(false)
    }

    fn build(with_view: bool) -> Self {
        let pool = LocalPool::new();
        let local = pool.spawner();
        let spawner = Spawner::new(move |fut| {
            local.spawn_local(fut).expect("spawn on test pool");
        });

        let view = Rc::new(RecordingView::default());
        let accounts = Rc::new(FakeAccounts::default());
        let transactions = Rc::new(FakeTransactions::default());
        let app = Rc::new(FakeApp::default());
        let confirm = Rc::new(FakeConfirm {
            answer: Cell::new(true),
            asked: RefCell::new(Vec::new()),
        });

        let deps = Collaborators {
            accounts: accounts.clone(),
            transactions: transactions.clone(),
            app: app.clone(),
            confirm: confirm.clone(),
            spawner,
        };
        let page_view: Option<Rc<dyn TransactionsView>> = if with_view {
            Some(view.clone() as Rc<dyn TransactionsView>)
        } else {
            None
        };
        let controller = TransactionsPageController::new(page_view, deps, &PageSettings::default());

        Self {
            pool,
            view,
            accounts,
            transactions,
            app,
            confirm,
            controller,
        }
    }

    fn run(&mut self) {
        self.pool.run_until_stalled();
    }

    /// render + both responses, title first
    fn load(&mut self, account_id: &str, records: Vec<TransactionRecord>) {
        self.controller.render(PageOptions::for_account(account_id));
        self.run();
        self.accounts.get.resolve(Ok(ApiResponse::ok(account(account_id, "Основной"))));
        self.transactions.list.resolve(Ok(ApiResponse::ok(records)));
        self.run();
    }
}

fn account(id: &str, name: &str) -> Account {
    Account {
        id: AccountId::new(id),
        name: name.to_string(),
        sum: None,
    }
}

fn record(id: &str, kind: TransactionType, name: &str, sum: f64, created_at: &str) -> TransactionRecord {
    TransactionRecord {
        id: TransactionId::new(id),
        kind,
        name: name.to_string(),
        sum,
        created_at: created_at.to_string(),
        account_id: None,
    }
}

fn sample_records() -> Vec<TransactionRecord> {
    vec![
        record("1", TransactionType::Income, "Зарплата", 300.0, "2019-03-12 10:00:00"),
        record("2", TransactionType::Expense, "Кофе", 100.0, "2019-03-10 03:20:41"),
        record("3", TransactionType::Expense, "Такси", 200.0, "2019-03-11 18:45:00"),
    ]
}

// ----------------------------------------------------------------------------
// render / update / clear
// ----------------------------------------------------------------------------

#[test]
fn render_without_account_is_noop() {
    let mut h = Harness::new();
    h.controller.render(PageOptions::default());
    h.controller.render(PageOptions::for_account(""));
    h.run();

    assert_eq!(h.view.clears.get(), 0);
    assert_eq!(h.view.title(), "");
    assert!(h.controller.last_options().is_none());
    assert!(h.accounts.get.calls().is_empty());
    assert!(h.transactions.list.calls().is_empty());
}

#[test]
fn render_clears_and_records_options() {
    let mut h = Harness::new();
    let mut options = PageOptions::for_account("5");
    options.extra.insert("type".to_string(), "income".to_string());
    h.controller.render(options.clone());
    h.run();

    assert_eq!(h.view.clears.get(), 1);
    assert_eq!(h.view.title(), PLACEHOLDER);
    assert_eq!(h.controller.last_options(), Some(options));
    assert_eq!(h.accounts.get.calls(), vec!["5"]);
    assert_eq!(h.transactions.list.calls(), vec!["5&type=income"]);
}

#[test]
fn title_then_list() {
    let mut h = Harness::new();
    h.controller.render(PageOptions::for_account("5"));
    h.run();

    h.accounts.get.resolve(Ok(ApiResponse::ok(account("5", "Кошелёк"))));
    h.run();
    assert_eq!(h.view.title(), "Кошелёк");
    assert_eq!(h.view.list_renders.get(), 0);

    h.transactions.list.resolve(Ok(ApiResponse::ok(sample_records())));
    h.run();
    assert_eq!(h.view.title(), "Кошелёк");
    assert_eq!(h.view.list_renders.get(), 1);
    assert_eq!(h.view.titles(), vec!["Зарплата", "Кофе", "Такси"]);
}

#[test]
fn list_then_title() {
    let mut h = Harness::new();
    h.controller.render(PageOptions::for_account("5"));
    h.run();

    h.transactions.list.resolve(Ok(ApiResponse::ok(sample_records())));
    h.run();
    assert_eq!(h.view.title(), PLACEHOLDER);
    assert_eq!(h.view.titles(), vec!["Зарплата", "Кофе", "Такси"]);

    h.accounts.get.resolve(Ok(ApiResponse::ok(account("5", "Кошелёк"))));
    h.run();
    assert_eq!(h.view.title(), "Кошелёк");
    assert_eq!(h.view.list_renders.get(), 1);
    assert_eq!(h.view.rows.borrow().len(), 3);
}

#[test]
fn failed_fetches_keep_options() {
    let mut h = Harness::new();
    h.controller.render(PageOptions::for_account("5"));
    h.run();

    h.accounts.get.resolve(Err(RequestError::Status(500)));
    h.transactions.list.resolve(Ok(ApiResponse::failed("нет такого счёта")));
    h.run();

    assert_eq!(h.view.title(), PLACEHOLDER);
    assert_eq!(h.view.list_renders.get(), 0);
    assert!(h.controller.state().is_loaded());
}

#[test]
fn success_without_list_renders_empty() {
    let mut h = Harness::new();
    h.controller.render(PageOptions::for_account("5"));
    h.run();
    h.transactions.list.resolve(Ok(ApiResponse {
        success: true,
        data: None,
        error: None,
    }));
    h.run();

    assert_eq!(h.view.list_renders.get(), 1);
    assert!(h.view.rows.borrow().is_empty());
}

#[test]
fn stale_responses_are_discarded() {
    let mut h = Harness::new();
    h.controller.render(PageOptions::for_account("1"));
    h.run();
    h.controller.render(PageOptions::for_account("2"));
    h.run();

    // ответы первой отрисовки приходят уже после начала второй
    h.accounts.get.resolve(Ok(ApiResponse::ok(account("1", "Старый"))));
    h.transactions.list.resolve(Ok(ApiResponse::ok(sample_records())));
    h.run();
    assert_eq!(h.view.title(), PLACEHOLDER);
    assert_eq!(h.view.list_renders.get(), 0);

    h.accounts.get.resolve(Ok(ApiResponse::ok(account("2", "Новый"))));
    h.transactions.list.resolve(Ok(ApiResponse::ok(vec![])));
    h.run();
    assert_eq!(h.view.title(), "Новый");
    assert_eq!(h.view.list_renders.get(), 1);
}

#[test]
fn update_rerenders_only_when_loaded() {
    let mut h = Harness::new();
    h.controller.update();
    h.run();
    assert!(h.accounts.get.calls().is_empty());

    h.load("5", sample_records());
    h.controller.update();
    h.run();
    assert_eq!(h.accounts.get.calls(), vec!["5", "5"]);
    assert_eq!(h.transactions.list.calls(), vec!["5", "5"]);
}

#[test]
fn clear_resets_page() {
    let mut h = Harness::new();
    h.load("5", sample_records());
    assert_eq!(h.view.rows.borrow().len(), 3);

    h.controller.clear();
    assert!(h.view.rows.borrow().is_empty());
    assert_eq!(h.view.title(), PLACEHOLDER);
    assert!(!h.controller.state().is_loaded());
}

#[test]
fn clear_discards_in_flight_responses() {
    let mut h = Harness::new();
    h.controller.render(PageOptions::for_account("5"));
    h.run();
    h.controller.clear();

    h.accounts.get.resolve(Ok(ApiResponse::ok(account("5", "Кошелёк"))));
    h.transactions.list.resolve(Ok(ApiResponse::ok(sample_records())));
    h.run();
    assert_eq!(h.view.title(), PLACEHOLDER);
    assert!(h.view.rows.borrow().is_empty());
}

// ----------------------------------------------------------------------------
// sorting
// ----------------------------------------------------------------------------

#[test]
fn toggle_sort_on_empty_page_is_noop() {
    let mut h = Harness::new();
    h.controller.toggle_sort(SortField::Sum);
    h.run();

    assert!(h.transactions.list.calls().is_empty());
    assert_eq!(h.view.active_sort.get(), None);
    assert_eq!(h.controller.state().sort_field, None);
}

#[test]
fn sum_sort_toggles_direction() {
    let mut h = Harness::new();
    h.load("5", sample_records());
    assert_eq!(h.view.sums(), vec!["300", "100", "200"]);

    h.controller.toggle_sort(SortField::Sum);
    h.run();
    assert_eq!(h.view.active_sort.get(), Some((SortField::Sum, true)));
    h.accounts.get.resolve(Ok(ApiResponse::ok(account("5", "Основной"))));
    h.transactions.list.resolve(Ok(ApiResponse::ok(sample_records())));
    h.run();
    assert_eq!(h.view.sums(), vec!["100", "200", "300"]);

    h.controller.toggle_sort(SortField::Sum);
    h.run();
    assert_eq!(h.view.active_sort.get(), Some((SortField::Sum, false)));
    h.accounts.get.resolve(Ok(ApiResponse::ok(account("5", "Основной"))));
    h.transactions.list.resolve(Ok(ApiResponse::ok(sample_records())));
    h.run();
    assert_eq!(h.view.sums(), vec!["300", "200", "100"]);
    assert_eq!(h.transactions.list.calls().len(), 3);
}

#[test]
fn date_and_type_sorting() {
    let mut h = Harness::new();
    h.load("5", sample_records());

    h.controller.toggle_sort(SortField::CreatedAt);
    h.run();
    h.accounts.get.resolve(Ok(ApiResponse::ok(account("5", "Основной"))));
    h.transactions.list.resolve(Ok(ApiResponse::ok(sample_records())));
    h.run();
    assert_eq!(h.view.titles(), vec!["Кофе", "Такси", "Зарплата"]);

    // направление общее для всех кнопок: следующее нажатие даёт убывание
    h.controller.toggle_sort(SortField::Type);
    h.run();
    h.accounts.get.resolve(Ok(ApiResponse::ok(account("5", "Основной"))));
    h.transactions.list.resolve(Ok(ApiResponse::ok(sample_records())));
    h.run();
    assert_eq!(h.view.active_sort.get(), Some((SortField::Type, false)));
    assert_eq!(h.view.titles(), vec!["Зарплата", "Кофе", "Такси"]);
}

// ----------------------------------------------------------------------------
// removal
// ----------------------------------------------------------------------------

#[test]
fn remove_transaction_declined() {
    let mut h = Harness::new();
    h.load("5", sample_records());
    h.confirm.answer.set(false);

    h.controller.remove_transaction(TransactionId::new("2"));
    h.run();

    assert_eq!(h.confirm.asked.borrow().len(), 1);
    assert!(h.transactions.remove.calls().is_empty());
    assert_eq!(h.app.updates.get(), 0);
    assert_eq!(h.view.rows.borrow().len(), 3);
}

#[test]
fn remove_transaction_success_refreshes_app_once() {
    let mut h = Harness::new();
    h.load("5", sample_records());

    h.controller.remove_transaction(TransactionId::new("2"));
    h.run();
    assert_eq!(h.transactions.remove.calls(), vec!["2"]);
    h.transactions.remove.resolve(Ok(ApiResponse::ok(Value::Null)));
    h.run();

    assert_eq!(h.app.updates.get(), 1);
    assert_eq!(h.app.widgets.get(), 0);
}

#[test]
fn remove_transaction_failure_only_logs() {
    let mut h = Harness::new();
    h.load("5", sample_records());

    h.controller.remove_transaction(TransactionId::new("2"));
    h.run();
    h.transactions.remove.resolve(Ok(ApiResponse::failed("нельзя")));
    h.run();

    assert_eq!(h.app.updates.get(), 0);
    assert!(h.controller.state().is_loaded());
}

#[test]
fn remove_account_on_empty_page_is_noop() {
    let mut h = Harness::new();
    h.controller.remove_account();
    h.run();

    assert!(h.confirm.asked.borrow().is_empty());
    assert!(h.accounts.remove.calls().is_empty());
}

#[test]
fn remove_account_success() {
    let mut h = Harness::new();
    h.load("5", sample_records());
    let clears_before = h.view.clears.get();

    h.controller.remove_account();
    h.run();
    assert_eq!(h.accounts.remove.calls(), vec!["5"]);
    h.accounts.remove.resolve(Ok(ApiResponse::ok(Value::Null)));
    h.run();

    assert_eq!(h.app.widgets.get(), 1);
    assert_eq!(h.app.forms.get(), 1);
    assert_eq!(h.app.updates.get(), 0);
    assert_eq!(h.view.clears.get(), clears_before + 1);
    assert_eq!(h.view.title(), PLACEHOLDER);
    assert!(!h.controller.state().is_loaded());
}

#[test]
fn remove_account_after_switching_keeps_new_page() {
    let mut h = Harness::new();
    h.load("1", sample_records());

    h.controller.remove_account();
    h.run();
    assert_eq!(h.accounts.remove.calls(), vec!["1"]);

    h.controller.render(PageOptions::for_account("2"));
    h.run();
    h.accounts.get.resolve(Ok(ApiResponse::ok(account("2", "Второй"))));
    h.transactions.list.resolve(Ok(ApiResponse::ok(sample_records())));
    h.run();
    let clears_before = h.view.clears.get();

    h.accounts.remove.resolve(Ok(ApiResponse::ok(Value::Null)));
    h.run();

    assert_eq!(h.app.widgets.get(), 1);
    assert_eq!(h.app.forms.get(), 1);
    assert_eq!(h.view.clears.get(), clears_before);
    assert_eq!(h.view.title(), "Второй");
    assert_eq!(h.view.titles().len(), 3);
    assert_eq!(
        h.controller.last_options().and_then(|o| o.account_id()),
        Some(AccountId::new("2"))
    );
}

#[test]
fn remove_account_failure_keeps_page() {
    let mut h = Harness::new();
    h.load("5", sample_records());

    h.controller.remove_account();
    h.run();
    h.accounts.remove.resolve(Err(RequestError::Status(403)));
    h.run();

    assert_eq!(h.app.widgets.get(), 0);
    assert_eq!(h.app.forms.get(), 0);
    assert_eq!(h.view.title(), "Основной");
    assert!(h.controller.state().is_loaded());
}

#[test]
fn remove_account_declined() {
    let mut h = Harness::new();
    h.load("5", sample_records());
    h.confirm.answer.set(false);

    h.controller.remove_account();
    h.run();

    assert_eq!(h.confirm.asked.borrow().len(), 1);
    assert!(h.accounts.remove.calls().is_empty());
}

// ----------------------------------------------------------------------------
// degraded mode
// ----------------------------------------------------------------------------

#[test]
fn inert_controller_ignores_everything() {
    let mut h = Harness::inert();
    assert!(h.controller.is_inert());

    h.controller.render(PageOptions::for_account("5"));
    h.controller.toggle_sort(SortField::Sum);
    h.controller.remove_account();
    h.controller.remove_transaction(TransactionId::new("1"));
    h.controller.clear();
    h.run();

    assert!(h.accounts.get.calls().is_empty());
    assert!(h.transactions.list.calls().is_empty());
    assert!(h.confirm.asked.borrow().is_empty());
    assert!(h.controller.last_options().is_none());
}
