use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use contracts::domain::a001_account::AccountId;
use contracts::domain::a002_transaction::TransactionRecord;

use crate::shared::date_utils::parse_timestamp;
use crate::shared::list_utils::Sortable;

/// Параметры, с которыми страница отрисована в последний раз
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOptions {
    pub account_id: Option<String>,
    /// Остальные параметры передаются в запрос списка без изменений
    pub extra: BTreeMap<String, String>,
}

impl PageOptions {
    pub fn for_account(account_id: impl Into<String>) -> Self {
        Self {
            account_id: Some(account_id.into()),
            extra: BTreeMap::new(),
        }
    }

    /// `None`, если счёт не указан или указан пустой строкой
    pub fn account_id(&self) -> Option<AccountId> {
        self.account_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(AccountId::new)
    }

    /// Разбор `location.search`: `?account_id=5&type=income`
    pub fn from_query(search: &str) -> Self {
        let mut params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        let account_id = params.remove("account_id");
        Self {
            account_id,
            extra: params.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Sum,
    CreatedAt,
    Type,
}

impl SortField {
    /// Класс кнопки сортировки в разметке
    pub fn control_class(&self) -> &'static str {
        match self {
            SortField::Sum => "sum",
            SortField::CreatedAt => "date",
            SortField::Type => "transactions",
        }
    }

    pub fn from_control_class(class: &str) -> Option<Self> {
        match class {
            "sum" => Some(SortField::Sum),
            "date" => Some(SortField::CreatedAt),
            "transactions" => Some(SortField::Type),
            _ => None,
        }
    }
}

impl Sortable for TransactionRecord {
    type Field = SortField;

    fn compare_by_field(&self, other: &Self, field: SortField) -> Ordering {
        match field {
            SortField::Sum => self.sum.total_cmp(&other.sum),
            SortField::CreatedAt => {
                match (parse_timestamp(&self.created_at), parse_timestamp(&other.created_at)) {
                    (Some(a), Some(b)) => a.cmp(&b),
                    // нераспознанные даты всегда после распознанных
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => self.created_at.cmp(&other.created_at),
                }
            }
            SortField::Type => self.kind.as_str().cmp(other.kind.as_str()),
        }
    }
}

/// Состояние страницы. Меняется только методами контроллера
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    /// `None` — страница пуста (не отрисована или очищена)
    pub last_options: Option<PageOptions>,
    /// Направление сортировки; первое нажатие на кнопку даёт возрастание
    pub sort_ascending: bool,
    /// Пока поле не выбрано, список показывается в порядке сервера
    pub sort_field: Option<SortField>,
    /// Номер цикла отрисовки; ответы прежних циклов отбрасываются
    pub generation: u64,
}

impl PageState {
    pub fn is_loaded(&self) -> bool {
        self.last_options.is_some()
    }
}
