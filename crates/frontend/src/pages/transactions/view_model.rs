use contracts::domain::a002_transaction::TransactionRecord;

use crate::shared::date_utils::format_date;
use crate::shared::locale::PageLocale;
use crate::shared::number_format::number_with_space;

/// Готовая к выводу строка списка
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    /// Уходит в `data-id` кнопки удаления
    pub id: String,
    pub css_class: String,
    pub title: String,
    pub date: String,
    pub sum: String,
    pub currency: String,
}

impl TransactionRow {
    pub fn from_record(record: &TransactionRecord, locale: PageLocale, currency: &str) -> Self {
        Self {
            id: record.id.to_string(),
            css_class: format!("transaction transaction_{} row", record.kind.as_str()),
            title: record.name.clone(),
            date: format_date(&record.created_at, locale),
            sum: number_with_space(record.sum),
            currency: currency.to_string(),
        }
    }
}
