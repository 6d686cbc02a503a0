use super::state::SortField;
use super::view_model::TransactionRow;

/// Что контроллер умеет делать с разметкой страницы.
///
/// Реализация в браузере — [`super::page::SignalView`]
pub trait TransactionsView {
    /// Текст элемента `.content-title`
    fn set_title(&self, title: &str);

    /// Показать записи в переданном порядке вместо текущего списка
    fn render_list(&self, rows: Vec<TransactionRow>);

    /// Убрать все записи из `.content`
    fn clear(&self);

    /// Подсветить нажатую кнопку сортировки
    fn mark_active_sort(&self, field: SortField, ascending: bool);
}
