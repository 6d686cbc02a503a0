/// Универсальные утилиты для работы со списками
use std::cmp::Ordering;

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    type Field: Copy;

    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: Self::Field) -> Ordering;
}

/// Сортирует список по указанному полю. Сортировка устойчивая:
/// равные элементы сохраняют порядок, пришедший с сервера
pub fn sort_list<T: Sortable>(items: &mut [T], field: T::Field, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}
