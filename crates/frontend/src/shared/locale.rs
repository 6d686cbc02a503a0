//! Языковые настройки страницы: названия месяцев, подписи и тексты подтверждений.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLocale {
    #[default]
    En,
    Ru,
}

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

// Родительный падеж: «10 марта»
const MONTHS_RU: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня", "июля", "августа", "сентября",
    "октября", "ноября", "декабря",
];

impl PageLocale {
    /// Название месяца для даты вида «день месяц год»; `month` от 1 до 12
    pub fn month_name(&self, month: u32) -> &'static str {
        let idx = (month.clamp(1, 12) - 1) as usize;
        match self {
            PageLocale::En => MONTHS_EN[idx],
            PageLocale::Ru => MONTHS_RU[idx],
        }
    }

    pub fn year_suffix(&self) -> &'static str {
        match self {
            PageLocale::En => "",
            PageLocale::Ru => " г.",
        }
    }

    pub fn at(&self) -> &'static str {
        match self {
            PageLocale::En => "at",
            PageLocale::Ru => "в",
        }
    }

    /// Заголовок страницы, пока счёт не выбран
    pub fn title_placeholder(&self) -> &'static str {
        match self {
            PageLocale::En => "Account name",
            PageLocale::Ru => "Название счёта",
        }
    }

    pub fn confirm_remove_account(&self) -> &'static str {
        match self {
            PageLocale::En => "Do you really want to delete this account?",
            PageLocale::Ru => "Вы действительно хотите удалить счёт?",
        }
    }

    pub fn confirm_remove_transaction(&self) -> &'static str {
        match self {
            PageLocale::En => "Do you really want to delete this transaction?",
            PageLocale::Ru => "Вы действительно хотите удалить эту транзакцию?",
        }
    }

    /// Подпись кнопки сортировки по типу; меняется вместе с направлением
    pub fn type_sort_label(&self, ascending: bool) -> &'static str {
        match (self, ascending) {
            (PageLocale::En, true) => "by expense/income",
            (PageLocale::En, false) => "by income/expense",
            (PageLocale::Ru, true) => "по расходу/доходу",
            (PageLocale::Ru, false) => "по доходу/расходу",
        }
    }

    pub fn sum_sort_label(&self) -> &'static str {
        match self {
            PageLocale::En => "by sum",
            PageLocale::Ru => "по сумме",
        }
    }

    pub fn date_sort_label(&self) -> &'static str {
        match self {
            PageLocale::En => "by date",
            PageLocale::Ru => "по дате",
        }
    }

    pub fn remove_account_label(&self) -> &'static str {
        match self {
            PageLocale::En => "Delete account",
            PageLocale::Ru => "Удалить счёт",
        }
    }
}
