use leptos::prelude::*;
use web_sys::window;

use crate::pages::transactions::PageOptions;

/// Обновление остальных частей приложения после изменения данных
pub trait AppRefresh {
    /// Обновить всё: виджеты, формы и открытую страницу
    fn update(&self);

    /// Обновить виджет со списком счетов
    fn update_widgets(&self);

    /// Обновить формы создания дохода и расхода
    fn update_forms(&self);
}

/// Общий контекст приложения. Виджеты, формы и страницы подписываются
/// на свои счётчики и перезагружаются, когда счётчик меняется.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub widgets_version: RwSignal<u64>,
    pub forms_version: RwSignal<u64>,
    pub page_version: RwSignal<u64>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            widgets_version: RwSignal::new(0),
            forms_version: RwSignal::new(0),
            page_version: RwSignal::new(0),
        }
    }

    /// Параметры страницы из адресной строки
    pub fn page_options_from_location(&self) -> PageOptions {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        PageOptions::from_query(&search)
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

fn bump(version: RwSignal<u64>) {
    version.update(|v| *v = v.wrapping_add(1));
}

impl AppRefresh for AppGlobalContext {
    fn update(&self) {
        bump(self.widgets_version);
        bump(self.forms_version);
        bump(self.page_version);
    }

    fn update_widgets(&self) {
        bump(self.widgets_version);
    }

    fn update_forms(&self) {
        bump(self.forms_version);
    }
}
