//! DTO, которыми клиент обменивается с сервером учёта финансов.

pub mod domain;
pub mod shared;
