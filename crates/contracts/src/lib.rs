//! Общие типы реестра сотрудников: агрегаты, DTO, контракты дашбордов.
//!
//! Формат сериализации этих типов совпадает с тем, что хранится в blob store,
//! поэтому переименование полей здесь ломает совместимость с сохранёнными данными.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
pub mod usecases;
