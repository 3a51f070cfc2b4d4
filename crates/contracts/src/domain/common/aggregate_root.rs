/// Трейт для корня агрегата
///
/// Определяет идентификатор записи и метаданные коллекции, в которой
/// агрегат хранится в blob store.
pub trait AggregateRoot {
    /// Тип идентификатора агрегата
    type Id: PartialEq + std::fmt::Display;

    // ============================================================================
    // Методы экземпляра (данные конкретной записи)
    // ============================================================================

    /// Получить ID записи
    fn id(&self) -> &Self::Id;

    // ============================================================================
    // Метаданные класса агрегата (статические данные)
    // ============================================================================

    /// Суффикс ключа коллекции в blob store (например, "users_db")
    fn collection_name() -> &'static str;

    /// Имя элемента для UI (единственное число)
    fn element_name() -> &'static str;

    /// Имя списка для UI (множественное число)
    fn list_name() -> &'static str;
}
