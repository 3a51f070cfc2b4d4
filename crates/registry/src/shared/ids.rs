use std::cell::Cell;

/// Генератор уникальных непрозрачных идентификаторов
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic ids `<prefix>-1`, `<prefix>-2`, ...
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: Cell<u64>,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Cell::new(0),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.get() + 1;
        self.counter.set(n);
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_generator_produces_distinct_ids() {
        let ids = UuidGenerator;
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(!a.is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIds::new("emp");
        assert_eq!(ids.next_id(), "emp-1");
        assert_eq!(ids.next_id(), "emp-2");
    }
}
