use serde::{Deserialize, Serialize};

/// Справочник допустимых значений атрибута сотрудника
///
/// Каждый справочник хранится отдельным JSON-массивом строк в верхнем регистре.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Branch,
    Department,
    Sector,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 3] = [
        ReferenceKind::Branch,
        ReferenceKind::Department,
        ReferenceKind::Sector,
    ];

    /// Суффикс ключа в blob store
    pub fn collection_name(&self) -> &'static str {
        match self {
            ReferenceKind::Branch => "filiais",
            ReferenceKind::Department => "departamentos",
            ReferenceKind::Sector => "setores",
        }
    }

    pub fn element_name(&self) -> &'static str {
        match self {
            ReferenceKind::Branch => "Branch",
            ReferenceKind::Department => "Department",
            ReferenceKind::Sector => "Sector",
        }
    }

    pub fn list_name(&self) -> &'static str {
        match self {
            ReferenceKind::Branch => "Branches",
            ReferenceKind::Department => "Departments",
            ReferenceKind::Sector => "Sectors",
        }
    }

    /// Значения, которыми заполняется пустое хранилище
    pub fn defaults(&self) -> &'static [&'static str] {
        match self {
            ReferenceKind::Branch => &[
                "MATRIZ",
                "SÃO PAULO",
                "RIO DE JANEIRO",
                "BELO HORIZONTE",
                "CURITIBA",
                "PORTO ALEGRE",
            ],
            ReferenceKind::Department => &[
                "TECNOLOGIA DA INFORMAÇÃO",
                "RECURSOS HUMANOS",
                "FINANCEIRO",
                "COMERCIAL",
                "OPERACIONAL",
                "LOGÍSTICA",
            ],
            ReferenceKind::Sector => &[
                "DESENVOLVIMENTO",
                "INFRAESTRUTURA",
                "RECRUTAMENTO",
                "CONTABILIDADE",
                "VENDAS",
                "ALMOXARIFADO",
            ],
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.list_name())
    }
}

/// Приведение значения справочника к хранимому виду
pub fn normalize_reference_name(name: &str) -> String {
    name.trim().to_uppercase()
}
