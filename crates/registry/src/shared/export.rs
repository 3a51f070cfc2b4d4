//! Экспорт табличных данных в CSV (открывается в Excel)
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Trait для типов, которые могут быть экспортированы в CSV
pub trait CsvExportable {
    /// Возвращает массив заголовков колонок
    fn headers() -> Vec<&'static str>;

    /// Преобразует объект в массив значений строки
    fn to_csv_row(&self) -> Vec<String>;
}

/// Пишет CSV: UTF-8 BOM, разделитель `;`, строка заголовков
pub fn export_to_writer<T: CsvExportable, W: Write>(data: &[T], mut writer: W) -> Result<()> {
    if data.is_empty() {
        bail!("No data to export");
    }

    // BOM для корректного отображения кириллицы и латиницы с диакритикой в Excel
    writer.write_all("\u{FEFF}".as_bytes())?;

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(writer);

    csv_writer.write_record(T::headers())?;
    for item in data {
        csv_writer.write_record(item.to_csv_row())?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Экспортирует список в CSV файл
pub fn export_to_file<T: CsvExportable>(data: &[T], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Cannot create export file {}", path.display()))?;
    export_to_writer(data, std::io::BufWriter::new(file))
        .with_context(|| format!("Failed to export to {}", path.display()))?;
    tracing::info!("Exported {} rows to {}", data.len(), path.display());
    Ok(())
}
