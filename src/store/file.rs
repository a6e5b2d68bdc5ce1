use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use super::{check_record, parse_line, RawRecord, RecordStore, StoreError, StoreResult};

/// Плоский текстовый файл: одна запись на строку, `key:value\n`.
///
/// Файл создаётся лениво при первой записи; чтение несуществующего файла
/// возвращает «нет записи». Блокировок нет: параллельные процессы могут
/// дописать дубликаты, и тогда побеждает первая запись в файле.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    path: PathBuf,
}

impl FlatFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(
        &self,
        err: io::Error,
    ) -> StoreError {
        StoreError::io(self.location(), err)
    }
}

impl RecordStore for FlatFileStore {
    fn append(
        &self,
        key: &str,
        value: &str,
    ) -> StoreResult<()> {
        check_record(key, value)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_err(e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_err(e))?;

        // Одна запись — один вызов write_all.
        let line = format!("{key}{}{value}\n", super::RECORD_DELIMITER);
        file.write_all(line.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| self.io_err(e))
    }

    fn find_first(
        &self,
        key: &str,
    ) -> StoreResult<Option<RawRecord>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_err(e)),
        };

        let location = self.location();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| match e.kind() {
                io::ErrorKind::InvalidData => {
                    StoreError::malformed(&location, idx + 1, "invalid UTF-8")
                }
                _ => self.io_err(e),
            })?;
            if line.is_empty() {
                continue;
            }

            let record = parse_line(&location, idx + 1, &line)?;
            if record.key == key {
                return Ok(Some(record));
            }
        }

        Ok(None)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
