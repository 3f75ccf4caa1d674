pub mod file;
pub mod memory;

use std::path;

use crate::domain::models::StorageBox;
use crate::domain::models::StorageName;

pub struct StorageManager {}

impl StorageManager {
    pub fn get(name: StorageName, data_dir: &path::Path) -> StorageBox {
        if name == StorageName::Memory {
            return Box::<memory::MemoryStorage>::default();
        }

        return Box::new(file::FileStorage::new(data_dir.to_path_buf()));
    }
}
