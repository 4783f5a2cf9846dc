//! 验证辅助函数
//!
//! - ensure_record_id：记录 id 非空
//! - ensure_limit：检索数量大于 0

use crate::error::StorageError;
use record_contract::OutputRecord;

/// 验证记录 id 非空
pub fn ensure_record_id(record: &OutputRecord) -> Result<(), StorageError> {
    if record.id.trim().is_empty() {
        return Err(StorageError::new("record id required"));
    }
    Ok(())
}

/// 验证检索数量
pub fn ensure_limit(limit: usize) -> Result<(), StorageError> {
    if limit == 0 {
        return Err(StorageError::new("limit must be positive"));
    }
    Ok(())
}
