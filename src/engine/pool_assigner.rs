// ==========================================
// 组培转接周排程系统 - 工位池分配
// ==========================================
// 规则: {XM, i} → 专项组; {X, RG, XS, E, E+} → 通用组; 其他 → 无
// ==========================================

use crate::domain::types::{Medium, Pool};

#[derive(Debug, Clone, Copy, Default)]
pub struct PoolAssigner;

impl PoolAssigner {
    pub fn new() -> Self {
        Self
    }

    /// 按培养基代码分配工位池 (大小写无关)
    pub fn assign(&self, medium_code: &str) -> Option<Pool> {
        Medium::parse(medium_code).map(Medium::pool)
    }
}
