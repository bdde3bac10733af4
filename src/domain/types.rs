// ==========================================
// 组培转接周排程系统 - 领域类型定义
// ==========================================
// 职责: 工位池 / 工作日 / 半日时段 / 培养基代码
// 红线: 周历网格固定为 5 天 × 2 时段, 不允许动态键
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 每个工位池的时段格数 (周一上午 … 周五下午)
pub const CELLS_PER_POOL: usize = WorkDay::ALL.len() * HalfDay::ALL.len();

/// 工位池数量
pub const POOL_COUNT: usize = Pool::ALL.len();

// ==========================================
// 工位池 (Worker Pool)
// ==========================================
// 两个互不相交的人员组, 产能各自独立
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pool {
    General,     // 通用组
    Specialized, // 专项组 (XM / i 培养基)
}

impl Pool {
    pub const ALL: [Pool; 2] = [Pool::General, Pool::Specialized];

    /// 网格下标
    pub fn index(self) -> usize {
        match self {
            Pool::General => 0,
            Pool::Specialized => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Pool::General => "general",
            Pool::Specialized => "specialized",
        }
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 工作日 (Work Day)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl WorkDay {
    pub const ALL: [WorkDay; 5] = [
        WorkDay::Monday,
        WorkDay::Tuesday,
        WorkDay::Wednesday,
        WorkDay::Thursday,
        WorkDay::Friday,
    ];

    /// 距周一的天数
    pub fn offset_days(self) -> i64 {
        match self {
            WorkDay::Monday => 0,
            WorkDay::Tuesday => 1,
            WorkDay::Wednesday => 2,
            WorkDay::Thursday => 3,
            WorkDay::Friday => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkDay::Monday => "Monday",
            WorkDay::Tuesday => "Tuesday",
            WorkDay::Wednesday => "Wednesday",
            WorkDay::Thursday => "Thursday",
            WorkDay::Friday => "Friday",
        }
    }
}

impl fmt::Display for WorkDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 半日时段 (Half Day)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfDay {
    Morning,   // 上午
    Afternoon, // 下午
}

impl HalfDay {
    pub const ALL: [HalfDay; 2] = [HalfDay::Morning, HalfDay::Afternoon];

    pub fn as_str(&self) -> &'static str {
        match self {
            HalfDay::Morning => "morning",
            HalfDay::Afternoon => "afternoon",
        }
    }
}

impl fmt::Display for HalfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 时段格 (Slot) - (工作日, 半日)
// ==========================================
// 顺序即时间顺序: 周一上午 → 周一下午 → 周二上午 …
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub day: WorkDay,
    pub half: HalfDay,
}

impl Slot {
    pub fn new(day: WorkDay, half: HalfDay) -> Self {
        Self { day, half }
    }

    /// 时间序下标 (0..CELLS_PER_POOL)
    pub fn index(self) -> usize {
        self.day.offset_days() as usize * HalfDay::ALL.len()
            + match self.half {
                HalfDay::Morning => 0,
                HalfDay::Afternoon => 1,
            }
    }

    /// 由下标反推时段, 越界返回 None
    pub fn from_index(index: usize) -> Option<Self> {
        let day = *WorkDay::ALL.get(index / HalfDay::ALL.len())?;
        let half = HalfDay::ALL[index % HalfDay::ALL.len()];
        Some(Self { day, half })
    }

    /// 按时间顺序遍历整周时段
    pub fn chronological() -> impl Iterator<Item = Slot> {
        WorkDay::ALL
            .into_iter()
            .flat_map(|day| HalfDay::ALL.into_iter().map(move |half| Slot { day, half }))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.half)
    }
}

// ==========================================
// 培养基代码 (Medium)
// ==========================================
// 仅列出可排产的培养基; 其余代码解析为 None
// 比较不区分大小写 ("i" 与 "I" 等价)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Medium {
    X,
    Xm,
    Rg,
    Xs,
    E,
    EPlus,
    I,
}

impl Medium {
    /// 解析培养基代码 (TRIM + 大小写无关)
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "X" => Some(Medium::X),
            "XM" => Some(Medium::Xm),
            "RG" => Some(Medium::Rg),
            "XS" => Some(Medium::Xs),
            "E" => Some(Medium::E),
            "E+" => Some(Medium::EPlus),
            "I" => Some(Medium::I),
            _ => None,
        }
    }

    /// 是否属于 BRAHY 短周期培养基 {X, XM, E, E+}
    pub fn is_short_cycle(self) -> bool {
        matches!(self, Medium::X | Medium::Xm | Medium::E | Medium::EPlus)
    }

    /// 所属工位池
    pub fn pool(self) -> Pool {
        match self {
            Medium::Xm | Medium::I => Pool::Specialized,
            Medium::X | Medium::Rg | Medium::Xs | Medium::E | Medium::EPlus => Pool::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Medium::X => "X",
            Medium::Xm => "XM",
            Medium::Rg => "RG",
            Medium::Xs => "XS",
            Medium::E => "E",
            Medium::EPlus => "E+",
            Medium::I => "i",
        }
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
