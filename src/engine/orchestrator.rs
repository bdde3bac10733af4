// ==========================================
// 组培转接周排程系统 - 引擎编排器
// ==========================================
// 用途: 协调判定 → 分组 → 填充 → 统计的执行顺序
// 说明: 单线程单次线性执行; 产能网格每次运行新建, 不跨运行共享
// ==========================================

use crate::config::{ConfigResult, PlannerConfig};
use crate::domain::batch::{BatchRecord, ClassifiedRecord};
use crate::domain::schedule::{IneligibleItem, ScheduleGrid, ScheduleResult};
use crate::domain::types::Pool;
use crate::engine::{
    EligibilityClassifier, GreedyScheduler, PoolAssigner, StatisticsAggregator, StrainGrouper,
};
use tracing::{debug, info, warn};

// ==========================================
// ScheduleOrchestrator - 引擎编排器
// ==========================================
pub struct ScheduleOrchestrator {
    config: PlannerConfig,
    classifier: EligibilityClassifier,
    assigner: PoolAssigner,
    grouper: StrainGrouper,
    aggregator: StatisticsAggregator,
}

impl ScheduleOrchestrator {
    /// 创建新的编排器实例 (配置在此校验)
    ///
    /// # 参数
    /// - config: 排程配置
    pub fn new(config: PlannerConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            classifier: EligibilityClassifier::new(config.thresholds()),
            assigner: PoolAssigner::new(),
            grouper: StrainGrouper::new(),
            aggregator: StatisticsAggregator::new(),
            config,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// 判定全部批次 (输入快照不变, 返回副本)
    pub fn classify(&self, records: &[BatchRecord]) -> Vec<ClassifiedRecord> {
        records
            .iter()
            .map(|record| {
                let verdict = self.classifier.evaluate(record);
                ClassifiedRecord::new(
                    record.clone(),
                    verdict,
                    self.assigner.assign(&record.medium_code),
                )
            })
            .collect()
    }

    /// 执行完整周排程
    ///
    /// # 参数
    /// - records: 批次快照
    ///
    /// # 返回
    /// 排程结果 (已排 / 积压 / 无池 / 不可排 + 统计)
    pub fn execute(&self, records: &[BatchRecord]) -> ScheduleResult {
        info!(records_count = records.len(), "开始执行周排程");

        // ==========================================
        // 步骤1: 适龄判定 + 工位池分配
        // ==========================================
        debug!("步骤1: 执行适龄判定与工位池分配");
        let classified = self.classify(records);
        self.execute_classified(classified)
    }

    /// 基于已判定副本执行分组、填充与统计
    pub fn execute_classified(&self, classified: Vec<ClassifiedRecord>) -> ScheduleResult {
        let week_start = self.config.resolved_week_start();

        let mut by_pool: [Vec<BatchRecord>; 2] = [Vec::new(), Vec::new()];
        let mut unassigned = Vec::new();
        let mut ineligible = Vec::new();

        for item in &classified {
            // 每条批次恰好落入 不可排 / 某池 / 无池 之一
            match (item.ineligibility_reason, item.pool) {
                (Some(reason), _) => ineligible.push(IneligibleItem {
                    record: item.record.clone(),
                    reason,
                }),
                (None, Some(pool)) => by_pool[pool.index()].push(item.record.clone()),
                (None, None) => {
                    warn!(
                        barcode = %item.record.barcode,
                        medium = %item.record.medium_code,
                        "适龄批次无对应工位池, 不参与排程"
                    );
                    unassigned.push(item.record.clone());
                }
            }
        }

        info!(
            eligible_count = by_pool.iter().map(Vec::len).sum::<usize>() + unassigned.len(),
            ineligible_count = ineligible.len(),
            unassigned_count = unassigned.len(),
            "适龄判定完成"
        );

        // ==========================================
        // 步骤2-3: 分池 品系分组 + 贪心填充
        // ==========================================
        let mut grid = self.config.build_capacity_grid();
        let mut schedule = ScheduleGrid::new();
        let scheduler = GreedyScheduler::new(week_start);
        let mut planned = Vec::new();
        let mut backlog = Vec::new();

        for pool in Pool::ALL {
            let pool_records = std::mem::take(&mut by_pool[pool.index()]);
            debug!(pool = %pool, records = pool_records.len(), "步骤2: 品系分组");
            let groups = self.grouper.group(pool_records);

            debug!(pool = %pool, groups = groups.len(), "步骤3: 贪心填充");
            let placement = scheduler.schedule_pool(pool, groups, &mut grid, &mut schedule);

            info!(
                pool = %pool,
                planned_count = placement.planned.len(),
                backlog_count = placement.backlog.len(),
                remaining_jars = grid.total_remaining(pool),
                "工位池填充完成"
            );
            planned.extend(placement.planned);
            backlog.extend(placement.backlog);
        }

        // ==========================================
        // 步骤4: 统计
        // ==========================================
        let statistics = self
            .aggregator
            .aggregate(&classified, &planned, &backlog, &grid, week_start);

        info!(
            total_eligible = statistics.total_eligible,
            total_planned = statistics.total_planned,
            total_backlog = statistics.total_backlog,
            planning_rate_pct = statistics.planning_rate_pct,
            "周排程完成"
        );

        ScheduleResult {
            week_start,
            grid: schedule,
            planned,
            backlog,
            unassigned,
            ineligible,
            classified,
            statistics,
        }
    }
}
