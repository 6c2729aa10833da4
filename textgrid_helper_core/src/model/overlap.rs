use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// 重叠判定的阈值配置。
///
/// 默认配置（全零）下, 只要两个区间有正长度的交集就算重叠。
/// 阈值只会放宽判定, 不会否决一个已经成立的基础重叠。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Builder, Default)]
#[builder(default)]
pub struct OverlapCriteria {
    /// 重叠时长占两区间并集时长的最小比例, 大于 0 时启用。
    pub percent_threshold: f64,
    /// 重叠时长的最小绝对值, 大于 0 时启用。
    pub time_threshold: f64,
    /// 共享边界（一个的结束等于另一个的开始）是否视为重叠。
    pub boundary_inclusive: bool,
}

/// 判定两个时间范围是否重叠。
///
/// 基础判定为交集时长大于 0。在此之上:
/// - `boundary_inclusive` 使共享边界也算重叠;
/// - `percent_threshold` 使重叠比例达到阈值时算重叠;
/// - `time_threshold` 使重叠时长超过阈值时算重叠。
///
/// 最终结果是四项判定的逻辑或。
#[must_use]
pub fn intervals_overlap(a: (f64, f64), b: (f64, f64), criteria: OverlapCriteria) -> bool {
    let (start, end) = a;
    let (cmpr_start, cmpr_end) = b;

    let overlap_time = (end.min(cmpr_end) - start.max(cmpr_start)).max(0.0);
    let overlap_flag = overlap_time > 0.0;

    // 只需检查一个的结束是否恰好是另一个的开始, 其余情形已被基础判定覆盖
    let boundary_flag =
        criteria.boundary_inclusive && (start == cmpr_end || end == cmpr_start);

    let percent_flag = if criteria.percent_threshold > 0.0 && overlap_flag {
        let union_time = end.max(cmpr_end) - start.min(cmpr_start);
        overlap_time / union_time >= criteria.percent_threshold
    } else {
        false
    };

    let time_flag = if criteria.time_threshold > 0.0 && overlap_flag {
        overlap_time > criteria.time_threshold
    } else {
        false
    };

    overlap_flag || boundary_flag || percent_flag || time_flag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_overlap() {
        let criteria = OverlapCriteria::default();
        assert!(intervals_overlap((0.0, 2.0), (1.0, 3.0), criteria));
        assert!(!intervals_overlap((0.0, 1.0), (2.0, 3.0), criteria));
    }

    #[test]
    fn touching_boundaries_need_opt_in() {
        let strict = OverlapCriteria::default();
        assert!(!intervals_overlap((0.0, 1.0), (1.0, 2.0), strict));

        let inclusive = OverlapCriteriaBuilder::default()
            .boundary_inclusive(true)
            .build()
            .unwrap();
        assert!(intervals_overlap((0.0, 1.0), (1.0, 2.0), inclusive));
        assert!(intervals_overlap((1.0, 2.0), (0.0, 1.0), inclusive));
    }

    #[test]
    fn thresholds_only_add_truthiness() {
        // 基础重叠成立时, 高阈值不能否决它
        let criteria = OverlapCriteriaBuilder::default()
            .percent_threshold(0.99)
            .time_threshold(100.0)
            .build()
            .unwrap();
        assert!(intervals_overlap((0.0, 10.0), (9.0, 11.0), criteria));
    }

    #[test]
    fn symmetry() {
        let criteria = OverlapCriteria::default();
        let pairs = [
            ((0.0, 5.0), (3.0, 7.0)),
            ((0.0, 5.0), (5.0, 7.0)),
            ((0.0, 5.0), (6.0, 7.0)),
            ((1.0, 2.0), (0.0, 9.0)),
        ];
        for (a, b) in pairs {
            assert_eq!(
                intervals_overlap(a, b, criteria),
                intervals_overlap(b, a, criteria),
                "{a:?} vs {b:?}"
            );
        }
    }
}
