use crate::region::RegionSet;

/// HUC2 のうち対象とする最大の単位番号（19-22 は対象外）
pub const HUC2_MAX_UNIT: u32 = 18;
/// HUC4 のうち対象とする最大の単位番号
pub const HUC4_MAX_UNIT: u32 = 1810;

/// 境界ファイルをカタログに含めるかどうかを判定する
///
/// HUC2 / HUC4 では数値の範囲で絞り込み、英字を含む名前や数値として解釈できない
/// 名前は対象外とする。その他の地域区分はすべて対象。
pub fn is_relevant(region_set: &RegionSet, base_name: &str) -> bool {
    let max_unit = match region_set.label() {
        RegionSet::HUC2 => HUC2_MAX_UNIT,
        RegionSet::HUC4 => HUC4_MAX_UNIT,
        _ => return true,
    };

    if base_name.chars().any(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    match base_name.parse::<u32>() {
        Ok(unit) => unit <= max_unit,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_huc2_boundary() {
        let set = RegionSet::new("HUC2");
        assert!(is_relevant(&set, "01"));
        assert!(is_relevant(&set, "18"));
        assert!(!is_relevant(&set, "19"));
        assert!(!is_relevant(&set, "22"));
    }

    #[test]
    fn test_huc4_boundary() {
        let set = RegionSet::new("HUC4");
        assert!(is_relevant(&set, "0101"));
        assert!(is_relevant(&set, "1810"));
        assert!(!is_relevant(&set, "1811"));
        assert!(!is_relevant(&set, "1901"));
    }

    #[test]
    fn test_non_numeric_names_rejected() {
        for label in ["HUC2", "HUC4"] {
            let set = RegionSet::new(label);
            // "-3" "1_2" " 5" は Python の int() なら数値として通るが、ここでは対象外とする
            for name in ["IL", "01a", "x", "", "1_2", "-3", " 5"] {
                assert!(!is_relevant(&set, name), "{label}/{name:?} should be rejected");
            }
        }
    }

    #[test]
    fn test_other_sets_accept_everything() {
        let set = RegionSet::new("State");
        for name in ["IL", "99", "", "0000"] {
            assert!(is_relevant(&set, name));
        }
        // ラベルは完全一致で判定する
        assert!(is_relevant(&RegionSet::new("HUC8"), "99999999"));
    }
}
