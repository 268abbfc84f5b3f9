use serde::{Deserialize, Serialize};

use super::{ensure_positive, CalcError};

/// 용량 구간별 단가. `above_kwp`를 초과하는 설치 용량에 적용된다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostTier {
    /// 구간 하한 [kWp] (초과 조건)
    pub above_kwp: f64,
    /// 단가 [R$/kWp]
    pub rate_per_kwp: f64,
}

impl CostTier {
    pub const fn new(above_kwp: f64, rate_per_kwp: f64) -> Self {
        Self {
            above_kwp,
            rate_per_kwp,
        }
    }
}

/// 설치 용량 기준 계단식 단가표. 통화/지역별로 교체할 수 있다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostTable {
    /// 어떤 구간에도 해당하지 않을 때의 단가 [R$/kWp]
    pub base_rate_per_kwp: f64,
    /// 하한 오름차순 구간 목록
    pub tiers: Vec<CostTier>,
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            base_rate_per_kwp: 3800.0,
            tiers: vec![
                CostTier::new(4.0, 3400.0),
                CostTier::new(10.0, 2900.0),
                CostTier::new(30.0, 2600.0),
                CostTier::new(75.0, 2400.0),
            ],
        }
    }
}

/// 투자비 산정 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvestmentEstimate {
    /// 적용 단가 [R$/kWp]
    pub rate_per_kwp: f64,
    /// 총 투자비 [R$]
    pub total_investment: f64,
}

impl CostTable {
    /// 단가와 구간 순서를 검사한다.
    pub fn validate(&self) -> Result<(), CalcError> {
        ensure_positive(self.base_rate_per_kwp, "기본 단가는 0보다 커야 합니다.")?;
        for tier in &self.tiers {
            ensure_positive(tier.rate_per_kwp, "구간 단가는 0보다 커야 합니다.")?;
            if !tier.above_kwp.is_finite() || tier.above_kwp < 0.0 {
                return Err(CalcError::InvalidInput("구간 하한은 0 이상이어야 합니다."));
            }
        }
        if self
            .tiers
            .windows(2)
            .any(|w| w[0].above_kwp >= w[1].above_kwp)
        {
            return Err(CalcError::InvalidInput(
                "구간 하한은 오름차순이어야 합니다.",
            ));
        }
        Ok(())
    }

    /// 설치 용량에 적용되는 단가를 반환한다.
    ///
    /// 오름차순으로 훑으며 조건을 만족하는 마지막 구간이 최종 단가가 된다.
    pub fn rate_for(&self, installed_capacity_kw: f64) -> f64 {
        let mut rate = self.base_rate_per_kwp;
        for tier in &self.tiers {
            if installed_capacity_kw > tier.above_kwp {
                rate = tier.rate_per_kwp;
            }
        }
        rate
    }

    /// 설치 용량에 대한 총 투자비를 계산한다.
    pub fn estimate(&self, installed_capacity_kw: f64) -> InvestmentEstimate {
        let rate_per_kwp = self.rate_for(installed_capacity_kw);
        InvestmentEstimate {
            rate_per_kwp,
            total_investment: installed_capacity_kw * rate_per_kwp,
        }
    }
}
