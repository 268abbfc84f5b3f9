//! 입력 하나로 사이징부터 환경 효과까지 한 번에 계산하는 진입점.
use serde::{Deserialize, Serialize};

use super::cash_flow::{simulate, CashFlowInput, CashFlowProjection};
use super::environment::{estimate_impact, EnvironmentalImpact};
use super::financing::{amortize, Financing, LoanQuote};
use super::seasonality::{monthly_profile, MonthlyYield};
use super::sizing::{compute_sizing, SizingInput, SizingResult};
use super::{ensure_non_negative, Assumptions, CalcError, CostTable};
use crate::catalog::{EquipmentCatalog, Locality, LocalityCatalog};

fn default_inflation() -> f64 {
    6.0
}

fn default_degradation() -> f64 {
    0.7
}

/// 계산 1회분 입력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    /// 지역 이름
    pub locality: String,
    /// 월 소비량 [kWh/월]
    pub monthly_consumption_kwh: f64,
    /// 요금 직접 지정 [R$/kWh]. 없으면 지역 기본 요금
    #[serde(default)]
    pub tariff_override: Option<f64>,
    /// 모듈 카탈로그 id. 없으면 기본 출력
    #[serde(default)]
    pub module_id: Option<String>,
    /// 인버터 AC 용량 [kW]
    pub inverter_capacity_kw: f64,
    /// 방위각/경사 손실 [%]
    #[serde(default)]
    pub azimuth_loss_percent: f64,
    #[serde(default)]
    pub financing: Financing,
    /// 연간 전기요금 상승률 [%]
    #[serde(default = "default_inflation")]
    pub energy_inflation_percent: f64,
    /// 연간 모듈 열화율 [%]
    #[serde(default = "default_degradation")]
    pub panel_degradation_percent: f64,
}

impl ProjectInput {
    /// 필수 항목만 받고 나머지는 기본값으로 채운다.
    pub fn new(locality: &str, monthly_consumption_kwh: f64, inverter_capacity_kw: f64) -> Self {
        Self {
            locality: locality.to_string(),
            monthly_consumption_kwh,
            tariff_override: None,
            module_id: None,
            inverter_capacity_kw,
            azimuth_loss_percent: 0.0,
            financing: Financing::Cash,
            energy_inflation_percent: default_inflation(),
            panel_degradation_percent: default_degradation(),
        }
    }
}

/// 카탈로그 조회 실패 후 기본값으로 대체한 내역. 호출 측에서 경고로 기록한다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogMiss {
    /// 알 수 없는 지역
    UnknownLocality { requested: String, fallback: String },
    /// 알 수 없는 모듈 id
    UnknownModule { requested: String, fallback_power_w: f64 },
    /// 정격 출력이 없는 장비를 모듈로 선택
    MissingRatedPower { id: String, fallback_power_w: f64 },
}

impl std::fmt::Display for CatalogMiss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogMiss::UnknownLocality {
                requested,
                fallback,
            } => write!(f, "알 수 없는 지역 '{requested}', '{fallback}' 사용"),
            CatalogMiss::UnknownModule {
                requested,
                fallback_power_w,
            } => write!(
                f,
                "알 수 없는 모듈 '{requested}', {fallback_power_w} W 사용"
            ),
            CatalogMiss::MissingRatedPower {
                id,
                fallback_power_w,
            } => write!(f, "장비 '{id}'에 정격 출력 없음, {fallback_power_w} W 사용"),
        }
    }
}

/// 오류는 아니지만 결과와 함께 표시할 주의 사항.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// 과적재율이 권장 상한을 넘음
    Oversizing { ratio: f64, limit: f64 },
}

/// 카탈로그 조회를 마친 입력값.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedInputs {
    pub locality: Locality,
    /// 실제 적용 요금 [R$/kWh]
    pub tariff: f64,
    /// 적용 모듈 출력 [W]
    pub module_power_w: f64,
    /// 선택된 모듈 이름. 기본 출력을 쓰면 None
    pub module_name: Option<String>,
}

/// 계산 결과 전체.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectResult {
    pub inputs: ResolvedInputs,
    pub sizing: SizingResult,
    /// 적용 단가 [R$/kWp]
    pub cost_per_kwp: f64,
    /// 총 투자비 [R$]
    pub total_investment: f64,
    pub financed: bool,
    pub loan: Option<LoanQuote>,
    /// 첫해 월평균 발전량 [kWh/월]
    pub monthly_generation_kwh: f64,
    /// 첫해 월 절감액 [R$]
    pub monthly_savings: f64,
    /// 첫해 연 절감액 [R$]
    pub annual_savings: f64,
    pub cash_flow: CashFlowProjection,
    pub seasonality: Vec<MonthlyYield>,
    pub impact: EnvironmentalImpact,
    pub advisories: Vec<Advisory>,
    pub catalog_misses: Vec<CatalogMiss>,
}

impl ProjectResult {
    /// 회수 기간 [년]
    pub fn payback_years(&self) -> f64 {
        self.cash_flow.payback_years
    }

    /// 분석 기간 ROI [%]
    pub fn roi_percent(&self) -> f64 {
        self.cash_flow.roi_percent
    }

    pub fn is_oversized(&self) -> bool {
        self.advisories
            .iter()
            .any(|a| matches!(a, Advisory::Oversizing { .. }))
    }
}

/// 카탈로그와 가정값을 주입받아 계산하는 엔진. 상태를 갖지 않는다.
#[derive(Debug, Clone, Copy)]
pub struct SolarEngine<'a, L, E> {
    localities: &'a L,
    equipment: &'a E,
    assumptions: &'a Assumptions,
    cost_table: &'a CostTable,
}

impl<'a, L, E> SolarEngine<'a, L, E>
where
    L: LocalityCatalog,
    E: EquipmentCatalog,
{
    pub fn new(
        localities: &'a L,
        equipment: &'a E,
        assumptions: &'a Assumptions,
        cost_table: &'a CostTable,
    ) -> Self {
        Self {
            localities,
            equipment,
            assumptions,
            cost_table,
        }
    }

    pub fn assumptions(&self) -> &Assumptions {
        self.assumptions
    }

    /// 지역/모듈을 조회하고, 실패하면 기본값과 함께 대체 내역을 남긴다.
    pub fn resolve(
        &self,
        input: &ProjectInput,
    ) -> Result<(ResolvedInputs, Vec<CatalogMiss>), CalcError> {
        let mut misses = Vec::new();

        let locality = match self.localities.lookup(&input.locality) {
            Some(loc) => loc.clone(),
            None => {
                let fallback = self.localities.fallback().clone();
                misses.push(CatalogMiss::UnknownLocality {
                    requested: input.locality.clone(),
                    fallback: fallback.name.clone(),
                });
                fallback
            }
        };

        let default_w = self.assumptions.default_module_power_w;
        let (module_power_w, module_name) = match input.module_id.as_deref() {
            None => (default_w, None),
            Some(id) => match self.equipment.lookup(id) {
                Some(item) => match item.rated_power_w {
                    Some(w) => (w, Some(item.name.clone())),
                    None => {
                        misses.push(CatalogMiss::MissingRatedPower {
                            id: id.to_string(),
                            fallback_power_w: default_w,
                        });
                        (default_w, None)
                    }
                },
                None => {
                    misses.push(CatalogMiss::UnknownModule {
                        requested: id.to_string(),
                        fallback_power_w: default_w,
                    });
                    (default_w, None)
                }
            },
        };

        let tariff = match input.tariff_override {
            Some(t) => ensure_non_negative(t, "전력 요금은 0 이상이어야 합니다.")?,
            None => locality.tariff,
        };

        Ok((
            ResolvedInputs {
                locality,
                tariff,
                module_power_w,
                module_name,
            },
            misses,
        ))
    }

    /// 전체 계산을 수행한다. 입력 오류 시 부분 결과 없이 실패한다.
    pub fn compute(&self, input: &ProjectInput) -> Result<ProjectResult, CalcError> {
        let assumptions = self.assumptions;
        assumptions.validate()?;
        self.cost_table.validate()?;

        let (inputs, catalog_misses) = self.resolve(input)?;

        let sizing = compute_sizing(
            &SizingInput {
                monthly_consumption_kwh: input.monthly_consumption_kwh,
                full_sun_hours: inputs.locality.full_sun_hours,
                module_power_w: inputs.module_power_w,
                inverter_capacity_kw: input.inverter_capacity_kw,
                azimuth_loss_percent: input.azimuth_loss_percent,
            },
            assumptions,
        )?;

        let estimate = self.cost_table.estimate(sizing.installed_capacity_kw);
        let loan = match &input.financing {
            Financing::Cash => None,
            Financing::Loan(terms) => Some(amortize(estimate.total_investment, terms)?),
        };

        let monthly_generation_kwh = sizing.base_monthly_generation_kwh(
            inputs.locality.full_sun_hours,
            assumptions.days_per_month,
        );

        let cash_flow = simulate(
            &CashFlowInput {
                base_monthly_generation_kwh: monthly_generation_kwh,
                monthly_consumption_kwh: input.monthly_consumption_kwh,
                tariff: inputs.tariff,
                energy_inflation_percent: input.energy_inflation_percent,
                panel_degradation_percent: input.panel_degradation_percent,
                total_investment: estimate.total_investment,
                loan,
            },
            assumptions,
        )?;

        let impact = estimate_impact(monthly_generation_kwh * 12.0, assumptions);
        let seasonality = monthly_profile(
            monthly_generation_kwh,
            input.monthly_consumption_kwh,
            &assumptions.monthly_yield_factors,
        );

        let mut advisories = Vec::new();
        if sizing.oversizing_ratio > assumptions.oversizing_advisory_limit {
            advisories.push(Advisory::Oversizing {
                ratio: sizing.oversizing_ratio,
                limit: assumptions.oversizing_advisory_limit,
            });
        }

        let monthly_savings = monthly_generation_kwh * inputs.tariff;
        Ok(ProjectResult {
            cost_per_kwp: estimate.rate_per_kwp,
            total_investment: estimate.total_investment,
            financed: input.financing.is_financed(),
            loan,
            monthly_generation_kwh,
            monthly_savings,
            annual_savings: monthly_savings * 12.0,
            cash_flow,
            seasonality,
            impact,
            advisories,
            catalog_misses,
            sizing,
            inputs,
        })
    }
}
