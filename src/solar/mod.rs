//! 태양광 발전 시스템 사이징 및 재무 전망 계산 모듈 모음.
//! 사이징 → 투자비 → (선택) 금융 → 25년 현금흐름 → 환경 효과 순으로 단방향 계산한다.

pub mod assumptions;
pub mod cash_flow;
pub mod cost;
pub mod environment;
pub mod financing;
pub mod project;
pub mod seasonality;
pub mod sizing;

pub use assumptions::Assumptions;
pub use cash_flow::{simulate, CashFlowInput, CashFlowProjection, CashFlowYear};
pub use cost::{CostTable, CostTier, InvestmentEstimate};
pub use environment::{estimate_impact, EnvironmentalImpact};
pub use financing::{amortize, monthly_payment, Financing, FinancingTerms, LoanQuote};
pub use project::{
    Advisory, CatalogMiss, ProjectInput, ProjectResult, ResolvedInputs, SolarEngine,
};
pub use seasonality::{monthly_profile, MonthlyYield};
pub use sizing::{compute_sizing, SizingInput, SizingResult};

/// 계산 엔진에서 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    /// 입력값 오류. 부분 결과 없이 즉시 실패한다.
    #[error("입력 오류: {0}")]
    InvalidInput(&'static str),
}

/// 값이 유한한 양수인지 검사한다.
pub(crate) fn ensure_positive(value: f64, msg: &'static str) -> Result<f64, CalcError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::InvalidInput(msg))
    }
}

/// 값이 유한하고 0 이상인지 검사한다.
pub(crate) fn ensure_non_negative(value: f64, msg: &'static str) -> Result<f64, CalcError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CalcError::InvalidInput(msg))
    }
}
