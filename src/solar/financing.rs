//! Price 방식(원리금 균등) 대출 상환 계산.
use serde::{Deserialize, Serialize};

use super::{ensure_non_negative, CalcError};

/// 금융 조건.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancingTerms {
    /// 계약금 [R$]
    pub down_payment: f64,
    /// 월 이자율 [%]
    pub monthly_rate_percent: f64,
    /// 상환 기간 [개월]
    pub term_months: u32,
}

/// 자금 조달 방식. 현금 구매 또는 대출.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Financing {
    /// 전액 자기자본
    #[default]
    Cash,
    /// 원리금 균등 대출
    Loan(FinancingTerms),
}

impl Financing {
    pub fn terms(&self) -> Option<&FinancingTerms> {
        match self {
            Financing::Cash => None,
            Financing::Loan(terms) => Some(terms),
        }
    }

    pub fn is_financed(&self) -> bool {
        matches!(self, Financing::Loan(_))
    }
}

/// 대출 견적 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanQuote {
    /// 대출 원금 [R$]
    pub principal: f64,
    /// 계약금 [R$]
    pub down_payment: f64,
    /// 월 상환액 [R$]
    pub monthly_payment: f64,
    /// 상환 기간 [개월]
    pub term_months: u32,
    /// 총 부담액 (상환 합계 + 계약금) [R$]
    pub total_cost: f64,
}

impl LoanQuote {
    /// 해당 연도(1부터)에 납부하는 상환액 [R$].
    ///
    /// 만기 연도에 잔여 개월만 납부하고, 만기 이후는 0이다.
    pub fn payment_for_year(&self, year: u32) -> f64 {
        let full_years = self.term_months / 12;
        let remainder = self.term_months % 12;
        if year == 0 {
            0.0
        } else if year <= full_years {
            self.monthly_payment * 12.0
        } else if year == full_years + 1 && remainder > 0 {
            self.monthly_payment * f64::from(remainder)
        } else {
            0.0
        }
    }
}

/// 월 상환액을 계산한다.
///
/// - 원금이 0 이하면 상환액은 0이다.
/// - 이자율 0이면 원금을 기간으로 균등 분할한다.
pub fn monthly_payment(
    principal: f64,
    monthly_rate_percent: f64,
    term_months: u32,
) -> Result<f64, CalcError> {
    if !principal.is_finite() {
        return Err(CalcError::InvalidInput("대출 원금이 올바르지 않습니다."));
    }
    let rate_percent = ensure_non_negative(
        monthly_rate_percent,
        "월 이자율은 0 이상이어야 합니다.",
    )?;
    if term_months == 0 {
        return Err(CalcError::InvalidInput("상환 기간은 1개월 이상이어야 합니다."));
    }
    if principal <= 0.0 {
        return Ok(0.0);
    }
    let n = f64::from(term_months);
    let i = rate_percent / 100.0;
    if i == 0.0 {
        return Ok(principal / n);
    }
    let growth = (1.0 + i).powf(n);
    Ok(principal * (i * growth) / (growth - 1.0))
}

/// 총 투자비와 금융 조건으로 대출 견적을 만든다.
///
/// 계약금이 총 투자비 이상이면 대출이 필요 없으므로 원금 0, 상환액 0이다.
/// 이때 계약금은 총 투자비로 잘라서 반영한다.
pub fn amortize(total_investment: f64, terms: &FinancingTerms) -> Result<LoanQuote, CalcError> {
    let requested = ensure_non_negative(terms.down_payment, "계약금은 0 이상이어야 합니다.")?;
    let down_payment = requested.min(total_investment.max(0.0));
    let principal = (total_investment - down_payment).max(0.0);
    let payment = monthly_payment(principal, terms.monthly_rate_percent, terms.term_months)?;
    Ok(LoanQuote {
        principal,
        down_payment,
        monthly_payment: payment,
        term_months: terms.term_months,
        total_cost: payment * f64::from(terms.term_months) + down_payment,
    })
}
