//! 계산 엔진이 읽기 전용으로 참조하는 지역/장비 카탈로그.
//! 엔진은 트레이트로만 접근하므로 테스트에서는 합성 카탈로그를 주입할 수 있다.

pub mod equipment;
pub mod locality;

pub use equipment::{Equipment, EquipmentKind, EquipmentTable};
pub use locality::{Locality, LocalityTable};

/// 지역별 일사량/요금 조회.
pub trait LocalityCatalog {
    /// 이름으로 지역을 찾는다. 대소문자는 구분하지 않는다.
    fn lookup(&self, name: &str) -> Option<&Locality>;
    /// 조회 실패 시 쓰는 기본 지역.
    fn fallback(&self) -> &Locality;
    fn all(&self) -> &[Locality];
}

/// 장비(모듈/인버터) 조회.
pub trait EquipmentCatalog {
    fn lookup(&self, id: &str) -> Option<&Equipment>;
    fn all(&self) -> &[Equipment];
}
