use serde::{Deserialize, Serialize};

use super::LocalityCatalog;

/// 지역 기준 데이터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locality {
    pub name: String,
    /// 주(州) 약어
    pub state: String,
    /// 일평균 일사 시간(HSP) [h/일]
    pub full_sun_hours: f64,
    /// 기본 전력 요금 [R$/kWh]
    pub tariff: f64,
}

impl Locality {
    pub fn new(name: &str, state: &str, full_sun_hours: f64, tariff: f64) -> Self {
        Self {
            name: name.to_string(),
            state: state.to_string(),
            full_sun_hours,
            tariff,
        }
    }
}

const ALAGOAS_TARIFF: f64 = 0.98;

/// 알라고아스 주 시군 HSP 근사값. 값은 참고용이다.
const ALAGOAS: &[(&str, f64)] = &[
    ("Maceió", 5.35),
    ("Arapiraca", 5.40),
    ("Rio Largo", 5.30),
    ("Palmeira dos Índios", 5.25),
    ("União dos Palmares", 5.20),
    ("Penedo", 5.35),
    ("São Miguel dos Campos", 5.30),
    ("Campo Alegre", 5.25),
    ("Coruripe", 5.40),
    ("Marechal Deodoro", 5.35),
    ("Delmiro Gouveia", 5.50),
    ("Santana do Ipanema", 5.45),
    ("Atalaia", 5.25),
    ("Teotônio Vilela", 5.30),
    ("Girau do Ponciano", 5.35),
    ("Pilar", 5.30),
    ("São Sebastião", 5.30),
    ("Maragogi", 5.40),
    ("São José da Tapera", 5.45),
    ("Boca da Mata", 5.25),
    ("Murici", 5.20),
    ("Porto Calvo", 5.30),
    ("Viçosa", 5.20),
    ("Pão de Açúcar", 5.55),
    ("Igaci", 5.30),
    ("Mata Grande", 5.40),
    ("Piranhas", 5.60),
];

/// 메모리 기반 지역 카탈로그. 이름순으로 정렬해 보관한다.
#[derive(Debug, Clone)]
pub struct LocalityTable {
    entries: Vec<Locality>,
    fallback: Locality,
}

impl LocalityTable {
    /// 지정한 항목과 기본 지역으로 카탈로그를 만든다.
    pub fn new(mut entries: Vec<Locality>, fallback: Locality) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Self { entries, fallback }
    }

    /// 내장 알라고아스 목록. 기본 지역은 이름순 첫 항목이다.
    pub fn builtin() -> Self {
        Self::with_extra(Vec::new())
    }

    /// 내장 목록에 추가 항목을 더한다. 같은 이름이면 추가 항목이 우선한다.
    pub fn with_extra(extra: Vec<Locality>) -> Self {
        let mut entries: Vec<Locality> = ALAGOAS
            .iter()
            .map(|(name, hsp)| Locality::new(name, "AL", *hsp, ALAGOAS_TARIFF))
            .collect();
        for loc in extra {
            match entries.iter_mut().find(|e| same_name(&e.name, &loc.name)) {
                Some(existing) => *existing = loc,
                None => entries.push(loc),
            }
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        let fallback = entries[0].clone();
        Self { entries, fallback }
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl LocalityCatalog for LocalityTable {
    fn lookup(&self, name: &str) -> Option<&Locality> {
        self.entries.iter().find(|l| same_name(&l.name, name))
    }

    fn fallback(&self) -> &Locality {
        &self.fallback
    }

    fn all(&self) -> &[Locality] {
        &self.entries
    }
}
