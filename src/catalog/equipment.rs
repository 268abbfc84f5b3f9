use serde::{Deserialize, Serialize};

use super::EquipmentCatalog;

/// 장비 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentKind {
    Module,
    Inverter,
    Other,
}

/// 장비 카탈로그 항목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub kind: EquipmentKind,
    /// 단가 [R$]
    pub unit_price: f64,
    /// 정격 출력 [W]. 모듈에만 있다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated_power_w: Option<f64>,
}

/// 메모리 기반 장비 카탈로그.
#[derive(Debug, Clone, Default)]
pub struct EquipmentTable {
    entries: Vec<Equipment>,
}

impl EquipmentTable {
    pub fn new(entries: Vec<Equipment>) -> Self {
        Self { entries }
    }

    /// 기본 제공 제품 목록.
    pub fn builtin() -> Self {
        Self::with_extra(Vec::new())
    }

    /// 내장 목록에 추가 항목을 더한다. 같은 id면 추가 항목이 우선한다.
    pub fn with_extra(extra: Vec<Equipment>) -> Self {
        let mut entries = vec![
            Equipment {
                id: "1".into(),
                name: "Painel Canadian 550W".into(),
                kind: EquipmentKind::Module,
                unit_price: 650.0,
                rated_power_w: Some(550.0),
            },
            Equipment {
                id: "2".into(),
                name: "Inversor Growatt 5kW".into(),
                kind: EquipmentKind::Inverter,
                unit_price: 4200.0,
                rated_power_w: None,
            },
            Equipment {
                id: "3".into(),
                name: "Inversor Deye Híbrido 8kW".into(),
                kind: EquipmentKind::Inverter,
                unit_price: 9500.0,
                rated_power_w: None,
            },
        ];
        for item in extra {
            match entries.iter_mut().find(|e| e.id == item.id) {
                Some(existing) => *existing = item,
                None => entries.push(item),
            }
        }
        Self { entries }
    }

    /// 모듈 항목만 반환한다.
    pub fn modules(&self) -> impl Iterator<Item = &Equipment> {
        self.entries.iter().filter(|e| e.kind == EquipmentKind::Module)
    }
}

impl EquipmentCatalog for EquipmentTable {
    fn lookup(&self, id: &str) -> Option<&Equipment> {
        let id = id.trim();
        self.entries.iter().find(|e| e.id == id)
    }

    fn all(&self) -> &[Equipment] {
        &self.entries
    }
}
