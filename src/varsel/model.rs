use serde::{Deserialize, Serialize};

use super::timestamp::{self, Timestamp};

/// 事件处理服务返回的通知记录
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Varsel {
    pub fodselsnummer: String,
    pub grupperings_id: String,
    pub event_id: String,
    #[serde(with = "timestamp")]
    pub forst_behandlet: Timestamp,
    pub produsent: String,
    pub sikkerhetsnivaa: i32,
    #[serde(with = "timestamp")]
    pub sist_oppdatert: Timestamp,
    pub tekst: String,
    #[serde(default)]
    pub link: Option<String>,
    pub aktiv: bool,
    #[serde(default, with = "timestamp::option")]
    pub synlig_frem_til: Option<Timestamp>,
    #[serde(default)]
    pub ekstern_varsling_sendt: bool,
    #[serde(default)]
    pub ekstern_varsling_kanaler: Vec<String>,
    #[serde(default)]
    pub appnavn: Option<String>,
}

/// 对外输出的通知结构（兼容旧版字段）
///
/// 不包含外部通知渠道、应用名等内部字段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VarselDTO {
    pub fodselsnummer: String,
    pub grupperings_id: String,
    pub event_id: String,
    #[serde(with = "timestamp")]
    pub forst_behandlet: Timestamp,
    pub produsent: String,
    pub sikkerhetsnivaa: i32,
    #[serde(with = "timestamp")]
    pub sist_oppdatert: Timestamp,
    pub tekst: String,
    pub link: Option<String>,
    pub aktiv: bool,
    #[serde(default, with = "timestamp::option")]
    pub synlig_frem_til: Option<Timestamp>,
}

impl From<Varsel> for VarselDTO {
    fn from(varsel: Varsel) -> Self {
        Self {
            fodselsnummer: varsel.fodselsnummer,
            grupperings_id: varsel.grupperings_id,
            event_id: varsel.event_id,
            forst_behandlet: varsel.forst_behandlet,
            produsent: varsel.produsent,
            sikkerhetsnivaa: varsel.sikkerhetsnivaa,
            sist_oppdatert: varsel.sist_oppdatert,
            tekst: varsel.tekst,
            link: varsel.link,
            aktiv: varsel.aktiv,
            synlig_frem_til: varsel.synlig_frem_til,
        }
    }
}

/// 批量转换，保持顺序与数量
pub fn to_legacy_varsler(varsler: Vec<Varsel>) -> Vec<VarselDTO> {
    varsler.into_iter().map(VarselDTO::from).collect()
}
