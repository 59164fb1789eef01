use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;

use crate::common::identity::{self, FODSELSNUMMER_HEADER};
use crate::varsel::{to_legacy_varsler, varsel_path, Category, Lifecycle, VarselDTO};
use crate::web::{state::AppState, utils::errors::ApiError};

/// 获取并转换通知：校验身份证号 → 拉取上游 → 转换为旧版结构
pub async fn fetch_varsler(
    state: &AppState,
    headers: &HeaderMap,
    category: Category,
    lifecycle: Lifecycle,
) -> Result<Json<Vec<VarselDTO>>, ApiError> {
    // 非可见 ASCII 的头值按格式错误处理
    let header_value = headers
        .get(FODSELSNUMMER_HEADER)
        .map(|value| value.to_str().unwrap_or_default());
    let fnr = identity::validate(header_value)?;

    let path = varsel_path(category, lifecycle);
    tracing::debug!("[Varsel] Fetching {}", path);
    let varsler = state.varsel_reader.fetch_varsel(&fnr, &path).await?;

    Ok(Json(to_legacy_varsler(varsler)))
}

/// 新版路由：类型固定在路由表中
pub async fn handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    category: Category,
    lifecycle: Lifecycle,
) -> Result<Json<Vec<VarselDTO>>, ApiError> {
    fetch_varsler(&state, &headers, category, lifecycle).await
}

/// 旧版路由：类型来自 `{varseltype}` 路径参数
pub async fn legacy_handler(
    State(state): State<Arc<AppState>>,
    Path(varseltype): Path<String>,
    headers: HeaderMap,
    lifecycle: Lifecycle,
) -> Result<Json<Vec<VarselDTO>>, ApiError> {
    let category =
        Category::from_path_param(&varseltype).ok_or(ApiError::UnknownCategory(varseltype))?;
    fetch_varsler(&state, &headers, category, lifecycle).await
}
