use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::varsel::{Category, Lifecycle};
use crate::web::{
    api::{health, varsel},
    state::AppState,
};

/// 新版路由：`/{category}/{lifecycle}`
pub fn current_routes() -> Router<Arc<AppState>> {
    let mut router = Router::new();
    for category in Category::ALL {
        for lifecycle in Lifecycle::ALL {
            let path = format!("/{}/{}", category, lifecycle.route_segment());
            router = router.route(
                &path,
                get(move |state: State<Arc<AppState>>, headers: HeaderMap| {
                    varsel::handler(state, headers, category, lifecycle)
                }),
            );
        }
    }
    router
}

/// 旧版路由：`/:varseltype/{lifecycle}`
pub fn legacy_routes() -> Router<Arc<AppState>> {
    let mut router = Router::new();
    for lifecycle in Lifecycle::ALL {
        let path = format!("/:varseltype/{}", lifecycle.route_segment());
        router = router.route(
            &path,
            get(
                move |state: State<Arc<AppState>>,
                      varseltype: Path<String>,
                      headers: HeaderMap| {
                    varsel::legacy_handler(state, varseltype, headers, lifecycle)
                },
            ),
        );
    }
    router
}

/// 通知路由：同一张 (类型, 生命周期) 表注册两遍，静态路由优先于 `{varseltype}`
pub fn varsel_routes() -> Router<Arc<AppState>> {
    current_routes().merge(legacy_routes())
}

/// 组装完整应用路由（不含中间件层）
///
/// `base_path` 为空或 `/` 时不做嵌套。
pub fn build_router(state: Arc<AppState>, base_path: &str) -> Router {
    let routes = Router::new()
        .route("/internal/isAlive", get(health::is_alive))
        .route("/internal/isReady", get(health::is_ready))
        .merge(varsel_routes());

    let base_path = base_path.trim_end_matches('/');
    let app = if base_path.is_empty() {
        routes
    } else {
        Router::new().nest(base_path, routes)
    };

    app.with_state(state)
}
