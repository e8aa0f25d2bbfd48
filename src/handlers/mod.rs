pub mod booking;
pub mod order;
pub mod user;

pub use booking::booking_config;
pub use order::order_config;
pub use user::user_config;

use crate::error::AppError;
use actix_web::{HttpMessage, HttpRequest, web};

/// 从请求扩展中获取 `AuthMiddleware` 写入的用户ID
pub(crate) fn get_user_id_from_request(req: &HttpRequest) -> Result<i64, AppError> {
    req.extensions()
        .get::<i64>()
        .copied()
        .ok_or_else(|| AppError::AuthError("Missing access token".to_string()))
}

/// JSON 解析失败时也返回统一的错误结构
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}
