//! 核心响应处理模块

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use futures::{stream, Stream, StreamExt};
use serde::Serialize;

use super::{error::CoreError, repository::StoreError};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 201 Created，`Location` 指向新资源，响应体为空
pub fn created(location: String) -> Result<Response, CoreError> {
    let location = HeaderValue::try_from(location)
        .map_err(|e| CoreError::InternalServerError(format!("invalid location header: {}", e)))?;

    Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}

/// 把实体流逐个写成 JSON 数组响应体
///
/// 先取第一个元素再提交状态行：存储层立即失败时返回 500，
/// 而不是一个被截断的 200。之后的元素边读边写，不在内存中缓冲整个结果集。
pub async fn json_array<T, S>(mut items: S) -> Result<Response, CoreError>
where
    T: Serialize + Send + 'static,
    S: Stream<Item = Result<T, StoreError>> + Send + Unpin + 'static,
{
    let first = match items.next().await {
        Some(Ok(item)) => Some(item),
        Some(Err(err)) => return Err(err.into()),
        None => None,
    };

    let elements = stream::iter(first.map(Ok))
        .chain(items)
        .enumerate()
        .map(|(index, item)| -> Result<Bytes, BoxError> {
            let item = item?;
            let mut buf = if index == 0 { Vec::new() } else { vec![b','] };
            serde_json::to_writer(&mut buf, &item)?;
            Ok(Bytes::from(buf))
        });

    let body = stream::once(async { Ok::<_, BoxError>(Bytes::from_static(b"[")) })
        .chain(elements)
        .chain(stream::once(async { Ok(Bytes::from_static(b"]")) }));

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        Body::from_stream(body),
    )
        .into_response())
}
