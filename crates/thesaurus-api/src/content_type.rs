//! Request Content-Type enforcement.
//!
//! A request may omit Content-Type entirely. If it sends one, it has to be a
//! well-formed media type whose essence is `application/json`.

use axum::{
  extract::Request,
  http::header,
  middleware::Next,
  response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Middleware rejecting requests that declare a non-JSON body.
///
/// Malformed headers answer 400, any other media type answers 415.
pub async fn enforce_json(req: Request, next: Next) -> Response {
  if let Some(value) = req.headers().get(header::CONTENT_TYPE) {
    match value.to_str().ok().and_then(media_type) {
      None => {
        return ApiError::BadRequest("Malformed Content-Type header".to_owned())
          .into_response();
      }
      Some(essence) if essence != "application/json" => {
        return ApiError::UnsupportedMediaType(
          "Content-Type header must be application/json".to_owned(),
        )
        .into_response();
      }
      Some(_) => {}
    }
  }
  next.run(req).await
}

/// Lowercased `type/subtype` of a Content-Type value, or `None` if the value
/// is not a valid media type (RFC 9110 §8.3.1).
pub fn media_type(value: &str) -> Option<String> {
  let (essence, params) = value.split_once(';').unwrap_or((value, ""));
  let essence = essence.trim();
  let (kind, subtype) = essence.split_once('/')?;
  if !is_token(kind) || !is_token(subtype) {
    return None;
  }

  for param in split_params(params)? {
    let param = param.trim();
    if param.is_empty() {
      continue;
    }
    let (name, value) = param.split_once('=')?;
    let value = value.trim();
    if !is_token(name.trim()) || !(is_quoted_string(value) || is_token(value)) {
      return None;
    }
  }

  Some(essence.to_ascii_lowercase())
}

/// Split a parameter list on `;`, leaving separators inside quoted strings
/// alone. `None` if a quoted string is never closed.
fn split_params(params: &str) -> Option<Vec<&str>> {
  let mut out = Vec::new();
  let mut start = 0;
  let mut quoted = false;
  let mut escaped = false;

  for (i, c) in params.char_indices() {
    match c {
      _ if escaped => escaped = false,
      '\\' if quoted => escaped = true,
      '"' => quoted = !quoted,
      ';' if !quoted => {
        out.push(&params[start..i]);
        start = i + 1;
      }
      _ => {}
    }
  }
  if quoted {
    return None;
  }
  out.push(&params[start..]);
  Some(out)
}

/// `"..."` with `\` escapes and no bare quote inside.
fn is_quoted_string(s: &str) -> bool {
  let Some(inner) = s.strip_prefix('"') else {
    return false;
  };
  let mut chars = inner.chars();
  while let Some(c) = chars.next() {
    match c {
      '\\' => {
        if chars.next().is_none() {
          return false;
        }
      }
      '"' => return chars.next().is_none(),
      _ => {}
    }
  }
  false
}

fn is_token(s: &str) -> bool {
  !s.is_empty()
    && s
      .bytes()
      .all(|b| b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b))
}
