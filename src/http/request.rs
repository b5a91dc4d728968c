use std::collections::HashMap;

use super::method::HttpMethod;

/// One fully-qualified outbound call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}
