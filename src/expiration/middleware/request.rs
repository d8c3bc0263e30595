use http::{HeaderMap, Method, Uri, request::*};

//
// SubRequest
//

/// Request extension marking a sub-request.
///
/// The middleware only finalizes cache headers for main requests; internal
/// dispatchers that re-enter the stack insert this marker to be passed
/// through untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct SubRequest;

//
// RequestParts
//

/// Request data captured before the request moves to the inner service.
#[derive(Clone, Debug)]
pub struct RequestParts {
    /// Method.
    pub method: Method,

    /// URI.
    pub uri: Uri,

    /// Headers.
    pub headers: HeaderMap,
}

//
// ExpirableRequest
//

/// Expiration-aware request.
pub trait ExpirableRequest {
    /// Whether this is a sub-request.
    fn is_sub_request(&self) -> bool;

    /// Capture the parts the policies will need after the request is moved.
    fn capture_parts(&self) -> RequestParts;
}

impl<RequestBodyT> ExpirableRequest for Request<RequestBodyT> {
    fn is_sub_request(&self) -> bool {
        self.extensions().get::<SubRequest>().is_some()
    }

    fn capture_parts(&self) -> RequestParts {
        RequestParts {
            method: self.method().clone(),
            uri: self.uri().clone(),
            headers: self.headers().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_request_marker() {
        let request = Request::builder().uri("/").body(()).unwrap();
        assert!(!request.is_sub_request());

        let request = Request::builder().uri("/").extension(SubRequest).body(()).unwrap();
        assert!(request.is_sub_request());
    }

    #[test]
    fn captured_parts() {
        let request = Request::builder()
            .method(Method::HEAD)
            .uri("/node/1?page=2")
            .header("cookie", "theme=dark")
            .body(())
            .unwrap();

        let parts = request.capture_parts();
        assert_eq!(parts.method, Method::HEAD);
        assert_eq!(parts.uri.path(), "/node/1");
        assert_eq!(parts.headers.get("cookie").unwrap(), "theme=dark");
    }
}
