use super::expiration::{middleware::*, *};

use {
    http::{header::*, request::*, response::*},
    kutil::std::future::*,
    std::{mem, result::Result, task::*},
    tower::*,
};

//
// PageExpirationService
//

/// Page expiration service for HTTP responses.
///
/// You will often be using [PageExpirationLayer](super::PageExpirationLayer)
/// rather than this service directly, thus this service's functionality is
/// documented there.
#[derive(Clone)]
pub struct PageExpirationService<InnerServiceT> {
    inner_service: InnerServiceT,
    configuration: MiddlewareConfiguration,
}

impl<InnerServiceT> PageExpirationService<InnerServiceT> {
    /// Constructor.
    pub fn new(inner_service: InnerServiceT, configuration: MiddlewareConfiguration) -> Self {
        Self {
            inner_service,
            configuration,
        }
    }

    // Clone while keeping `inner_service`.
    //
    // See: https://docs.rs/tower/latest/tower/trait.Service.html#be-careful-when-cloning-inner-services
    fn clone_and_keep_inner_service(&mut self) -> Self
    where
        InnerServiceT: Clone,
    {
        let mut clone = self.clone();
        clone.inner_service = mem::replace(&mut self.inner_service, clone.inner_service);
        clone
    }

    // Handle request.
    async fn handle<RequestBodyT, ResponseBodyT>(
        mut self,
        request: Request<RequestBodyT>,
    ) -> Result<Response<ResponseBodyT>, InnerServiceT::Error>
    where
        InnerServiceT: Service<Request<RequestBodyT>, Response = Response<ResponseBodyT>>,
    {
        if request.is_sub_request() {
            tracing::debug!("skip (sub-request)");
            return self.inner_service.call(request).await;
        }

        // Capture request data before moving the request to the inner service
        let parts = request.capture_parts();

        let mut response = self.inner_service.call(request).await?;
        self.finalize(&parts, &mut response);
        Ok(response)
    }

    // Compute and set the `Cache-Control` header.
    fn finalize<ResponseBodyT>(&self, parts: &RequestParts, response: &mut Response<ResponseBodyT>) {
        if !response.is_cache_variable(self.configuration.variable_by_default) {
            tracing::debug!("skip (not cache-variable)");
            response.remove_control_headers();
            return;
        }

        let precomputed_max_age = response.take_explicit_lifetime();

        let request_context = RequestPolicyContext::new(&parts.method, &parts.uri, &parts.headers);
        let response_context =
            ResponsePolicyContext::new(response.status(), response.headers(), request_context.clone());

        let context = ResponseContext::new(
            response.status(),
            parts.uri.path().into(),
            precomputed_max_age,
            self.configuration.request_policy.check(&request_context),
            self.configuration.response_policy.check(&response_context),
        );

        let candidate = resolve_lifetime(&self.configuration.lifetimes, &context);
        let max_age = apply_hooks(&self.configuration.hooks, candidate);
        let cacheable = is_cacheable(&context, max_age);

        let value = cache_control_value(cacheable, max_age);
        tracing::debug!("Cache-Control: {}", value);

        response.remove_control_headers();
        response.headers_mut().insert(
            CACHE_CONTROL,
            HeaderValue::from_str(&value).expect("valid Cache-Control value"),
        );
    }
}

impl<InnerServiceT, RequestBodyT, ResponseBodyT, ErrorT> Service<Request<RequestBodyT>>
    for PageExpirationService<InnerServiceT>
where
    InnerServiceT: 'static
        + Service<Request<RequestBodyT>, Response = Response<ResponseBodyT>, Error = ErrorT>
        + Clone
        + Send,
    InnerServiceT::Future: Send,
    RequestBodyT: 'static + Send,
    ResponseBodyT: 'static + Send,
{
    type Response = Response<ResponseBodyT>;
    type Error = InnerServiceT::Error;
    type Future = CapturedFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, context: &mut Context) -> Poll<Result<(), Self::Error>> {
        self.inner_service.poll_ready(context)
    }

    fn call(&mut self, request: Request<RequestBodyT>) -> Self::Future {
        // We unfortunately must clone the `&mut self` because it cannot be sent to the future as is;
        // this seems to be standard practice in Tower due to its design

        let cloned_self = self.clone_and_keep_inner_service();
        capture_async! { cloned_self.handle(request).await }
    }
}
