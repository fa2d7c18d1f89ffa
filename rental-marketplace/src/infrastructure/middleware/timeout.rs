use std::future::{ready, Ready};
use std::rc::Rc;
use std::time::Duration;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use domain_rental::exception::RentalException;
use futures::future::LocalBoxFuture;

use crate::api::ApiError;

/// Fails a request that is still running after `timeout_ms`.
pub struct RequestTimeout {
    timeout: Duration,
}

impl RequestTimeout {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestTimeout
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTimeoutMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTimeoutMiddleware {
            service: Rc::new(service),
            timeout: self.timeout,
        }))
    }
}

pub struct RequestTimeoutMiddleware<S> {
    service: Rc<S>,
    timeout: Duration,
}

impl<S, B> Service<ServiceRequest> for RequestTimeoutMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);
        let timeout = self.timeout;
        Box::pin(async move {
            tokio::select! {
                x = fut => x,
                _ = tokio::time::sleep(timeout) => {
                    let e: RentalException =
                        anyhow::anyhow!("Http Request Timeout. {}", timeout.as_millis()).into();
                    Err(ApiError::from(e).into())
                }
            }
        })
    }
}
