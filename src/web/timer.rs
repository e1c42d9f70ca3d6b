use std::time::Duration;

use async_trait::async_trait;
use gloo::timers::future::TimeoutFuture;

use crate::timer::Timer;

/// `setTimeout`-backed pauses.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserTimer;

#[async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}
