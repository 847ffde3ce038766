use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr},
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use rocket::{
    http::Status,
    outcome::try_outcome,
    request::{FromRequest, Outcome, Request},
    State,
};

/// Fixed error code returned when a window is exhausted.
pub const RATE_LIMIT_ERROR_CODE: &str = "RATE_LIMITED";

const WINDOW: Duration = Duration::from_secs(15 * 60);

pub const GENERAL_MAX_REQUESTS: u32 = 100;
pub const AUTH_MAX_REQUESTS: u32 = 5;
pub const LOGIN_MAX_REQUESTS: u32 = 3;

struct Window {
    count: u32,
    started_at: Instant,
}

/// A fixed-window request counter keyed by client IP.
///
/// Windows are replaced lazily when the next request arrives after
/// their end; there is no queuing and no background cleanup.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    hits: Mutex<HashMap<IpAddr, Window>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Counts a request and reports whether it is still within the
    /// window's budget.
    pub fn check(&self, ip: IpAddr) -> bool {
        self.check_at(ip, Instant::now())
    }

    fn check_at(&self, ip: IpAddr, now: Instant) -> bool {
        let mut hits = self.hits.lock();
        let window = hits.entry(ip).or_insert(Window {
            count: 0,
            started_at: now,
        });
        if now.duration_since(window.started_at) >= self.window {
            *window = Window {
                count: 0,
                started_at: now,
            };
        }
        window.count += 1;
        window.count <= self.max_requests
    }
}

/// The three independent counters of the API. Exhausting one never
/// affects the others.
pub struct RateLimits {
    pub general: RateLimiter,
    pub auth: RateLimiter,
    pub login: RateLimiter,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            general: RateLimiter::new(GENERAL_MAX_REQUESTS, WINDOW),
            auth: RateLimiter::new(AUTH_MAX_REQUESTS, WINDOW),
            login: RateLimiter::new(LOGIN_MAX_REQUESTS, WINDOW),
        }
    }
}

fn client_ip(request: &Request<'_>) -> IpAddr {
    request
        .client_ip()
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

macro_rules! rate_limit_guard {
    ($name:ident, $limiter:ident) => {
        pub struct $name;

        #[rocket::async_trait]
        impl<'r> FromRequest<'r> for $name {
            type Error = ();
            async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
                let limits = try_outcome!(request.guard::<&State<RateLimits>>().await);
                if limits.$limiter.check(client_ip(request)) {
                    Outcome::Success($name)
                } else {
                    Outcome::Error((Status::TooManyRequests, ()))
                }
            }
        }
    };
}

rate_limit_guard!(GeneralRateLimit, general);
rate_limit_guard!(AuthRateLimit, auth);
rate_limit_guard!(LoginRateLimit, login);

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn limit_requests_within_a_window() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let now = Instant::now();
        assert!(limiter.check_at(ip(1), now));
        assert!(limiter.check_at(ip(1), now));
        assert!(limiter.check_at(ip(1), now));
        assert!(!limiter.check_at(ip(1), now));
    }

    #[test]
    fn windows_are_tracked_per_ip() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();
        assert!(limiter.check_at(ip(1), now));
        assert!(!limiter.check_at(ip(1), now));
        // Another client is unaffected
        assert!(limiter.check_at(ip(2), now));
    }

    #[test]
    fn window_expires_after_its_duration() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();
        assert!(limiter.check_at(ip(1), now));
        assert!(!limiter.check_at(ip(1), now + Duration::from_secs(59)));
        assert!(limiter.check_at(ip(1), now + Duration::from_secs(60)));
    }
}
