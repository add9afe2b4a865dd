use async_trait::async_trait;
use redis::{Script, aio::ConnectionManager};
use tracing::warn;

use super::InfraError;
use crate::app_error::{AppError, AppResult};

/// Capability for throttling signup traffic.
#[async_trait]
pub trait RateLimiterTrait: Send + Sync {
    /// Count one request against the client's window. Checks the IP budget
    /// and, when an email is known, the per-email budget too.
    async fn check(&self, ip: &str, email: Option<&str>) -> AppResult<()>;
}

/// Fixed-window counter: increment the key and make sure a window TTL is
/// attached, so a counter can never outlive its window. Returns the count
/// after the increment.
const WINDOW_COUNT_SCRIPT: &str = r#"
local count = redis.call('INCR', KEYS[1])
if redis.call('TTL', KEYS[1]) < 0 then
    redis.call('EXPIRE', KEYS[1], ARGV[1])
end
return count
"#;

/// Redis-backed rate limiter shared by all API instances.
#[derive(Clone)]
pub struct RedisRateLimiter {
    manager: ConnectionManager,
    window_secs: u64,
    per_ip: u64,
    per_email: u64,
    script: Script,
}

impl RedisRateLimiter {
    pub async fn new(
        redis_url: &str,
        window_secs: u64,
        per_ip: u64,
        per_email: u64,
    ) -> Result<Self, InfraError> {
        let client = redis::Client::open(redis_url).map_err(InfraError::RedisConnection)?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(InfraError::RedisConnection)?;
        Ok(Self {
            manager,
            window_secs,
            per_ip,
            per_email,
            script: Script::new(WINDOW_COUNT_SCRIPT),
        })
    }
}

#[async_trait]
impl RateLimiterTrait for RedisRateLimiter {
    async fn check(&self, ip: &str, email: Option<&str>) -> AppResult<()> {
        let mut budgets = vec![(format!("rate:ip:{ip}"), self.per_ip)];
        if let Some(email) = email {
            budgets.push((format!("rate:email:{}", email.to_lowercase()), self.per_email));
        }

        let mut conn = self.manager.clone();
        for (key, limit) in budgets {
            let count: u64 = self
                .script
                .key(&key)
                .arg(self.window_secs)
                .invoke_async(&mut conn)
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?;
            if count > limit {
                warn!(%key, count, limit, "Rate limit exceeded");
                return Err(AppError::RateLimited);
            }
        }
        Ok(())
    }
}
